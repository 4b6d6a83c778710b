use serde::{Deserialize, Serialize};

/// A board coordinate, 0-indexed from the top-left square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

/// A single validated step, advertised as an available move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepMove {
    pub from: Position,
    pub to: Position,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// One icon code per square, row-major:
    /// 0=empty, 1=P1 man, 2=P2 man, 3=P1 king, 4=P2 king.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub player1_count: u8,
    pub player2_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - Simple step: must be an empty list.
    /// - Jump chain: square indices (0..=63) captured by the previous move.
    pub captured: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub player1_count: u8,
    pub player2_count: u8,
}
