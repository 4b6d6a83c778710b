use crate::board::{Board, Player};
use crate::types::{GameResult, GameState, Position, StepMove};

const BOARD_WIDTH: u8 = 8;
pub const PLAYER_ONE: u8 = 1;
pub const PLAYER_TWO: u8 = 2;

/// Input-acquisition seam: whoever produces candidate move paths for the
/// player to move. `None` means the provider gives up (resign/quit).
pub trait MoveProvider: Send + Sync {
    fn provide_move(&self, board: &Board, move_count: u32) -> Option<Vec<Position>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveProvider;

impl MoveProvider for FirstLegalMoveProvider {
    fn provide_move(&self, board: &Board, _move_count: u32) -> Option<Vec<Position>> {
        let (from, to) = board.legal_steps().into_iter().next()?;
        Some(vec![from, to])
    }
}

pub struct GameInstance {
    board: Board,
    pub move_count: u32,
    pub is_game_over: bool,
    pub captured: Vec<u8>,
    provider: Box<dyn MoveProvider>,
}

impl GameInstance {
    pub fn new(provider: Box<dyn MoveProvider>) -> Self {
        Self {
            board: Board::new(),
            move_count: 0,
            is_game_over: false,
            captured: Vec::new(),
            provider,
        }
    }

    pub fn new_with_default_provider() -> Self {
        Self::new(Box::new(FirstLegalMoveProvider))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Submits one move path for the player to move.
    ///
    /// Coordinates are bounds-checked here, before the rules core sees
    /// them; rule violations come back as recoverable errors.
    pub fn submit_move(&mut self, path: &[Position]) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }
        if path.len() < 2 {
            return Err("a move path needs at least two positions".to_string());
        }
        for pos in path {
            if pos.col >= BOARD_WIDTH || pos.row >= BOARD_WIDTH {
                return Err(format!(
                    "position out of range: col {}, row {}",
                    pos.col, pos.row
                ));
            }
        }

        let before = self.board;
        if !self.board.apply_move(path) {
            return Err("illegal move".to_string());
        }

        self.captured = captured_squares(&before, &self.board);
        self.move_count += 1;

        if self.board.is_complete() {
            self.is_game_over = true;
        }

        Ok(())
    }

    /// Asks the configured provider for a move and applies it.
    pub fn run_provider_turn(&mut self) -> Result<(), String> {
        if self.is_game_over {
            return Err("game is already over".to_string());
        }

        let path = self
            .provider
            .provide_move(&self.board, self.move_count)
            .ok_or_else(|| "provider did not produce a move".to_string())?;

        self.submit_move(&path)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_any_legal_move()
    }

    pub fn legal_steps(&self) -> Vec<StepMove> {
        self.board
            .legal_steps()
            .into_iter()
            .map(|(from, to)| StepMove { from, to })
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.board.current_player().code(),
            player1_count: self.board.alive_count(Player::One),
            player2_count: self.board.alive_count(Player::Two),
            is_game_over: self.is_game_over,
            captured: self.captured.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: self.board.winner().code(),
            player1_count: self.board.alive_count(Player::One),
            player2_count: self.board.alive_count(Player::Two),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.move_count = 0;
        self.is_game_over = false;
        self.captured.clear();
    }
}

/// Squares owned by the mover's opponent before the move and empty after
/// it, as row-major indices. The mover only vacates its own squares, so
/// the diff is exactly the captured pieces.
fn captured_squares(before: &Board, after: &Board) -> Vec<u8> {
    let opponent = before.current_player().opponent();
    let previous = before.to_array();
    let current = after.to_array();

    previous
        .iter()
        .zip(current.iter())
        .enumerate()
        .filter(|&(_, (&was, &now))| now == 0 && owner_of_code(was) == Some(opponent))
        .map(|(idx, _)| idx as u8)
        .collect()
}

fn owner_of_code(code: u8) -> Option<Player> {
    match code {
        1 | 3 => Some(Player::One),
        2 | 4 => Some(Player::Two),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceKind};

    struct FixedMoveProvider {
        path: Vec<Position>,
    }

    impl MoveProvider for FixedMoveProvider {
        fn provide_move(&self, _board: &Board, _move_count: u32) -> Option<Vec<Position>> {
            Some(self.path.clone())
        }
    }

    struct ResigningProvider;

    impl MoveProvider for ResigningProvider {
        fn provide_move(&self, _board: &Board, _move_count: u32) -> Option<Vec<Position>> {
            None
        }
    }

    fn pos(col: u8, row: u8) -> Position {
        Position { col, row }
    }

    fn man(player: Player) -> Piece {
        Piece {
            player,
            kind: PieceKind::Man,
        }
    }

    fn idx(col: u8, row: u8) -> u8 {
        row * 8 + col
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new_with_default_provider();
        let state = game.to_game_state();

        assert_eq!(state.current_player, PLAYER_ONE);
        assert_eq!(state.player1_count, 12);
        assert_eq!(state.player2_count, 12);
        assert!(!state.is_game_over);
        assert!(state.captured.is_empty());
        // The four men on row 5 share seven open forward steps.
        assert_eq!(game.legal_steps().len(), 7);
    }

    #[test]
    fn t02_illegal_move_returns_error_and_keeps_state() {
        let mut game = GameInstance::new_with_default_provider();

        let err = game.submit_move(&[pos(0, 5), pos(0, 4)]).unwrap_err();
        assert!(err.contains("illegal move"));
        assert_eq!(game.move_count, 0);
        assert_eq!(game.to_game_state().current_player, PLAYER_ONE);
    }

    #[test]
    fn t03_out_of_range_path_is_rejected_at_the_boundary() {
        let mut game = GameInstance::new_with_default_provider();

        let err = game.submit_move(&[pos(0, 5), pos(9, 4)]).unwrap_err();
        assert!(err.contains("out of range"));

        let err = game.submit_move(&[pos(0, 5)]).unwrap_err();
        assert!(err.contains("at least two"));
    }

    #[test]
    fn capture_is_reported_in_the_state_snapshot() {
        let mut game = GameInstance::new_with_default_provider();
        game.set_board_for_test(Board::from_pieces(
            &[
                (pos(4, 5), man(Player::One)),
                (pos(3, 4), man(Player::Two)),
                (pos(6, 1), man(Player::Two)),
            ],
            Player::One,
        ));

        game.submit_move(&[pos(4, 5), pos(2, 3)]).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.captured, vec![idx(3, 4)]);
        assert_eq!(state.player2_count, 1);
        assert_eq!(state.current_player, PLAYER_TWO);
        assert_eq!(game.move_count, 1);
    }

    #[test]
    fn finishing_capture_latches_game_over_and_result() {
        let mut game = GameInstance::new_with_default_provider();
        game.set_board_for_test(Board::from_pieces(
            &[
                (pos(1, 6), man(Player::One)),
                (pos(2, 5), man(Player::Two)),
                (pos(2, 3), man(Player::Two)),
            ],
            Player::One,
        ));

        game.submit_move(&[pos(1, 6), pos(3, 4), pos(1, 2)])
            .unwrap();
        let state = game.to_game_state();

        assert!(state.is_game_over);
        assert_eq!(state.captured, vec![idx(2, 3), idx(2, 5)]);
        assert_eq!(state.player2_count, 0);

        let result = game.to_game_result();
        assert_eq!(result.winner, PLAYER_ONE);
        assert_eq!(result.player1_count, 1);
        assert_eq!(result.player2_count, 0);

        let err = game.submit_move(&[pos(1, 2), pos(0, 1)]).unwrap_err();
        assert!(err.contains("already over"));
    }

    #[test]
    fn provider_turn_applies_the_provided_path() {
        let mut game = GameInstance::new(Box::new(FixedMoveProvider {
            path: vec![pos(0, 5), pos(1, 4)],
        }));

        game.run_provider_turn().unwrap();
        assert_eq!(game.to_game_state().current_player, PLAYER_TWO);
        assert_eq!(game.move_count, 1);
    }

    #[test]
    fn provider_without_a_move_is_an_error() {
        let mut game = GameInstance::new(Box::new(ResigningProvider));

        let err = game.run_provider_turn().unwrap_err();
        assert!(err.contains("did not produce"));
        assert_eq!(game.move_count, 0);
    }

    #[test]
    fn default_provider_plays_the_first_legal_step() {
        let mut game = GameInstance::new_with_default_provider();

        game.run_provider_turn().unwrap();
        let state = game.to_game_state();

        assert_eq!(state.current_player, PLAYER_TWO);
        assert!(state.captured.is_empty());
        assert_eq!(state.player1_count, 12);
        assert_eq!(state.player2_count, 12);
    }
}
