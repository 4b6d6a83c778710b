use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::game::{FirstLegalMoveProvider, GameInstance};
use crate::stats::run_simulated_games;
use crate::types::Position;

/// The single live session behind the WASM boundary. The frontend is
/// the rendering/input collaborator; it only ever goes through these
/// exports.
static GAME: Lazy<Mutex<GameInstance>> =
    Lazy::new(|| Mutex::new(GameInstance::new_with_default_provider()));

/// Resets the session and returns the initial game state.
#[wasm_bindgen]
pub fn new_game() -> Result<JsValue, JsValue> {
    let mut game = lock_game()?;
    *game = GameInstance::new_with_default_provider();
    to_js(&game.to_game_state())
}

/// Submits a move path (an array of `{col, row}` positions) for the
/// player to move and returns the updated state.
#[wasm_bindgen]
pub fn apply_move(path: JsValue) -> Result<JsValue, JsValue> {
    let path: Vec<Position> =
        serde_wasm_bindgen::from_value(path).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mut game = lock_game()?;
    game.submit_move(&path).map_err(|err| JsValue::from_str(&err))?;
    to_js(&game.to_game_state())
}

/// Lets the session's configured move provider take the current turn.
#[wasm_bindgen]
pub fn provider_turn() -> Result<JsValue, JsValue> {
    let mut game = lock_game()?;
    game.run_provider_turn()
        .map_err(|err| JsValue::from_str(&err))?;
    to_js(&game.to_game_state())
}

#[wasm_bindgen]
pub fn game_state() -> Result<JsValue, JsValue> {
    let game = lock_game()?;
    to_js(&game.to_game_state())
}

/// Available single steps for the player to move.
#[wasm_bindgen]
pub fn legal_steps() -> Result<JsValue, JsValue> {
    let game = lock_game()?;
    to_js(&game.legal_steps())
}

/// Final result; an error while the game is still running.
#[wasm_bindgen]
pub fn game_result() -> Result<JsValue, JsValue> {
    let game = lock_game()?;
    if !game.is_game_over {
        return Err(JsValue::from_str("game is not over yet"));
    }
    to_js(&game.to_game_result())
}

/// Runs `games` simulated self-play games on independent sessions and
/// returns the aggregated statistics summary.
#[wasm_bindgen]
pub fn run_experiment(games: u32) -> Result<JsValue, JsValue> {
    let totals = run_simulated_games(games, &FirstLegalMoveProvider, &FirstLegalMoveProvider)
        .map_err(|err| JsValue::from_str(&err))?;
    to_js(&totals.summary())
}

fn lock_game() -> Result<MutexGuard<'static, GameInstance>, JsValue> {
    GAME.lock()
        .map_err(|_| JsValue::from_str("game session lock poisoned"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
