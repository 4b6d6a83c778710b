use serde::Serialize;
use web_time::{Duration, Instant};

use crate::board::Player;
use crate::game::{GameInstance, MoveProvider, PLAYER_ONE};

/// Applied-move cap for a simulated game. The rules have no draw
/// detection, so two deterministic providers can shuffle kings forever;
/// a capped game reports winner code 0.
const MOVE_LIMIT: u32 = 512;

/// Timing and outcome of a single game, observed purely from outside
/// the session (winner code and per-move durations).
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    move_durations: Vec<Duration>,
    pub game_duration: Duration,
    pub winner: u8,
}

impl GameStats {
    pub fn append_move(&mut self, duration: Duration) {
        self.move_durations.push(duration);
    }

    pub fn move_count(&self) -> u32 {
        self.move_durations.len() as u32
    }

    pub fn avg_move_duration(&self) -> Duration {
        if self.move_durations.is_empty() {
            return Duration::ZERO;
        }
        self.move_durations.iter().sum::<Duration>() / self.move_durations.len() as u32
    }
}

/// Aggregate over a batch of simulated games.
#[derive(Debug, Clone, Default)]
pub struct TotalGameStats {
    game_count: u32,
    player1_wins: u32,
    total_game_duration: Duration,
    total_move_duration: Duration,
    total_moves: u64,
}

impl TotalGameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_game(&mut self, stats: &GameStats) {
        self.game_count += 1;
        if stats.winner == PLAYER_ONE {
            self.player1_wins += 1;
        }
        self.total_game_duration += stats.game_duration;
        self.total_move_duration += stats.move_durations.iter().sum::<Duration>();
        self.total_moves += u64::from(stats.move_count());
    }

    pub fn game_count(&self) -> u32 {
        self.game_count
    }

    pub fn player1_win_rate(&self) -> f64 {
        if self.game_count == 0 {
            return 0.0;
        }
        f64::from(self.player1_wins) / f64::from(self.game_count)
    }

    pub fn avg_game_duration(&self) -> Duration {
        if self.game_count == 0 {
            return Duration::ZERO;
        }
        self.total_game_duration / self.game_count
    }

    pub fn avg_move_duration(&self) -> Duration {
        if self.total_moves == 0 {
            return Duration::ZERO;
        }
        self.total_move_duration / self.total_moves as u32
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            games: self.game_count,
            player1_wins: self.player1_wins,
            player1_win_rate: self.player1_win_rate(),
            avg_game_ms: self.avg_game_duration().as_secs_f64() * 1000.0,
            avg_move_ms: self.avg_move_duration().as_secs_f64() * 1000.0,
        }
    }
}

/// Aggregated numbers shaped for the WASM boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub games: u32,
    pub player1_wins: u32,
    pub player1_win_rate: f64,
    pub avg_game_ms: f64,
    pub avg_move_ms: f64,
}

/// Plays one game to completion on an independent session, timing each
/// provider decision together with its application.
///
/// A provider returning `None`, or a game reaching the move cap, ends
/// the game without a winner (code 0). A provider submitting an illegal
/// path is a programming error and surfaces as `Err`.
pub fn run_simulated_game(
    player1: &dyn MoveProvider,
    player2: &dyn MoveProvider,
) -> Result<GameStats, String> {
    let mut game = GameInstance::new_with_default_provider();
    let mut stats = GameStats::default();
    let game_start = Instant::now();

    while !game.is_game_over {
        if stats.move_count() >= MOVE_LIMIT {
            stats.game_duration = game_start.elapsed();
            return Ok(stats);
        }

        let provider = if game.board().current_player() == Player::One {
            player1
        } else {
            player2
        };

        let move_start = Instant::now();
        let Some(path) = provider.provide_move(game.board(), game.move_count) else {
            stats.game_duration = game_start.elapsed();
            return Ok(stats);
        };
        game.submit_move(&path)?;
        stats.append_move(move_start.elapsed());
    }

    stats.game_duration = game_start.elapsed();
    stats.winner = game.to_game_result().winner;
    Ok(stats)
}

/// Runs `count` independent simulated games and aggregates their stats.
pub fn run_simulated_games(
    count: u32,
    player1: &dyn MoveProvider,
    player2: &dyn MoveProvider,
) -> Result<TotalGameStats, String> {
    let mut totals = TotalGameStats::new();
    for _ in 0..count {
        let stats = run_simulated_game(player1, player2)?;
        totals.append_game(&stats);
    }
    Ok(totals)
}
