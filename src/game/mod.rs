//! Core Connect Four game logic: board representation, player identities,
//! win detection, and the turn/termination state machine.

mod board;
mod engine;
mod player;
pub mod win;

pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_DIMENSION};
pub use engine::{GameEngine, GameStatus, MoveOutcome};
pub use player::{Player, PlayerId, Players, DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR};
pub use win::WinScan;
