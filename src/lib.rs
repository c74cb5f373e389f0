//! # Connect Four
//!
//! Rules engine and turn-based state machine for Connect Four, with a
//! terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, win detection, engine
//! - [`snapshot`] — Saving and resuming games as JSON
//! - [`ui`] — Terminal UI: board view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod ui;
