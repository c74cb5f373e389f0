//! Terminal UI: renders the board, captures column selection, and shows
//! win/tie/invalid-move messages. All game rules live in [`crate::game`].

mod app;
mod game_view;

pub use app::App;
