use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use tracing::{error, warn};

use crate::error::GameError;
use crate::game::{GameEngine, GameStatus, MoveOutcome, PlayerId};
use crate::snapshot::SnapshotStore;

/// Colors cycled through with the `c`/`v` keys
const PALETTE: [&str; 8] = [
    "red", "yellow", "blue", "green", "magenta", "cyan", "white", "#ff8800",
];

pub struct App {
    engine: GameEngine,
    store: SnapshotStore,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(engine: GameEngine, store: SnapshotStore) -> Self {
        let selected_column = engine.board().width() / 2;
        let message = match engine.status() {
            GameStatus::NotStarted => Some("Press 'r' to start a game".to_string()),
            _ => None,
        };
        App {
            engine,
            store,
            selected_column,
            should_quit: false,
            message,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let width = self.engine.board().width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < width {
                    self.selected_column = column;
                }
                self.drop_piece(column);
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('c') => self.cycle_color(PlayerId::One),
            KeyCode::Char('v') => self.cycle_color(PlayerId::Two),
            _ => {}
        }
    }

    fn reset(&mut self) {
        match self.engine.reset_game() {
            Ok(()) => {
                self.selected_column = self.engine.board().width() / 2;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => {
                error!(error = %e, "reset failed");
                self.message = Some(format!("Could not start game: {e}"));
            }
        }
    }

    /// Drop piece in `column` and describe the result
    fn drop_piece(&mut self, column: usize) {
        self.message = match self.engine.drop_piece(column) {
            Ok(MoveOutcome::Placed { .. }) => None,
            Ok(MoveOutcome::Won { player, .. }) => {
                Some(format!("Player {} won! Press 'r' to play again.", player.number()))
            }
            Ok(MoveOutcome::Tied { .. }) => Some("Tie! Press 'r' to play again.".to_string()),
            Err(GameError::GameNotActive { status }) if status.is_terminal() => {
                Some("Game over! Press 'r' to restart.".to_string())
            }
            Err(GameError::GameNotActive { .. }) => {
                Some("Press 'r' to start a game".to_string())
            }
            Err(e) => Some(capitalize(&e.to_string())),
        };
    }

    fn save(&mut self) {
        self.message = Some(match self.store.save(&self.engine) {
            Ok(()) => format!("Game saved to {}", self.store.path().display()),
            Err(e) => {
                warn!(error = %e, "save failed");
                format!("Save failed: {e}")
            }
        });
    }

    fn cycle_color(&mut self, id: PlayerId) {
        let current = &self.engine.player(id).color;
        let next = PALETTE
            .iter()
            .position(|c| c.eq_ignore_ascii_case(current))
            .map_or(0, |i| (i + 1) % PALETTE.len());
        self.engine.set_player_color(id, PALETTE[next]);
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
