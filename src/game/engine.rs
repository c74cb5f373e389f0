use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::error::GameError;

use super::win::{self, WinScan};
use super::{Board, Player, PlayerId, Players};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won(PlayerId),
    Tied,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Tied)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::NotStarted => write!(f, "not started"),
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "{player} won"),
            GameStatus::Tied => write!(f, "tied"),
        }
    }
}

/// What a successful drop did. Failed drops are reported as [`GameError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Piece landed, game continues with `next` to move
    Placed {
        row: usize,
        column: usize,
        player: PlayerId,
        next: PlayerId,
    },
    /// Piece landed and completed four in a row for `player`
    Won {
        row: usize,
        column: usize,
        player: PlayerId,
    },
    /// Piece landed and filled the board without a winner
    Tied {
        row: usize,
        column: usize,
        player: PlayerId,
    },
}

impl MoveOutcome {
    /// Cell the piece landed in
    pub fn position(&self) -> (usize, usize) {
        match *self {
            MoveOutcome::Placed { row, column, .. }
            | MoveOutcome::Won { row, column, .. }
            | MoveOutcome::Tied { row, column, .. } => (row, column),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::Placed { .. })
    }
}

/// Turn order and termination state machine for one game session.
///
/// Moves are only accepted while the status is [`GameStatus::InProgress`].
/// Every failing call leaves the board and turn untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    players: Players,
    current_player: PlayerId,
    status: GameStatus,
    win_scan: WinScan,
}

impl GameEngine {
    /// Engine in `NotStarted` with an empty default-sized board
    pub fn new(players: Players) -> Self {
        GameEngine {
            board: Board::default(),
            players,
            current_player: PlayerId::One,
            status: GameStatus::NotStarted,
            win_scan: WinScan::default(),
        }
    }

    /// Engine sized and colored from configuration, still `NotStarted`.
    pub fn from_config(config: &AppConfig) -> Result<Self, GameError> {
        let board = Board::new(config.board.height, config.board.width)?;
        Ok(GameEngine {
            board,
            players: Players::new(
                config.players.player1_color.clone(),
                config.players.player2_color.clone(),
            ),
            current_player: PlayerId::One,
            status: GameStatus::NotStarted,
            win_scan: config.engine.win_scan,
        })
    }

    pub(crate) fn from_parts(
        board: Board,
        players: Players,
        current_player: PlayerId,
        status: GameStatus,
        win_scan: WinScan,
    ) -> Self {
        GameEngine {
            board,
            players,
            current_player,
            status,
            win_scan,
        }
    }

    pub fn with_win_scan(mut self, win_scan: WinScan) -> Self {
        self.win_scan = win_scan;
        self
    }

    /// Begin a fresh game. Only the players' display colors carry over from
    /// any previous game.
    #[instrument(skip(self, player1, player2), fields(player1 = %player1.color, player2 = %player2.color))]
    pub fn start(
        &mut self,
        player1: Player,
        player2: Player,
        height: usize,
        width: usize,
    ) -> Result<(), GameError> {
        self.board.reset(height, width)?;
        self.players.get_mut(PlayerId::One).color = player1.color;
        self.players.get_mut(PlayerId::Two).color = player2.color;
        self.current_player = PlayerId::One;
        self.status = GameStatus::InProgress;
        info!(height, width, "game started");
        Ok(())
    }

    /// Restart with the current players and board size
    pub fn reset_game(&mut self) -> Result<(), GameError> {
        let player1 = self.players.get(PlayerId::One).clone();
        let player2 = self.players.get(PlayerId::Two).clone();
        let (height, width) = (self.board.height(), self.board.width());
        self.start(player1, player2, height, width)
    }

    /// Drop the current player's piece into `column`.
    #[instrument(skip(self), fields(player = ?self.current_player))]
    pub fn drop_piece(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.status != GameStatus::InProgress {
            debug!(status = %self.status, "move rejected");
            return Err(GameError::GameNotActive {
                status: self.status,
            });
        }

        let row = self.board.find_drop_row(column).map_err(|e| {
            debug!(error = %e, "move rejected");
            GameError::InvalidMove(e)
        })?;

        let player = self.current_player;
        self.board.place(row, column, player);
        debug!(row, column, "piece placed");

        if win::detect_win(&self.board, row, column, player, self.win_scan) {
            self.status = GameStatus::Won(player);
            info!(%player, "game won");
            return Ok(MoveOutcome::Won {
                row,
                column,
                player,
            });
        }

        if self.board.is_full() {
            self.status = GameStatus::Tied;
            info!("game tied");
            return Ok(MoveOutcome::Tied {
                row,
                column,
                player,
            });
        }

        self.current_player = player.other();
        Ok(MoveOutcome::Placed {
            row,
            column,
            player,
            next: self.current_player,
        })
    }

    /// Take the configured colors and win scan for a resumed game. The board
    /// keeps its saved size; returns `false` if that differs from the
    /// configured size.
    pub fn adopt_config(&mut self, config: &AppConfig) -> bool {
        self.set_player_color(PlayerId::One, config.players.player1_color.clone());
        self.set_player_color(PlayerId::Two, config.players.player2_color.clone());
        self.win_scan = config.engine.win_scan;
        self.board.height() == config.board.height && self.board.width() == config.board.width
    }

    /// Update a player's display color. Game state is not affected.
    pub fn set_player_color(&mut self, id: PlayerId, color: impl Into<String>) {
        self.players.get_mut(id).color = color.into();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        self.players.get(id)
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn win_scan(&self) -> WinScan {
        self.win_scan
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Cells of the winning run, if the game has been won
    pub fn winning_run(&self) -> Option<[(usize, usize); win::RUN_LENGTH]> {
        self.winner()
            .and_then(|player| win::find_winning_run(&self.board, player))
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Players::default())
    }
}
