use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::game::{win, Board, Cell, GameEngine, GameStatus, PlayerId, Players, WinScan};

/// Serializable picture of a game: dimensions, row-major occupancy
/// (`0` empty, `1` player one, `2` player two), turn, status, and players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<u8>>,
    pub current_player: PlayerId,
    pub status: GameStatus,
    pub players: Players,
    #[serde(default)]
    pub win_scan: WinScan,
}

impl GameSnapshot {
    pub fn capture(engine: &GameEngine) -> Self {
        let board = engine.board();
        let grid = board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.player().map_or(0, PlayerId::number))
                    .collect()
            })
            .collect();

        GameSnapshot {
            height: board.height(),
            width: board.width(),
            grid,
            current_player: engine.current_player(),
            status: engine.status(),
            players: engine.players().clone(),
            win_scan: engine.win_scan(),
        }
    }

    /// Rebuild an engine, rejecting snapshots that no sequence of legal
    /// moves could have produced.
    pub fn restore(&self) -> Result<GameEngine, SnapshotError> {
        let board = self.board()?;
        self.check_consistency(&board)?;
        Ok(GameEngine::from_parts(
            board,
            self.players.clone(),
            self.current_player,
            self.status,
            self.win_scan,
        ))
    }

    fn board(&self) -> Result<Board, SnapshotError> {
        if self.grid.len() != self.height {
            return Err(SnapshotError::Invalid(format!(
                "grid has {} rows, expected {}",
                self.grid.len(),
                self.height
            )));
        }

        let mut cells = Vec::with_capacity(self.height);
        for (r, row) in self.grid.iter().enumerate() {
            if row.len() != self.width {
                return Err(SnapshotError::Invalid(format!(
                    "row {r} has {} cells, expected {}",
                    row.len(),
                    self.width
                )));
            }
            let parsed = row
                .iter()
                .enumerate()
                .map(|(c, &value)| match value {
                    0 => Ok(Cell::Empty),
                    n => PlayerId::from_number(n).map(Cell::Occupied).ok_or_else(|| {
                        SnapshotError::Invalid(format!("cell ({r}, {c}) has value {n}"))
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }

        Ok(Board::from_cells(cells)?)
    }

    fn check_consistency(&self, board: &Board) -> Result<(), SnapshotError> {
        for col in 0..board.width() {
            let floating = (1..board.height()).any(|row| {
                !board.cell_at(row - 1, col).is_empty() && board.cell_at(row, col).is_empty()
            });
            if floating {
                return Err(SnapshotError::Invalid(format!(
                    "column {col} has a piece above an empty cell"
                )));
            }
        }

        let ones = board.piece_count(PlayerId::One);
        let twos = board.piece_count(PlayerId::Two);
        if ones != twos && ones != twos + 1 {
            return Err(SnapshotError::Invalid(format!(
                "impossible piece counts: {ones} for player 1, {twos} for player 2"
            )));
        }
        let last_mover = if ones == twos {
            PlayerId::Two
        } else {
            PlayerId::One
        };

        let one_has_line = win::check_for_win(board, PlayerId::One);
        let two_has_line = win::check_for_win(board, PlayerId::Two);

        match self.status {
            GameStatus::NotStarted => {
                if ones + twos != 0 {
                    return Err(SnapshotError::Invalid(
                        "game not started but board has pieces".into(),
                    ));
                }
                if self.current_player != PlayerId::One {
                    return Err(SnapshotError::Invalid(
                        "player 1 always moves first".into(),
                    ));
                }
            }
            GameStatus::InProgress => {
                if self.current_player != last_mover.other() {
                    return Err(SnapshotError::Invalid(format!(
                        "{} to move does not match piece counts",
                        self.current_player
                    )));
                }
                if board.is_full() || one_has_line || two_has_line {
                    return Err(SnapshotError::Invalid(
                        "game in progress but board is already decided".into(),
                    ));
                }
            }
            GameStatus::Won(winner) => {
                let (winner_line, loser_line) = match winner {
                    PlayerId::One => (one_has_line, two_has_line),
                    PlayerId::Two => (two_has_line, one_has_line),
                };
                if winner != last_mover || !winner_line || loser_line {
                    return Err(SnapshotError::Invalid(format!(
                        "board does not show a win for {winner} alone"
                    )));
                }
                // The turn never passes after a winning move
                if self.current_player != winner {
                    return Err(SnapshotError::Invalid(format!(
                        "{winner} won but {} is to move",
                        self.current_player
                    )));
                }
            }
            GameStatus::Tied => {
                if !board.is_full() || one_has_line || two_has_line {
                    return Err(SnapshotError::Invalid(
                        "tied game must have a full board with no winner".into(),
                    ));
                }
                if self.current_player != last_mover {
                    return Err(SnapshotError::Invalid(format!(
                        "tied game must leave {last_mover} to move, not {}",
                        self.current_player
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    /// Column order that fills a 6x7 board without four in a row
    const TIE_MOVES: [usize; 7] = [0, 2, 1, 3, 4, 6, 5];

    fn snapshot_from_rows(
        rows: &[&str],
        current_player: PlayerId,
        status: GameStatus,
    ) -> GameSnapshot {
        let grid: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'X' => 1,
                        'O' => 2,
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        GameSnapshot {
            height: grid.len(),
            width: grid[0].len(),
            grid,
            current_player,
            status,
            players: Players::default(),
            win_scan: WinScan::Full,
        }
    }

    fn tied() -> GameEngine {
        let mut engine = started();
        for _ in 0..6 {
            for col in TIE_MOVES {
                engine.drop_piece(col).unwrap();
            }
        }
        assert_eq!(engine.status(), GameStatus::Tied);
        engine
    }

    fn started() -> GameEngine {
        let mut engine = GameEngine::default();
        engine
            .start(
                Player::new(PlayerId::One, "red"),
                Player::new(PlayerId::Two, "#00ff00"),
                6,
                7,
            )
            .unwrap();
        engine
    }

    #[test]
    fn test_capture_encodes_grid() {
        let mut engine = started();
        engine.drop_piece(0).unwrap();
        engine.drop_piece(0).unwrap();
        engine.drop_piece(6).unwrap();

        let snapshot = GameSnapshot::capture(&engine);
        assert_eq!(snapshot.height, 6);
        assert_eq!(snapshot.width, 7);
        assert_eq!(snapshot.grid[5], vec![1, 0, 0, 0, 0, 0, 1]);
        assert_eq!(snapshot.grid[4], vec![2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(snapshot.current_player, PlayerId::Two);
        assert_eq!(snapshot.status, GameStatus::InProgress);
    }

    #[test]
    fn test_restore_reproduces_engine() {
        let mut engine = started();
        for col in [3, 3, 4, 2] {
            engine.drop_piece(col).unwrap();
        }
        let restored = GameSnapshot::capture(&engine).restore().unwrap();
        assert_eq!(restored, engine);
    }

    #[test]
    fn test_restore_won_game() {
        let mut engine = started();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            engine.drop_piece(col).unwrap();
        }
        let mut restored = GameSnapshot::capture(&engine).restore().unwrap();
        assert_eq!(restored.status(), GameStatus::Won(PlayerId::One));
        assert!(restored.drop_piece(3).is_err());
    }

    #[test]
    fn test_restore_rejects_ragged_grid() {
        let mut snapshot = GameSnapshot::capture(&started());
        snapshot.grid[2].pop();
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));

        let mut snapshot = GameSnapshot::capture(&started());
        snapshot.grid.pop();
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_bad_cell_value() {
        let mut snapshot = GameSnapshot::capture(&started());
        snapshot.grid[5][0] = 3;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_small_board() {
        let snapshot = GameSnapshot {
            height: 3,
            width: 3,
            grid: vec![vec![0; 3]; 3],
            current_player: PlayerId::One,
            status: GameStatus::InProgress,
            players: Players::default(),
            win_scan: WinScan::Full,
        };
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Game(_))));
    }

    #[test]
    fn test_restore_rejects_floating_piece() {
        let mut snapshot = GameSnapshot::capture(&started());
        snapshot.grid[0][0] = 1;
        snapshot.current_player = PlayerId::Two;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_wrong_turn() {
        let mut engine = started();
        engine.drop_piece(0).unwrap();
        let mut snapshot = GameSnapshot::capture(&engine);
        snapshot.current_player = PlayerId::One;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_unearned_win() {
        let mut engine = started();
        engine.drop_piece(0).unwrap();
        let mut snapshot = GameSnapshot::capture(&engine);
        snapshot.status = GameStatus::Won(PlayerId::One);
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_json_shape() {
        let snapshot = GameSnapshot::capture(&started());
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["height"], 6);
        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["current_player"], "One");
        assert_eq!(value["grid"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_restore_tied_game() {
        let engine = tied();
        let restored = GameSnapshot::capture(&engine).restore().unwrap();
        assert_eq!(restored, engine);
        assert_eq!(restored.current_player(), PlayerId::Two);
    }

    #[test]
    fn test_restore_rejects_tie_with_a_line() {
        let snapshot = snapshot_from_rows(
            &[
                "OOXXOOX",
                "XXOOXXO",
                "OOXXOOX",
                "XXOOXXO",
                "OOXXOOX",
                "XXXXOOO",
            ],
            PlayerId::Two,
            GameStatus::Tied,
        );
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_tie_with_wrong_turn() {
        let mut snapshot = GameSnapshot::capture(&tied());
        snapshot.current_player = PlayerId::One;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_win_when_loser_also_has_line() {
        let rows = [
            ".......",
            ".......",
            "......O",
            "......O",
            "......O",
            "XXXX.XO",
        ];
        let snapshot = snapshot_from_rows(&rows, PlayerId::One, GameStatus::Won(PlayerId::One));
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_rejects_win_with_loser_to_move() {
        let mut engine = started();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            engine.drop_piece(col).unwrap();
        }
        let mut snapshot = GameSnapshot::capture(&engine);
        snapshot.current_player = PlayerId::Two;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn test_restore_not_started() {
        let engine = GameEngine::default();
        let snapshot = GameSnapshot::capture(&engine);
        assert_eq!(snapshot.restore().unwrap(), engine);

        let mut snapshot = snapshot;
        snapshot.current_player = PlayerId::Two;
        assert!(matches!(snapshot.restore(), Err(SnapshotError::Invalid(_))));
    }
}
