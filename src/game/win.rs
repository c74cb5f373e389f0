//! Four-in-a-row detection.
//!
//! Two strategies are provided. [`check_for_win`] rescans every cell of the
//! board; [`check_win_at`] only looks at runs through one cell. Pieces are
//! never removed, so a win that appears after a drop must pass through the
//! dropped piece and the two strategies always agree.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Board, Cell, PlayerId};

pub const RUN_LENGTH: usize = 4;

/// Step directions checked from each starting cell: right, down,
/// down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Which scan the engine runs after each drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinScan {
    /// Rescan the whole board every turn
    #[default]
    Full,
    /// Only scan runs through the piece just placed
    Anchored,
}

/// Coordinates of the run starting at `(row, col)` stepping by `(dr, dc)`,
/// or `None` if it leaves the board.
fn run_from(
    board: &Board,
    row: usize,
    col: usize,
    (dr, dc): (isize, isize),
) -> Option<[(usize, usize); RUN_LENGTH]> {
    let mut run = [(0, 0); RUN_LENGTH];
    for (i, slot) in run.iter_mut().enumerate() {
        let r = row as isize + dr * i as isize;
        let c = col as isize + dc * i as isize;
        board.cell_checked(r, c)?;
        *slot = (r as usize, c as usize);
    }
    Some(run)
}

fn run_belongs_to(board: &Board, run: &[(usize, usize); RUN_LENGTH], player: PlayerId) -> bool {
    run.iter()
        .all(|&(r, c)| board.cell_at(r, c) == Cell::Occupied(player))
}

/// First winning run for `player` in row-major scan order.
pub fn find_winning_run(board: &Board, player: PlayerId) -> Option<[(usize, usize); RUN_LENGTH]> {
    for row in 0..board.height() {
        for col in 0..board.width() {
            for direction in DIRECTIONS {
                if let Some(run) = run_from(board, row, col, direction) {
                    if run_belongs_to(board, &run, player) {
                        return Some(run);
                    }
                }
            }
        }
    }
    None
}

/// Whether `player` has four in a row anywhere on the board
#[instrument(skip(board), ret, level = "trace")]
pub fn check_for_win(board: &Board, player: PlayerId) -> bool {
    find_winning_run(board, player).is_some()
}

/// Whether a run of `player`'s pieces of at least four passes through
/// `(row, col)`.
#[instrument(skip(board), ret, level = "trace")]
pub fn check_win_at(board: &Board, row: usize, col: usize, player: PlayerId) -> bool {
    let target = Cell::Occupied(player);
    if board.cell_at(row, col) != target {
        return false;
    }

    let count_towards = |dr: isize, dc: isize| {
        (1..RUN_LENGTH as isize)
            .take_while(|&i| {
                board.cell_checked(row as isize + dr * i, col as isize + dc * i) == Some(target)
            })
            .count()
    };

    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| 1 + count_towards(dr, dc) + count_towards(-dr, -dc) >= RUN_LENGTH)
}

/// Run the chosen strategy for the piece just placed at `(row, col)`.
pub fn detect_win(board: &Board, row: usize, col: usize, player: PlayerId, scan: WinScan) -> bool {
    match scan {
        WinScan::Full => check_for_win(board, player),
        WinScan::Anchored => check_win_at(board, row, col, player),
    }
}
