use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Minimum run length that qualifies for clearing.
pub const LINE_LENGTH: usize = 5;

/// Points credited per cleared cell, counted once per line it belongs to.
pub const POINTS_PER_CELL: Score = 2;

/// The four scoring axes. Traversal is orthogonal-only, but runs count
/// along diagonals too.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right diagonal.
    Falling,
    /// Bottom-left to top-right diagonal.
    Rising,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Horizontal, Axis::Vertical, Axis::Falling, Axis::Rising];

    /// Unit step in the axis's positive direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::Falling => (1, 1),
            Axis::Rising => (1, -1),
        }
    }
}

/// One qualifying run of same-colored balls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub axis: Axis,
    pub color: Color,
    pub cells: SmallVec<[Coord2; 9]>,
}

impl Line {
    /// Score credited for clearing this line.
    pub fn score(&self) -> Score {
        POINTS_PER_CELL * self.cells.len() as Score
    }
}

/// Runs of `LINE_LENGTH` or more that the ball at `origin` belongs to.
///
/// Each axis is walked outward in both directions; a direction stops at a
/// bounds break or color mismatch while the other may continue. Every
/// qualifying axis is reported, so a ball at the crossing of two runs
/// yields both.
pub fn find_lines(board: &Board, origin: Coord2) -> SmallVec<[Line; 4]> {
    let Some(color) = board.ball_at(origin) else {
        return SmallVec::new();
    };

    let mut lines = SmallVec::new();
    for axis in Axis::ALL {
        let mut cells: SmallVec<[Coord2; 9]> = smallvec![origin];
        let (dx, dy) = axis.delta();
        extend_run(board, color, origin, (dx, dy), &mut cells);
        extend_run(board, color, origin, (-dx, -dy), &mut cells);

        if cells.len() >= LINE_LENGTH {
            lines.push(Line { axis, color, cells });
        }
    }
    lines
}

/// Walks from `origin` in `delta` steps while the color run continues.
fn extend_run(
    board: &Board,
    color: Color,
    origin: Coord2,
    delta: (isize, isize),
    cells: &mut SmallVec<[Coord2; 9]>,
) {
    let mut coords = origin;
    while let Some(next) = apply_delta(coords, delta, board.size()) {
        if board.ball_at(next) != Some(color) {
            break;
        }
        cells.push(next);
        coords = next;
    }
}
