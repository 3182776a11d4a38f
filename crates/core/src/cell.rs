//! Cell coordinates and navigation directions.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::row::RowId;

/// A cell, addressed by row identity rather than screen position, so it
/// stays valid across sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: RowId,
    pub field: Field,
}

impl CellRef {
    #[inline]
    pub fn new(row: RowId, field: Field) -> Self {
        Self { row, field }
    }

    /// Reference label shown next to the formula bar, e.g. `EstValue3`.
    pub fn reference(&self) -> String {
        let key = self.field.key();
        let mut chars = key.chars();
        let head: String = chars.next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
        format!("{}{}{}", head, chars.as_str(), self.row)
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.field)
    }
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row delta, column delta)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
