//! Renderer-facing grid types.
//!
//! These are the finished output of a build: colors are already resolved to
//! strings and headers already thinned, so a renderer only has to lay them
//! out.

use serde::{Serialize, Serializer};

use crate::models::Timeframe;

/// Fill value of a cell that holds no bucket.
pub const TRANSPARENT: &str = "transparent";

// =========================================================
// Cells and Columns
// =========================================================

/// One punchcard cell.
///
/// `Transparent` marks a position no bucket reached (before the first
/// observation's row or after the last), which is distinct from a bucket
/// that collected zero and is colored at the minimum end of the scale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Transparent,
    Color(String),
}

impl Cell {
    /// The fill string: `"transparent"` or `#rrggbb`.
    pub fn fill(&self) -> &str {
        match self {
            Cell::Transparent => TRANSPARENT,
            Cell::Color(color) => color,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Cell::Transparent)
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Cell::Transparent => None,
            Cell::Color(color) => Some(color),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.fill())
    }
}

/// A column of cells, top row first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridColumn {
    /// `None` when the label was thinned out for readability.
    pub header: Option<String>,
    pub cells: Vec<Cell>,
}

// =========================================================
// Punchcard
// =========================================================

/// The finished grid for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Punchcard {
    pub identity: String,
    pub timeframe: Timeframe,
    pub columns: Vec<GridColumn>,
    pub row_headers: Vec<String>,
}

impl Punchcard {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_headers.len()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Coordinates and colors of every non-transparent cell, column-major.
    pub fn populated_cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.columns.iter().enumerate().flat_map(|(x, column)| {
            column
                .cells
                .iter()
                .enumerate()
                .filter_map(move |(y, cell)| cell.color().map(|color| (x, y, color)))
        })
    }
}
