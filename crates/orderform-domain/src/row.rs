//! Positional output rows

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single primitive display value in an output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Rendered text (including the `"NA"` sentinel and empty placeholders)
    Text(String),
    /// Raw count
    Number(i64),
}

impl Cell {
    /// An empty placeholder cell
    pub fn blank() -> Self {
        Cell::Text(String::new())
    }

    /// The text value, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Number(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// An ordered, fixed-length sequence of cells
///
/// Rows are built from fixed-size arrays so the width is part of the
/// producer's type; position encodes meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedRow(Vec<Cell>);

impl FormattedRow {
    /// Build a row from a fixed-width array of cells
    pub fn from_cells<const N: usize>(cells: [Cell; N]) -> Self {
        Self(cells.into())
    }

    /// The cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as a single tab-separated line
    pub fn to_tsv(&self) -> String {
        self.0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
