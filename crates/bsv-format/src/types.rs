//! Cell, row and table types and the reserved sentinel bytes

use std::fmt::{self, Write as _};

/// Row separator
pub const ROW_SEPARATOR: u8 = 0xFF;
/// Cell separator
pub const CELL_SEPARATOR: u8 = 0xFE;
/// Marker for a null cell
pub const NULL_MARKER: u8 = 0xFD;
/// Marker for an empty text cell
pub const EMPTY_MARKER: u8 = 0xFC;

/// Conventional file extension for BSV files (not enforced)
pub const BSV_EXTENSION: &str = "bsv";

/// Whether `byte` is one of the reserved sentinel values
///
/// None of these can occur inside well-formed UTF-8.
#[must_use]
pub const fn is_sentinel(byte: u8) -> bool {
    byte >= EMPTY_MARKER
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Absent value
    #[default]
    Null,
    /// Present but empty text
    Empty,
    /// Non-empty text
    Text(String),
}

impl Cell {
    /// Create a text cell, mapping `""` to [`Cell::Empty`]
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// Check if this cell is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text view of the cell, `None` for null
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Empty => Some(""),
            Self::Text(s) => Some(s),
        }
    }

    /// Convert into the optional-string form
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Empty => Some(String::new()),
            Self::Text(s) => Some(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        cell.into_option()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            None => f.write_str("null"),
            Some(s) => write!(f, "{s:?}"),
        }
    }
}

/// A row of cells; may be empty
pub type Row = Vec<Cell>;

/// A jagged table of rows
pub type Table = Vec<Row>;

/// Render a table one row per line, e.g.
///
/// ```text
/// [
///   ["Hello", null, ""]
///   []
/// ]
/// ```
#[must_use]
pub fn format_table(table: &[Row]) -> String {
    let mut out = String::from("[");
    for row in table {
        out.push_str("\n  [");
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing to a String cannot fail
            let _ = write!(out, "{cell}");
        }
        out.push(']');
    }
    out.push_str("\n]");
    out
}
