//! Byte-stream to table decoding
//!
//! The decoder walks the stream one segment at a time. A segment is the run
//! of bytes before the next cell or row separator (or the end of the
//! stream). Whether an empty segment is legal depends only on what came
//! before it and which delimiter ends it, so the scan carries that context as
//! an explicit state rather than looking back at neighbouring bytes.

use crate::error::{BsvError, Result};
use crate::types::{CELL_SEPARATOR, Cell, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR, Row, Table};
use tracing::trace;

/// Position of the scan relative to the structure of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing consumed yet
    AtStreamStart,
    /// A cell has been read and its delimiter is pending
    ScanningRow,
    /// Just consumed a cell separator
    AfterCellSep,
    /// Just consumed a row separator
    AfterRowSep,
    /// End of stream reached, final row emitted
    AtStreamEnd,
}

impl ScanState {
    fn at_row_boundary(self) -> bool {
        matches!(self, Self::AtStreamStart | Self::AfterRowSep)
    }

    /// State after consuming `delimiter`
    fn advance(self, delimiter: Delimiter) -> Self {
        match (self, delimiter) {
            (Self::AtStreamEnd, _) | (_, Delimiter::End) => Self::AtStreamEnd,
            (_, Delimiter::Row) => Self::AfterRowSep,
            (_, Delimiter::Cell) => Self::AfterCellSep,
        }
    }
}

/// What terminated a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Cell,
    Row,
    End,
}

impl Delimiter {
    fn closes_row(self) -> bool {
        matches!(self, Self::Row | Self::End)
    }
}

#[derive(Debug)]
struct Segment<'a> {
    offset: usize,
    bytes: &'a [u8],
    delimiter: Delimiter,
}

/// Scan cursor owned by a single decode call
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Consume the next segment and its delimiter
    fn next_segment(&mut self) -> Segment<'a> {
        let offset = self.pos;
        let rest = &self.bytes[offset..];
        match rest.iter().position(|&b| b >= CELL_SEPARATOR) {
            Some(len) => {
                self.pos = offset + len + 1;
                let delimiter = if rest[len] == ROW_SEPARATOR {
                    Delimiter::Row
                } else {
                    Delimiter::Cell
                };
                Segment {
                    offset,
                    bytes: &rest[..len],
                    delimiter,
                }
            }
            None => {
                self.pos = self.bytes.len();
                Segment {
                    offset,
                    bytes: rest,
                    delimiter: Delimiter::End,
                }
            }
        }
    }
}

/// Decode a BSV byte stream into a table
///
/// An empty stream decodes to a single empty row. Decoding stops at the
/// first error; no partial table is returned.
///
/// # Examples
///
/// ```
/// use bsv_format::{Cell, decode};
///
/// let table = decode(&[0xFC, 0xFE, 0xFD])?;
/// assert_eq!(table, vec![vec![Cell::Empty, Cell::Null]]);
///
/// assert_eq!(decode(&[])?, vec![Vec::<Cell>::new()]);
/// # Ok::<(), bsv_format::BsvError>(())
/// ```
pub fn decode(bytes: &[u8]) -> Result<Table> {
    let mut cursor = Cursor::new(bytes);
    let mut state = ScanState::AtStreamStart;
    let mut table = Table::new();
    let mut row = Row::new();

    while state != ScanState::AtStreamEnd {
        let segment = cursor.next_segment();

        let scanned = if segment.bytes.is_empty() {
            // Only a row boundary on both sides makes an empty segment legal
            if !(state.at_row_boundary() && segment.delimiter.closes_row()) {
                return Err(BsvError::MalformedStream {
                    offset: segment.offset,
                });
            }
            state
        } else {
            row.push(decode_cell(&segment)?);
            ScanState::ScanningRow
        };

        if segment.delimiter.closes_row() {
            table.push(std::mem::take(&mut row));
        }
        state = scanned.advance(segment.delimiter);
    }

    trace!("Decoded {} bytes into {} rows", bytes.len(), table.len());
    Ok(table)
}

fn decode_cell(segment: &Segment<'_>) -> Result<Cell> {
    match segment.bytes {
        [NULL_MARKER] => Ok(Cell::Null),
        [EMPTY_MARKER] => Ok(Cell::Empty),
        bytes => std::str::from_utf8(bytes)
            .map(|s| Cell::Text(s.to_owned()))
            .map_err(|source| BsvError::InvalidEncoding {
                offset: segment.offset,
                source,
            }),
    }
}
