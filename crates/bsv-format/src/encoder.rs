//! Table to byte-stream encoding

use crate::types::{CELL_SEPARATOR, Cell, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR, Row};
use std::io::Write;

/// Encode a table into a fresh byte vector
///
/// # Examples
///
/// ```
/// use bsv_format::{Cell, encode};
///
/// let bytes = encode(&[vec![Cell::Empty, Cell::Null]]);
/// assert_eq!(bytes, [0xFC, 0xFE, 0xFD]);
/// ```
#[must_use]
pub fn encode(table: &[Row]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(table));
    encode_into(table, &mut out);
    out
}

/// Append the encoding of `table` to `out`
pub fn encode_into(table: &[Row], out: &mut Vec<u8>) {
    for chunk in chunks(table) {
        out.extend_from_slice(chunk);
    }
}

/// Exact number of bytes [`encode`] produces for `table`
#[must_use]
pub fn encoded_len(table: &[Row]) -> usize {
    chunks(table).map(<[u8]>::len).sum()
}

/// Stream the encoding of `table` into a writer
///
/// The writer is not flushed.
pub fn write_table<W: Write>(table: &[Row], mut writer: W) -> std::io::Result<()> {
    for chunk in chunks(table) {
        writer.write_all(chunk)?;
    }
    Ok(())
}

/// Separators and cell payloads of `table`, in stream order
fn chunks(table: &[Row]) -> impl Iterator<Item = &[u8]> {
    table.iter().enumerate().flat_map(|(row_index, row)| {
        let row_separator: &[u8] = if row_index > 0 { &[ROW_SEPARATOR] } else { &[] };
        std::iter::once(row_separator).chain(row.iter().enumerate().flat_map(
            |(cell_index, cell)| {
                let cell_separator: &[u8] = if cell_index > 0 { &[CELL_SEPARATOR] } else { &[] };
                [cell_separator, cell_bytes(cell)]
            },
        ))
    })
}

fn cell_bytes(cell: &Cell) -> &[u8] {
    match cell {
        Cell::Null => &[NULL_MARKER],
        Cell::Text(s) if !s.is_empty() => s.as_bytes(),
        // A zero-length Text would decode as malformed, so it shares the Empty marker
        Cell::Empty | Cell::Text(_) => &[EMPTY_MARKER],
    }
}
