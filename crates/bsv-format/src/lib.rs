//! BSV (Binary String Value) encoding for jagged tables of optional text
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::doc_markdown)] // BSV and UTF-8 don't need backticks
#![allow(clippy::missing_const_for_fn)]
//! A BSV stream stores rows of cells, where each cell is null, empty text or
//! non-empty UTF-8 text. Structure is carried by four byte values that never
//! appear in valid UTF-8, so no escaping is ever needed:
//!
//! | byte | meaning |
//! |------|---------|
//! | `0xFF` | row separator |
//! | `0xFE` | cell separator |
//! | `0xFD` | null cell |
//! | `0xFC` | empty text cell |
//!
//! There is no header, length prefix or terminator.
//!
//! # Example
//!
//! ```
//! use bsv_format::{Cell, decode, encode};
//!
//! let table = vec![
//!     vec![Cell::text("Hello"), Cell::text("🌎"), Cell::Null, Cell::Empty],
//!     vec![Cell::text("A\0B\nC"), Cell::text("Test 𝄞")],
//! ];
//!
//! let bytes = encode(&table);
//! assert_eq!(decode(&bytes)?, table);
//! # Ok::<(), bsv_format::BsvError>(())
//! ```
//!
//! # Empty tables
//!
//! A table with no rows and a table with one empty row both encode to an
//! empty stream, and an empty stream decodes to one empty row. Callers
//! should treat `[]` and `[[]]` as the same table.

#![warn(missing_docs)]

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod store;
pub mod types;

pub use decoder::decode;
pub use encoder::{encode, encode_into, encoded_len, write_table};
pub use error::{BsvError, Result};
pub use store::{Store, StoreConfig, append, load, save};
pub use types::{
    BSV_EXTENSION, CELL_SEPARATOR, Cell, EMPTY_MARKER, NULL_MARKER, ROW_SEPARATOR, Row, Table,
    format_table, is_sentinel,
};

#[cfg(feature = "async")]
pub use store::{AsyncStore, append_async, load_async, save_async};
