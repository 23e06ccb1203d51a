//! Saving, loading and appending BSV files
//!
//! Appended fragments are further rows of the same table: when the target
//! already has content a row separator is written first, so
//! `load(path)` after `append` yields the old rows followed by the new ones.
//!
//! No locking is done. Concurrent writers to the same path must be
//! serialized by the caller; the exclusive create used when appending to a
//! missing file only detects the race, reporting
//! [`BsvError::AlreadyExists`](crate::BsvError::AlreadyExists).

mod config;

#[cfg(feature = "async")]
mod async_store;

pub use config::StoreConfig;

#[cfg(feature = "async")]
pub use async_store::{AsyncStore, append_async, load_async, save_async};

use crate::decoder::decode;
use crate::encoder::{encode, encode_into, encoded_len, write_table};
use crate::error::{BsvError, Result};
use crate::types::{ROW_SEPARATOR, Row, Table};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Blocking BSV file store
#[derive(Debug, Clone, Default)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Create a store with a validated configuration
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the store configuration
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Overwrite `path` with the encoding of `table`
    pub fn save(&self, table: &[Row], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = self
            .open_options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| BsvError::from_io(path, e))?;

        let mut writer = BufWriter::new(file);
        write_table(table, &mut writer).map_err(|e| BsvError::from_io(path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| BsvError::from_io(path, e.into_error()))?;
        self.finish(&file, path)?;

        debug!("Saved {} rows to {}", table.len(), path.display());
        Ok(())
    }

    /// Read and decode the whole file at `path`
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| BsvError::from_io(path, e))?;
        let table = decode(&bytes)?;
        debug!(
            "Loaded {} bytes ({} rows) from {}",
            bytes.len(),
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Append the rows of `table` to the file at `path`, creating it if needed
    pub fn append(&self, table: &[Row], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match OpenOptions::new().read(true).write(true).open(path) {
            Ok(mut file) => {
                file.seek(SeekFrom::End(0))
                    .map_err(|e| BsvError::from_io(path, e))?;
                let bytes = separated_fragment(table);
                file.write_all(&bytes)
                    .map_err(|e| BsvError::from_io(path, e))?;
                self.finish(&file, path)?;
                debug!("Appended {} bytes to {}", bytes.len(), path.display());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let mut file = self
                    .open_options()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .map_err(|e| BsvError::from_io(path, e))?;
                let bytes = encode(table);
                file.write_all(&bytes)
                    .map_err(|e| BsvError::from_io(path, e))?;
                self.finish(&file, path)?;
                debug!("Created {} with {} bytes", path.display(), bytes.len());
            }
            Err(e) => return Err(BsvError::from_io(path, e)),
        }
        Ok(())
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.config.file_mode);
        }
        options
    }

    fn finish(&self, file: &File, path: &Path) -> Result<()> {
        if self.config.sync {
            file.sync_all().map_err(|e| BsvError::from_io(path, e))?;
        }
        Ok(())
    }
}

/// Row separator followed by the encoding of `table`
pub(crate) fn separated_fragment(table: &[Row]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + encoded_len(table));
    bytes.push(ROW_SEPARATOR);
    encode_into(table, &mut bytes);
    bytes
}

/// Save with the default configuration
pub fn save(table: &[Row], path: impl AsRef<Path>) -> Result<()> {
    Store::default().save(table, path)
}

/// Load with the default configuration
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    Store::default().load(path)
}

/// Append with the default configuration
pub fn append(table: &[Row], path: impl AsRef<Path>) -> Result<()> {
    Store::default().append(table, path)
}
