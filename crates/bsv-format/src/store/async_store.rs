//! Async BSV file store over `tokio::fs`

use super::{StoreConfig, separated_fragment};
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{BsvError, Result};
use crate::types::{Row, Table};
use std::io::{ErrorKind, SeekFrom};
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// Async counterpart of [`Store`](super::Store)
///
/// Same semantics and error mapping; only the I/O is non-blocking.
#[derive(Debug, Clone, Default)]
pub struct AsyncStore {
    config: StoreConfig,
}

impl AsyncStore {
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
    pub async fn save(&self, table: &[Row], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = encode(table);
        let mut file = self
            .open_options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
            .map_err(|e| BsvError::from_io(path, e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| BsvError::from_io(path, e))?;
        self.finish(&mut file, path).await?;

        debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Read and decode the whole file at `path`
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BsvError::from_io(path, e))?;
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
    pub async fn append(&self, table: &[Row], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (mut file, bytes) = match OpenOptions::new().read(true).write(true).open(path).await {
            Ok(mut file) => {
                file.seek(SeekFrom::End(0))
                    .await
                    .map_err(|e| BsvError::from_io(path, e))?;
                (file, separated_fragment(table))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let file = self
                    .open_options()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .await
                    .map_err(|e| BsvError::from_io(path, e))?;
                debug!("Created {}", path.display());
                (file, encode(table))
            }
            Err(e) => return Err(BsvError::from_io(path, e)),
        };

        file.write_all(&bytes)
            .await
            .map_err(|e| BsvError::from_io(path, e))?;
        self.finish(&mut file, path).await?;
        debug!("Appended {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        #[cfg(unix)]
        options.mode(self.config.file_mode);
        options
    }

    async fn finish(&self, file: &mut File, path: &Path) -> Result<()> {
        file.flush().await.map_err(|e| BsvError::from_io(path, e))?;
        if self.config.sync {
            file.sync_all()
                .await
                .map_err(|e| BsvError::from_io(path, e))?;
        }
        Ok(())
    }
}

/// Save with the default configuration
pub async fn save_async(table: &[Row], path: impl AsRef<Path>) -> Result<()> {
    AsyncStore::default().save(table, path).await
}

/// Load with the default configuration
pub async fn load_async(path: impl AsRef<Path>) -> Result<Table> {
    AsyncStore::default().load(path).await
}

/// Append with the default configuration
pub async fn append_async(table: &[Row], path: impl AsRef<Path>) -> Result<()> {
    AsyncStore::default().append(table, path).await
}
