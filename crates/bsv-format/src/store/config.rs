//! Store configuration

use crate::error::{BsvError, Result};

/// Configuration shared by the blocking and async stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct StoreConfig {
    /// Permission bits for files the store creates (Unix only)
    pub file_mode: u32,
    /// Call `sync_all` after every write
    pub sync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_mode: 0o644,
            sync: false,
        }
    }
}

impl StoreConfig {
    /// Create a new store configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set permission bits for newly created files
    #[must_use]
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Enable or disable fsync after writes
    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.file_mode > 0o7777 {
            return Err(BsvError::InvalidConfig(format!(
                "file_mode {:#o} has bits outside 0o7777",
                self.file_mode
            )));
        }
        Ok(())
    }
}
