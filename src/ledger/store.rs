//! Ledger persistence
//!
//! One JSON document on disk. Saves go through write-then-rename so a
//! failed write can never leave a half-written document behind; a missing
//! document reads as an empty ledger.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::ledger::types::Ledger;

#[derive(Debug, Clone)]
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[allow(dead_code)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Default document location: the platform data dir, falling back to
    /// the working directory.
    pub(crate) fn default_path() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join("warikan").join("ledger.json"),
            None => PathBuf::from("warikan-ledger.json"),
        }
    }

    pub(crate) fn load(&self) -> Result<Ledger, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Ledger::default());
            }
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        serde_json::from_str(&content).map_err(|err| StoreError::Decode {
            path: self.path.clone(),
            source: err,
        })
    }

    pub(crate) fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(ledger)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write {
                path: self.path.clone(),
                source: err,
            })?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded).map_err(|err| StoreError::Write {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            source: err,
        })
    }
}
