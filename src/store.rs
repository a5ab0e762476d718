// Flat-file persistence: the whole AppState as one pretty-printed JSON blob.
//
// Loads fail open: a missing or unparsable file yields an empty state (with a
// warning) rather than an error, so a corrupt data file never takes the
// service down. Saves overwrite the file in full; there is no partial update.

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::types::AppState;

pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the data file with an empty state if it does not exist yet.
    /// Called once at startup.
    pub async fn init(&self) -> Result<(), StorageError> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            _ => {
                self.save(&AppState::default()).await?;
                tracing::info!(path = %self.path.display(), "created empty data file");
                Ok(())
            }
        }
    }

    /// Reads and parses the persisted state. Never fails the caller: missing
    /// or unparsable data falls back to the empty state.
    pub async fn load(&self) -> AppState {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "could not read data file, starting from empty state"
                );
                return AppState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "could not parse data file, starting from empty state"
                );
                AppState::default()
            }
        }
    }

    /// Serializes and overwrites the persisted blob. Callers treat a failure
    /// as a storage error; the in-memory mutation is simply dropped since the
    /// next load re-reads the last successfully written blob.
    pub async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(state).map_err(|err| {
            tracing::error!(%err, "state serialization failed");
            StorageError::Serialize(err)
        })?;
        tokio::fs::write(&self.path, serialized).await.map_err(|err| {
            tracing::error!(path = %self.path.display(), %err, "data file write failed");
            StorageError::Write(err)
        })
    }
}
