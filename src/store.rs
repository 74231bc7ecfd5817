//! File-backed persistence for [`SquareState`].

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::{
    foundation::error::{BlockPartyError, BlockPartyResult},
    model::{Square, SquareState},
};

/// Square state stored as one pretty-printed JSON document.
///
/// Reads never fail: a missing, blank, unreadable or malformed file reads as an empty
/// collection. Writes go to a sibling temp file that is then renamed over the target.
/// Read-modify-write operations are serialized within the process.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and if needed create) the state file at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> BlockPartyResult<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create state dir", parent, e))?;
        }
        let exists = tokio::fs::try_exists(&store.path).await.unwrap_or(false);
        if !exists {
            tracing::info!(path = %store.path.display(), "creating empty state file");
            store.write_file(&SquareState::default()).await?;
        }
        Ok(store)
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current state, or an empty collection if it cannot be read.
    pub async fn load(&self) -> SquareState {
        match self.try_load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(path = %self.path.display(), "reading square state failed: {e}");
                SquareState::default()
            }
        }
    }

    /// Like [`FileStore::load`] but surfaces read and parse failures.
    pub async fn try_load(&self) -> BlockPartyResult<SquareState> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SquareState::default());
            }
            Err(e) => return Err(io_error("read state file", &self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(SquareState::default());
        }
        serde_json::from_str(&text).map_err(|e| {
            BlockPartyError::serde(format!("parse '{}': {e}", self.path.display()))
        })
    }

    /// Replace the stored state entirely.
    pub async fn save(&self, state: &SquareState) -> BlockPartyResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_file(state).await
    }

    /// Append one square and return the resulting state.
    pub async fn append(&self, square: Square) -> BlockPartyResult<SquareState> {
        let _guard = self.write_lock.lock().await;
        let mut state = self.load().await;
        state.squares.push(square);
        self.write_file(&state).await?;
        Ok(state)
    }

    /// Reset to an empty collection.
    pub async fn clear(&self) -> BlockPartyResult<()> {
        self.save(&SquareState::default()).await
    }

    async fn write_file(&self, state: &SquareState) -> BlockPartyResult<()> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| BlockPartyError::serde(format!("encode square state: {e}")))?;
        let tmp = self.tmp_path();
        let result = async {
            tokio::fs::write(&tmp, &json)
                .await
                .map_err(|e| io_error("write temp state file", &tmp, e))?;
            tokio::fs::rename(&tmp, &self.path)
                .await
                .map_err(|e| io_error("replace state file", &self.path, e))
        }
        .await;
        if let Err(e) = &result {
            tracing::error!(path = %self.path.display(), "saving square state failed: {e}");
            let _ = tokio::fs::remove_file(&tmp).await;
        } else {
            tracing::debug!(squares = state.len(), "square state saved");
        }
        result
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "state.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

fn io_error(what: &str, path: &Path, e: std::io::Error) -> BlockPartyError {
    BlockPartyError::storage(format!("{what} '{}': {e}", path.display()))
}

#[cfg(test)]
#[path = "../tests/unit/store/store.rs"]
mod tests;
