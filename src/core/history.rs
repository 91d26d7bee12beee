//! Chat transcript kept in memory and, optionally, mirrored to a JSON file.
//!
//! Mutations only touch memory. Callers write the file with
//! [`MessageStore::save`], or take a [`HistorySnapshot`] and write it once
//! the store's lock is released.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;
use uuid::Uuid;

use crate::core::message::{Completion, Message};

pub const INTERRUPTED_REASON: &str = "Interrupted before completion";

#[derive(Debug)]
pub enum HistoryError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Read { path, source } => {
                write!(f, "Failed to read history at {}: {}", path.display(), source)
            }
            HistoryError::Parse { path, source } => {
                write!(f, "Failed to parse history at {}: {}", path.display(), source)
            }
            HistoryError::Write { path, source } => {
                write!(f, "Failed to write history at {}: {}", path.display(), source)
            }
        }
    }
}

impl StdError for HistoryError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HistoryError::Read { source, .. } => Some(source),
            HistoryError::Parse { source, .. } => Some(source),
            HistoryError::Write { source, .. } => Some(source),
        }
    }
}

/// Reads a saved transcript. A missing file is an empty history.
pub fn load_from_path(path: &Path) -> Result<Vec<Message>, HistoryError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(HistoryError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&contents).map_err(|source| HistoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the transcript through a temp file in the same directory, so a
/// crash never leaves a half-written history behind.
pub fn save_to_path(path: &Path, messages: &[Message]) -> Result<(), HistoryError> {
    let write_err = |source: io::Error| HistoryError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let contents = serde_json::to_string_pretty(messages).map_err(|err| write_err(err.into()))?;
    let mut temp_file = match parent {
        Some(dir) => NamedTempFile::new_in(dir),
        None => NamedTempFile::new(),
    }
    .map_err(write_err)?;

    temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
    temp_file.as_file_mut().sync_all().map_err(write_err)?;
    temp_file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Where an unparsable history is moved before starting fresh.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "history.json".into());
    name.push(".bak");
    path.with_file_name(name)
}

/// A copy of the transcript bound to its file, detached from the store.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    path: PathBuf,
    messages: Vec<Message>,
}

impl HistorySnapshot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self) -> Result<(), HistoryError> {
        save_to_path(&self.path, &self.messages)
    }
}

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    path: Option<PathBuf>,
}

impl MessageStore {
    /// Store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the history at `path`. A corrupt file is moved to
    /// [`backup_path`]; an unreadable one is left alone. Either way the
    /// store starts empty.
    pub fn open(path: PathBuf) -> Self {
        let mut messages = match load_from_path(&path) {
            Ok(messages) => messages,
            Err(err @ HistoryError::Parse { .. }) => {
                let backup = backup_path(&path);
                match fs::rename(&path, &backup) {
                    Ok(()) => warn!(
                        error = %err,
                        backup = %backup.display(),
                        "corrupt history moved aside, starting with empty history"
                    ),
                    Err(rename_err) => warn!(
                        error = %err,
                        rename_error = %rename_err,
                        "corrupt history could not be moved aside, starting with empty history"
                    ),
                }
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "starting with empty history");
                Vec::new()
            }
        };

        // A pending entry on disk belongs to a run that never finished.
        for message in messages.iter_mut().filter(|message| message.is_pending()) {
            message.complete(Completion::Error(INTERRUPTED_REASON.to_string()));
        }

        Self {
            messages,
            path: Some(path),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn append(&mut self, message: Message) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// Applies the terminal state to the pending message `id`. Returns `false`
    /// when no such pending message exists.
    pub fn complete(&mut self, id: Uuid, completion: Completion) -> bool {
        let Some(message) = self.messages.iter_mut().find(|message| message.id == id) else {
            return false;
        };
        message.complete(completion)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// `None` for in-memory stores.
    pub fn snapshot(&self) -> Option<HistorySnapshot> {
        self.path.as_ref().map(|path| HistorySnapshot {
            path: path.clone(),
            messages: self.messages.clone(),
        })
    }

    pub fn save(&self) -> Result<(), HistoryError> {
        match &self.path {
            Some(path) => save_to_path(path, &self.messages),
            None => Ok(()),
        }
    }
}
