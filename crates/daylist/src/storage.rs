//! The persisted key/value slot.
//!
//! One fixed key maps to one serialized payload, the way the browser's
//! localStorage slot held the original task list. Backends only move opaque
//! strings; serialization of the task sequence lives in [`crate::store`].

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Errors raised by slot backends.
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    /// The slot exists but could not be read.
    #[error("failed to read slot '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload could not be written durably.
    #[error("failed to write slot '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A durable-for-the-session key/value slot holding one payload.
pub trait StateSlot {
    /// Read the current payload, `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Read`] when the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>, SlotError>;

    /// Replace the slot's payload.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Write`] when the payload cannot be stored.
    fn save(&self, payload: &str) -> Result<(), SlotError>;
}

/// In-process slot for tests and ephemeral sessions.
///
/// Clones share the same backing cell, so a store opened on a clone sees
/// what a previous store wrote, the way two reads of one browser key would.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with an existing payload.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(payload.into()))),
        }
    }

    /// Snapshot of the current payload, for assertions.
    #[must_use]
    pub fn payload(&self) -> Option<String> {
        self.cell.borrow().clone()
    }
}

impl StateSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        Ok(self.cell.borrow().clone())
    }

    fn save(&self, payload: &str) -> Result<(), SlotError> {
        *self.cell.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

/// File-backed slot: `<dir>/<key>.json`.
///
/// Writes go through a temp file and a rename so a crash mid-write never
/// leaves a truncated payload behind.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
    key: String,
}

impl FileSlot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }

    fn write_err(&self, source: std::io::Error) -> SlotError {
        SlotError::Write {
            key: self.key.clone(),
            source,
        }
    }
}

impl StateSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(self.path()) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SlotError::Read {
                key: self.key.clone(),
                source: err,
            }),
        }
    }

    fn save(&self, payload: &str) -> Result<(), SlotError> {
        fs::create_dir_all(&self.dir).map_err(|err| self.write_err(err))?;

        let tmp = self.tmp_path();
        write_all(&tmp, payload).map_err(|err| self.write_err(err))?;
        fs::rename(&tmp, self.path()).map_err(|err| self.write_err(err))
    }
}

fn write_all(path: &Path, payload: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(payload.as_bytes())?;
    file.sync_all()
}
