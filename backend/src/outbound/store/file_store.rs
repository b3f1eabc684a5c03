//! Directory-backed key-value store.
//!
//! Each key lives in `<key>.json` inside the data directory and is replaced
//! through [`write_atomic`]. Revisions are tracked per process: a file found
//! on disk before this process wrote it counts as revision 1.

use std::collections::HashMap;
use std::io;
use std::sync::{Mutex, MutexGuard};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use thiserror::Error;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{KeyValueStore, KeyValueStoreError, Revision, VersionedPayload};

/// Raised when the data directory cannot be opened.
#[derive(Debug, Error)]
#[error("failed to open data directory {path}: {source}")]
pub struct FileStoreError {
    path: Utf8PathBuf,
    #[source]
    source: io::Error,
}

/// [`KeyValueStore`] persisting each key as a JSON file.
///
/// All operations serialise through one lock, so a read never observes a
/// half-finished compare-and-set.
#[derive(Debug)]
pub struct FileStore {
    dir: Dir,
    root: Utf8PathBuf,
    revisions: Mutex<HashMap<String, Revision>>,
}

impl FileStore {
    /// Open `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Utf8Path) -> Result<Self, FileStoreError> {
        let to_error = |source| FileStoreError {
            path: path.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(to_error)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(to_error)?;
        debug!(path = %path, "opened data directory");
        Ok(Self {
            dir,
            root: path.to_path_buf(),
            revisions: Mutex::new(HashMap::new()),
        })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn revisions(
        &self,
        key: &str,
    ) -> Result<MutexGuard<'_, HashMap<String, Revision>>, KeyValueStoreError> {
        self.revisions
            .lock()
            .map_err(|_| KeyValueStoreError::io(key, "file store lock poisoned"))
    }

    fn read_payload(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        match self.dir.read_to_string(file_name(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::io(key, err.to_string())),
        }
    }

    fn snapshot(
        &self,
        revisions: &HashMap<String, Revision>,
        key: &str,
    ) -> Result<VersionedPayload, KeyValueStoreError> {
        let payload = self.read_payload(key)?;
        let revision = match (revisions.get(key), payload.is_some()) {
            (Some(revision), _) => *revision,
            (None, true) => 1,
            (None, false) => 0,
        };
        Ok(VersionedPayload { payload, revision })
    }

    fn write(
        &self,
        revisions: &mut HashMap<String, Revision>,
        key: &str,
        current: Revision,
        payload: &str,
    ) -> Result<Revision, KeyValueStoreError> {
        write_atomic(&self.dir, &file_name(key), payload)
            .map_err(|err| KeyValueStoreError::io(key, err.to_string()))?;
        let revision = current + 1;
        revisions.insert(key.to_owned(), revision);
        Ok(revision)
    }
}

fn file_name(key: &str) -> String {
    format!("{key}.json")
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<VersionedPayload, KeyValueStoreError> {
        let revisions = self.revisions(key)?;
        self.snapshot(&revisions, key)
    }

    fn set(&self, key: &str, payload: &str) -> Result<Revision, KeyValueStoreError> {
        let mut revisions = self.revisions(key)?;
        let current = self.snapshot(&revisions, key)?.revision;
        self.write(&mut revisions, key, current, payload)
    }

    fn compare_and_set(
        &self,
        key: &str,
        expected: Revision,
        payload: &str,
    ) -> Result<Revision, KeyValueStoreError> {
        let mut revisions = self.revisions(key)?;
        let actual = self.snapshot(&revisions, key)?.revision;
        if actual != expected {
            return Err(KeyValueStoreError::revision_mismatch(key, expected, actual));
        }
        self.write(&mut revisions, key, actual, payload)
    }
}
