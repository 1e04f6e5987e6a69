use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;

use super::{CounterRecord, CounterStore, Delta, StoreError, COUNTER_ID};

const BACKEND: &str = "file";

/// JSON document on local disk, keyed by record id.
///
/// ```json
/// { "main": { "value": 3, "updated_at": "2026-01-01T00:00:00Z" } }
/// ```
///
/// Each operation holds an exclusive advisory lock on `<path>.lock` for the
/// full read-modify-write, so concurrent requests (and other processes sharing
/// the file) serialize on it. Writes go to `<path>.tmp` and are renamed over
/// the document, so a crash mid-write leaves the previous contents in place.
/// File I/O runs on the blocking pool.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn locked<T, F>(&self, create: bool, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut LockedDocument) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut doc = LockedDocument::open(&path, create)?;
            op(&mut doc)
        })
        .await
        .map_err(|err| StoreError::unavailable(BACKEND, err))?
    }
}

/// `<path><suffix>`, next to the document.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Parsed document plus the held lock; the lock is released on drop.
struct LockedDocument {
    path: PathBuf,
    lock: File,
    records: BTreeMap<String, CounterRecord>,
}

impl LockedDocument {
    /// Lock and read the document.
    ///
    /// With `create`, missing parent directories and a missing document are
    /// allowed (the document starts empty). An existing document that is
    /// empty is corrupt either way.
    fn open(path: &Path, create: bool) -> Result<Self, StoreError> {
        if create {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|err| StoreError::unavailable(BACKEND, err))?;
            }
        }

        let lock = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(sibling(path, ".lock"))
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StoreError::InvariantViolation { id: COUNTER_ID },
                _ => StoreError::unavailable(BACKEND, err),
            })?;
        FileExt::lock_exclusive(&lock).map_err(|err| StoreError::unavailable(BACKEND, err))?;

        let records = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => {
                return Err(StoreError::corrupt(BACKEND, "counter file is empty"));
            }
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| StoreError::corrupt(BACKEND, err))?
            }
            Err(err) if err.kind() == ErrorKind::NotFound && create => BTreeMap::new(),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::InvariantViolation { id: COUNTER_ID });
            }
            Err(err) => return Err(StoreError::unavailable(BACKEND, err)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            lock,
            records,
        })
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.records)
            .map_err(|err| StoreError::corrupt(BACKEND, err))?;
        let tmp = sibling(&self.path, ".tmp");
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|err| {
            let _ = fs::remove_file(&tmp);
            StoreError::unavailable(BACKEND, err)
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

impl Drop for LockedDocument {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock);
    }
}

#[async_trait]
impl CounterStore for FileStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        self.locked(true, |doc| {
            if doc.records.contains_key(COUNTER_ID) {
                return Ok(());
            }
            doc.records
                .insert(COUNTER_ID.to_string(), CounterRecord::new(0));
            doc.save()
        })
        .await
    }

    async fn record(&self) -> Result<CounterRecord, StoreError> {
        self.locked(false, |doc| {
            doc.records
                .get(COUNTER_ID)
                .cloned()
                .ok_or(StoreError::InvariantViolation { id: COUNTER_ID })
        })
        .await
    }

    async fn apply(&self, delta: Delta) -> Result<i64, StoreError> {
        self.locked(false, move |doc| {
            let record = doc
                .records
                .get_mut(COUNTER_ID)
                .ok_or(StoreError::InvariantViolation { id: COUNTER_ID })?;
            record.value = delta.apply_to(record.value)?;
            record.updated_at = Utc::now();
            let value = record.value;
            doc.save()?;
            Ok(value)
        })
        .await
    }
}
