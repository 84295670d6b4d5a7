//! Process-wide per-file locks

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

type LockTable = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

static LOCKS: LazyLock<LockTable> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Lock held for the duration of one mutation of a target file
///
/// The table entry for a path lives only while some `FileLock` for it exists.
pub struct FileLock {
    key: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileLock {
    /// Look up (or create) the lock for `path`
    ///
    /// Relative paths are made absolute first so two spellings of the same
    /// location share a lock.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut table = LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = Arc::clone(table.entry(key.clone()).or_default());
        Self { key, lock }
    }

    /// Block until no other mutation of the same file is running
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let mut table = LOCKS.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the table and this handle remain
        let last = table
            .get(&self.key)
            .is_some_and(|entry| Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(entry) == 2);
        if last {
            table.remove(&self.key);
        }
    }
}
