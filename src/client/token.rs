//! Persistence of the access token outside of the in-memory auth state, the
//! equivalent of a browser's local storage.

use super::http::AccessToken;
use std::{
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing::warn;

/// Somewhere an access token can outlive the process' in-memory state.
///
/// Writes report failure so that callers never believe a token was saved or
/// removed when it wasn't.
pub trait TokenStorage {
    fn load(&self) -> Option<AccessToken>;
    fn store(&self, token: &AccessToken) -> io::Result<()>;
    /// Removing a token that isn't there succeeds.
    fn clear(&self) -> io::Result<()>;
}

/// Keeps the token in memory. Clones share the same slot, so a test can hold
/// on to one and observe what the auth store persisted.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<AccessToken>>>,
}

impl MemoryStorage {
    fn set(&self, token: Option<AccessToken>) -> io::Result<()> {
        let mut x = self
            .slot
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "token slot poisoned"))?;
        *x = token;

        Ok(())
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<AccessToken> {
        self.slot.lock().ok().and_then(|x| x.clone())
    }

    fn store(&self, token: &AccessToken) -> io::Result<()> {
        self.set(Some(token.clone()))
    }

    fn clear(&self) -> io::Result<()> {
        self.set(None)
    }
}

/// Keeps the token in a single file. A file that can't be read is logged and
/// treated as an absent token.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStorage { path: path.into() }
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Option<AccessToken> {
        match fs::read_to_string(&self.path) {
            Ok(x) if !x.trim().is_empty() => Some(AccessToken(x.trim().to_owned())),
            Ok(_) => None,
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read token from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn store(&self, token: &AccessToken) -> io::Result<()> {
        fs::write(&self.path, &token.0)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            x => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_shared_between_clones() {
        let a = MemoryStorage::default();
        let b = a.clone();

        a.store(&AccessToken("t".into())).unwrap();
        assert_eq!(b.load(), Some(AccessToken("t".into())));

        b.clear().unwrap();
        assert_eq!(a.load(), None);
    }

    #[test]
    fn test_file_storage() {
        let path = std::env::temp_dir().join(format!("almanac-token-{}", std::process::id()));
        let s = FileStorage::new(&path);

        assert_eq!(s.load(), None);

        s.store(&AccessToken("from-disk".into())).unwrap();
        assert_eq!(s.load(), Some(AccessToken("from-disk".into())));

        s.clear().unwrap();
        assert_eq!(s.load(), None);
        // Clearing twice is fine.
        s.clear().unwrap();
    }

    #[test]
    fn test_file_storage_reports_failures() {
        // A directory can be neither written to nor removed as a file.
        let s = FileStorage::new(std::env::temp_dir());

        assert!(s.store(&AccessToken("lost".into())).is_err());
        assert!(s.clear().is_err());
        assert_eq!(s.load(), None);
    }
}
