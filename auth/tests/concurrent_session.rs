//! Session changes from several threads.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use todo_sync_auth::SessionStore;
use todo_sync_core::storage::{self, KeyValueStorage, MemoryStorage};
use todo_sync_core::types::{IDENTITY_KEY, TOKEN_KEY};
use todo_sync_testing::fixtures;

/// Memory storage whose first token write stalls until released
struct SlowTokenStorage {
    inner: MemoryStorage,
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl KeyValueStorage for SlowTokenStorage {
    fn get(&self, key: &str) -> storage::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> storage::Result<()> {
        if key == TOKEN_KEY {
            if let Some(entered) = self.entered.lock().unwrap().take() {
                entered.send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> storage::Result<()> {
        self.inner.remove(key)
    }
}

#[test]
fn test_logout_during_login_leaves_nothing_persisted() {
    let (entered_tx, entered) = mpsc::channel();
    let (release, release_rx) = mpsc::channel();
    let medium = MemoryStorage::new();
    let session = SessionStore::new(Arc::new(SlowTokenStorage {
        inner: medium.clone(),
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(release_rx),
    }));

    let signing_in = {
        let session = session.clone();
        thread::spawn(move || session.login("T1", fixtures::identity()))
    };
    entered.recv().unwrap();

    let signing_out = {
        let session = session.clone();
        thread::spawn(move || session.logout())
    };
    thread::sleep(Duration::from_millis(50));
    release.send(()).unwrap();

    signing_in.join().unwrap();
    signing_out.join().unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
    assert_eq!(session.identity(), None);
    assert_eq!(medium.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(medium.get(IDENTITY_KEY).unwrap(), None);
}
