use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

/// One mutex per cache key, created on demand and dropped once idle.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// Callers using different keys never wait on each other. The entry is
    /// released even if `f` panics.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let entry = EntryRef {
            locks: &self.locks,
            key,
            lock: Arc::clone(&*self.locks.entry(key.to_string()).or_default()),
        };

        // A panic in another holder leaves nothing to repair: the guarded
        // state is the file on disk, which is published atomically
        let _guard = entry.lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of keys with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// A caller's hold on a lock entry; drops the entry once nobody else holds it.
struct EntryRef<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl Drop for EntryRef<'_> {
    fn drop(&mut self) {
        // Two holders left: the map and us
        self.locks.remove_if(self.key, |_, entry| {
            Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(entry) == 2
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_entries_are_released() {
        let locks = KeyedLocks::new();
        let value = locks.with_lock("a", || 42);
        assert_eq!(value, 42);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_entry_is_released_when_closure_panics() {
        let locks = KeyedLocks::new();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            locks.with_lock("broken", || -> u32 { panic!("decoder blew up") })
        }));
        assert!(outcome.is_err());
        assert!(locks.is_empty());

        // The poisoned mutex is gone, so the key is usable again
        assert_eq!(locks.with_lock("broken", || 7), 7);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    locks.with_lock("same", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_nested_different_keys() {
        let locks = KeyedLocks::new();
        let value = locks.with_lock("outer", || {
            assert_eq!(locks.len(), 1);
            locks.with_lock("inner", || 7)
        });
        assert_eq!(value, 7);
        assert!(locks.is_empty());
    }
}
