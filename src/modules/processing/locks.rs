use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// Per-key async locks. Jobs for the same input key run one after another;
/// different keys never wait on each other.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<Mutex<LockMap>>,
}

pub struct KeyGuard {
    key: String,
    locks: KeyedLocks,
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let lock = {
            let mut map = self.map();
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        KeyGuard {
            key: key.to_string(),
            locks: self.clone(),
            _guard: lock.lock_owned().await,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.map().len()
    }

    fn map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        let mut map = self.locks.map();
        // Only the map and this guard hold the lock: nobody is waiting for it.
        let idle = map
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) <= 2);
        if idle {
            map.remove(&self.key);
        }
    }
}
