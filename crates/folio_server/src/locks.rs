//! Per-World serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as TableMutex, MutexGuard};
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = HashMap<String, Arc<Mutex<()>>>;

/// One async lock per World name.
///
/// Holding the guard for a name excludes every other holder of that name;
/// different names never contend. An entry lives only while some request
/// holds or waits on it.
#[derive(Debug, Clone, Default)]
pub struct WorldLocks {
    inner: Arc<TableMutex<LockTable>>,
}

/// Exclusive access to one World; releasing it drops the idle table entry.
#[derive(Debug)]
pub struct WorldGuard {
    guard: Option<OwnedMutexGuard<()>>,
    name: String,
    table: Arc<TableMutex<LockTable>>,
}

fn table(inner: &TableMutex<LockTable>) -> MutexGuard<'_, LockTable> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl WorldLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a World.
    pub async fn lock(&self, name: &str) -> WorldGuard {
        let lock = Arc::clone(table(&self.inner).entry(name.to_string()).or_default());
        tracing::trace!(world = name, "Waiting for world lock");
        WorldGuard {
            guard: Some(lock.lock_owned().await),
            name: name.to_string(),
            table: Arc::clone(&self.inner),
        }
    }

    /// Number of Worlds currently locked or awaited.
    pub fn len(&self) -> usize {
        table(&self.inner).len()
    }

    /// Whether no World is locked or awaited.
    pub fn is_empty(&self) -> bool {
        table(&self.inner).is_empty()
    }
}

impl Drop for WorldGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut table = table(&self.table);
        // Only the table's own handle left: nobody holds or waits on it.
        if table
            .get(&self.name)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            table.remove(&self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_world_is_exclusive() {
        let locks = WorldLocks::new();
        let guard = locks.lock("world0").await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("world0").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_worlds_do_not_contend() {
        let locks = WorldLocks::new();
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock("b")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = WorldLocks::new();
        for i in 0..100 {
            let _guard = locks.lock(&format!("world{i}")).await;
        }
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_kept_while_another_waits() {
        let locks = WorldLocks::new();
        let first = locks.lock("w").await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("w").await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(first);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
