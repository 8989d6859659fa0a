use chrono::NaiveDate;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Entries are dropped after this long without a scan for the key.
const LOCK_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const LOCK_CAPACITY: u64 = 100_000;

/// One async mutex per (user, date) so the load-classify-write sequence for a
/// day record never interleaves with another scan for the same key. Scans for
/// different users or days never contend.
///
/// Only serializes within this process. The record store's conditional
/// writes cover other instances.
#[derive(Clone)]
pub struct ScanLocks {
    locks: Cache<(u64, NaiveDate), Arc<Mutex<()>>>,
}

impl ScanLocks {
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(LOCK_CAPACITY)
                .time_to_idle(LOCK_IDLE_TIMEOUT)
                .build(),
        }
    }

    pub async fn acquire(&self, user_id: u64, date: NaiveDate) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with((user_id, date), async { Arc::new(Mutex::new(())) })
            .await;

        lock.lock_owned().await
    }
}

impl Default for ScanLocks {
    fn default() -> Self {
        Self::new()
    }
}
