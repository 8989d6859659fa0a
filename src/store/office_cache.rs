use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::model::office::Office;
use crate::store::{OfficeDirectory, StoreResult};

/// Read-through cache in front of an office directory. Offices change rarely
/// and every scan looks one up, so hits skip the database entirely. Misses are
/// not cached, so a newly registered office is visible immediately.
pub struct CachedOfficeDirectory<D> {
    inner: D,
    cache: Cache<u64, Office>,
}

impl<D: OfficeDirectory> CachedOfficeDirectory<D> {
    pub fn new(inner: D, max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<D: OfficeDirectory> OfficeDirectory for CachedOfficeDirectory<D> {
    async fn get_office(&self, office_id: u64) -> StoreResult<Option<Office>> {
        if let Some(office) = self.cache.get(&office_id).await {
            return Ok(Some(office));
        }

        let office = self.inner.get_office(office_id).await?;
        if let Some(office) = &office {
            debug!(office_id, "Caching office");
            self.cache.insert(office_id, office.clone()).await;
        }

        Ok(office)
    }
}
