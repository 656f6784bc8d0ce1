use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    cached,
    error::AppResult,
    models::{WardrobeItem, WardrobeItemInput},
};

use super::{
    redis::{Cache, CacheKey},
    store::WardrobeStore,
};

/// Wardrobe store that serves `list_all` from Redis when it can
///
/// Every mutation goes to the wrapped store first and then invalidates the
/// cached listing.
pub struct CachedWardrobeStore {
    inner: Arc<dyn WardrobeStore>,
    cache: Cache,
    ttl_secs: u64,
}

impl CachedWardrobeStore {
    pub fn new(inner: Arc<dyn WardrobeStore>, cache: Cache, ttl_secs: u64) -> Self {
        Self {
            inner,
            cache,
            ttl_secs,
        }
    }

    async fn invalidate(&self) {
        if let Err(e) = self.cache.invalidate(&CacheKey::WardrobeItems).await {
            tracing::warn!(error = %e, "Failed to invalidate wardrobe cache");
        }
    }
}

#[async_trait]
impl WardrobeStore for CachedWardrobeStore {
    async fn list_all(&self) -> AppResult<Vec<WardrobeItem>> {
        cached!(
            self.cache,
            CacheKey::WardrobeItems,
            self.ttl_secs,
            self.inner.list_all()
        )
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WardrobeItem>> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, input: WardrobeItemInput) -> AppResult<WardrobeItem> {
        let item = self.inner.create(input).await?;
        self.invalidate().await;
        Ok(item)
    }

    async fn update(&self, id: Uuid, input: WardrobeItemInput) -> AppResult<WardrobeItem> {
        let item = self.inner.update(id, input).await?;
        self.invalidate().await;
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.inner.delete(id).await?;
        self.invalidate().await;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}
