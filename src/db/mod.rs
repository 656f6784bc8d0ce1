pub mod cached;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod store;

pub use cached::CachedWardrobeStore;
pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
pub use store::{RecommendationStore, WardrobeStore};

#[cfg(test)]
pub use store::{MockRecommendationStore, MockWardrobeStore};
