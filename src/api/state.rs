use std::sync::Arc;

use crate::{
    config::Config,
    db::{
        create_pool, create_redis_client, run_migrations, Cache, CacheWriterHandle,
        CachedWardrobeStore, InMemoryStore, PgStore, RecommendationStore, WardrobeStore,
    },
    services::seed,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store behind the wardrobe endpoints, possibly fronted by the cache
    pub wardrobe: Arc<dyn WardrobeStore>,
    /// Uncached store that recommendations take their item snapshot from
    pub snapshot: Arc<dyn WardrobeStore>,
    pub history: Arc<dyn RecommendationStore>,
    /// Port the server listens on, reported by the health check
    pub port: u16,
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AppState {
    pub fn new(wardrobe: Arc<dyn WardrobeStore>, history: Arc<dyn RecommendationStore>) -> Self {
        Self {
            snapshot: wardrobe.clone(),
            wardrobe,
            history,
            port: Config::default().port,
        }
    }

    /// Serves the wardrobe endpoints from `listing` while recommendations
    /// keep reading the underlying store
    pub fn with_listing(mut self, listing: Arc<dyn WardrobeStore>) -> Self {
        self.wardrobe = listing;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// State backed by a single empty in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }

    /// Builds the stores selected by configuration
    ///
    /// Postgres is used when `database_url` is set, otherwise the in-memory
    /// store. When `redis_url` is set the wardrobe endpoints go through the
    /// cache and the returned handle must be shut down to flush pending
    /// cache writes. Recommendations always read the store directly.
    pub async fn from_config(config: &Config) -> anyhow::Result<(Self, Option<CacheWriterHandle>)> {
        let (wardrobe, history): (Arc<dyn WardrobeStore>, Arc<dyn RecommendationStore>) =
            match &config.database_url {
                Some(url) => {
                    let pool = create_pool(url, config.database_max_connections).await?;
                    run_migrations(&pool).await?;
                    tracing::info!("Connected to Postgres and applied migrations");
                    let store = Arc::new(PgStore::new(pool));
                    (store.clone(), store)
                }
                None => {
                    tracing::warn!("DATABASE_URL not set, using in-memory store");
                    let store = Arc::new(InMemoryStore::new());
                    (store.clone(), store)
                }
            };

        if config.seed_demo_wardrobe {
            seed::seed_if_empty(wardrobe.as_ref()).await?;
        }

        let state = Self::new(wardrobe.clone(), history).with_port(config.port);

        match &config.redis_url {
            Some(url) => {
                let client = create_redis_client(url)?;
                let (cache, handle) = Cache::new(client).await;
                tracing::info!(ttl_secs = config.cache_ttl_secs, "Wardrobe listing cache enabled");
                let cached = CachedWardrobeStore::new(wardrobe, cache, config.cache_ttl_secs);
                Ok((state.with_listing(Arc::new(cached)), Some(handle)))
            }
            None => Ok((state, None)),
        }
    }
}
