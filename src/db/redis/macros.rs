/// Cache-aside lookup against a `Cache`.
///
/// Returns the cached value when present. Otherwise awaits `$block`,
/// queues the result for a background write with the given TTL (seconds)
/// and returns it. Cache read failures are logged and treated as a miss,
/// so an unavailable Redis never fails the request.
///
/// # Example
/// ```rust,ignore
/// let items: Vec<WardrobeItem> =
///     cached!(cache, CacheKey::WardrobeItems, 60, inner.list_all())?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            miss => {
                if let Err(e) = miss {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, using store");
                }
                match $block.await {
                    Ok(value) => {
                        $cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }};
}
