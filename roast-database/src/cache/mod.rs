mod noop_store;
mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use noop_store::NoopCacheStore;
use redis_store::RedisCacheStore;

/// Snapshots change on every gift or XP award, so keep them short-lived.
pub const SNAPSHOT_CACHE_TTL: Duration = Duration::from_secs(30);
/// Leaderboards tolerate a little more staleness.
pub const LEADERBOARD_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopCacheStore),
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled(NoopCacheStore),
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.ping().await,
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled(store) => store.get(key).await,
            CacheBackend::Redis(store) => store.get(key).await,
        }?;

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled(store) => store.set(key, payload, ttl_seconds).await,
            CacheBackend::Redis(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.del(key).await,
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }

    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(
                ?e,
                cache_key = key,
                "cache get failed; falling back to database"
            ),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(
                ?e,
                cache_key = key,
                "cache set failed; returning database value"
            );
        }

        Ok(loaded)
    }
}

pub fn creator_level_key(cache: &CacheService, creator_id: &str) -> String {
    cache.key(format!("creator_level:{creator_id}"))
}

pub fn season_ranking_key(cache: &CacheService, season_id: &str, creator_id: &str) -> String {
    cache.key(format!("season:{season_id}:ranking:{creator_id}"))
}

pub fn season_leaderboard_key(cache: &CacheService, season_id: &str, limit: u32) -> String {
    cache.key(format!("season:{season_id}:leaderboard:{limit}"))
}

pub fn vip_member_key(cache: &CacheService, club_id: &str, user_id: &str) -> String {
    cache.key(format!("vip:{club_id}:member:{user_id}"))
}

/// Drop a member's cached snapshot after a write.
///
/// Failures are logged; a stale entry expires on its own within the TTL.
pub async fn invalidate_vip_member(cache: &CacheService, club_id: &str, user_id: &str) {
    let key = vip_member_key(cache, club_id, user_id);
    if let Err(e) = cache.del(&key).await {
        warn!(?e, cache_key = %key, "failed to invalidate vip member cache");
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CacheService, creator_level_key, season_leaderboard_key, season_ranking_key,
        vip_member_key,
    };

    #[test]
    fn keys_are_prefixed_and_scoped() {
        let cache = CacheService::disabled("roast:test");
        assert!(!cache.is_redis_enabled());
        assert_eq!(
            creator_level_key(&cache, "c1"),
            "roast:test:creator_level:c1"
        );
        assert_eq!(
            season_ranking_key(&cache, "s3", "c1"),
            "roast:test:season:s3:ranking:c1"
        );
        assert_eq!(
            season_leaderboard_key(&cache, "s3", 10),
            "roast:test:season:s3:leaderboard:10"
        );
        assert_eq!(
            vip_member_key(&cache, "club", "u9"),
            "roast:test:vip:club:member:u9"
        );
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = CacheService::disabled("roast:test");
        let key = cache.key("anything");

        cache
            .set_json(&key, &42_u64, super::SNAPSHOT_CACHE_TTL)
            .await
            .expect("noop set");
        assert_eq!(cache.get_json::<u64>(&key).await.expect("noop get"), None);

        let loaded = cache
            .get_or_load_json(&key, super::SNAPSHOT_CACHE_TTL, || async { Ok(7_u64) })
            .await
            .expect("loader result");
        assert_eq!(loaded, 7);
    }
}
