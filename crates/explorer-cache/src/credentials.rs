//! In-memory credential cache built on moka with per-entry expiry.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use moka::Expiry;
use moka::future::Cache;
use tracing::{debug, info};
use url::Url;

use explorer_core::AppResult;
use explorer_core::config::CredentialsConfig;
use explorer_entity::credentials::ServerCredentials;

use crate::keys::CredentialsKey;
use crate::protector::SecretProtector;

/// One cached login.
///
/// The deadline is shared by every clone of the entry, so a sliding hit
/// extends it in place and never writes the entry back into the cache.
#[derive(Clone)]
struct CachedSecret {
    user_id: String,
    protected: Arc<[u8]>,
    /// Absolute expiry in nanoseconds since the epoch.
    deadline: Arc<AtomicI64>,
    /// Original lifetime, used to re-extend the entry on sliding expiration.
    ttl: chrono::Duration,
}

/// Longest expiry handed to moka.
const MAX_EXPIRY: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn to_nanos(at: DateTime<Utc>) -> i64 {
    at.timestamp_nanos_opt().unwrap_or(i64::MAX)
}

impl CachedSecret {
    fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.deadline.load(Ordering::Acquire))
    }

    fn remaining(&self) -> Duration {
        (self.expires_at() - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
            .min(MAX_EXPIRY)
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }

    /// Push the deadline to `now + ttl`. Never moves it backwards.
    fn extend_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let next = now
            .checked_add_signed(self.ttl)
            .map_or(i64::MAX, to_nanos);
        let previous = self.deadline.fetch_max(next, Ordering::AcqRel);
        DateTime::from_timestamp_nanos(previous.max(next))
    }

    fn slides(&self) -> bool {
        self.ttl > chrono::Duration::zero()
    }
}

/// Expires every entry at its own absolute deadline. With sliding
/// expiration a read restarts the entry's original lifetime.
struct SecretExpiry {
    sliding: bool,
}

impl Expiry<CredentialsKey, CachedSecret> for SecretExpiry {
    fn expire_after_create(
        &self,
        _key: &CredentialsKey,
        value: &CachedSecret,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.remaining())
    }

    fn expire_after_read(
        &self,
        _key: &CredentialsKey,
        value: &CachedSecret,
        _read_at: Instant,
        duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        if self.sliding && value.slides() && !value.is_expired_at(Utc::now()) {
            value
                .ttl
                .to_std()
                .ok()
                .map(|ttl| ttl.min(MAX_EXPIRY))
                .or(duration_until_expiry)
        } else {
            duration_until_expiry
        }
    }

    fn expire_after_update(
        &self,
        _key: &CredentialsKey,
        value: &CachedSecret,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.remaining())
    }
}

/// Process-wide cache mapping `(session id, server host)` to a protected
/// secret.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone)]
pub struct CredentialsCache {
    cache: Cache<CredentialsKey, CachedSecret>,
    protector: Arc<SecretProtector>,
    sliding_expiration: bool,
}

impl CredentialsCache {
    /// Create a cache from configuration.
    pub fn new(config: &CredentialsConfig) -> AppResult<Self> {
        let protector = SecretProtector::from_config(config.protection_key.as_deref())?;
        info!(
            max_capacity = config.max_capacity,
            sliding_expiration = config.sliding_expiration,
            "Initializing credentials cache"
        );
        Ok(Self::with_protector(
            protector,
            config.max_capacity,
            config.sliding_expiration,
        ))
    }

    /// Create a cache with an explicit protector.
    pub fn with_protector(
        protector: SecretProtector,
        max_capacity: u64,
        sliding_expiration: bool,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(SecretExpiry {
                sliding: sliding_expiration,
            })
            .build();
        Self {
            cache,
            protector: Arc::new(protector),
            sliding_expiration,
        }
    }

    /// Insert or overwrite the entry for `(session_id, credentials.host)`.
    pub async fn insert(
        &self,
        session_id: &str,
        credentials: &ServerCredentials,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let protected = self.protector.protect(&credentials.password)?;
        let key = CredentialsKey::new(session_id, credentials.host.clone());
        let ttl = expires_at - Utc::now();
        debug!(key = %key, user_id = %credentials.user_id, %expires_at, "Caching credentials");
        self.cache
            .insert(
                key,
                CachedSecret {
                    user_id: credentials.user_id.clone(),
                    protected: protected.into(),
                    deadline: Arc::new(AtomicI64::new(to_nanos(expires_at))),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    /// Look up the credentials cached for `(session_id, host)`.
    ///
    /// An expired entry is evicted and reported as a miss.
    pub async fn get(&self, session_id: &str, host: &Url) -> AppResult<Option<ServerCredentials>> {
        let Some((entry, expires_at)) = self.live_entry(session_id, host).await else {
            return Ok(None);
        };
        let password = self.protector.unprotect(&entry.protected)?;
        Ok(Some(
            ServerCredentials::new(host.clone(), entry.user_id, password).with_expiry(expires_at),
        ))
    }

    /// The user id cached for `(session_id, host)`, without unprotecting the secret.
    pub async fn user_id(&self, session_id: &str, host: &Url) -> Option<String> {
        self.live_entry(session_id, host)
            .await
            .map(|(entry, _)| entry.user_id)
    }

    /// The unexpired entry for `(session_id, host)` and its current deadline.
    ///
    /// Read-only on the cache: a sliding hit only moves the shared deadline,
    /// so an entry evicted concurrently stays evicted.
    async fn live_entry(
        &self,
        session_id: &str,
        host: &Url,
    ) -> Option<(CachedSecret, DateTime<Utc>)> {
        let key = CredentialsKey::new(session_id, host.clone());
        let entry = self.cache.get(&key).await?;

        let now = Utc::now();
        if entry.is_expired_at(now) {
            debug!(key = %key, "Evicting expired credentials");
            self.cache.invalidate(&key).await;
            return None;
        }

        let expires_at = if self.sliding_expiration && entry.slides() {
            entry.extend_from(now)
        } else {
            entry.expires_at()
        };
        Some((entry, expires_at))
    }

    /// Remove every entry belonging to `session_id`. Returns the number removed.
    pub async fn remove_session(&self, session_id: &str) -> u64 {
        let keys: Vec<CredentialsKey> = self
            .cache
            .iter()
            .filter(|(key, _)| key.session_id == session_id)
            .map(|(key, _)| (*key).clone())
            .collect();

        let mut count = 0u64;
        for key in keys {
            self.cache.invalidate(&key).await;
            count += 1;
        }
        debug!(session_id, count, "Removed session credentials");
        count
    }

    /// Remove every entry. A no-op on an empty cache.
    pub async fn remove_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Run pending maintenance, evicting expired entries. Returns the
    /// number of entries left.
    pub async fn sweep(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for CredentialsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsCache")
            .field("entries", &self.cache.entry_count())
            .field("sliding_expiration", &self.sliding_expiration)
            .finish()
    }
}
