use crate::content::error::{ContentError, ContentErrorType};
use crate::utils::background::BackgroundService;
use async_trait::async_trait;
use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};
use log::{debug, warn};
use postcard::{from_bytes, to_stdvec};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch::Receiver;
use tokio::task::spawn_blocking;

const PERSISTENT_SESSIONS_KEYSPACE: &str = "sessions";

/// Expecting session record is about 4kb size
const SESSION_RECORD_SIZE: u64 = 4 * 1024;

fn store_error(detail: String) -> ContentError {
    ContentError::new(ContentErrorType::Session, Some(detail))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Stored value with its write time, records older than the ttl are dead
#[derive(Serialize, Deserialize)]
struct SessionRecord {
    written_at: u64,
    value: Vec<u8>,
}

impl SessionRecord {
    fn is_expired(&self, ttl: Duration, now: u64) -> bool {
        now >= self.written_at.saturating_add(ttl.as_millis() as u64)
    }
}

/// On-disk key-value store, backing persistent sessions
///
/// Session ids are handed out to every cookieless request, so records expire
/// after `ttl` and [`PersistentStore::sweep_expired`] deletes them.
pub struct PersistentStore {
    db: fjall::Database,
    sessions_keyspace: Keyspace,
    ttl: Duration,
}

impl PersistentStore {
    pub fn new(
        db_path: Box<Path>,
        sessions_capacity: NonZeroUsize,
        ttl: Duration,
    ) -> Result<Self, ContentError> {
        let db_cache_size = SESSION_RECORD_SIZE * sessions_capacity.get() as u64;

        let db = fjall::Database::builder(db_path)
            .cache_size(db_cache_size)
            .open()
            .map_err(|err| store_error(format!("Unable to open session db: {}", err)))?;
        let sessions_keyspace = db
            .keyspace(PERSISTENT_SESSIONS_KEYSPACE, KeyspaceCreateOptions::default)
            .map_err(|err| store_error(format!("Unable to open sessions keyspace: {}", err)))?;

        Ok(PersistentStore {
            db,
            sessions_keyspace,
            ttl,
        })
    }

    fn encode_key<K: Serialize>(key: &K) -> Result<Vec<u8>, ContentError> {
        to_stdvec(key).map_err(|err| store_error(format!("Unable to encode key: {}", err)))
    }

    pub async fn get<K>(&self, key: &K) -> Result<Option<Vec<u8>>, ContentError>
    where
        K: Serialize + Send + Sync,
    {
        let keyspace = self.sessions_keyspace.clone();
        let key = Self::encode_key(key)?;

        let raw = spawn_blocking(move || keyspace.get(key))
            .await
            .map_err(|err| store_error(err.to_string()))?
            .map_err(|err| store_error(err.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match from_bytes::<SessionRecord>(&raw) {
            Ok(record) if record.is_expired(self.ttl, now_millis()) => Ok(None),
            Ok(record) => Ok(Some(record.value)),
            Err(err) => {
                warn!("Ignoring unreadable session record: {}", err);
                Ok(None)
            }
        }
    }

    pub async fn set<K>(&self, key: &K, value: Vec<u8>) -> Result<(), ContentError>
    where
        K: Serialize + Send + Sync,
    {
        let keyspace = self.sessions_keyspace.clone();
        let key = Self::encode_key(key)?;
        let record = to_stdvec(&SessionRecord {
            written_at: now_millis(),
            value,
        })
        .map_err(|err| store_error(format!("Unable to encode record: {}", err)))?;

        spawn_blocking(move || keyspace.insert(key, record))
            .await
            .map_err(|err| store_error(err.to_string()))?
            .map_err(|err| store_error(err.to_string()))
    }

    pub async fn remove<K>(&self, key: &K) -> Result<(), ContentError>
    where
        K: Serialize + Send + Sync,
    {
        let keyspace = self.sessions_keyspace.clone();
        let key = Self::encode_key(key)?;

        spawn_blocking(move || keyspace.remove(key))
            .await
            .map_err(|err| store_error(err.to_string()))?
            .map_err(|err| store_error(err.to_string()))
    }

    /// Deletes expired and unreadable records, returns how many were deleted
    pub async fn sweep_expired(&self) -> Result<usize, ContentError> {
        let keyspace = self.sessions_keyspace.clone();
        let ttl = self.ttl;

        spawn_blocking(move || -> Result<usize, ContentError> {
            let now = now_millis();
            let mut removed = 0;
            for guard in keyspace.iter() {
                let (key, raw) = guard
                    .into_inner()
                    .map_err(|err| store_error(err.to_string()))?;
                let alive = from_bytes::<SessionRecord>(&raw)
                    .map(|record| !record.is_expired(ttl, now))
                    .unwrap_or(false);
                if !alive {
                    keyspace
                        .remove(key)
                        .map_err(|err| store_error(err.to_string()))?;
                    removed += 1;
                }
            }
            Ok(removed)
        })
        .await
        .map_err(|err| store_error(err.to_string()))?
    }

    fn flush(&self) {
        debug!("Flushing sessions to disk");
        if let Err(err) = self.db.persist(PersistMode::SyncAll) {
            warn!("Failed to flush data to disk, got error: {}", err)
        }
    }
}

pub struct StorageBackgroundAdapter {
    store: Option<Arc<PersistentStore>>,
    cancel_chan: (
        tokio::sync::watch::Sender<bool>,
        tokio::sync::watch::Receiver<bool>,
    ),
}

impl StorageBackgroundAdapter {
    pub fn new(store: Option<Arc<PersistentStore>>) -> Self {
        StorageBackgroundAdapter {
            store,
            cancel_chan: tokio::sync::watch::channel(false),
        }
    }
}

#[async_trait]
impl BackgroundService for StorageBackgroundAdapter {
    fn background_period(&self) -> Duration {
        Duration::new(60, 0)
    }

    async fn background(&mut self) {
        if let Some(store) = &self.store {
            match store.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!("Removed {} expired session records", removed),
                Err(err) => warn!("Failed to sweep expired sessions: {}", err),
            }
            store.flush();
        }
    }

    fn cancel_token(&self) -> Receiver<bool> {
        self.cancel_chan.1.clone()
    }

    async fn stop(&mut self) {
        let _ = self.cancel_chan.0.send(true);
        if let Some(store) = &self.store {
            store.flush();
        }
    }
}
