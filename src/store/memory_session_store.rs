use crate::content::error::ContentError;
use crate::session::SessionId;
use crate::store::session_store::SessionStore;
use async_trait::async_trait;
use std::num::NonZeroUsize;

/// Inmemory session storage
///
/// Bounded, so the least used sessions are evicted once capacity is reached
pub struct MemorySessionStore {
    cache: quick_cache::sync::Cache<(SessionId, String), Vec<u8>>,
}

impl MemorySessionStore {
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let capacity = capacity.map_or(4096, NonZeroUsize::get);

        MemorySessionStore {
            cache: quick_cache::sync::Cache::new(capacity),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(
        &self,
        session: &SessionId,
        namespace: &str,
    ) -> Result<Option<Vec<u8>>, ContentError> {
        Ok(self.cache.get(&(session.clone(), namespace.to_string())))
    }

    async fn set(
        &self,
        session: &SessionId,
        namespace: &str,
        value: Vec<u8>,
    ) -> Result<(), ContentError> {
        self.cache
            .insert((session.clone(), namespace.to_string()), value);
        Ok(())
    }

    async fn remove(&self, session: &SessionId, namespace: &str) -> Result<(), ContentError> {
        self.cache.remove(&(session.clone(), namespace.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = MemorySessionStore::new(None);
        let session = SessionId::generate();

        store.set(&session, "a", vec![1]).await.unwrap();
        store.set(&session, "b", vec![2]).await.unwrap();
        assert_eq!(store.get(&session, "a").await.unwrap(), Some(vec![1]));

        store.remove(&session, "a").await.unwrap();
        assert_eq!(store.get(&session, "a").await.unwrap(), None);
        assert_eq!(store.get(&session, "b").await.unwrap(), Some(vec![2]));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = MemorySessionStore::new(None);
        let first = SessionId::generate();
        let second = SessionId::generate();

        store.set(&first, "ns", vec![1]).await.unwrap();
        assert_eq!(store.get(&second, "ns").await.unwrap(), None);
    }
}
