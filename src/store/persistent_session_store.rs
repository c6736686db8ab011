use crate::content::error::ContentError;
use crate::session::SessionId;
use crate::store::persistent_store::PersistentStore;
use crate::store::session_store::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Session storage surviving restarts, on top of [`PersistentStore`]
pub struct PersistentSessionStore {
    store: Arc<PersistentStore>,
}

impl PersistentSessionStore {
    pub fn new(store: Arc<PersistentStore>) -> Self {
        PersistentSessionStore { store }
    }
}

#[async_trait]
impl SessionStore for PersistentSessionStore {
    async fn get(
        &self,
        session: &SessionId,
        namespace: &str,
    ) -> Result<Option<Vec<u8>>, ContentError> {
        self.store.get(&(session.as_str(), namespace)).await
    }

    async fn set(
        &self,
        session: &SessionId,
        namespace: &str,
        value: Vec<u8>,
    ) -> Result<(), ContentError> {
        self.store.set(&(session.as_str(), namespace), value).await
    }

    async fn remove(&self, session: &SessionId, namespace: &str) -> Result<(), ContentError> {
        self.store.remove(&(session.as_str(), namespace)).await
    }
}
