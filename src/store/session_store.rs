use crate::content::error::ContentError;
use crate::session::SessionId;
use async_trait::async_trait;

/// Session scoped key-value storage
///
/// Every value lives under `(session, namespace)`, so features storing data in
/// the same session never see each other's records. Writes are last-write-wins,
/// two requests of one session racing on the same namespace are not guarded.
#[async_trait]
pub trait SessionStore {
    async fn get(
        &self,
        session: &SessionId,
        namespace: &str,
    ) -> Result<Option<Vec<u8>>, ContentError>;

    async fn set(
        &self,
        session: &SessionId,
        namespace: &str,
        value: Vec<u8>,
    ) -> Result<(), ContentError>;

    async fn remove(&self, session: &SessionId, namespace: &str) -> Result<(), ContentError>;
}
