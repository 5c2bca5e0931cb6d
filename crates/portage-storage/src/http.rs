use portage_core::models::Child;
use portage_core::wire;

use crate::error::StorageError;
use crate::store::{BoxFuture, CollectionStore};

/// Largest collection body either side of the endpoint accepts.
pub const MAX_COLLECTION_BYTES: u64 = 32 * 1024 * 1024;

/// Client for the collection endpoint served by `portage-server`:
/// `GET {base}/api/children` and `PUT {base}/api/children`.
///
/// `ureq` is blocking, so each call runs on the blocking thread pool.
#[derive(Clone)]
pub struct HttpStore {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/api/children", base_url.trim_end_matches('/')),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<Vec<Child>, StorageError> {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, StorageError> {
            let mut response = agent.get(&endpoint).call().map_err(http_error)?;
            response
                .body_mut()
                .with_config()
                .limit(MAX_COLLECTION_BYTES)
                .read_to_vec()
                .map_err(|e| StorageError::Read(e.to_string()))
        })
        .await
        .map_err(|e| StorageError::Http(e.to_string()))??;

        let children = wire::decode_collection(&bytes)?;
        tracing::debug!(endpoint = %self.endpoint, children = children.len(), "collection fetched");
        Ok(children)
    }

    async fn replace(&self, children: &[Child]) -> Result<(), StorageError> {
        let body = wire::encode_collection(children)?;
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            agent
                .put(&endpoint)
                .header("content-type", "application/json")
                .send(&body[..])
                .map_err(http_error)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Http(e.to_string()))??;

        tracing::debug!(endpoint = %self.endpoint, children = children.len(), "collection stored");
        Ok(())
    }
}

fn http_error(e: ureq::Error) -> StorageError {
    match e {
        ureq::Error::StatusCode(status) => StorageError::Http(format!("server responded {status}")),
        other => StorageError::Http(other.to_string()),
    }
}

impl CollectionStore for HttpStore {
    fn load(&self) -> BoxFuture<'_, Result<Vec<Child>, StorageError>> {
        Box::pin(self.fetch())
    }

    fn save<'a>(&'a self, children: &'a [Child]) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(self.replace(children))
    }
}
