pub mod http;

use anyhow::Result;
use async_trait::async_trait;

use crate::wire::WireObject;

pub use http::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMethod {
    Post,
    Put,
}

/// Fetches and posts raw JSON objects. Paths are relative to the server root,
/// e.g. `/versions/3.json`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns `None` when the resource does not exist.
    async fn get_object(&self, path: &str) -> Result<Option<WireObject>>;

    /// Returns the response object, or `None` when the server replies with an
    /// empty body (as Redmine does for updates).
    async fn send_object(
        &self,
        method: SendMethod,
        path: &str,
        body: &WireObject,
    ) -> Result<Option<WireObject>>;

    async fn delete(&self, path: &str) -> Result<()>;
}
