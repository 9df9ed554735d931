// ABOUTME: Object-store capability used by the command dispatcher
// ABOUTME: Names are opaque paths; payloads are whole byte blobs, no metadata

pub mod gcs;

use crate::error::Error;
use async_trait::async_trait;

/// Minimal object-store surface: enumerate, read, write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Object names under `prefix`, in the order the store enumerates them.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, Error>;
    async fn read(&self, name: &str) -> Result<Vec<u8>, Error>;
    async fn write(&self, name: &str, data: &[u8]) -> Result<(), Error>;
}
