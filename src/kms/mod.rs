// ABOUTME: Key-management capability used by the command dispatcher
// ABOUTME: One managed key per session; implementations own the key reference

pub mod gcp;

use crate::error::Error;
use async_trait::async_trait;

/// Envelope encrypt/decrypt through a single managed key.
#[async_trait]
pub trait KeyService: Send + Sync {
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error>;
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error>;
}
