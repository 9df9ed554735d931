// ABOUTME: Google Cloud KMS implementation of the KeyService capability
// ABOUTME: All calls are scoped to the crypto key named by the session's KeyReference

use super::KeyService;
use crate::config::KeyReference;
use crate::error::Error;
use async_trait::async_trait;
use google_cloud_kms::client::{Client, ClientConfig};
use google_cloud_kms::grpc::kms::v1::{DecryptRequest, EncryptRequest};
use tracing::{debug, error};

pub struct GcpKeyService {
    client: Client,
    key_name: String,
}

impl GcpKeyService {
    pub async fn new(key: &KeyReference) -> Result<Self, Error> {
        debug!(
            "Initializing Cloud KMS client for project {}, location {}, key ring {}, key {}",
            key.project, key.location, key.keyring, key.key_name
        );

        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| Error::Configuration(format!("GCP auth failed: {}", e)))?;

        let client = Client::new(config)
            .await
            .map_err(|e| Error::Configuration(format!("KMS client creation failed: {}", e)))?;

        Ok(Self {
            client,
            key_name: key.resource_name(),
        })
    }
}

#[async_trait]
impl KeyService for GcpKeyService {
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        debug!("Encrypting {} bytes with Cloud KMS", plaintext.len());

        let request = EncryptRequest {
            name: self.key_name.clone(),
            plaintext: plaintext.to_vec(),
            ..Default::default()
        };

        let response = self.client.encrypt(request, None).await.map_err(|e| {
            error!("Cloud KMS encryption failed: {}", e);
            Error::Service(format!("KMS encryption failed: {}", e))
        })?;

        Ok(response.ciphertext)
    }

    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        debug!("Decrypting {} bytes with Cloud KMS", ciphertext.len());

        let request = DecryptRequest {
            name: self.key_name.clone(),
            ciphertext: ciphertext.to_vec(),
            ..Default::default()
        };

        let response = self.client.decrypt(request, None).await.map_err(|e| {
            error!("Cloud KMS decryption failed: {}", e);
            Error::Service(format!("KMS decryption failed: {}", e))
        })?;

        Ok(response.plaintext)
    }
}
