// ABOUTME: Google Cloud Storage implementation of the ObjectStore capability
// ABOUTME: One bucket per session; missing objects on read surface as NotFound

use super::ObjectStore;
use crate::error::Error;
use async_trait::async_trait;
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::list::ListObjectsRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use google_cloud_storage::http::Error as HttpError;
use tracing::debug;

pub struct GcsStore {
    client: Client,
    bucket: String,
}

impl GcsStore {
    pub async fn new(bucket: String) -> Result<Self, Error> {
        debug!("Initializing Cloud Storage client for bucket {}", bucket);

        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| Error::Configuration(format!("GCP auth failed: {}", e)))?;

        Ok(Self {
            client: Client::new(config),
            bucket,
        })
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects(&ListObjectsRequest {
                    bucket: self.bucket.clone(),
                    prefix: Some(prefix.to_string()),
                    page_token: page_token.take(),
                    ..Default::default()
                })
                .await
                .map_err(|e| Error::Service(e.to_string()))?;

            if let Some(items) = response.items {
                names.extend(items.into_iter().map(|object| object.name));
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} objects under {}", names.len(), prefix);
        Ok(names)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        self.client
            .download_object(
                &GetObjectRequest {
                    bucket: self.bucket.clone(),
                    object: name.to_string(),
                    ..Default::default()
                },
                &Range::default(),
            )
            .await
            .map_err(|e| match &e {
                HttpError::Response(response) if response.code == 404 => {
                    Error::NotFound(format!("object {} does not exist", name))
                }
                _ => Error::Service(e.to_string()),
            })
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<(), Error> {
        self.client
            .upload_object(
                &UploadObjectRequest {
                    bucket: self.bucket.clone(),
                    ..Default::default()
                },
                data.to_vec(),
                &UploadType::Simple(Media::new(name.to_string())),
            )
            .await
            .map_err(|e| Error::Service(e.to_string()))?;

        debug!("Uploaded {} bytes to {}", data.len(), name);
        Ok(())
    }
}
