//! Retrieval of manifests and file contents by location.

use crate::error::FetchError;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// A retrieved text body together with the location it was finally served from
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub location: Url,
    pub body: String,
}

/// Retrieves UTF-8 text by location
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve the text at `location`, reporting the final (post-redirect) location
    async fn retrieve(&self, location: &Url) -> Result<Retrieved, FetchError>;

    /// Retrieve only the body
    async fn fetch_text(&self, location: &Url) -> Result<String, FetchError> {
        Ok(self.retrieve(location).await?.body)
    }
}

/// Retriever for `http`, `https` and `file` locations
#[derive(Debug, Clone, Default)]
pub struct DefaultRetriever {
    client: reqwest::Client,
}

impl DefaultRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    async fn retrieve_http(&self, location: &Url) -> Result<Retrieved, FetchError> {
        let response = self
            .client
            .get(location.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                location: location.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                location: location.to_string(),
                status: status.as_u16(),
            });
        }

        let final_location = response.url().clone();
        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            location: location.to_string(),
            message: e.to_string(),
        })?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|_| FetchError::InvalidUtf8 {
            location: final_location.to_string(),
        })?;

        Ok(Retrieved {
            location: final_location,
            body,
        })
    }

    async fn retrieve_file(&self, location: &Url) -> Result<Retrieved, FetchError> {
        let path = location
            .to_file_path()
            .map_err(|_| FetchError::UnsupportedScheme {
                location: location.to_string(),
            })?;
        let bytes = tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
            location: location.to_string(),
            source,
        })?;
        let body = String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8 {
            location: location.to_string(),
        })?;
        Ok(Retrieved {
            location: location.clone(),
            body,
        })
    }
}

#[async_trait]
impl Retriever for DefaultRetriever {
    async fn retrieve(&self, location: &Url) -> Result<Retrieved, FetchError> {
        debug!(location = %location, "Retrieving");
        match location.scheme() {
            "http" | "https" => self.retrieve_http(location).await,
            "file" => self.retrieve_file(location).await,
            _ => Err(FetchError::UnsupportedScheme {
                location: location.to_string(),
            }),
        }
    }
}
