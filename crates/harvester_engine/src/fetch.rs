use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_debug;
use harvester_core::REQUEST_TIMEOUT;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::decode::decode_page;
use crate::download::stream_to_file;
use crate::{DownloadError, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

/// HTTP side of a harvest run.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body as text.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url` and stream the body into `dest_dir`, named after the URL's
    /// final path segment. Returns the written file's path.
    async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// Send a GET and fail on anything but a 2xx status.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let parsed = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new(FetchSettings::default())
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        engine_debug!(
            "Fetched {} bytes from {} (content type {:?})",
            bytes.len(),
            url,
            content_type
        );
        Ok(decode_page(&bytes, content_type.as_deref()))
    }

    async fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
        let response = self.get(url).await?;
        stream_to_file(response, url, dest_dir).await
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
