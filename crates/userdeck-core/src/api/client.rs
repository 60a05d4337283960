//! API client for the users REST API.
//!
//! This module provides the `UserClient` struct for fetching user records
//! and downloading avatar images through an in-memory cache.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use futures::future::FutureExt;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::{AvatarImage, ImageCache};
use crate::config::Config;
use crate::models::{Envelope, UserRecord};

use super::FetchError;

/// Query parameter the API reads the page size from
const PAGE_SIZE_PARAM: &str = "per_page";

/// API client for the users endpoint.
/// Clone is cheap - reqwest::Client and the image cache are both shared via Arc.
#[derive(Clone)]
pub struct UserClient {
    client: Client,
    base_url: String,
    images: Arc<ImageCache>,
}

impl UserClient {
    /// Create a client for the endpoint and timeout in `config`
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a client around an existing reqwest client, sharing its connection pool
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            images: Arc::new(ImageCache::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read access to the avatar cache
    pub fn image_cache(&self) -> &ImageCache {
        &self.images
    }

    fn parse_url(raw: &str) -> Result<Url, FetchError> {
        Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(FetchError::from_status(status, &body))
        }
    }

    /// GET `url` and unwrap the `data` field of the JSON envelope
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_response(response).await?;

        let body = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .inspect_err(|e| debug!(url = %url, error = %e, "Response did not match expected shape"))?;
        Ok(envelope.data)
    }

    // ===== Records =====

    /// Fetch up to `page_size` users
    pub async fn fetch_list(&self, page_size: NonZeroU32) -> Result<Vec<UserRecord>, FetchError> {
        let mut url = Self::parse_url(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());

        let mut users: Vec<UserRecord> = self.get(url).await?;

        let limit = page_size.get() as usize;
        if users.len() > limit {
            warn!(
                requested = limit,
                received = users.len(),
                "Server returned more users than requested, dropping the rest"
            );
            users.truncate(limit);
        }
        debug!(count = users.len(), "Fetched user list");
        Ok(users)
    }

    /// Fetch a single user by id
    pub async fn fetch_one(&self, id: i64) -> Result<UserRecord, FetchError> {
        let url = Self::parse_url(&format!("{}/{}", self.base_url, id))?;
        let user: UserRecord = self.get(url).await?;

        if user.id() != id {
            return Err(FetchError::DecodeFailed(format!(
                "requested user {} but received user {}",
                id,
                user.id()
            )));
        }
        Ok(user)
    }

    // ===== Images =====

    /// Fetch an image, serving it from the cache when this URL has been
    /// downloaded before. Any failure yields `None`; concurrent calls for
    /// the same URL share one download.
    pub async fn fetch_image(&self, url: &str) -> Option<Arc<AvatarImage>> {
        if let Some(image) = self.images.get(url) {
            debug!(url, "Image cache hit");
            return Some(image);
        }

        let parsed = match Self::parse_url(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "Skipping image with invalid URL");
                return None;
            }
        };

        let pending = self.images.join_or_start(url, || {
            let client = self.client.clone();
            let key = url.to_string();
            async move {
                match Self::download_image(&client, parsed).await {
                    Ok(image) => Some(Arc::new(image)),
                    Err(e) => {
                        debug!(url = %key, error = %e, "Image download failed");
                        None
                    }
                }
            }
            .boxed()
        });

        let image = pending.clone().await;
        self.images.finish(url, &pending, image.as_ref());
        image
    }

    async fn download_image(client: &Client, url: Url) -> Result<AvatarImage, FetchError> {
        debug!(url = %url, "Downloading image");
        let response = client.get(url).send().await?;
        let response = Self::check_response(response).await?;
        let bytes = response.bytes().await?;
        AvatarImage::decode(bytes.to_vec()).map_err(|e| FetchError::DecodeFailed(e.to_string()))
    }
}
