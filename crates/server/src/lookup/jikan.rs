//! Jikan (unofficial `MyAnimeList`) character search client.
//!
//! Successful pages are cached with `moka` for the configured TTL. Rate-limit
//! responses are never cached.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;
use waifu_tracker_core::CandidateCharacter;

use super::{CharacterLookup, LookupError, LookupPage};
use crate::config::JikanConfig;

type PageKey = (String, u32, u32);

/// Client for `GET /characters` on the Jikan v4 API.
#[derive(Clone)]
pub struct JikanClient {
    inner: Arc<JikanClientInner>,
}

struct JikanClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<PageKey, Vec<CandidateCharacter>>,
}

#[derive(Debug, Deserialize)]
struct CharacterSearchResponse {
    #[serde(default)]
    data: Vec<JikanCharacter>,
}

#[derive(Debug, Deserialize)]
struct JikanCharacter {
    mal_id: i64,
    name: String,
    #[serde(default)]
    nicknames: Option<Vec<String>>,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    images: Option<JikanImages>,
}

#[derive(Debug, Deserialize)]
struct JikanImages {
    jpg: Option<JikanImage>,
}

#[derive(Debug, Deserialize)]
struct JikanImage {
    image_url: Option<String>,
}

impl From<JikanCharacter> for CandidateCharacter {
    fn from(c: JikanCharacter) -> Self {
        Self {
            id: c.mal_id,
            name: c.name,
            nicknames: c.nicknames.unwrap_or_default(),
            about: c.about,
            image_url: c.images.and_then(|i| i.jpg).and_then(|j| j.image_url),
        }
    }
}

/// Build `{base}/characters?q=..&limit=..&page=..` with the query encoded.
fn characters_url(base_url: &str, query: &str, page: u32, limit: u32) -> Result<Url, LookupError> {
    let url = Url::parse_with_params(
        &format!("{base_url}/characters"),
        &[
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("page", page.to_string()),
        ],
    )?;
    Ok(url)
}

fn parse_characters(body: &str) -> Result<Vec<CandidateCharacter>, LookupError> {
    let response: CharacterSearchResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    Ok(response.data.into_iter().map(CandidateCharacter::from).collect())
}

impl JikanClient {
    /// Create a client from lookup configuration.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Http` if the HTTP client cannot be built.
    pub fn new(config: &JikanConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("waifu-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(JikanClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    async fn fetch(&self, query: &str, page: u32, limit: u32) -> Result<LookupPage, LookupError> {
        let url = characters_url(&self.inner.base_url, query, page, limit)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            debug!("Jikan rate limit hit");
            return Ok(LookupPage::rate_limited());
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(LookupError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        parse_characters(&body).map(LookupPage::with_items)
    }
}

#[async_trait]
impl CharacterLookup for JikanClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<LookupPage, LookupError> {
        let key = (query.to_string(), page, limit);
        if let Some(items) = self.inner.cache.get(&key).await {
            debug!(count = items.len(), "Cache hit for character page");
            return Ok(LookupPage::with_items(items));
        }

        let result = self.fetch(query, page, limit).await?;
        if !result.rate_limited {
            self.inner.cache.insert(key, result.items.clone()).await;
        }
        Ok(result)
    }
}
