//! News API access: query URL construction and the [`NewsApi`] seam.
//!
//! The dashboard talks to two read-only endpoints of a newsapi.org-style API:
//! - `top-headlines`: filtered by country and category
//! - `everything`: full-text search, ignores country and category
//!
//! # Architecture
//!
//! - [`NewsApi`]: Core trait; the controller is generic over it
//! - [`NewsService`]: Live implementation over [`HttpClient`]
//! - [`KeyTransport`]: Where the access key travels (query string or header)

use crate::http::{HttpClient, HttpError};
use crate::models::{DEFAULT_COUNTRY, NewsRequest, NewsResponse};
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};
use url::Url;

/// Header carrying the access key when [`KeyTransport::Header`] is used.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Query parameter carrying the access key when [`KeyTransport::Query`] is used.
pub const API_KEY_PARAM: &str = "apiKey";

/// Trait for fetching news.
///
/// Implementors resolve each call exactly once with either the parsed
/// response or an error.
pub trait NewsApi {
    /// Headlines filtered by country and category.
    async fn top_headlines(&self, country: &str, category: &str)
    -> Result<NewsResponse, HttpError>;

    /// Full-text search.
    async fn everything(&self, text: &str) -> Result<NewsResponse, HttpError>;

    /// Dispatch a selected [`NewsRequest`] to the matching operation.
    async fn fetch(&self, request: &NewsRequest) -> Result<NewsResponse, HttpError> {
        match request {
            NewsRequest::TopHeadlines { country, category } => {
                self.top_headlines(country, category).await
            }
            NewsRequest::Everything { text } => self.everything(text).await,
        }
    }
}

/// How the access key is attached to requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyTransport {
    /// `apiKey` query parameter.
    #[default]
    Query,
    /// `X-Api-Key` request header; keeps the key out of URLs.
    Header,
}

/// Live [`NewsApi`] implementation.
#[derive(Clone)]
pub struct NewsService {
    http: HttpClient,
    api_url: Url,
    api_key: String,
    key_transport: KeyTransport,
}

impl fmt::Debug for NewsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsService")
            .field("api_url", &self.api_url.as_str())
            .field("key_transport", &self.key_transport)
            .finish()
    }
}

impl NewsService {
    /// Create a service rooted at `api_url` (e.g. `https://newsapi.org/v2`).
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an absolute URL.
    pub fn new(
        http: HttpClient,
        api_url: &str,
        api_key: impl Into<String>,
        key_transport: KeyTransport,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            api_url: Url::parse(api_url)?,
            api_key: api_key.into(),
            key_transport,
        })
    }

    /// URL of the `top-headlines` endpoint for a country and category.
    ///
    /// A blank country falls back to [`DEFAULT_COUNTRY`]; a blank category
    /// is left out.
    pub fn top_headlines_url(&self, country: &str, category: &str) -> Url {
        let country = match country.trim() {
            "" => DEFAULT_COUNTRY,
            c => c,
        };
        let mut params = vec![("country", country)];
        let category = category.trim();
        if !category.is_empty() {
            params.push(("category", category));
        }
        self.endpoint_url("top-headlines", &params)
    }

    /// URL of the `everything` endpoint for a search text.
    pub fn everything_url(&self, text: &str) -> Url {
        self.endpoint_url("everything", &[("q", text)])
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map(|mut segments| {
                segments.pop_if_empty().push(endpoint);
            })
            .ok();
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(params);
            if self.key_transport == KeyTransport::Query {
                query.append_pair(API_KEY_PARAM, &self.api_key);
            }
        }
        url
    }

    async fn get(&self, url: Url) -> Result<NewsResponse, HttpError> {
        match self.key_transport {
            KeyTransport::Query => self.http.get(url.as_str()).await,
            KeyTransport::Header => {
                self.http
                    .get_with_headers(url.as_str(), &[(API_KEY_HEADER, self.api_key.as_str())])
                    .await
            }
        }
    }
}

impl NewsApi for NewsService {
    #[instrument(level = "info", skip(self))]
    async fn top_headlines(
        &self,
        country: &str,
        category: &str,
    ) -> Result<NewsResponse, HttpError> {
        let response = self.get(self.top_headlines_url(country, category)).await?;
        info!(
            count = response.articles.len(),
            total = response.total_results,
            "Fetched top headlines"
        );
        Ok(response)
    }

    #[instrument(level = "info", skip(self))]
    async fn everything(&self, text: &str) -> Result<NewsResponse, HttpError> {
        let response = self.get(self.everything_url(text)).await?;
        info!(
            count = response.articles.len(),
            total = response.total_results,
            "Fetched search results"
        );
        Ok(response)
    }
}
