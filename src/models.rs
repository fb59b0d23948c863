//! Data models for news API payloads, lookups, and form queries.
//!
//! This module defines the records that flow through the dashboard:
//! - [`Article`]: A single article as returned by the news API
//! - [`NewsResponse`]: The envelope around a list of articles
//! - [`Country`]: An entry of the countries lookup
//! - [`Query`]: The form values read at request time
//! - [`NewsRequest`]: The API operation selected for a [`Query`]
//!
//! The API uses camelCase field names, so the structs rename on the wire
//! instead of carrying `#[allow(non_snake_case)]` fields.

use serde::{Deserialize, Serialize};

/// Country used when the form has none selected.
pub const DEFAULT_COUNTRY: &str = "us";

/// A news article as returned by the `top-headlines` and `everything` endpoints.
///
/// Articles are transient: they are created per response and discarded on
/// the next render. Only `url` is required; every other field may be absent
/// or `null` in the API payload. Fields the dashboard never shows (`source`,
/// `author`, `publishedAt`, `content`) are ignored, so an odd value in one of
/// them cannot fail the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The article headline.
    #[serde(default)]
    pub title: Option<String>,
    /// A short description or lede.
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the full article.
    pub url: String,
    /// Link to the lead image.
    #[serde(default)]
    pub url_to_image: Option<String>,
}

/// The envelope returned by the news API on success.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    /// `"ok"` on success.
    pub status: String,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// An entry of the countries lookup file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Country {
    /// Display name, e.g. `"United States"`.
    pub name: String,
    /// Two-letter code sent to the API, e.g. `"us"`.
    pub code: String,
}

/// Form values captured at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub country: String,
    pub category: String,
    /// Trimmed search text; `None` when the search box is blank.
    pub search_text: Option<String>,
}

impl Query {
    /// Build a query from raw form values, normalizing the search text.
    pub fn new(country: &str, category: &str, search: &str) -> Self {
        let search = search.trim();
        Self {
            country: country.trim().to_string(),
            category: category.trim().to_string(),
            search_text: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

/// The API operation chosen for a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsRequest {
    /// Headlines filtered by country and category.
    TopHeadlines { country: String, category: String },
    /// Full-text search across all sources.
    Everything { text: String },
}

impl NewsRequest {
    /// Non-empty search text always selects the search path, whatever the
    /// country and category are. Otherwise headlines are requested, falling
    /// back to [`DEFAULT_COUNTRY`] for a blank country.
    pub fn select(query: &Query) -> Self {
        match &query.search_text {
            Some(text) => NewsRequest::Everything { text: text.clone() },
            None => {
                let country = if query.country.is_empty() {
                    DEFAULT_COUNTRY.to_string()
                } else {
                    query.country.clone()
                };
                NewsRequest::TopHeadlines {
                    country,
                    category: query.category.clone(),
                }
            }
        }
    }

    /// Endpoint name, used for logging.
    pub fn endpoint(&self) -> &'static str {
        match self {
            NewsRequest::TopHeadlines { .. } => "top-headlines",
            NewsRequest::Everything { .. } => "everything",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_response_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": { "id": null, "name": "Example Times" },
                    "author": "Jane Doe",
                    "title": "First",
                    "description": "Lede",
                    "url": "https://example.com/1",
                    "urlToImage": "https://example.com/1.jpg",
                    "publishedAt": "2025-05-06T14:30:00Z",
                    "content": "Body"
                },
                {
                    "title": "Second",
                    "description": null,
                    "url": "https://example.com/2",
                    "urlToImage": null
                }
            ]
        }"#;

        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "ok");
        assert_eq!(response.total_results, 2);
        assert_eq!(response.articles.len(), 2);

        let first = &response.articles[0];
        assert_eq!(first.url_to_image.as_deref(), Some("https://example.com/1.jpg"));
        assert_eq!(first.title.as_deref(), Some("First"));

        let second = &response.articles[1];
        assert_eq!(second.description, None);
        assert_eq!(second.url_to_image, None);
    }

    #[test]
    fn test_odd_published_at_keeps_every_article() {
        let json = r#"{
            "status": "ok",
            "articles": [
                {"title": "Good", "url": "https://example.com/good", "publishedAt": "2025-05-06T14:30:00Z"},
                {"title": "Odd", "url": "https://example.com/odd", "publishedAt": "2025-05-06 14:30:00"},
                {"title": "Worse", "url": "https://example.com/worse", "publishedAt": 1746541800, "source": "wire"}
            ]
        }"#;

        let response: NewsResponse = serde_json::from_str(json).unwrap();
        let titles: Vec<_> = response
            .articles
            .iter()
            .map(|a| a.title.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(titles, vec!["Good", "Odd", "Worse"]);
    }

    #[test]
    fn test_news_response_missing_articles_defaults_to_empty() {
        let response: NewsResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(response.articles.is_empty());
        assert_eq!(response.total_results, 0);
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let article = Article {
            url: "https://example.com".to_string(),
            url_to_image: Some("img.png".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"urlToImage\":\"img.png\""));
    }

    #[test]
    fn test_query_blank_search_is_none() {
        let query = Query::new("de", "sports", "   ");
        assert_eq!(query.search_text, None);
        assert_eq!(query.country, "de");

        let query = Query::new("de", "sports", "  rust lang ");
        assert_eq!(query.search_text.as_deref(), Some("rust lang"));
    }

    #[test]
    fn test_select_search_wins_over_filters() {
        let query = Query::new("gb", "technology", "elections");
        assert_eq!(
            NewsRequest::select(&query),
            NewsRequest::Everything {
                text: "elections".to_string()
            }
        );
    }

    #[test]
    fn test_select_headlines_without_search() {
        let query = Query::new("fr", "health", "");
        assert_eq!(
            NewsRequest::select(&query),
            NewsRequest::TopHeadlines {
                country: "fr".to_string(),
                category: "health".to_string()
            }
        );
    }

    #[test]
    fn test_select_blank_country_defaults() {
        let query = Query::new("", "", "");
        match NewsRequest::select(&query) {
            NewsRequest::TopHeadlines { country, .. } => assert_eq!(country, DEFAULT_COUNTRY),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_country_deserialization() {
        let countries: Vec<Country> =
            serde_json::from_str(r#"[{"name":"Germany","code":"de"}]"#).unwrap();
        assert_eq!(countries[0].code, "de");
    }
}
