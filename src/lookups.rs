//! Static lookup lists for the form selects.
//!
//! The countries and categories lists are small JSON documents. They are
//! fetched over HTTP when the source is an `http(s)` URL and read from disk
//! otherwise.

use crate::http::{HttpClient, HttpError};
use crate::models::Country;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use tokio::fs;
use tracing::{info, instrument};

/// Failure loading a lookup list.
#[derive(Debug)]
pub enum LookupError {
    Http(HttpError),
    Io { path: String, source: std::io::Error },
    Parse { path: String, source: serde_json::Error },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Http(e) => write!(f, "{e}"),
            LookupError::Io { path, source } => write!(f, "Error. Could not read {path}: {source}"),
            LookupError::Parse { path, source } => {
                write!(f, "Error. Malformed lookup {path}: {source}")
            }
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LookupError::Http(e) => Some(e),
            LookupError::Io { source, .. } => Some(source),
            LookupError::Parse { source, .. } => Some(source),
        }
    }
}

impl From<HttpError> for LookupError {
    fn from(e: HttpError) -> Self {
        LookupError::Http(e)
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn load<T: DeserializeOwned>(http: &HttpClient, source: &str) -> Result<T, LookupError> {
    if is_remote(source) {
        return Ok(http.get(source).await?);
    }
    let text = fs::read_to_string(source)
        .await
        .map_err(|e| LookupError::Io {
            path: source.to_string(),
            source: e,
        })?;
    serde_json::from_str(&text).map_err(|e| LookupError::Parse {
        path: source.to_string(),
        source: e,
    })
}

/// Load the countries list, keeping the first entry for each code.
#[instrument(level = "info", skip(http))]
pub async fn load_countries(http: &HttpClient, source: &str) -> Result<Vec<Country>, LookupError> {
    let countries: Vec<Country> = load(http, source).await?;
    let countries: Vec<Country> = countries
        .into_iter()
        .unique_by(|c| c.code.clone())
        .collect();
    info!(count = countries.len(), "Loaded countries");
    Ok(countries)
}

/// Load the categories list, dropping duplicates.
#[instrument(level = "info", skip(http))]
pub async fn load_categories(http: &HttpClient, source: &str) -> Result<Vec<String>, LookupError> {
    let categories: Vec<String> = load(http, source).await?;
    let categories: Vec<String> = categories.into_iter().unique().collect();
    info!(count = categories.len(), "Loaded categories");
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_server::{client, serve_once};
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "news_dashboard_lookups_{}_{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_countries_from_file_dedupes() {
        let path = temp_file(
            "countries.json",
            r#"[{"name":"Germany","code":"de"},{"name":"France","code":"fr"},{"name":"Deutschland","code":"de"}]"#,
        );
        let countries = load_countries(&client(), path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "Germany");
        assert_eq!(countries[1].code, "fr");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_load_categories_from_http() {
        let (base, _rx) = serve_once("200 OK", r#"["business","sports","business"]"#).await;
        let categories = load_categories(&client(), &format!("{base}/categories.json"))
            .await
            .unwrap();
        assert_eq!(categories, vec!["business", "sports"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_categories(&client(), "/definitely/not/here.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
        assert!(err.to_string().starts_with("Error. Could not read"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let path = temp_file("broken.json", "[\"business\",");
        let err = load_categories(&client(), path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Parse { .. }));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_http_status_error_passes_through() {
        let (base, _rx) = serve_once("404 Not Found", "{}").await;
        let err = load_countries(&client(), &base).await.unwrap_err();
        assert_eq!(err.to_string(), "Error. Status code: 404");
    }
}
