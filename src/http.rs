//! JSON-over-HTTP client with a single-result request contract.
//!
//! Every request performs one network round trip and resolves exactly once,
//! either to the parsed JSON body or to an [`HttpError`]. There is no retry
//! and no cancellation; the only timeout is the optional one given to
//! [`HttpClient::new`].
//!
//! # Outcome Mapping
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | 2xx with valid JSON | `Ok(body)` |
//! | non-2xx status | [`HttpError::Status`] carrying the [`RawResponse`] |
//! | connection, TLS, timeout or request-building failure | [`HttpError::Transport`] |
//! | 2xx with malformed JSON | [`HttpError::Decode`] |

use crate::utils::{looks_truncated, redact_query_param, truncate_for_log};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Query parameters whose values never reach a log line.
const REDACTED_PARAMS: &[&str] = &["apiKey"];

/// The raw transport object of a failed response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Failure outcome of a request. `Display` renders the user-visible message.
#[derive(Debug)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    Status { raw: RawResponse },
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The request body could not be serialized.
    Encode(serde_json::Error),
    /// A 2xx response whose body is not the expected JSON.
    Decode {
        source: serde_json::Error,
        body: String,
    },
}

impl HttpError {
    /// The raw response for status failures.
    pub fn raw(&self) -> Option<&RawResponse> {
        match self {
            HttpError::Status { raw } => Some(raw),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Status { raw } => Some(raw.status),
            HttpError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// `true` when a 2xx body was cut off mid-document.
    pub fn is_truncated(&self) -> bool {
        matches!(self, HttpError::Decode { source, .. } if looks_truncated(source))
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Status { raw } => write!(f, "Error. Status code: {}", raw.status.as_u16()),
            HttpError::Transport(e) => write!(f, "Error. Network failure: {e}"),
            HttpError::Encode(e) => write!(f, "Error. Could not encode request body: {e}"),
            HttpError::Decode { source, .. } => {
                write!(f, "Error. Malformed response body: {source}")
            }
        }
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HttpError::Status { .. } => None,
            HttpError::Transport(e) => Some(e),
            HttpError::Encode(e) => Some(e),
            HttpError::Decode { source, .. } => Some(source),
        }
    }
}

/// Thin wrapper over [`reqwest::Client`] that normalizes outcomes.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build a client. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::Transport)?;
        Ok(Self { client })
    }

    /// Wrap an already configured [`reqwest::Client`].
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// `GET` a URL and parse its JSON body.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.get_with_headers(url, &[]).await
    }

    /// `GET` a URL with extra request headers and parse its JSON body.
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, HttpError> {
        let request = with_headers(self.client.get(url), headers);
        self.dispatch(Method::GET, url, request).await
    }

    /// `POST` a JSON body with extra request headers and parse the JSON reply.
    pub async fn post<B, T>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(HttpError::Encode)?;
        let mut request = self.client.post(url).body(payload);
        // A caller-supplied content type replaces the JSON default.
        if !headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
        {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        let request = with_headers(request, headers);
        self.dispatch(Method::POST, url, request).await
    }

    #[instrument(level = "debug", skip_all, fields(%method))]
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, HttpError> {
        let t0 = Instant::now();
        let shown_url = REDACTED_PARAMS
            .iter()
            .fold(url.to_string(), |u, p| redact_query_param(&u, p));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %shown_url, error = %e, "Request failed before a response arrived");
                return Err(HttpError::Transport(e));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(HttpError::Transport)?;
        let elapsed_ms = t0.elapsed().as_millis();

        if !status.is_success() {
            warn!(
                url = %shown_url,
                status = status.as_u16(),
                elapsed_ms,
                body_preview = %truncate_for_log(&body, 300),
                "Request returned non-success status"
            );
            return Err(HttpError::Status {
                raw: RawResponse {
                    status,
                    headers,
                    body,
                },
            });
        }

        debug!(url = %shown_url, status = status.as_u16(), elapsed_ms, bytes = body.len(), "Request completed");

        let parsed = serde_json::from_str::<T>(&body);
        match parsed {
            Ok(value) => Ok(value),
            Err(source) => {
                warn!(
                    url = %shown_url,
                    error = %source,
                    truncated = looks_truncated(&source),
                    body_preview = %truncate_for_log(&body, 300),
                    "Response body is not the expected JSON"
                );
                Err(HttpError::Decode { source, body })
            }
        }
    }
}

fn with_headers(mut request: RequestBuilder, headers: &[(&str, &str)]) -> RequestBuilder {
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    request
}


#[cfg(test)]
mod tests {
    use super::test_server::{client, serve_once};
    use super::*;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_get_success_returns_parsed_body() {
        let (base, _rx) = serve_once("200 OK", r#"{"status":"ok","articles":[]}"#).await;
        let body: Value = client().get(&format!("{base}/top-headlines")).await.unwrap();
        assert_eq!(body, json!({"status": "ok", "articles": []}));
    }

    #[tokio::test]
    async fn test_get_non_success_carries_raw_response() {
        let (base, _rx) = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","code":"apiKeyInvalid"}"#,
        )
        .await;
        let err = client().get::<Value>(&base).await.unwrap_err();

        assert_eq!(err.to_string(), "Error. Status code: 401");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        let raw = err.raw().expect("status errors keep the raw response");
        assert!(raw.body.contains("apiKeyInvalid"));
        assert_eq!(
            raw.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_get_malformed_json_is_decode_error() {
        let (base, _rx) = serve_once("200 OK", r#"{"status":"ok","articles":["#).await;
        let err = client().get::<Value>(&base).await.unwrap_err();

        assert!(matches!(err, HttpError::Decode { .. }));
        assert!(err.raw().is_none());
        assert!(err.is_truncated());
        assert!(err.to_string().starts_with("Error. Malformed response body"));
    }

    #[tokio::test]
    async fn test_get_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client()
            .get::<Value>(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Transport(_)));
        assert!(err.to_string().starts_with("Error. Network failure"));
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_invalid_url_is_transport_error() {
        let err = client().get::<Value>("not a url").await.unwrap_err();
        assert!(matches!(err, HttpError::Transport(_)));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_headers() {
        let (base, rx) = serve_once("201 Created", r#"{"id":7}"#).await;
        let reply: Value = client()
            .post(
                &format!("{base}/items"),
                &json!({"title": "hello"}),
                &[("X-Api-Key", "k-123")],
            )
            .await
            .unwrap();
        assert_eq!(reply["id"], 7);

        let request = rx.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /items"));
        assert!(lower.contains("x-api-key: k-123"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"title":"hello"}"#));
    }

    #[tokio::test]
    async fn test_post_caller_content_type_sent_once() {
        let (base, rx) = serve_once("200 OK", "{}").await;
        let _: Value = client()
            .post(
                &base,
                &json!({"title": "hello"}),
                &[("Content-Type", "application/vnd.api+json")],
            )
            .await
            .unwrap();

        let lower = rx.await.unwrap().to_ascii_lowercase();
        let content_types: Vec<_> = lower
            .lines()
            .filter(|line| line.starts_with("content-type:"))
            .collect();
        assert_eq!(content_types, vec!["content-type: application/vnd.api+json"]);
    }

    #[tokio::test]
    async fn test_get_with_headers_sends_headers() {
        let (base, rx) = serve_once("200 OK", "[]").await;
        let _: Vec<Value> = client()
            .get_with_headers(&base, &[("X-Api-Key", "abc")])
            .await
            .unwrap();
        let request = rx.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get / "));
        assert!(request.contains("x-api-key: abc"));
    }
}
