//! # API Client
//!
//! Shared HTTP plumbing for every backend call.
//!
//! ## Request Path
//! ```text
//! endpoint module (catalog / auth / admin)
//!        │  path from EndpointSettings
//!        ▼
//! endpoint_url() ── absolute? use as is : base_url.join(path)
//!        │
//!        ▼
//! + query params + session_id=<token> (when signed in)
//!        │
//!        ▼
//! reqwest (configured timeout) ──► read_body()
//!                                   2xx  → JSON value (empty body = null)
//!                                   else → HttpStatus { status, error|message }
//! ```

use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::{ClientConfig, EndpointSettings};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Longest slice of a non-JSON error body kept in an error message.
const ERROR_BODY_PREVIEW: usize = 200;

/// HTTP client for the PesaTrack backends.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: Client,
    base_url: Url,
    endpoints: EndpointSettings,
    session: SessionStore,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// The timeout applies to the whole request, connect through body.
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(ApiClient {
            http,
            base_url: config.base_url()?,
            endpoints: config.endpoints.clone(),
            session,
        })
    }

    pub fn endpoints(&self) -> &EndpointSettings {
        &self.endpoints
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL. Absolute URLs are
    /// taken as they are.
    pub fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Endpoint URL with query parameters and the session id.
    pub(crate) async fn request_url(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<Url> {
        let mut url = self.endpoint_url(path)?;
        let token = self.session.current().await;

        if !query.is_empty() || token.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(token) = &token {
                pairs.append_pair("session_id", token);
            }
        }

        Ok(url)
    }

    /// GET and parse a JSON body.
    pub(crate) async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Value> {
        let url = self.request_url(path, query).await?;
        debug!(url = %redact(&url), "GET");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            error!(url = %redact(&url), error = %e, "GET failed");
            ClientError::from(e)
        })?;
        read_body(response).await
    }

    /// GET for list endpoints: a 200 whose body is not JSON (a PHP warning
    /// page, say) reads as `Null`, which callers treat as an empty list.
    /// Transport and status errors still propagate.
    pub(crate) async fn get_list_json(&self, path: &str) -> ClientResult<Value> {
        match self.get_json(path, &[]).await {
            Err(ClientError::InvalidResponse(reason)) => {
                warn!(path, reason = %reason, "List response is not JSON, treating as empty");
                Ok(Value::Null)
            }
            other => other,
        }
    }

    /// POST a JSON body (or nothing) and parse the JSON reply.
    pub(crate) async fn post_json<B>(&self, path: &str, body: Option<&B>) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.request_url(path, &[]).await?;
        debug!(url = %redact(&url), "POST");

        let mut request = self.http.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(url = %redact(&url), error = %e, "POST failed");
            ClientError::from(e)
        })?;
        read_body(response).await
    }
}

/// Turns a response into JSON, or an error carrying the backend's message.
async fn read_body(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| {
                ["error", "message"]
                    .iter()
                    .find_map(|k| body.get(*k).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| {
                let preview: String = text.trim().chars().take(ERROR_BODY_PREVIEW).collect();
                if preview.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    preview
                }
            });

        error!(status = status.as_u16(), message = %message, "Backend returned an error");
        return Err(ClientError::HttpStatus {
            status: status.as_u16(),
            message,
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| {
        error!(error = %e, "Backend sent a body that is not JSON");
        ClientError::InvalidResponse(e.to_string())
    })
}

/// The URL with its session id masked, for logs.
fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "session_id") {
        return url.to_string();
    }

    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "session_id" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let mut config = ClientConfig::default();
        config.api.base_url = base.to_string();
        ApiClient::new(&config, SessionStore::new("/nonexistent/session_token")).unwrap()
    }

    #[test]
    fn test_relative_paths_join_under_base() {
        let api = client("http://192.168.100.20/payment");
        assert_eq!(
            api.endpoint_url("admin/dashboard_cal.php").unwrap().as_str(),
            "http://192.168.100.20/payment/admin/dashboard_cal.php"
        );
        assert_eq!(
            api.endpoint_url("/fetch_products.php").unwrap().as_str(),
            "http://192.168.100.20/payment/fetch_products.php"
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let api = client("http://localhost:5000/");
        assert_eq!(
            api.endpoint_url("https://reports.example.com/monthly").unwrap().as_str(),
            "https://reports.example.com/monthly"
        );
    }

    #[tokio::test]
    async fn test_query_without_session() {
        let api = client("http://localhost:5000/");
        let url = api
            .request_url("admin/monthly_sales.php", &[("month", "September")])
            .await
            .unwrap();
        assert_eq!(url.query(), Some("month=September"));

        let bare = api.request_url("products", &[]).await.unwrap();
        assert_eq!(bare.query(), None);
    }

    #[tokio::test]
    async fn test_session_id_is_appended_and_redacted() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(dir.path().join("session_token"));
        session.store("tok-123").await.unwrap();

        let api = ApiClient::new(&ClientConfig::default(), session).unwrap();
        let url = api.request_url("recent-sales", &[]).await.unwrap();
        assert_eq!(url.query(), Some("session_id=tok-123"));
        assert!(!redact(&url).contains("tok-123"));
    }
}
