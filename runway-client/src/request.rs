//! Request primitive shared by every endpoint wrapper

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use runway_core::dto::{ListEnvelope, Paginated, QueryParams, ToQuery};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ApiClient;
use crate::error::{ClientError, Result};

/// Per-request options for [`ApiClient::request`]
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters; absent filter values never get here
    pub query: QueryParams,
    /// Extra headers, applied last so they override the defaults
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: &impl ToQuery) -> Self {
        self.query = query.to_query();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body
    pub fn with_json(mut self, body: &impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to encode request body: {}", e))
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

impl ApiClient {
    /// Sends one request and decodes the response
    ///
    /// Returns `Ok(None)` for 204 and for any empty 2xx body. Non-2xx
    /// responses become [`ClientError::Api`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>> {
        let url = self.url(path);
        let headers = self.headers(&options.headers)?;

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(options.query.pairs());
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status, &body));
        }

        if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ClientError::Decode {
                status: status.as_u16(),
                message: format!("Failed to parse JSON response from {}: {}", path, e),
            })
    }

    /// Default headers, then auth, then caller headers
    fn headers(&self, extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ClientError::InvalidRequest("token contains invalid header characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ClientError::InvalidRequest(format!("invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ClientError::InvalidRequest(format!("invalid value for header '{}'", name))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// GET a single resource
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.request(Method::GET, path, RequestOptions::new()).await?;
        required(value, path)
    }

    /// GET a list endpoint, accepting a bare array or `{data, meta}`
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl ToQuery,
    ) -> Result<Paginated<T>> {
        let options = RequestOptions::new().with_query(query);
        let envelope: Option<ListEnvelope<T>> = self.request(Method::GET, path, options).await?;
        Ok(required(envelope, path)?.into())
    }

    /// Sends a JSON body and decodes the resource returned
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let options = RequestOptions::new().with_json(body)?;
        let value = self.request(method, path, options).await?;
        required(value, path)
    }

    /// Sends a request whose response body, if any, is ignored
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.request::<serde::de::IgnoredAny>(method, path, RequestOptions::new())
            .await?;
        Ok(())
    }
}

fn required<T>(value: Option<T>, path: &str) -> Result<T> {
    value.ok_or_else(|| ClientError::Decode {
        status: StatusCode::NO_CONTENT.as_u16(),
        message: format!("Expected a response body from {}", path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let query: QueryParams = [("page", Some(2))].into_iter().collect();
        let options = RequestOptions::new()
            .with_query(&query)
            .with_header("X-Request-Id", "42")
            .with_json(&serde_json::json!({"branch": "main"}))
            .unwrap();

        assert_eq!(options.query.get("page"), Some("2"));
        assert_eq!(options.headers, vec![("X-Request-Id".to_string(), "42".to_string())]);
        assert_eq!(options.body.unwrap()["branch"], "main");
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let mut client = ApiClient::new("http://localhost:8000/api");
        client.set_token(Some("t0k".to_string()));

        let headers = client
            .headers(&[("Content-Type".to_string(), "text/plain".to_string())])
            .unwrap();

        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[AUTHORIZATION], "Bearer t0k");
    }

    #[test]
    fn test_no_auth_header_without_token() {
        let client = ApiClient::new("http://localhost:8000/api");
        let headers = client.headers(&[]).unwrap();
        assert!(!headers.contains_key(AUTHORIZATION));
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let client = ApiClient::new("http://localhost:8000/api");
        let err = client
            .headers(&[("bad header".to_string(), "x".to_string())])
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }
}
