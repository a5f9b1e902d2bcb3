//! HTTP request/response types and the transport trait.

use std::time::Duration;

use super::HttpError;

/// An HTTP request to be sent to a webhook.
///
/// A plain value built by [`TeamsClient`](super::TeamsClient) and passed to
/// any [`HttpClient`] implementation. Uses the `http` crate types for method
/// and headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a POST request to the given URL with no headers and no body.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self {
            method: http::Method::POST,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Sets a JSON body and the matching `Content-Type` header.
    #[must_use]
    pub fn with_json_body(mut self, body: Vec<u8>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// An HTTP response received from a webhook.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns the delay requested by a `Retry-After` header.
    ///
    /// Only the delay-seconds form is understood (integer or fractional);
    /// HTTP-date values, negative numbers and values too large for a
    /// [`Duration`] are ignored.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self
            .headers
            .get(http::header::RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim();

        let secs = value.parse::<f64>().ok()?;
        Duration::try_from_secs_f64(secs).ok()
    }
}

/// Transport used to deliver webhook requests.
///
/// Abstracting the HTTP library keeps [`TeamsClient`](super::TeamsClient)
/// testable with mock transports and lets callers bring their own client.
///
/// # Example
///
/// ```ignore
/// use teams_notify::webhook::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct AlwaysOk;
///
/// impl HttpClient for AlwaysOk {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), b"1".to_vec()))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
