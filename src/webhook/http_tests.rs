//! Tests for HTTP request/response types and errors.

use std::time::Duration;

use super::{AttemptError, HttpError, HttpRequest, HttpResponse, WebhookError};

fn webhook_url() -> url::Url {
    url::Url::parse("https://example.webhook.office.com/webhookb2/abc").unwrap()
}

fn response_with_retry_after(value: &'static str) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::RETRY_AFTER,
        http::HeaderValue::from_static(value),
    );
    HttpResponse::new(http::StatusCode::TOO_MANY_REQUESTS, headers, vec![])
}

mod http_request {
    use super::*;

    #[test]
    fn post_creates_bare_request() {
        let req = HttpRequest::post(webhook_url());

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url, webhook_url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_json_body_sets_content_type() {
        let req = HttpRequest::post(webhook_url()).with_json_body(b"{}".to_vec());

        assert_eq!(req.body, Some(b"{}".to_vec()));
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let req = HttpRequest::post(webhook_url())
            .with_header(
                http::header::USER_AGENT,
                http::HeaderValue::from_static("first"),
            )
            .with_header(
                http::header::USER_AGENT,
                http::HeaderValue::from_static("second"),
            );

        assert_eq!(req.headers.get_all(http::header::USER_AGENT).iter().count(), 1);
        assert_eq!(req.headers.get(http::header::USER_AGENT).unwrap(), "second");
    }
}

mod http_response {
    use super::*;

    #[test]
    fn is_success_only_for_2xx() {
        let ok = HttpResponse::new(http::StatusCode::ACCEPTED, http::HeaderMap::new(), vec![]);
        let bad = HttpResponse::new(http::StatusCode::BAD_REQUEST, http::HeaderMap::new(), vec![]);

        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![0xFF, 0xFE]);
        assert!(resp.body_text().is_none());
    }

    #[test]
    fn retry_after_parses_integer_seconds() {
        let resp = response_with_retry_after("7");
        assert_eq!(resp.retry_after(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn retry_after_parses_fractional_seconds() {
        let resp = response_with_retry_after(" 1.5 ");
        assert_eq!(resp.retry_after(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn retry_after_ignores_http_dates_and_negatives() {
        assert_eq!(
            response_with_retry_after("Wed, 21 Oct 2015 07:28:00 GMT").retry_after(),
            None
        );
        assert_eq!(response_with_retry_after("-3").retry_after(), None);
    }

    #[test]
    fn retry_after_ignores_values_too_large_for_duration() {
        assert_eq!(
            response_with_retry_after("99999999999999999999").retry_after(),
            None
        );
        assert_eq!(response_with_retry_after("1e300").retry_after(), None);
        assert_eq!(response_with_retry_after("inf").retry_after(), None);
    }

    #[test]
    fn retry_after_absent_without_header() {
        let resp = HttpResponse::new(http::StatusCode::SERVICE_UNAVAILABLE, http::HeaderMap::new(), vec![]);
        assert_eq!(resp.retry_after(), None);
    }
}

mod errors {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("refused")));

        assert!(error.to_string().contains("Connection error"));
        assert!(error.source().unwrap().to_string().contains("refused"));
    }

    #[test]
    fn status_error_includes_body_when_present() {
        let error = AttemptError::NonSuccessStatus {
            status: http::StatusCode::BAD_REQUEST,
            body: Some("Summary or Text is required.".to_string()),
            retry_after: None,
        };

        assert_eq!(
            error.to_string(),
            "HTTP 400 Bad Request: Summary or Text is required."
        );
    }

    #[test]
    fn status_error_omits_empty_body() {
        let error = AttemptError::NonSuccessStatus {
            status: http::StatusCode::BAD_GATEWAY,
            body: Some(String::new()),
            retry_after: None,
        };

        assert_eq!(error.to_string(), "HTTP 502 Bad Gateway");
    }

    #[test]
    fn attempt_retry_after_only_for_status_errors() {
        let status = AttemptError::NonSuccessStatus {
            status: http::StatusCode::TOO_MANY_REQUESTS,
            body: None,
            retry_after: Some(Duration::from_secs(2)),
        };
        let transport = AttemptError::Http(HttpError::Timeout);

        assert_eq!(status.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(transport.retry_after(), None);
    }

    #[test]
    fn terminal_status_becomes_delivery_error() {
        let error: WebhookError = AttemptError::NonSuccessStatus {
            status: http::StatusCode::NOT_FOUND,
            body: None,
            retry_after: None,
        }
        .into();

        assert!(matches!(
            error,
            WebhookError::Delivery { status, body: None } if status == http::StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn transport_error_becomes_transport_variant() {
        let error: WebhookError = AttemptError::Http(HttpError::InvalidUrl("bad".into())).into();
        assert!(matches!(error, WebhookError::Transport(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn retries_exhausted_exposes_last_error_as_source() {
        let error = WebhookError::RetriesExhausted {
            attempts: 3,
            last_error: AttemptError::Http(HttpError::Timeout),
        };

        assert_eq!(
            error.to_string(),
            "Delivery failed after 3 attempts: Request timed out"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
        assert_send_sync::<AttemptError>();
        assert_send_sync::<WebhookError>();
    }
}
