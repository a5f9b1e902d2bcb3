//! Webhook layer for delivering cards to Teams.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP transports ([`HttpClient`])
//! - Production HTTP transport ([`ReqwestClient`])
//! - Card delivery with validation and retries ([`WebhookSender`], [`TeamsClient`])
//! - Client settings ([`ClientConfig`], [`WebhookUrlPolicy`], [`RetryPolicy`])

mod client;
mod error;
mod http;
mod options;
mod retry;
mod sender;
mod validation;

#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::{AttemptError, HttpError, UrlValidationError, WebhookError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use options::{ClientConfig, DEFAULT_USER_AGENT};
pub use retry::RetryPolicy;
pub use sender::{EXPECTED_RESPONSE_TEXT, IsRetryable, TeamsClient, WebhookSender};
pub use validation::{DEFAULT_URL_PATTERNS, DEFAULT_URL_PREFIXES, WebhookUrlPolicy};
