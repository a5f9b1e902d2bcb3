//! teams-notify: Microsoft Teams webhook notifications
//!
//! A library for composing MessageCard payloads and delivering them to
//! Teams incoming webhooks, with URL validation, timeouts and retries.

pub mod card;
pub mod config;
pub mod format;
pub mod time;
pub mod webhook;
