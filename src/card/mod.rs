//! MessageCard document model.
//!
//! This module provides the in-memory form of a Teams notification:
//! - The card itself ([`MessageCard`])
//! - Body sections with facts and images ([`Section`], [`Fact`], [`Image`])
//! - Buttons attached to a card or section ([`PotentialAction`])
//! - Construction-time validation errors ([`CardError`])
//!
//! Facts and images are validated when they are added, so a card that
//! exists never carries an empty fact or image field.

mod action;
mod error;
mod message;
mod section;


pub use action::{OpenUriTarget, PotentialAction};
pub use error::CardError;
pub use message::MessageCard;
pub use section::{Fact, Image, ImageBatch, ImageOutcome, Section};

/// Number of potential actions Teams renders per card or section.
///
/// Adding more only produces a warning; the platform decides what to drop.
pub const MAX_POTENTIAL_ACTIONS: usize = 4;
