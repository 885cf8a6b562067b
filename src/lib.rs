//! Outfit Finder: upload a photo with a gender and an occasion, receive a
//! styling recommendation from the prediction service, and get retailer
//! search links for every recommended piece.
//!
//! The flow runs one way, with a reset back to the start from any point:
//! [`input`] validates the photo, [`controller`] submits it through a
//! [`client::PredictionService`], [`render`] fills the [`page`] and
//! [`shopping`] turns recommended items into search links.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod models;
pub mod page;
pub mod render;
pub mod retailers;
pub mod shopping;
pub mod style_finder;
pub mod traits;

pub use controller::{Completion, SubmissionController, SubmissionState};
pub use error::{StyleError, ValidationError};
pub use style_finder::{Effect, StyleFinder, UiEvent};
