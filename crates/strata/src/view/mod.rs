//! Host-facing view control
//!
//! [`ViewController`] owns the canvas scene and at most one active render
//! pass. Hosts feed it render requests, animation frames and pointer events.

mod controller;

pub use controller::*;

use crate::core::SourceFormat;

/// Turns raw source text into a JSON payload string
///
/// Implemented by hosts that accept formats other than the payload itself
/// (YAML files, fetched JSON documents, and so on).
pub trait Converter {
    fn convert(&self, source: &str, format: SourceFormat) -> anyhow::Result<String>;
}
