//! Core abstractions shared by every stage of the pipeline
//!
//! Errors, configuration, geometry, text helpers and the small enums that
//! select views and themes.

mod config;
mod error;
mod geometry;
pub mod logging;
mod text;
mod types;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use logging::*;
pub use text::*;
pub use types::*;
