//! Core error types for the visualization pipeline
//!
//! Every stage (model building, layout, scene building) reports failures
//! through [`VizError`]. The view controller decides which of them stay
//! in-canvas and which are plain "nothing to draw" signals.

use thiserror::Error;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, VizError>;

/// Error taxonomy for rendering a payload
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Invalid payload shape: {message}")]
    InvalidShape { message: String },

    #[error("Nothing to render")]
    EmptyInput,

    #[error("Payload decode error: {message}")]
    Decode { message: String },

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VizError {
    /// Create a new invalid-shape error
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    /// Create a new layout error
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for the "nothing to draw" signal, which is not a failure
    pub fn is_empty_input(&self) -> bool {
        matches!(self, VizError::EmptyInput)
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_error() {
        let error = VizError::invalid_shape("tree node 'a' has both value and children");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid payload shape"));
        assert!(error_msg.contains("both value and children"));
    }

    #[test]
    fn test_empty_input_is_not_a_failure() {
        let error = VizError::EmptyInput;
        assert!(error.is_empty_input());
        assert_eq!(error.to_string(), "Nothing to render");
    }

    #[test]
    fn test_layout_error() {
        let error = VizError::layout("non-finite x for node 3");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Layout error"));
        assert!(error_msg.contains("node 3"));
    }

    #[test]
    fn test_conversion_error_is_verbatim() {
        let error = VizError::conversion("expected value at line 1 column 1");
        assert_eq!(
            error.to_string(),
            "Conversion error: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: VizError = json_err.into();
        assert!(matches!(error, VizError::Decode { .. }));
        assert!(error.to_string().contains("Payload decode error"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: VizError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }
}
