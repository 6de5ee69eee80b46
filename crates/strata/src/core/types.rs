//! Core type definitions shared across the pipeline
//!
//! View selection, theme selection, source formats and the semantic node
//! classes used for coloring.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which renderer (and layout engine) a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Horizontal hierarchical tree (Reingold–Tilford layout)
    #[default]
    Tree,
    /// Graph drawn as depth columns with curved links
    Columns,
    /// Free force-directed graph
    Force,
}

impl ViewKind {
    /// Parse a view name (`tree`, `columns`/`graph`, `force`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tree" => Some(ViewKind::Tree),
            "columns" | "column" | "graph" => Some(ViewKind::Columns),
            "force" => Some(ViewKind::Force),
            _ => None,
        }
    }

    /// Returns true if node positions come from a live simulation
    pub fn is_animated(&self) -> bool {
        matches!(self, ViewKind::Force)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Tree => write!(f, "tree"),
            ViewKind::Columns => write!(f, "columns"),
            ViewKind::Force => write!(f, "force"),
        }
    }
}

/// Light or dark presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    /// Parse a theme name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(ThemeKind::Light),
            "dark" => Some(ThemeKind::Dark),
            _ => None,
        }
    }

    /// Returns true for the dark theme
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeKind::Dark)
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeKind::Light => write!(f, "light"),
            ThemeKind::Dark => write!(f, "dark"),
        }
    }
}

/// Declared format of source text handed to a converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Yaml,
    Xml,
    Csv,
}

impl SourceFormat {
    /// Parse a format name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "xml" => Some(SourceFormat::Xml),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Yaml => write!(f, "yaml"),
            SourceFormat::Xml => write!(f, "xml"),
            SourceFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Semantic class of a value, used when a label tag is not in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// Value carries surrounding quotes
    Text,
    Number,
    Boolean,
    Null,
    /// Anything else
    Other,
}

impl ValueClass {
    /// Classify a display value the way the converters format scalars
    pub fn classify(value: &str) -> Self {
        let trimmed = value.trim();
        if crate::core::looks_quoted(trimmed) {
            ValueClass::Text
        } else if trimmed == "null" {
            ValueClass::Null
        } else if trimmed == "true" || trimmed == "false" {
            ValueClass::Boolean
        } else if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
            ValueClass::Number
        } else {
            ValueClass::Other
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueClass::Text => write!(f, "String"),
            ValueClass::Number => write!(f, "Number"),
            ValueClass::Boolean => write!(f, "Boolean"),
            ValueClass::Null => write!(f, "Null"),
            ValueClass::Other => write!(f, "Value"),
        }
    }
}
