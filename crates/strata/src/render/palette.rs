//! Node colors
//!
//! One lookup table from label to color. Labels that miss the table fall
//! back to the class of the node's value for leaves and to the default
//! entry for everything else.

use std::collections::HashMap;

use crate::core::ValueClass;

const DEFAULT_COLOR: &str = "#34495e";
const ROOT_COLOR: &str = "#2c3e50";

const LABEL_COLORS: &[(&str, &str)] = &[
    ("Object", "#2c3e50"),
    ("Array", "#2980b9"),
    ("Key", "#27ae60"),
    ("Index", "#8e44ad"),
    ("String", "#16a085"),
    ("Number", "#e74c3c"),
    ("Boolean", "#f39c12"),
    ("Null", "#7f8c8d"),
    ("Value", DEFAULT_COLOR),
];

/// Label-to-color table
#[derive(Debug, Clone)]
pub struct Palette {
    labels: HashMap<String, String>,
    default: String,
    root: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            labels: LABEL_COLORS
                .iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
            default: DEFAULT_COLOR.to_string(),
            root: ROOT_COLOR.to_string(),
        }
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table entry
    pub fn with_label(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.labels.insert(label.into(), color.into());
        self
    }

    /// Table entry for a label, if any
    pub fn label_color(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    /// Color for a value class
    pub fn class_color(&self, class: ValueClass) -> &str {
        self.label_color(&class.to_string()).unwrap_or(&self.default)
    }

    /// Fill for a node
    pub fn color_for(&self, label: &str, value: &str, is_leaf: bool, is_root: bool) -> &str {
        if is_root {
            return &self.root;
        }
        if let Some(color) = self.label_color(label) {
            return color;
        }
        if is_leaf {
            return self.class_color(ValueClass::classify(value));
        }
        &self.default
    }
}
