//! Light and dark color sets

use crate::core::ThemeKind;

/// Colors used by the scene builder
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: &'static str,
    /// Tree and force links
    pub link: &'static str,
    /// Column view links
    pub column_link: &'static str,
    /// Column view box outline
    pub box_stroke: &'static str,
    /// Text inside column boxes
    pub box_text: &'static str,
    pub tree_internal_fill: &'static str,
    pub tree_leaf_fill: &'static str,
    pub tree_stroke: &'static str,
    pub hover: &'static str,
    pub text: &'static str,
    pub value_text: &'static str,
    pub error_text: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: "white",
            link: "#ccc",
            column_link: "#555",
            box_stroke: "#444",
            box_text: "white",
            tree_internal_fill: "#555",
            tree_leaf_fill: "#999",
            tree_stroke: "#fff",
            hover: "#66a3ff",
            text: "#000",
            value_text: "#555",
            error_text: "#c0392b",
        }
    }

    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            background: "#1e1e1e",
            link: "#666",
            column_link: "#555",
            box_stroke: "#444",
            box_text: "white",
            tree_internal_fill: "#ddd",
            tree_leaf_fill: "#fff",
            tree_stroke: "#555",
            hover: "#8ab4f8",
            text: "#fff",
            value_text: "#fff",
            error_text: "#ff6b6b",
        }
    }

    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl From<ThemeKind> for Theme {
    fn from(kind: ThemeKind) -> Self {
        Self::from_kind(kind)
    }
}
