//! Engine configuration
//!
//! Every section has a `Default` matching the stock look of the viewer and can
//! be partially overridden from JSON; missing keys keep their defaults.
//!
//! ```rust
//! use strata::core::VizConfig;
//!
//! let config = VizConfig::from_json_str(r#"{ "force": { "charge_strength": -500 } }"#).unwrap();
//! assert_eq!(config.force.charge_strength, -500.0);
//! assert_eq!(config.force.link_distance, 70.0);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Result, VizError};

/// Model builder options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Reject payloads whose links name missing nodes instead of dropping them
    pub strict_links: bool,
}

/// Depth-column layout options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Horizontal gap between depth columns
    pub h_spacing: f64,
    /// Vertical gap between boxes in one column
    pub v_spacing: f64,
    /// x of the depth-0 column
    pub origin_x: f64,
}

impl Default for ColumnLayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 40.0,
            h_spacing: 80.0,
            v_spacing: 30.0,
            origin_x: 50.0,
        }
    }
}

/// Tree layout options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLayoutConfig {
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Separation between siblings, in breadth units
    pub sibling_separation: f64,
    /// Separation between adjacent nodes of different parents
    pub cousin_separation: f64,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            margin_top: 20.0,
            margin_right: 120.0,
            margin_bottom: 20.0,
            margin_left: 120.0,
            sibling_separation: 1.0,
            cousin_separation: 2.0,
        }
    }
}

/// Force simulation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub link_distance: f64,
    pub link_strength: f64,
    /// Negative values repel
    pub charge_strength: f64,
    /// Barnes–Hut opening criterion
    pub theta: f64,
    pub distance_min: f64,
    pub center_strength: f64,
    pub leaf_radius: f64,
    pub composite_radius: f64,
    /// Collision radius as a multiple of the node radius
    pub collision_scale: f64,
    pub collision_strength: f64,
    pub collision_iterations: usize,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub velocity_decay: f64,
    /// Alpha target while a node is dragged
    pub drag_alpha_target: f64,
    /// Upper bound on ticks when running to rest
    pub max_ticks: usize,
    /// Seed for coincident-point jiggle
    pub seed: u32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            link_distance: 70.0,
            link_strength: 0.7,
            charge_strength: -300.0,
            theta: 0.9,
            distance_min: 1.0,
            center_strength: 0.05,
            leaf_radius: 6.0,
            composite_radius: 10.0,
            collision_scale: 1.5,
            collision_strength: 1.0,
            collision_iterations: 1,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
            max_ticks: 600,
            seed: 1,
        }
    }
}

impl ForceConfig {
    /// Drawn radius of a node
    pub fn node_radius(&self, is_leaf: bool) -> f64 {
        if is_leaf {
            self.leaf_radius
        } else {
            self.composite_radius
        }
    }

    /// Collision radius of a node
    pub fn collision_radius(&self, is_leaf: bool) -> f64 {
        self.node_radius(is_leaf) * self.collision_scale
    }
}

/// Scene and interaction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Labels wider than this many columns are truncated with an ellipsis
    pub max_label_width: usize,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor applied per wheel notch
    pub zoom_step: f64,
    pub tree_node_radius: f64,
    pub stroke_width: f64,
    pub hover_stroke_width: f64,
    pub font_family: String,
    pub font_size: f64,
    /// Extra label-to-fill entries layered over the stock palette
    pub label_colors: BTreeMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_label_width: 20,
            min_zoom: 0.1,
            max_zoom: 4.0,
            zoom_step: 1.1,
            tree_node_radius: 5.0,
            stroke_width: 1.5,
            hover_stroke_width: 3.0,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12.0,
            label_colors: BTreeMap::new(),
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub builder: BuilderConfig,
    pub columns: ColumnLayoutConfig,
    pub tree: TreeLayoutConfig,
    pub force: ForceConfig,
    pub render: RenderConfig,
}

impl VizConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: VizConfig =
            serde_json::from_str(json).map_err(|e| VizError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values no layout can work with
    pub fn validate(&self) -> Result<()> {
        let c = &self.columns;
        if c.node_width <= 0.0 || c.node_height <= 0.0 {
            return Err(VizError::config("column node size must be positive"));
        }
        if c.h_spacing < 0.0 || c.v_spacing < 0.0 {
            return Err(VizError::config("column spacing must not be negative"));
        }
        let t = &self.tree;
        if t.sibling_separation <= 0.0 || t.cousin_separation <= 0.0 {
            return Err(VizError::config("tree separation must be positive"));
        }
        let f = &self.force;
        if !(f.alpha_min > 0.0 && f.alpha_min <= 1.0) {
            return Err(VizError::config("alpha_min must be in (0, 1]"));
        }
        if !(f.alpha_decay > 0.0 && f.alpha_decay <= 1.0) {
            return Err(VizError::config("alpha_decay must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&f.velocity_decay) {
            return Err(VizError::config("velocity_decay must be in [0, 1]"));
        }
        if f.leaf_radius <= 0.0 || f.composite_radius <= 0.0 {
            return Err(VizError::config("node radii must be positive"));
        }
        if f.theta <= 0.0 {
            return Err(VizError::config("theta must be positive"));
        }
        let r = &self.render;
        if !(r.min_zoom > 0.0 && r.min_zoom <= r.max_zoom) {
            return Err(VizError::config("zoom bounds must satisfy 0 < min <= max"));
        }
        if r.zoom_step <= 1.0 {
            return Err(VizError::config("zoom_step must be greater than 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(VizConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_alpha_decay_reaches_min_in_300_ticks() {
        let f = ForceConfig::default();
        let alpha = (1.0 - f.alpha_decay).powi(300);
        assert!((alpha - f.alpha_min).abs() < 1e-9);
    }

    #[test]
    fn test_partial_override() {
        let config =
            VizConfig::from_json_str(r#"{ "columns": { "node_width": 200 }, "render": { "max_zoom": 8 } }"#)
                .unwrap();
        assert_eq!(config.columns.node_width, 200.0);
        assert_eq!(config.columns.node_height, 40.0);
        assert_eq!(config.render.max_zoom, 8.0);
    }

    #[test]
    fn test_rejects_inverted_zoom_bounds() {
        let err = VizConfig::from_json_str(r#"{ "render": { "min_zoom": 5, "max_zoom": 2 } }"#)
            .unwrap_err();
        assert!(matches!(err, VizError::Config { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(VizConfig::from_json_str("{ nope").is_err());
    }

    #[test]
    fn test_collision_radius() {
        let f = ForceConfig::default();
        assert_eq!(f.collision_radius(true), 9.0);
        assert_eq!(f.collision_radius(false), 15.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz.json");
        std::fs::write(&path, r#"{ "builder": { "strict_links": true } }"#).unwrap();
        let config = VizConfig::load(&path).unwrap();
        assert!(config.builder.strict_links);
    }
}
