//! SVG serialization of a [`Scene`]

use std::fmt::Write;

use super::scene::{NodeShape, Scene, TextShape};

impl Scene {
    /// Serialize to a standalone SVG document
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&self.background)
        );
        let _ = write!(svg, "<g transform=\"{}\">", self.transform.to_svg_attr());

        svg.push_str("<g class=\"links\">");
        for edge in &self.edges {
            let _ = write!(
                svg,
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                edge.path.to_svg_path(),
                escape_xml(&edge.stroke),
                edge.stroke_width
            );
        }
        svg.push_str("</g>");

        svg.push_str("<g class=\"nodes\">");
        for node in &self.nodes {
            write_node(&mut svg, node);
        }
        svg.push_str("</g>");

        let _ = write!(
            svg,
            "<g class=\"labels\" font-family=\"{}\">",
            escape_xml(&self.font_family)
        );
        for label in &self.labels {
            write_text(&mut svg, label);
        }
        svg.push_str("</g></g>");

        if let Some(overlay) = &self.overlay {
            let _ = write!(
                svg,
                "<text class=\"overlay\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"14\" fill=\"{}\">{}</text>",
                w / 2.0,
                h / 2.0,
                escape_xml(&self.font_family),
                escape_xml(&overlay.fill),
                escape_xml(&overlay.message)
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

fn write_node(svg: &mut String, node: &NodeShape) {
    let style = node.style();
    match node {
        NodeShape::Rect {
            index,
            x,
            y,
            width,
            height,
            rx,
            ..
        } => {
            let _ = write!(
                svg,
                "<rect data-index=\"{index}\" x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width}\" height=\"{height}\" rx=\"{rx}\" ry=\"{rx}\""
            );
        }
        NodeShape::Circle { index, cx, cy, r, .. } => {
            let _ = write!(
                svg,
                "<circle data-index=\"{index}\" cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r}\""
            );
        }
    }
    let _ = write!(
        svg,
        " fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&style.fill),
        escape_xml(&style.stroke),
        style.stroke_width
    );
}

fn write_text(svg: &mut String, label: &TextShape) {
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" font-size=\"{}\" fill=\"{}\"",
        label.x,
        label.y,
        label.anchor.as_str(),
        label.font_size,
        escape_xml(&label.fill)
    );
    if label.dy != 0.0 {
        let _ = write!(svg, " dy=\"{}em\"", label.dy);
    }
    if label.middle_baseline {
        svg.push_str(" dominant-baseline=\"middle\"");
    }
    let _ = write!(svg, ">{}</text>", escape_xml(&label.text));
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point, Size};
    use crate::render::scene::{NodeStyle, TextAnchor};

    #[test]
    fn test_empty_scene() {
        let svg = Scene::empty(Size::new(100.0, 50.0), "white").to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("fill=\"white\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut scene = Scene::empty(Size::default(), "white");
        scene.labels.push(TextShape {
            node: None,
            offset: Point::default(),
            x: 0.0,
            y: 0.0,
            text: "a < b & \"c\"".to_string(),
            anchor: TextAnchor::Start,
            font_size: 12.0,
            fill: "#000".to_string(),
            dy: 0.31,
            middle_baseline: false,
        });
        let svg = scene.to_svg();
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(svg.contains("dy=\"0.31em\""));
    }

    #[test]
    fn test_overlay_outside_transform() {
        let svg = Scene::error(Size::new(200.0, 100.0), "white", "Bad <payload>", "red").to_svg();
        let group_end = svg.rfind("</g>").unwrap();
        let overlay = svg.find("class=\"overlay\"").unwrap();
        assert!(overlay > group_end);
        assert!(svg.contains("Bad &lt;payload&gt;"));
    }

    #[test]
    fn test_layers_in_draw_order() {
        let mut scene = Scene::empty(Size::default(), "white");
        scene.nodes.push(NodeShape::Circle {
            index: 0,
            cx: 1.0,
            cy: 2.0,
            r: 5.0,
            style: NodeStyle {
                fill: "#555".to_string(),
                stroke: "#fff".to_string(),
                stroke_width: 1.5,
            },
        });
        let svg = scene.to_svg();
        let links = svg.find("class=\"links\"").unwrap();
        let nodes = svg.find("class=\"nodes\"").unwrap();
        let labels = svg.find("class=\"labels\"").unwrap();
        assert!(links < nodes && nodes < labels);
        assert!(svg.contains("<circle data-index=\"0\" cx=\"1.00\" cy=\"2.00\" r=\"5\""));
    }
}
