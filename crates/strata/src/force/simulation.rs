//! Force simulation state and the per-tick integration step

use tracing::{debug, trace};

use super::collide;
use super::quadtree::ChargeTree;
use super::random::Lcg;
use crate::core::{EdgePath, ForceConfig, Point, Size};
use crate::layout::{Anchor, LayoutResult, PositionedEdge, PositionedNode};
use crate::model::RenderModel;

const INITIAL_RADIUS: f64 = 10.0;

/// Position, velocity and pin of one simulated node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimNode {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl SimNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Link {
    source: usize,
    target: usize,
    /// Share of the correction applied to the target
    bias: f64,
}

/// A running force simulation over one model
#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<Link>,
    radii: Vec<f64>,
    collision_radii: Vec<f64>,
    charges: Vec<f64>,
    center: Point,
    alpha: f64,
    alpha_target: f64,
    ticks: usize,
    rng: Lcg,
    config: ForceConfig,
}

impl Simulation {
    /// Seed a simulation on a phyllotaxis spiral around the canvas center
    pub fn new(model: &RenderModel, size: Size, config: ForceConfig) -> Self {
        let center = size.center();
        let angle_step = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        let nodes = (0..model.node_count())
            .map(|i| {
                let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                let angle = i as f64 * angle_step;
                SimNode {
                    x: center.x + radius * angle.cos(),
                    y: center.y + radius * angle.sin(),
                    ..SimNode::default()
                }
            })
            .collect();

        let degrees = model.degrees();
        let links = model
            .edges()
            .map(|e| Link {
                source: e.source,
                target: e.target,
                bias: degrees[e.source] as f64
                    / (degrees[e.source] + degrees[e.target]) as f64,
            })
            .collect();

        let radii: Vec<f64> = model.nodes().map(|n| config.node_radius(n.is_leaf)).collect();
        let collision_radii = model
            .nodes()
            .map(|n| config.collision_radius(n.is_leaf))
            .collect();

        debug!(
            node_count = model.node_count(),
            link_count = model.edge_count(),
            "Simulation seeded"
        );
        Self {
            nodes,
            links,
            radii,
            collision_radii,
            charges: vec![config.charge_strength; model.node_count()],
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            ticks: 0,
            rng: Lcg::new(config.seed),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&SimNode> {
        self.nodes.get(index)
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(SimNode::position)
    }

    /// Drawn radius of a node
    pub fn radius(&self, index: usize) -> f64 {
        self.radii[index]
    }

    pub fn collision_radius(&self, index: usize) -> f64 {
        self.collision_radii[index]
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn tick_count(&self) -> usize {
        self.ticks
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    /// Cooled below `alpha_min` with nothing held by the pointer
    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min && !self.nodes.iter().any(SimNode::is_pinned)
    }

    /// Advance one step
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        let alpha = self.alpha;

        self.apply_links(alpha);
        self.apply_charge(alpha);
        self.apply_center(alpha);
        for _ in 0..self.config.collision_iterations {
            collide::resolve(
                &mut self.nodes,
                &self.collision_radii,
                self.config.collision_strength,
                &mut self.rng,
            );
        }

        let keep = 1.0 - self.config.velocity_decay;
        for node in &mut self.nodes {
            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy *= keep;
                    node.y += node.vy;
                }
            }
        }

        self.ticks += 1;
        trace!(tick = self.ticks, alpha, "Simulation tick");
    }

    /// Tick until settled or `max_ticks` have run; returns the ticks taken
    pub fn run_to_rest(&mut self, max_ticks: usize) -> usize {
        let start = self.ticks;
        while !self.is_settled() && self.ticks - start < max_ticks {
            self.tick();
        }
        self.ticks - start
    }

    fn apply_links(&mut self, alpha: f64) {
        let distance = self.config.link_distance;
        let strength = self.config.link_strength;
        for k in 0..self.links.len() {
            let Link {
                source,
                target,
                bias,
            } = self.links[k];
            let (s, t) = (self.nodes[source], self.nodes[target]);
            let mut x = t.x + t.vx - s.x - s.vx;
            let mut y = t.y + t.vy - s.y - s.vy;
            if x == 0.0 {
                x = self.rng.jiggle();
            }
            if y == 0.0 {
                y = self.rng.jiggle();
            }
            let len = (x * x + y * y).sqrt();
            let l = (len - distance) / len * alpha * strength;
            x *= l;
            y *= l;
            self.nodes[target].vx -= x * bias;
            self.nodes[target].vy -= y * bias;
            self.nodes[source].vx += x * (1.0 - bias);
            self.nodes[source].vy += y * (1.0 - bias);
        }
    }

    fn apply_charge(&mut self, alpha: f64) {
        let points: Vec<Point> = self.positions().collect();
        let tree = ChargeTree::build(&points, &self.charges);
        let theta2 = self.config.theta * self.config.theta;
        let distance_min2 = self.config.distance_min * self.config.distance_min;
        for (i, &at) in points.iter().enumerate() {
            let (dvx, dvy) =
                tree.apply(i, at, &self.charges, alpha, theta2, distance_min2, &mut self.rng);
            self.nodes[i].vx += dvx;
            self.nodes[i].vy += dvy;
        }
    }

    fn apply_center(&mut self, alpha: f64) {
        let k = self.config.center_strength * alpha;
        for node in &mut self.nodes {
            node.vx += (self.center.x - node.x) * k;
            node.vy += (self.center.y - node.y) * k;
        }
    }

    /// Pin a node under the pointer and re-heat
    ///
    /// Returns false for an unknown index.
    pub fn drag_start(&mut self, index: usize, x: f64, y: f64) -> bool {
        let Some(node) = self.nodes.get_mut(index) else {
            return false;
        };
        node.fx = Some(x);
        node.fy = Some(y);
        self.alpha_target = self.config.drag_alpha_target;
        debug!(index, "Drag started");
        true
    }

    /// Move the pin of a dragged node
    pub fn drag_to(&mut self, index: usize, x: f64, y: f64) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.fx = Some(x);
            node.fy = Some(y);
        }
    }

    /// Release a dragged node and let the simulation cool
    pub fn drag_end(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.fx = None;
            node.fy = None;
        }
        self.alpha_target = 0.0;
        debug!(index, "Drag ended");
    }

    /// Snapshot the current positions as a layout
    pub fn to_layout(&self, model: &RenderModel, size: Size) -> LayoutResult {
        let nodes: Vec<PositionedNode> = self
            .nodes
            .iter()
            .zip(model.nodes())
            .enumerate()
            .map(|(index, (sim, node))| PositionedNode {
                index,
                id: node.id.clone(),
                x: sim.x,
                y: sim.y,
                width: 2.0 * self.radii[index],
                height: 2.0 * self.radii[index],
                anchor: Anchor::Center,
            })
            .collect();
        let edges = self
            .links
            .iter()
            .map(|link| PositionedEdge {
                source: link.source,
                target: link.target,
                path: EdgePath::Line {
                    from: self.nodes[link.source].position(),
                    to: self.nodes[link.target].position(),
                },
            })
            .collect();
        LayoutResult {
            nodes,
            edges,
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModelBuilder;

    fn model(json: &str) -> RenderModel {
        GraphModelBuilder::new().build_str(json).unwrap()
    }

    fn pair() -> RenderModel {
        model(r#"{"nodes":[{"id":"a"},{"id":"b","parent":"a"}],"links":[{"source":"a","target":"b"}]}"#)
    }

    #[test]
    fn test_initial_positions_are_deterministic() {
        let m = pair();
        let a = Simulation::new(&m, Size::default(), ForceConfig::default());
        let b = Simulation::new(&m, Size::default(), ForceConfig::default());
        assert_eq!(a.nodes(), b.nodes());
        assert!(a.positions().all(|p| p.distance(Size::default().center()) < 20.0));
    }

    #[test]
    fn test_alpha_decays() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        sim.tick();
        let after_one = sim.alpha();
        assert!(after_one < 1.0);
        sim.tick();
        assert!(sim.alpha() < after_one);
    }

    #[test]
    fn test_link_pulls_toward_distance() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        sim.run_to_rest(600);
        let d = sim.nodes()[0].position().distance(sim.nodes()[1].position());
        assert!(d > 40.0 && d < 200.0, "distance {}", d);
    }

    #[test]
    fn test_settles_within_bound() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        let ticks = sim.run_to_rest(600);
        assert!(sim.is_settled());
        assert!(ticks <= 301);
    }

    #[test]
    fn test_pinned_node_snaps_to_pin() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        assert!(sim.drag_start(1, 10.0, 20.0));
        sim.tick();
        let node = sim.nodes()[1];
        assert_eq!((node.x, node.y, node.vx, node.vy), (10.0, 20.0, 0.0, 0.0));
        assert_eq!(sim.alpha_target(), 0.3);
    }

    #[test]
    fn test_pinned_simulation_never_settles() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        sim.drag_start(0, 0.0, 0.0);
        sim.run_to_rest(1000);
        assert!(!sim.is_settled());
        assert!(sim.alpha() > 0.2);
    }

    #[test]
    fn test_drag_end_clears_pin() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        sim.drag_start(1, 10.0, 20.0);
        sim.drag_to(1, 30.0, 40.0);
        sim.tick();
        assert_eq!(sim.nodes()[1].x, 30.0);
        sim.drag_end(1);
        assert!(!sim.nodes()[1].is_pinned());
        assert_eq!(sim.alpha_target(), 0.0);
    }

    #[test]
    fn test_unknown_drag_index() {
        let mut sim = Simulation::new(&pair(), Size::default(), ForceConfig::default());
        assert!(!sim.drag_start(9, 0.0, 0.0));
        sim.drag_to(9, 0.0, 0.0);
        sim.drag_end(9);
        assert!(sim.nodes().iter().all(|n| !n.is_pinned()));
    }

    #[test]
    fn test_snapshot_matches_positions() {
        let m = pair();
        let mut sim = Simulation::new(&m, Size::default(), ForceConfig::default());
        sim.tick();
        let layout = sim.to_layout(&m, Size::default());
        assert_eq!(layout.nodes[1].x, sim.nodes()[1].x);
        assert_eq!(layout.edges[0].path.to(), sim.nodes()[1].position());
        assert_eq!(layout.nodes[1].width, 12.0);
        assert_eq!(layout.nodes[0].width, 20.0);
    }
}
