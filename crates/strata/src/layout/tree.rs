//! Tidy tree layout
//!
//! Buchheim, Jünger and Leipert's linear-time variant of Walker's
//! Reingold–Tilford algorithm. The tree grows left to right: breadth is
//! normalized to the inner height, depth to the inner width.

use tracing::{debug, span, Level};

use super::{Anchor, LayoutEngine, LayoutResult, PositionedEdge, PositionedNode};
use crate::core::{EdgePath, Point, Result, Size, TreeLayoutConfig};
use crate::model::RenderModel;

/// Tree layout engine
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    config: TreeLayoutConfig,
}

impl TreeLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeLayoutConfig) -> Self {
        Self { config }
    }
}

/// Working state of one node during the walks
#[derive(Debug, Clone)]
struct WalkNode {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings
    number: usize,
    /// Default ancestor, set on parents
    default_ancestor: Option<usize>,
    ancestor: usize,
    thread: Option<usize>,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    breadth: f64,
}

/// Arena over the model nodes plus one virtual root at the end
struct Walker<'a> {
    nodes: Vec<WalkNode>,
    model: &'a RenderModel,
    sibling: f64,
    cousin: f64,
}

impl<'a> Walker<'a> {
    fn new(model: &'a RenderModel, config: &TreeLayoutConfig) -> Self {
        let n = model.node_count();
        let virtual_root = n;
        let mut nodes: Vec<WalkNode> = model
            .nodes()
            .enumerate()
            .map(|(i, node)| WalkNode {
                parent: Some(node.parent.unwrap_or(virtual_root)),
                children: node.children.clone(),
                number: 0,
                default_ancestor: None,
                ancestor: i,
                thread: None,
                prelim: 0.0,
                modifier: 0.0,
                change: 0.0,
                shift: 0.0,
                breadth: 0.0,
            })
            .collect();
        nodes.push(WalkNode {
            parent: None,
            children: vec![model.root()],
            number: 0,
            default_ancestor: None,
            ancestor: virtual_root,
            thread: None,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            breadth: 0.0,
        });
        for i in 0..nodes.len() {
            for k in 0..nodes[i].children.len() {
                let child = nodes[i].children[k];
                nodes[child].number = k;
            }
        }
        Self {
            nodes,
            model,
            sibling: config.sibling_separation,
            cousin: config.cousin_separation,
        }
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.model.node(a).parent == self.model.node(b).parent {
            self.sibling
        } else {
            self.cousin
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.last().copied().or(self.nodes[v].thread)
    }

    fn parent(&self, v: usize) -> usize {
        // Only the virtual root lacks a parent and it is never walked.
        self.nodes[v].parent.unwrap_or(v)
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let change = shift / (self.nodes[wp].number as f64 - self.nodes[wm].number as f64);
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for k in (0..self.nodes[v].children.len()).rev() {
            let w = self.nodes[v].children[k];
            self.nodes[w].prelim += shift;
            self.nodes[w].modifier += shift;
            change += self.nodes[w].change;
            shift += self.nodes[w].shift + change;
        }
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let a = self.nodes[vim].ancestor;
        if self.parent(a) == self.parent(v) {
            a
        } else {
            ancestor
        }
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };
        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.nodes[self.parent(vip)].children[0];
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        let mut next_im = self.next_right(vim);
        let mut next_ip = self.next_left(vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            // Contours of equal height advance together, so these exist.
            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.nodes[vop].ancestor = v;
            let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip
                + self.separation(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;
            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if let Some(im) = next_im {
            if self.next_right(vop).is_none() {
                self.nodes[vop].thread = Some(im);
                self.nodes[vop].modifier += sim - sop;
            }
        }
        if let Some(ip) = next_ip {
            if self.next_left(vom).is_none() {
                self.nodes[vom].thread = Some(ip);
                self.nodes[vom].modifier += sip - som;
                ancestor = v;
            }
        }
        ancestor
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.parent(v);
        let number = self.nodes[v].number;
        let left_sibling = if number > 0 {
            Some(self.nodes[parent].children[number - 1])
        } else {
            None
        };

        if !self.nodes[v].children.is_empty() {
            self.execute_shifts(v);
            let children = &self.nodes[v].children;
            let first = children[0];
            let last = children[children.len() - 1];
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            if let Some(w) = left_sibling {
                self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(w) = left_sibling {
            self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
        }

        let default_ancestor = self.nodes[parent]
            .default_ancestor
            .unwrap_or(self.nodes[parent].children[0]);
        let ancestor = self.apportion(v, left_sibling, default_ancestor);
        self.nodes[parent].default_ancestor = Some(ancestor);
    }

    fn second_walk(&mut self, v: usize) {
        let parent_modifier = self.nodes[self.parent(v)].modifier;
        self.nodes[v].breadth = self.nodes[v].prelim + parent_modifier;
        self.nodes[v].modifier += parent_modifier;
    }

    /// Run both walks and return the raw breadth of every model node
    fn run(mut self) -> Vec<f64> {
        let root = self.model.root();
        let virtual_root = self.nodes.len() - 1;

        // Children before parents, siblings left to right
        let mut stack = vec![root];
        let mut order = Vec::with_capacity(virtual_root);
        while let Some(v) = stack.pop() {
            order.push(v);
            stack.extend(self.nodes[v].children.iter().copied());
        }
        for &v in order.iter().rev() {
            self.first_walk(v);
        }
        self.nodes[virtual_root].modifier = -self.nodes[root].prelim;

        // Pre-order: parents before children
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            self.second_walk(v);
            stack.extend(self.nodes[v].children.iter().rev().copied());
        }

        self.nodes.truncate(virtual_root);
        self.nodes.into_iter().map(|n| n.breadth).collect()
    }
}

impl LayoutEngine for TreeLayout {
    fn layout(&self, model: &RenderModel, size: Size) -> Result<LayoutResult> {
        let layout_span = span!(
            Level::INFO,
            "layout_tree",
            node_count = model.node_count(),
            max_depth = model.max_depth()
        );
        let _enter = layout_span.enter();

        let c = &self.config;
        let inner_width = (size.width - c.margin_left - c.margin_right).max(1.0);
        let inner_height = (size.height - c.margin_top - c.margin_bottom).max(1.0);

        let breadth = Walker::new(model, c).run();

        let mut left = model.root();
        let mut right = model.root();
        for (i, &b) in breadth.iter().enumerate() {
            if b < breadth[left] {
                left = i;
            }
            if b > breadth[right] {
                right = i;
            }
        }
        let edge_gap = if left == right {
            1.0
        } else {
            let same_parent = model.node(left).parent == model.node(right).parent;
            let sep = if same_parent {
                c.sibling_separation
            } else {
                c.cousin_separation
            };
            sep / 2.0
        };
        let tx = edge_gap - breadth[left];
        let kx = inner_height / (breadth[right] + edge_gap + tx);
        let ky = inner_width / (model.max_depth().max(1) as f64);

        let nodes: Vec<PositionedNode> = model
            .nodes()
            .enumerate()
            .map(|(index, node)| PositionedNode {
                index,
                id: node.id.clone(),
                x: c.margin_left + node.depth as f64 * ky,
                y: c.margin_top + (breadth[index] + tx) * kx,
                width: 0.0,
                height: 0.0,
                anchor: Anchor::Center,
            })
            .collect();

        // Tree edges follow the parent chain, not the payload links.
        let edges = model
            .nodes()
            .enumerate()
            .filter_map(|(target, node)| node.parent.map(|source| (source, target)))
            .map(|(source, target)| PositionedEdge {
                source,
                target,
                path: EdgePath::horizontal_link(
                    Point::new(nodes[source].x, nodes[source].y),
                    Point::new(nodes[target].x, nodes[target].y),
                ),
            })
            .collect();

        debug!(kx, ky, "Tree layout complete");
        Ok(LayoutResult {
            nodes,
            edges,
            width: size.width,
            height: size.height,
        })
    }

    fn name(&self) -> &'static str {
        "tree"
    }
}
