//! Barnes–Hut quadtree for the charge force

use super::random::Lcg;
use crate::core::Point;

/// Subdivision stops here; deeper points share a leaf
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone)]
struct Quad {
    /// Side length; quads are square
    side: f64,
    children: [Option<usize>; 4],
    /// Points held by a leaf
    points: Vec<usize>,
    /// Charge-weighted center
    cx: f64,
    cy: f64,
    /// Total charge
    value: f64,
}

impl Quad {
    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Quadtree over node positions with aggregated charges
#[derive(Debug)]
pub struct ChargeTree {
    quads: Vec<Quad>,
    root: Option<usize>,
}

impl ChargeTree {
    /// Build over `points`, each carrying `strengths[i]`
    pub fn build(points: &[Point], strengths: &[f64]) -> Self {
        let mut tree = Self {
            quads: Vec::new(),
            root: None,
        };
        if points.is_empty() {
            return tree;
        }

        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let side = (x1 - x0).max(y1 - y0).max(1.0) * (1.0 + 1e-9);
        let all: Vec<usize> = (0..points.len()).collect();
        tree.root = tree.insert(points, strengths, all, x0, y0, side, 0);
        tree
    }

    #[allow(clippy::too_many_arguments)]
    fn insert(
        &mut self,
        points: &[Point],
        strengths: &[f64],
        members: Vec<usize>,
        x0: f64,
        y0: f64,
        side: f64,
        depth: usize,
    ) -> Option<usize> {
        if members.is_empty() {
            return None;
        }
        let first = points[members[0]];
        let coincident = members.iter().all(|&i| points[i] == first);

        if members.len() == 1 || coincident || depth >= MAX_DEPTH {
            let value: f64 = members.iter().map(|&i| strengths[i]).sum();
            let n = members.len() as f64;
            let (cx, cy) = members
                .iter()
                .fold((0.0, 0.0), |(sx, sy), &i| (sx + points[i].x, sy + points[i].y));
            self.quads.push(Quad {
                side,
                children: [None; 4],
                points: members,
                cx: cx / n,
                cy: cy / n,
                value,
            });
            return Some(self.quads.len() - 1);
        }

        let half = side / 2.0;
        let (mx, my) = (x0 + half, y0 + half);
        let mut split: [Vec<usize>; 4] = Default::default();
        for i in members {
            let p = points[i];
            let q = usize::from(p.x >= mx) | (usize::from(p.y >= my) << 1);
            split[q].push(i);
        }

        let mut children = [None; 4];
        for (q, part) in split.into_iter().enumerate() {
            let qx = if q & 1 == 1 { mx } else { x0 };
            let qy = if q & 2 == 2 { my } else { y0 };
            children[q] = self.insert(points, strengths, part, qx, qy, half, depth + 1);
        }

        let (mut value, mut weight, mut cx, mut cy) = (0.0, 0.0, 0.0, 0.0);
        for child in children.iter().flatten() {
            let c = &self.quads[*child];
            let w = c.value.abs();
            if w > 0.0 {
                value += c.value;
                weight += w;
                cx += w * c.cx;
                cy += w * c.cy;
            }
        }
        let (cx, cy) = if weight > 0.0 {
            (cx / weight, cy / weight)
        } else {
            (x0 + half, y0 + half)
        };
        self.quads.push(Quad {
            side,
            children,
            points: Vec::new(),
            cx,
            cy,
            value,
        });
        Some(self.quads.len() - 1)
    }

    /// Velocity change on `node` from every other charge
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        node: usize,
        at: Point,
        strengths: &[f64],
        alpha: f64,
        theta2: f64,
        distance_min2: f64,
        rng: &mut Lcg,
    ) -> (f64, f64) {
        let (mut dvx, mut dvy) = (0.0, 0.0);
        let mut stack: Vec<usize> = self.root.into_iter().collect();

        while let Some(qi) = stack.pop() {
            let quad = &self.quads[qi];
            if quad.value == 0.0 {
                continue;
            }
            let mut x = quad.cx - at.x;
            let mut y = quad.cy - at.y;
            let mut l = x * x + y * y;

            if quad.side * quad.side / theta2 < l {
                if x == 0.0 {
                    x = rng.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = rng.jiggle();
                    l += y * y;
                }
                if l < distance_min2 {
                    l = (distance_min2 * l).sqrt();
                }
                dvx += x * quad.value * alpha / l;
                dvy += y * quad.value * alpha / l;
                continue;
            }

            if !quad.is_leaf() {
                stack.extend(quad.children.iter().flatten().copied());
                continue;
            }

            if quad.points.len() > 1 || quad.points[0] != node {
                if x == 0.0 {
                    x = rng.jiggle();
                    l += x * x;
                }
                if y == 0.0 {
                    y = rng.jiggle();
                    l += y * y;
                }
                if l < distance_min2 {
                    l = (distance_min2 * l).sqrt();
                }
            }
            for &p in &quad.points {
                if p != node {
                    let w = strengths[p] * alpha / l;
                    dvx += x * w;
                    dvy += y * w;
                }
            }
        }
        (dvx, dvy)
    }

    #[cfg(test)]
    fn total_charge(&self) -> f64 {
        self.root.map(|r| self.quads[r].value).unwrap_or(0.0)
    }

    #[cfg(test)]
    fn leaf_count(&self) -> usize {
        self.quads.iter().filter(|q| q.is_leaf()).count()
    }
}
