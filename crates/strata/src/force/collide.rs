//! Collision resolution over a uniform grid
//!
//! Cells are as wide as the largest possible contact distance, so every
//! overlapping pair sits in the same or an adjacent cell.

use std::collections::HashMap;

use super::random::Lcg;
use super::SimNode;

/// One collision pass
///
/// Positions are predicted from the current velocities; only velocities
/// change.
pub fn resolve(nodes: &mut [SimNode], radii: &[f64], strength: f64, rng: &mut Lcg) {
    let max_radius = radii.iter().copied().fold(0.0_f64, f64::max);
    if nodes.len() < 2 || max_radius <= 0.0 {
        return;
    }
    let cell = 2.0 * max_radius;

    let predicted: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x + n.vx, n.y + n.vy)).collect();
    let key = |x: f64, y: f64| ((x / cell).floor() as i64, (y / cell).floor() as i64);

    let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, &(x, y)) in predicted.iter().enumerate() {
        grid.entry(key(x, y)).or_default().push(i);
    }

    for i in 0..nodes.len() {
        let (xi, yi) = predicted[i];
        let ri = radii[i];
        let ri2 = ri * ri;
        let (cx, cy) = key(xi, yi);

        for gx in cx - 1..=cx + 1 {
            for gy in cy - 1..=cy + 1 {
                let Some(bucket) = grid.get(&(gx, gy)) else {
                    continue;
                };
                for &j in bucket {
                    if j <= i {
                        continue;
                    }
                    let rj = radii[j];
                    let r = ri + rj;
                    let mut x = xi - nodes[j].x - nodes[j].vx;
                    let mut y = yi - nodes[j].y - nodes[j].vy;
                    let mut l = x * x + y * y;
                    if l >= r * r {
                        continue;
                    }
                    if x == 0.0 {
                        x = rng.jiggle();
                        l += x * x;
                    }
                    if y == 0.0 {
                        y = rng.jiggle();
                        l += y * y;
                    }
                    let dist = l.sqrt();
                    let push = (r - dist) / dist * strength;
                    x *= push;
                    y *= push;
                    let rj2 = rj * rj;
                    let share = rj2 / (ri2 + rj2);
                    nodes[i].vx += x * share;
                    nodes[i].vy += y * share;
                    nodes[j].vx -= x * (1.0 - share);
                    nodes[j].vy -= y * (1.0 - share);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64) -> SimNode {
        SimNode {
            x,
            y,
            ..SimNode::default()
        }
    }

    #[test]
    fn test_overlapping_pair_is_separated() {
        let mut nodes = vec![node(0.0, 0.0), node(4.0, 0.0)];
        resolve(&mut nodes, &[9.0, 9.0], 1.0, &mut Lcg::new(1));
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
        let gap = (nodes[1].x + nodes[1].vx) - (nodes[0].x + nodes[0].vx);
        assert!((gap - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_distant_pair_untouched() {
        let mut nodes = vec![node(0.0, 0.0), node(100.0, 0.0)];
        resolve(&mut nodes, &[9.0, 9.0], 1.0, &mut Lcg::new(1));
        assert_eq!(nodes[0].vx, 0.0);
        assert_eq!(nodes[1].vx, 0.0);
    }

    #[test]
    fn test_heavier_node_moves_less() {
        let mut nodes = vec![node(0.0, 0.0), node(5.0, 0.0)];
        resolve(&mut nodes, &[15.0, 9.0], 1.0, &mut Lcg::new(1));
        assert!(nodes[0].vx.abs() < nodes[1].vx.abs());
    }

    #[test]
    fn test_coincident_nodes_are_jiggled_apart() {
        let mut nodes = vec![node(3.0, 3.0), node(3.0, 3.0)];
        resolve(&mut nodes, &[6.0, 6.0], 1.0, &mut Lcg::new(1));
        assert!(nodes[0].vx != 0.0 || nodes[0].vy != 0.0);
    }
}
