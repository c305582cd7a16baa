//! Self-intersection cleanup for a freshly reconstructed offset polygon:
//! merges vertices that ended up too close together, or whose turn is
//! sharper than a threshold, into their neighbor.

use crate::algorithm::kernel::delta_angle;
use crate::geometry::{Edge, Point, Polygon};

/// Walk `poly` as a closed ring; whenever the edge from `cp` to `np` is
/// shorter than `distance_threshold`, or the turn at `cp` is sharper than
/// `angle_threshold`, replace `np` with the midpoint of `(cp, np)` and
/// drop `cp`, without advancing past the merged vertex. One sweep
/// converges (running it again is a no-op), so this is not looped
/// internally.
pub fn apply_low_pass_filter(poly: &Polygon, angle_threshold: f64, distance_threshold: f64) -> Polygon {
    let mut pts: Vec<Point> = poly.points().collect();
    if pts.len() < 3 {
        return Polygon::from_points(pts);
    }

    let mut cursor = 0usize;
    loop {
        let n = pts.len();
        if n < 3 || cursor >= n {
            break;
        }
        let prev_idx = (cursor + n - 1) % n;
        let next_idx = (cursor + 1) % n;
        let pp = pts[prev_idx];
        let cp = pts[cursor];
        let np = pts[next_idx];

        let edge_cp_np = Edge::new(cp, np);
        let edge_pp_cp = Edge::new(pp, cp);
        let too_close = edge_cp_np.length < distance_threshold;
        let too_sharp = delta_angle(edge_cp_np.angle, edge_pp_cp.angle).abs() > angle_threshold;

        if too_close || too_sharp {
            let merged = cp.midpoint(&np);
            pts[next_idx] = merged;
            pts.remove(cursor);
            // removing `cursor` shifted every later index down by one, so
            // the merged vertex (formerly at `next_idx`) is now at
            // `cursor` itself: don't advance, re-evaluate it in place.
        } else {
            cursor += 1;
        }
    }

    Polygon::from_points(pts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_a_needlessly_close_pair_of_vertices() {
        let poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0001, 0.0001),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let filtered = apply_low_pass_filter(&poly, std::f64::consts::PI, 0.01);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn leaves_a_well_spaced_square_alone() {
        let poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let filtered = apply_low_pass_filter(&poly, std::f64::consts::PI, 0.5);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn a_threshold_of_pi_suppresses_angle_based_removal() {
        // A sharp spike that's nonetheless far from its neighbors should
        // survive when angle_threshold is pi, as the headland generator
        // uses it for this pass (distance is the only active criterion).
        let poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 100.0),
            Point::new(5.0, 0.0001),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let filtered = apply_low_pass_filter(&poly, std::f64::consts::PI, 0.01);
        assert!(filtered.points().any(|p| (p.y - 100.0).abs() < 1e-6));
    }
}
