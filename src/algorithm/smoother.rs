//! The pluggable corner smoother and the two padding conventions the
//! headland generator and linker use around it: wrap-as-closed for a
//! polygon ring, pad-as-open for a path with two free ends.

use crate::geometry::Point;

/// A corner-smoothing algorithm, injected so the planner core never
/// commits to one implementation (a B-spline smoother is an equally
/// valid choice). Treats its input as an *open* polyline: the first and
/// last points are never moved, so callers that need a closed ring or a
/// path whose true ends should also be softened pad it first (see
/// [`smooth_closed_ring`] / [`smooth_open_path_padded`]).
pub trait Smoother {
    fn smooth(&self, points: &[Point], angle_threshold: f64, iterations: usize) -> Vec<Point>;
}

/// Chaikin corner-cutting: each interior vertex whose turn angle exceeds
/// `angle_threshold` is replaced by two points a quarter of the way along
/// its incoming and outgoing edges, repeated for `iterations` rounds.
/// Vertices with a gentler turn are left untouched, and the two endpoints
/// of the input are never moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaikinSmoother;

impl Smoother for ChaikinSmoother {
    fn smooth(&self, points: &[Point], angle_threshold: f64, iterations: usize) -> Vec<Point> {
        let mut current = points.to_vec();
        for _ in 0..iterations {
            if current.len() < 3 {
                break;
            }
            let mut next = Vec::with_capacity(current.len() * 2);
            next.push(current[0]);
            for i in 1..current.len() - 1 {
                let prev = current[i - 1];
                let this = current[i];
                let nxt = current[i + 1];
                let incoming = crate::algorithm::kernel::to_polar(this.x - prev.x, this.y - prev.y).0;
                let outgoing = crate::algorithm::kernel::to_polar(nxt.x - this.x, nxt.y - this.y).0;
                let turn = crate::algorithm::kernel::delta_angle(outgoing, incoming).abs();
                if turn > angle_threshold {
                    next.push(prev.midpoint_weighted(&this, 0.25));
                    next.push(this.midpoint_weighted(&nxt, 0.25));
                } else {
                    next.push(this);
                }
            }
            next.push(current[current.len() - 1]);
            current = next;
        }
        current
    }
}

/// Smooth `points` as a closed ring: wraps the last point in front and the
/// first point behind before smoothing (so the smoother's own endpoint
/// preservation lands on the wrap seam, not on an arbitrary vertex of the
/// ring), then strips the wrap padding back off.
pub fn smooth_closed_ring(
    points: &[Point],
    angle_threshold: f64,
    iterations: usize,
    smoother: &dyn Smoother,
) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut padded = Vec::with_capacity(points.len() + 2);
    padded.push(points[points.len() - 1]);
    padded.extend_from_slice(points);
    padded.push(points[0]);
    let smoothed = smoother.smooth(&padded, angle_threshold, iterations);
    if smoothed.len() >= 2 {
        smoothed[1..smoothed.len() - 1].to_vec()
    } else {
        points.to_vec()
    }
}

/// Smooth `points` as an open path whose true ends should still be
/// softened: pads each end by duplicating its endpoint before smoothing
/// (so the smoother's endpoint preservation lands on the duplicate, not
/// the path's real start/end), then strips the duplicates back off.
pub fn smooth_open_path_padded(
    points: &[Point],
    angle_threshold: f64,
    iterations: usize,
    smoother: &dyn Smoother,
) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut padded = Vec::with_capacity(points.len() + 2);
    padded.push(points[0]);
    padded.extend_from_slice(points);
    padded.push(points[points.len() - 1]);
    let smoothed = smoother.smooth(&padded, angle_threshold, iterations);
    if smoothed.len() >= 2 {
        smoothed[1..smoothed.len() - 1].to_vec()
    } else {
        points.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn chaikin_leaves_a_gentle_bend_alone() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.01),
            Point::new(2.0, 0.0),
        ];
        let smoothed = ChaikinSmoother.smooth(&pts, 1.0, 1);
        assert_eq!(smoothed.len(), 3);
        assert_eq!(smoothed[1], pts[1]);
    }

    #[test]
    fn chaikin_cuts_a_sharp_right_angle_corner() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let smoothed = ChaikinSmoother.smooth(&pts, 0.1, 1);
        assert_eq!(smoothed.len(), 4);
        assert_eq!(smoothed[0], pts[0]);
        assert_eq!(smoothed[3], pts[2]);
    }

    #[test]
    fn chaikin_preserves_endpoints_across_several_iterations() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let smoothed = ChaikinSmoother.smooth(&pts, 0.1, 4);
        assert_eq!(smoothed[0], pts[0]);
        assert_eq!(*smoothed.last().unwrap(), pts[pts.len() - 1]);
    }

    #[test]
    fn closed_ring_padding_round_trips_vertex_count_when_nothing_is_sharp() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.1),
            Point::new(20.0, 0.0),
        ];
        let out = smooth_closed_ring(&pts, 1.5, 1, &ChaikinSmoother);
        assert_eq!(out.len(), pts.len());
    }
}
