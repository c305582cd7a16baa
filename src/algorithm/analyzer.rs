//! Computes the per-vertex and per-polygon decorations every later stage
//! relies on: edges, tangents, orientation, shortest edge, and the
//! directional histogram used to pick a fallback scan angle.

use std::collections::BTreeMap;

use crate::algorithm::kernel::{bounding_rect, delta_angle};
use crate::geometry::{BestDirection, DirectionBin, Edge, Point, Polygon};

const BIN_WIDTH_DEGREES: f64 = 10.0;

fn bin_key(angle_radians: f64) -> i32 {
    let deg = angle_radians.to_degrees();
    ((deg / BIN_WIDTH_DEGREES).floor() as i32) * BIN_WIDTH_DEGREES as i32
        + (BIN_WIDTH_DEGREES as i32 / 2)
}

/// Populate `prev_edge`/`next_edge`/`tangent` on every vertex of `poly`, and
/// recompute `bounding_box`, `shortest_edge_length`, `direction_stats`,
/// `best_direction`, and `is_clockwise` on `poly` itself.
///
/// `poly` is treated as a closed ring: the edge from the last vertex back
/// to the first is included like any other.
pub fn calculate_polygon_data(poly: &mut Polygon) {
    let n = poly.len();
    if n < 2 {
        return;
    }

    let points: Vec<Point> = poly.points().collect();
    let edges: Vec<Edge> = (0..n)
        .map(|i| Edge::new(points[i], points[(i + 1) % n]))
        .collect();

    for i in 0..n {
        let prev_i = (i + n - 1) % n;
        poly.vertices[i].prev_edge = Some(edges[prev_i]);
        poly.vertices[i].next_edge = Some(edges[i]);
        let prev_point = points[prev_i];
        let next_point = points[(i + 1) % n];
        poly.vertices[i].tangent = Some(Point::new(
            next_point.x - prev_point.x,
            next_point.y - prev_point.y,
        ));
    }

    poly.shortest_edge_length = edges
        .iter()
        .map(|e| e.length)
        .fold(f64::INFINITY, f64::min);

    let mut stats: BTreeMap<i32, DirectionBin> = BTreeMap::new();
    for e in &edges {
        let bin = stats.entry(bin_key(e.angle)).or_default();
        bin.total_length += e.length;
        bin.angles.push(e.angle);
    }
    poly.best_direction = stats
        .iter()
        .max_by(|a, b| {
            a.1.total_length
                .partial_cmp(&b.1.total_length)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(bin, data)| {
            let mean_radians = data.angles.iter().sum::<f64>() / data.angles.len() as f64;
            let floored_degrees = mean_radians.to_degrees().floor();
            BestDirection {
                bin: *bin,
                dir: floored_degrees.to_radians(),
            }
        });
    poly.direction_stats = stats;

    // Cumulative signed turning angle around the ring: positive for a
    // counter-clockwise traversal in a y-up plane, negative for clockwise.
    let mut cumulative = 0.0;
    for i in 0..n {
        let prev_i = (i + n - 1) % n;
        cumulative += delta_angle(edges[i].angle, edges[prev_i].angle);
    }
    poly.is_clockwise = cumulative < 0.0;

    poly.bounding_box = bounding_rect(points);
}

/// `-π/2` for a clockwise ring, `+π/2` otherwise: the rotation to apply to
/// an edge's angle to point toward the polygon's interior.
pub fn inward(is_clockwise: bool) -> f64 {
    if is_clockwise {
        -std::f64::consts::FRAC_PI_2
    } else {
        std::f64::consts::FRAC_PI_2
    }
}
