//! Composes the concentric headland passes into one spiral path: walk
//! pass *i* a full circle starting near the vehicle's entry point, then
//! cast a short ray toward pass *i+1* to find where to continue.

use log::warn;

use crate::algorithm::analyzer::inward;
use crate::algorithm::kernel::{
    add_polar_vector_to_point, polygon_index0, segment_intersection, PolygonIterator,
};
use crate::algorithm::smoother::{smooth_open_path_padded, Smoother};
use crate::config::PlannerConfig;
use crate::geometry::{HeadlandTrack, Point, Polygon, Vertex};

/// Three headings tried in order when bridging from one pass to the next:
/// straight inward, then ±60° off it.
const BRIDGE_HEADINGS_DEGREES: [f64; 3] = [0.0, 60.0, -60.0];

fn nearest_vertex_index(poly: &Polygon, point: Point) -> usize {
    poly.vertices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.point
                .distance(&point)
                .partial_cmp(&b.point.distance(&point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Cast a ray from `origin` in direction `angle` out to `max_distance`;
/// return the first point at which it crosses an edge of `poly`, and that
/// edge's index.
fn ray_polygon_intersection(
    origin: Point,
    angle: f64,
    max_distance: f64,
    poly: &Polygon,
) -> Option<Point> {
    let ray_end = add_polar_vector_to_point(origin, angle, max_distance);
    let n = poly.len();
    let mut best: Option<(f64, Point)> = None;
    for i in 0..n {
        let a = poly.vertices[i].point;
        let b = poly.vertices[(i + 1) % n].point;
        if let Some(p) = segment_intersection(origin, ray_end, a, b) {
            let d = origin.distance(&p);
            if best.map_or(true, |(best_d, _)| d < best_d) {
                best = Some((d, p));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Compose every pass of `headland_tracks` into one continuous path,
/// decorating each pass's `circle_start`/`circle_end`/`circle_step` along
/// the way. Entry point and direction are taken from
/// [`PlannerConfig::headland_start_location`] and
/// [`PlannerConfig::headland_clockwise`] (falling back to the outermost
/// pass's own orientation when unset, i.e. no direction preference).
pub fn link_headland_tracks(
    headland_tracks: &mut [HeadlandTrack],
    config: &PlannerConfig,
    smoother: &dyn Smoother,
) -> Vec<Vertex> {
    let mut path = Vec::new();
    if headland_tracks.is_empty() {
        return path;
    }

    let desired_clockwise = config
        .headland_clockwise
        .unwrap_or(headland_tracks[0].polygon.is_clockwise);

    let mut from_index = nearest_vertex_index(&headland_tracks[0].polygon, config.headland_start_location);
    let mut to_index = polygon_index0(headland_tracks[0].polygon.len(), from_index as i64 + 1);

    let n_passes = headland_tracks.len();
    for i in 0..n_passes {
        let len = headland_tracks[i].polygon.len();
        if len == 0 {
            continue;
        }
        let same_direction = headland_tracks[i].polygon.is_clockwise == desired_clockwise;
        let (walk_from, walk_to, step) = if same_direction {
            (to_index, from_index, 1)
        } else {
            (from_index, to_index, -1)
        };

        headland_tracks[i].circle_start = Some(walk_from);
        headland_tracks[i].circle_end = Some(walk_to);
        headland_tracks[i].circle_step = Some(step);

        let vertices = headland_tracks[i].polygon.vertices.clone();
        for (idx, v) in PolygonIterator::new(&vertices, walk_from, walk_to, step) {
            let mut v = *v;
            v.pass_number = Some(i);
            path.push(v);
            from_index = idx;
        }

        if i + 1 < n_passes {
            let current = &headland_tracks[i].polygon;
            let origin = current.vertices[from_index].point;
            let base_angle = current.vertices[from_index]
                .tangent
                .map(|t| crate::algorithm::kernel::to_polar(t.x, t.y).0)
                .unwrap_or(0.0)
                + inward(current.is_clockwise);

            let next_poly = &headland_tracks[i + 1].polygon;
            let mut hit = None;
            for heading_deg in BRIDGE_HEADINGS_DEGREES {
                let angle = base_angle + heading_deg.to_radians();
                if let Some(p) =
                    ray_polygon_intersection(origin, angle, crate::MAX_RAY_DISTANCE, next_poly)
                {
                    hit = Some(p);
                    break;
                }
            }

            match hit {
                Some(p) => {
                    from_index = nearest_vertex_index(next_poly, p);
                    to_index = polygon_index0(next_poly.len(), from_index as i64 + 1);
                }
                None => {
                    warn!("headland linker could not bridge from pass {i} to pass {}", i + 1);
                    from_index = nearest_vertex_index(next_poly, origin);
                    to_index = polygon_index0(next_poly.len(), from_index as i64 + 1);
                }
            }
        }
    }

    if config.do_smooth && path.len() >= 3 {
        let points: Vec<Point> = path.iter().map(|v| v.point).collect();
        let smoothed = smooth_open_path_padded(&points, config.angle_threshold, 1, smoother);
        for (v, p) in path.iter_mut().zip(smoothed.into_iter()) {
            v.point = p;
        }
    }

    path
}
