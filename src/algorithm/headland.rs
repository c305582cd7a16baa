//! Inward polygon offsetting: the grassfire approximation that produces
//! one concentric headland pass, and the per-field loop that chains it
//! into the requested number of passes.

use log::{debug, warn};

use crate::algorithm::analyzer::{calculate_polygon_data, inward};
use crate::algorithm::kernel::{add_polar_vector_to_point, line_intersection, to_polar};
use crate::algorithm::low_pass::apply_low_pass_filter;
use crate::algorithm::smoother::{smooth_closed_ring, Smoother};
use crate::config::PlannerConfig;
use crate::geometry::{HeadlandTrack, Point, Polygon};

/// Translate every edge of `poly` inward by `delta` and reconstruct the
/// vertex list by intersecting each translated edge with its translated
/// predecessor. A non-intersecting pair (parallel translated edges at a
/// very shallow corner) either collapses to the midpoint of the gap, when
/// the gap is smaller than `min_vertex_distance`, or keeps both endpoints.
fn offset_once(poly: &Polygon, delta: f64, min_vertex_distance: f64) -> Vec<Point> {
    let n = poly.len();
    let points: Vec<Point> = poly.points().collect();
    let inward_rotation = inward(poly.is_clockwise);

    let translated: Vec<(Point, Point)> = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let edge_angle = to_polar(b.x - a.x, b.y - a.y).0;
            let dir = edge_angle + inward_rotation;
            (
                add_polar_vector_to_point(a, dir, delta),
                add_polar_vector_to_point(b, dir, delta),
            )
        })
        .collect();

    let mut new_points = Vec::with_capacity(n + 2);
    for i in 0..n {
        let prev = translated[(i + n - 1) % n];
        let cur = translated[i];
        match line_intersection(prev.0, prev.1, cur.0, cur.1) {
            Some(p) => new_points.push(p),
            None => {
                let gap_a = prev.1;
                let gap_b = cur.0;
                if gap_a.distance(&gap_b) < min_vertex_distance {
                    new_points.push(gap_a.midpoint(&gap_b));
                } else {
                    new_points.push(gap_a);
                    new_points.push(gap_b);
                }
            }
        }
    }
    new_points
}

/// Offset `poly` inward by `target_offset`, iterating in steps no larger
/// than half the polygon's shortest edge (a grassfire approximation: a
/// single large step can skip past a corner where two edges would
/// otherwise have merged). Stops when the target is reached or
/// [`crate::OFFSET_ITERATION_CAP`] iterations have run, whichever first;
/// the latter returns the best polygon produced so far with
/// [`HeadlandTrack::degenerate`] set.
pub fn calculate_headland_track(
    poly: &Polygon,
    target_offset: f64,
    min_vertex_distance: f64,
    angle_threshold: f64,
    do_smooth: bool,
    smoother: &dyn Smoother,
) -> HeadlandTrack {
    let mut current = poly.clone();
    calculate_polygon_data(&mut current);

    if current.len() < 3 {
        let mut track = HeadlandTrack::new(current);
        track.degenerate = true;
        return track;
    }

    let mut current_offset = 0.0;
    let mut degenerate = false;

    for iteration in 0..crate::OFFSET_ITERATION_CAP {
        if current_offset >= target_offset - crate::EPSILON {
            break;
        }
        if current.len() < 3 {
            degenerate = true;
            break;
        }
        let remaining = target_offset - current_offset;
        let delta = (current.shortest_edge_length / 2.0).min(remaining).max(crate::EPSILON);

        let new_points = offset_once(&current, delta, min_vertex_distance);
        if new_points.len() < 3 {
            warn!("headland offset collapsed to {} vertices at iteration {iteration}", new_points.len());
            degenerate = true;
            break;
        }

        let mut new_poly = Polygon::from_points(new_points);
        calculate_polygon_data(&mut new_poly);

        if do_smooth {
            let smoothed = smooth_closed_ring(
                &new_poly.points().collect::<Vec<_>>(),
                angle_threshold,
                1,
                smoother,
            );
            new_poly = Polygon::from_points(smoothed);
            calculate_polygon_data(&mut new_poly);
        }

        // pi as the angle threshold suppresses sharp-turn-based removal
        // on this pass; only vertices that ended up too close survive
        // for removal.
        new_poly = apply_low_pass_filter(&new_poly, std::f64::consts::PI, min_vertex_distance);
        calculate_polygon_data(&mut new_poly);

        debug!(
            "headland offset iteration {iteration}: delta={delta:.4}, offset={:.4}/{target_offset:.4}, {} vertices",
            current_offset + delta,
            new_poly.len()
        );

        current = new_poly;
        current_offset += delta;
    }

    if current_offset < target_offset - crate::EPSILON && current.len() >= 3 {
        warn!(
            "headland offset hit the iteration cap before reaching target {target_offset:.4} (reached {current_offset:.4})"
        );
        degenerate = true;
    }

    let mut track = HeadlandTrack::new(current);
    track.degenerate = degenerate;
    track
}

/// Build the requested number of concentric headland passes by offsetting
/// each pass from the one before it, per
/// [`PlannerConfig::use_boundary_as_first_headland_pass`]: either the
/// boundary itself is pass 1 (zero offset) and every later pass is offset
/// by the effective width, or pass 1 is offset by half the effective
/// width and every later pass by the full effective width. Stops early
/// (producing fewer than `n_headland_passes`) if a pass degenerates.
pub fn generate_headland_tracks(
    boundary: &Polygon,
    config: &PlannerConfig,
    smoother: &dyn Smoother,
) -> Vec<HeadlandTrack> {
    let effective_width = config.implement_width * (1.0 - config.overlap_percent / 100.0);
    let mut tracks = Vec::with_capacity(config.n_headland_passes);
    let mut current = boundary.clone();
    calculate_polygon_data(&mut current);

    for i in 0..config.n_headland_passes {
        if i == 0 && config.use_boundary_as_first_headland_pass {
            let mut pass = current.clone();
            calculate_polygon_data(&mut pass);
            current = pass.clone();
            tracks.push(HeadlandTrack::new(pass));
            continue;
        }

        let offset = if i == 0 { effective_width / 2.0 } else { effective_width };
        let track = calculate_headland_track(
            &current,
            offset,
            config.min_vertex_distance,
            config.angle_threshold,
            config.do_smooth,
            smoother,
        );
        let degenerate = track.degenerate;
        let collapsed = track.polygon.len() < 3;
        current = track.polygon.clone();
        tracks.push(track);
        if degenerate && collapsed {
            warn!("headland pass {i} collapsed; stopping at {} of {} requested passes", tracks.len(), config.n_headland_passes);
            break;
        }
    }

    tracks
}
