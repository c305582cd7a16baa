//! Parallel scan-line generation over the inner headland's rotated frame:
//! emitting evenly spaced horizontal tracks, intersecting them against
//! the polygon, and discretizing the surviving segments into waypoints.

use crate::algorithm::kernel::segment_intersection;
use crate::geometry::{Intersection, Point, Polygon, Track, Vertex};

/// Emit horizontal scan lines spanning `poly`'s bounding box, at
/// `y = min_y + width/2 + k*width` for `k = 0, 1, 2, ...` up to the box's
/// top edge. Each track has no intersections yet; run [`find_intersections`]
/// over the result.
pub fn generate_parallel_tracks(poly: &Polygon, width: f64) -> Vec<Track> {
    let bb = match poly.bounding_box {
        Some(bb) => bb,
        None => return Vec::new(),
    };
    let mut tracks = Vec::new();
    let mut y = bb.min.y + width / 2.0;
    while y < bb.max.y - crate::EPSILON {
        tracks.push(Track::new(Point::new(bb.min.x, y), Point::new(bb.max.x, y)));
        y += width;
    }
    tracks
}

/// Walk every edge of `poly` once; for each scan line it crosses, insert
/// the crossing point into that track's `intersections` (kept sorted by
/// ascending x) annotated with the edge's index.
pub fn find_intersections(poly: &Polygon, tracks: &mut [Track]) {
    let n = poly.len();
    if n == 0 {
        return;
    }
    for i in 0..n {
        let a = poly.vertices[i].point;
        let b = poly.vertices[(i + 1) % n].point;
        for track in tracks.iter_mut() {
            if let Some(p) = segment_intersection(track.from, track.to, a, b) {
                track.insert_intersection(Intersection { point: p, edge_index: i });
            }
        }
    }
}

/// For each track with at least two intersections, discretize the span
/// between its two (ascending-x) intersections, inset by `width/2` on
/// each side and adjusted by `extend_tracks`, into waypoints spaced
/// [`crate::WAYPOINT_SPACING`] apart. A track whose inset span collapses
/// (`new_to <= new_from`) is left without waypoints.
pub fn add_waypoints_to_tracks(tracks: &mut [Track], width: f64, extend_tracks: f64) {
    let step = crate::WAYPOINT_SPACING;
    for track in tracks.iter_mut() {
        track.waypoints.clear();
        if track.intersections.len() < 2 {
            continue;
        }
        let x1 = track.intersections[0].point.x;
        let x2 = track.intersections[1].point.x;
        let new_from = x1.min(x2) + width / 2.0 - extend_tracks;
        let new_to = x1.max(x2) - width / 2.0 + extend_tracks;
        if new_to <= new_from {
            continue;
        }

        let y = track.from.y;
        let mut x = new_from;
        let mut waypoints = Vec::new();
        while x < new_to {
            waypoints.push(Vertex::new(Point::new(x, y)));
            x += step;
        }
        match waypoints.last() {
            Some(last) if new_to - last.point.x > 0.25 * step => {
                waypoints.push(Vertex::new(Point::new(new_to, y)));
            }
            None => waypoints.push(Vertex::new(Point::new(new_to, y))),
            _ => {}
        }
        track.waypoints = waypoints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::analyzer::calculate_polygon_data;

    fn square(side: f64) -> Polygon {
        let mut poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ]);
        calculate_polygon_data(&mut poly);
        poly
    }

    #[test]
    fn parallel_tracks_of_a_100m_square_at_10m_width() {
        let poly = square(100.0);
        let tracks = generate_parallel_tracks(&poly, 10.0);
        assert_eq!(tracks.len(), 10);
        assert_relative_eq!(tracks[0].from.y, 5.0);
        assert_relative_eq!(tracks[9].from.y, 95.0);
    }

    #[test]
    fn each_track_gets_exactly_two_intersections_on_a_square() {
        let poly = square(100.0);
        let mut tracks = generate_parallel_tracks(&poly, 10.0);
        find_intersections(&poly, &mut tracks);
        for t in &tracks {
            assert_eq!(t.intersections.len(), 2);
            assert!(t.intersections[0].point.x <= t.intersections[1].point.x);
        }
    }

    #[test]
    fn waypoints_cover_the_inset_span_within_one_step() {
        let poly = square(100.0);
        let mut tracks = generate_parallel_tracks(&poly, 10.0);
        find_intersections(&poly, &mut tracks);
        add_waypoints_to_tracks(&mut tracks, 10.0, 0.0);
        let span = 100.0 - 10.0; // inset by width/2 on both sides
        let expected_min = (span / crate::WAYPOINT_SPACING).ceil() as usize;
        for t in &tracks {
            assert!(t.waypoints.len() >= expected_min);
            assert!(t.waypoints.len() <= expected_min + 1);
            assert_relative_eq!(t.waypoints.first().unwrap().point.x, 5.0, epsilon = 1e-6);
            assert_relative_eq!(t.waypoints.last().unwrap().point.x, 95.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn a_collapsed_inset_span_leaves_a_track_waypoint_free() {
        let poly = square(100.0);
        let mut tracks = generate_parallel_tracks(&poly, 10.0);
        find_intersections(&poly, &mut tracks);
        // width larger than the field itself collapses every span.
        add_waypoints_to_tracks(&mut tracks, 200.0, 0.0);
        for t in &tracks {
            assert!(t.waypoints.is_empty());
        }
    }
}
