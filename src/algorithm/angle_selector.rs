//! Picks the scan-line angle that produces the tidiest interior fill:
//! scored by how many blocks, small blocks, split tracks, and full tracks
//! each candidate angle's parallel fill would produce.

use log::debug;

use crate::algorithm::analyzer::calculate_polygon_data;
use crate::algorithm::block_splitter::split_center_into_blocks;
use crate::algorithm::center_filler::{find_intersections, generate_parallel_tracks};
use crate::algorithm::kernel::{rotate_polygon, rotation_origin};
use crate::geometry::{Block, Polygon, Track};

/// Blocks with fewer than this many tracks are "small": an interior this
/// fragmented at a given angle is a bad fit for that angle.
const SMALL_BLOCK_TRACK_COUNT: usize = 5;

fn count_tracks(tracks: &[Track]) -> (usize, usize) {
    let mut n_full = 0;
    let mut n_split = 0;
    for t in tracks {
        match t.intersections.len() {
            2 => n_full += 1,
            n if n > 2 => n_split += 1,
            _ => {}
        }
    }
    (n_full, n_split)
}

fn count_small_blocks(blocks: &[Block]) -> usize {
    blocks.iter().filter(|b| b.tracks.len() < SMALL_BLOCK_TRACK_COUNT).count()
}

fn score_angle(poly: &Polygon, width: f64) -> usize {
    let mut tracks = generate_parallel_tracks(poly, width);
    find_intersections(poly, &mut tracks);
    let (n_full, n_split) = count_tracks(&tracks);
    let blocks = split_center_into_blocks(tracks);
    let n_small_blocks = count_small_blocks(&blocks);
    50 * n_small_blocks + 20 * blocks.len() + 5 * n_split + n_full
}

/// Scan `angle = 0, 2, .. 178` degrees, rotating `inner_headland` by each
/// and scoring the resulting parallel fill; returns the angle (radians)
/// with the lowest score, smallest angle winning ties since the scan runs
/// in increasing order. Falls back to `inner_headland.best_direction.dir`
/// if no angle produced a usable fill (never actually empty in practice,
/// but guards a completely degenerate input).
pub fn find_best_track_angle(inner_headland: &Polygon, width: f64) -> f64 {
    let origin = rotation_origin(inner_headland);
    let mut best: Option<(usize, f64)> = None;

    let mut deg = 0;
    while deg < 180 {
        let angle = (deg as f64).to_radians();
        let mut rotated = rotate_polygon(inner_headland, origin, -angle);
        calculate_polygon_data(&mut rotated);
        let score = score_angle(&rotated, width);
        debug!("angle {deg} deg scored {score}");
        if best.map_or(true, |(best_score, _)| score < best_score) {
            best = Some((score, angle));
        }
        deg += crate::ANGLE_SCAN_STEP_DEGREES;
    }

    match best {
        Some((_, angle)) => angle,
        None => inner_headland.best_direction.map(|b| b.dir).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn an_axis_aligned_square_prefers_an_axis_aligned_angle() {
        let mut poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]);
        calculate_polygon_data(&mut poly);
        let angle = find_best_track_angle(&poly, 10.0);
        let deg = angle.to_degrees().rem_euclid(180.0);
        assert!(deg < 1e-6 || (deg - 90.0).abs() < 1e-6, "got {deg} degrees");
    }

    #[test]
    fn falls_back_to_best_direction_when_the_polygon_cannot_be_scored() {
        let mut poly = Polygon::from_points(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        calculate_polygon_data(&mut poly);
        // Degenerate (2 vertices): best_direction is None too, so the
        // fallback itself falls back to 0.0 rather than panicking.
        let angle = find_best_track_angle(&poly, 10.0);
        assert_relative_eq!(angle, 0.0);
    }
}
