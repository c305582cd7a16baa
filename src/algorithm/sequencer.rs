//! Walks the inner headland looking for block entry corners, and threads
//! each covered block's tracks into one continuous run once entered.

use crate::algorithm::kernel::PolygonIterator;
use crate::algorithm::reorder::reorder_tracks_for_alternate_fieldwork;
use crate::geometry::{Block, Intersection, Polygon, Track, Vertex};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

fn corner_hit(block: &Block, edge_index: usize) -> Option<Corner> {
    let matches = |i: &Option<Intersection>| i.map(|i| i.edge_index) == Some(edge_index);
    if matches(&block.bottom_left) {
        Some(Corner::BottomLeft)
    } else if matches(&block.bottom_right) {
        Some(Corner::BottomRight)
    } else if matches(&block.top_left) {
        Some(Corner::TopLeft)
    } else if matches(&block.top_right) {
        Some(Corner::TopRight)
    } else {
        None
    }
}

fn entry_orientation(corner: Corner) -> (bool, bool) {
    match corner {
        Corner::BottomLeft => (true, true),
        Corner::BottomRight => (true, false),
        Corner::TopLeft => (false, true),
        Corner::TopRight => (false, false),
    }
}

fn exit_corner_index(block: &Block, entry: Corner) -> Option<usize> {
    let even_track_count = block.tracks.len() % 2 == 0;
    let exit_bottom = match entry {
        Corner::BottomLeft | Corner::BottomRight => false,
        Corner::TopLeft | Corner::TopRight => true,
    };
    let entry_left = matches!(entry, Corner::BottomLeft | Corner::TopLeft);
    let exit_left = if even_track_count { entry_left } else { !entry_left };

    let exit = match (exit_bottom, exit_left) {
        (true, true) => block.bottom_left,
        (true, false) => block.bottom_right,
        (false, true) => block.top_left,
        (false, false) => block.top_right,
    };
    exit.map(|i| i.edge_index)
}

/// Walk the inner headland from vertex `from` to `to` with direction
/// `step`, looking for the first uncovered block whose recorded corner
/// intersection sits on a visited polygon edge. On a hit, marks the
/// block covered, records its entry orientation and the sub-path walked
/// to reach it, and returns the expected exit corner's headland index as
/// the new `(from, to)` pair together with the block's index. Returns
/// `None` if the headland walk exhausts without finding one.
pub fn find_track_to_next_block(
    blocks: &mut [Block],
    headland: &Polygon,
    from: usize,
    to: usize,
    step: i32,
) -> Option<(usize, usize, usize)> {
    if headland.is_empty() {
        return None;
    }
    let vertices = headland.vertices.clone();
    let mut walked = Vec::new();

    for (idx, v) in PolygonIterator::new(&vertices, from, to, step) {
        walked.push(*v);
        for (block_idx, block) in blocks.iter_mut().enumerate() {
            if block.covered {
                continue;
            }
            if let Some(corner) = corner_hit(block, idx) {
                let (bottom_to_top, left_to_right) = entry_orientation(corner);
                block.covered = true;
                block.bottom_to_top = bottom_to_top;
                block.left_to_right = left_to_right;
                block.track_to_this_block = walked.clone();

                let new_from = exit_corner_index(block, corner).unwrap_or(idx);
                let headland_len = headland.len();
                let new_to = ((new_from as i64 - step as i64).rem_euclid(headland_len as i64)) as usize;
                return Some((new_from, new_to, block_idx));
            }
        }
    }

    None
}

/// Thread one covered block's tracks into a single run of waypoints:
/// orient the track order by `bottom_to_top`, reorder by the skip-`n`
/// pattern, alternate waypoint direction track to track, and tag turn
/// boundaries at every internal track seam.
pub fn link_parallel_tracks(
    block_tracks: Vec<Track>,
    bottom_to_top: bool,
    left_to_right: bool,
    n_skip: usize,
) -> Vec<Vertex> {
    let mut tracks = block_tracks;
    if !bottom_to_top {
        tracks.reverse();
    }
    tracks = reorder_tracks_for_alternate_fieldwork(tracks, n_skip);

    let n_tracks = tracks.len();
    let mut result = Vec::new();
    for (i, track) in tracks.into_iter().enumerate() {
        let reverse_this = if left_to_right { i % 2 == 1 } else { i % 2 == 0 };
        let mut waypoints = track.waypoints;
        if reverse_this {
            waypoints.reverse();
        }
        if i > 0 {
            if let Some(first) = waypoints.first_mut() {
                first.turn_end = true;
            }
        }
        if i + 1 < n_tracks {
            if let Some(last) = waypoints.last_mut() {
                last.turn_start = true;
            }
        }
        result.extend(waypoints);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Intersection, Point};

    fn headland_square(side: f64) -> Polygon {
        Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
    }

    fn intersection_at(edge_index: usize, x: f64, y: f64) -> Intersection {
        Intersection { point: Point::new(x, y), edge_index }
    }

    #[test]
    fn entering_at_the_bottom_left_corner_orients_bottom_to_top_and_left_to_right() {
        let headland = headland_square(100.0);
        let mut block = Block::new();
        block.bottom_left = Some(intersection_at(0, 10.0, 10.0));
        block.bottom_right = Some(intersection_at(0, 90.0, 10.0));
        block.top_left = Some(intersection_at(1, 10.0, 90.0));
        block.top_right = Some(intersection_at(1, 90.0, 90.0));
        block.tracks = vec![Track::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0)); 3];
        let mut blocks = vec![block];

        let result = find_track_to_next_block(&mut blocks, &headland, 0, 3, 1);
        assert!(result.is_some());
        assert!(blocks[0].covered);
        assert!(blocks[0].bottom_to_top);
        assert!(blocks[0].left_to_right);
    }

    #[test]
    fn odd_track_count_exits_on_the_opposite_horizontal_side() {
        let headland = headland_square(100.0);
        let mut block = Block::new();
        block.bottom_left = Some(intersection_at(0, 10.0, 10.0));
        block.bottom_right = Some(intersection_at(0, 90.0, 10.0));
        block.top_left = Some(intersection_at(1, 10.0, 90.0));
        block.top_right = Some(intersection_at(1, 90.0, 90.0));
        block.tracks = vec![Track::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0)); 3];
        let mut blocks = vec![block];

        let (new_from, _, _) = find_track_to_next_block(&mut blocks, &headland, 0, 3, 1).unwrap();
        // entered bottom-left (edge 0); odd track count flips to the right side, still top.
        let expected_exit_edge = blocks[0].top_right.unwrap().edge_index;
        assert_eq!(new_from, expected_exit_edge);
    }

    #[test]
    fn no_uncovered_block_on_the_walked_edges_returns_none() {
        let headland = headland_square(100.0);
        let mut block = Block::new();
        block.bottom_left = Some(intersection_at(2, 10.0, 10.0));
        block.bottom_right = Some(intersection_at(2, 90.0, 10.0));
        block.top_left = Some(intersection_at(2, 10.0, 90.0));
        block.top_right = Some(intersection_at(2, 90.0, 90.0));
        let mut blocks = vec![block];

        let result = find_track_to_next_block(&mut blocks, &headland, 0, 0, 1);
        assert!(result.is_none());
        assert!(!blocks[0].covered);
    }

    #[test]
    fn link_parallel_tracks_tags_turn_boundaries_between_tracks() {
        let mut t1 = Track::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        t1.waypoints = vec![Vertex::new(Point::new(0.0, 0.0)), Vertex::new(Point::new(10.0, 0.0))];
        let mut t2 = Track::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
        t2.waypoints = vec![Vertex::new(Point::new(0.0, 5.0)), Vertex::new(Point::new(10.0, 5.0))];

        let result = link_parallel_tracks(vec![t1, t2], true, true, 0);
        assert_eq!(result.len(), 4);
        assert!(result[1].turn_start);
        assert!(result[2].turn_end);
    }
}
