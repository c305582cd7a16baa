//! Splits the set of scan lines crossing the field interior into maximal
//! runs of mutually x-overlapping tracks ("blocks") that can be worked
//! without re-entering the headland. Implemented as an explicit loop over
//! passes rather than recursion: each pass peels the two leftmost
//! intersections off every still-qualifying scan line, so a scan line
//! crossed more than twice (a concave notch) only gives up one pair per
//! pass and is revisited on the next.

use crate::geometry::{Block, Intersection, Track};

/// Do the x-ranges spanned by `t1` and `t2`'s (exactly two) intersections
/// overlap?
pub fn overlaps(t1: &Track, t2: &Track) -> bool {
    if t1.intersections.len() < 2 || t2.intersections.len() < 2 {
        return false;
    }
    let (a0, a1) = (t1.intersections[0].point.x, t1.intersections[1].point.x);
    let (b0, b1) = (t2.intersections[0].point.x, t2.intersections[1].point.x);
    let (a_min, a_max) = (a0.min(a1), a0.max(a1));
    let (b_min, b_max) = (b0.min(b1), b0.max(b1));
    a_min <= b_max + crate::EPSILON && b_min <= a_max + crate::EPSILON
}

/// One forward sweep over `remaining`: pop at most one pair of leftmost
/// intersections per scan line (in the order the scan lines were
/// generated, i.e. ascending y), growing the current block as long as
/// each new candidate overlaps the previously added one, and starting a
/// fresh block the moment it doesn't.
fn one_pass(remaining: &mut [Track]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Block::new();

    for src in remaining.iter_mut() {
        if src.intersections.len() < 2 {
            continue;
        }
        let pair: Vec<Intersection> = src.intersections.drain(0..2).collect();
        let candidate = Track {
            from: src.from,
            to: src.to,
            intersections: pair,
            waypoints: Vec::new(),
        };

        let starts_new_block = match current.tracks.last() {
            None => false,
            Some(last) => !overlaps(last, &candidate),
        };
        if starts_new_block {
            current.set_corners_from_tracks();
            blocks.push(std::mem::take(&mut current));
        }
        current.tracks.push(candidate);
    }

    if !current.tracks.is_empty() {
        current.set_corners_from_tracks();
        blocks.push(current);
    }
    blocks
}

/// Split `tracks` into blocks. Every contained track ends up with exactly
/// two intersections (the data model invariant); a source track crossed
/// more than twice contributes to more than one block, peeled off a pair
/// at a time across successive passes.
pub fn split_center_into_blocks(tracks: Vec<Track>) -> Vec<Block> {
    let mut remaining = tracks;
    let mut all_blocks = Vec::new();

    loop {
        let pass_blocks = one_pass(&mut remaining);
        if pass_blocks.is_empty() {
            break;
        }
        all_blocks.extend(pass_blocks);
        if !remaining.iter().any(|t| t.intersections.len() >= 2) {
            break;
        }
    }

    all_blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Intersection, Point};

    fn track_with(xs: &[f64], y: f64) -> Track {
        let mut t = Track::new(Point::new(-1000.0, y), Point::new(1000.0, y));
        for (i, &x) in xs.iter().enumerate() {
            t.intersections.push(Intersection {
                point: Point::new(x, y),
                edge_index: i,
            });
        }
        t
    }

    #[test]
    fn a_single_convex_column_is_one_block() {
        let tracks = vec![
            track_with(&[0.0, 10.0], 0.0),
            track_with(&[0.0, 10.0], 1.0),
            track_with(&[0.0, 10.0], 2.0),
        ];
        let blocks = split_center_into_blocks(tracks);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tracks.len(), 3);
        for t in &blocks[0].tracks {
            assert_eq!(t.intersections.len(), 2);
        }
    }

    #[test]
    fn a_gap_between_scan_lines_splits_into_two_blocks() {
        let tracks = vec![
            track_with(&[0.0, 10.0], 0.0),
            track_with(&[0.0, 10.0], 1.0),
            track_with(&[50.0, 60.0], 2.0),
            track_with(&[50.0, 60.0], 3.0),
        ];
        let blocks = split_center_into_blocks(tracks);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tracks.len(), 2);
        assert_eq!(blocks[1].tracks.len(), 2);
    }

    #[test]
    fn a_notch_scan_line_with_four_intersections_feeds_two_blocks() {
        // A U-shaped interior: the middle scan line crosses the boundary
        // four times (two separate spans at that height).
        let tracks = vec![
            track_with(&[0.0, 10.0, 20.0, 30.0], 0.0),
            track_with(&[0.0, 30.0], 1.0),
        ];
        let blocks = split_center_into_blocks(tracks);
        assert_eq!(blocks.len(), 2);
        let total_tracks: usize = blocks.iter().map(|b| b.tracks.len()).sum();
        assert_eq!(total_tracks, 3);
    }

    #[test]
    fn every_produced_track_has_exactly_two_ascending_intersections() {
        let tracks = vec![
            track_with(&[0.0, 10.0, 20.0, 30.0], 0.0),
            track_with(&[0.0, 30.0], 1.0),
            track_with(&[2.0, 28.0], 2.0),
        ];
        let blocks = split_center_into_blocks(tracks);
        for b in &blocks {
            for t in &b.tracks {
                assert_eq!(t.intersections.len(), 2);
                assert!(t.intersections[0].point.x <= t.intersections[1].point.x);
            }
        }
    }
}
