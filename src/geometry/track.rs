use crate::geometry::{Point, Vertex};

/// A point where a scan line crosses a polygon edge, tagged with the index
/// of that edge within the source polygon. Stored as a plain index rather
/// than a back-pointer, per this crate's indexing convention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    pub point: Point,
    pub edge_index: usize,
}

/// A straight scan line. In the rotated working frame used by the center
/// filler this is horizontal (`from.y == to.y`), spanning the full
/// bounding-box x range; its `intersections` are the points where it
/// crosses the inner headland, kept sorted by ascending x.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub from: Point,
    pub to: Point,
    pub intersections: Vec<Intersection>,
    pub waypoints: Vec<Vertex>,
}

impl Track {
    pub fn new(from: Point, to: Point) -> Self {
        Track {
            from,
            to,
            intersections: Vec::new(),
            waypoints: Vec::new(),
        }
    }

    /// Insert `intersection` keeping [`Track::intersections`] sorted by
    /// ascending x, as required by the data model invariant.
    pub fn insert_intersection(&mut self, intersection: Intersection) {
        let pos = self
            .intersections
            .partition_point(|existing| existing.point.x < intersection.point.x);
        self.intersections.insert(pos, intersection);
    }
}
