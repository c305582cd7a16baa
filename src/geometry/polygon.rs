use std::collections::BTreeMap;

use crate::geometry::{Point, Rect, Vertex};

/// One 10°-wide bin of [`Polygon::direction_stats`]: the total edge length
/// that fell in this bin, and the individual edge angles that contributed
/// to it (kept so the bin's mean direction can be recovered).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionBin {
    pub total_length: f64,
    pub angles: Vec<f64>,
}

/// The directional histogram bin with the greatest accumulated edge
/// length, and the arithmetic mean of the angles that landed in it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestDirection {
    /// Bin center in degrees, e.g. `5.0`, `15.0`, ...
    pub bin: i32,
    /// Mean of the contributing angles, in radians, floored to whole degrees
    /// and converted back, per the distilled spec's `floor(mean)` rule.
    pub dir: f64,
}

/// An ordered ring of vertices, closed implicitly (the last vertex connects
/// back to the first). Decorated in place by
/// [`crate::algorithm::analyzer::calculate_polygon_data`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Vertex>,
    pub bounding_box: Option<Rect>,
    pub is_clockwise: bool,
    pub shortest_edge_length: f64,
    pub direction_stats: BTreeMap<i32, DirectionBin>,
    pub best_direction: Option<BestDirection>,
}

impl Polygon {
    /// Build a polygon from raw points, removing consecutive duplicates
    /// (within [`crate::EPSILON`]) but not yet analyzing it — callers run
    /// [`crate::algorithm::analyzer::calculate_polygon_data`] for that.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut vertices: Vec<Vertex> = Vec::new();
        for p in points {
            if let Some(last) = vertices.last() {
                if last.point.approx_eq(&p) {
                    continue;
                }
            }
            vertices.push(Vertex::new(p));
        }
        if vertices.len() > 1 && vertices[0].point.approx_eq(&vertices[vertices.len() - 1].point) {
            vertices.pop();
        }
        Polygon {
            vertices,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|v| v.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_drops_a_repeated_closing_vertex() {
        let poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn from_points_drops_consecutive_duplicates() {
        let poly = Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(poly.len(), 3);
    }
}
