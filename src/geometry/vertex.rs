use crate::geometry::{Edge, Point};

/// A `Point` together with every decoration the planner may attach to it.
///
/// A bare polygon vertex only ever has `prev_edge`/`next_edge`/`tangent`
/// populated (by [`crate::algorithm::analyzer::calculate_polygon_data`]). A
/// waypoint in the final course only ever has `turn_start`/`turn_end`/
/// `pass_number`/`track` populated (by the linker and sequencer). Keeping
/// both kinds of decoration on one record, rather than splicing fields in
/// ad hoc at each call site, means every stage can pass `Vertex` around
/// uniformly and simply ignore the fields it doesn't use.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub point: Point,
    pub prev_edge: Option<Edge>,
    pub next_edge: Option<Edge>,
    pub tangent: Option<Point>,
    pub turn_start: bool,
    pub turn_end: bool,
    pub pass_number: Option<usize>,
    pub track: Option<usize>,
}

impl Vertex {
    pub fn new(point: Point) -> Self {
        Vertex {
            point,
            prev_edge: None,
            next_edge: None,
            tangent: None,
            turn_start: false,
            turn_end: false,
            pass_number: None,
            track: None,
        }
    }
}

impl From<Point> for Vertex {
    fn from(point: Point) -> Self {
        Vertex::new(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_carries_no_decoration() {
        let v = Vertex::new(Point::new(1.0, 2.0));
        assert!(v.prev_edge.is_none());
        assert!(v.next_edge.is_none());
        assert!(!v.turn_start);
        assert!(!v.turn_end);
        assert!(v.pass_number.is_none());
    }
}
