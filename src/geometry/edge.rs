use crate::algorithm::kernel::to_polar;
use crate::geometry::Point;

/// A directed straight segment between two points, with its polar
/// decomposition precomputed.
///
/// `angle` is `atan2(dy, dx)`, using the safe branch of [`to_polar`] near
/// `dx ≈ 0`. An `Edge` is attached bidirectionally on the two vertices it
/// touches: the vertex it starts at stores it as `next_edge`, the vertex it
/// ends at stores it as `prev_edge`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    pub angle: f64,
    pub length: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Edge {
    pub fn new(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let (angle, length) = to_polar(dx, dy);
        Edge {
            from,
            to,
            angle,
            length,
            dx,
            dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_edge_has_zero_angle() {
        let e = Edge::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        assert_relative_eq!(e.angle, 0.0);
        assert_relative_eq!(e.length, 5.0);
    }

    #[test]
    fn vertical_edge_uses_the_safe_branch() {
        let e = Edge::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0));
        assert_relative_eq!(e.angle, std::f64::consts::FRAC_PI_2);
    }
}
