//! 2D geometry primitives shared by every other algorithm in this crate:
//! polar conversion, angle arithmetic, segment intersection, circular
//! polygon indexing, and the small set of affine helpers (rotate,
//! translate, bounding box, closest point) the higher-level stages build
//! on.

use std::f64::consts::PI;

use crate::geometry::{Point, Polygon, Rect};

/// Decompose a vector `(x, y)` into `(angle, length)`.
///
/// `angle` is returned in the canonical range `(-π, π]`. Near `x ≈ 0` (or
/// when `|y / x|` would blow up past 1000) this returns `±π/2` with the
/// sign of `y`, rather than relying on the ordinary `atan2` branch cut —
/// the same guard the reference planner uses to stay numerically stable
/// right at the vertical.
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    let length = (x * x + y * y).sqrt();
    let near_vertical = x.abs() < crate::EPSILON || (x != 0.0 && (y / x).abs() > 1000.0);
    let angle = if near_vertical {
        if y >= 0.0 {
            PI / 2.0
        } else {
            -PI / 2.0
        }
    } else {
        y.atan2(x)
    };
    (angle, length)
}

/// The inverse of [`to_polar`]: the point obtained by walking `length`
/// meters from `p` in direction `angle` (radians).
pub fn add_polar_vector_to_point(p: Point, angle: f64, length: f64) -> Point {
    Point::new(p.x + angle.cos() * length, p.y + angle.sin() * length)
}

/// Reduce an angle into the canonical range `(-π, π]`.
pub fn normalize_angle(mut a: f64) -> f64 {
    while a <= -PI {
        a += 2.0 * PI;
    }
    while a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// The signed difference `a - b`, normalized into `(-π, π]`.
///
/// `delta_angle(a, b) + delta_angle(b, a) == 0`, modulo the ±π boundary
/// where both sides normalize to `π`.
pub fn delta_angle(a: f64, b: f64) -> f64 {
    normalize_angle(a - b)
}

/// The angle "between" `a` and `b`, handling the ±π wrap: if the raw
/// difference exceeds π, both angles are shifted into `[0, 2π)` before
/// averaging so that e.g. averaging -178° and +176° gives +179°, not an
/// angle on the opposite side of the circle.
pub fn average_angle(a: f64, b: f64) -> f64 {
    let (mut a2, mut b2) = (a, b);
    if (a - b).abs() > PI {
        if a2 < 0.0 {
            a2 += 2.0 * PI;
        }
        if b2 < 0.0 {
            b2 += 2.0 * PI;
        }
    }
    normalize_angle((a2 + b2) / 2.0)
}

/// Parametric intersection of segment `a1..a2` with segment `b1..b2`.
///
/// Returns `Some` only when both intersection parameters lie in `[0, 1]`,
/// i.e. the intersection point lies on both segments, not merely on the
/// lines through them. Colinear segments (zero cross product of the
/// direction vectors) never intersect under this definition, even if they
/// overlap.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = (a2.x - a1.x, a2.y - a1.y);
    let s = (b2.x - b1.x, b2.y - b1.y);
    let denom = r.0 * s.1 - r.1 * s.0;
    if denom.abs() < crate::EPSILON {
        return None;
    }
    let qp = (b1.x - a1.x, b1.y - a1.y);
    let t = (qp.0 * s.1 - qp.1 * s.0) / denom;
    let u = (qp.0 * r.1 - qp.1 * r.0) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(a1.x + t * r.0, a1.y + t * r.1))
    } else {
        None
    }
}

/// Intersection of the infinite lines through `a1..a2` and `b1..b2`,
/// unlike [`segment_intersection`] which clamps to the segments
/// themselves. Used by the headland offset generator to reconstruct a
/// corner vertex from two translated edges that may no longer overlap at
/// their original endpoints. Returns `None` only when the lines are
/// parallel.
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let r = (a2.x - a1.x, a2.y - a1.y);
    let s = (b2.x - b1.x, b2.y - b1.y);
    let denom = r.0 * s.1 - r.1 * s.0;
    if denom.abs() < crate::EPSILON {
        return None;
    }
    let qp = (b1.x - a1.x, b1.y - a1.y);
    let t = (qp.0 * s.1 - qp.1 * s.0) / denom;
    Some(Point::new(a1.x + t * r.0, a1.y + t * r.1))
}

fn step_index(idx: usize, step: i32, len: usize) -> usize {
    (idx as i64 + step as i64).rem_euclid(len as i64) as usize
}

/// Map any integer `i` onto the circular 1-based range `[1, len]`: `0` maps
/// to `len`, negative indices wrap from the end, and indices past `len`
/// wrap from the start.
///
/// This is the one place circular index arithmetic is implemented; every
/// iterator and neighborhood lookup in the crate routes through it (or its
/// 0-based sibling, [`polygon_index0`]).
pub fn polygon_index(len: usize, i: i64) -> usize {
    assert!(len > 0, "polygon_index is undefined for an empty polygon");
    (((i - 1).rem_euclid(len as i64)) + 1) as usize
}

/// The 0-based counterpart of [`polygon_index`], for indexing directly
/// into a `Vec`-backed polygon.
pub fn polygon_index0(len: usize, i: i64) -> usize {
    polygon_index(len, i) - 1
}

/// Reverse a sequence, returning a new `Vec` rather than mutating in place.
pub fn reverse<T: Clone>(seq: &[T]) -> Vec<T> {
    seq.iter().rev().cloned().collect()
}

/// Lazily traverses a slice as a circular ring: starting at `from`,
/// stepping by `step` (`+1` or `-1`), and terminating only after the
/// *next* visit to `to` — not the starting visit. Passing `to == from`
/// therefore walks one full circle: it revisits the start only after every
/// other vertex has been emitted.
pub struct PolygonIterator<'a, T> {
    items: &'a [T],
    to: usize,
    step: i32,
    current: usize,
    started: bool,
    done: bool,
}

impl<'a, T> PolygonIterator<'a, T> {
    pub fn new(items: &'a [T], from: usize, to: usize, step: i32) -> Self {
        assert!(step == 1 || step == -1, "step must be +1 or -1");
        assert!(!items.is_empty(), "cannot iterate an empty polygon");
        PolygonIterator {
            items,
            to,
            step,
            current: from,
            started: false,
            done: false,
        }
    }
}

impl<'a, T> Iterator for PolygonIterator<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            // The starting vertex is always emitted, and never checked
            // against `to` — that check only applies to later visits, which
            // is what makes `to == from` walk a full circle.
            self.started = true;
            let idx = self.current;
            return Some((idx, &self.items[idx]));
        }
        let idx = step_index(self.current, self.step, self.items.len());
        self.current = idx;
        if idx == self.to {
            self.done = true;
        }
        Some((idx, &self.items[idx]))
    }
}

/// Bounding rectangle enclosing every point in `points`, or `None` if
/// `points` is empty.
pub fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Rect::new(min, max))
}

/// The stable rotation origin used whenever a polygon is rotated into a
/// working frame (the angle selector's per-angle scan, and the center
/// filler's rotation into the chosen frame): its own bounding-box center,
/// so the rotated polygon stays close to the origin regardless of where
/// the field sits in the world, rather than rotating about `(0, 0)` and
/// potentially landing far from it.
pub fn rotation_origin(poly: &Polygon) -> Point {
    match poly.bounding_box {
        Some(bb) => Point::new((bb.min.x + bb.max.x) / 2.0, (bb.min.y + bb.max.y) / 2.0),
        None => Point::new(0.0, 0.0),
    }
}

/// Rotate `p` around `origin` by `angle` radians (counter-clockwise for a
/// positive angle, in a standard mathematical frame).
pub fn rotate_point(p: Point, origin: Point, angle: f64) -> Point {
    let (sin_a, cos_a) = angle.sin_cos();
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    Point::new(
        origin.x + dx * cos_a - dy * sin_a,
        origin.y + dx * sin_a + dy * cos_a,
    )
}

/// Rotate every point of `poly` around `origin`. The result is *not*
/// re-analyzed: callers that need `is_clockwise`, edges, etc. on the
/// rotated polygon must run
/// [`crate::algorithm::analyzer::calculate_polygon_data`] on it.
pub fn rotate_polygon(poly: &Polygon, origin: Point, angle: f64) -> Polygon {
    Polygon::from_points(poly.points().map(|p| rotate_point(p, origin, angle)))
}

/// Translate `p` by `(dx, dy)`.
pub fn translate_point(p: Point, dx: f64, dy: f64) -> Point {
    Point::new(p.x + dx, p.y + dy)
}

/// Translate every point of `poly` by `(dx, dy)`. Like [`rotate_polygon`],
/// the result is not re-analyzed.
pub fn translate_polygon(poly: &Polygon, dx: f64, dy: f64) -> Polygon {
    Polygon::from_points(poly.points().map(|p| translate_point(p, dx, dy)))
}

/// The point on segment `a..b` closest to `p`, clamping the projection
/// parameter to `[0, 1]` so the result always lies on the segment proper.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq < crate::EPSILON {
        return a;
    }
    let t = ((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq;
    let t = t.clamp(0.0, 1.0);
    Point::new(a.x + t * abx, a.y + t * aby)
}
