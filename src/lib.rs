#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations)]
//! Geometric coverage-path planning for agricultural field operations.
//!
//! Given the closed polygonal boundary of a field, an implement working
//! width, and a small number of tunable parameters (see [`PlannerConfig`]),
//! [`generate_course_for_field`] produces a continuous ordered sequence of
//! waypoints a vehicle can follow to cover the field's interior: a spiral
//! *headland* path of one or more concentric boundary passes, followed by
//! an up/down *center* fill of parallel tracks.
//!
//! # Pipeline
//!
//! ```text
//! boundary -> analyzer -> headland generator -> linker -> angle selector
//!          -> center filler -> block sequencer -> course
//! ```
//!
//! Each stage is a free function in [`algorithm`], operating on the data
//! types in [`geometry`]. [`Field`] is the aggregate that owns the full
//! derived graph once planning completes.
//!
//! Field-boundary import from a serialized course store, course
//! persistence, and CLI invocation are outside this crate's scope; the
//! [`Point`]/[`Polygon`]/[`PlannerConfig`]/[`Field`] types derive `serde`
//! support (behind the default `serde` feature) so a host application can
//! attach those concerns without this crate depending on any file format.

pub mod algorithm;
mod config;
mod error;
pub mod geometry;

mod field;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use field::{generate_course_for_field, Field};
pub use geometry::{Block, Edge, HeadlandTrack, Intersection, Point, Polygon, Rect, Track, Vertex};
pub use algorithm::smoother::{ChaikinSmoother, Smoother};

#[cfg(test)]
#[macro_use]
extern crate approx;

/// Floating-point comparison tolerance used throughout the crate, per the
/// planner's equality-tolerance design (ties breaking, offset saturation,
/// near-vertical guards, ...).
pub const EPSILON: f64 = 1.0e-5;

/// Default waypoint spacing along a track, in meters.
pub const WAYPOINT_SPACING: f64 = 5.0;

/// Default maximum search distance, in meters, for the headland linker's
/// ray cast between concentric passes.
pub const MAX_RAY_DISTANCE: f64 = 30.0;

/// Angle scan step, in degrees, used by the angle selector (`0, 2, .. 178`).
pub const ANGLE_SCAN_STEP_DEGREES: i32 = 2;

/// Iteration cap for the inward-offset grassfire loop; a safety bound on
/// runtime, not a correctness requirement.
pub const OFFSET_ITERATION_CAP: usize = 50;
