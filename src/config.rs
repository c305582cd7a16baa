use crate::geometry::Point;

/// Tunable parameters for one call to [`crate::generate_course_for_field`].
///
/// Bundles what the distilled planner passes as a long positional argument
/// list (`implementWidth, nHeadlandPasses, headlandClockwise, ...`) into a
/// single serde-(de)serializable record, so a host can load it from
/// whatever configuration format it likes without this crate caring.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Transverse working width of the attached implement, in meters.
    /// Governs both headland offset spacing and center-track spacing.
    pub implement_width: f64,

    /// Number of concentric headland passes to attempt. Fewer may be
    /// produced if an offset degenerates before this count is reached.
    pub n_headland_passes: usize,

    /// Desired direction of travel around the headland spiral. `None`
    /// means "whatever the boundary's own orientation is".
    pub headland_clockwise: Option<bool>,

    /// Vehicle's starting location, used to pick the headland's entry
    /// vertex on the outermost pass.
    pub headland_start_location: Point,

    /// Percentage by which consecutive headland/track passes overlap,
    /// reducing the effective spacing below `implement_width`.
    pub overlap_percent: f64,

    /// When `true`, the outer boundary itself is used as headland pass 1
    /// (zero offset); when `false`, pass 1 is offset inward by half the
    /// effective width, like every subsequent pass is offset by the full
    /// effective width (see DESIGN.md for the resolved open question).
    pub use_boundary_as_first_headland_pass: bool,

    /// `N` in the skip-N track reorder: visit every `(N+1)`-th track
    /// forward, then sweep the remainder backward.
    pub n_tracks_to_skip: usize,

    /// Extra length added to each end of a center track past its
    /// geometric intersection with the inner headland (meters); negative
    /// values shorten a track instead.
    pub extend_tracks: f64,

    /// Minimum spacing between reconstructed offset vertices before the
    /// low-pass filter merges them.
    pub min_vertex_distance: f64,

    /// Corner-sharpness threshold (radians) the [`crate::Smoother`] uses
    /// to decide which corners to cut.
    pub angle_threshold: f64,

    /// Whether to run the smoother at all (headland corners and the
    /// linked headland path).
    pub do_smooth: bool,
}

impl Default for PlannerConfig {
    /// Defaults chosen for a typical mid-size implement; every numeric
    /// default here is a reasonable starting point, not a constant the
    /// planner's correctness depends on (those live as crate-level
    /// `const`s: [`crate::WAYPOINT_SPACING`], [`crate::MAX_RAY_DISTANCE`],
    /// [`crate::OFFSET_ITERATION_CAP`]).
    fn default() -> Self {
        PlannerConfig {
            implement_width: 6.0,
            n_headland_passes: 3,
            headland_clockwise: None,
            headland_start_location: Point::new(0.0, 0.0),
            overlap_percent: 0.0,
            use_boundary_as_first_headland_pass: false,
            n_tracks_to_skip: 0,
            extend_tracks: 0.0,
            min_vertex_distance: 1.0,
            angle_threshold: 10.0_f64.to_radians(),
            do_smooth: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_positive_width_and_no_smoothing_surprises() {
        let cfg = PlannerConfig::default();
        assert!(cfg.implement_width > 0.0);
        assert!(cfg.n_headland_passes >= 1);
        assert!(cfg.angle_threshold > 0.0);
    }
}
