//! The planner's single public entry point: orchestrates every stage in
//! [`crate::algorithm`] over one [`Field`] and fills in its derived
//! members in the pipeline order described in the crate's module docs.

use log::{info, warn};

use crate::algorithm::analyzer::calculate_polygon_data;
use crate::algorithm::angle_selector::find_best_track_angle;
use crate::algorithm::block_splitter::split_center_into_blocks;
use crate::algorithm::center_filler::{add_waypoints_to_tracks, find_intersections, generate_parallel_tracks};
use crate::algorithm::headland::generate_headland_tracks;
use crate::algorithm::kernel::{rotate_point, rotate_polygon, rotation_origin};
use crate::algorithm::linker::link_headland_tracks;
use crate::algorithm::sequencer::{find_track_to_next_block, link_parallel_tracks};
use crate::algorithm::smoother::Smoother;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::geometry::{Block, HeadlandTrack, Point, Polygon, Rect, Track, Vertex};

/// The aggregate a planning call operates on: the input boundary plus
/// every derived structure the pipeline produces. A caller constructs one
/// with [`Field::new`], passes it to [`generate_course_for_field`], and
/// reads the derived fields back off it once planning returns.
///
/// `Field` owns the full derived graph; every stage in [`crate::algorithm`]
/// only ever borrows from it, per this crate's ownership model (see the
/// crate's top-level docs).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// The input boundary, decorated in place by
    /// [`calculate_polygon_data`] once planning runs.
    pub boundary: Polygon,

    /// The concentric inward-offset passes, outermost first.
    pub headland_tracks: Vec<HeadlandTrack>,

    /// The spiral path linking every headland pass into one continuous
    /// run, in the order it would be driven.
    pub headland_path: Vec<Vertex>,

    /// Every parallel scan line generated over the inner headland, in the
    /// rotated working frame chosen by the angle selector (constant `y`
    /// per track, per the data model).
    pub track: Vec<Track>,

    /// The final composed course: `headland_path` followed by, for each
    /// sequenced block, its connecting sub-path and its waypoints, in
    /// driving order.
    pub course: Vec<Vertex>,

    /// The connecting sub-path from the headland exit (or the previous
    /// block's exit) to each sequenced block's entry corner, in the order
    /// the blocks were sequenced.
    pub connecting_tracks: Vec<Vec<Vertex>>,

    /// The scan-line angle chosen by the angle selector, in radians.
    pub best_angle: f64,

    /// Total number of parallel scan lines generated (`track.len()`).
    pub n_tracks: usize,

    /// Bounding box of the input boundary.
    pub bounding_box: Option<Rect>,

    /// Orientation of the input boundary.
    pub is_clockwise: bool,

    /// Indices, into the internal block list built during this call, of
    /// blocks the sequencer never reached. Resolves the distilled spec's
    /// open question about `find_track_to_next_block` silently dropping
    /// unreachable blocks: this crate records the residual instead (see
    /// DESIGN.md).
    pub uncovered_blocks: Vec<usize>,
}

impl Field {
    /// A fresh `Field` around `boundary`, with every derived member empty.
    /// Run [`generate_course_for_field`] to populate them.
    pub fn new(boundary: Polygon) -> Self {
        Field {
            boundary,
            ..Default::default()
        }
    }
}

fn effective_width(config: &PlannerConfig) -> f64 {
    config.implement_width * (1.0 - config.overlap_percent / 100.0)
}

/// Rotate a freshly split block's tracks (and corner intersections) from
/// the angle selector's working frame back into the field's own
/// coordinates, so its waypoints can be concatenated onto `headland_path`
/// and `connecting_tracks` (both already in that frame) to form a
/// contiguous [`Field::course`].
fn rotate_block_to_world(block: &Block, origin: Point, angle: f64) -> Block {
    let mut out = block.clone();
    for track in &mut out.tracks {
        track.from = rotate_point(track.from, origin, angle);
        track.to = rotate_point(track.to, origin, angle);
        for i in &mut track.intersections {
            i.point = rotate_point(i.point, origin, angle);
        }
        for w in &mut track.waypoints {
            w.point = rotate_point(w.point, origin, angle);
        }
    }
    for corner in [
        &mut out.bottom_left,
        &mut out.bottom_right,
        &mut out.top_left,
        &mut out.top_right,
    ] {
        if let Some(i) = corner {
            i.point = rotate_point(i.point, origin, angle);
        }
    }
    out
}

/// Run the full planning pipeline over `field.boundary`, filling in every
/// derived member described on [`Field`].
///
/// Validates only that the boundary has at least 3 distinct vertices
/// (else [`PlannerError::BoundaryTooShort`]); every other failure mode —
/// a degenerate offset, a link failure between passes, an empty interior,
/// an unscoreable angle, or blocks the sequencer never reaches — is a
/// local, best-effort recovery reported through [`log::warn!`] and a flag
/// or residual list on the relevant data, never an `Err` (see the crate's
/// error handling design).
pub fn generate_course_for_field(
    field: &mut Field,
    config: &PlannerConfig,
    smoother: &dyn Smoother,
) -> Result<(), PlannerError> {
    info!(
        "generate_course_for_field: {} boundary vertices, implement_width={}, n_headland_passes={}",
        field.boundary.len(),
        config.implement_width,
        config.n_headland_passes,
    );

    calculate_polygon_data(&mut field.boundary);
    if field.boundary.len() < 3 {
        return Err(PlannerError::BoundaryTooShort {
            found: field.boundary.len(),
        });
    }
    field.bounding_box = field.boundary.bounding_box;
    field.is_clockwise = field.boundary.is_clockwise;

    field.headland_tracks = generate_headland_tracks(&field.boundary, config, smoother);
    info!("generated {} headland pass(es)", field.headland_tracks.len());

    field.headland_path = link_headland_tracks(&mut field.headland_tracks, config, smoother);

    let Some(inner) = field.headland_tracks.last() else {
        warn!("no headland passes were produced; course is empty");
        field.course = field.headland_path.clone();
        return Ok(());
    };
    let inner_headland = inner.polygon.clone();
    if inner_headland.len() < 3 {
        warn!("inner headland degenerated before the center fill could run");
        field.course = field.headland_path.clone();
        return Ok(());
    }

    let width = effective_width(config);
    field.best_angle = find_best_track_angle(&inner_headland, width);

    let origin = rotation_origin(&inner_headland);
    let mut rotated = rotate_polygon(&inner_headland, origin, -field.best_angle);
    calculate_polygon_data(&mut rotated);

    let mut tracks = generate_parallel_tracks(&rotated, width);
    find_intersections(&rotated, &mut tracks);
    add_waypoints_to_tracks(&mut tracks, width, config.extend_tracks);
    field.n_tracks = tracks.len();
    field.track = tracks.clone();

    if tracks.iter().all(|t| t.intersections.len() < 2) {
        warn!("interior has no scan line with at least two intersections; course is headland-only");
        field.course = field.headland_path.clone();
        field.connecting_tracks = Vec::new();
        return Ok(());
    }

    let blocks = split_center_into_blocks(tracks);
    let mut world_blocks: Vec<Block> = blocks
        .iter()
        .map(|b| rotate_block_to_world(b, origin, field.best_angle))
        .collect();

    let mut course = field.headland_path.clone();
    let mut connecting_tracks = Vec::new();

    // Start the sequencer at the headland exit point: where the linker
    // stopped walking the innermost pass. `to == from` walks one full
    // circle on the first search, per `PolygonIterator`'s convention;
    // each subsequent search resumes from the previous block's returned
    // exit index, already one step short of a full circle.
    let last_pass = field.headland_tracks.last().expect("checked non-empty above");
    let step = last_pass.circle_step.unwrap_or(1);
    let mut from = last_pass.circle_end.unwrap_or(0);
    let mut to = from;

    for _ in 0..=world_blocks.len() {
        match find_track_to_next_block(&mut world_blocks, &inner_headland, from, to, step) {
            Some((new_from, new_to, block_idx)) => {
                let block = &mut world_blocks[block_idx];
                let connecting: Vec<Vertex> = std::mem::take(&mut block.track_to_this_block);
                course.extend(connecting.iter().copied());
                connecting_tracks.push(connecting);

                let block_tracks = std::mem::take(&mut block.tracks);
                let linked = link_parallel_tracks(
                    block_tracks,
                    block.bottom_to_top,
                    block.left_to_right,
                    config.n_tracks_to_skip,
                );
                course.extend(linked);

                from = new_from;
                to = new_to;
            }
            None => break,
        }
    }

    let uncovered: Vec<usize> = world_blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.covered)
        .map(|(i, _)| i)
        .collect();
    if !uncovered.is_empty() {
        warn!(
            "sequencer left {} of {} block(s) uncovered",
            uncovered.len(),
            world_blocks.len()
        );
    }
    field.uncovered_blocks = uncovered;
    field.course = course;
    field.connecting_tracks = connecting_tracks;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::smoother::ChaikinSmoother;
    use crate::geometry::Point;

    fn square(side: f64) -> Polygon {
        Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
    }

    #[test]
    fn rejects_a_boundary_with_fewer_than_three_vertices() {
        let mut field = Field::new(Polygon::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        ]));
        let config = PlannerConfig::default();
        let err = generate_course_for_field(&mut field, &config, &ChaikinSmoother).unwrap_err();
        assert!(matches!(err, PlannerError::BoundaryTooShort { found: 2 }));
    }

    #[test]
    fn convex_square_coverage_produces_two_headland_passes_and_a_nonempty_course() {
        let mut field = Field::new(square(100.0));
        let config = PlannerConfig {
            implement_width: 10.0,
            n_headland_passes: 2,
            headland_start_location: Point::new(0.0, 0.0),
            do_smooth: false,
            ..Default::default()
        };
        generate_course_for_field(&mut field, &config, &ChaikinSmoother).unwrap();

        assert_eq!(field.headland_tracks.len(), 2);
        assert!(!field.headland_path.is_empty());
        assert!(!field.course.is_empty());
        assert!(field.course.len() >= field.headland_path.len());
        assert!(field.uncovered_blocks.is_empty());
        assert_eq!(field.n_tracks, field.track.len());
    }

    #[test]
    fn a_field_with_no_headland_passes_still_returns_a_headland_only_course() {
        let mut field = Field::new(square(100.0));
        let config = PlannerConfig {
            implement_width: 10.0,
            n_headland_passes: 0,
            do_smooth: false,
            ..Default::default()
        };
        generate_course_for_field(&mut field, &config, &ChaikinSmoother).unwrap();
        assert!(field.headland_tracks.is_empty());
        assert!(field.course.is_empty());
    }

    #[test]
    fn course_alternates_track_direction_on_a_simple_square() {
        let mut field = Field::new(square(100.0));
        let config = PlannerConfig {
            implement_width: 10.0,
            n_headland_passes: 2,
            headland_start_location: Point::new(0.0, 0.0),
            do_smooth: false,
            ..Default::default()
        };
        generate_course_for_field(&mut field, &config, &ChaikinSmoother).unwrap();

        let turn_starts: Vec<usize> = field
            .course
            .iter()
            .enumerate()
            .filter(|(_, v)| v.turn_start)
            .map(|(i, _)| i)
            .collect();
        assert!(!turn_starts.is_empty(), "expected at least one turn boundary in the interior fill");
    }
}
