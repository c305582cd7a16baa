use crate::geometry::{Intersection, Track, Vertex};

/// A maximal run of consecutive, mutually x-overlapping scan lines that can
/// be worked without re-entering the headland. Produced by
/// [`crate::algorithm::block_splitter::split_center_into_blocks`] and
/// covered (entered and sequenced) by
/// [`crate::algorithm::sequencer::find_track_to_next_block`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub tracks: Vec<Track>,
    pub bottom_left: Option<Intersection>,
    pub bottom_right: Option<Intersection>,
    pub top_left: Option<Intersection>,
    pub top_right: Option<Intersection>,
    pub covered: bool,
    /// `true` if this block is entered at its bottom and exited at its top
    /// (as opposed to entered at its top and exited at its bottom).
    pub bottom_to_top: bool,
    /// `true` if the first worked track runs left-to-right.
    pub left_to_right: bool,
    /// The connecting sub-path from the headland exit, or the previous
    /// block's exit, to this block's entry corner.
    pub track_to_this_block: Vec<Vertex>,
}

impl Block {
    pub fn new() -> Self {
        Block::default()
    }

    /// Record this block's four corner intersections from its first and
    /// last tracks, per the data model: bottom = first track, top = last
    /// track, left/right = the two (ascending-x sorted) intersections of
    /// that track.
    pub fn set_corners_from_tracks(&mut self) {
        if let Some(first) = self.tracks.first() {
            if first.intersections.len() >= 2 {
                self.bottom_left = Some(first.intersections[0]);
                self.bottom_right = Some(first.intersections[1]);
            }
        }
        if let Some(last) = self.tracks.last() {
            if last.intersections.len() >= 2 {
                self.top_left = Some(last.intersections[0]);
                self.top_right = Some(last.intersections[1]);
            }
        }
    }
}
