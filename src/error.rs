use core::fmt;

/// Errors that can be returned from the public entry points of this crate.
///
/// Most failure modes encountered while planning a course are *not*
/// represented here: a degenerate offset, a link failure between two
/// headland passes, an angle with no valid score, and a sequencer that runs
/// out of uncovered blocks are all local recoveries (see the crate's error
/// handling design) that are absorbed into the [`crate::Field`] result and
/// reported through [`log::warn!`]. Only conditions that make planning
/// impossible from the outset are surfaced here.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// The supplied boundary has fewer than 3 distinct vertices once
    /// consecutive duplicates are removed, so it cannot describe a polygon.
    BoundaryTooShort {
        /// Number of distinct vertices found after deduplication.
        found: usize,
    },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::BoundaryTooShort { found } => write!(
                f,
                "field boundary has only {found} distinct vertex(es), a polygon needs at least 3"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlannerError {}
