//! The skip-N track-visit permutation: visit every `(N+1)`-th track
//! forward, then sweep the remaining tracks backward, repeating from the
//! first unvisited track until all are covered. Wider turns become
//! possible because consecutive visits are `N+1` tracks apart instead of
//! adjacent.
//!
//! The forward/backward sweep described informally reduces to a clean
//! residue-class walk: a forward sweep visits, ascending, every
//! not-yet-visited index congruent to the sweep's start modulo `N+1`; the
//! following backward sweep visits, descending, every not-yet-visited
//! index congruent to `(last forward index + 1)` modulo `N+1`. This is
//! verified against every example in the skip-N table this module's
//! tests reproduce verbatim.

/// The 1-indexed visit order for `length` tracks under a skip-`n` reorder.
fn reorder_indices(length: usize, n_skip: usize) -> Vec<usize> {
    if length == 0 {
        return Vec::new();
    }
    let step = n_skip + 1;
    let mut visited = vec![false; length + 1]; // 1-indexed; [0] unused
    let mut result = Vec::with_capacity(length);
    let mut start = 1usize;

    while result.len() < length {
        let r = start % step;
        let mut last_in_group = start;
        for idx in 1..=length {
            if idx % step == r && !visited[idx] {
                visited[idx] = true;
                result.push(idx);
                last_in_group = idx;
            }
        }

        let r2 = (last_in_group + 1) % step;
        for idx in (1..=length).rev() {
            if idx % step == r2 && !visited[idx] {
                visited[idx] = true;
                result.push(idx);
            }
        }

        match (1..=length).find(|&i| !visited[i]) {
            Some(next_start) => start = next_start,
            None => break,
        }
    }

    result
}

/// Reorder `tracks` into the skip-`n` visiting sequence (§4.10). A
/// permutation: the output has the same length as the input and contains
/// the same elements, just reordered.
pub fn reorder_tracks_for_alternate_fieldwork<T>(tracks: Vec<T>, n_skip: usize) -> Vec<T> {
    let order = reorder_indices(tracks.len(), n_skip);
    let mut slots: Vec<Option<T>> = tracks.into_iter().map(Some).collect();
    order
        .into_iter()
        .map(|i| slots[i - 1].take().expect("skip-N reorder indices are a permutation"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_examples_from_the_skip_n_table() {
        assert_eq!(reorder_indices(5, 0), vec![1, 2, 3, 4, 5]);
        assert_eq!(reorder_indices(6, 1), vec![1, 3, 5, 6, 4, 2]);
        assert_eq!(reorder_indices(6, 2), vec![1, 4, 5, 2, 3, 6]);
        assert_eq!(reorder_indices(11, 1), vec![1, 3, 5, 7, 9, 11, 10, 8, 6, 4, 2]);
        assert_eq!(reorder_indices(11, 2), vec![1, 4, 7, 10, 11, 8, 5, 2, 3, 6, 9]);
        assert_eq!(reorder_indices(11, 3), vec![1, 5, 9, 10, 6, 2, 3, 7, 11, 8, 4]);
    }

    #[test]
    fn reorder_is_a_permutation_for_a_range_of_sizes_and_skips() {
        for length in 1..20 {
            for n_skip in 0..5 {
                let mut order = reorder_indices(length, n_skip);
                assert_eq!(order.len(), length);
                order.sort_unstable();
                let expected: Vec<usize> = (1..=length).collect();
                assert_eq!(order, expected, "length={length} n_skip={n_skip}");
            }
        }
    }

    #[test]
    fn reorders_actual_items_not_just_indices() {
        let tracks = vec!["a", "b", "c", "d", "e", "f"];
        let reordered = reorder_tracks_for_alternate_fieldwork(tracks, 1);
        assert_eq!(reordered, vec!["a", "c", "e", "f", "d", "b"]);
    }
}
