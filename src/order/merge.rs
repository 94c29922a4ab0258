//! Merging of partially overlapping ordered slices.
//!
//! Each slice is internally ordered. Slices that share an element are
//! merged using the elements common to all of them as synchronisation
//! barriers; slices sharing nothing are concatenated in collection
//! order.

use std::collections::HashSet;
use std::hash::Hash;

use super::error::{OrderError, OrderResult};

/// Keeps the members of `closure` found in `requested`, preserving order.
pub(crate) fn restrict<N: Copy + Eq + Hash>(closure: &[N], requested: &HashSet<N>) -> Vec<N> {
    closure
        .iter()
        .copied()
        .filter(|node| requested.contains(node))
        .collect()
}

/// Merges slices until no element is shared, then concatenates them.
///
/// Each round merges every slice containing the first repeated element
/// (the pivot) into one, so the slice count strictly drops. `limit`
/// bounds the number of rounds.
pub(crate) fn merge_slices<N: Copy + Eq + Hash>(
    mut slices: Vec<Vec<N>>,
    limit: usize,
) -> OrderResult<Vec<N>> {
    let mut rounds = 0;

    while let Some(pivot) = find_pivot(&slices) {
        rounds += 1;
        if rounds > limit {
            return Err(OrderError::MergeSafetyExceeded { limit });
        }

        let first = slices
            .iter()
            .position(|slice| slice.contains(&pivot))
            .unwrap_or(0);
        let (sharing, rest): (Vec<_>, Vec<_>) = slices
            .into_iter()
            .partition(|slice| slice.contains(&pivot));

        tracing::debug!(
            "Merge round {}: {} slice(s) share a project",
            rounds,
            sharing.len()
        );

        let merged = merge_sharing(&sharing);
        slices = rest;
        slices.insert(first.min(slices.len()), merged);
    }

    Ok(slices.into_iter().flatten().collect())
}

/// The first element seen a second time when scanning slices in order.
fn find_pivot<N: Copy + Eq + Hash>(slices: &[Vec<N>]) -> Option<N> {
    let mut union = HashSet::new();
    slices
        .iter()
        .flatten()
        .copied()
        .find(|&node| !union.insert(node))
}

/// Elements of the first slice that every other slice also holds.
fn intersection<N: Copy + Eq + Hash>(slices: &[Vec<N>]) -> Vec<N> {
    let Some((head, tail)) = slices.split_first() else {
        return Vec::new();
    };
    let others: Vec<HashSet<N>> = tail
        .iter()
        .map(|slice| slice.iter().copied().collect())
        .collect();
    head.iter()
        .copied()
        .filter(|node| others.iter().all(|set| set.contains(node)))
        .collect()
}

/// Synchronised k-way merge over the elements all slices share.
///
/// Before each shared element is emitted, every slice contributes the
/// not yet emitted elements that precede it; whatever follows the last
/// shared element is flushed slice by slice at the end.
fn merge_sharing<N: Copy + Eq + Hash>(slices: &[Vec<N>]) -> Vec<N> {
    let barriers = intersection(slices);
    if slices.iter().all(|slice| slice.len() == barriers.len()) {
        return barriers;
    }

    let mut merged = Vec::new();
    let mut emitted = HashSet::new();
    let mut cursors = vec![0usize; slices.len()];
    let mut emit = |node: N, merged: &mut Vec<N>| {
        if emitted.insert(node) {
            merged.push(node);
        }
    };

    for &barrier in &barriers {
        for (slice, cursor) in slices.iter().zip(cursors.iter_mut()) {
            let Some(at) = slice.iter().position(|&node| node == barrier) else {
                continue;
            };
            if at < *cursor {
                continue;
            }
            for &node in &slice[*cursor..at] {
                emit(node, &mut merged);
            }
            *cursor = at + 1;
        }
        emit(barrier, &mut merged);
    }

    for (slice, cursor) in slices.iter().zip(cursors) {
        for &node in &slice[cursor..] {
            emit(node, &mut merged);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restrict_preserves_closure_order() {
        let requested = HashSet::from([4, 1]);
        assert_eq!(restrict(&[1, 2, 3, 4], &requested), vec![1, 4]);
    }

    #[test]
    fn test_restrict_to_itself_is_identity() {
        let slice = vec![3, 1, 2];
        let set: HashSet<_> = slice.iter().copied().collect();
        assert_eq!(restrict(&slice, &set), slice);
    }

    #[test]
    fn test_disjoint_slices_concatenate_in_order() {
        let merged = merge_slices(vec![vec![1, 2], vec![3], vec![4, 5]], 20).unwrap();
        assert_eq!(merged, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_collection() {
        let merged: Vec<u32> = merge_slices(Vec::new(), 20).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_find_pivot_is_first_repeat() {
        assert_eq!(find_pivot(&[vec![1, 2, 3], vec![4, 3, 2]]), Some(3));
        assert_eq!(find_pivot(&[vec![1], vec![2]]), None);
    }

    #[test]
    fn test_identical_slices_collapse() {
        let merged = merge_slices(vec![vec![1, 2], vec![1, 2]], 20).unwrap();
        assert_eq!(merged, vec![1, 2]);
    }

    #[test]
    fn test_shared_tail_synchronises() {
        // two roots feeding one consumer
        let merged = merge_slices(vec![vec![1, 9], vec![2, 9]], 20).unwrap();
        assert_eq!(merged, vec![1, 2, 9]);
    }

    #[test]
    fn test_prefixes_and_tails_are_kept() {
        let merged = merge_slices(vec![vec![1, 5, 6], vec![2, 5, 7]], 20).unwrap();
        assert_eq!(merged, vec![1, 2, 5, 6, 7]);
    }

    #[test]
    fn test_multiple_barriers() {
        let merged = merge_slices(vec![vec![1, 5, 2, 6], vec![5, 3, 6, 4]], 20).unwrap();
        assert_eq!(merged, vec![1, 5, 2, 3, 6, 4]);
    }

    #[test]
    fn test_merged_slice_keeps_collection_position() {
        let merged = merge_slices(vec![vec![7], vec![1, 9], vec![8], vec![2, 9]], 20).unwrap();
        assert_eq!(merged, vec![7, 1, 2, 9, 8]);
    }

    #[test]
    fn test_chained_merges() {
        // 1 and 3 only meet through the second slice
        let merged = merge_slices(vec![vec![1, 2], vec![2, 3], vec![3, 4]], 20).unwrap();
        assert_eq!(merged, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_safety_limit() {
        let slices = vec![vec![1, 2], vec![2, 3], vec![3, 4]];
        assert_eq!(
            merge_slices(slices, 1).unwrap_err(),
            OrderError::MergeSafetyExceeded { limit: 1 }
        );
    }

    #[test]
    fn test_no_duplicates_when_barriers_disagree() {
        let merged = merge_slices(vec![vec![1, 2, 3], vec![2, 1, 3]], 20).unwrap();
        let unique: HashSet<_> = merged.iter().collect();
        assert_eq!(unique.len(), merged.len());
        assert_eq!(merged.len(), 3);
    }
}
