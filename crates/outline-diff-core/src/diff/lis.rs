//! Longest increasing subsequence used to pick the children that stay put.

/// Mark the positions of `seq` that belong to a longest strictly increasing
/// subsequence.
///
/// Values are expected to be distinct (they are old child indices). When
/// several subsequences share the maximum length, the one that keeps the
/// earliest positions is chosen, so that later items are the ones reported
/// as moved. Runs in O(n log n).
pub(crate) fn stable_positions(seq: &[usize]) -> Vec<bool> {
    let n = seq.len();
    let mut keep = vec![false; n];
    if n == 0 {
        return keep;
    }

    // Scanning right-to-left for a decreasing run is the mirror image of a
    // left-to-right increasing run; reconstruction then favours early items.
    let max = seq.iter().copied().max().unwrap_or(0);
    let keys: Vec<usize> = seq.iter().rev().map(|&v| max - v).collect();

    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; n];
    for (j, &key) in keys.iter().enumerate() {
        let pos = tails.partition_point(|&t| keys[t] < key);
        prev[j] = pos.checked_sub(1).map(|p| tails[p]);
        if pos == tails.len() {
            tails.push(j);
        } else {
            tails[pos] = j;
        }
    }

    let mut cursor = tails.last().copied();
    while let Some(j) = cursor {
        keep[n - 1 - j] = true;
        cursor = prev[j];
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kept(seq: &[usize]) -> Vec<usize> {
        stable_positions(seq)
            .iter()
            .zip(seq)
            .filter(|(k, _)| **k)
            .map(|(_, v)| *v)
            .collect()
    }

    #[test]
    fn test_sorted_sequence_keeps_everything() {
        assert_eq!(kept(&[0, 1, 2, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_swap_keeps_first_position() {
        // target [B, A] over old [A, B]: keep B, move A
        assert_eq!(stable_positions(&[1, 0]), vec![true, false]);
    }

    #[test]
    fn test_single_item_moved_to_end() {
        // old [A, B, C] -> new [B, C, A]
        assert_eq!(kept(&[1, 2, 0]), vec![1, 2]);
    }

    #[test]
    fn test_single_item_moved_to_front() {
        // old [A, B, C] -> new [C, A, B]
        assert_eq!(kept(&[2, 0, 1]), vec![0, 1]);
    }

    #[test]
    fn test_reversal_keeps_one() {
        assert_eq!(kept(&[3, 2, 1, 0]).len(), 1);
    }

    #[test]
    fn test_gapped_values() {
        // indices need not be contiguous after deletions
        assert_eq!(kept(&[5, 1, 7, 9]), vec![5, 7, 9]);
    }

    #[test]
    fn test_empty() {
        assert!(stable_positions(&[]).is_empty());
    }
}
