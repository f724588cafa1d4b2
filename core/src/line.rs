//! Reduction of a single line of tiles towards index 0.

/// Slide and merge one line towards its start.
///
/// Returns the reduced line, padded with zeros to the input length, and the
/// points scored: the sum of every tile created by a merge.
///
/// Two 2^31 tiles have no `u32` sum and stay unmerged; see [`can_merge`].
///
/// Algorithm:
/// 1. Compress: drop the zeros, keeping the order of the remaining tiles
/// 2. Merge: scan left to right, folding each equal pair into one tile of
///    double value and stepping past the pair, so a merged tile never merges
///    again in the same pass
/// 3. Pad with zeros on the right
///
/// ```
/// use game2048_core::line::reduce_line;
///
/// assert_eq!(reduce_line(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
/// ```
pub fn reduce_line(line: &[u32]) -> (Vec<u32>, u64) {
    let tiles = compress(line);

    let mut reduced = Vec::with_capacity(line.len());
    let mut points = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && can_merge(tiles[i], tiles[i + 1]) {
            let merged = tiles[i] * 2;
            reduced.push(merged);
            points += u64::from(merged);
            i += 2;
        } else {
            reduced.push(tiles[i]);
            i += 1;
        }
    }

    reduced.resize(line.len(), 0);
    tracing::trace!(?line, ?reduced, points, "reduced line");
    (reduced, points)
}

/// Whether two adjacent tiles fold into one: they are equal, non-empty, and
/// their sum is still a `u32`.
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a.checked_mul(2).is_some()
}

/// Non-zero tiles of `line`, in order.
fn compress(line: &[u32]) -> Vec<u32> {
    line.iter().copied().filter(|&v| v != 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Compress
    // -------------------------------------------------------------------------

    #[test]
    fn test_compress_simple() {
        assert_eq!(compress(&[0, 2, 0, 4]), vec![2, 4]);
    }

    #[test]
    fn test_compress_already_compressed() {
        assert_eq!(compress(&[2, 4, 8, 16]), vec![2, 4, 8, 16]);
    }

    #[test]
    fn test_compress_all_zeros() {
        assert!(compress(&[0, 0, 0, 0]).is_empty());
    }

    // -------------------------------------------------------------------------
    // Reduce
    // -------------------------------------------------------------------------

    #[test]
    fn test_all_empty_line() {
        assert_eq!(reduce_line(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reduce_line(&[]), (vec![], 0));
    }

    #[test]
    fn test_single_tile_slides() {
        assert_eq!(reduce_line(&[0, 0, 0, 8]), (vec![8, 0, 0, 0], 0));
    }

    #[test]
    fn test_merge_simple() {
        assert_eq!(reduce_line(&[2, 2, 0, 0]), (vec![4, 0, 0, 0], 4));
    }

    #[test]
    fn test_merge_across_gap() {
        assert_eq!(reduce_line(&[2, 0, 0, 2]), (vec![4, 0, 0, 0], 4));
    }

    #[test]
    fn test_merge_two_pairs() {
        assert_eq!(reduce_line(&[2, 2, 4, 4]), (vec![4, 8, 0, 0], 12));
    }

    #[test]
    fn test_no_merge_alternating() {
        assert_eq!(reduce_line(&[2, 4, 2, 4]), (vec![2, 4, 2, 4], 0));
    }

    #[test]
    fn test_no_double_merge() {
        // [4, 2, 2, 0] should become [4, 4, 0, 0], not [8, 0, 0, 0]
        assert_eq!(reduce_line(&[4, 2, 2, 0]), (vec![4, 4, 0, 0], 4));
    }

    #[test]
    fn test_no_chain_merge() {
        // [2, 2, 2, 2] should become [4, 4, 0, 0], not [8, 0, 0, 0]
        assert_eq!(reduce_line(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
    }

    #[test]
    fn test_odd_run_merges_leading_pair() {
        assert_eq!(reduce_line(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
    }

    #[test]
    fn test_largest_mergeable_pair() {
        let top = 1u32 << 30;
        assert_eq!(
            reduce_line(&[top, top, top, top]),
            (vec![1 << 31, 1 << 31, 0, 0], 1 << 32)
        );
    }

    #[test]
    fn test_unrepresentable_pair_stays_put() {
        let top = 1u32 << 31;
        assert_eq!(reduce_line(&[0, top, 0, top]), (vec![top, top, 0, 0], 0));
    }

    #[test]
    fn test_can_merge() {
        assert!(can_merge(2, 2));
        assert!(can_merge(1 << 30, 1 << 30));
        assert!(!can_merge(1 << 31, 1 << 31));
        assert!(!can_merge(0, 0));
        assert!(!can_merge(2, 4));
    }

    #[test]
    fn test_wider_line() {
        assert_eq!(
            reduce_line(&[8, 8, 0, 16, 16, 2]),
            (vec![16, 32, 2, 0, 0, 0], 48)
        );
    }
}
