//! Block partitioning for the stochastic block model.

use crate::random::RandomSource;

use super::config::BlockSizing;

/// Splits `n_species` into `n_blocks` sizes differing by at most one, with
/// the remainder going to the lowest-indexed blocks.
///
/// # Examples
/// ```
/// use ecogen_core::sbm::balanced_sizes;
///
/// assert_eq!(balanced_sizes(20, 3), vec![7, 7, 6]);
/// assert_eq!(balanced_sizes(4, 4), vec![1, 1, 1, 1]);
/// ```
#[must_use]
pub fn balanced_sizes(n_species: usize, n_blocks: usize) -> Vec<usize> {
    if n_blocks == 0 {
        return Vec::new();
    }
    let base = n_species / n_blocks;
    let remainder = n_species % n_blocks;
    (0..n_blocks)
        .map(|block| base + usize::from(block < remainder))
        .collect()
}

/// Drops each node into a uniformly random block and returns the counts.
fn multinomial_sizes(source: &mut RandomSource, n_species: usize, n_blocks: usize) -> Vec<usize> {
    let mut sizes = vec![0; n_blocks];
    for _ in 0..n_species {
        if let Some(size) = source.index(n_blocks).and_then(|block| sizes.get_mut(block)) {
            *size += 1;
        }
    }
    sizes
}

/// Resolves the configured sizing strategy into concrete block sizes.
pub(super) fn resolve_sizes(
    sizing: &BlockSizing,
    n_species: usize,
    n_blocks: usize,
    source: &mut RandomSource,
) -> Vec<usize> {
    match sizing {
        BlockSizing::Balanced => balanced_sizes(n_species, n_blocks),
        BlockSizing::Explicit(sizes) => sizes.clone(),
        BlockSizing::Multinomial => multinomial_sizes(source, n_species, n_blocks),
    }
}

/// Labels nodes contiguously: the first `sizes[0]` nodes get block 0, and so on.
pub(super) fn assign_blocks(sizes: &[usize]) -> Vec<usize> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(block, &size)| std::iter::repeat_n(block, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(20, 3, vec![7, 7, 6])]
    #[case(10, 4, vec![3, 3, 2, 2])]
    #[case(9, 3, vec![3, 3, 3])]
    #[case(5, 1, vec![5])]
    #[case(3, 3, vec![1, 1, 1])]
    fn balanced_sizes_spread_the_remainder(
        #[case] n_species: usize,
        #[case] n_blocks: usize,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(balanced_sizes(n_species, n_blocks), expected);
    }

    #[test]
    fn multinomial_sizes_cover_every_node() {
        let mut source = RandomSource::from_seed(13);
        let sizes = resolve_sizes(&BlockSizing::Multinomial, 50, 4, &mut source);
        assert_eq!(sizes.len(), 4);
        assert_eq!(sizes.iter().sum::<usize>(), 50);
    }

    #[test]
    fn explicit_sizes_pass_through() {
        let mut source = RandomSource::from_seed(13);
        let sizing = BlockSizing::Explicit(vec![1, 4, 2]);
        assert_eq!(resolve_sizes(&sizing, 7, 3, &mut source), vec![1, 4, 2]);
    }

    #[test]
    fn labels_are_contiguous() {
        assert_eq!(assign_blocks(&[2, 0, 3]), vec![0, 0, 2, 2, 2]);
    }
}
