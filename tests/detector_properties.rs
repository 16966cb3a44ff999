//! Property tests for the mutant detector.

use mutantd::detector::{is_mutant, validate, SEQUENCE_LENGTH};
use proptest::prelude::*;

/// Strategy: a square n×n grid of DNA bases.
fn grid(n: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(prop::sample::select(vec!['A', 'C', 'G', 'T']), n)
            .prop_map(|row| row.into_iter().collect::<String>()),
        n,
    )
}

proptest! {
    /// Grids smaller than the sequence length have no room for any run.
    #[test]
    fn small_grids_are_never_mutant(dna in (1..SEQUENCE_LENGTH).prop_flat_map(grid)) {
        prop_assert!(!is_mutant(&dna).unwrap());
    }

    /// Uniform grids of at least 4x4 always hold multiple runs.
    #[test]
    fn uniform_grids_are_mutant(
        n in SEQUENCE_LENGTH..12usize,
        ch in prop::sample::select(vec!['A', 'C', 'G', 'T']),
    ) {
        let dna: Vec<String> = (0..n).map(|_| std::iter::repeat(ch).take(n).collect()).collect();
        prop_assert!(is_mutant(&dna).unwrap());
    }

    /// The verdict is a pure function of the grid.
    #[test]
    fn verdict_is_deterministic(dna in (SEQUENCE_LENGTH..10usize).prop_flat_map(grid)) {
        let first = is_mutant(&dna).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(is_mutant(&dna).unwrap(), first);
        }
    }

    /// Truncating any single row makes the grid invalid.
    #[test]
    fn jagged_grids_are_rejected(
        dna in (SEQUENCE_LENGTH..10usize).prop_flat_map(grid),
        row in 0..SEQUENCE_LENGTH,
    ) {
        let mut dna = dna;
        let row = row % dna.len();
        dna[row].pop();
        prop_assert!(validate(&dna).is_err());
        prop_assert!(is_mutant(&dna).is_err());
    }
}
