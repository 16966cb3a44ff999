/// Mutant detector — scans an N×N DNA grid for runs of identical characters.
///
/// Logic:
///  1. Validate the grid: non-empty, square, ASCII-only rows of equal length.
///  2. For each of the 4 directions (right, down, down-right, down-left),
///     walk a scan from every starting cell (i, j).
///  3. A run of SEQUENCE_LENGTH identical cells along the direction counts
///     as one sequence; the scan then jumps past the matched run so a
///     continuation of the same scan is never double-counted.
///  4. Verdict: mutant iff the grand total of sequences exceeds 1.
///
/// The function is pure and deterministic — no state, no I/O — so it is
/// safe to call concurrently from any number of request handlers.
use thiserror::Error;

/// Number of identical consecutive cells that make one qualifying sequence.
pub const SEQUENCE_LENGTH: usize = 4;

/// Scan directions as (row, column) steps: right, down, down-right, down-left.
///
/// The reverse directions are not scanned — every undirected line is fully
/// covered from its starting end, and scanning both ends would double-count.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Rejection reasons for malformed grids.
///
/// A grid smaller than `SEQUENCE_LENGTH` is *not* an error — every direction
/// is vacuously empty and the verdict is simply "not mutant".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DnaError {
    #[error("dna grid is empty")]
    Empty,
    #[error("dna grid is not square: {rows} rows but row {row} has {len} characters")]
    NotSquare { rows: usize, row: usize, len: usize },
    #[error("dna row {row} contains non-ASCII characters")]
    NotAscii { row: usize },
}

/// Validate that `dna` is a non-empty square grid of ASCII rows.
///
/// Returns the rows as byte slices so the scan can index cells directly.
pub fn validate<S: AsRef<str>>(dna: &[S]) -> Result<Vec<&[u8]>, DnaError> {
    if dna.is_empty() {
        return Err(DnaError::Empty);
    }
    let n = dna.len();
    let mut grid = Vec::with_capacity(n);
    for (row, s) in dna.iter().enumerate() {
        let s = s.as_ref();
        if !s.is_ascii() {
            return Err(DnaError::NotAscii { row });
        }
        if s.len() != n {
            return Err(DnaError::NotSquare {
                rows: n,
                row,
                len: s.len(),
            });
        }
        grid.push(s.as_bytes());
    }
    Ok(grid)
}

/// Determine whether `dna` is a mutant grid: more than one run of
/// `SEQUENCE_LENGTH` identical characters across all four directions.
///
/// Malformed input (empty, jagged, non-square, non-ASCII) is rejected
/// explicitly rather than risking out-of-bounds indexing.
pub fn is_mutant<S: AsRef<str>>(dna: &[S]) -> Result<bool, DnaError> {
    let grid = validate(dna)?;
    let n = grid.len();
    let mut total: u64 = 0;

    for (dx, dy) in DIRECTIONS {
        for i in 0..n {
            for j in 0..n {
                total += count_from_origin(&grid, i as isize, j as isize, dx, dy);
                // The verdict is monotonic in the count — once it exceeds 1
                // no further scanning can change it.
                if total > 1 {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

/// Count the sequences found by a single scan starting at (x, y) and
/// stepping by (dx, dy) until a full window no longer fits in bounds.
///
/// On a match the cursor jumps `SEQUENCE_LENGTH` steps so overlapping
/// windows inside an already-counted run are skipped; on a mismatch it
/// advances one step.
fn count_from_origin(grid: &[&[u8]], mut x: isize, mut y: isize, dx: isize, dy: isize) -> u64 {
    let n = grid.len() as isize;
    let span = (SEQUENCE_LENGTH as isize) - 1;
    let mut count = 0;

    while x + span * dx < n && (0..n).contains(&(y + span * dy)) {
        let first = grid[x as usize][y as usize];
        let matched = (1..=span).all(|k| grid[(x + k * dx) as usize][(y + k * dy) as usize] == first);

        if matched {
            count += 1;
            x += SEQUENCE_LENGTH as isize * dx;
            y += SEQUENCE_LENGTH as isize * dy;
        } else {
            x += dx;
            y += dy;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mutant(rows: &[&str]) -> bool {
        is_mutant(rows).unwrap()
    }

    #[test]
    fn test_canonical_mutant_grid() {
        // One diagonal AAAA run plus the horizontal CCCC run.
        let dna = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
        assert!(mutant(&dna));
    }

    #[test]
    fn test_single_horizontal_run_is_not_mutant() {
        // One AAAA run in row 0 and no other sequence anywhere.
        let dna = ["AAAAGA", "ATGGAC", "CGGCCA", "TATAAG", "TAAACC", "AGTTGT"];
        assert!(!mutant(&dna));
    }

    #[test]
    fn test_horizontal_plus_vertical_is_mutant() {
        // Row 0 holds AAAA; column 5 holds GGGG in rows 1-4. Disjoint cells.
        let dna = ["AAAAGA", "ATGGAG", "CGGCCG", "TATAAG", "TAAACG", "AGTTGT"];
        assert!(mutant(&dna));
    }

    #[test]
    fn test_single_down_right_diagonal_is_not_mutant() {
        // A at (0,0)..(3,3) and nothing else qualifying.
        let dna = ["ACCATT", "CATTAC", "AAAGGG", "TATATA", "GCATCA", "CACCCG"];
        assert!(!mutant(&dna));
    }

    #[test]
    fn test_single_down_left_diagonal_is_not_mutant() {
        // T at (0,5), (1,4), (2,3), (3,2) and nothing else qualifying.
        let dna = ["CGCCAT", "GGCTTC", "TATTCT", "TGTTGG", "TAGGGC", "GACTAG"];
        assert!(!mutant(&dna));
    }

    #[test]
    fn test_down_left_diagonal_plus_vertical_is_mutant() {
        // Same down-left TTTT diagonal plus a vertical CCCC in column 0.
        let dna = ["CTATAT", "CTCATA", "CCGTGC", "CGTACG", "AGGGTA", "ACCCAA"];
        assert!(mutant(&dna));
    }

    #[test]
    fn test_run_of_eight_is_mutant() {
        // A row of 8 identical characters decides the verdict on its own:
        // the jump-ahead scan from its start already finds two sequences.
        let dna = [
            "AAAAAAAA", "CAGTGCTA", "TTATGTCA", "AGACGGTA", "GCGTCATA", "TCACTGTA", "CTGATCGA",
            "GATCGATC",
        ];
        assert!(mutant(&dna));
    }

    #[test]
    fn test_uniform_grid_is_mutant() {
        let dna = ["AAAA", "AAAA", "AAAA", "AAAA"];
        assert!(mutant(&dna));
    }

    #[test]
    fn test_grid_smaller_than_sequence_is_not_mutant() {
        // Vacuous directions — valid input, verdict false.
        let dna = ["AAA", "AAA", "AAA"];
        assert!(!mutant(&dna));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let dna: [&str; 0] = [];
        assert_eq!(is_mutant(&dna).unwrap_err(), DnaError::Empty);
    }

    #[test]
    fn test_jagged_grid_rejected() {
        let dna = ["ATGCGA", "CAGTGC", "TTAT", "AGAAGG", "CCCCTA", "TCACTG"];
        assert_eq!(
            is_mutant(&dna).unwrap_err(),
            DnaError::NotSquare {
                rows: 6,
                row: 2,
                len: 4
            }
        );
    }

    #[test]
    fn test_non_square_grid_rejected() {
        let dna = ["ATGC", "CAGT", "TTAT"];
        assert_eq!(
            is_mutant(&dna).unwrap_err(),
            DnaError::NotSquare {
                rows: 3,
                row: 0,
                len: 4
            }
        );
    }

    #[test]
    fn test_non_ascii_rejected() {
        let dna = ["ATGé", "CAGT", "TTAT", "AGAA"];
        assert_eq!(is_mutant(&dna).unwrap_err(), DnaError::NotAscii { row: 0 });
    }

    #[test]
    fn test_determinism() {
        let dna = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"];
        let first = mutant(&dna);
        for _ in 0..10 {
            assert_eq!(mutant(&dna), first);
        }
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let dna: Vec<String> = ["ATGCGA", "CAGTGC", "TTATGT", "AGAAGG", "CCCCTA", "TCACTG"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dna = dna.clone();
                std::thread::spawn(move || is_mutant(&dna).unwrap())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
