/// Analysis layer — caches detector verdicts in storage and aggregates stats.
///
/// A grid is identified by its canonical sequence (rows joined with `,`).
/// Re-submitting a known sequence returns the stored verdict without
/// re-running the scan.
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::detector::{self, DnaError};
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The submitted grid is malformed — maps to a client error upstream.
    #[error(transparent)]
    InvalidDna(#[from] DnaError),
    /// Storage failure — maps to a server error upstream.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Outcome of analyzing one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub mutant: bool,
    /// True when the verdict came from a previous analysis of the same grid.
    pub cached: bool,
}

/// Aggregate verdict counts across all distinct analyzed sequences.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Stats {
    pub count_mutant_dna: u64,
    pub count_human_dna: u64,
    pub ratio: f64,
}

/// Canonical string key for a grid: rows joined with `,`.
pub fn canonical_sequence<S: AsRef<str>>(dna: &[S]) -> String {
    dna.iter()
        .map(|r| r.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

/// Analyze a grid: return the stored verdict if the sequence was seen
/// before, otherwise run the detector and persist the result.
///
/// Validation runs before the cache lookup so a malformed grid is rejected
/// even when a syntactically identical key happens to exist.
pub async fn analyze<S: AsRef<str>>(storage: &Storage, dna: &[S]) -> Result<Verdict, AnalyzeError> {
    detector::validate(dna)?;
    let sequence = canonical_sequence(dna);

    if let Some(record) = storage.find_by_sequence(&sequence).await? {
        debug!(mutant = record.mutant, "verdict served from cache");
        return Ok(Verdict {
            mutant: record.mutant,
            cached: true,
        });
    }

    let mutant = detector::is_mutant(dna)?;
    storage.save_record(&sequence, mutant).await?;
    debug!(mutant, "grid analyzed and persisted");
    Ok(Verdict {
        mutant,
        cached: false,
    })
}

/// Aggregate stats over every distinct sequence analyzed so far.
///
/// `ratio = mutants / humans`. With no human verdicts yet the quotient is
/// undefined; we report the mutant count itself so the value stays finite
/// and monotonic.
pub async fn stats(storage: &Storage) -> Result<Stats, AnalyzeError> {
    let (mutants, humans) = storage.verdict_counts().await?;
    let ratio = if humans == 0 {
        mutants as f64
    } else {
        mutants as f64 / humans as f64
    };
    Ok(Stats {
        count_mutant_dna: mutants,
        count_human_dna: humans,
        ratio,
    })
}
