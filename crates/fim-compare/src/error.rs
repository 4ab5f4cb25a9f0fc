//! Error types for result comparison

use std::path::PathBuf;

use crate::itemset::Itemset;

/// Errors raised while reading or comparing result files
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// Result file could not be opened or read
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed line
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Frequency increased from one line to the next
    #[error(
        "{}:{line}: results must be sorted by frequency (found {frequency} after {previous})",
        path.display()
    )]
    Unsorted {
        path: PathBuf,
        line: usize,
        frequency: f64,
        previous: f64,
    },

    /// Neither result set contains any itemset, Jaccard similarity is undefined
    #[error("exact and sample result sets are both empty")]
    EmptyUnion,

    /// No itemset has both an estimate and a true frequency
    #[error("no itemset to evaluate: intersection and tolerable false positives are empty")]
    EmptyEvaluationSet,

    /// Relative error against a true frequency of zero
    #[error("true frequency of itemset [{itemset}] is zero")]
    ZeroTrueFrequency { itemset: Itemset },

    /// Comparison parameter is not a usable number
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;
