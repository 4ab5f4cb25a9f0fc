//! Sorted result file readers
//!
//! Both result formats list one itemset per line in non-increasing frequency
//! order. Readers validate that order on every line and stop at the first
//! frequency below the requested threshold; nothing after that line is read.

mod exact;
mod sample;

use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::path::Path;

use log::debug;

use crate::error::{CompareError, CompareResult};
use crate::io::open_reader;
use crate::itemset::Itemset;

pub use exact::{ExactFormat, ExactResultSet};
pub use sample::{SampleEntry, SampleFormat, SampleResultSet};

/// Frequency of the line preceding the first one.
const INITIAL_PREVIOUS_FREQUENCY: f64 = 1.0;

/// One line format of a sorted result file.
pub trait LineFormat {
    /// Per-itemset payload stored in the result map.
    type Entry;

    /// Short name used in log messages.
    const NAME: &'static str;

    /// Parse a non-blank line. The error string describes what is malformed.
    fn parse_line(line: &str) -> Result<(Itemset, Self::Entry), String>;

    /// Frequency the sortedness check and threshold apply to.
    fn frequency(entry: &Self::Entry) -> f64;
}

/// Read all entries with frequency `>= threshold` from a sorted result file.
///
/// Fails with [`CompareError::Unsorted`] as soon as a frequency exceeds the
/// previous accepted one. The check runs before the threshold test, so a
/// reversal on the line that ends the scan is still reported.
pub fn read_sorted<F: LineFormat>(
    path: &Path,
    threshold: f64,
) -> CompareResult<BTreeMap<Itemset, F::Entry>> {
    let io_err = |source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = open_reader(path).map_err(io_err)?;
    let entries = scan_sorted::<F>(reader, path, threshold)?;
    debug!(
        "{} results: {} itemsets >= {threshold} in {}",
        F::NAME,
        entries.len(),
        path.display()
    );
    Ok(entries)
}

fn scan_sorted<F: LineFormat>(
    reader: Box<dyn BufRead>,
    path: &Path,
    threshold: f64,
) -> CompareResult<BTreeMap<Itemset, F::Entry>> {
    let mut entries = BTreeMap::new();
    let mut previous = INITIAL_PREVIOUS_FREQUENCY;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => CompareError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                reason: "line is not valid UTF-8".to_owned(),
            },
            _ => CompareError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let (itemset, entry) = F::parse_line(&line).map_err(|reason| CompareError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason,
        })?;
        let frequency = F::frequency(&entry);
        if frequency > previous {
            return Err(CompareError::Unsorted {
                path: path.to_path_buf(),
                line: line_no,
                frequency,
                previous,
            });
        }
        if frequency < threshold {
            debug!("{}: stopped at line {line_no} ({frequency} < {threshold})", F::NAME);
            break;
        }
        previous = frequency;
        entries.insert(itemset, entry);
    }

    Ok(entries)
}

/// Parse one numeric field, rejecting NaN and infinities.
pub(crate) fn parse_frequency(raw: &str, label: &str) -> Result<f64, String> {
    let raw = raw.trim();
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("invalid {label}: '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("invalid {label}: '{raw}'"));
    }
    Ok(value)
}
