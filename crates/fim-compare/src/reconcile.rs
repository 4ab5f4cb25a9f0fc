//! Exact vs. sampled result reconciliation
//!
//! The exact side is read down to `min_freq - epsilon` and the sample side down
//! to `min_freq - epsilon / 2`. Itemsets whose true frequency falls in
//! `[min_freq - epsilon, min_freq)` are tolerable candidates: a sample that
//! reports them is within its error budget, so they are counted apart from
//! plain false positives but still evaluated for numeric error.

use std::collections::BTreeSet;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::{CompareError, CompareResult};
use crate::itemset::Itemset;
use crate::reader::{ExactResultSet, SampleEntry, SampleResultSet};

/// Tolerance and frequency cut-off for one comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompareParams {
    pub epsilon: f64,
    pub min_freq: f64,
}

impl CompareParams {
    pub fn new(epsilon: f64, min_freq: f64) -> CompareResult<Self> {
        let params = Self { epsilon, min_freq };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> CompareResult<()> {
        if !self.epsilon.is_finite() {
            return Err(CompareError::InvalidParameter {
                name: "epsilon",
                value: self.epsilon,
            });
        }
        if !self.min_freq.is_finite() {
            return Err(CompareError::InvalidParameter {
                name: "minimum frequency",
                value: self.min_freq,
            });
        }
        Ok(())
    }

    /// Read threshold of the exact result file.
    pub fn exact_threshold(&self) -> f64 {
        self.min_freq - self.epsilon
    }

    /// Read threshold of the sample result file.
    pub fn sample_threshold(&self) -> f64 {
        self.min_freq - self.epsilon / 2.0
    }
}

/// Split of the extended exact result at `min_freq`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToleranceBands {
    /// Itemsets with true frequency `>= min_freq`.
    pub exact: ExactResultSet,
    /// Itemsets with true frequency in `[min_freq - epsilon, min_freq)`.
    pub tolerable_candidates: BTreeSet<Itemset>,
}

impl ToleranceBands {
    pub fn split(extended: &ExactResultSet, min_freq: f64) -> Self {
        let exact = extended.at_least(min_freq);
        let tolerable_candidates = extended
            .keys()
            .filter(|k| !exact.contains(k))
            .cloned()
            .collect();
        Self {
            exact,
            tolerable_candidates,
        }
    }
}

/// Aggregate statistics of one comparison run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub exact_file: String,
    pub sample_file: String,
    pub epsilon: f64,
    pub min_freq: f64,
    /// Itemsets truly frequent at `min_freq`
    pub exact_count: usize,
    /// Itemsets read from the sample file
    pub sample_count: usize,
    pub intersection: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    pub non_tolerable_false_positives: usize,
    pub tolerable_false_positives: usize,
    pub jaccard: f64,
    /// Size of the evaluation set (intersection plus tolerable false positives)
    pub evaluated: usize,
    /// Absolute error above epsilon
    pub wrong_epsilon: usize,
    pub max_abs_error: f64,
    pub avg_abs_error: f64,
    pub avg_rel_error: f64,
    /// Confidence interval does not contain the true frequency
    pub wrong_conf_bounds: usize,
    /// Confidence interval wider than `2 * epsilon`
    pub wrong_conf_bounds_width: usize,
    pub max_cb_width: f64,
    pub avg_cb_width: f64,
    /// Sample entries whose own frequency lies outside their interval
    pub inconsistent_sample_bounds: usize,
}

/// Read both result files and compare them.
///
/// The exact file is read and closed before the sample file is opened.
pub fn compare(
    exact_path: &Path,
    sample_path: &Path,
    params: &CompareParams,
) -> CompareResult<ComparisonReport> {
    params.validate()?;
    let extended = ExactResultSet::read(exact_path, params.exact_threshold())?;
    let sample = SampleResultSet::read(sample_path, params.sample_threshold())?;

    let mut report = reconcile(&extended, &sample, params)?;
    report.exact_file = file_label(exact_path);
    report.sample_file = file_label(sample_path);
    Ok(report)
}

/// Compare an extended exact result (read at `min_freq - epsilon`) with a sample result.
pub fn reconcile(
    extended: &ExactResultSet,
    sample: &SampleResultSet,
    params: &CompareParams,
) -> CompareResult<ComparisonReport> {
    let bands = ToleranceBands::split(extended, params.min_freq);
    let exact_keys: BTreeSet<&Itemset> = bands.exact.keys().collect();
    let sample_keys: BTreeSet<&Itemset> = sample.keys().collect();

    let intersection: BTreeSet<&Itemset> =
        exact_keys.intersection(&sample_keys).copied().collect();
    let false_negatives = exact_keys.difference(&sample_keys).count();
    let false_positives: BTreeSet<&Itemset> =
        sample_keys.difference(&exact_keys).copied().collect();
    let (tolerable, non_tolerable): (BTreeSet<&Itemset>, BTreeSet<&Itemset>) = false_positives
        .iter()
        .copied()
        .partition(|k| bands.tolerable_candidates.contains(*k));

    let union = exact_keys.union(&sample_keys).count();
    if union == 0 {
        return Err(CompareError::EmptyUnion);
    }
    let jaccard = intersection.len() as f64 / union as f64;

    // Intersection plus tolerable false positives is every sampled itemset
    // the extended exact result knows a true frequency for.
    let mut errors = ErrorAccumulator::new(params.epsilon);
    for (itemset, entry) in sample.iter() {
        if let Some(true_freq) = extended.get(itemset) {
            errors.add(itemset, true_freq, entry)?;
        }
    }
    let errors = errors.finish()?;

    info!(
        "exact={} sample={} inter={} fn={} fp={} (tolerable {}) evaluated={}",
        exact_keys.len(),
        sample_keys.len(),
        intersection.len(),
        false_negatives,
        false_positives.len(),
        tolerable.len(),
        errors.evaluated
    );

    Ok(ComparisonReport {
        exact_file: String::new(),
        sample_file: String::new(),
        epsilon: params.epsilon,
        min_freq: params.min_freq,
        exact_count: exact_keys.len(),
        sample_count: sample_keys.len(),
        intersection: intersection.len(),
        false_negatives,
        false_positives: false_positives.len(),
        non_tolerable_false_positives: non_tolerable.len(),
        tolerable_false_positives: tolerable.len(),
        jaccard,
        evaluated: errors.evaluated,
        wrong_epsilon: errors.wrong_epsilon,
        max_abs_error: errors.max_abs_error,
        avg_abs_error: errors.avg_abs_error,
        avg_rel_error: errors.avg_rel_error,
        wrong_conf_bounds: errors.wrong_conf_bounds,
        wrong_conf_bounds_width: errors.wrong_conf_bounds_width,
        max_cb_width: errors.max_cb_width,
        avg_cb_width: errors.avg_cb_width,
        inconsistent_sample_bounds: sample.inconsistent_bounds(),
    })
}

#[derive(Debug)]
struct ErrorStats {
    evaluated: usize,
    wrong_epsilon: usize,
    max_abs_error: f64,
    avg_abs_error: f64,
    avg_rel_error: f64,
    wrong_conf_bounds: usize,
    wrong_conf_bounds_width: usize,
    max_cb_width: f64,
    avg_cb_width: f64,
}

struct ErrorAccumulator {
    epsilon: f64,
    count: usize,
    wrong_epsilon: usize,
    max_abs_error: f64,
    abs_error_sum: f64,
    rel_error_sum: f64,
    wrong_conf_bounds: usize,
    wrong_conf_bounds_width: usize,
    max_cb_width: f64,
    cb_width_sum: f64,
}

impl ErrorAccumulator {
    fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            count: 0,
            wrong_epsilon: 0,
            max_abs_error: 0.0,
            abs_error_sum: 0.0,
            rel_error_sum: 0.0,
            wrong_conf_bounds: 0,
            wrong_conf_bounds_width: 0,
            max_cb_width: 0.0,
            cb_width_sum: 0.0,
        }
    }

    fn add(&mut self, itemset: &Itemset, true_freq: f64, entry: &SampleEntry) -> CompareResult<()> {
        if true_freq == 0.0 {
            return Err(CompareError::ZeroTrueFrequency {
                itemset: itemset.clone(),
            });
        }
        self.count += 1;

        let abs_error = (entry.frequency - true_freq).abs();
        self.abs_error_sum += abs_error;
        if abs_error > self.max_abs_error {
            self.max_abs_error = abs_error;
        }
        if abs_error > self.epsilon {
            self.wrong_epsilon += 1;
        }
        self.rel_error_sum += abs_error / true_freq;

        let width = entry.width();
        self.cb_width_sum += width;
        if width > self.max_cb_width {
            self.max_cb_width = width;
        }
        if !entry.covers(true_freq) {
            self.wrong_conf_bounds += 1;
        }
        if width > 2.0 * self.epsilon {
            self.wrong_conf_bounds_width += 1;
        }
        Ok(())
    }

    fn finish(self) -> CompareResult<ErrorStats> {
        if self.count == 0 {
            return Err(CompareError::EmptyEvaluationSet);
        }
        let n = self.count as f64;
        Ok(ErrorStats {
            evaluated: self.count,
            wrong_epsilon: self.wrong_epsilon,
            max_abs_error: self.max_abs_error,
            avg_abs_error: self.abs_error_sum / n,
            avg_rel_error: self.rel_error_sum / n,
            wrong_conf_bounds: self.wrong_conf_bounds,
            wrong_conf_bounds_width: self.wrong_conf_bounds_width,
            max_cb_width: self.max_cb_width,
            avg_cb_width: self.cb_width_sum / n,
        })
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
