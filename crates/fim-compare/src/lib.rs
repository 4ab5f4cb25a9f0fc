//! Frequent itemset result validation
//!
//! Compares the output of a sampling-based frequent itemset miner against the
//! exact result for the same dataset: missed and spurious itemsets, frequency
//! errors, and whether the reported confidence intervals cover the true
//! frequency.

pub mod error;
pub mod io;
pub mod itemset;
pub mod reader;
pub mod reconcile;
pub mod report;

pub use error::{CompareError, CompareResult};
pub use itemset::{Item, Itemset};
pub use reader::{ExactResultSet, SampleEntry, SampleResultSet};
pub use reconcile::{CompareParams, ComparisonReport, compare, reconcile};
pub use report::{RECORD_HEADER, RenderedReport, format_report, to_json};
