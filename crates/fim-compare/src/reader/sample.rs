//! Sampled miner output: `items(frequency, lower, upper)`

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use log::info;
use regex::Regex;

use super::{LineFormat, parse_frequency, read_sorted};
use crate::error::CompareResult;
use crate::itemset::Itemset;

static SAMPLE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^(]*)\(([^,()]*),([^,()]*),([^,()]*)\)\s*$")
        .expect("invalid SAMPLE_LINE_RE pattern")
});

/// Estimated frequency with its confidence interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleEntry {
    pub frequency: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl SampleEntry {
    pub fn new(frequency: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            frequency,
            lower_bound,
            upper_bound,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Whether `value` lies inside the closed interval.
    pub fn covers(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }

    pub fn bounds_consistent(&self) -> bool {
        self.covers(self.frequency)
    }
}

pub struct SampleFormat;

impl LineFormat for SampleFormat {
    type Entry = SampleEntry;

    const NAME: &'static str = "sample";

    fn parse_line(line: &str) -> Result<(Itemset, SampleEntry), String> {
        let caps = SAMPLE_LINE_RE
            .captures(line)
            .ok_or_else(|| "expected 'items(frequency, lower, upper)'".to_owned())?;
        let field = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());
        let entry = SampleEntry::new(
            parse_frequency(field(2), "frequency")?,
            parse_frequency(field(3), "lower bound")?,
            parse_frequency(field(4), "upper bound")?,
        );
        Ok((Itemset::parse(field(1)), entry))
    }

    fn frequency(entry: &SampleEntry) -> f64 {
        entry.frequency
    }
}

/// Estimates of every itemset at or above the read threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleResultSet {
    entries: BTreeMap<Itemset, SampleEntry>,
    frequencies: BTreeMap<Itemset, f64>,
}

impl SampleResultSet {
    pub fn read(path: &Path, threshold: f64) -> CompareResult<Self> {
        let set = Self::from_entries(read_sorted::<SampleFormat>(path, threshold)?);
        let inconsistent = set.inconsistent_bounds();
        if inconsistent > 0 {
            info!(
                "{}: {inconsistent} itemsets report a frequency outside their own interval",
                path.display()
            );
        }
        Ok(set)
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Itemset, SampleEntry)>,
    {
        let entries: BTreeMap<Itemset, SampleEntry> = entries.into_iter().collect();
        let frequencies = entries
            .iter()
            .map(|(k, e)| (k.clone(), e.frequency))
            .collect();
        Self {
            entries,
            frequencies,
        }
    }

    pub fn entry(&self, itemset: &Itemset) -> Option<&SampleEntry> {
        self.entries.get(itemset)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, &SampleEntry)> {
        self.entries.iter()
    }

    pub fn frequency(&self, itemset: &Itemset) -> Option<f64> {
        self.frequencies.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.frequencies.contains_key(itemset)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Itemset> {
        self.frequencies.keys()
    }

    /// Number of entries whose frequency lies outside `[lower, upper]`.
    pub fn inconsistent_bounds(&self) -> usize {
        self.entries.values().filter(|e| !e.bounds_consistent()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
