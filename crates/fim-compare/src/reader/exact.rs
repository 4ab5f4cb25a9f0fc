//! Exact miner output: `items<TAB>frequency`

use std::collections::BTreeMap;
use std::path::Path;

use super::{LineFormat, parse_frequency, read_sorted};
use crate::error::CompareResult;
use crate::itemset::Itemset;

pub struct ExactFormat;

impl LineFormat for ExactFormat {
    type Entry = f64;

    const NAME: &'static str = "exact";

    fn parse_line(line: &str) -> Result<(Itemset, f64), String> {
        let (items, rest) = line
            .split_once('\t')
            .ok_or_else(|| "missing TAB between itemset and frequency".to_owned())?;
        // Columns after a second TAB are ignored.
        let raw = rest.split('\t').next().unwrap_or(rest);
        let frequency = parse_frequency(raw, "frequency")?;
        Ok((Itemset::parse(items), frequency))
    }

    fn frequency(entry: &f64) -> f64 {
        *entry
    }
}

/// True frequencies of every itemset at or above the read threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExactResultSet {
    entries: BTreeMap<Itemset, f64>,
}

impl ExactResultSet {
    pub fn read(path: &Path, threshold: f64) -> CompareResult<Self> {
        Ok(Self {
            entries: read_sorted::<ExactFormat>(path, threshold)?,
        })
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Itemset, f64)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Entries with frequency `>= min_freq`.
    pub fn at_least(&self, min_freq: f64) -> Self {
        Self::from_entries(
            self.entries
                .iter()
                .filter(|(_, freq)| **freq >= min_freq)
                .map(|(k, v)| (k.clone(), *v)),
        )
    }

    pub fn get(&self, itemset: &Itemset) -> Option<f64> {
        self.entries.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.entries.contains_key(itemset)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Itemset> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_basic() {
        let (itemset, freq) = ExactFormat::parse_line("3 1 2\t0.25").expect("parse");
        assert_eq!(itemset, Itemset::parse("1 2 3"));
        assert_eq!(freq, 0.25);
    }

    #[test]
    fn parse_line_tolerates_padding_and_extra_columns() {
        let (itemset, freq) = ExactFormat::parse_line(" a\t 0.40 \tignored").expect("parse");
        assert_eq!(itemset, Itemset::parse("a"));
        assert_eq!(freq, 0.4);
    }

    #[test]
    fn parse_line_errors() {
        assert!(ExactFormat::parse_line("1 2 0.5").is_err());
        assert!(ExactFormat::parse_line("1 2\t").is_err());
        assert!(ExactFormat::parse_line("1 2\tfoo").is_err());
    }

    #[test]
    fn scenario_a_extended_and_nominal_sets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("exact.txt");
        std::fs::write(&path, "a b\t0.50\n a\t0.40\n b\t0.30\n").expect("write");

        let min_freq = 0.40;
        let epsilon = 0.05;
        let extended = ExactResultSet::read(&path, min_freq - epsilon).expect("read");
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.get(&Itemset::parse("a b")), Some(0.5));
        assert_eq!(extended.get(&Itemset::parse("a")), Some(0.4));
        assert!(!extended.contains(&Itemset::parse("b")));

        let exact = extended.at_least(min_freq);
        assert_eq!(exact, extended);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ExactResultSet::read(&dir.path().join("missing.txt"), 0.1).unwrap_err();
        assert!(matches!(err, crate::CompareError::Io { .. }));
    }
}
