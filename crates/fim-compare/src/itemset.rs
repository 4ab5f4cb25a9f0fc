//! Canonical itemset key

use std::fmt;

/// Opaque item identifier as it appears in result files.
pub type Item = String;

/// Unordered, duplicate-free set of items.
///
/// Items are kept sorted and de-duplicated so that two itemsets compare equal
/// regardless of the order their items were listed in the source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset {
    items: Box<[Item]>,
}

impl Itemset {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Item>,
    {
        let mut items: Vec<Item> = tokens.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Itemset {
            items: items.into_boxed_slice(),
        }
    }

    /// Parse a whitespace-separated item list.
    pub fn parse(text: &str) -> Self {
        Self::from_tokens(text.split_whitespace())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(item)?;
        }
        Ok(())
    }
}
