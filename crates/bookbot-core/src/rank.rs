//! Sorting and top-N selection of frequency maps.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::counts::FrequencyMap;

/// What ranked items are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortKey {
    /// Occurrence count.
    #[default]
    Count,
    /// The key itself, in code point order.
    #[cfg_attr(feature = "clap", value(alias = "char", alias = "word", alias = "ngram"))]
    Key,
}

impl SortKey {
    /// Label used in reports. Key sorting is named after what is being counted.
    pub const fn label(self, key_label: &'static str) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Key => key_label,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl Order {
    /// Returns `"asc"` or `"desc"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A counted key, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    /// Display form of the key.
    pub key: String,
    /// How often the key occurred.
    pub count: u64,
}

/// Keys that can be shown in a ranked list.
pub trait RankKey {
    /// Display form of the key. N-grams are joined with single spaces.
    fn display_key(&self) -> String;
}

impl RankKey for char {
    fn display_key(&self) -> String {
        self.to_string()
    }
}

impl RankKey for String {
    fn display_key(&self) -> String {
        self.clone()
    }
}

impl RankKey for Vec<String> {
    fn display_key(&self) -> String {
        self.join(" ")
    }
}

/// Turn a frequency map into a sorted list.
///
/// Sorting is stable, so items with equal counts keep the map's iteration
/// order. That order is fixed for a given input.
pub fn rank<K: RankKey>(map: &FrequencyMap<K>, sort_key: SortKey, order: Order) -> Vec<RankedItem> {
    let mut items: Vec<RankedItem> = map
        .iter()
        .map(|(key, &count)| RankedItem {
            key: key.display_key(),
            count,
        })
        .collect();
    sort_items(&mut items, sort_key, order);
    items
}

/// Stable in-place sort of ranked items.
pub fn sort_items(items: &mut [RankedItem], sort_key: SortKey, order: Order) {
    match sort_key {
        SortKey::Count => items.sort_by(|a, b| order.apply(a.count.cmp(&b.count))),
        SortKey::Key => items.sort_by(|a, b| order.apply(a.key.cmp(&b.key))),
    }
}

/// Keep the first `top` items. `None` keeps everything.
pub fn top_n(mut items: Vec<RankedItem>, top: Option<usize>) -> Vec<RankedItem> {
    if let Some(n) = top {
        items.truncate(n);
    }
    items
}
