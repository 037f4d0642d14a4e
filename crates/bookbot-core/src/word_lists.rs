//! Curated word lists.
//!
//! The English stopword set is built once on first use and only ever read
//! afterwards, so it can be shared freely between worker threads.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A set of stopwords, matched exactly against lower-cased tokens.
pub type Stopwords = HashSet<&'static str>;

/// Common English function words, plus the contraction fragments
/// ("s", "ll", "re", "ve", "d", "t") left behind by apostrophe splitting.
pub static STOPWORDS_EN: LazyLock<Stopwords> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each",
        "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
        "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
        "it's", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor",
        "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
        "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
        "why", "will", "with", "you", "your", "yours", "yourself", "yourselves", "s", "ll",
        "re", "ve", "d", "t",
    ]
    .into_iter()
    .collect()
});

/// Which stopword list to filter with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StopwordList {
    /// Count every token.
    #[default]
    None,
    /// Skip common English function words.
    English,
}

impl StopwordList {
    /// Returns the list name as used on the command line and in reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::English => "english",
        }
    }

    /// Resolve the list to its word set, or `None` when filtering is off.
    pub fn words(self) -> Option<&'static Stopwords> {
        match self {
            Self::None => None,
            Self::English => Some(&STOPWORDS_EN),
        }
    }
}

impl std::fmt::Display for StopwordList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
