use serde::{Deserialize, Serialize};
use std::fmt;

/// A sentence-length category, ordered smallest to largest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    /// The lowercase key used to group observations by size.
    pub fn key(&self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The pair of word-count thresholds delimiting the medium bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeThresholds {
    /// Smallest word count still bucketed as medium.
    pub min_medium: i64,
    /// Largest word count still bucketed as medium.
    pub max_medium: i64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            min_medium: 7,
            max_medium: 12,
        }
    }
}

impl SizeThresholds {
    pub fn new(min_medium: i64, max_medium: i64) -> Self {
        assert!(
            min_medium <= max_medium,
            "Medium bucket bounds must be ordered"
        );
        Self {
            min_medium,
            max_medium,
        }
    }

    /// Buckets a word count. Total over all integers; negative counts are small.
    pub fn bucket(&self, n_words: i64) -> SizeBucket {
        if n_words < self.min_medium {
            SizeBucket::Small
        } else if n_words <= self.max_medium {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    /// Bucket label carrying the threshold bounds, e.g. `"Medium (7-12)"`.
    pub fn describe(&self, n_words: i64) -> String {
        match self.bucket(n_words) {
            SizeBucket::Small => format!("Small (<{})", self.min_medium),
            SizeBucket::Medium => format!("Medium ({}-{})", self.min_medium, self.max_medium),
            SizeBucket::Large => format!("Large (>{})", self.max_medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries_are_exact() {
        let t = SizeThresholds::default();
        assert_eq!(t.bucket(6), SizeBucket::Small);
        assert_eq!(t.bucket(7), SizeBucket::Medium);
        assert_eq!(t.bucket(12), SizeBucket::Medium);
        assert_eq!(t.bucket(13), SizeBucket::Large);
    }

    #[test]
    fn negative_counts_are_small() {
        let t = SizeThresholds::default();
        assert_eq!(t.bucket(0), SizeBucket::Small);
        assert_eq!(t.bucket(-3), SizeBucket::Small);
    }

    #[test]
    fn custom_thresholds() {
        let t = SizeThresholds::new(3, 5);
        assert_eq!(t.bucket(2), SizeBucket::Small);
        assert_eq!(t.bucket(3), SizeBucket::Medium);
        assert_eq!(t.bucket(5), SizeBucket::Medium);
        assert_eq!(t.bucket(6), SizeBucket::Large);
    }

    #[test]
    #[should_panic]
    fn inverted_thresholds_are_rejected() {
        SizeThresholds::new(12, 7);
    }

    #[test]
    fn describe_includes_bounds() {
        let t = SizeThresholds::default();
        assert_eq!(t.describe(3), "Small (<7)");
        assert_eq!(t.describe(9), "Medium (7-12)");
        assert_eq!(t.describe(20), "Large (>12)");
    }

    #[test]
    fn buckets_order_by_size() {
        assert!(SizeBucket::Small < SizeBucket::Medium);
        assert!(SizeBucket::Medium < SizeBucket::Large);
    }

    #[test]
    fn keys_are_lowercase_names() {
        assert_eq!(SizeBucket::Small.key(), "small");
        assert_eq!(SizeBucket::Medium.to_string(), "medium");
        assert_eq!(SizeBucket::Large.key(), "large");
    }
}
