use regex::Regex;
use std::borrow::Cow;

/// Splits raw sentence text into words for length bucketing.
#[derive(Debug)]
pub struct Tokenizer {
    /// The set of punctuation characters to strip.
    punct: Regex,
    /// Collapses the whitespace runs left behind by stripping.
    spaces: Regex,
}

impl Tokenizer {
    /// Character class covering common sentence punctuation.
    pub const DEFAULT_PUNCT: &'static str = r#"[.,!?;:=()"'\[\]/@#*&_-]"#;

    /// Builds a tokenizer from a punctuation character-class pattern.
    /// Panics if the pattern is not a valid regex.
    pub fn new(punct: &str) -> Self {
        Self {
            punct: Regex::new(punct).unwrap(),
            spaces: Regex::new(r"\s{2,}").unwrap(),
        }
    }

    /// Strip punctuation from the passed in text and collapse whitespace.
    pub fn normalize(&self, text: &str) -> Box<str> {
        let result: Cow<'_, str> = self.punct.replace_all(text, " ");
        let collapsed = self.spaces.replace_all(&result, " ");
        collapsed.trim().into()
    }

    /// Splits the text into its normalized words.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    /// Number of words in the sentence after normalization.
    pub fn word_count(&self, text: &str) -> i64 {
        self.normalize(text).split_whitespace().count() as i64
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PUNCT)
    }
}
