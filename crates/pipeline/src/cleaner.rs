//! Input normalization ahead of a build
//!
//! The builder expects its knowledge points to be non-empty, distinct and
//! length-bounded. [`TextCleaner`] turns raw collected texts into that shape.

use crate::BuildConfig;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Punctuation kept by [`TextCleaner::clean`] besides word characters
const KEPT_PUNCTUATION: &str = "，。！？；：\"'（）【】《》";

/// Normalizes, deduplicates and length-filters knowledge-point texts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCleaner {
    min_chars: usize,
    max_chars: usize,
}

impl TextCleaner {
    /// Keep texts whose character count lies in `min_chars..=max_chars`
    pub fn new(min_chars: usize, max_chars: usize) -> Self {
        Self { min_chars, max_chars }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.min_text_chars, config.max_text_chars)
    }

    /// Collapse whitespace runs into one space, trim, and drop every
    /// character that is neither a word character, whitespace, a CJK
    /// ideograph nor kept punctuation.
    pub fn clean(&self, text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .filter(|&c| is_kept(c))
            .collect()
    }

    /// Clean every text, then drop blanks, later duplicates, and texts
    /// outside the length bound. Surviving texts keep their input order.
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    pub fn process<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let cleaned: Vec<String> = texts
            .iter()
            .map(|text| self.clean(text.as_ref()))
            .filter(|text| !text.trim().is_empty())
            .filter(|text| seen.insert(text.clone()))
            .collect();
        let distinct = cleaned.len();

        let kept: Vec<String> = cleaned
            .into_iter()
            .filter(|text| self.within_bounds(text))
            .collect();

        debug!("{} distinct texts, {} outside length bounds", distinct, distinct - kept.len());
        info!("Cleaned {} raw texts down to {} knowledge points", texts.len(), kept.len());
        kept
    }

    fn within_bounds(&self, text: &str) -> bool {
        (self.min_chars..=self.max_chars).contains(&text.chars().count())
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::from_config(&BuildConfig::default())
    }
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || ('\u{4e00}'..='\u{9fff}').contains(&c)
        || KEPT_PUNCTUATION.contains(c)
}
