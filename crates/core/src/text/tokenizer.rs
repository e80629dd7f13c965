//! Tokenizers and keyword extractors

use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use std::collections::{HashMap, HashSet};

/// A bag of distinct words
pub type TokenSet = HashSet<String>;

/// Splits text into words and ranks its keywords
pub trait Tokenizer: Send + Sync {
    /// Words of `text` in order, duplicates kept
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Up to `top_k` keywords, most significant first
    fn keywords(&self, text: &str, top_k: usize) -> Vec<String>;

    /// Distinct words of `text`
    fn token_set(&self, text: &str) -> TokenSet {
        self.tokenize(text).into_iter().collect()
    }
}

/// Chinese word segmentation with TF-IDF keyword ranking
///
/// Segments are kept exactly as cut, so a space between words is a token of
/// its own and takes part in similarity scores.
pub struct JiebaTokenizer {
    jieba: Jieba,
    tfidf: TfIdf,
}

impl JiebaTokenizer {
    /// Load the bundled dictionary and IDF table
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            tfidf: TfIdf::default(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.jieba.cut(text, true).into_iter().map(str::to_string).collect()
    }

    fn keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        self.tfidf
            .extract_keywords(&self.jieba, text, top_k, Vec::new())
            .into_iter()
            .map(|k| k.keyword)
            .collect()
    }
}

/// Splits on anything that is not alphanumeric and lowercases
///
/// Keywords are the most frequent words of two or more characters; ties go
/// to the word seen first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    const MIN_KEYWORD_CHARS: usize = 2;
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| word.to_lowercase())
            .collect()
    }

    fn keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        // word -> (count, first position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, word) in self.tokenize(text).into_iter().enumerate() {
            if word.chars().count() < Self::MIN_KEYWORD_CHARS {
                continue;
            }
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));
        ranked.into_iter().take(top_k).map(|(word, _)| word).collect()
    }
}
