//! Text capabilities: tokenization, keyword extraction and similarity

pub mod similarity;
pub mod tokenizer;

pub use similarity::{jaccard, Similarity};
pub use tokenizer::{JiebaTokenizer, SimpleTokenizer, TokenSet, Tokenizer};
