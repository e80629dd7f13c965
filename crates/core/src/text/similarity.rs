//! Jaccard similarity over token sets

use super::{TokenSet, Tokenizer};

/// |a ∩ b| / |a ∪ b|, or 0 when both sets are empty
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Symmetric text similarity in [0, 1]
pub struct Similarity<'a> {
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> Similarity<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn score(&self, text_a: &str, text_b: &str) -> f64 {
        jaccard(&self.tokenizer.token_set(text_a), &self.tokenizer.token_set(text_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{JiebaTokenizer, SimpleTokenizer};

    #[test]
    fn test_jaccard_half() {
        let scorer = Similarity::new(&SimpleTokenizer);
        assert_eq!(scorer.score("a b c", "a b d"), 0.5);
    }

    #[test]
    fn test_score_is_symmetric() {
        let scorer = Similarity::new(&SimpleTokenizer);
        let pairs = [
            ("graph neural network", "neural network layer"),
            ("a b c d e", "e"),
            ("", "something"),
        ];
        for (a, b) in pairs {
            assert_eq!(scorer.score(a, b), scorer.score(b, a));
        }
    }

    #[test]
    fn test_empty_texts_score_zero() {
        let scorer = Similarity::new(&SimpleTokenizer);
        assert_eq!(scorer.score("", ""), 0.0);
        assert_eq!(scorer.score("!!!", "..."), 0.0);
    }

    #[test]
    fn test_identical_texts_score_one() {
        let scorer = Similarity::new(&SimpleTokenizer);
        assert_eq!(scorer.score("same words here", "here same words"), 1.0);
    }

    #[test]
    fn test_jieba_similarity_bounds() {
        let tokenizer = JiebaTokenizer::new();
        let scorer = Similarity::new(&tokenizer);

        assert_eq!(scorer.score("机器学习", "数据库系统"), 0.0);
        assert_eq!(scorer.score("机器学习的定义", "机器学习的定义"), 1.0);
        assert_eq!(
            scorer.score("深度学习是机器学习的分支", "机器学习的定义"),
            scorer.score("机器学习的定义", "深度学习是机器学习的分支"),
        );
    }
}
