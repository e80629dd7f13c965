//! Edge-candidate generation and materialization
//!
//! Scoring every ordered pair is kept apart from writing edges, so the
//! quadratic comparison stays the same while writes go out in batches.

use crate::Result;
use kgraph_core::text::jaccard;
use kgraph_core::{EdgeType, NewEdge, NodeRecord, TokenSet};
use kgraph_db::GraphStore;
use tracing::debug;

/// An ordered pair of positions whose similarity passed the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCandidate {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Produces candidates over a fixed list of token sets
///
/// Each call to [`candidates`](CandidateGenerator::candidates) starts a
/// fresh pass.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    token_sets: &'a [TokenSet],
    threshold: f64,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(token_sets: &'a [TokenSet], threshold: f64) -> Self {
        Self { token_sets, threshold }
    }

    pub fn candidates(&self) -> Candidates<'a> {
        Candidates {
            token_sets: self.token_sets,
            threshold: self.threshold,
            source: 0,
            target: 0,
        }
    }
}

/// Lazy pass over every ordered pair `(i, j)` with `i != j`
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    token_sets: &'a [TokenSet],
    threshold: f64,
    source: usize,
    target: usize,
}

impl Iterator for Candidates<'_> {
    type Item = EdgeCandidate;

    fn next(&mut self) -> Option<EdgeCandidate> {
        let n = self.token_sets.len();
        while self.source < n {
            let (i, j) = (self.source, self.target);
            self.target += 1;
            if self.target == n {
                self.target = 0;
                self.source += 1;
            }

            if i == j {
                continue;
            }
            let weight = jaccard(&self.token_sets[i], &self.token_sets[j]);
            if weight > self.threshold {
                return Some(EdgeCandidate {
                    source: i,
                    target: j,
                    weight,
                });
            }
        }
        None
    }
}

/// Writes candidates to a store as RELATED_TO edges
pub struct EdgeMaterializer<'a> {
    store: &'a dyn GraphStore,
    batch_size: usize,
}

impl<'a> EdgeMaterializer<'a> {
    pub fn new(store: &'a dyn GraphStore, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    /// Write every candidate, `nodes[i]` being the node at position `i`.
    /// Returns the number of edges written.
    pub async fn materialize<I>(&self, nodes: &[NodeRecord], candidates: I) -> Result<usize>
    where
        I: IntoIterator<Item = EdgeCandidate>,
    {
        let mut written = 0;
        let mut batch = Vec::with_capacity(self.batch_size);

        for candidate in candidates {
            let edge = NewEdge::new(
                nodes[candidate.source].id.clone(),
                nodes[candidate.target].id.clone(),
                EdgeType::RelatedTo,
            )
            .with_weight(candidate.weight);
            batch.push(edge);

            if batch.len() == self.batch_size {
                written += self.flush(&mut batch).await?;
            }
        }
        written += self.flush(&mut batch).await?;

        Ok(written)
    }

    async fn flush(&self, batch: &mut Vec<NewEdge>) -> Result<usize> {
        if batch.is_empty() {
            return Ok(0);
        }
        let count = batch.len();
        self.store.create_edges(std::mem::take(batch)).await?;
        debug!("Wrote {} RELATED_TO edges", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kgraph_core::{SimpleTokenizer, Tokenizer};

    fn sets(texts: &[&str]) -> Vec<TokenSet> {
        texts.iter().map(|t| SimpleTokenizer.token_set(t)).collect()
    }

    #[test]
    fn test_similar_pair_yields_both_directions() {
        let sets = sets(&["a b c d", "a b c e", "x y z"]);
        let found: Vec<_> = CandidateGenerator::new(&sets, 0.5).candidates().collect();

        let pairs: Vec<_> = found.iter().map(|c| (c.source, c.target)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
        assert_eq!(found[0].weight, found[1].weight);
        assert!((found[0].weight - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        // |{a,b}| / |{a,b,c,d}| == 0.5 exactly
        let sets = sets(&["a b c", "a b d"]);

        assert_eq!(CandidateGenerator::new(&sets, 0.5).candidates().count(), 0);
        assert_eq!(CandidateGenerator::new(&sets, 0.4999999).candidates().count(), 2);
    }

    #[test]
    fn test_no_self_loops() {
        let sets = sets(&["same text", "same text", "same text"]);
        let found: Vec<_> = CandidateGenerator::new(&sets, 0.0).candidates().collect();

        assert_eq!(found.len(), 6);
        assert!(found.iter().all(|c| c.source != c.target));
    }

    #[test]
    fn test_empty_token_sets_never_match() {
        let sets = sets(&["", "", "a"]);
        assert_eq!(CandidateGenerator::new(&sets, 0.0).candidates().count(), 0);
    }

    #[test]
    fn test_generator_is_restartable() {
        let sets = sets(&["a b", "a b c", "a c"]);
        let generator = CandidateGenerator::new(&sets, 0.3);

        let first: Vec<_> = generator.candidates().collect();
        let second: Vec<_> = generator.candidates().collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_no_input_no_candidates() {
        let sets: Vec<TokenSet> = Vec::new();
        assert_eq!(CandidateGenerator::new(&sets, 0.5).candidates().next(), None);
    }
}
