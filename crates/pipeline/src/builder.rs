//! Graph Builder - turns knowledge-point texts into a similarity graph

use crate::candidates::{CandidateGenerator, EdgeMaterializer};
use crate::{BuildConfig, Result};
use kgraph_core::node::{course_properties, knowledge_properties};
use kgraph_core::{EdgeType, NewEdge, NodeId, NodeLabel, TokenSet, Tokenizer};
use kgraph_db::GraphStore;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Counts from a finished build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub course_id: NodeId,
    pub knowledge_nodes: usize,
    pub contains_edges: usize,
    pub related_edges: usize,
}

/// Rebuilds the course graph from scratch on every call
pub struct GraphBuilder {
    store: Arc<dyn GraphStore>,
    tokenizer: Arc<dyn Tokenizer>,
    config: BuildConfig,
}

impl GraphBuilder {
    /// Create a new builder with the default configuration
    pub fn new(store: Arc<dyn GraphStore>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            store,
            tokenizer,
            config: BuildConfig::default(),
        }
    }

    /// Set the build configuration
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Name for the knowledge point at `index`: its top keywords joined,
    /// or `KnowledgeNode<index>` when none are found.
    pub fn node_name(&self, index: usize, text: &str) -> String {
        let keywords = self.tokenizer.keywords(text, self.config.keyword_count);
        if keywords.is_empty() {
            format!("KnowledgeNode{}", index)
        } else {
            keywords.concat()
        }
    }

    /// Wipe the store and build the graph for `knowledge_points`.
    ///
    /// A store failure aborts the build and leaves whatever was already
    /// written; call `build` again to start over.
    #[instrument(skip(self, knowledge_points), fields(count = knowledge_points.len()))]
    pub async fn build<S: AsRef<str>>(
        &self,
        course_name: &str,
        knowledge_points: &[S],
    ) -> Result<BuildReport> {
        self.config.validate()?;
        info!(
            "Building knowledge graph for '{}' from {} knowledge points",
            course_name,
            knowledge_points.len()
        );

        self.store.wipe().await?;

        let course_id = self
            .store
            .create_node(NodeLabel::Course, course_properties(course_name))
            .await?;

        for (index, text) in knowledge_points.iter().enumerate() {
            let text = text.as_ref();
            let name = self.node_name(index, text);
            debug!("Creating knowledge node {}: {}", index, name);

            let id = self
                .store
                .create_node(NodeLabel::KnowledgeNode, knowledge_properties(name, text))
                .await?;
            self.store
                .create_edge(NewEdge::new(course_id.clone(), id, EdgeType::Contains))
                .await?;
        }

        let related_edges = self.build_relationships().await?;

        let report = BuildReport {
            course_id,
            knowledge_nodes: knowledge_points.len(),
            contains_edges: knowledge_points.len(),
            related_edges,
        };
        info!("Knowledge graph built: {:?}", report);

        Ok(report)
    }

    /// Link every ordered pair of stored knowledge points whose similarity
    /// passes the threshold.
    async fn build_relationships(&self) -> Result<usize> {
        // Read back so edges point at the ids the store assigned
        let nodes = self.store.nodes_by_label(NodeLabel::KnowledgeNode).await?;

        let token_sets: Vec<TokenSet> = nodes
            .iter()
            .map(|node| self.tokenizer.token_set(node.description().unwrap_or_default()))
            .collect();

        let generator = CandidateGenerator::new(&token_sets, self.config.similarity_threshold);
        let materializer = EdgeMaterializer::new(self.store.as_ref(), self.config.edge_batch_size);
        let written = materializer.materialize(&nodes, generator.candidates()).await?;

        info!("Created {} RELATED_TO edges among {} nodes", written, nodes.len());
        Ok(written)
    }
}
