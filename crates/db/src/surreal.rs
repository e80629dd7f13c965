//! SurrealDB-backed graph store

use crate::schema::NODE_TABLE;
use crate::{DbConnection, GraphStore, Result};
use async_trait::async_trait;
use kgraph_core::{EdgeRecord, EdgeType, NewEdge, NodeId, NodeLabel, NodeRecord, Properties};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// [`GraphStore`] over an embedded SurrealDB connection
///
/// Node keys are UUIDv4 strings; every record also carries a `seq` number so
/// queries can return records in creation order.
#[derive(Clone)]
pub struct SurrealStore {
    db: DbConnection,
    seq: Arc<AtomicU64>,
}

impl SurrealStore {
    /// Create a new store over an initialized connection
    pub fn new(db: DbConnection) -> Self {
        Self {
            db,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl GraphStore for SurrealStore {
    #[instrument(skip(self))]
    async fn wipe(&self) -> Result<()> {
        self.db
            .query(
                r#"
                BEGIN TRANSACTION;
                DELETE relation;
                DELETE node;
                COMMIT TRANSACTION;
            "#,
            )
            .await?
            .check()?;

        debug!("Store wiped");
        Ok(())
    }

    // ==========================================
    // NODE OPERATIONS
    // ==========================================

    #[instrument(skip(self, properties))]
    async fn create_node(&self, label: NodeLabel, properties: Properties) -> Result<NodeId> {
        let key = uuid::Uuid::new_v4().to_string();

        self.db
            .query(
                r#"
                CREATE type::thing($table, $key) CONTENT {
                    label: $label,
                    seq: $seq,
                    properties: $properties
                };
            "#,
            )
            .bind(("table", NODE_TABLE))
            .bind(("key", key.clone()))
            .bind(("label", label.as_str()))
            .bind(("seq", self.next_seq()))
            .bind(("properties", serde_json::Value::Object(properties)))
            .await?
            .check()?;

        Ok(NodeId::new(key))
    }

    #[instrument(skip(self))]
    async fn nodes_by_label(&self, label: NodeLabel) -> Result<Vec<NodeRecord>> {
        let rows: Vec<NodeRow> = self
            .db
            .query(
                r#"
                SELECT meta::id(id) AS key, seq, properties
                FROM node
                WHERE label = $label
                ORDER BY seq ASC
            "#,
            )
            .bind(("label", label.as_str()))
            .await?
            .take(0)?;

        Ok(rows
            .into_iter()
            .map(|row| NodeRecord::new(NodeId::new(row.key), label, row.properties.unwrap_or_default()))
            .collect())
    }

    // ==========================================
    // GRAPH OPERATIONS
    // ==========================================

    #[instrument(skip(self, edge), fields(edge_type = %edge.edge_type))]
    async fn create_edge(&self, edge: NewEdge) -> Result<()> {
        self.create_edges(vec![edge]).await
    }

    /// One transaction per batch; a failing edge rolls back the whole batch.
    #[instrument(skip(self, edges), fields(count = edges.len()))]
    async fn create_edges(&self, edges: Vec<NewEdge>) -> Result<()> {
        if edges.is_empty() {
            return Ok(());
        }

        // RELATE needs record ids, so keys are resolved first
        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for i in 0..edges.len() {
            sql.push_str(&format!(
                "LET $from_{i} = type::thing($nodes, $source_{i});\n\
                 LET $to_{i} = type::thing($nodes, $target_{i});\n\
                 RELATE $from_{i}->relation->$to_{i} CONTENT {{ \
                 kind: $kind_{i}, seq: $seq_{i}, properties: $properties_{i} }};\n"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let count = edges.len();
        let mut query = self.db.query(sql).bind(("nodes", NODE_TABLE));
        for (i, edge) in edges.into_iter().enumerate() {
            query = query
                .bind((format!("source_{i}"), edge.source.to_string()))
                .bind((format!("target_{i}"), edge.target.to_string()))
                .bind((format!("kind_{i}"), edge.edge_type.as_str()))
                .bind((format!("seq_{i}"), self.next_seq()))
                .bind((format!("properties_{i}"), serde_json::Value::Object(edge.properties)));
        }
        query.await?.check()?;

        debug!("Related {} edges", count);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn edges_by_type(&self, edge_type: EdgeType) -> Result<Vec<EdgeRecord>> {
        let rows: Vec<EdgeRow> = self
            .db
            .query(
                r#"
                SELECT meta::id(in) AS source, meta::id(out) AS target, seq, properties
                FROM relation
                WHERE kind = $kind
                ORDER BY seq ASC
            "#,
            )
            .bind(("kind", edge_type.as_str()))
            .await?
            .take(0)?;

        Ok(rows
            .into_iter()
            .map(|row| EdgeRecord {
                source: NodeId::new(row.source),
                target: NodeId::new(row.target),
                edge_type,
                properties: row.properties.unwrap_or_default(),
            })
            .collect())
    }
}

// ==========================================
// RESULT TYPES
// ==========================================

#[derive(Debug, Deserialize)]
struct NodeRow {
    key: String,
    #[serde(default)]
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct EdgeRow {
    source: String,
    target: String,
    #[serde(default)]
    properties: Option<Properties>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory;
    use kgraph_core::node::{course_properties, knowledge_properties};

    async fn store() -> SurrealStore {
        SurrealStore::new(init_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_create_and_query_nodes() {
        let store = store().await;

        store.create_node(NodeLabel::Course, course_properties("大数据技术")).await.unwrap();
        for i in 0..3 {
            store
                .create_node(
                    NodeLabel::KnowledgeNode,
                    knowledge_properties(format!("kp{}", i), format!("text {}", i)),
                )
                .await
                .unwrap();
        }

        let kps = store.nodes_by_label(NodeLabel::KnowledgeNode).await.unwrap();
        assert_eq!(kps.len(), 3);
        let texts: Vec<_> = kps.iter().map(|n| n.description().unwrap()).collect();
        assert_eq!(texts, vec!["text 0", "text 1", "text 2"]);

        let courses = store.nodes_by_label(NodeLabel::Course).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name(), Some("大数据技术"));
    }

    #[tokio::test]
    async fn test_edges_round_trip() {
        let store = store().await;
        let a = store.create_node(NodeLabel::KnowledgeNode, knowledge_properties("a", "x")).await.unwrap();
        let b = store.create_node(NodeLabel::KnowledgeNode, knowledge_properties("b", "y")).await.unwrap();

        store
            .create_edge(NewEdge::new(a.clone(), b.clone(), EdgeType::RelatedTo).with_weight(0.75))
            .await
            .unwrap();
        store
            .create_edge(NewEdge::new(a.clone(), b.clone(), EdgeType::Contains))
            .await
            .unwrap();

        let related = store.edges_by_type(EdgeType::RelatedTo).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].source, a);
        assert_eq!(related[0].target, b);
        assert_eq!(related[0].weight(), Some(0.75));

        let contains = store.edges_by_type(EdgeType::Contains).await.unwrap();
        assert_eq!(contains.len(), 1);
        assert!(contains[0].weight().is_none());
    }

    #[tokio::test]
    async fn test_wipe() {
        let store = store().await;
        let a = store.create_node(NodeLabel::KnowledgeNode, knowledge_properties("a", "x")).await.unwrap();
        let b = store.create_node(NodeLabel::KnowledgeNode, knowledge_properties("b", "y")).await.unwrap();
        store
            .create_edge(NewEdge::new(a, b, EdgeType::RelatedTo).with_weight(0.9))
            .await
            .unwrap();

        store.wipe().await.unwrap();

        assert!(store.nodes_by_label(NodeLabel::KnowledgeNode).await.unwrap().is_empty());
        assert!(store.edges_by_type(EdgeType::RelatedTo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batched_edges_keep_order() {
        let store = store().await;
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            ids.push(
                store
                    .create_node(NodeLabel::KnowledgeNode, knowledge_properties(name, name))
                    .await
                    .unwrap(),
            );
        }

        store.create_edges(Vec::new()).await.unwrap();
        store
            .create_edges(vec![
                NewEdge::new(ids[0].clone(), ids[1].clone(), EdgeType::RelatedTo).with_weight(0.6),
                NewEdge::new(ids[1].clone(), ids[0].clone(), EdgeType::RelatedTo).with_weight(0.6),
                NewEdge::new(ids[1].clone(), ids[2].clone(), EdgeType::RelatedTo).with_weight(0.8),
            ])
            .await
            .unwrap();

        let related = store.edges_by_type(EdgeType::RelatedTo).await.unwrap();
        let pairs: Vec<_> = related
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.weight()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (ids[0].clone(), ids[1].clone(), Some(0.6)),
                (ids[1].clone(), ids[0].clone(), Some(0.6)),
                (ids[1].clone(), ids[2].clone(), Some(0.8)),
            ]
        );
    }
}
