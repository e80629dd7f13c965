//! Integration tests for building and exporting the knowledge graph

mod common;

use common::{create_test_store, FlakyStore};
use kgraph_core::{EdgeType, JiebaTokenizer, NodeId, NodeLabel, SimpleTokenizer};
use kgraph_db::{DbError, GraphStore};
use kgraph_pipeline::{GraphBuilder, GraphExporter, PipelineError, TextCleaner};
use std::collections::BTreeSet;
use std::sync::Arc;

const MACHINE_LEARNING: &str = "机器学习 是 人工智能 的 核心 定义";
const DEEP_LEARNING: &str = "深度学习 是 人工智能 的 核心 定义";
const DATABASE: &str = "数据库系统 存储 结构化 数据";

/// Two overlapping texts and one unrelated text
#[tokio::test]
async fn test_course_scenario() {
    let store = create_test_store().await;
    let builder = GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer));

    let report = builder
        .build("大数据技术", &[MACHINE_LEARNING, DEEP_LEARNING, DATABASE])
        .await
        .expect("Failed to build graph");

    assert_eq!(report.knowledge_nodes, 3);
    assert_eq!(report.related_edges, 2);

    let courses = store.nodes_by_label(NodeLabel::Course).await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name(), Some("大数据技术"));

    let contains = store.edges_by_type(EdgeType::Contains).await.unwrap();
    assert_eq!(contains.len(), 3);
    assert!(contains.iter().all(|e| e.source == courses[0].id));

    let graph = GraphExporter::new(store.clone()).export().await.unwrap();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.nodes[0].text, MACHINE_LEARNING);

    let (ml, dl, db) = (&graph.nodes[0].id, &graph.nodes[1].id, &graph.nodes[2].id);
    assert_eq!(graph.edge_index, vec![(ml.clone(), dl.clone()), (dl.clone(), ml.clone())]);
    assert!(graph.edge_index.iter().all(|(s, t)| s != db && t != db));

    // 5 shared words out of 7
    for weight in &graph.edge_weight {
        assert!((weight - 5.0 / 7.0).abs() < 1e-6);
    }
}

/// The same scenario on unspaced text through Chinese segmentation
#[tokio::test]
async fn test_course_scenario_with_jieba() {
    let store = create_test_store().await;
    let builder = GraphBuilder::new(store.clone(), Arc::new(JiebaTokenizer::new()));
    let texts = [
        "机器学习是人工智能的核心定义",
        "深度学习是人工智能的核心定义",
        "数据库系统存储结构化数据",
    ];

    let report = builder.build("大数据技术", &texts).await.unwrap();

    assert_eq!(report.knowledge_nodes, 3);
    assert_eq!(report.contains_edges, 3);
    assert_eq!(report.related_edges, 2);
    assert_eq!(store.edges_by_type(EdgeType::Contains).await.unwrap().len(), 3);

    let graph = GraphExporter::new(store.clone()).export().await.unwrap();
    let (ml, dl) = (&graph.nodes[0].id, &graph.nodes[1].id);
    assert_eq!(graph.edge_index, vec![(ml.clone(), dl.clone()), (dl.clone(), ml.clone())]);
    assert!(graph.edge_weight.iter().all(|w| *w > 0.5));
    assert_eq!(graph.edge_weight[0], graph.edge_weight[1]);

    let nodes = store.nodes_by_label(NodeLabel::KnowledgeNode).await.unwrap();
    for (index, node) in nodes.iter().take(2).enumerate() {
        let name = node.name().unwrap();
        assert!(!name.is_empty());
        assert_ne!(name, format!("KnowledgeNode{}", index));
    }
}

/// Duplicate lines collapse to one node once cleaned
#[tokio::test]
async fn test_cleaned_input_has_no_duplicate_nodes() {
    let store = create_test_store().await;
    let builder = GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer));
    let texts = TextCleaner::new(1, 1000).process(&["same text here", "same text here", "short"]);

    let report = builder.build("course", &texts).await.unwrap();

    assert_eq!(report.knowledge_nodes, 2);
    assert_eq!(report.related_edges, 0);
    let graph = GraphExporter::new(store).export().await.unwrap();
    assert!(graph.edge_weight.is_empty());
}

#[tokio::test]
async fn test_node_names_from_keywords() {
    let store = create_test_store().await;
    let builder = GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer));

    builder.build("course", &[MACHINE_LEARNING, "的 是 了"]).await.unwrap();

    let names: Vec<_> = store
        .nodes_by_label(NodeLabel::KnowledgeNode)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["机器学习人工智能核心", "KnowledgeNode1"]);
}

/// Repeated builds give the same graph up to ids
#[tokio::test]
async fn test_builds_are_deterministic() {
    let texts = [
        "graph neural network message passing",
        "graph neural network aggregation",
        "neural network message passing layers",
        "relational database transactions",
        "database transactions and locking",
    ];

    let mut shapes = Vec::new();
    for _ in 0..2 {
        let store = create_test_store().await;
        GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer))
            .build("course", &texts)
            .await
            .unwrap();
        let graph = GraphExporter::new(store).export().await.unwrap();

        let text_of = |id: &NodeId| {
            graph
                .nodes
                .iter()
                .find(|n| &n.id == id)
                .map(|n| n.text.clone())
                .unwrap()
        };
        let edges: BTreeSet<(String, String, String)> = graph
            .edge_index
            .iter()
            .zip(&graph.edge_weight)
            .map(|((s, t), w)| (text_of(s), text_of(t), format!("{:.6}", w)))
            .collect();
        shapes.push((graph.nodes.len(), edges));
    }

    assert_eq!(shapes[0], shapes[1]);
    assert!(!shapes[0].1.is_empty());
}

#[tokio::test]
async fn test_export_is_consistent() {
    let store = create_test_store().await;
    GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer))
        .build("course", &["a b c d", "a b c e", "a b c f", "z"])
        .await
        .unwrap();

    let graph = GraphExporter::new(store.clone()).export().await.unwrap();

    assert_eq!(graph.edge_index.len(), graph.edge_weight.len());
    assert_eq!(graph.edge_index.len(), 6);
    assert!(graph.edge_index.iter().all(|(s, t)| s != t));
    assert!(graph.validate().is_ok());

    let stats = GraphExporter::new(store).stats().await.unwrap();
    assert_eq!(stats.course_count, 1);
    assert_eq!(stats.knowledge_node_count, 4);
    assert_eq!(stats.contains_count, 4);
    assert_eq!(stats.related_count, 6);
}

#[tokio::test]
async fn test_empty_input_exports_empty_graph() {
    let store = create_test_store().await;
    let texts: Vec<String> = Vec::new();

    GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer))
        .build("course", &texts)
        .await
        .unwrap();

    let graph = GraphExporter::new(store.clone()).export().await.unwrap();
    assert!(graph.is_empty());
    assert!(graph.edge_index.is_empty());
    assert_eq!(store.nodes_by_label(NodeLabel::Course).await.unwrap().len(), 1);
}

/// A store failure mid-build surfaces and leaves the partial graph behind
#[tokio::test]
async fn test_store_failure_aborts_build() {
    // wipe + course + (node, CONTAINS) for the first text, then fail
    let store = Arc::new(FlakyStore::failing_after(4));
    let builder = GraphBuilder::new(store.clone(), Arc::new(SimpleTokenizer));

    let result = builder.build("course", &["a b c", "a b c d"]).await;

    assert!(matches!(result, Err(PipelineError::Store(DbError::Connection(_)))));
    assert_eq!(store.nodes_by_label(NodeLabel::KnowledgeNode).await.unwrap().len(), 1);
    assert!(store.edges_by_type(EdgeType::RelatedTo).await.unwrap().is_empty());
}
