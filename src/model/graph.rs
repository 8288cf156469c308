// Copyright 2025 Cowboy AI, LLC.

//! The typed dependency graph the inference core consumes.

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::component::Component;
use super::edge::{Edge, EdgeType};

/// Metadata the producer (ingester) attaches to the Graph artifact:
/// a source tag, an ISO-8601 collection timestamp, and two free-form
/// accuracy-metric maps the ingester/serializer populate and the core never
/// inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMeta {
    pub source: String,
    pub collected_at: DateTime<Utc>,
    pub dependency_accuracy: IndexMap<String, f64>,
    pub decomposition_accuracy: IndexMap<String, f64>,
}

impl GraphMeta {
    pub fn new(source: impl Into<String>, collected_at: DateTime<Utc>) -> Self {
        Self {
            source: source.into(),
            collected_at,
            dependency_accuracy: IndexMap::new(),
            decomposition_accuracy: IndexMap::new(),
        }
    }
}

/// The ordered sequence of components and edges the producer contract
/// guarantees referential closure over: every `from`/`to` in `edges`
/// corresponds to a key in `components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    components: IndexMap<String, Component>,
    pub edges: Vec<Edge>,
    pub meta: Option<GraphMeta>,
}

impl DependencyGraph {
    /// Build a graph from components and edges, asserting referential
    /// closure once at entry. Debug builds panic on a dangling edge endpoint; release
    /// builds trust the producer contract and skip the check.
    pub fn new(components: Vec<Component>, edges: Vec<Edge>) -> Self {
        let components: IndexMap<String, Component> =
            components.into_iter().map(|c| (c.id.clone(), c)).collect();

        debug_assert!(
            edges
                .iter()
                .all(|e| components.contains_key(&e.from) && components.contains_key(&e.to)),
            "producer contract violated: edge references a component id absent from the graph"
        );

        Self {
            components,
            edges,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: GraphMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Mutable access for the phases that write back into `Component`
    /// (`LayerClassifier` fills `layer`; `ClusteringAlgorithm` fills
    /// `domain`). No other phase mutates components.
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut Component> {
        self.components.values_mut()
    }

    pub fn component_ids(&self) -> IndexSet<String> {
        self.components.keys().cloned().collect()
    }

    pub fn total_loc(&self) -> u64 {
        self.components.values().map(|c| c.loc as u64).sum()
    }

    pub fn edges_from(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn edges_to(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.to == id)
    }

    /// Sum of outgoing edge weights for a component, used throughout the
    /// cluster-metrics and viability cohesion/coupling denominators.
    pub fn outgoing_weight(&self, id: &str) -> u64 {
        self.edges_from(id).map(|e| e.weight as u64).sum()
    }

    /// Raw count (not weight) of outgoing edges of a given type, the unit
    /// the call-density evidence signal counts in.
    pub fn outgoing_edge_count_of_type(&self, id: &str, kind: EdgeType) -> u64 {
        self.edges_from(id).filter(|e| e.has_type(kind)).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component::Component;

    fn graph() -> DependencyGraph {
        let a = Component::new("A");
        let b = Component::new("B");
        let edges = vec![Edge::new("A", "B", 3, vec![EdgeType::Call])];
        DependencyGraph::new(vec![a, b], edges)
    }

    #[test]
    fn len_counts_components() {
        assert_eq!(graph().len(), 2);
    }

    #[test]
    fn outgoing_weight_sums_edge_weights() {
        assert_eq!(graph().outgoing_weight("A"), 3);
        assert_eq!(graph().outgoing_weight("B"), 0);
    }

    #[test]
    fn total_loc_sums_component_loc() {
        let mut a = Component::new("A");
        a.loc = 10;
        let mut b = Component::new("B");
        b.loc = 5;
        let g = DependencyGraph::new(vec![a, b], vec![]);
        assert_eq!(g.total_loc(), 15);
    }

    #[test]
    #[should_panic]
    fn new_asserts_referential_closure_in_debug() {
        let a = Component::new("A");
        let edges = vec![Edge::new("A", "Ghost", 1, vec![EdgeType::Call])];
        let _ = DependencyGraph::new(vec![a], edges);
    }
}
