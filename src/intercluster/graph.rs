// Copyright 2025 Cowboy AI, LLC.

//! InterClusterGraph: the weighted evidence graph over every unordered
//! pair of clusters, used by consolidation to decide what to merge.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::signals;
use crate::config::PipelineConfig;
use crate::model::{Cluster, DependencyGraph};

/// One pair's computed evidence: the four signals, the weighted score,
/// and (for event links) the matched token names retained for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEvidence {
    pub cluster_a: usize,
    pub cluster_b: usize,
    pub table_jaccard: f64,
    pub call_density: f64,
    pub token_similarity: f64,
    pub event_links: f64,
    pub event_link_names: Vec<String>,
    pub score: f64,
}

/// All pairs scoring above the evidence floor, sorted descending by score,
/// plus an O(1) lookup by unordered pair.
#[derive(Debug, Clone, Default)]
pub struct InterClusterGraph {
    edges: Vec<ClusterEvidence>,
    lookup: HashMap<(usize, usize), usize>,
}

const MIN_EDGE_SCORE: f64 = 0.1;

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl InterClusterGraph {
    /// Build the evidence graph over every unordered cluster pair.
    pub fn build(clusters: &[Cluster], graph: &DependencyGraph, config: &PipelineConfig) -> Self {
        let pairs: Vec<(usize, usize)> = (0..clusters.len())
            .flat_map(|i| ((i + 1)..clusters.len()).map(move |j| (i, j)))
            .collect();

        let mut edges: Vec<ClusterEvidence> = pairs
            .par_iter()
            .filter_map(|&(i, j)| {
                let a = &clusters[i];
                let b = &clusters[j];

                let table = signals::table_jaccard(a, b);
                let call = signals::call_density(a, b, graph);
                let token = signals::token_similarity(a, b, graph, config);
                let (event, event_names) = signals::event_links(a, b, graph);

                let score = config.table_weight * table
                    + config.call_weight * call
                    + config.token_weight * token
                    + config.event_weight * event;

                if score > MIN_EDGE_SCORE {
                    Some(ClusterEvidence {
                        cluster_a: a.cluster_id,
                        cluster_b: b.cluster_id,
                        table_jaccard: table,
                        call_density: call,
                        token_similarity: token,
                        event_links: event,
                        event_link_names: event_names,
                        score,
                    })
                } else {
                    None
                }
            })
            .collect();

        edges.sort_by(|x, y| {
            y.score
                .partial_cmp(&x.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| x.cluster_a.cmp(&y.cluster_a))
                .then_with(|| x.cluster_b.cmp(&y.cluster_b))
        });

        let mut lookup = HashMap::with_capacity(edges.len());
        for (idx, e) in edges.iter().enumerate() {
            lookup.insert(pair_key(e.cluster_a, e.cluster_b), idx);
        }

        Self { edges, lookup }
    }

    /// All edges, sorted descending by evidence score.
    pub fn edges(&self) -> &[ClusterEvidence] {
        &self.edges
    }

    /// Evidence for a specific unordered pair, if it scored above the
    /// floor.
    pub fn evidence_for(&self, a: usize, b: usize) -> Option<&ClusterEvidence> {
        self.lookup.get(&pair_key(a, b)).map(|&idx| &self.edges[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    #[test]
    fn edges_are_sorted_descending_by_score() {
        let mut a = Cluster::new(0, vec!["A".to_string()]);
        a.metrics.tables_shared.insert("orders".into());
        let mut b = Cluster::new(1, vec!["B".to_string()]);
        b.metrics.tables_shared.insert("orders".into());
        let c = Cluster::new(2, vec!["C".to_string()]);

        let graph = DependencyGraph::new(
            vec![Component::new("A"), Component::new("B"), Component::new("C")],
            vec![],
        );
        let icg = InterClusterGraph::build(&[a, b, c], &graph, &PipelineConfig::default());
        let scores: Vec<f64> = icg.edges().iter().map(|e| e.score).collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|x, y| y.partial_cmp(x).unwrap());
        assert_eq!(scores, sorted);
    }

    #[test]
    fn evidence_lookup_is_order_independent() {
        let mut a = Cluster::new(0, vec!["A".to_string()]);
        a.metrics.tables_shared.insert("orders".into());
        let mut b = Cluster::new(1, vec!["B".to_string()]);
        b.metrics.tables_shared.insert("orders".into());

        let graph = DependencyGraph::new(vec![Component::new("A"), Component::new("B")], vec![]);
        let icg = InterClusterGraph::build(&[a, b], &graph, &PipelineConfig::default());
        assert_eq!(icg.evidence_for(0, 1), icg.evidence_for(1, 0));
    }

    #[test]
    fn low_scoring_pairs_are_excluded() {
        let a = Cluster::new(0, vec!["A".to_string()]);
        let b = Cluster::new(1, vec!["B".to_string()]);
        let graph = DependencyGraph::new(vec![Component::new("A"), Component::new("B")], vec![]);
        let icg = InterClusterGraph::build(&[a, b], &graph, &PipelineConfig::default());
        assert!(icg.edges().is_empty());
    }
}
