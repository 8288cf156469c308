// Copyright 2025 Cowboy AI, LLC.

//! ClusterMetricsCalculator: folds each cluster's members over the full
//! dependency graph into cohesion, coupling, shared-table, sensitivity,
//! and size aggregates.
//!
//! Accumulate-then-divide: each metric folds over the cluster's member
//! collection once rather than walking the graph per-member on demand.

use std::collections::{BTreeSet, HashSet};

use rayon::prelude::*;

use crate::model::{Cluster, DependencyGraph};

fn compute_one(cluster: &Cluster, graph: &DependencyGraph) -> crate::model::ClusterMetrics {
    let member_set: HashSet<&str> = cluster.members.iter().map(String::as_str).collect();

    let mut internal_weight: u64 = 0;
    let mut outgoing_weight: u64 = 0;
    let mut external_weight: u64 = 0;
    let mut tables_seen_once: BTreeSet<String> = BTreeSet::new();
    let mut tables_shared: BTreeSet<String> = BTreeSet::new();
    let mut sensitive = false;
    let mut loc: u64 = 0;

    for member_id in &cluster.members {
        let Some(component) = graph.get(member_id) else {
            continue;
        };
        loc += component.loc as u64;
        sensitive |= component.sensitive_data;

        for table in &component.tables_used {
            if tables_seen_once.contains(table) {
                tables_shared.insert(table.clone());
            } else {
                tables_seen_once.insert(table.clone());
            }
        }

        for edge in graph.edges_from(member_id) {
            outgoing_weight += edge.weight as u64;
            if member_set.contains(edge.to.as_str()) {
                internal_weight += edge.weight as u64;
            } else {
                external_weight += edge.weight as u64;
            }
        }
    }

    let cohesion = if outgoing_weight == 0 {
        0.0
    } else {
        internal_weight as f64 / outgoing_weight as f64
    };
    let coupling = if outgoing_weight == 0 {
        0.0
    } else {
        external_weight as f64 / outgoing_weight as f64
    };

    crate::model::ClusterMetrics {
        cohesion,
        coupling,
        tables_shared,
        sensitive,
        loc,
    }
}

/// Compute and attach per-cluster metrics for every cluster, in parallel
/// over clusters (the graph is read-only during this phase, so no
/// synchronization is needed across the fold).
pub fn compute_cluster_metrics(clusters: &mut [Cluster], graph: &DependencyGraph) {
    let metrics: Vec<_> = clusters.par_iter().map(|c| compute_one(c, graph)).collect();
    for (cluster, metrics) in clusters.iter_mut().zip(metrics) {
        cluster.metrics = metrics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Edge, EdgeType};

    fn two_member_cluster_graph() -> (DependencyGraph, Cluster) {
        let mut a = Component::new("A");
        a.loc = 10;
        let mut b = Component::new("B");
        b.loc = 5;
        b.sensitive_data = true;
        a.tables_used.insert("orders".into());
        b.tables_used.insert("orders".into());

        let edges = vec![
            Edge::new("A", "B", 6, vec![EdgeType::Call]),
            Edge::new("A", "Outside", 4, vec![EdgeType::Call]),
        ];
        let mut outside = Component::new("Outside");
        outside.loc = 1;
        let graph = DependencyGraph::new(vec![a, b, outside], edges);
        let cluster = Cluster::new(0, vec!["A".to_string(), "B".to_string()]);
        (graph, cluster)
    }

    #[test]
    fn cohesion_and_coupling_split_internal_vs_external_weight() {
        let (graph, cluster) = two_member_cluster_graph();
        let metrics = compute_one(&cluster, &graph);
        assert!((metrics.cohesion - 0.6).abs() < 1e-9);
        assert!((metrics.coupling - 0.4).abs() < 1e-9);
    }

    #[test]
    fn singleton_has_zero_cohesion_and_coupling() {
        let a = Component::new("A");
        let graph = DependencyGraph::new(vec![a], vec![]);
        let cluster = Cluster::new(0, vec!["A".to_string()]);
        let metrics = compute_one(&cluster, &graph);
        assert_eq!(metrics.cohesion, 0.0);
        assert_eq!(metrics.coupling, 0.0);
    }

    #[test]
    fn tables_shared_requires_at_least_two_members() {
        let (graph, cluster) = two_member_cluster_graph();
        let metrics = compute_one(&cluster, &graph);
        assert!(metrics.tables_shared.contains("orders"));
    }

    #[test]
    fn sensitive_is_or_across_members() {
        let (graph, cluster) = two_member_cluster_graph();
        let metrics = compute_one(&cluster, &graph);
        assert!(metrics.sensitive);
    }

    #[test]
    fn loc_sums_member_loc() {
        let (graph, cluster) = two_member_cluster_graph();
        let metrics = compute_one(&cluster, &graph);
        assert_eq!(metrics.loc, 15);
    }

    #[test]
    fn compute_cluster_metrics_fills_every_cluster() {
        let (graph, cluster) = two_member_cluster_graph();
        let mut clusters = vec![cluster];
        compute_cluster_metrics(&mut clusters, &graph);
        assert!((clusters[0].metrics.cohesion - 0.6).abs() < 1e-9);
    }
}
