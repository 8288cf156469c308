// Copyright 2025 Cowboy AI, LLC.

//! ClusteringAlgorithm: produces an initial partition of the graph's
//! components into `Cluster`s, branching on whether the project looks
//! single-domain or multi-domain.
//!
//! A three-way cascade: entity-based, business-responsibility, and
//! domain-based fallback.

pub mod business;
pub mod domains;
pub mod entity_based;
pub mod fallback;

use crate::config::PipelineConfig;
use crate::model::{Cluster, DependencyGraph};

/// Partition `graph`'s components into an initial `Vec<Cluster>`, writing
/// each component's inferred `domain` back into the graph along the way.
pub fn build_initial_clusters(graph: &mut DependencyGraph, config: &PipelineConfig) -> Vec<Cluster> {
    let domain_groups = domains::group_by_domain(graph.components());
    let total = graph.len();

    for component in graph.components_mut() {
        component.domain = Some(domains::infer_domain(component));
    }

    let all_ids: Vec<String> = graph.component_ids().into_iter().collect();

    let mut clusters = if domains::is_single_domain_project(&domain_groups, total) {
        tracing::debug!(total, "single-domain project detected; using entity-based clustering");
        entity_based::cluster_entity_based(graph, &all_ids)
    } else {
        tracing::debug!(total, domains = domain_groups.len(), "multi-domain project; using business-responsibility clustering");
        let business = business::cluster_business_responsibility(graph, &domain_groups, config);
        fallback::apply_fallback_cascade(business, graph, &domain_groups, &all_ids)
    };

    renumber(&mut clusters);
    clusters
}

fn renumber(clusters: &mut [Cluster]) {
    for (idx, cluster) in clusters.iter_mut().enumerate() {
        cluster.cluster_id = idx;
    }
}
