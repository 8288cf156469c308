// Copyright 2025 Cowboy AI, LLC.

//! Validates the business-responsibility branch's output and falls back
//! to progressively simpler clusterings when it fails basic sanity
//! checks.

use indexmap::IndexMap;

use super::domains::infer_domain;
use super::entity_based::cluster_entity_based;
use crate::model::{Cluster, DependencyGraph};

/// Whether `clusters` pass the three sanity checks a business-
/// responsibility clustering is expected to satisfy: no cluster mixes two
/// distinct non-core domains, no single cluster exceeds half the total
/// component count, and at least two clusters exist.
fn passes_validation(clusters: &[Cluster], graph: &DependencyGraph, total: usize) -> bool {
    if clusters.len() < 2 {
        return false;
    }

    for cluster in clusters {
        if total > 0 && cluster.size() as f64 > total as f64 * 0.5 {
            return false;
        }

        let mut non_core_domains: Vec<String> = Vec::new();
        for id in &cluster.members {
            if let Some(c) = graph.get(id) {
                let domain = infer_domain(c);
                if domain != "core" && !non_core_domains.contains(&domain) {
                    non_core_domains.push(domain);
                }
            }
        }
        if non_core_domains.len() > 1 {
            return false;
        }
    }

    true
}

/// One cluster per non-core domain; components whose domain is "core" are
/// routed to the domain cluster whose members share the most leading
/// package segments with them.
fn cluster_domain_based(graph: &DependencyGraph, domain_groups: &IndexMap<String, Vec<String>>) -> Vec<Cluster> {
    let mut next_id = 0usize;
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut cluster_domain_names: Vec<String> = Vec::new();
    let mut core_members: Vec<String> = Vec::new();

    for (domain, members) in domain_groups {
        if domain == "core" {
            core_members.extend(members.iter().cloned());
            continue;
        }
        clusters.push(Cluster::new(next_id, members.clone()));
        cluster_domain_names.push(domain.clone());
        next_id += 1;
    }

    if clusters.is_empty() {
        if !core_members.is_empty() {
            clusters.push(Cluster::new(next_id, core_members));
        }
        return clusters;
    }

    for id in core_members {
        let c = graph.get(&id).expect("clustering operates on ids drawn from the graph");
        let pkg = c.package_path();
        let pkg_segments: Vec<&str> = pkg.split('.').filter(|s| !s.is_empty()).collect();

        let mut best_idx = 0usize;
        let mut best_overlap = -1i64;
        for (idx, domain) in cluster_domain_names.iter().enumerate() {
            let overlap = pkg_segments.iter().filter(|seg| **seg == domain.as_str()).count() as i64;
            if overlap > best_overlap {
                best_overlap = overlap;
                best_idx = idx;
            }
        }
        clusters[best_idx].members.push(id);
    }

    for cluster in &mut clusters {
        cluster.members.sort();
        cluster.members.dedup();
    }
    clusters
}

/// Validate the business-responsibility branch's clusters and cascade
/// through domain-based, then entity-based, clustering until the result
/// passes validation (or entity-based clustering, which is always
/// accepted, is reached).
pub fn apply_fallback_cascade(
    business_clusters: Vec<Cluster>,
    graph: &DependencyGraph,
    domain_groups: &IndexMap<String, Vec<String>>,
    all_ids: &[String],
) -> Vec<Cluster> {
    let total = graph.len();

    if passes_validation(&business_clusters, graph, total) {
        return business_clusters;
    }

    let domain_based = cluster_domain_based(graph, domain_groups);
    if domain_based.len() >= 2 {
        return domain_based;
    }

    cluster_entity_based(graph, all_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    #[test]
    fn single_cluster_fails_validation() {
        let g = DependencyGraph::new(vec![Component::new("com.acme.A"), Component::new("com.acme.B")], vec![]);
        let clusters = vec![Cluster::new(0, vec!["com.acme.A".to_string(), "com.acme.B".to_string()])];
        assert!(!passes_validation(&clusters, &g, 2));
    }

    #[test]
    fn oversized_single_cluster_fails_validation() {
        let g = DependencyGraph::new(
            vec![Component::new("com.acme.A"), Component::new("com.acme.B"), Component::new("com.acme.C")],
            vec![],
        );
        let clusters = vec![
            Cluster::new(0, vec!["com.acme.A".to_string(), "com.acme.B".to_string()]),
            Cluster::new(1, vec!["com.acme.C".to_string()]),
        ];
        // first cluster holds 2/3 > 50%
        assert!(!passes_validation(&clusters, &g, 3));
    }

    #[test]
    fn domain_based_routes_core_members_by_package_overlap() {
        let g = DependencyGraph::new(
            vec![
                Component::new("com.acme.orders.OrderService"),
                Component::new("com.acme.billing.Invoice"),
                Component::new("com.acme.App"),
            ],
            vec![],
        );
        let mut groups = IndexMap::new();
        groups.insert("orders".to_string(), vec!["com.acme.orders.OrderService".to_string()]);
        groups.insert("billing".to_string(), vec!["com.acme.billing.Invoice".to_string()]);
        groups.insert("core".to_string(), vec!["com.acme.App".to_string()]);
        let clusters = cluster_domain_based(&g, &groups);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.iter().map(|c| c.size()).sum::<usize>(), 3);
    }
}
