// Copyright 2025 Cowboy AI, LLC.

//! Entity-based clustering, taken for single-domain projects: one cluster
//! per recognized JPA-style entity, with remaining components attached by
//! name affinity.

use crate::model::{Cluster, Component, DependencyGraph};

const DATA_SUFFIXES: &[&str] = &["Entity", "Model", "Data"];

fn is_entity_component(c: &Component) -> bool {
    let name = c.simple_name();
    if name.ends_with("Entity") {
        return true;
    }
    if c.tables_used.is_empty() {
        return false;
    }
    let lower = name.to_ascii_lowercase();
    !lower.contains("repository") && !lower.contains("service")
}

fn entity_base_name(c: &Component) -> String {
    let mut name = c.simple_name();
    for suffix in DATA_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped;
            break;
        }
    }
    name.to_ascii_lowercase()
}

/// Cluster a set of component ids by entity affinity.
pub fn cluster_entity_based(graph: &DependencyGraph, ids: &[String]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut base_names: Vec<String> = Vec::new();
    let mut assigned: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut next_id = 0usize;

    for id in ids {
        let c = graph.get(id).expect("clustering operates on ids drawn from the graph");
        if is_entity_component(c) {
            clusters.push(Cluster::new(next_id, vec![id.clone()]));
            base_names.push(entity_base_name(c));
            assigned.insert(id.clone());
            next_id += 1;
        }
    }

    for id in ids {
        if assigned.contains(id) {
            continue;
        }
        let c = graph.get(id).expect("clustering operates on ids drawn from the graph");
        let lower = c.simple_name().to_ascii_lowercase();
        if let Some(idx) = base_names
            .iter()
            .position(|base| !base.is_empty() && (lower.starts_with(base.as_str()) || lower.contains(base.as_str())))
        {
            clusters[idx].members.push(id.clone());
            assigned.insert(id.clone());
        }
    }

    for id in ids {
        if assigned.contains(id) {
            continue;
        }
        if let Some(first) = clusters.first_mut() {
            first.members.push(id.clone());
        } else {
            clusters.push(Cluster::new(next_id, vec![id.clone()]));
            next_id += 1;
        }
        assigned.insert(id.clone());
    }

    for cluster in &mut clusters {
        cluster.members.sort();
        cluster.members.dedup();
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DependencyGraph;

    fn graph_with(names: &[&str]) -> DependencyGraph {
        DependencyGraph::new(names.iter().map(|n| Component::new(*n)).collect(), vec![])
    }

    #[test]
    fn builds_one_cluster_per_entity_and_attaches_affines() {
        let mut order_entity = Component::new("com.acme.Order");
        order_entity.simple_name(); // no-op, keeps name Order
        let mut g = DependencyGraph::new(
            vec![
                Component::new("com.acme.Order"),
                {
                    let mut c = Component::new("com.acme.OrderRepository");
                    c.is_interface = true;
                    c
                },
                Component::new("com.acme.OrderSummaryDto"),
            ],
            vec![],
        );
        // tag the entity-recognizable component with a table
        for c in g.components_mut() {
            if c.simple_name() == "Order" {
                c.tables_used.insert("orders".into());
            }
        }
        let ids: Vec<String> = g.components().map(|c| c.id.clone()).collect();
        let clusters = cluster_entity_based(&g, &ids);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 3);
    }

    #[test]
    fn unassigned_without_any_entity_forms_singletons() {
        let g = graph_with(&["com.acme.Foo", "com.acme.Bar"]);
        let ids: Vec<String> = g.components().map(|c| c.id.clone()).collect();
        let clusters = cluster_entity_based(&g, &ids);
        // no entities recognized: first component starts as its own
        // singleton "first cluster", second joins it.
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
    }
}
