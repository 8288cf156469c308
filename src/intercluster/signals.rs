// Copyright 2025 Cowboy AI, LLC.

//! The four evidence signals InterClusterGraph computes for a pair of
//! clusters: table Jaccard, call density, domain-token Jaccard, and event
//! links.

use std::collections::BTreeSet;

use crate::config::PipelineConfig;
use crate::model::{Cluster, DependencyGraph, EdgeType};

/// Role keywords recognized for domain-token extraction, ordered so a
/// longer keyword is tried before a shorter one it contains (`repository`
/// before `repo`).
const ROLE_KEYWORDS: &[&str] = &[
    "repository",
    "controller",
    "operations",
    "operation",
    "publisher",
    "listener",
    "usecase",
    "service",
    "adapter",
    "factory",
    "handler",
    "repo",
    "db",
];

fn name_prefix_token(lower_name: &str) -> Option<String> {
    let keyword = ROLE_KEYWORDS.iter().find(|kw| lower_name.contains(**kw))?;
    let idx = lower_name.find(keyword)?;
    let mut prefix = lower_name[..idx].to_string();
    if let Some(stripped) = prefix.strip_suffix("impl") {
        prefix = stripped.to_string();
    }
    Some(prefix)
}

fn last_package_segment(c: &crate::model::Component) -> Option<String> {
    c.package_path()
        .split('.')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Domain tokens for a cluster: a name-derived token per member with a
/// recognized role keyword, plus each member's immediate package segment
/// when long enough, both filtered against the exclusion dictionary.
fn extract_domain_tokens(cluster: &Cluster, graph: &DependencyGraph, config: &PipelineConfig) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for id in &cluster.members {
        let Some(c) = graph.get(id) else { continue };
        let lower = c.simple_name().to_ascii_lowercase();

        if let Some(tok) = name_prefix_token(&lower) {
            if !tok.is_empty() && !config.exclude_tokens.contains(&tok) {
                tokens.insert(tok);
            }
        }

        if let Some(seg) = last_package_segment(c) {
            if seg.len() > 2 && !config.exclude_tokens.contains(&seg) {
                tokens.insert(seg);
            }
        }
    }
    tokens
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    if union == 0.0 {
        0.0
    } else {
        intersection / union
    }
}

/// Table Jaccard: overlap of each cluster's shared-table set.
pub fn table_jaccard(a: &Cluster, b: &Cluster) -> f64 {
    jaccard(&a.metrics.tables_shared, &b.metrics.tables_shared)
}

fn member_set(cluster: &Cluster) -> BTreeSet<&str> {
    cluster.members.iter().map(String::as_str).collect()
}

fn count_edges_between(graph: &DependencyGraph, from_set: &BTreeSet<&str>, to_set: &BTreeSet<&str>) -> u64 {
    graph
        .edges
        .iter()
        .filter(|e| {
            e.has_type(EdgeType::Call)
                && from_set.contains(e.from.as_str())
                && to_set.contains(e.to.as_str())
        })
        .count() as u64
}

/// Call density: cross-cluster call-edge occurrences relative to each
/// cluster's own internal call-edge occurrences (counted as raw edges,
/// not summed weights).
pub fn call_density(a: &Cluster, b: &Cluster, graph: &DependencyGraph) -> f64 {
    let set_a = member_set(a);
    let set_b = member_set(b);

    let cross = count_edges_between(graph, &set_a, &set_b) + count_edges_between(graph, &set_b, &set_a);
    let internal = count_edges_between(graph, &set_a, &set_a) + count_edges_between(graph, &set_b, &set_b);

    if cross == 0 || internal == 0 {
        return 0.0;
    }
    (cross as f64 / (0.5 * internal as f64)).min(1.0)
}

/// Token similarity: Jaccard over domain tokens extracted from each
/// cluster's members.
pub fn token_similarity(a: &Cluster, b: &Cluster, graph: &DependencyGraph, config: &PipelineConfig) -> f64 {
    let tokens_a = extract_domain_tokens(a, graph, config);
    let tokens_b = extract_domain_tokens(b, graph, config);
    jaccard(&tokens_a, &tokens_b)
}

fn published_tokens(cluster: &Cluster, graph: &DependencyGraph) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for id in &cluster.members {
        let Some(c) = graph.get(id) else { continue };
        let lower = c.simple_name().to_ascii_lowercase();
        let idx = lower.find("publisher").or_else(|| lower.find("event"));
        if let Some(idx) = idx {
            let prefix = lower[..idx].to_string();
            if !prefix.is_empty() {
                tokens.insert(prefix);
            }
        }
    }
    tokens
}

fn consumed_tokens(cluster: &Cluster, graph: &DependencyGraph) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for id in &cluster.members {
        let Some(c) = graph.get(id) else { continue };
        let lower = c.simple_name().to_ascii_lowercase();
        let idx = lower.find("listener").or_else(|| lower.find("consumer"));
        if let Some(idx) = idx {
            let prefix = lower[..idx].to_string();
            if !prefix.is_empty() {
                tokens.insert(prefix);
            }
        }
    }
    tokens
}

/// Event links: binary indicator (score) plus the full set of matched
/// event-name tokens, checked symmetrically in both directions.
pub fn event_links(a: &Cluster, b: &Cluster, graph: &DependencyGraph) -> (f64, Vec<String>) {
    let pub_a = published_tokens(a, graph);
    let pub_b = published_tokens(b, graph);
    let con_a = consumed_tokens(a, graph);
    let con_b = consumed_tokens(b, graph);

    let mut shared: BTreeSet<String> = pub_a.intersection(&con_b).cloned().collect();
    shared.extend(pub_b.intersection(&con_a).cloned());

    let score = if shared.is_empty() { 0.0 } else { 1.0 };
    (score, shared.into_iter().collect())
}
