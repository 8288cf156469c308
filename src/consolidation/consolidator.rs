// Copyright 2025 Cowboy AI, LLC.

//! ClusterConsolidator: the name-collision pre-pass followed by the
//! evidence-driven merge pass, both operating over the same union-find.

use indexmap::IndexMap;

use super::guardrails;
use super::union_find::UnionFind;
use crate::config::PipelineConfig;
use crate::intercluster::InterClusterGraph;
use crate::model::{Cluster, DependencyGraph};
use crate::naming;

/// Display names that mean "nothing distinctive was extracted" and so
/// must not trigger a name-collision merge between unrelated singletons.
const GENERIC_PLACEHOLDER_NAMES: &[&str] = &[
    "Componente Desconocido",
    "Componente de Negocio",
    "Componente de Infraestructura",
];

fn root_members(uf: &mut UnionFind, clusters: &[Cluster], root: usize) -> Vec<String> {
    let mut out = Vec::new();
    for c in clusters {
        if uf.find(c.cluster_id) == root {
            out.extend(c.members.iter().cloned());
        }
    }
    out
}

fn clusters_in_root<'a>(uf: &mut UnionFind, clusters: &'a [Cluster], root: usize) -> Vec<&'a Cluster> {
    clusters.iter().filter(|c| uf.find(c.cluster_id) == root).collect()
}

/// Record that `name` fired for the cluster at `id`. `clusters[id].cluster_id`
/// is always `id` (clusters are renumbered sequentially before consolidation
/// runs), so the member list doubles as an id-indexed slice.
fn fire(clusters: &mut [Cluster], id: usize, name: &str) {
    clusters[id].fire_rule(name);
}

/// Phase 0: group singleton clusters by their prospective name (ignoring
/// generic placeholders) and merge consecutive same-name pairs that pass
/// the same-domain rule.
fn name_collision_merge(uf: &mut UnionFind, clusters: &mut [Cluster], graph: &DependencyGraph, config: &PipelineConfig) {
    let mut by_name: IndexMap<String, Vec<usize>> = IndexMap::new();
    for c in clusters.iter() {
        if !c.is_singleton() {
            continue;
        }
        let (name, _) = naming::generate_name(&c.members, graph, config);
        if GENERIC_PLACEHOLDER_NAMES.contains(&name.as_str()) {
            continue;
        }
        by_name.entry(name).or_default().push(c.cluster_id);
    }

    for ids in by_name.into_values() {
        if ids.len() < 2 {
            continue;
        }
        let mut acc = ids[0];
        for &next in &ids[1..] {
            let acc_root = uf.find(acc);
            let next_root = uf.find(next);
            if acc_root == next_root {
                continue;
            }
            let acc_members = root_members(uf, clusters, acc_root);
            let next_members = root_members(uf, clusters, next_root);
            let acc_refs: Vec<&str> = acc_members.iter().map(String::as_str).collect();
            let next_refs: Vec<&str> = next_members.iter().map(String::as_str).collect();
            if guardrails::can_merge_same_domain(&acc_refs, &next_refs, graph, config) {
                uf.union(acc_root, next_root);
                fire(clusters, acc, "name_collision_merge:can_merge_same_domain");
                fire(clusters, next, "name_collision_merge:can_merge_same_domain");
                acc = uf.find(acc_root);
            } else {
                acc = next;
            }
        }
    }
}

/// Phase 1: evidence-driven merge over candidate edges satisfying
/// `has_strong_evidence`, in descending score order.
fn evidence_driven_merge(uf: &mut UnionFind, clusters: &mut [Cluster], icg: &InterClusterGraph, graph: &DependencyGraph, config: &PipelineConfig) {
    for edge in icg.edges() {
        if !guardrails::has_strong_evidence(edge, config) {
            continue;
        }
        let root_a = uf.find(edge.cluster_a);
        let root_b = uf.find(edge.cluster_b);
        if root_a == root_b {
            continue;
        }

        let members_a = root_members(uf, clusters, root_a);
        let members_b = root_members(uf, clusters, root_b);
        let refs_a: Vec<&str> = members_a.iter().map(String::as_str).collect();
        let refs_b: Vec<&str> = members_b.iter().map(String::as_str).collect();
        let clusters_a = clusters_in_root(uf, clusters, root_a);
        let clusters_b = clusters_in_root(uf, clusters, root_b);

        let can = guardrails::can_merge(&refs_a, &refs_b, &clusters_a, &clusters_b, edge, graph, config);
        if can {
            uf.union(root_a, root_b);
            fire(clusters, edge.cluster_a, "evidence_driven_merge:has_strong_evidence");
            fire(clusters, edge.cluster_b, "evidence_driven_merge:has_strong_evidence");
        }
    }
}

/// Consolidate `clusters` into disjoint groups of cluster ids, running
/// the name-collision pre-pass then the evidence-driven merge pass.
/// Returns non-empty groups, each sorted ascending, outer list sorted by
/// each group's minimum cluster id.
pub fn consolidate(clusters: &mut [Cluster], icg: &InterClusterGraph, graph: &DependencyGraph, config: &PipelineConfig) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(clusters.len());

    name_collision_merge(&mut uf, clusters, graph, config);
    evidence_driven_merge(&mut uf, clusters, icg, graph, config);

    let groups = uf.groups(clusters.len());
    let mut result: Vec<Vec<usize>> = groups
        .into_values()
        .filter(|ids| !ids.is_empty())
        .map(|mut ids| {
            ids.sort_unstable();
            ids
        })
        .collect();
    result.sort_by_key(|ids| ids[0]);
    result
}
