// Copyright 2025 Cowboy AI, LLC.

//! `can_merge` guardrails: support/business separation, size bound, and
//! strong-candidate protection, plus the same-domain merge rule used by
//! the name-collision pre-pass.

use crate::config::PipelineConfig;
use crate::intercluster::ClusterEvidence;
use crate::model::{Cluster, DependencyGraph};

/// Literal thresholds for the strong-candidate protection guardrail; not
/// part of the configuration surface, unlike the evidence weights and
/// size/viability constants.
const WEAK_CALL_DENSITY: f64 = 0.15;
const WEAK_TABLE_JACCARD: f64 = 0.2;

fn support_fraction(member_ids: &[&str], graph: &DependencyGraph, config: &PipelineConfig) -> f64 {
    if member_ids.is_empty() {
        return 0.0;
    }
    let hits = member_ids
        .iter()
        .filter(|id| {
            graph
                .get(id)
                .map(|c| {
                    let lower = c.simple_name().to_ascii_lowercase();
                    config.support_infra_keywords.iter().any(|kw| lower.contains(kw.as_str()))
                })
                .unwrap_or(false)
        })
        .count();
    hits as f64 / member_ids.len() as f64
}

pub fn is_support_group(member_ids: &[&str], graph: &DependencyGraph, config: &PipelineConfig) -> bool {
    support_fraction(member_ids, graph, config) >= config.support_ratio
}

pub fn is_significant_infrastructure(member_ids: &[&str], graph: &DependencyGraph, config: &PipelineConfig) -> bool {
    support_fraction(member_ids, graph, config) >= config.significant_infrastructure_ratio
}

pub fn is_strong_candidate(cluster: &Cluster, config: &PipelineConfig) -> bool {
    cluster.metrics.cohesion >= config.strong_cohesion
        && cluster.metrics.coupling < config.strong_coupling_max
        && cluster.size() >= config.strong_min_size
}

/// Whether at least `min_strong_signals` of the four evidence signals are
/// individually "strong" under the configured per-signal bands (event
/// links count as strong when nonempty).
pub fn has_strong_evidence(evidence: &ClusterEvidence, config: &PipelineConfig) -> bool {
    if evidence.score < config.evidence_threshold {
        return false;
    }
    let strong_count = [
        evidence.table_jaccard >= config.strong_signal_thresholds.table,
        evidence.call_density >= config.strong_signal_thresholds.call,
        evidence.token_similarity >= config.strong_signal_thresholds.token,
        evidence.event_links >= 1.0,
    ]
    .into_iter()
    .filter(|b| *b)
    .count();
    strong_count >= config.min_strong_signals
}

/// The three `can_merge` guardrails for the evidence-driven merge phase,
/// evaluated over the full current membership of each root group.
pub fn can_merge(
    members_a: &[&str],
    members_b: &[&str],
    clusters_a: &[&Cluster],
    clusters_b: &[&Cluster],
    evidence: &ClusterEvidence,
    graph: &DependencyGraph,
    config: &PipelineConfig,
) -> bool {
    let support_a = is_support_group(members_a, graph, config);
    let support_b = is_support_group(members_b, graph, config);
    if support_a != support_b {
        return false;
    }

    let combined = members_a.len() + members_b.len();
    if combined > config.max_size_without_high_similarity && evidence.token_similarity < config.high_token_similarity {
        return false;
    }

    let a_has_strong = clusters_a.iter().any(|c| is_strong_candidate(c, config));
    let b_has_strong = clusters_b.iter().any(|c| is_strong_candidate(c, config));
    if a_has_strong && b_has_strong && evidence.call_density < WEAK_CALL_DENSITY && evidence.table_jaccard < WEAK_TABLE_JACCARD {
        return false;
    }

    true
}

/// The same-domain merge rule used by the name-collision pre-pass: both
/// sides must agree on support-ness and on significant-infrastructure
/// status, and the combined size must stay at or below 50.
pub fn can_merge_same_domain(members_a: &[&str], members_b: &[&str], graph: &DependencyGraph, config: &PipelineConfig) -> bool {
    if is_support_group(members_a, graph, config) != is_support_group(members_b, graph, config) {
        return false;
    }
    if is_significant_infrastructure(members_a, graph, config) != is_significant_infrastructure(members_b, graph, config) {
        return false;
    }
    members_a.len() + members_b.len() <= 50
}
