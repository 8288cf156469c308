// Copyright 2025 Cowboy AI, LLC.

//! Initial partition units and their per-cluster metrics.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-cluster aggregate metrics computed by `ClusterMetricsCalculator`.
/// All fields default to zero when the underlying ratio is undefined
/// (zero denominator), rather than propagating a `NaN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
    /// Fraction of the cluster's outgoing call weight that stays inside
    /// the cluster; `0.0` for singletons or zero-denominator clusters.
    pub cohesion: f64,
    /// Fraction of the cluster's outgoing call weight that leaves the
    /// cluster; `0.0` when undefined.
    pub coupling: f64,
    /// Tables used by two or more members.
    pub tables_shared: BTreeSet<String>,
    /// Whether any member is flagged `sensitive_data`.
    pub sensitive: bool,
    /// Sum of member `loc`.
    pub loc: u64,
}

/// An initial partition unit produced by `ClusteringAlgorithm` and mutated
/// only by later phases of the same pass (`ClusterMetricsCalculator`
/// annotates `metrics`; consolidation-adjacent rules append to
/// `rules_fired`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: usize,
    /// Sorted, deduplicated member component ids.
    pub members: Vec<String>,
    pub metrics: ClusterMetrics,
    /// Names of disambiguation/guardrail rules that fired while building or
    /// scoring this cluster, kept for rationale synthesis.
    pub rules_fired: BTreeSet<String>,
    pub final_score: f64,
}

impl Cluster {
    pub fn new(cluster_id: usize, mut members: Vec<String>) -> Self {
        members.sort();
        members.dedup();
        Self {
            cluster_id,
            members,
            metrics: ClusterMetrics::default(),
            rules_fired: BTreeSet::new(),
            final_score: 0.0,
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn fire_rule(&mut self, name: impl Into<String>) {
        self.rules_fired.insert(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sorts_and_dedups_members() {
        let c = Cluster::new(0, vec!["B".into(), "A".into(), "A".into()]);
        assert_eq!(c.members, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn singleton_detection() {
        assert!(Cluster::new(0, vec!["A".into()]).is_singleton());
        assert!(!Cluster::new(0, vec!["A".into(), "B".into()]).is_singleton());
    }
}
