// Copyright 2025 Cowboy AI, LLC.

//! The consolidated output units: business `Proposal`s, `SupportLibrary`
//! groups, and the `ProjectMetadata`/Architecture-artifact shapes `recom-
//! mendation` assembles from them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Viability tier, threshold-banded on the final viability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viability {
    Alta,
    Media,
    Baja,
}

/// Consolidated metrics reported alongside a `Proposal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalMetrics {
    /// Member count after filtering out infrastructure components.
    pub size: usize,
    pub cohesion_avg: f64,
    pub external_coupling: f64,
    pub internal_edge_density: f64,
    /// Fixed 0.8/0.0 proxy, not a true Jaccard index over the table-overlap
    /// sets.
    pub data_jaccard: f64,
    pub tables: Vec<String>,
    pub sensitive: bool,
}

/// Cluster-count/size signals reported alongside a `Proposal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalSignals {
    pub cluster_count: usize,
    pub total_components: usize,
    pub avg_cluster_size: f64,
    /// Supplemental: `size <= nano_max_size`. Not
    /// part of any score; reporting only.
    pub is_nano: bool,
}

/// A candidate microservice: a named, scored, consolidated group of
/// clusters classified as business (not support) by `RecommendationEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub name: String,
    pub viability: Viability,
    pub score: f64,
    pub clusters: Vec<usize>,
    /// Member ids, infrastructure components filtered out, sorted.
    pub components: Vec<String>,
    pub metrics: ProposalMetrics,
    pub signals: ProposalSignals,
    pub rationale: Vec<String>,
    pub recommended_actions: Vec<String>,
}

/// A consolidated group classified as infrastructure/support rather than a
/// business-service candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportLibrary {
    pub id: String,
    pub name: String,
    pub clusters: Vec<usize>,
    pub members: Vec<String>,
}

/// Per-package rollup used in `ProjectMetadata::package_dependencies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDependencySummary {
    pub components_count: usize,
    pub total_dependencies_out: usize,
    pub depends_on_packages: Vec<String>,
}

/// Project-wide metadata attached to the Architecture artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Coordinate -> full version string.
    pub external_dependencies: IndexMap<String, String>,
    pub package_dependencies: IndexMap<String, PackageDependencySummary>,
    pub total_components: usize,
    pub total_loc: u64,
    pub components_with_secrets: usize,
    /// The dotted prefix of length 2-4 covering the most components.
    pub shared_domain: String,
}

/// The Architecture artifact: the complete orchestration
/// output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureArtifact {
    pub project_metadata: ProjectMetadata,
    pub proposals: Vec<Proposal>,
    pub support_libraries: Vec<SupportLibrary>,
    pub summary: String,
}
