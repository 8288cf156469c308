// Copyright 2025 Cowboy AI, LLC.

//! The minimal dependency-graph data model the inference core consumes and
//! produces.

pub mod cluster;
pub mod component;
pub mod edge;
pub mod graph;
pub mod proposal;

pub use cluster::{Cluster, ClusterMetrics};
pub use component::{
    Component, EjbType, MessagingRole, MessagingType, SecretsReference, WebRole, WebType,
};
pub use edge::{Edge, EdgeType};
pub use graph::{DependencyGraph, GraphMeta};
pub use proposal::{
    ArchitectureArtifact, PackageDependencySummary, Proposal, ProposalMetrics, ProposalSignals,
    ProjectMetadata, SupportLibrary, Viability,
};
