// Copyright 2025 Cowboy AI, LLC.

//! InterClusterGraph: a weighted evidence graph over cluster pairs,
//! computed from four independent signals and consumed by consolidation.
//!
//! Candidate cross-boundary links are scored from multiple independent
//! weighted signals before deciding whether a link is strong enough to
//! act on.

pub mod graph;
pub mod signals;

pub use graph::{ClusterEvidence, InterClusterGraph};
