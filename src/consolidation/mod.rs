// Copyright 2025 Cowboy AI, LLC.

//! ClusterConsolidator: merges clusters into disjoint groups via a
//! name-collision pre-pass followed by an evidence-driven merge pass,
//! both built on a shared union-find.

pub mod consolidator;
pub mod guardrails;
pub mod union_find;

pub use consolidator::consolidate;
pub use union_find::UnionFind;
