// Copyright 2025 Cowboy AI, LLC.

//! `svcmap-core` — the inference core that decomposes a typed class
//! dependency graph into candidate microservice groups with viability
//! scores and human-readable names.
//!
//! This crate is a total, deterministic, single-threaded-per-phase
//! pipeline over an immutable [`model::DependencyGraph`] supplied by an
//! external ingester. It does not parse source, resolve build files, run
//! bug-pattern scanners, or perform any I/O; those are producers at the
//! edge of this crate's contract.
//!
//! The curated entry point is [`pipeline::run`]; the module tree below it
//! mirrors the phase order it chains: [`layer_classifier`] ->
//! [`clustering`] -> [`cluster_metrics`] -> [`intercluster`] ->
//! [`consolidation`] -> [`naming`] / [`viability`] -> [`recommendation`].

pub mod cluster_metrics;
pub mod clustering;
pub mod config;
pub mod consolidation;
pub mod errors;
pub mod intercluster;
pub mod layer_classifier;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod recommendation;
pub mod viability;

pub use config::PipelineConfig;
pub use errors::ConfigError;
pub use pipeline::{run, PipelineOutput};
