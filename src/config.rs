// Copyright 2025 Cowboy AI, LLC.

//! The pipeline's configuration surface: every tunable constant the
//! inference passes use, collected as fields of one struct with a
//! `Default` matching this crate's recommended defaults.
//!
//! `PipelineConfig::validate` is the crate's one fallible entry point:
//! everything downstream assumes a validated config and never returns a
//! `Result`.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-signal "strong" bands used by the consolidation guardrails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongSignalThresholds {
    pub table: f64,
    pub call: f64,
    pub token: f64,
}

impl Default for StrongSignalThresholds {
    fn default() -> Self {
        Self {
            table: 0.4,
            call: 0.35,
            token: 0.6,
        }
    }
}

/// Every configuration constant the pipeline reads, as fields of one
/// struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    // InterCluster evidence weights; must sum to 1.0.
    pub table_weight: f64,
    pub call_weight: f64,
    pub token_weight: f64,
    pub event_weight: f64,

    // Consolidation
    pub evidence_threshold: f64,
    pub min_strong_signals: usize,
    pub strong_signal_thresholds: StrongSignalThresholds,
    pub max_size_without_high_similarity: usize,
    pub high_token_similarity: f64,
    /// The strict 0.8 support-majority bar used for final support
    /// classification and the "Support/business separation"
    /// guardrail. A second, looser 0.3 "significant infrastructure"
    /// bar is used only by the same-domain merge rule and is not
    /// independently configurable.
    pub support_ratio: f64,

    // Viability
    pub cohesion_weight: f64,
    pub coupling_weight: f64,
    pub data_weight: f64,
    pub high_viability: f64,
    pub medium_viability: f64,
    /// Direct multiplier applied to the viability score when `n < 3`.
    pub small_size_penalty: f64,
    /// Direct multiplier applied when `n > 50` and density is below
    /// `large_size_density_threshold`.
    pub large_size_penalty: f64,
    /// Density threshold below which the large-size penalty applies.
    pub large_size_density_threshold: f64,

    // Strong-candidate definition
    pub strong_cohesion: f64,
    pub strong_coupling_max: f64,
    pub strong_min_size: usize,

    // Reporting
    pub nano_max_size: usize,

    // Name-token filter
    pub exclude_tokens: BTreeSet<String>,

    // Infra keyword sets: two distinct lists, one for guardrails/support
    // classification and one (with display names) for name generation.
    pub support_infra_keywords: BTreeSet<String>,
    pub naming_infra_keywords: IndexMap<String, String>,
    /// The "significant infrastructure" bar for the same-domain merge rule
    ///; distinct from `support_ratio`.
    pub significant_infrastructure_ratio: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            table_weight: 0.25,
            call_weight: 0.35,
            token_weight: 0.30,
            event_weight: 0.10,

            evidence_threshold: 0.65,
            min_strong_signals: 2,
            strong_signal_thresholds: StrongSignalThresholds::default(),
            max_size_without_high_similarity: 40,
            high_token_similarity: 0.75,
            support_ratio: 0.8,

            cohesion_weight: 0.5,
            coupling_weight: 0.35,
            data_weight: 0.15,
            high_viability: 0.7,
            medium_viability: 0.5,
            small_size_penalty: 0.6,
            large_size_penalty: 0.7,
            large_size_density_threshold: 0.5,

            strong_cohesion: 0.7,
            strong_coupling_max: 0.3,
            strong_min_size: 3,

            nano_max_size: 2,

            exclude_tokens: default_exclude_tokens(),

            support_infra_keywords: default_support_infra_keywords(),
            naming_infra_keywords: default_naming_infra_keywords(),
            significant_infrastructure_ratio: 0.3,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration: the only fallible check in the
    /// crate. Called once at pipeline entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.table_weight + self.call_weight + self.token_weight + self.event_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne {
                actual: sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }

        for (name, value) in [
            ("evidence_threshold", self.evidence_threshold),
            ("high_token_similarity", self.high_token_similarity),
            ("support_ratio", self.support_ratio),
            ("cohesion_weight", self.cohesion_weight),
            ("coupling_weight", self.coupling_weight),
            ("data_weight", self.data_weight),
            ("high_viability", self.high_viability),
            ("medium_viability", self.medium_viability),
            ("strong_cohesion", self.strong_cohesion),
            ("strong_coupling_max", self.strong_coupling_max),
            ("significant_infrastructure_ratio", self.significant_infrastructure_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        Ok(())
    }
}

fn default_exclude_tokens() -> BTreeSet<String> {
    [
        "entity",
        "model",
        "data",
        "dto",
        "event",
        "command",
        "query",
        "impl",
        "repository",
        "service",
        "controller",
        "api",
        "rest",
        "http",
        "adapter",
        "port",
        "localevents",
        "rabbit",
        "jpa",
        "repo",
        "dao",
        "operations",
        "listener",
        "publisher",
        "handler",
        "factory",
        "db",
        "usecase",
        "primaryports",
        "secondaryports",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_support_infra_keywords() -> BTreeSet<String> {
    [
        "application",
        "config",
        "configuration",
        "security",
        "auth",
        "swagger",
        "main",
        "exception",
        "error",
        "filter",
        "interceptor",
        "aspect",
        "openapi",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_naming_infra_keywords() -> IndexMap<String, String> {
    [
        ("config", "Configuración"),
        ("security", "Seguridad"),
        ("auth", "Autenticación"),
        ("swagger", "Documentación"),
        ("email", "Notificaciones por Email"),
        ("notification", "Notificaciones"),
        ("log", "Logging"),
        ("audit", "Auditoría"),
        ("application", "Aplicación Principal"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
