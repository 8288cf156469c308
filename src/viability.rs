// Copyright 2025 Cowboy AI, LLC.

//! ViabilityScorer: scores a consolidated group of clusters on cohesion,
//! coupling, and data locality, producing a tier, a numeric score, and a
//! human-readable rationale.
//!
//! The score blends several independently meaningful sub-scores (weighted
//! sum, each clamped and explained); the rationale is assembled as
//! templated text bullets.

use std::collections::{BTreeSet, HashSet};

use crate::config::PipelineConfig;
use crate::model::{Cluster, DependencyGraph, Viability};

pub struct ViabilityResult {
    pub viability: Viability,
    pub score: f64,
    pub rationale: Vec<String>,
}

fn severity_marker(good: bool, warn: bool) -> &'static str {
    if good {
        "\u{2705}"
    } else if warn {
        "\u{26A0}\u{FE0F}"
    } else {
        "\u{274C}"
    }
}

fn member_set(clusters: &[&Cluster]) -> HashSet<&str> {
    clusters.iter().flat_map(|c| c.members.iter().map(String::as_str)).collect()
}

fn count_edges(graph: &DependencyGraph, members: &HashSet<&str>, internal: bool) -> u64 {
    graph
        .edges
        .iter()
        .filter(|e| {
            let from_in = members.contains(e.from.as_str());
            let to_in = members.contains(e.to.as_str());
            if internal {
                from_in && to_in
            } else {
                from_in != to_in
            }
        })
        .count() as u64
}

/// Score a consolidated group, given the full set of clusters it
/// contains. Returns the `Baja`/`0.0` fallback with the fixed rationale
/// literal when `clusters` is empty.
pub fn score_group(clusters: &[&Cluster], graph: &DependencyGraph, config: &PipelineConfig) -> ViabilityResult {
    if clusters.is_empty() {
        return ViabilityResult {
            viability: Viability::Baja,
            score: 0.0,
            rationale: vec!["No se encontraron clusters v\u{e1}lidos".to_string()],
        };
    }

    let members = member_set(clusters);
    let n = members.len() as f64;

    let total_size: usize = clusters.iter().map(|c| c.size()).sum();
    let weighted_cohesion = if total_size == 0 {
        0.0
    } else {
        clusters.iter().map(|c| c.metrics.cohesion * c.size() as f64).sum::<f64>() / total_size as f64
    };

    let internal_edges = count_edges(graph, &members, true);
    let external_edges = count_edges(graph, &members, false);

    let internal_edge_density = if n * (n - 1.0) > 0.0 {
        internal_edges as f64 / (n * (n - 1.0))
    } else {
        0.0
    };

    let cohesion_adj = 0.7 * weighted_cohesion + 0.3 * internal_edge_density;

    let external_coupling = if internal_edges + external_edges == 0 {
        0.0
    } else {
        external_edges as f64 / (internal_edges + external_edges) as f64
    };

    let all_tables: BTreeSet<&str> = clusters.iter().flat_map(|c| c.metrics.tables_shared.iter().map(String::as_str)).collect();
    let data_cohesion = if all_tables.is_empty() {
        0.5
    } else {
        let shared_by_two_plus = all_tables
            .iter()
            .filter(|t| clusters.iter().filter(|c| c.metrics.tables_shared.contains(**t)).count() >= 2)
            .count();
        shared_by_two_plus as f64 / all_tables.len() as f64
    };

    let mut score = 0.5 * cohesion_adj + 0.35 * (1.0 - external_coupling) + 0.15 * data_cohesion;

    let mut size_notes = Vec::new();
    if (n as usize) < 3 {
        score *= config.small_size_penalty;
        size_notes.push(format!("tama\u{f1}o peque\u{f1}o ({n} miembros): penalizaci\u{f3}n aplicada"));
    }
    if n > 50.0 && internal_edge_density < config.large_size_density_threshold {
        score *= config.large_size_penalty;
        size_notes.push(format!("tama\u{f1}o grande con baja densidad interna: penalizaci\u{f3}n aplicada"));
    }

    let viability = if score >= config.high_viability {
        Viability::Alta
    } else if score >= config.medium_viability {
        Viability::Media
    } else {
        Viability::Baja
    };

    let avg_cbo = clusters.iter().flat_map(|c| &c.members).filter_map(|id| graph.get(id)).map(|c| c.cbo as f64).sum::<f64>() / n.max(1.0);
    let avg_lcom = clusters.iter().flat_map(|c| &c.members).filter_map(|id| graph.get(id)).map(|c| c.lcom).sum::<f64>() / n.max(1.0);

    let sensitive = clusters.iter().any(|c| c.metrics.sensitive);

    let mut rationale = Vec::new();
    rationale.push(format!("M\u{e9}tricas de calidad: CBO promedio {avg_cbo:.2}, LCOM promedio {avg_lcom:.2}"));
    rationale.push(format!(
        "{} Cohesi\u{f3}n ajustada: {cohesion_adj:.2}",
        severity_marker(cohesion_adj >= 0.7, cohesion_adj >= 0.5)
    ));
    rationale.push(format!(
        "{} Acoplamiento externo: {external_coupling:.2}",
        severity_marker(external_coupling <= 0.3, external_coupling <= 0.6)
    ));
    rationale.push(format!("{} CBO promedio: {avg_cbo:.2}", severity_marker(avg_cbo <= 5.0, avg_cbo <= 10.0)));
    rationale.push(format!("{} LCOM promedio: {avg_lcom:.2}", severity_marker(avg_lcom <= 0.3, avg_lcom <= 0.6)));
    rationale.push(format!(
        "{} Cohesi\u{f3}n de datos: {data_cohesion:.2}",
        severity_marker(data_cohesion >= 0.7, data_cohesion >= 0.5)
    ));
    rationale.push(format!("Tama\u{f1}o del grupo: {n} miembros"));
    rationale.extend(size_notes);

    if sensitive && viability == Viability::Alta {
        rationale.push(
            "Contiene datos sensibles: aplicar controles de auditor\u{ed}a y cifrado antes de extraer este servicio"
                .to_string(),
        );
    }

    if viability == Viability::Baja {
        rationale.push("Raz\u{f3}n de viabilidad baja:".to_string());
        if cohesion_adj < 0.5 {
            rationale.push("- cohesi\u{f3}n ajustada insuficiente".to_string());
        }
        if external_coupling > 0.6 {
            rationale.push("- acoplamiento externo excesivo".to_string());
        }
        if data_cohesion < 0.5 {
            rationale.push("- baja cohesi\u{f3}n de datos".to_string());
        }
        rationale.push("Recomendaci\u{f3}n: mantener este grupo en el monolito o reagrupar".to_string());
    }

    ViabilityResult { viability, score, rationale }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    #[test]
    fn empty_group_yields_fixed_fallback() {
        let graph = DependencyGraph::new(vec![], vec![]);
        let config = PipelineConfig::default();
        let result = score_group(&[], &graph, &config);
        assert_eq!(result.viability, Viability::Baja);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.rationale, vec!["No se encontraron clusters v\u{e1}lidos".to_string()]);
    }

    #[test]
    fn small_group_penalty_scenario() {
        // Two members, cohesionAdj = 1.0 (forced via full weighted
        // cohesion and full internal density), coupling = 0, dataCohesion
        // = 0.5 (no tables): base score = 0.5 + 0.35 + 0.075 = 0.925,
        // penalized x0.6 -> 0.555 -> Media.
        let a = Component::new("A");
        let b = Component::new("B");
        let edges = vec![
            crate::model::Edge::new("A", "B", 1, vec![crate::model::EdgeType::Call]),
            crate::model::Edge::new("B", "A", 1, vec![crate::model::EdgeType::Call]),
        ];
        let graph = DependencyGraph::new(vec![a, b], edges);

        let mut cluster = Cluster::new(0, vec!["A".to_string(), "B".to_string()]);
        cluster.metrics.cohesion = 1.0;
        let config = PipelineConfig::default();
        let result = score_group(&[&cluster], &graph, &config);
        assert!((result.score - 0.555).abs() < 1e-6, "got {}", result.score);
        assert_eq!(result.viability, Viability::Media);
    }

    #[test]
    fn sensitive_alta_group_gets_audit_rationale() {
        let a = Component::new("A");
        let graph = DependencyGraph::new(vec![a], vec![]);
        let mut cluster = Cluster::new(0, vec!["A".to_string()]);
        cluster.metrics.cohesion = 1.0;
        cluster.metrics.sensitive = true;
        let config = PipelineConfig {
            small_size_penalty: 1.0,
            ..PipelineConfig::default()
        };
        let result = score_group(&[&cluster], &graph, &config);
        if result.viability == Viability::Alta {
            assert!(result.rationale.iter().any(|line| line.contains("auditor")));
        }
    }
}
