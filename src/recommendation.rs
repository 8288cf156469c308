// Copyright 2025 Cowboy AI, LLC.

//! RecommendationEngine: orchestrates consolidation output into business
//! `Proposal`s and `SupportLibrary` groups, attaches project-wide
//! metadata, and assembles the Architecture artifact.
//!
//! Assembles one typed artifact from several upstream phases' outputs
//! rather than owning any computation of its own.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::PipelineConfig;
use crate::model::{
    ArchitectureArtifact, Cluster, Component, DependencyGraph, PackageDependencySummary, Proposal,
    ProposalMetrics, ProposalSignals, ProjectMetadata, SupportLibrary, Viability,
};
use crate::naming;
use crate::viability;

const FILTERED_INFRA_LIBRARY_NAME: &str = "Infraestructura y Configuraci\u{f3}n Filtrada";

fn is_infra_member(component: &Component, config: &PipelineConfig) -> bool {
    let lower = component.simple_name().to_ascii_lowercase();
    config.naming_infra_keywords.keys().any(|kw| lower.contains(kw.as_str()))
}

fn clusters_for_group<'a>(group: &[usize], clusters: &'a [Cluster]) -> Vec<&'a Cluster> {
    clusters.iter().filter(|c| group.contains(&c.cluster_id)).collect()
}

fn all_member_ids(group_clusters: &[&Cluster]) -> Vec<String> {
    let mut ids: Vec<String> = group_clusters.iter().flat_map(|c| c.members.iter().cloned()).collect();
    ids.sort();
    ids.dedup();
    ids
}

fn count_group_edges(graph: &DependencyGraph, members: &[String], internal: bool) -> u64 {
    let set: std::collections::HashSet<&str> = members.iter().map(String::as_str).collect();
    graph
        .edges
        .iter()
        .filter(|e| {
            let from_in = set.contains(e.from.as_str());
            let to_in = set.contains(e.to.as_str());
            if internal {
                from_in && to_in
            } else {
                from_in != to_in
            }
        })
        .count() as u64
}

fn recommended_actions(tier: Viability, sensitive: bool) -> Vec<String> {
    let mut actions = match tier {
        Viability::Alta => vec!["Extraer como microservicio independiente".to_string()],
        Viability::Media => vec![
            "Revisar cuidadosamente antes de extraer".to_string(),
            "Reducir el acoplamiento externo antes de separar".to_string(),
        ],
        Viability::Baja => vec![
            "Mantener este grupo en el monolito".to_string(),
            "Reagrupar con clusters relacionados".to_string(),
        ],
    };
    if sensitive && tier == Viability::Alta {
        actions.push("Aplicar controles de auditor\u{ed}a y cifrado antes de extraer".to_string());
    }
    actions
}

/// Build a `Proposal` for a business group.
fn build_proposal(
    group_id: &str,
    group: &[usize],
    clusters: &[Cluster],
    graph: &DependencyGraph,
    config: &PipelineConfig,
) -> Proposal {
    let group_clusters = clusters_for_group(group, clusters);
    let all_members = all_member_ids(&group_clusters);

    let (name, _) = naming::generate_name(&all_members, graph, config);

    let mut components: Vec<String> = all_members
        .iter()
        .filter(|id| graph.get(id).map(|c| !is_infra_member(c, config)).unwrap_or(true))
        .cloned()
        .collect();
    components.sort();

    let total_size: usize = group_clusters.iter().map(|c| c.size()).sum();
    let cohesion_avg = if total_size == 0 {
        0.0
    } else {
        group_clusters.iter().map(|c| c.metrics.cohesion * c.size() as f64).sum::<f64>() / total_size as f64
    };

    let n = all_members.len() as f64;
    let internal_edges = count_group_edges(graph, &all_members, true);
    let external_edges = count_group_edges(graph, &all_members, false);
    let external_coupling = if internal_edges + external_edges == 0 {
        0.0
    } else {
        external_edges as f64 / (internal_edges + external_edges) as f64
    };
    let internal_edge_density = if n * (n - 1.0) > 0.0 {
        internal_edges as f64 / (n * (n - 1.0))
    } else {
        0.0
    };

    let mut tables: Vec<String> = group_clusters
        .iter()
        .flat_map(|c| c.metrics.tables_shared.iter().cloned())
        .collect();
    tables.sort();
    tables.dedup();

    let sensitive = group_clusters.iter().any(|c| c.metrics.sensitive);

    // Fixed proxy value, not a true Jaccard index over the table sets.
    let data_jaccard = if tables.is_empty() { 0.0 } else { 0.8 };

    let mut viability_result = viability::score_group(&group_clusters, graph, config);

    let is_nano = total_size <= config.nano_max_size;
    if is_nano {
        viability_result.rationale.push(
            "Grupo muy peque\u{f1}o (nano-servicio): reconsiderar si justifica el costo operativo de un servicio separado"
                .to_string(),
        );
    }

    let cluster_ids: Vec<usize> = group.to_vec();
    let avg_cluster_size = if group_clusters.is_empty() {
        0.0
    } else {
        total_size as f64 / group_clusters.len() as f64
    };

    Proposal {
        id: group_id.to_string(),
        name,
        viability: viability_result.viability,
        score: viability_result.score,
        clusters: cluster_ids,
        components,
        metrics: ProposalMetrics {
            size: total_size,
            cohesion_avg,
            external_coupling,
            internal_edge_density,
            data_jaccard,
            tables,
            sensitive,
        },
        signals: ProposalSignals {
            cluster_count: group_clusters.len(),
            total_components: total_size,
            avg_cluster_size,
            is_nano,
        },
        rationale: viability_result.rationale,
        recommended_actions: recommended_actions(viability_result.viability, sensitive),
    }
}

fn build_support_library(group_id: &str, group: &[usize], clusters: &[Cluster], graph: &DependencyGraph, config: &PipelineConfig) -> SupportLibrary {
    let group_clusters = clusters_for_group(group, clusters);
    let all_members = all_member_ids(&group_clusters);
    let (name, _) = naming::generate_name(&all_members, graph, config);

    SupportLibrary {
        id: group_id.to_string(),
        name,
        clusters: group.to_vec(),
        members: all_members,
    }
}

fn package_of(id: &str) -> Option<&str> {
    id.rsplit_once('.').map(|(pkg, _)| pkg)
}

fn build_package_dependencies(graph: &DependencyGraph) -> IndexMap<String, PackageDependencySummary> {
    let mut summaries: HashMap<String, PackageDependencySummary> = HashMap::new();

    for component in graph.components() {
        let Some(pkg) = package_of(&component.id) else { continue };
        let entry = summaries.entry(pkg.to_string()).or_default();
        entry.components_count += 1;
        entry.total_dependencies_out += component.calls_out.len();

        let mut depends_on: Vec<String> = component
            .calls_out
            .iter()
            .filter_map(|callee| package_of(callee))
            .filter(|callee_pkg| *callee_pkg != pkg)
            .map(str::to_string)
            .collect();
        entry.depends_on_packages.append(&mut depends_on);
    }

    let mut out = IndexMap::new();
    let mut keys: Vec<String> = summaries.keys().cloned().collect();
    keys.sort();
    for key in keys {
        let mut summary = summaries.remove(&key).unwrap();
        summary.depends_on_packages.sort();
        summary.depends_on_packages.dedup();
        out.insert(key, summary);
    }
    out
}

fn compute_shared_domain(graph: &DependencyGraph) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for component in graph.components() {
        let segments: Vec<&str> = component.id.split('.').collect();
        for len in 2..=4usize {
            if segments.len() > len {
                let prefix = segments[..len].join(".");
                *counts.entry(prefix).or_insert(0) += 1;
            }
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(prefix, _)| prefix)
        .unwrap_or_default()
}

fn build_project_metadata(graph: &DependencyGraph, external_versions: &IndexMap<String, String>) -> ProjectMetadata {
    let mut external_dependencies: IndexMap<String, String> = external_versions.clone();
    for component in graph.components() {
        for coord in &component.external_dependencies {
            external_dependencies.entry(coord.clone()).or_insert_with(|| coord.clone());
        }
    }
    external_dependencies.sort_keys();

    ProjectMetadata {
        external_dependencies,
        package_dependencies: build_package_dependencies(graph),
        total_components: graph.len(),
        total_loc: graph.total_loc(),
        components_with_secrets: graph
            .components()
            .filter(|c| !matches!(c.secrets_references, crate::model::SecretsReference::None))
            .count(),
        shared_domain: compute_shared_domain(graph),
    }
}

/// Orchestrate consolidation output into the full Architecture artifact:
/// classify each group as business or support, build the corresponding
/// `Proposal`/`SupportLibrary`, collect infrastructure members filtered
/// out of business proposals into a synthetic support library, and
/// attach project-wide metadata.
pub fn build_architecture(
    groups: &[Vec<usize>],
    clusters: &[Cluster],
    graph: &DependencyGraph,
    config: &PipelineConfig,
    external_versions: &IndexMap<String, String>,
) -> ArchitectureArtifact {
    let mut proposals = Vec::new();
    let mut support_libraries = Vec::new();
    let mut filtered_infra_members: Vec<String> = Vec::new();

    for (idx, group) in groups.iter().enumerate() {
        if group.is_empty() {
            continue;
        }
        let group_clusters = clusters_for_group(group, clusters);
        let all_members = all_member_ids(&group_clusters);
        let (_, is_infrastructure) = naming::generate_name(&all_members, graph, config);

        if is_infrastructure {
            let id = format!("support-{idx:04}");
            support_libraries.push(build_support_library(&id, group, clusters, graph, config));
        } else {
            let id = format!("service-{idx:04}");
            let proposal = build_proposal(&id, group, clusters, graph, config);

            let included: std::collections::HashSet<&str> = proposal.components.iter().map(String::as_str).collect();
            for member in &all_members {
                if !included.contains(member.as_str()) {
                    filtered_infra_members.push(member.clone());
                }
            }

            proposals.push(proposal);
        }
    }

    if !filtered_infra_members.is_empty() {
        filtered_infra_members.sort();
        filtered_infra_members.dedup();
        support_libraries.push(SupportLibrary {
            id: "support-filtered".to_string(),
            name: FILTERED_INFRA_LIBRARY_NAME.to_string(),
            clusters: Vec::new(),
            members: filtered_infra_members,
        });
    }

    proposals.sort_by(|a, b| a.id.cmp(&b.id));
    support_libraries.sort_by(|a, b| a.id.cmp(&b.id));

    let project_metadata = build_project_metadata(graph, external_versions);

    let summary = format!(
        "{} servicios candidatos, {} librer\u{ed}as de soporte, {} componentes totales",
        proposals.len(),
        support_libraries.len(),
        project_metadata.total_components,
    );

    ArchitectureArtifact {
        project_metadata,
        proposals,
        support_libraries,
        summary,
    }
}
