// Copyright 2025 Cowboy AI, LLC.

//! The crate's single public entry point: chains LayerClassify -> Cluster
//! -> MetricsCalculate -> InterClusterBuild -> Consolidate -> Name ->
//! Score -> Orchestrate in a fixed phase order, mirroring a curated
//! re-export surface over a much larger module tree.

use indexmap::IndexMap;

use crate::cluster_metrics;
use crate::clustering;
use crate::config::PipelineConfig;
use crate::consolidation;
use crate::errors::ConfigError;
use crate::intercluster::InterClusterGraph;
use crate::layer_classifier::LayerClassifier;
use crate::model::{ArchitectureArtifact, Cluster, DependencyGraph};
use crate::recommendation;

/// Everything the pipeline produces for one `DependencyGraph` run: the
/// graph with `layer`/`domain` filled in, the initial clusters (kept for
/// callers that want the Graph artifact's lower-level view), and the
/// Architecture artifact.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: DependencyGraph,
    pub clusters: Vec<Cluster>,
    pub architecture: ArchitectureArtifact,
}

/// Run the full inference core over `graph`. The only fallible step is
/// `config.validate()`, called once at entry per §7; everything after it
/// is total.
///
/// `external_versions` is the build-file resolver's external-coordinate
/// map (coord -> full version string), merged into the Architecture
/// artifact's `project_metadata.external_dependencies` alongside every
/// component's own `external_dependencies`.
pub fn run(mut graph: DependencyGraph, config: &PipelineConfig, external_versions: &IndexMap<String, String>) -> Result<PipelineOutput, ConfigError> {
    config.validate()?;

    let span = tracing::info_span!("inference_pipeline", components = graph.len());
    let _enter = span.enter();

    tracing::debug!("phase 1: layer classification");
    LayerClassifier::classify_graph(&mut graph);

    tracing::debug!("phase 2: initial clustering");
    let mut clusters = clustering::build_initial_clusters(&mut graph, config);

    tracing::debug!(clusters = clusters.len(), "phase 3: cluster metrics");
    cluster_metrics::compute_cluster_metrics(&mut clusters, &graph);

    tracing::debug!("phase 4: inter-cluster evidence graph");
    let icg = InterClusterGraph::build(&clusters, &graph, config);

    tracing::debug!(edges = icg.edges().len(), "phase 5: consolidation");
    let groups = consolidation::consolidate(&mut clusters, &icg, &graph, config);

    tracing::debug!(groups = groups.len(), "phase 6-9: naming, scoring, orchestration");
    let architecture = recommendation::build_architecture(&groups, &clusters, &graph, config, external_versions);

    for proposal in &architecture.proposals {
        for &cluster_id in &proposal.clusters {
            if let Some(cluster) = clusters.get_mut(cluster_id) {
                cluster.final_score = proposal.score;
            }
        }
    }

    Ok(PipelineOutput {
        graph,
        clusters,
        architecture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Edge, EdgeType};

    #[test]
    fn rejects_invalid_config_before_running_any_phase() {
        let graph = DependencyGraph::new(vec![Component::new("A")], vec![]);
        let mut config = PipelineConfig::default();
        config.support_ratio = 2.0;
        let result = run(graph, &config, &IndexMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn runs_end_to_end_on_a_small_graph() {
        let mut order_service = Component::new("com.acme.orders.OrderService");
        order_service.tables_used.insert("orders".into());
        let mut order_repo = Component::new("com.acme.orders.OrderRepository");
        order_repo.tables_used.insert("orders".into());

        let edges = vec![Edge::new(
            "com.acme.orders.OrderService",
            "com.acme.orders.OrderRepository",
            2,
            vec![EdgeType::Call],
        )];
        let graph = DependencyGraph::new(vec![order_service, order_repo], edges);

        let output = run(graph, &PipelineConfig::default(), &IndexMap::new()).expect("valid config");
        assert_eq!(output.graph.len(), 2);
        assert!(output.graph.components().all(|c| c.layer.is_some()));
        assert!(!output.clusters.is_empty());
        assert_eq!(
            output.architecture.project_metadata.total_components,
            output.graph.len()
        );
        assert!(!output.architecture.proposals.is_empty());
        for proposal in &output.architecture.proposals {
            for &cluster_id in &proposal.clusters {
                let cluster = output.clusters.iter().find(|c| c.cluster_id == cluster_id).unwrap();
                assert_eq!(cluster.final_score, proposal.score);
            }
        }
    }
}
