use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use indexmap::IndexMap;
use svcmap_core::model::{Component, DependencyGraph, Edge, EdgeType};
use svcmap_core::PipelineConfig;

/// Build a synthetic multi-domain graph of `domains` domains, each with
/// `per_domain` Service/Repository/Controller triples wired the way a
/// real Spring-style project is: controller -> service -> repository,
/// all three sharing one table.
fn synthetic_graph(domains: usize, per_domain: usize) -> DependencyGraph {
    let mut components = Vec::new();
    let mut edges = Vec::new();

    for d in 0..domains {
        for i in 0..per_domain {
            let base = format!("com.acme.domain{d}.Entity{i}");
            let service = format!("{base}Service");
            let repo = format!("{base}Repository");
            let controller = format!("{base}Controller");

            let mut service_c = Component::new(service.clone());
            service_c.tables_used.insert(format!("entity{d}_{i}"));
            let mut repo_c = Component::new(repo.clone());
            repo_c.tables_used.insert(format!("entity{d}_{i}"));
            let controller_c = Component::new(controller.clone());

            components.push(service_c);
            components.push(repo_c);
            components.push(controller_c);

            edges.push(Edge::new(controller.clone(), service.clone(), 3, vec![EdgeType::Call]));
            edges.push(Edge::new(service.clone(), repo.clone(), 5, vec![EdgeType::Call]));
        }
    }

    DependencyGraph::new(components, edges)
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");

    for &(domains, per_domain) in &[(5, 4), (10, 10), (20, 20)] {
        let size = domains * per_domain * 3;
        group.bench_with_input(BenchmarkId::from_parameter(size), &(domains, per_domain), |b, &(domains, per_domain)| {
            b.iter_batched(
                || synthetic_graph(domains, per_domain),
                |graph| {
                    let output = svcmap_core::run(black_box(graph), &PipelineConfig::default(), &IndexMap::new());
                    black_box(output.expect("default config validates"))
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn benchmark_layer_classification(c: &mut Criterion) {
    use svcmap_core::layer_classifier::LayerClassifier;

    c.bench_function("layer_classify_single_component", |b| {
        let component = Component::new("com.acme.orders.OrderController");
        b.iter(|| black_box(LayerClassifier::classify(black_box(&component))));
    });
}

fn benchmark_intercluster_graph(c: &mut Criterion) {
    use svcmap_core::clustering;
    use svcmap_core::cluster_metrics;
    use svcmap_core::intercluster::InterClusterGraph;

    let mut group = c.benchmark_group("intercluster_build");

    for &(domains, per_domain) in &[(10, 10), (20, 15)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(domains * per_domain),
            &(domains, per_domain),
            |b, &(domains, per_domain)| {
                let mut graph = synthetic_graph(domains, per_domain);
                let config = PipelineConfig::default();
                let mut clusters = clustering::build_initial_clusters(&mut graph, &config);
                cluster_metrics::compute_cluster_metrics(&mut clusters, &graph);

                b.iter(|| black_box(InterClusterGraph::build(black_box(&clusters), &graph, &config)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_full_pipeline, benchmark_layer_classification, benchmark_intercluster_graph);
criterion_main!(benches);
