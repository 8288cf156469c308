// Copyright 2025 Cowboy AI, LLC.

use super::rules::{self, LayerLists};
use super::{Layer, LayerScores};
use crate::model::Component;

/// One named disambiguation rule, applied in a fixed order after base
/// scoring. Modeled as a plain data record rather than a trait object —
/// each rule is just a name paired with a function pointer, with `apply`
/// standing in for predicate+explanation since several rules here set
/// rather than add to a score.
struct DisambiguationRule {
    name: &'static str,
    apply: fn(&Component, &mut LayerScores),
}

static DISAMBIGUATION_RULES: &[DisambiguationRule] = &[
    DisambiguationRule {
        name: "web_role_present",
        apply: |c, s| {
            if c.web_role.is_present() {
                s.add(Layer::Web, 20.0);
            }
        },
    },
    DisambiguationRule {
        name: "client_cannot_be_controller",
        apply: |c, s| {
            let name = c.simple_name().to_ascii_lowercase();
            if name.contains("consumer") || name.contains("client") {
                s.set(Layer::Controller, 0.0);
                s.add(Layer::Shared, 8.0);
            }
        },
    },
    DisambiguationRule {
        name: "tables_used_favors_persistence",
        apply: |c, s| {
            if !c.tables_used.is_empty() {
                s.add(Layer::Persistence, 15.0);
                s.add(Layer::Domain, -10.0);
            }
        },
    },
    DisambiguationRule {
        name: "provider_with_tables_is_persistence",
        apply: |c, s| {
            let name = c.simple_name().to_ascii_lowercase();
            if name.contains("provider") && !c.tables_used.is_empty() {
                s.add(Layer::Persistence, 20.0);
                s.add(Layer::Shared, -10.0);
                s.add(Layer::Business, -5.0);
            }
        },
    },
    DisambiguationRule {
        name: "entity_or_table_annotation",
        apply: |c, s| {
            if c.annotations.contains("Entity") || c.annotations.contains("Table") {
                s.add(Layer::Persistence, 10.0);
                s.set(Layer::Domain, 0.0);
            }
        },
    },
    DisambiguationRule {
        name: "repository_or_dao_interface",
        apply: |c, s| {
            if rules::is_persistence_interface(c) {
                s.add(Layer::Persistence, 10.0);
                s.add(Layer::Business, -5.0);
            }
        },
    },
    DisambiguationRule {
        name: "transfer_shape_in_web_package",
        apply: |c, s| {
            let name = c.simple_name().to_ascii_lowercase();
            let is_transfer_shaped = ["dto", "request", "response", "payload"]
                .iter()
                .any(|kw| name.contains(kw));
            let pkg = c.package_path();
            let in_web_pkg = [".controller.", ".rest.", ".api."]
                .iter()
                .any(|kw| pkg.contains(kw));
            if is_transfer_shaped && in_web_pkg {
                s.add(Layer::Transfer, 8.0);
                s.add(Layer::Domain, -5.0);
            }
        },
    },
    DisambiguationRule {
        name: "domain_shaped_without_tables",
        apply: |c, s| {
            let name = c.simple_name().to_ascii_lowercase();
            let pkg = c.package_path();
            let domain_shaped =
                name.contains("model") || name.contains("domain") || pkg.contains(".domain.");
            if domain_shaped && c.tables_used.is_empty() {
                s.add(Layer::Domain, 5.0);
            }
        },
    },
    DisambiguationRule {
        name: "services_package_without_rest",
        apply: |c, s| {
            if c.package_path().contains(".services.") && !rules::has_rest_annotation(c) {
                s.add(Layer::Controller, -3.0);
                s.add(Layer::Business, 3.0);
            }
        },
    },
    DisambiguationRule {
        name: "plain_interface_favors_business",
        apply: |c, s| {
            if c.is_interface
                && !rules::has_rest_annotation(c)
                && !rules::is_persistence_interface(c)
            {
                s.add(Layer::Business, 5.0);
                s.add(Layer::Controller, -5.0);
            }
        },
    },
];

/// Assigns exactly one layer tag to each `Component`.
pub struct LayerClassifier;

impl LayerClassifier {
    /// Classify a single component in isolation.
    pub fn classify(component: &Component) -> Layer {
        let mut scores = LayerScores::new();

        for layer in Layer::PRIORITY {
            let LayerLists {
                annotations,
                name_substrings,
                package_substrings,
            } = rules::lists_for(layer);

            let annotation_hits = annotations
                .iter()
                .filter(|a| component.annotations.contains(**a))
                .count() as f64;
            scores.add(layer, annotation_hits * 10.0);

            let name = component.simple_name().to_ascii_lowercase();
            let name_hits = name_substrings.iter().filter(|s| name.contains(**s)).count() as f64;
            scores.add(layer, name_hits * 5.0);

            let pkg = component.package_path();
            let package_hits = package_substrings
                .iter()
                .filter(|s| pkg.contains(**s))
                .count() as f64;
            scores.add(layer, package_hits * 3.0);
        }

        for rule in DISAMBIGUATION_RULES {
            (rule.apply)(component, &mut scores);
            tracing::trace!(rule = rule.name, component = component.id.as_str(), "layer disambiguation rule evaluated");
        }

        let winner = scores.winner();
        tracing::debug!(component = component.id.as_str(), layer = ?winner, "classified layer");
        winner
    }

    /// Classify every component in a graph, writing the result back into
    /// `Component::layer`.
    pub fn classify_graph(graph: &mut crate::model::DependencyGraph) {
        for component in graph.components_mut() {
            component.layer = Some(Self::classify(component));
        }
    }
}
