// Copyright 2025 Cowboy AI, LLC.

//! MicroserviceNameGenerator: produces one display name per group of
//! clusters, classifying the group as infrastructure or business first.
//!
//! Naming is a keyword-frequency strategy: count keyword hits across a
//! collection, take the top-N, and format a templated display name.

use std::collections::HashMap;

use crate::config::PipelineConfig;
use crate::model::{Component, DependencyGraph};

const ROLE_KEYWORDS: &[&str] = &[
    "repository",
    "controller",
    "operations",
    "operation",
    "publisher",
    "listener",
    "usecase",
    "service",
    "adapter",
    "factory",
    "handler",
    "repo",
    "db",
];

fn name_prefix_token(lower_name: &str) -> Option<String> {
    let keyword = ROLE_KEYWORDS.iter().find(|kw| lower_name.contains(**kw))?;
    let idx = lower_name.find(keyword)?;
    let mut prefix = lower_name[..idx].to_string();
    if let Some(stripped) = prefix.strip_suffix("impl") {
        prefix = stripped.to_string();
    }
    Some(prefix)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Classify a group as infrastructure when >= 80% of its members' simple
/// names contain any infra-map key, and generate its display name.
///
/// Returns `(name, is_infrastructure)`. An empty group yields
/// `("Componente Desconocido", false)`.
pub fn generate_name(member_ids: &[String], graph: &DependencyGraph, config: &PipelineConfig) -> (String, bool) {
    if member_ids.is_empty() {
        return ("Componente Desconocido".to_string(), false);
    }

    let members: Vec<&Component> = member_ids.iter().filter_map(|id| graph.get(id)).collect();
    if members.is_empty() {
        return ("Componente Desconocido".to_string(), false);
    }

    let infra_hits = members
        .iter()
        .filter(|c| {
            let lower = c.simple_name().to_ascii_lowercase();
            config.naming_infra_keywords.keys().any(|kw| lower.contains(kw.as_str()))
        })
        .count();
    let is_infrastructure = (infra_hits as f64 / members.len() as f64) >= 0.8;

    if is_infrastructure {
        (infrastructure_name(&members, config), true)
    } else {
        (business_name(&members, config), false)
    }
}

fn infrastructure_name(members: &[&Component], config: &PipelineConfig) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in members {
        let lower = c.simple_name().to_ascii_lowercase();
        for key in config.naming_infra_keywords.keys() {
            if lower.contains(key.as_str()) {
                *counts.entry(key.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let displays: Vec<&str> = ranked
        .iter()
        .take(2)
        .map(|(key, _)| config.naming_infra_keywords[*key].as_str())
        .collect();

    match displays.as_slice() {
        [] => "Componente de Infraestructura".to_string(),
        [x] => format!("Componente de {x}"),
        [x, y, ..] => format!("Componente de {x} & {y}"),
    }
}

fn business_name(members: &[&Component], config: &PipelineConfig) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for c in members {
        let lower = c.simple_name().to_ascii_lowercase();
        if let Some(tok) = name_prefix_token(&lower) {
            if tok.len() > 2 && !config.exclude_tokens.contains(&tok) {
                *counts.entry(tok).or_insert(0) += 1;
            }
        }
        if let Some(seg) = c.package_path().split('.').filter(|s| !s.is_empty()).last() {
            if seg.len() > 2 && !config.exclude_tokens.contains(seg) {
                *counts.entry(seg.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let top: Vec<String> = ranked.iter().take(2).map(|(tok, _)| capitalize(tok)).collect();

    match top.as_slice() {
        [] => "Componente de Negocio".to_string(),
        [x] => format!("Componente de {x}"),
        [x, y, ..] => format!("Componente de {x} y {y}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DependencyGraph;

    #[test]
    fn empty_group_yields_fallback_name() {
        let graph = DependencyGraph::new(vec![], vec![]);
        let (name, is_infra) = generate_name(&[], &graph, &PipelineConfig::default());
        assert_eq!(name, "Componente Desconocido");
        assert!(!is_infra);
    }

    #[test]
    fn majority_infra_keyword_names_infrastructure() {
        let graph = DependencyGraph::new(
            vec![Component::new("SecurityConfig"), Component::new("AuthFilter")],
            vec![],
        );
        let ids = vec!["SecurityConfig".to_string(), "AuthFilter".to_string()];
        let (name, is_infra) = generate_name(&ids, &graph, &PipelineConfig::default());
        assert!(is_infra);
        assert!(name.starts_with("Componente de"));
    }

    #[test]
    fn business_group_extracts_top_tokens() {
        let graph = DependencyGraph::new(
            vec![Component::new("com.acme.orders.OrderService"), Component::new("com.acme.orders.OrderRepository")],
            vec![],
        );
        let ids = vec![
            "com.acme.orders.OrderService".to_string(),
            "com.acme.orders.OrderRepository".to_string(),
        ];
        let (name, is_infra) = generate_name(&ids, &graph, &PipelineConfig::default());
        assert!(!is_infra);
        assert!(name.contains("Order") || name.contains("Orders"));
    }

    #[test]
    fn no_surviving_tokens_yields_business_fallback() {
        let graph = DependencyGraph::new(vec![Component::new("Ab")], vec![]);
        let ids = vec!["Ab".to_string()];
        let (name, _) = generate_name(&ids, &graph, &PipelineConfig::default());
        assert_eq!(name, "Componente de Negocio");
    }
}
