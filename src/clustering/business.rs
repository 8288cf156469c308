// Copyright 2025 Cowboy AI, LLC.

//! Business-responsibility clustering, taken for multi-domain projects:
//! components are grouped by domain, then by the business function their
//! name encodes, with infrastructure pooled separately and singleton
//! clusters consolidated.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PipelineConfig;
use crate::model::{Cluster, Component, DependencyGraph};

/// Longest-suffix-first so `ServiceImpl` is tried before `Service`.
static FUNCTION_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<token>.+?)(?:ServiceImpl|Service|UseCase|Repository|Repo|Controller|API|Api|Operations?|Listener|Publisher|Adapter|Factory|Handler|Db)$",
    )
    .expect("static regex is valid")
});

const INFRA_NAME_SUBSTRINGS: &[&str] = &[
    "Config",
    "Security",
    "Application",
    "Exception",
    "Error",
    "Jwt",
    "Swagger",
    "Filter",
    "ErrorHandler",
];

const DATA_OBJECT_SUFFIXES: &[&str] = &["Entity", "Model", "Data", "Dto", "Event", "Command", "Query"];

fn is_infrastructure(c: &Component) -> bool {
    let name = c.simple_name();
    let pkg = c.package_path();
    INFRA_NAME_SUBSTRINGS.iter().any(|kw| name.contains(kw))
        || pkg.contains(".config.")
        || pkg.contains(".exception.")
}

/// Extract the business function token from a role-bearing simple name, or
/// `None` for data-only components (entities, DTOs, events, plain domain
/// objects).
fn extract_function_token(c: &Component) -> Option<String> {
    FUNCTION_TOKEN_RE
        .captures(c.simple_name())
        .map(|caps| caps["token"].to_ascii_lowercase())
        .filter(|t| !t.is_empty())
}

fn is_non_role_bearing_data_object(c: &Component) -> bool {
    let name = c.simple_name();
    DATA_OBJECT_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Split a PascalCase/camelCase identifier into lowercase words at
/// upper-case transitions.
fn camel_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(current.to_ascii_lowercase());
            current = String::new();
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current.to_ascii_lowercase());
    }
    words
}

fn name_contains_token_as_word(name: &str, token: &str) -> bool {
    camel_words(name).iter().any(|w| w == token)
}

struct DomainCluster {
    domain: String,
    cluster: Cluster,
}

/// Build business-responsibility clusters for one domain's members,
/// returning them tagged with that domain for later consolidation.
fn cluster_one_domain(
    graph: &DependencyGraph,
    domain: &str,
    member_ids: &[String],
    next_id: &mut usize,
) -> (Vec<DomainCluster>, Vec<String>) {
    let mut tokened: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut untokened: Vec<String> = Vec::new();
    let mut infra: Vec<String> = Vec::new();

    for id in member_ids {
        let c = graph.get(id).expect("clustering operates on ids drawn from the graph");
        if is_infrastructure(c) {
            infra.push(id.clone());
            continue;
        }
        match extract_function_token(c) {
            Some(tok) => tokened.entry(tok).or_default().push(id.clone()),
            None => untokened.push(id.clone()),
        }
    }

    let mut out = Vec::new();

    if tokened.is_empty() {
        let cluster = Cluster::new(*next_id, untokened);
        *next_id += 1;
        out.push(DomainCluster {
            domain: domain.to_string(),
            cluster,
        });
    } else if tokened.len() == 1 {
        let mut members = tokened.into_iter().next().unwrap().1;
        members.extend(untokened);
        let cluster = Cluster::new(*next_id, members);
        *next_id += 1;
        out.push(DomainCluster {
            domain: domain.to_string(),
            cluster,
        });
    } else {
        let mut function_clusters: Vec<(String, usize)> = Vec::new();
        for (tok, members) in tokened {
            out.push(DomainCluster {
                domain: domain.to_string(),
                cluster: Cluster::new(*next_id, members),
            });
            function_clusters.push((tok, out.len() - 1));
            *next_id += 1;
        }

        for id in untokened {
            let c = graph.get(&id).expect("clustering operates on ids drawn from the graph");
            let name = c.simple_name();
            let target = function_clusters
                .iter()
                .find(|(tok, _)| name_contains_token_as_word(name, tok))
                .map(|(_, idx)| *idx)
                .unwrap_or(function_clusters[0].1);
            out[target].cluster.members.push(id);
        }
    }

    (out, infra)
}

/// Merge singleton clusters that hold a single non-role-bearing data
/// object (or whose domain's largest cluster already has >= 3 members)
/// into the largest cluster of the same domain.
fn consolidate_singletons(domain_clusters: &mut Vec<DomainCluster>, graph: &DependencyGraph) {
    let domains: Vec<String> = {
        let mut seen = Vec::new();
        for dc in domain_clusters.iter() {
            if !seen.contains(&dc.domain) {
                seen.push(dc.domain.clone());
            }
        }
        seen
    };

    for domain in domains {
        let indices: Vec<usize> = domain_clusters
            .iter()
            .enumerate()
            .filter(|(_, dc)| dc.domain == domain)
            .map(|(i, _)| i)
            .collect();
        if indices.len() < 2 {
            continue;
        }

        let largest_idx = *indices
            .iter()
            .max_by_key(|&&i| domain_clusters[i].cluster.size())
            .expect("non-empty indices");
        let largest_size = domain_clusters[largest_idx].cluster.size();

        let mut absorbed: Vec<usize> = Vec::new();
        for &i in &indices {
            if i == largest_idx {
                continue;
            }
            if domain_clusters[i].cluster.is_singleton() {
                let sole_member_id = domain_clusters[i].cluster.members[0].clone();
                let sole_member = graph
                    .get(&sole_member_id)
                    .expect("clustering operates on ids drawn from the graph");
                if is_non_role_bearing_data_object(sole_member) || largest_size >= 3 {
                    absorbed.push(i);
                }
            }
        }

        for &i in &absorbed {
            let members = std::mem::take(&mut domain_clusters[i].cluster.members);
            domain_clusters[largest_idx].cluster.members.extend(members);
        }
        domain_clusters[largest_idx].cluster.members.sort();
        domain_clusters[largest_idx].cluster.members.dedup();

        absorbed.sort_unstable_by(|a, b| b.cmp(a));
        for i in absorbed {
            domain_clusters.remove(i);
        }
    }
}

/// Build business-responsibility clusters across every domain, pooling
/// infrastructure components into a dedicated cluster.
pub fn cluster_business_responsibility(
    graph: &DependencyGraph,
    domain_groups: &IndexMap<String, Vec<String>>,
    _config: &PipelineConfig,
) -> Vec<Cluster> {
    let mut next_id = 0usize;
    let mut domain_clusters: Vec<DomainCluster> = Vec::new();
    let mut infra_members: Vec<String> = Vec::new();

    for (domain, member_ids) in domain_groups {
        let (clusters, infra) = cluster_one_domain(graph, domain, member_ids, &mut next_id);
        domain_clusters.extend(clusters);
        infra_members.extend(infra);
    }

    consolidate_singletons(&mut domain_clusters, graph);

    let mut clusters: Vec<Cluster> = domain_clusters.into_iter().map(|dc| dc.cluster).collect();

    if !infra_members.is_empty() {
        clusters.push(Cluster::new(next_id, infra_members));
    }

    for cluster in &mut clusters {
        cluster.members.sort();
        cluster.members.dedup();
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_function_token_preferring_longest_suffix() {
        let mut c = Component::new("com.acme.OrderServiceImpl");
        c.is_interface = false;
        assert_eq!(extract_function_token(&c), Some("order".to_string()));
    }

    #[test]
    fn data_only_component_has_no_token() {
        let c = Component::new("com.acme.OrderDto");
        assert_eq!(extract_function_token(&c), None);
    }

    #[test]
    fn detects_infrastructure_by_name_and_package() {
        let c = Component::new("com.acme.config.SecurityConfig");
        assert!(is_infrastructure(&c));
        let c2 = Component::new("com.acme.orders.OrderService");
        assert!(!is_infrastructure(&c2));
    }

    #[test]
    fn single_function_in_domain_yields_one_cluster() {
        let g = DependencyGraph::new(
            vec![
                Component::new("com.acme.orders.OrderService"),
                Component::new("com.acme.orders.OrderDto"),
            ],
            vec![],
        );
        let mut groups = IndexMap::new();
        groups.insert(
            "orders".to_string(),
            vec!["com.acme.orders.OrderService".to_string(), "com.acme.orders.OrderDto".to_string()],
        );
        let clusters = cluster_business_responsibility(&g, &groups, &PipelineConfig::default());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
    }

    #[test]
    fn multiple_functions_route_untokened_by_word_match() {
        let g = DependencyGraph::new(
            vec![
                Component::new("com.acme.orders.OrderService"),
                Component::new("com.acme.orders.PaymentRepository"),
                Component::new("com.acme.orders.OrderSummaryDto"),
            ],
            vec![],
        );
        let mut groups = IndexMap::new();
        groups.insert(
            "orders".to_string(),
            vec![
                "com.acme.orders.OrderService".to_string(),
                "com.acme.orders.PaymentRepository".to_string(),
                "com.acme.orders.OrderSummaryDto".to_string(),
            ],
        );
        let clusters = cluster_business_responsibility(&g, &groups, &PipelineConfig::default());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.iter().map(|c| c.size()).sum::<usize>(), 3);
        let order_cluster = clusters
            .iter()
            .find(|c| c.members.iter().any(|m| m.ends_with("OrderService")))
            .unwrap();
        assert!(order_cluster.members.iter().any(|m| m.ends_with("OrderSummaryDto")));
    }
}
