// Copyright 2025 Cowboy AI, LLC.

//! Domain inference: a package-path heuristic that skips
//! organizational prefixes and framework tokens, used both to seed
//! `Component::domain` and to group components before branch selection.

use indexmap::IndexMap;

use crate::model::Component;

const ORG_PREFIXES: &[&str] = &["com", "org", "net", "io", "edu", "gov", "co"];
const FRAMEWORK_TOKENS: &[&str] = &[
    "springframework",
    "framework",
    "boot",
    "internal",
    "impl",
    "main",
    "app",
    "application",
    "core",
    "src",
];

/// Infer a domain token from a component's package path.
///
/// Leading reverse-DNS organizational segments (`com`, `org`, ...) are
/// skipped, then one further segment is skipped as the assumed
/// company/product name (only when enough segments remain that doing so
/// still leaves something to report), then any interleaved framework
/// tokens are skipped. The first segment surviving all three passes is the
/// domain; if nothing survives, the component is treated as belonging to
/// the `"core"` domain.
pub fn infer_domain(component: &Component) -> String {
    let full_path = component.id.split('.').collect::<Vec<_>>();
    let package_segments = &full_path[..full_path.len().saturating_sub(1)];

    let mut i = 0;
    while i < package_segments.len()
        && ORG_PREFIXES.contains(&package_segments[i].to_ascii_lowercase().as_str())
    {
        i += 1;
    }

    if i < package_segments.len() && package_segments.len() - i > 1 {
        i += 1; // skip the assumed company/product segment
    }

    while i < package_segments.len() {
        let seg = package_segments[i].to_ascii_lowercase();
        if FRAMEWORK_TOKENS.contains(&seg.as_str()) {
            i += 1;
            continue;
        }
        return seg;
    }

    "core".to_string()
}

/// Group component ids by inferred domain, in first-seen order.
pub fn group_by_domain<'a>(
    components: impl Iterator<Item = &'a Component>,
) -> IndexMap<String, Vec<String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for c in components {
        grouped.entry(infer_domain(c)).or_default().push(c.id.clone());
    }
    for members in grouped.values_mut() {
        members.sort();
    }
    grouped
}

/// Whether the project is "single-domain": the largest domain holds
/// more than 75% of components.
pub fn is_single_domain_project(grouped: &IndexMap<String, Vec<String>>, total: usize) -> bool {
    if total == 0 {
        return false;
    }
    let largest = grouped.values().map(|v| v.len()).max().unwrap_or(0);
    (largest as f64) / (total as f64) > 0.75
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_org_prefix_and_company_segment() {
        let c = Component::new("com.acme.orders.service.OrderService");
        assert_eq!(infer_domain(&c), "orders");
    }

    #[test]
    fn skips_framework_tokens() {
        let c = Component::new("com.acme.internal.billing.InvoiceService");
        assert_eq!(infer_domain(&c), "billing");
    }

    #[test]
    fn falls_back_to_core_when_nothing_survives() {
        let c = Component::new("com.acme.App");
        assert_eq!(infer_domain(&c), "core");
    }

    #[test]
    fn unqualified_name_has_no_package_segments() {
        let c = Component::new("OrderService");
        assert_eq!(infer_domain(&c), "core");
    }

    #[test]
    fn single_domain_detection_above_75_percent() {
        let mut grouped = IndexMap::new();
        grouped.insert("orders".to_string(), vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        grouped.insert("billing".to_string(), vec!["e".into()]);
        assert!(is_single_domain_project(&grouped, 5));
    }

    #[test]
    fn single_domain_detection_below_threshold() {
        let mut grouped = IndexMap::new();
        grouped.insert("orders".to_string(), vec!["a".into(), "b".into()]);
        grouped.insert("billing".to_string(), vec!["c".into(), "d".into()]);
        assert!(!is_single_domain_project(&grouped, 4));
    }
}
