// Copyright 2025 Cowboy AI, LLC.

//! The analyzed project's class/interface/enum unit and its ingester-filled
//! hint fields.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::layer_classifier::Layer;

/// A single class/interface/enum of the analyzed project.
///
/// Produced once by the ingester and immutable thereafter, except for
/// `layer`, which `LayerClassifier` fills in during the classification
/// phase (see [`crate::layer_classifier`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Fully-qualified dotted name; unique primary key.
    pub id: String,
    pub is_interface: bool,
    pub loc: u32,
    /// Lowercase table identifiers this component reads or writes.
    pub tables_used: BTreeSet<String>,
    pub sensitive_data: bool,
    /// Simple annotation names, no package qualifier (`Entity`, not
    /// `javax.persistence.Entity`).
    pub annotations: BTreeSet<String>,
    /// Omitted for the root of a class hierarchy.
    pub extends_class: Option<String>,
    pub implements_interfaces: BTreeSet<String>,
    pub calls_out: BTreeSet<String>,
    pub calls_in: BTreeSet<String>,
    /// External coordinates, `group:artifact[:version]`.
    pub external_dependencies: BTreeSet<String>,
    pub secrets_references: SecretsReference,
    pub messaging_type: MessagingType,
    pub messaging_role: MessagingRole,
    pub ejb_type: EjbType,
    pub web_type: WebType,
    pub web_role: WebRole,
    /// Coupling-between-objects.
    pub cbo: u32,
    /// Lack-of-cohesion-of-methods, in `[0, 1]`.
    pub lcom: f64,
    /// Assigned by `LayerClassifier`; `None` until that phase runs, and
    /// defaults to `Shared` if classification ever leaves it unset.
    pub layer: Option<Layer>,
    /// Inferred from the package path by `ClusteringAlgorithm`'s domain
    /// heuristic.
    pub domain: Option<String>,
}

impl Component {
    /// Minimal component with every optional/collection field at its empty
    /// default; useful as a test fixture builder base.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_interface: false,
            loc: 0,
            tables_used: BTreeSet::new(),
            sensitive_data: false,
            annotations: BTreeSet::new(),
            extends_class: None,
            implements_interfaces: BTreeSet::new(),
            calls_out: BTreeSet::new(),
            calls_in: BTreeSet::new(),
            external_dependencies: BTreeSet::new(),
            secrets_references: SecretsReference::None,
            messaging_type: MessagingType::None,
            messaging_role: MessagingRole::None,
            ejb_type: EjbType::None,
            web_type: WebType::None,
            web_role: WebRole::None,
            cbo: 0,
            lcom: 0.0,
            layer: None,
            domain: None,
        }
    }

    /// The simple (unqualified) name — the id's last dotted segment.
    pub fn simple_name(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }

    /// The package path — the id with the simple name stripped, lowercased
    /// for substring matching against package-pattern lists.
    pub fn package_path(&self) -> String {
        match self.id.rsplit_once('.') {
            Some((pkg, _)) => format!("{pkg}.").to_ascii_lowercase(),
            None => String::new(),
        }
    }
}

/// How (if at all) this component references secret material. Filled by an
/// external sensitive-data detector; the core only ever
/// reads the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SecretsReference {
    #[default]
    None,
    EnvironmentVariable,
    VaultLookup,
    ConfigProperty,
    HardcodedLiteral,
}

/// Messaging technology hint, filled by the ingester from annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessagingType {
    #[default]
    None,
    Kafka,
    Rabbit,
    JmsQueue,
    JmsTopic,
    Sqs,
    EventBus,
}

/// Producer/consumer role within a messaging flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessagingRole {
    #[default]
    None,
    Producer,
    Consumer,
    Listener,
}

/// EJB-style component kind, for projects that still carry J2EE annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EjbType {
    #[default]
    None,
    Stateless,
    Stateful,
    MessageDriven,
    Singleton,
}

/// Web-layer component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WebType {
    #[default]
    None,
    Servlet,
    Filter,
    JaxRs,
    JaxWs,
    GraphQl,
}

/// Web-layer role, independent of `WebType`. Presence of anything other
/// than `None` here is a strong Web-layer signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WebRole {
    #[default]
    None,
    Endpoint,
    Middleware,
    Gateway,
}

impl WebRole {
    /// Whether the ingester actually tagged a role (`None` means absent,
    /// not "role is None").
    pub fn is_present(&self) -> bool {
        !matches!(self, WebRole::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_is_last_dotted_segment() {
        let c = Component::new("com.acme.orders.OrderService");
        assert_eq!(c.simple_name(), "OrderService");
    }

    #[test]
    fn simple_name_handles_unqualified_id() {
        let c = Component::new("OrderService");
        assert_eq!(c.simple_name(), "OrderService");
    }

    #[test]
    fn package_path_is_lowercased_with_trailing_dot() {
        let c = Component::new("com.Acme.Orders.OrderService");
        assert_eq!(c.package_path(), "com.acme.orders.");
    }

    #[test]
    fn web_role_presence() {
        assert!(!WebRole::None.is_present());
        assert!(WebRole::Endpoint.is_present());
    }
}
