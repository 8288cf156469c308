// Copyright 2025 Cowboy AI, LLC.

//! Directed relations between components.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of atomic contribution an edge aggregates. An `Edge` carries a
/// multiset of these (duplicates allowed — a method can call another
/// method three times, each a separate `Call` contribution folded into one
/// `Edge`'s weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    Call,
    Db,
    External,
    Reflection,
    Repository,
    InjectionField,
    InjectionConstructor,
    Relation,
    InterfaceImpl,
    SpringEvent,
    Uses,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EdgeType::Call => "call",
            EdgeType::Db => "db",
            EdgeType::External => "external",
            EdgeType::Reflection => "reflection",
            EdgeType::Repository => "repository",
            EdgeType::InjectionField => "injection-field",
            EdgeType::InjectionConstructor => "injection-constructor",
            EdgeType::Relation => "relation",
            EdgeType::InterfaceImpl => "interface-impl",
            EdgeType::SpringEvent => "spring-event",
            EdgeType::Uses => "uses",
        };
        write!(f, "{label}")
    }
}

/// A directed `from -> to` relation between two components, deduplicated on
/// `(from, to)` at graph-construction time: repeated atomic contributions
/// between the same pair are folded into one `Edge` with a summed `weight`
/// and a multiset `types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: u32,
    /// Multiset of atomic contribution kinds; may contain duplicates.
    pub types: Vec<EdgeType>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u32, types: Vec<EdgeType>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            types,
        }
    }

    /// The comma-joined type label used by the Graph artifact's
    /// serialization.
    pub fn types_label(&self) -> String {
        self.types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn has_type(&self, kind: EdgeType) -> bool {
        self.types.contains(&kind)
    }
}
