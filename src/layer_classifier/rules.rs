// Copyright 2025 Cowboy AI, LLC.

//! Closed keyword lists for base layer scoring, and the disambiguation
//! rule table.
//!
//! The three closed lists per layer (annotation names, simple-name
//! substrings, package-path substrings) are this crate's concrete choice,
//! grounded in conventional Spring/JAX-RS/JPA annotation and naming
//! vocabulary: `@Entity`, `@Table`, REST/DTO naming, and
//! `.controller.`/`.rest.`/`.api.` package segments.

use once_cell::sync::Lazy;

use super::Layer;
use crate::model::Component;

/// One layer's three closed lists.
pub struct LayerLists {
    pub annotations: &'static [&'static str],
    pub name_substrings: &'static [&'static str],
    pub package_substrings: &'static [&'static str],
}

pub fn lists_for(layer: Layer) -> &'static LayerLists {
    match layer {
        Layer::Web => &WEB_LISTS,
        Layer::Controller => &CONTROLLER_LISTS,
        Layer::Business => &BUSINESS_LISTS,
        Layer::Persistence => &PERSISTENCE_LISTS,
        Layer::Domain => &DOMAIN_LISTS,
        Layer::Transfer => &TRANSFER_LISTS,
        Layer::Shared => &SHARED_LISTS,
    }
}

static WEB_LISTS: LayerLists = LayerLists {
    annotations: &[
        "RestController",
        "RequestMapping",
        "GetMapping",
        "PostMapping",
        "PutMapping",
        "DeleteMapping",
        "WebFilter",
        "WebServlet",
        "CrossOrigin",
        "Path",
    ],
    name_substrings: &["resource", "endpoint", "websocket"],
    package_substrings: &[".web.", ".api.", ".rest."],
};

static CONTROLLER_LISTS: LayerLists = LayerLists {
    annotations: &["Controller", "RestController"],
    name_substrings: &["controller"],
    package_substrings: &[".controller."],
};

static BUSINESS_LISTS: LayerLists = LayerLists {
    annotations: &["Service", "Transactional", "UseCase"],
    name_substrings: &["service", "usecase", "manager"],
    package_substrings: &[".service.", ".services.", ".business.", ".usecase."],
};

static PERSISTENCE_LISTS: LayerLists = LayerLists {
    annotations: &["Repository", "Entity", "Table", "Embeddable"],
    name_substrings: &["repository", "dao"],
    package_substrings: &[".repository.", ".persistence.", ".dao."],
};

static DOMAIN_LISTS: LayerLists = LayerLists {
    annotations: &["ValueObject", "AggregateRoot"],
    name_substrings: &["domain", "model"],
    package_substrings: &[".domain.", ".model."],
};

static TRANSFER_LISTS: LayerLists = LayerLists {
    annotations: &["Dto", "JsonInclude"],
    name_substrings: &["dto", "request", "response", "payload"],
    package_substrings: &[".dto.", ".transfer."],
};

static SHARED_LISTS: LayerLists = LayerLists {
    annotations: &["Configuration", "Util"],
    name_substrings: &["util", "helper", "constants", "shared"],
    package_substrings: &[".shared.", ".common.", ".util."],
};

/// Annotations that mark a component as participating in a REST endpoint,
/// used by disambiguation rules 9 and 10.
pub static REST_ANNOTATIONS: Lazy<[&str; 6]> = Lazy::new(|| {
    [
        "RestController",
        "GetMapping",
        "PostMapping",
        "PutMapping",
        "DeleteMapping",
        "RequestMapping",
    ]
});

pub fn has_rest_annotation(component: &Component) -> bool {
    REST_ANNOTATIONS
        .iter()
        .any(|a| component.annotations.contains(*a))
}

pub fn is_persistence_interface(component: &Component) -> bool {
    component.is_interface
        && (component.simple_name().to_ascii_lowercase().contains("repository")
            || component.simple_name().to_ascii_lowercase().contains("dao"))
}
