// Copyright 2025 Cowboy AI, LLC.

//! LayerClassifier: assigns exactly one layer tag to each
//! `Component` using a weighted vote over annotations, name patterns, and
//! package patterns, plus a fixed sequence of disambiguation rules.
//!
//! A flat, deterministic, string-heuristic classifier: lowercase the
//! name, match against closed keyword lists, accumulate evidence.

mod classifier;
pub mod rules;

pub use classifier::LayerClassifier;

use serde::{Deserialize, Serialize};

/// One of the seven layer tags a `Component` can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Controller,
    Business,
    Persistence,
    Domain,
    Transfer,
    Web,
    Shared,
}

impl Layer {
    /// Tie-break priority order, highest first.
    pub const PRIORITY: [Layer; 7] = [
        Layer::Web,
        Layer::Controller,
        Layer::Business,
        Layer::Persistence,
        Layer::Domain,
        Layer::Transfer,
        Layer::Shared,
    ];

    fn index(self) -> usize {
        match self {
            Layer::Web => 0,
            Layer::Controller => 1,
            Layer::Business => 2,
            Layer::Persistence => 3,
            Layer::Domain => 4,
            Layer::Transfer => 5,
            Layer::Shared => 6,
        }
    }
}

/// Per-layer score accumulator, indexed by `Layer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerScores([f64; 7]);

impl LayerScores {
    pub fn new() -> Self {
        Self([0.0; 7])
    }

    pub fn add(&mut self, layer: Layer, delta: f64) {
        self.0[layer.index()] += delta;
    }

    pub fn set(&mut self, layer: Layer, value: f64) {
        self.0[layer.index()] = value;
    }

    pub fn get(&self, layer: Layer) -> f64 {
        self.0[layer.index()]
    }

    /// The winning layer under the tie-break priority order, or `Shared` if
    /// every score is `<= 0`.
    pub fn winner(&self) -> Layer {
        let max = Layer::PRIORITY
            .iter()
            .map(|l| self.get(*l))
            .fold(f64::NEG_INFINITY, f64::max);

        if max <= 0.0 {
            return Layer::Shared;
        }

        for layer in Layer::PRIORITY {
            if self.get(layer) == max {
                return layer;
            }
        }
        Layer::Shared
    }
}
