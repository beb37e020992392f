// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for choosing load models.

use petgraph::graph::NodeIndex;

use crate::definitions::{LoadDefinition, LoadModel};
use crate::numeric::approx_ge;
use crate::{AnalysisConfig, NetworkGraph};

pub(crate) struct LoadClassifier<'a> {
    graph: &'a NetworkGraph,
    dso_voltage_level: f64,
}

impl<'a> LoadClassifier<'a> {
    pub fn new(graph: &'a NetworkGraph, config: &AnalysisConfig) -> Self {
        Self {
            graph,
            dso_voltage_level: config.dso_voltage_level,
        }
    }

    /// Chooses a model for the loads of the given nodes.
    ///
    /// Loads of nodes below the distribution voltage level are left to the
    /// static network and get no definition.
    pub fn build(self, nodes: &[NodeIndex]) -> Vec<LoadDefinition> {
        let mut definitions = vec![];

        for index in nodes {
            let node = self.graph.node_at(*index);
            if !approx_ge(node.nominal_voltage, self.dso_voltage_level) {
                continue;
            }
            definitions.extend(node.loads.iter().map(|load| LoadDefinition {
                id: load.id.clone(),
                model: if load.fictitious || load.not_injecting {
                    LoadModel::Network
                } else {
                    LoadModel::LoadRestorativeWithLimits
                },
                node_id: node.id.clone(),
            }));
        }

        definitions
    }
}
