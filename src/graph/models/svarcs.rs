// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for choosing static var compensator
//! models.

use petgraph::graph::NodeIndex;

use crate::definitions::{SvarcDefinition, SvarcModel};
use crate::network::StaticVarCompensator;
use crate::numeric::approx_zero;
use crate::NetworkGraph;

pub(crate) struct SvarcClassifier<'a> {
    graph: &'a NetworkGraph,
}

impl<'a> SvarcClassifier<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Chooses a model for the static var compensators of the given nodes.
    pub fn build(self, nodes: &[NodeIndex]) -> Vec<SvarcDefinition> {
        nodes
            .iter()
            .flat_map(|index| self.graph.node_at(*index).svarcs.iter())
            .map(|svarc| SvarcDefinition {
                id: svarc.id.clone(),
                model: Self::model(svarc),
                b_min: svarc.b_min,
                b_max: svarc.b_max,
                voltage_set_point: svarc.voltage_set_point,
                u_nom: svarc.u_nom,
                u_min_activation: svarc.u_min_activation,
                u_max_activation: svarc.u_max_activation,
                u_set_point_min: svarc.u_set_point_min,
                u_set_point_max: svarc.u_set_point_max,
                b0: svarc.b0,
                slope: svarc.slope,
                u_nom_remote: svarc.u_nom_remote,
                regulated_bus_id: svarc.regulated_bus_id.clone(),
            })
            .collect()
    }

    fn model(svarc: &StaticVarCompensator) -> SvarcModel {
        if !svarc.regulating_voltage {
            return SvarcModel::Network;
        }
        SvarcModel::compose(
            svarc.has_stand_by_automaton,
            svarc.regulated_bus_id != svarc.connected_bus_id,
            svarc.has_voltage_per_reactive_power_control && !approx_zero(svarc.slope),
        )
    }
}
