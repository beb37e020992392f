// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Node` struct, an electrical bus of the network.

use super::{BusBarSection, DanglingLine, Generator, Load, Shunt, StaticVarCompensator};

/// An electrical bus and the equipment connected to it.
///
/// Neighbours are not stored on the node: they are derived from the
/// [`Branch`][crate::network::Branch]es given to
/// [`NetworkGraph::try_new`][crate::NetworkGraph::try_new].
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// Unique id of the node.
    pub id: String,
    /// Id of the voltage level containing the node.
    pub voltage_level_id: String,
    /// Nominal voltage of the node, in kV.
    pub nominal_voltage: f64,
    /// Whether the node is fictitious.  Fictitious nodes are never selected as
    /// slack node.
    pub fictitious: bool,
    pub generators: Vec<Generator>,
    pub loads: Vec<Load>,
    pub shunts: Vec<Shunt>,
    pub svarcs: Vec<StaticVarCompensator>,
    pub dangling_lines: Vec<DanglingLine>,
    pub busbar_sections: Vec<BusBarSection>,
}

impl Node {
    /// Creates a node without any equipment.
    pub fn new(
        id: impl Into<String>,
        voltage_level_id: impl Into<String>,
        nominal_voltage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            voltage_level_id: voltage_level_id.into(),
            nominal_voltage,
            ..Default::default()
        }
    }
}

/// Nodes are identified by their id.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}
