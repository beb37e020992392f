// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `graph` module:
//!
//! - the `NetworkBuilder`, which can declaratively build network
//!   configurations for use in tests.
//! - constructors for the equipment the tests attach to nodes.

use crate::network::{
    ActivePowerControl, Branch, Converter, ConverterStation, Coupling, Generator, HvdcLine,
    LccStation, Line, Load, Node, Shunt, StaticVarCompensator, Transformer, VscStation,
};
use crate::{Error, NetworkGraph};

/// A builder for creating network configurations easily, for use in tests.
///
/// Nodes are named `B0`, `B1`, ... in creation order, and branches `L0`,
/// `T1`, `C2`, ... with a counter shared by all branches.
pub(super) struct NetworkBuilder {
    nodes: Vec<Node>,
    branches: Vec<Branch>,
    hvdc_lines: Vec<HvdcLine>,
    slack_node: Option<String>,
    next_branch: usize,
}

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    pub(super) fn new() -> Self {
        NetworkBuilder {
            nodes: Vec::new(),
            branches: Vec::new(),
            hvdc_lines: Vec::new(),
            slack_node: None,
            next_branch: 0,
        }
    }

    /// Adds a node to the network and returns its id.
    pub(super) fn node(&mut self, voltage_level_id: &str, nominal_voltage: f64) -> String {
        let id = format!("B{}", self.nodes.len());
        self.nodes
            .push(Node::new(id.clone(), voltage_level_id, nominal_voltage));
        id
    }

    fn node_mut(&mut self, node_id: &str) -> &mut Node {
        self.nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .unwrap_or_else(|| panic!("Unknown test node {node_id}"))
    }

    fn next_branch_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}{}", self.next_branch);
        self.next_branch += 1;
        id
    }

    /// Connects two nodes with a line and returns the line id.
    pub(super) fn line(&mut self, node1: &str, node2: &str) -> String {
        let id = self.next_branch_id("L");
        self.branches.push(Line::new(id.clone(), node1, node2).into());
        id
    }

    /// Connects two or three nodes with a transformer and returns its id.
    pub(super) fn transformer(&mut self, node_ids: &[&str]) -> String {
        let id = self.next_branch_id("T");
        self.branches
            .push(Transformer::new(id.clone(), node_ids.iter().copied()).into());
        id
    }

    /// Connects two nodes with a bus coupler.
    pub(super) fn coupling(&mut self, node1: &str, node2: &str) -> String {
        let id = self.next_branch_id("C");
        self.branches
            .push(Coupling::new(id.clone(), node1, node2).into());
        id
    }

    /// Adds an HVDC line and returns it, so that tests can adjust its data.
    pub(super) fn hvdc_line(
        &mut self,
        id: &str,
        converter1: Converter,
        converter2: Converter,
    ) -> &mut HvdcLine {
        let mut line = HvdcLine::new(id, converter1, converter2);
        line.pmax = 1000.0;
        self.hvdc_lines.push(line);
        let last = self.hvdc_lines.len() - 1;
        &mut self.hvdc_lines[last]
    }

    pub(super) fn fictitious(&mut self, node_id: &str) -> &mut Self {
        self.node_mut(node_id).fictitious = true;
        self
    }

    pub(super) fn slack(&mut self, node_id: &str) -> &mut Self {
        self.slack_node = Some(node_id.to_string());
        self
    }

    pub(super) fn generator(&mut self, node_id: &str, generator: Generator) -> &mut Self {
        let node = self.node_mut(node_id);
        let generator = Generator {
            connected_bus_id: node.id.clone(),
            nominal_voltage: node.nominal_voltage,
            regulated_bus_id: if generator.regulated_bus_id.is_empty() {
                node.id.clone()
            } else {
                generator.regulated_bus_id.clone()
            },
            ..generator
        };
        node.generators.push(generator);
        self
    }

    pub(super) fn load(&mut self, node_id: &str, load: Load) -> &mut Self {
        self.node_mut(node_id).loads.push(load);
        self
    }

    pub(super) fn shunt(&mut self, node_id: &str, shunt_id: &str) -> &mut Self {
        self.node_mut(node_id).shunts.push(Shunt::new(shunt_id));
        self
    }

    pub(super) fn svarc(&mut self, node_id: &str, svarc: StaticVarCompensator) -> &mut Self {
        let node = self.node_mut(node_id);
        let svarc = StaticVarCompensator {
            connected_bus_id: node.id.clone(),
            regulated_bus_id: if svarc.regulated_bus_id.is_empty() {
                node.id.clone()
            } else {
                svarc.regulated_bus_id.clone()
            },
            ..svarc
        };
        node.svarcs.push(svarc);
        self
    }

    pub(super) fn node_data(&mut self, node_id: &str) -> &mut Node {
        self.node_mut(node_id)
    }

    /// Builds and returns the network graph.
    pub(super) fn build(&self) -> Result<NetworkGraph, Error> {
        let mut graph = NetworkGraph::try_new(
            self.nodes.clone(),
            self.branches.clone(),
            self.hvdc_lines.clone(),
        )?;
        if let Some(slack) = &self.slack_node {
            graph.set_slack_node(slack)?;
        }
        Ok(graph)
    }
}

/// A generator regulating its own bus, producing 100 MW within
/// `[0, 200]` MW with a valid reactive diagram.
pub(super) fn regulating_generator(id: &str) -> Generator {
    Generator {
        id: id.to_string(),
        voltage_regulation_on: true,
        points: vec![],
        qmin: -50.0,
        qmax: 50.0,
        pmin: 0.0,
        pmax: 200.0,
        target_p: -100.0,
        ..Default::default()
    }
}

/// A regulating static var compensator.
pub(super) fn regulating_svarc(id: &str) -> StaticVarCompensator {
    StaticVarCompensator {
        id: id.to_string(),
        regulating_voltage: true,
        b_min: -0.01,
        b_max: 0.01,
        voltage_set_point: 400.0,
        u_nom: 400.0,
        ..Default::default()
    }
}

pub(super) fn lcc_converter(id: &str, bus_id: &str) -> Converter {
    Converter {
        id: id.to_string(),
        bus_id: bus_id.to_string(),
        station: ConverterStation::Lcc(LccStation { power_factor: 0.8 }),
    }
}

pub(super) fn vsc_converter(id: &str, bus_id: &str, voltage_regulation_on: bool) -> Converter {
    Converter {
        id: id.to_string(),
        bus_id: bus_id.to_string(),
        station: ConverterStation::Vsc(VscStation {
            voltage_regulation_on,
            qmin: -100.0,
            qmax: 100.0,
            q: 0.0,
            points: vec![],
        }),
    }
}

pub(super) fn droop(droop: f64) -> Option<ActivePowerControl> {
    Some(ActivePowerControl { droop, p0: 50.0 })
}
