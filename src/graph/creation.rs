// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`NetworkGraph`] instances from given nodes, branches
//! and HVDC lines.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::UnGraph;

use crate::network::{Branch, HvdcLine, Node};
use crate::Error;

use super::{ConverterRef, NetworkGraph, NodeIndexMap};

/// `NetworkGraph` instantiation.
impl NetworkGraph {
    /// Creates a new [`NetworkGraph`] from the given nodes, branches and HVDC
    /// lines.
    ///
    /// Returns an error if an id is used twice, or if a branch or a converter
    /// references a node that doesn't exist.
    pub fn try_new<
        NodeIterator: IntoIterator<Item = Node>,
        BranchIterator: IntoIterator<Item = Branch>,
        HvdcIterator: IntoIterator<Item = HvdcLine>,
    >(
        nodes: NodeIterator,
        branches: BranchIterator,
        hvdc_lines: HvdcIterator,
    ) -> Result<Self, Error> {
        let (graph, node_indices) = Self::create_graph(nodes)?;

        let mut voltage_levels: HashMap<String, Vec<_>> = HashMap::new();
        for (index, node) in graph.node_indices().zip(graph.raw_nodes()) {
            voltage_levels
                .entry(node.weight.voltage_level_id.clone())
                .or_default()
                .push(index);
        }

        let mut ng = Self {
            graph,
            node_indices,
            voltage_levels,
            lines: BTreeMap::new(),
            transformers: BTreeMap::new(),
            hvdc_lines: BTreeMap::new(),
            attachments: HashMap::new(),
            slack_node_id: None,
        };
        ng.add_branches(branches)?;
        ng.add_hvdc_lines(hvdc_lines)?;

        Ok(ng)
    }

    /// Declares the slack node chosen by the network data.
    ///
    /// It is used by the analysis unless automatic slack selection is
    /// requested.
    pub fn set_slack_node(&mut self, node_id: &str) -> Result<(), Error> {
        if !self.node_indices.contains_key(node_id) {
            return Err(Error::node_not_found(format!(
                "Slack node {node_id} not found."
            )));
        }
        self.slack_node_id = Some(node_id.to_string());
        Ok(())
    }

    fn create_graph(
        nodes: impl IntoIterator<Item = Node>,
    ) -> Result<(UnGraph<Node, ()>, NodeIndexMap), Error> {
        let mut graph = UnGraph::new_undirected();
        let mut indices = NodeIndexMap::new();
        let mut equipment_ids = HashSet::new();

        for node in nodes {
            if indices.contains_key(&node.id) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node ID found: {}",
                    node.id
                )));
            }
            let ids = node
                .generators
                .iter()
                .map(|g| ("generator", &g.id))
                .chain(node.loads.iter().map(|l| ("load", &l.id)))
                .chain(node.shunts.iter().map(|s| ("shunt", &s.id)))
                .chain(node.svarcs.iter().map(|s| ("static var compensator", &s.id)))
                .chain(node.dangling_lines.iter().map(|d| ("dangling line", &d.id)))
                .chain(node.busbar_sections.iter().map(|b| ("busbar section", &b.id)));
            for (kind, id) in ids {
                if !equipment_ids.insert((kind, id.clone())) {
                    return Err(Error::invalid_graph(format!(
                        "Duplicate {kind} ID found: {id}"
                    )));
                }
            }

            let id = node.id.clone();
            let idx = graph.add_node(node);
            indices.insert(id, idx);
        }

        Ok((graph, indices))
    }

    fn add_branches(&mut self, branches: impl IntoIterator<Item = Branch>) -> Result<(), Error> {
        let mut coupling_ids = HashSet::new();

        for branch in branches {
            let bid = branch.id().to_string();
            let node_ids = branch.node_ids();

            if let Branch::Transformer(_) = &branch {
                if !(2..=3).contains(&node_ids.len()) {
                    return Err(Error::invalid_connection(format!(
                        "Transformer {bid} must connect 2 or 3 nodes, found {}.",
                        node_ids.len()
                    )));
                }
            }

            let mut indices = Vec::with_capacity(node_ids.len());
            for nid in &node_ids {
                let index = self.node_indices.get(*nid).ok_or_else(|| {
                    Error::invalid_connection(format!(
                        "Branch {bid}: Can't find a node with ID {nid}"
                    ))
                })?;
                if indices.contains(index) {
                    return Err(Error::invalid_connection(format!(
                        "Branch {bid}: Can't connect node {nid} to itself."
                    )));
                }
                indices.push(*index);
            }

            for (pos, a) in indices.iter().enumerate() {
                for b in &indices[pos + 1..] {
                    self.graph.add_edge(*a, *b, ());
                }
            }

            let duplicate = match branch {
                Branch::Line(line) => {
                    for index in &indices {
                        self.attachments.entry(*index).or_default().lines.push(bid.clone());
                    }
                    self.lines.insert(bid.clone(), line).is_some()
                }
                Branch::Transformer(tfo) => {
                    for index in &indices {
                        self.attachments
                            .entry(*index)
                            .or_default()
                            .transformers
                            .push(bid.clone());
                    }
                    self.transformers.insert(bid.clone(), tfo).is_some()
                }
                Branch::Coupling(_) => !coupling_ids.insert(bid.clone()),
            };
            if duplicate {
                return Err(Error::invalid_graph(format!(
                    "Duplicate branch ID found: {bid}"
                )));
            }
        }

        Ok(())
    }

    fn add_hvdc_lines(&mut self, hvdc_lines: impl IntoIterator<Item = HvdcLine>) -> Result<(), Error> {
        for line in hvdc_lines {
            let lid = line.id.clone();

            if self.hvdc_lines.contains_key(&lid) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate HVDC line ID found: {lid}"
                )));
            }
            if line.converter1.converter_type() != line.converter2.converter_type() {
                return Err(Error::invalid_hvdc_line(format!(
                    "HVDC line {lid} mixes {} and {} converters.",
                    line.converter1.converter_type(),
                    line.converter2.converter_type()
                )));
            }
            if line.converter1.id == line.converter2.id {
                return Err(Error::invalid_hvdc_line(format!(
                    "HVDC line {lid} uses converter {} on both sides.",
                    line.converter1.id
                )));
            }

            for converter in [&line.converter1, &line.converter2] {
                let index = self.node_indices.get(&converter.bus_id).ok_or_else(|| {
                    Error::invalid_connection(format!(
                        "HVDC line {lid}: Can't find a node with ID {}",
                        converter.bus_id
                    ))
                })?;
                self.attachments
                    .entry(*index)
                    .or_default()
                    .converters
                    .push(ConverterRef {
                        hvdc_line_id: lid.clone(),
                        converter_id: converter.id.clone(),
                    });
            }

            self.hvdc_lines.insert(lid, line);
        }

        Ok(())
    }
}
