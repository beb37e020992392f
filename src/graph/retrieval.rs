// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and equipment from a [`NetworkGraph`].

use petgraph::graph::NodeIndex;

use crate::iterators::{Neighbors, Nodes};
use crate::network::{HvdcLine, Line, Node, Transformer};
use crate::{Error, NetworkGraph};

use super::Attachments;

/// `Node` and equipment retrieval.
impl NetworkGraph {
    /// Returns the node with the given `node_id`, if it exists.
    pub fn node(&self, node_id: &str) -> Result<&Node, Error> {
        self.node_indices
            .get(node_id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))
    }

    /// Returns an iterator over the nodes in the graph, in insertion order.
    pub fn nodes(&self) -> Nodes {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the *neighbours* of the node with the given
    /// `node_id`.
    ///
    /// Returns an error if the given `node_id` does not exist.
    pub fn neighbors(&self, node_id: &str) -> Result<Neighbors, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors(index),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {node_id} not found.")))
    }

    /// Returns the nodes of the given voltage level, in insertion order.
    pub fn voltage_level_nodes(&self, voltage_level_id: &str) -> impl Iterator<Item = &Node> {
        self.voltage_levels
            .get(voltage_level_id)
            .into_iter()
            .flatten()
            .map(|i| &self.graph[*i])
    }

    pub fn line(&self, line_id: &str) -> Option<&Line> {
        self.lines.get(line_id)
    }

    pub fn transformer(&self, transformer_id: &str) -> Option<&Transformer> {
        self.transformers.get(transformer_id)
    }

    pub fn hvdc_line(&self, hvdc_line_id: &str) -> Option<&HvdcLine> {
        self.hvdc_lines.get(hvdc_line_id)
    }

    /// Returns the lines of the network, ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Returns the transformers of the network, ordered by id.
    pub fn transformers(&self) -> impl Iterator<Item = &Transformer> {
        self.transformers.values()
    }

    /// Returns the HVDC lines of the network, ordered by id.
    pub fn hvdc_lines(&self) -> impl Iterator<Item = &HvdcLine> {
        self.hvdc_lines.values()
    }

    /// Returns the slack node declared by the network data, if any.
    pub fn declared_slack_node(&self) -> Option<&str> {
        self.slack_node_id.as_deref()
    }

    pub(crate) fn index_of(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_indices.get(node_id).copied()
    }

    pub(crate) fn node_at(&self, index: NodeIndex) -> &Node {
        &self.graph[index]
    }

    /// Returns the lines, transformers and converters attached to the node at
    /// the given index.
    pub(crate) fn attachments(&self, index: NodeIndex) -> Option<&Attachments> {
        self.attachments.get(&index)
    }

    pub(crate) fn node_indices_in_order(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Branch, Coupling, Transformer};

    fn graph() -> Result<NetworkGraph, Error> {
        NetworkGraph::try_new(
            vec![
                Node::new("B1", "VL1", 400.0),
                Node::new("B2", "VL2", 225.0),
                Node::new("B3", "VL1", 400.0),
            ],
            vec![
                Branch::from(Line::new("L1", "B1", "B2")),
                Line::new("L2", "B1", "B2").into(),
                Transformer::new("T1", ["B2", "B3"]).into(),
                Coupling::new("C1", "B1", "B3").into(),
            ],
            vec![],
        )
    }

    #[test]
    fn test_node() -> Result<(), Error> {
        let graph = graph()?;

        assert_eq!(graph.node("B2")?.voltage_level_id, "VL2");
        assert!(graph
            .node("B9")
            .is_err_and(|e| e == Error::node_not_found("Node with id B9 not found.")));
        assert_eq!(
            graph.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["B1", "B2", "B3"]
        );
        assert_eq!(
            graph
                .voltage_level_nodes("VL1")
                .map(|n| n.id.as_str())
                .collect::<Vec<_>>(),
            vec!["B1", "B3"]
        );
        assert_eq!(graph.voltage_level_nodes("VL9").count(), 0);

        Ok(())
    }

    #[test]
    fn test_neighbors() -> Result<(), Error> {
        let graph = graph()?;

        let mut neighbors = graph.neighbors("B1")?.map(|n| n.id.as_str()).collect::<Vec<_>>();
        neighbors.sort();
        assert_eq!(neighbors, vec!["B2", "B2", "B3"]);
        assert_eq!(graph.neighbors("B3")?.count(), 2);
        assert!(graph.neighbors("B9").is_err());

        Ok(())
    }

    #[test]
    fn test_equipment() -> Result<(), Error> {
        let graph = graph()?;

        assert_eq!(graph.line("L2").map(|l| l.node2.as_str()), Some("B2"));
        assert!(graph.line("C1").is_none());
        assert_eq!(graph.transformer("T1").map(|t| t.node_ids.len()), Some(2));
        assert_eq!(
            graph.lines().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["L1", "L2"]
        );
        assert_eq!(graph.transformers().count(), 1);
        assert_eq!(graph.hvdc_lines().count(), 0);
        assert_eq!(graph.declared_slack_node(), None);

        Ok(())
    }
}
