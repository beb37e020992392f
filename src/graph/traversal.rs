// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the connectivity analysis: the main connected
//! component and the choice of the slack node.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::network::Node;
use crate::{Error, NetworkGraph};

/// Traversal methods.
impl NetworkGraph {
    /// Returns the nodes reachable from `from` through branches, in the order
    /// of an explicit-stack depth-first search.
    fn flood_fill(&self, from: NodeIndex, visited: &mut HashSet<NodeIndex>) -> Vec<NodeIndex> {
        let mut stack = vec![from];
        let mut found = vec![];
        visited.insert(from);

        while let Some(index) = stack.pop() {
            found.push(index);
            for neighbor in self.graph.neighbors(index) {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        found
    }

    /// Returns the indices of the nodes of the largest connected group, in
    /// node insertion order.
    ///
    /// When several groups have the same size, the first one found in node
    /// insertion order is kept.
    pub(crate) fn main_component_indices(&self) -> Vec<NodeIndex> {
        let mut visited = HashSet::new();
        let mut main: Vec<NodeIndex> = vec![];

        for index in self.graph.node_indices() {
            if visited.contains(&index) {
                continue;
            }
            let group = self.flood_fill(index, &mut visited);
            if group.len() > main.len() {
                main = group;
            }
        }

        main.sort_unstable();
        main
    }

    /// Returns the nodes of the largest electrically connected group of
    /// nodes, in insertion order.
    ///
    /// When several groups have the same size, the first one found in node
    /// insertion order is returned.
    pub fn main_connected_component(&self) -> Vec<&Node> {
        self.main_component_indices()
            .into_iter()
            .map(|i| &self.graph[i])
            .collect()
    }

    /// Picks the slack node among the given indices.
    ///
    /// Fictitious nodes are skipped, and the best candidate is replaced only
    /// by a node with a strictly greater `(nominal_voltage, neighbour count)`.
    pub(crate) fn slack_node_among(
        &self,
        indices: impl IntoIterator<Item = NodeIndex>,
    ) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64, usize)> = None;

        for index in indices {
            let node = &self.graph[index];
            if node.fictitious {
                continue;
            }
            let neighbors = self.graph.neighbors(index).count();
            let replace = match best {
                None => true,
                Some((_, voltage, count)) => {
                    node.nominal_voltage > voltage
                        || (node.nominal_voltage == voltage && neighbors > count)
                }
            };
            if replace {
                best = Some((index, node.nominal_voltage, neighbors));
            }
        }

        best.map(|(index, _, _)| index)
    }

    /// Returns the slack node among the given nodes: the non-fictitious node
    /// with the highest nominal voltage, and among those, the most neighbours.
    ///
    /// Returns an error if one of the given nodes is not part of the graph.
    pub fn slack_node<'a>(&'a self, nodes: &[&Node]) -> Result<Option<&'a Node>, Error> {
        let indices = nodes
            .iter()
            .map(|n| {
                self.index_of(&n.id)
                    .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", n.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.slack_node_among(indices).map(|i| &self.graph[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::NetworkBuilder;

    fn ids(nodes: &[&Node]) -> Vec<String> {
        let mut ids = nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        ids.sort();
        ids
    }

    #[test]
    fn test_main_connected_component() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 400.0);
        let b1 = builder.node("VL1", 400.0);
        let b2 = builder.node("VL2", 225.0);
        let b3 = builder.node("VL2", 225.0);
        let b4 = builder.node("VL3", 63.0);
        let b5 = builder.node("VL3", 63.0);
        let b6 = builder.node("VL3", 63.0);

        builder.line(&b4, &b5);
        builder.line(&b5, &b6);
        builder.line(&b0, &b1);
        builder.transformer(&[&b1, &b2]);
        builder.line(&b2, &b3);

        let graph = builder.build()?;
        let main = graph.main_connected_component();
        assert_eq!(ids(&main), vec![b0, b1, b2, b3]);

        Ok(())
    }

    #[test]
    fn test_main_connected_component_order() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 225.0);
        let b1 = builder.node("VL1", 225.0);
        let b2 = builder.node("VL1", 225.0);
        let b3 = builder.node("VL1", 225.0);

        // Chain b0 - b2 - b1 - b3, walked from b0.
        builder.line(&b0, &b2);
        builder.line(&b2, &b1);
        builder.line(&b1, &b3);

        let graph = builder.build()?;
        let main = graph
            .main_connected_component()
            .iter()
            .map(|n| n.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(main, vec![b0, b1, b2, b3]);

        Ok(())
    }

    #[test]
    fn test_main_connected_component_tie() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 63.0);
        let b1 = builder.node("VL1", 63.0);
        let b2 = builder.node("VL2", 400.0);
        let b3 = builder.node("VL2", 400.0);

        builder.line(&b2, &b3);
        builder.line(&b0, &b1);

        let graph = builder.build()?;
        assert_eq!(ids(&graph.main_connected_component()), vec![b0, b1]);

        let empty = NetworkBuilder::new().build()?;
        assert!(empty.main_connected_component().is_empty());

        Ok(())
    }

    #[test]
    fn test_slack_node() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 225.0);
        let b1 = builder.node("VL2", 400.0);
        let b2 = builder.node("VL2", 400.0);
        let b3 = builder.node("VL2", 400.0);
        let b4 = builder.node("VL3", 500.0);

        builder.line(&b0, &b1);
        builder.line(&b1, &b2);
        builder.line(&b2, &b3);
        builder.line(&b2, &b0);
        builder.line(&b3, &b4);
        builder.fictitious(&b4);

        let graph = builder.build()?;
        let nodes = graph.nodes().collect::<Vec<_>>();
        // b4 has the highest voltage but is fictitious, b2 has the most
        // neighbours among the 400 kV nodes.
        assert_eq!(graph.slack_node(&nodes)?.map(|n| n.id.clone()), Some(b2));

        let first_wins = graph
            .slack_node(&[graph.node(&b3)?, graph.node(&b1)?])?
            .map(|n| n.id.clone());
        assert_eq!(first_wins, Some(b3));

        assert_eq!(graph.slack_node(&[graph.node(&b4)?])?, None);
        assert_eq!(graph.slack_node(&[])?, None);

        let foreign = Node::new("B9", "VL9", 20.0);
        assert!(graph
            .slack_node(&[&foreign])
            .is_err_and(|e| e == Error::node_not_found("Node with id B9 not found.")));

        Ok(())
    }
}
