// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and neighbours in a `NetworkGraph`.

use petgraph::graph::UnGraph;

use crate::network::Node;

/// An iterator over the nodes in a `NetworkGraph`, in insertion order.
pub struct Nodes<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<Node>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the neighbours of a node in a `NetworkGraph`.
///
/// A neighbour linked through several parallel branches is returned once per
/// branch.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a UnGraph<Node, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
