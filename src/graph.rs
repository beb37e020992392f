// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the nodes of a power grid, and the branches and
//! HVDC lines between them.

mod analysis;
mod creation;
pub mod iterators;
mod models;
mod regulation;
mod retrieval;
mod traversal;

#[cfg(test)]
mod test_utils;

use crate::network::{HvdcLine, Line, Node, Transformer};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashMap};

pub use analysis::{Analysis, AnalysisResults};
pub(crate) use models::{
    ContingencyValidator, DynamicModelFilter, DynamicModelResolver, GeneratorClassifier,
    HvdcClassifier, LoadClassifier, SvarcClassifier,
};
pub use models::{GeneratorDefinitions, HvdcLineDefinitions, ValidContingencies};
pub use regulation::{BusRegulationMap, RegulationCount};

/// `Node`s stored in an `UnGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node id, so
/// that Nodes in the `UnGraph` can be retrieved from their ids.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A reference to a converter of an HVDC line, as seen from the node it sits
/// on.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConverterRef {
    pub(crate) hvdc_line_id: String,
    pub(crate) converter_id: String,
}

/// The equipment attached to a node that is stored outside of the node
/// itself, because it spans several nodes.
#[derive(Clone, Debug, Default)]
pub(crate) struct Attachments {
    pub(crate) lines: Vec<String>,
    pub(crate) transformers: Vec<String>,
    pub(crate) converters: Vec<ConverterRef>,
}

/// A graph representation of the nodes of a power grid and the branches
/// between them.
///
/// Every traversal follows the insertion order of the nodes, so two runs over
/// the same network always produce the same results.
pub struct NetworkGraph {
    graph: UnGraph<Node, ()>,
    node_indices: NodeIndexMap,
    voltage_levels: HashMap<String, Vec<NodeIndex>>,
    lines: BTreeMap<String, Line>,
    transformers: BTreeMap<String, Transformer>,
    hvdc_lines: BTreeMap<String, HvdcLine>,
    attachments: HashMap<NodeIndex, Attachments>,
    slack_node_id: Option<String>,
}
