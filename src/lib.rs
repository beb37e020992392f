// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Frequenz Grid Model Graph

This is a library for deciding the dynamic models of the equipment of a power
network, before the network is handed to a dynamic simulator.

The network is represented as an undirected graph of nodes (buses), connected
by lines, transformers and bus couplers.  Generators, loads, shunts and static
var compensators are attached to the nodes, and HVDC lines connect nodes
through their converters.

## Building the graph

The main struct is [`NetworkGraph`], instances of which can be created by
passing the [`Node`][network::Node]s, [`Branch`][network::Branch]es and
[`HvdcLine`][network::HvdcLine]s of a network to the
[`try_new`][NetworkGraph::try_new] method.  It fails with an [`Error`] when ids
are duplicated or when a branch or a converter references an unknown node.

## Analysis

[`NetworkGraph::analysis`] returns a builder running every analysis step in
order:

- the main connected component and the slack node,
- the wiring of the configured dynamic automatons to the network elements
  they act on ([`assembling::AssemblingDataBase`]),
- the model of every generator, load, static var compensator and HVDC line of
  the main connected component,
- the removal of the automatons that could only be partially wired,
- the selection of the contingencies that can be simulated.

The switch topology inside voltage levels and the availability of automaton
libraries come from the caller, through the [`SwitchConnectivity`] and
[`LibraryResolver`] traits.

```
use frequenz_grid_model_graph::network::{Branch, Generator, HvdcLine, Line, Node};
use frequenz_grid_model_graph::definitions::GeneratorModel;
use frequenz_grid_model_graph::{AnalysisConfig, NetworkGraph};

let mut b0 = Node::new("B0", "VL1", 63.0);
b0.generators.push(Generator {
    id: "G0".into(),
    voltage_regulation_on: true,
    qmin: -50.0,
    qmax: 50.0,
    pmax: 200.0,
    target_p: -100.0,
    nominal_voltage: 63.0,
    regulated_bus_id: "B0".into(),
    connected_bus_id: "B0".into(),
    ..Default::default()
});
let b1 = Node::new("B1", "VL1", 63.0);

let graph = NetworkGraph::try_new(
    vec![b0, b1],
    vec![Branch::Line(Line::new("L0", "B0", "B1"))],
    Vec::<HvdcLine>::new(),
)
.unwrap();

let results = graph.analysis(AnalysisConfig::default()).run().unwrap();
assert_eq!(results.slack_node.as_deref(), Some("B0"));
assert_eq!(
    results.generators.get("G0").map(|g| g.model),
    Some(GeneratorModel::SignalNRectangular)
);
```
*/

pub mod assembling;
pub mod contingencies;
pub mod definitions;
pub mod network;
pub mod services;

mod config;
pub use config::AnalysisConfig;

mod graph;
pub use graph::{
    iterators, Analysis, AnalysisResults, BusRegulationMap, GeneratorDefinitions,
    HvdcLineDefinitions, NetworkGraph, RegulationCount, ValidContingencies,
};

mod service_traits;
pub use service_traits::{LibraryResolver, SwitchConnectivity};

mod error;
pub use error::Error;

mod numeric;
