// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for choosing generator models.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::NodeIndex;

use crate::assembling::ControlLoop;
use crate::definitions::{Family, GeneratorDefinition, GeneratorModel, ReactiveLimits};
use crate::graph::{BusRegulationMap, RegulationCount};
use crate::network::{Generator, Node};
use crate::numeric::{approx_eq, approx_ge, approx_le};
use crate::{AnalysisConfig, Error, NetworkGraph, SwitchConnectivity};

/// The generator models of the main connected component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneratorDefinitions {
    /// One definition per generator, in node traversal order.
    pub definitions: Vec<GeneratorDefinition>,
    /// For each bus regulated by several generators, the first generator
    /// found regulating it.
    pub buses_regulated_by_several_generators: BTreeMap<String, String>,
    /// Whether at least one generator got a model other than `Network`.
    pub at_least_one_generator_regulating: bool,
}

impl GeneratorDefinitions {
    pub fn get(&self, generator_id: &str) -> Option<&GeneratorDefinition> {
        self.definitions.iter().find(|d| d.id == generator_id)
    }

    pub(crate) fn get_mut(&mut self, generator_id: &str) -> Option<&mut GeneratorDefinition> {
        self.definitions.iter_mut().find(|d| d.id == generator_id)
    }
}

pub(crate) struct GeneratorClassifier<'a> {
    graph: &'a NetworkGraph,
    config: &'a AnalysisConfig,
    switches: &'a dyn SwitchConnectivity,
    regulation: &'a BusRegulationMap,
    control_loops: HashMap<String, ControlLoop>,
}

impl<'a> GeneratorClassifier<'a> {
    pub fn new(
        graph: &'a NetworkGraph,
        config: &'a AnalysisConfig,
        switches: &'a dyn SwitchConnectivity,
        regulation: &'a BusRegulationMap,
        control_loops: HashMap<String, ControlLoop>,
    ) -> Self {
        Self {
            graph,
            config,
            switches,
            regulation,
            control_loops,
        }
    }

    /// Chooses a model for every generator of the given nodes.
    ///
    /// Fails when a generator connected above the transformer voltage level
    /// regulates a remote bus.
    pub fn build(self, nodes: &[NodeIndex]) -> Result<GeneratorDefinitions, Error> {
        let mut result = GeneratorDefinitions::default();

        for index in nodes {
            let node = self.graph.node_at(*index);
            for generator in &node.generators {
                let model = if is_target_p_valid(generator)
                    && generator.voltage_regulation_on
                    && self.is_diagram_valid(generator)
                {
                    result.at_least_one_generator_regulating = true;
                    self.regulating_model(node, generator, &mut result)?
                } else {
                    GeneratorModel::Network
                };

                result.definitions.push(GeneratorDefinition {
                    id: generator.id.clone(),
                    model,
                    node_id: node.id.clone(),
                    points: generator.points.clone(),
                    qmin: generator.qmin,
                    qmax: generator.qmax,
                    pmin: generator.pmin,
                    pmax: generator.pmax,
                    q: generator.q,
                    target_p: generator.target_p,
                    regulated_bus_id: generator.regulated_bus_id.clone(),
                    is_nuclear: generator.is_nuclear,
                });
            }
        }

        Ok(result)
    }

    fn regulating_model(
        &self,
        node: &Node,
        generator: &Generator,
        result: &mut GeneratorDefinitions,
    ) -> Result<GeneratorModel, Error> {
        let limits = self.reactive_limits(generator);
        let control_loop = self.control_loops.get(&generator.id).copied();

        if approx_ge(generator.nominal_voltage, self.config.tfo_voltage_level) {
            if generator.regulates_remotely() {
                return Err(Error::unsupported_regulation(format!(
                    "Generator {} at {} kV regulates the remote bus {}.",
                    generator.id, generator.nominal_voltage, generator.regulated_bus_id
                )));
            }
            return Ok(GeneratorModel::compose(
                Family::SignalNTfo,
                limits,
                control_loop,
            ));
        }

        let count = if node.generators.len() == 1 && self.is_other_generator_switch_connected(node)
        {
            RegulationCount::Multiples
        } else {
            self.regulation
                .get(&generator.regulated_bus_id)
                .copied()
                .unwrap_or_else(|| {
                    tracing::debug!(
                        "Bus {} regulated by generator {} has no regulation count, assuming one.",
                        generator.regulated_bus_id,
                        generator.id
                    );
                    RegulationCount::One
                })
        };

        let family = match count {
            RegulationCount::Multiples => {
                result
                    .buses_regulated_by_several_generators
                    .entry(generator.regulated_bus_id.clone())
                    .or_insert_with(|| generator.id.clone());
                Family::Prop
            }
            RegulationCount::One if generator.regulates_remotely() => Family::Remote,
            RegulationCount::One => Family::SignalN,
        };

        Ok(GeneratorModel::compose(family, limits, control_loop))
    }

    fn is_other_generator_switch_connected(&self, node: &Node) -> bool {
        self.switches
            .buses_connected_by_switch(&node.id, &node.voltage_level_id)
            .iter()
            .filter_map(|id| self.graph.node(id).ok())
            .any(|n| !n.generators.is_empty())
    }

    fn reactive_limits(&self, generator: &Generator) -> ReactiveLimits {
        if self.config.use_infinite_reactive_limits {
            ReactiveLimits::Infinite
        } else if generator
            .points
            .windows(2)
            .all(|w| approx_eq(w[0].qmin, w[1].qmin) && approx_eq(w[0].qmax, w[1].qmax))
        {
            ReactiveLimits::Rectangular
        } else {
            ReactiveLimits::Diagram
        }
    }

    fn is_diagram_valid(&self, generator: &Generator) -> bool {
        if self.config.use_infinite_reactive_limits {
            return true;
        }

        let id = &generator.id;
        match generator.points.as_slice() {
            [] => {
                if approx_eq(generator.pmin, generator.pmax) {
                    tracing::warn!("Generator {id}: invalid diagram, all P values are equal.");
                    return false;
                }
                if approx_eq(generator.qmin, generator.qmax) {
                    tracing::warn!("Generator {id}: invalid diagram, qmin equals qmax.");
                    return false;
                }
                true
            }
            [_] => {
                tracing::warn!("Generator {id}: invalid diagram, it has a single point.");
                false
            }
            points => {
                let first_p = points[0].p;
                let all_p_equal = points.iter().all(|pt| approx_eq(pt.p, first_p));
                let all_q_flat = points.iter().all(|pt| approx_eq(pt.qmin, pt.qmax));
                match (all_p_equal, all_q_flat) {
                    (true, true) => tracing::warn!(
                        "Generator {id}: invalid diagram, all P values are equal and qmin equals qmax."
                    ),
                    (false, true) => {
                        tracing::warn!("Generator {id}: invalid diagram, qmin equals qmax.")
                    }
                    (true, false) => {
                        tracing::warn!("Generator {id}: invalid diagram, all P values are equal.")
                    }
                    (false, false) => return true,
                }
                false
            }
        }
    }
}

/// The set point must lie within the active power range.  `target_p` is
/// counted positive when consumed, hence the sign change.
fn is_target_p_valid(generator: &Generator) -> bool {
    approx_ge(-generator.target_p, generator.pmin) && approx_le(-generator.target_p, generator.pmax)
}
