// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for keeping the contingencies whose
//! elements all exist in the main connected component.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::NodeIndex;

use crate::contingencies::{Contingency, ElementType};
use crate::definitions::{LoadDefinition, SvarcDefinition};
use crate::graph::GeneratorDefinitions;
use crate::NetworkGraph;

/// The contingencies that can be simulated on the main connected component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidContingencies {
    /// The kept contingencies, in input order.
    pub contingencies: Vec<Contingency>,
    /// Ids of the contingency elements that have a network model.
    pub network_elements: BTreeSet<String>,
}

pub(crate) struct ContingencyValidator<'a> {
    graph: &'a NetworkGraph,
    contingencies: &'a [Contingency],
    /// Element id to the positions of the contingencies naming it.
    element_contingencies: HashMap<&'a str, Vec<usize>>,
    /// Per contingency position, the ids of its elements found with a
    /// compatible type.
    validated: HashMap<usize, BTreeSet<String>>,
    network_elements: BTreeSet<String>,
}

impl<'a> ContingencyValidator<'a> {
    pub fn new(graph: &'a NetworkGraph, contingencies: &'a [Contingency]) -> Self {
        let mut element_contingencies: HashMap<&str, Vec<usize>> = HashMap::new();
        for (position, contingency) in contingencies.iter().enumerate() {
            for element in &contingency.elements {
                let positions = element_contingencies.entry(element.id.as_str()).or_default();
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }

        Self {
            graph,
            contingencies,
            element_contingencies,
            validated: HashMap::new(),
            network_elements: BTreeSet::new(),
        }
    }

    /// Marks the element as found in the network with the given type, for
    /// every contingency that declares it with a compatible type.
    fn mark_element_valid(&mut self, element_id: &str, actual: ElementType, is_network: bool) {
        let Some(positions) = self.element_contingencies.get(element_id) else {
            return;
        };
        for &position in positions {
            let declared = self.contingencies[position]
                .elements
                .iter()
                .find(|element| element.id == element_id);
            if !declared.is_some_and(|element| element.element_type.is_compatible(actual)) {
                continue;
            }
            self.validated
                .entry(position)
                .or_default()
                .insert(element_id.to_string());
            if is_network {
                self.network_elements.insert(element_id.to_string());
            }
        }
    }

    fn mark_nodes(&mut self, nodes: &[NodeIndex]) {
        let graph = self.graph;
        for &index in nodes {
            if let Some(attachments) = graph.attachments(index) {
                for line in &attachments.lines {
                    self.mark_element_valid(line, ElementType::Line, false);
                }
                for tfo_id in &attachments.transformers {
                    let element_type = match graph.transformer(tfo_id).map(|t| t.node_ids.len()) {
                        Some(2) => ElementType::TwoWindingsTransformer,
                        Some(3) => ElementType::ThreeWindingsTransformer,
                        _ => continue,
                    };
                    self.mark_element_valid(tfo_id, element_type, false);
                }
                for converter in &attachments.converters {
                    self.mark_element_valid(&converter.hvdc_line_id, ElementType::HvdcLine, false);
                }
            }

            let node = graph.node_at(index);
            for shunt in &node.shunts {
                self.mark_element_valid(&shunt.id, ElementType::ShuntCompensator, false);
            }
            for dangling_line in &node.dangling_lines {
                self.mark_element_valid(&dangling_line.id, ElementType::DanglingLine, false);
            }
            for busbar_section in &node.busbar_sections {
                self.mark_element_valid(&busbar_section.id, ElementType::BusbarSection, false);
            }
        }
    }

    fn mark_definitions(
        &mut self,
        loads: &[LoadDefinition],
        generators: &GeneratorDefinitions,
        svarcs: &[SvarcDefinition],
    ) {
        for load in loads {
            self.mark_element_valid(&load.id, ElementType::Load, load.is_network());
        }
        for generator in &generators.definitions {
            self.mark_element_valid(&generator.id, ElementType::Generator, generator.is_network());
        }
        for svarc in svarcs {
            self.mark_element_valid(&svarc.id, ElementType::StaticVarCompensator, svarc.is_network());
        }
    }

    /// Returns the contingencies all of whose elements were found, either on
    /// the given nodes or among the model definitions.
    pub fn build(
        mut self,
        nodes: &[NodeIndex],
        loads: &[LoadDefinition],
        generators: &GeneratorDefinitions,
        svarcs: &[SvarcDefinition],
    ) -> ValidContingencies {
        self.mark_nodes(nodes);
        self.mark_definitions(loads, generators, svarcs);

        let mut kept = vec![];
        for (position, contingency) in self.contingencies.iter().enumerate() {
            let Some(validated) = self.validated.get(&position) else {
                tracing::warn!(
                    "Contingency {} has no valid element, it won't be simulated.",
                    contingency.id
                );
                continue;
            };

            let mut valid = true;
            for element in &contingency.elements {
                if !validated.contains(&element.id) {
                    tracing::warn!(
                        "Contingency {}: element {} not found in the main connected component \
                         with type {}, the contingency won't be simulated.",
                        contingency.id,
                        element.id,
                        element.element_type
                    );
                    valid = false;
                }
            }
            if valid {
                kept.push(contingency.clone());
            }
        }

        ValidContingencies {
            contingencies: kept,
            network_elements: self.network_elements,
        }
    }
}
