// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for wiring the configured dynamic
//! automatons to the network elements they act on.

use std::collections::{BTreeSet, HashMap};

use crate::assembling::{AssemblingDataBase, AssociatedElement, DynamicAutomaton};
use crate::definitions::{DynamicModelDefinitions, MacroConnection, MacroElementType};
use crate::network::Node;
use crate::{LibraryResolver, NetworkGraph, SwitchConnectivity};

/// An automaton macro connection waiting for the network element it names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingConnection {
    automaton_id: String,
    lib: String,
    macro_connection: String,
}

impl PendingConnection {
    fn new(automaton: &DynamicAutomaton, macro_connection: &str) -> Self {
        Self {
            automaton_id: automaton.id.clone(),
            lib: automaton.lib.clone(),
            macro_connection: macro_connection.to_string(),
        }
    }
}

type ByName = HashMap<String, Vec<PendingConnection>>;

/// The pending connections, indexed by the network element they name.
#[derive(Default)]
struct PendingIndex {
    /// By voltage level id.
    buses: HashMap<String, BTreeSet<PendingConnection>>,
    /// By voltage level id.
    voltage_level_shunts: ByName,
    shunts: ByName,
    lines: ByName,
    transformers: ByName,
    hvdc_lines: ByName,
    generators: ByName,
    loads: ByName,
}

fn push(index: &mut ByName, name: &str, pending: &PendingConnection) {
    index
        .entry(name.to_string())
        .or_default()
        .push(pending.clone());
}

pub(crate) struct DynamicModelResolver<'a> {
    graph: &'a NetworkGraph,
    switches: &'a dyn SwitchConnectivity,
    index: PendingIndex,
    definitions: DynamicModelDefinitions,
}

impl<'a> DynamicModelResolver<'a> {
    /// Indexes the macro connects of the automatons whose library can be
    /// loaded.
    ///
    /// Macro connects naming another automaton are connected right away.
    pub fn new(
        graph: &'a NetworkGraph,
        assembling: &AssemblingDataBase,
        libraries: &dyn LibraryResolver,
        switches: &'a dyn SwitchConnectivity,
        shunt_regulation_on: bool,
    ) -> Self {
        let mut index = PendingIndex::default();
        let mut definitions = DynamicModelDefinitions::default();

        for automaton in assembling.dynamic_automatons().values() {
            if !libraries.library_exists(&automaton.lib) {
                tracing::warn!(
                    "Library {} of automaton {} not found, automaton ignored.",
                    automaton.lib,
                    automaton.id
                );
                continue;
            }

            for macro_connect in &automaton.macro_connects {
                let pending = PendingConnection::new(automaton, &macro_connect.macro_connection);

                if let Some(assoc) = assembling.single_association(&macro_connect.id) {
                    for generator in &assoc.generators {
                        push(&mut index.generators, generator, &pending);
                    }
                    for load in &assoc.loads {
                        push(&mut index.loads, load, &pending);
                    }
                    match &assoc.element {
                        Some(AssociatedElement::Bus { voltage_level }) => {
                            index
                                .buses
                                .entry(voltage_level.clone())
                                .or_default()
                                .insert(pending);
                        }
                        Some(AssociatedElement::Line(name)) => push(&mut index.lines, name, &pending),
                        Some(AssociatedElement::HvdcLine { name, .. }) => {
                            push(&mut index.hvdc_lines, name, &pending)
                        }
                        Some(AssociatedElement::Transformer(name)) => {
                            push(&mut index.transformers, name, &pending)
                        }
                        Some(AssociatedElement::Shunt(name)) => push(&mut index.shunts, name, &pending),
                        None => {}
                    }
                } else if let Some(assoc) = assembling.multiple_association(&macro_connect.id) {
                    match &assoc.shunts_voltage_level {
                        Some(voltage_level) if shunt_regulation_on => {
                            push(&mut index.voltage_level_shunts, voltage_level, &pending)
                        }
                        _ => {}
                    }
                } else if assembling
                    .dynamic_automatons()
                    .contains_key(&macro_connect.id)
                {
                    definitions.connect(
                        &automaton.id,
                        &automaton.lib,
                        MacroConnection::new(
                            &macro_connect.macro_connection,
                            MacroElementType::Automaton,
                            &macro_connect.id,
                        ),
                    );
                } else {
                    tracing::debug!(
                        "Automaton {}: association {} not found, macro connect ignored.",
                        automaton.id,
                        macro_connect.id
                    );
                }
            }
        }

        Self {
            graph,
            switches,
            index,
            definitions,
        }
    }

    /// Resolves the pending connections against every node of the network,
    /// in node insertion order.
    pub fn build(mut self) -> DynamicModelDefinitions {
        let graph = self.graph;
        for index in graph.node_indices_in_order() {
            let node = graph.node_at(index);
            self.connect_buses(node);
            self.connect_voltage_level_shunts(node);

            for shunt in &node.shunts {
                Self::connect(&mut self.definitions, &self.index.shunts, &shunt.id, MacroElementType::Shunt);
            }
            if let Some(attachments) = graph.attachments(index) {
                for line in &attachments.lines {
                    Self::connect(&mut self.definitions, &self.index.lines, line, MacroElementType::Line);
                }
                for tfo in &attachments.transformers {
                    Self::connect(&mut self.definitions, &self.index.transformers, tfo, MacroElementType::Tfo);
                }
            }
            for generator in &node.generators {
                Self::connect(
                    &mut self.definitions,
                    &self.index.generators,
                    &generator.id,
                    MacroElementType::Generator,
                );
            }
            for load in &node.loads {
                Self::connect(&mut self.definitions, &self.index.loads, &load.id, MacroElementType::Load);
            }
            if let Some(attachments) = graph.attachments(index) {
                for converter in &attachments.converters {
                    Self::connect(
                        &mut self.definitions,
                        &self.index.hvdc_lines,
                        &converter.hvdc_line_id,
                        MacroElementType::Hvdc,
                    );
                }
            }
        }

        self.definitions
    }

    fn connect(
        definitions: &mut DynamicModelDefinitions,
        index: &ByName,
        element_id: &str,
        element_type: MacroElementType,
    ) {
        for pending in index.get(element_id).into_iter().flatten() {
            definitions.connect(
                &pending.automaton_id,
                &pending.lib,
                MacroConnection::new(&pending.macro_connection, element_type, element_id),
            );
        }
    }

    /// Bus macro connects of a voltage level are wired to its first
    /// energised node.
    fn connect_buses(&mut self, node: &Node) {
        let Some(pendings) = self.index.buses.get(&node.voltage_level_id) else {
            return;
        };
        let Some(bus) = self
            .graph
            .voltage_level_nodes(&node.voltage_level_id)
            .find(|n| self.switches.is_bus_connected(&n.id, &n.voltage_level_id))
        else {
            return;
        };

        for pending in pendings {
            self.definitions.connect(
                &pending.automaton_id,
                &pending.lib,
                MacroConnection::new(&pending.macro_connection, MacroElementType::Node, &bus.id),
            );
        }
    }

    fn connect_voltage_level_shunts(&mut self, node: &Node) {
        let Some(pendings) = self.index.voltage_level_shunts.get(&node.voltage_level_id) else {
            return;
        };
        for pending in pendings {
            for shunt in &node.shunts {
                self.definitions.connect(
                    &pending.automaton_id,
                    &pending.lib,
                    MacroConnection::new(&pending.macro_connection, MacroElementType::Shunt, &shunt.id),
                );
            }
        }
    }
}
