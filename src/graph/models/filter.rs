// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for dropping the dynamic automatons that
//! could only be partially wired to the network.

use std::collections::HashSet;

use petgraph::graph::NodeIndex;

use crate::assembling::{AssemblingDataBase, DynamicAutomaton};
use crate::definitions::{
    DynamicModelDefinition, DynamicModelDefinitions, MacroConnection, MacroElementType,
};
use crate::graph::GeneratorDefinitions;
use crate::NetworkGraph;

pub(crate) struct DynamicModelFilter<'a> {
    assembling: &'a AssemblingDataBase,
    /// The elements of the main connected component an automaton can be
    /// wired to, generators excepted.
    reachable: HashSet<(MacroElementType, &'a str)>,
}

impl<'a> DynamicModelFilter<'a> {
    pub fn new(
        graph: &'a NetworkGraph,
        assembling: &'a AssemblingDataBase,
        main: &[NodeIndex],
    ) -> Self {
        let mut reachable = HashSet::new();
        for &index in main {
            let node = graph.node_at(index);
            reachable.insert((MacroElementType::Node, node.id.as_str()));
            for shunt in &node.shunts {
                reachable.insert((MacroElementType::Shunt, shunt.id.as_str()));
            }
            for load in &node.loads {
                reachable.insert((MacroElementType::Load, load.id.as_str()));
            }
            if let Some(attachments) = graph.attachments(index) {
                for line in &attachments.lines {
                    reachable.insert((MacroElementType::Line, line.as_str()));
                }
                for tfo in &attachments.transformers {
                    reachable.insert((MacroElementType::Tfo, tfo.as_str()));
                }
                for converter in &attachments.converters {
                    reachable.insert((MacroElementType::Hvdc, converter.hvdc_line_id.as_str()));
                }
            }
        }

        Self {
            assembling,
            reachable,
        }
    }

    /// Filters the resolved automatons in place.
    ///
    /// Connections to elements outside of the main connected component, or
    /// to generators without a model, are dropped first.  Generators wired to
    /// a secondary voltage controller that can't measure any bus voltage lose
    /// their reactive power control loop.
    pub fn build(self, models: &mut DynamicModelDefinitions, generators: &mut GeneratorDefinitions) {
        self.remove_unreachable_connections(models, generators);
        if self.assembling.contains_svc() {
            self.remove_unmeasured_svcs(models, generators);
        }
        self.remove_partially_connected(models, generators);
        models.refresh_used_macro_connections();
    }

    fn reaches(&self, connection: &MacroConnection, generators: &GeneratorDefinitions) -> bool {
        match connection.element_type {
            MacroElementType::Generator => {
                generators.get(&connection.connected_element_id).is_some()
            }
            MacroElementType::Automaton => true,
            element_type => self
                .reachable
                .contains(&(element_type, connection.connected_element_id.as_str())),
        }
    }

    fn remove_unreachable_connections(
        &self,
        models: &mut DynamicModelDefinitions,
        generators: &GeneratorDefinitions,
    ) {
        for model in models.models.values_mut() {
            let DynamicModelDefinition {
                id,
                node_connections,
                ..
            } = model;
            node_connections.retain(|connection| {
                let reached = self.reaches(connection, generators);
                if !reached {
                    tracing::debug!(
                        "Automaton {}: {:?} {} is not modelled in the main connected component, \
                         macro connection {} dropped.",
                        id,
                        connection.element_type,
                        connection.connected_element_id,
                        connection.id
                    );
                }
                reached
            });
        }
        models
            .models
            .retain(|_, model| !model.node_connections.is_empty());
    }

    fn remove_unmeasured_svcs(
        &self,
        models: &mut DynamicModelDefinitions,
        generators: &mut GeneratorDefinitions,
    ) {
        let unmeasured = models
            .models
            .values()
            .filter(|model| {
                self.assembling
                    .dynamic_automatons()
                    .get(&model.id)
                    .is_some_and(DynamicAutomaton::is_svc)
            })
            .filter(|model| !self.measures_bus_voltage(model))
            .map(|model| model.id.clone())
            .collect::<Vec<_>>();

        for svc_id in unmeasured {
            let Some(model) = models.models.remove(&svc_id) else {
                continue;
            };
            tracing::debug!("SVC {} is not connected to any bus, removed.", svc_id);
            for connection in &model.node_connections {
                if let Some(generator) = generators.get_mut(&connection.connected_element_id) {
                    generator.remove_rpcl();
                }
            }
        }
    }

    /// Returns true if one of the bus macro connects of the automaton got a
    /// connection.
    fn measures_bus_voltage(&self, model: &DynamicModelDefinition) -> bool {
        let Some(automaton) = self.assembling.dynamic_automatons().get(&model.id) else {
            return false;
        };
        automaton.macro_connects.iter().any(|macro_connect| {
            self.assembling
                .single_association(&macro_connect.id)
                .is_some_and(|assoc| assoc.is_bus())
                && model.is_connected_through(&macro_connect.macro_connection)
        })
    }

    fn remove_partially_connected(
        &self,
        models: &mut DynamicModelDefinitions,
        generators: &GeneratorDefinitions,
    ) {
        for automaton in self.assembling.dynamic_automatons().values() {
            let Some(model) = models.models.get_mut(&automaton.id) else {
                continue;
            };

            if automaton.is_svc() {
                model.node_connections.retain(|connection| {
                    if connection.element_type != MacroElementType::Generator {
                        return true;
                    }
                    match generators.get(&connection.connected_element_id) {
                        Some(generator) if generator.is_network() => {
                            tracing::debug!(
                                "Generator {} has a network model, disconnected from SVC {}.",
                                connection.connected_element_id,
                                automaton.id
                            );
                            false
                        }
                        Some(generator) if !generator.has_rpcl() => {
                            tracing::debug!(
                                "Generator {} regulates a bus shared with other generators, \
                                 disconnected from SVC {}.",
                                connection.connected_element_id,
                                automaton.id
                            );
                            false
                        }
                        Some(_) => true,
                        None => false,
                    }
                });
                if model.node_connections.len() <= 1 {
                    tracing::debug!("SVC {} has nothing left to control, removed.", automaton.id);
                    models.models.remove(&automaton.id);
                }
                continue;
            }

            let missing = automaton
                .macro_connects
                .iter()
                .find(|mc| !model.is_connected_through(&mc.macro_connection));
            if let Some(macro_connect) = missing {
                tracing::debug!(
                    "Automaton {} is partially connected: macro connection {} unresolved, removed.",
                    automaton.id,
                    macro_connect.macro_connection
                );
                models.models.remove(&automaton.id);
            }
        }
    }
}
