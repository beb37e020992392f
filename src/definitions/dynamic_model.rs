// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Dynamic automaton wiring, resolved against the network.

use std::collections::{BTreeMap, BTreeSet};

/// The kind of network element a macro connection is wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MacroElementType {
    Node,
    Line,
    Tfo,
    Shunt,
    Generator,
    Load,
    Hvdc,
    Automaton,
}

/// A resolved macro connection of a dynamic automaton.
///
/// Ordered by macro connection id, then element type, then connected element
/// id, so a set of these iterates the same way on every run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacroConnection {
    /// The id of the macro connection declared in the assembling data.
    pub id: String,
    pub element_type: MacroElementType,
    pub connected_element_id: String,
}

impl MacroConnection {
    pub fn new(id: &str, element_type: MacroElementType, connected_element_id: &str) -> Self {
        Self {
            id: id.to_string(),
            element_type,
            connected_element_id: connected_element_id.to_string(),
        }
    }
}

/// A dynamic automaton together with the network elements it is wired to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicModelDefinition {
    pub id: String,
    pub lib: String,
    pub node_connections: BTreeSet<MacroConnection>,
}

impl DynamicModelDefinition {
    pub fn new(id: &str, lib: &str) -> Self {
        Self {
            id: id.to_string(),
            lib: lib.to_string(),
            node_connections: BTreeSet::new(),
        }
    }

    /// Returns whether the automaton is wired through the given macro
    /// connection id.
    pub fn is_connected_through(&self, macro_connection_id: &str) -> bool {
        self.node_connections
            .iter()
            .any(|connection| connection.id == macro_connection_id)
    }
}

/// The resolved dynamic automatons, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicModelDefinitions {
    pub models: BTreeMap<String, DynamicModelDefinition>,
    /// Ids of the macro connections used by at least one resolved
    /// connection.
    pub used_macro_connections: BTreeSet<String>,
}

impl DynamicModelDefinitions {
    /// Records a resolved connection, creating the automaton's definition on
    /// its first connection.
    pub(crate) fn connect(&mut self, automaton_id: &str, lib: &str, connection: MacroConnection) {
        self.used_macro_connections.insert(connection.id.clone());
        self.models
            .entry(automaton_id.to_string())
            .or_insert_with(|| DynamicModelDefinition::new(automaton_id, lib))
            .node_connections
            .insert(connection);
    }

    /// Recomputes the used macro connection ids from the remaining
    /// connections.
    pub(crate) fn refresh_used_macro_connections(&mut self) {
        self.used_macro_connections = self
            .models
            .values()
            .flat_map(|model| model.node_connections.iter())
            .map(|connection| connection.id.clone())
            .collect();
    }
}
