// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The configuration of dynamic automatons: which automatons exist, which
//! library implements each of them, and the network elements they are wired
//! to through macro connections.
//!
//! The database is filled by the caller, usually from an assembling file.

use std::collections::{BTreeMap, HashMap};

/// Library of the secondary voltage controller automaton.
pub const SVC_LIBRARY: &str = "SecondaryVoltageControlSimp";

/// Property listing the single associations whose generators use the second
/// version of the reactive power control loop.
pub const RPCL2_PROPERTY: &str = "ReactivePowerControlLoop2";

/// A pair of variables connected by a macro connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub var1: String,
    pub var2: String,
}

/// A named, reusable set of variable connections.
#[derive(Clone, Debug, PartialEq)]
pub struct MacroConnection {
    pub id: String,
    pub connections: Vec<Connection>,
}

/// The side of an HVDC line a secondary voltage controller acts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConverterSide {
    #[default]
    Side1,
    Side2,
}

/// The network element a single association points to, besides its
/// generators and loads.
#[derive(Clone, Debug, PartialEq)]
pub enum AssociatedElement {
    /// A bus of the given voltage level.
    Bus { voltage_level: String },
    Line(String),
    Transformer(String),
    Shunt(String),
    HvdcLine {
        name: String,
        converter_side: ConverterSide,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SingleAssociation {
    pub id: String,
    pub element: Option<AssociatedElement>,
    pub generators: Vec<String>,
    pub loads: Vec<String>,
}

impl SingleAssociation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_element(mut self, element: AssociatedElement) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_generator(mut self, name: impl Into<String>) -> Self {
        self.generators.push(name.into());
        self
    }

    pub fn with_load(mut self, name: impl Into<String>) -> Self {
        self.loads.push(name.into());
        self
    }

    /// Returns true if the association points to a bus.
    pub fn is_bus(&self) -> bool {
        matches!(self.element, Some(AssociatedElement::Bus { .. }))
    }
}

/// An association to a set of elements.  Only the shunts of a voltage level
/// are supported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleAssociation {
    pub id: String,
    pub shunts_voltage_level: Option<String>,
}

/// A reference from an automaton to a macro connection and the association
/// (or other automaton) it is applied to.
#[derive(Clone, Debug, PartialEq)]
pub struct MacroConnect {
    pub macro_connection: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DynamicAutomaton {
    pub id: String,
    pub lib: String,
    pub macro_connects: Vec<MacroConnect>,
}

impl DynamicAutomaton {
    pub fn new(id: impl Into<String>, lib: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lib: lib.into(),
            macro_connects: vec![],
        }
    }

    /// Appends a macro connect, applying `macro_connection` to the association
    /// or automaton `id`.
    pub fn with_macro_connect(
        mut self,
        macro_connection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.macro_connects.push(MacroConnect {
            macro_connection: macro_connection.into(),
            id: id.into(),
        });
        self
    }

    /// Returns true if the automaton is a secondary voltage controller.
    pub fn is_svc(&self) -> bool {
        self.lib == SVC_LIBRARY
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Property {
    pub id: String,
    pub devices: Vec<String>,
}

/// Which reactive power control loop a generator takes part in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlLoop {
    Rpcl,
    Rpcl2,
}

/// All the dynamic automaton configuration of a run.
#[derive(Clone, Debug, Default)]
pub struct AssemblingDataBase {
    macro_connections: HashMap<String, MacroConnection>,
    single_associations: HashMap<String, SingleAssociation>,
    multiple_associations: HashMap<String, MultipleAssociation>,
    dynamic_automatons: BTreeMap<String, DynamicAutomaton>,
    properties: HashMap<String, Property>,
}

impl AssemblingDataBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_macro_connection(&mut self, macro_connection: MacroConnection) -> &mut Self {
        self.macro_connections
            .insert(macro_connection.id.clone(), macro_connection);
        self
    }

    pub fn add_single_association(&mut self, association: SingleAssociation) -> &mut Self {
        self.single_associations
            .insert(association.id.clone(), association);
        self
    }

    pub fn add_multiple_association(&mut self, association: MultipleAssociation) -> &mut Self {
        self.multiple_associations
            .insert(association.id.clone(), association);
        self
    }

    pub fn add_dynamic_automaton(&mut self, automaton: DynamicAutomaton) -> &mut Self {
        self.dynamic_automatons
            .insert(automaton.id.clone(), automaton);
        self
    }

    pub fn add_property(&mut self, property: Property) -> &mut Self {
        self.properties.insert(property.id.clone(), property);
        self
    }

    pub fn macro_connection(&self, id: &str) -> Option<&MacroConnection> {
        self.macro_connections.get(id)
    }

    pub fn single_association(&self, id: &str) -> Option<&SingleAssociation> {
        self.single_associations.get(id)
    }

    pub fn multiple_association(&self, id: &str) -> Option<&MultipleAssociation> {
        self.multiple_associations.get(id)
    }

    /// Returns the configured automatons, ordered by id.
    pub fn dynamic_automatons(&self) -> &BTreeMap<String, DynamicAutomaton> {
        &self.dynamic_automatons
    }

    pub fn property(&self, id: &str) -> Option<&Property> {
        self.properties.get(id)
    }

    /// Returns true if at least one secondary voltage controller is
    /// configured.
    pub fn contains_svc(&self) -> bool {
        self.dynamic_automatons.values().any(DynamicAutomaton::is_svc)
    }

    /// Returns the single associations referenced by the secondary voltage
    /// controllers.
    fn svc_single_associations(&self) -> impl Iterator<Item = &SingleAssociation> {
        self.dynamic_automatons
            .values()
            .filter(|a| a.is_svc())
            .flat_map(|a| a.macro_connects.iter())
            .filter_map(move |mc| self.single_associations.get(&mc.id))
    }

    /// Returns the generators controlled by a secondary voltage controller,
    /// with the control loop version they use.
    pub(crate) fn rpcl_generators(&self) -> HashMap<String, ControlLoop> {
        let mut generators: HashMap<String, ControlLoop> = self
            .svc_single_associations()
            .flat_map(|assoc| assoc.generators.iter())
            .map(|gen| (gen.clone(), ControlLoop::Rpcl))
            .collect();

        if let Some(property) = self.properties.get(RPCL2_PROPERTY) {
            for device in &property.devices {
                let Some(assoc) = self.single_associations.get(device) else {
                    tracing::debug!(
                        "Device {} of property {} is not a single association.",
                        device,
                        RPCL2_PROPERTY
                    );
                    continue;
                };
                for gen in &assoc.generators {
                    if let Some(control_loop) = generators.get_mut(gen) {
                        *control_loop = ControlLoop::Rpcl2;
                    }
                }
            }
        }

        generators
    }

    /// Returns the HVDC lines controlled by a secondary voltage controller,
    /// with the side of the line it acts on.
    pub(crate) fn svc_hvdc_lines(&self) -> HashMap<String, ConverterSide> {
        self.svc_single_associations()
            .filter_map(|assoc| match &assoc.element {
                Some(AssociatedElement::HvdcLine {
                    name,
                    converter_side,
                }) => Some((name.clone(), *converter_side)),
                _ => None,
            })
            .collect()
    }
}
