// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The model decisions produced for each piece of equipment, and the dynamic
//! automaton wiring.  These are the values handed to the writers of the
//! simulator configuration.

mod dynamic_model;
mod generator;
mod hvdc;
mod load;
mod svarc;

pub use dynamic_model::{
    DynamicModelDefinition, DynamicModelDefinitions, MacroConnection, MacroElementType,
};
pub use generator::{GeneratorDefinition, GeneratorModel};
pub(crate) use generator::{Family, ReactiveLimits};
pub(crate) use hvdc::HvdcControl;
pub use hvdc::{HvdcDefinition, HvdcModel, HvdcPosition, VscDefinition};
pub use load::{LoadDefinition, LoadModel};
pub use svarc::{SvarcDefinition, SvarcModel};
