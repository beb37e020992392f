// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Builders deciding the dynamic models of the network equipment, and wiring
//! the configured automatons to the network.

mod contingencies;
mod dynamic_models;
mod filter;
mod generators;
mod hvdc;
mod loads;
mod svarcs;

pub(crate) use contingencies::ContingencyValidator;
pub use contingencies::ValidContingencies;
pub(crate) use dynamic_models::DynamicModelResolver;
pub(crate) use filter::DynamicModelFilter;
pub(crate) use generators::GeneratorClassifier;
pub use generators::GeneratorDefinitions;
pub(crate) use hvdc::HvdcClassifier;
pub use hvdc::HvdcLineDefinitions;
pub(crate) use loads::LoadClassifier;
pub(crate) use svarcs::SvarcClassifier;
