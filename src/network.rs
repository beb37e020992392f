// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The records describing a power network: nodes with the equipment attached
//! to them, the branches between nodes, and HVDC lines.
//!
//! These are plain values built by the caller from whatever network source it
//! reads.  Cross references between records are always expressed by id.

mod branches;
mod hvdc;
mod injections;
mod node;

pub use branches::{Branch, Coupling, Line, Transformer};
pub use hvdc::{
    ActivePowerControl, Converter, ConverterStation, ConverterType, HvdcLine, LccStation,
    VscStation,
};
pub use injections::{
    BusBarSection, DanglingLine, Generator, Load, ReactiveCurvePoint, Shunt,
    StaticVarCompensator,
};
pub use node::Node;
