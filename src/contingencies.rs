// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the contingencies a security analysis may simulate,
//! and the `ElementType` enum naming the kind of the elements they trip.

use std::fmt::Display;
use std::str::FromStr;

use crate::Error;

/// The kind of a network element referenced by a contingency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Load,
    Generator,
    /// A line or a two windings transformer.
    Branch,
    Line,
    TwoWindingsTransformer,
    ThreeWindingsTransformer,
    ShuntCompensator,
    StaticVarCompensator,
    DanglingLine,
    HvdcLine,
    BusbarSection,
}

impl ElementType {
    const ALL: [ElementType; 11] = [
        ElementType::Load,
        ElementType::Generator,
        ElementType::Branch,
        ElementType::Line,
        ElementType::TwoWindingsTransformer,
        ElementType::ThreeWindingsTransformer,
        ElementType::ShuntCompensator,
        ElementType::StaticVarCompensator,
        ElementType::DanglingLine,
        ElementType::HvdcLine,
        ElementType::BusbarSection,
    ];

    /// Returns true if an element declared with this type may be an element of
    /// the `actual` type found in the network.
    ///
    /// `Branch` matches lines and two windings transformers, in both
    /// directions.
    pub fn is_compatible(self, actual: ElementType) -> bool {
        let is_branch = |t: ElementType| matches!(t, ElementType::Line | ElementType::TwoWindingsTransformer);
        match (self, actual) {
            (ElementType::Branch, other) | (other, ElementType::Branch) if is_branch(other) => true,
            _ => self == actual,
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Load => write!(f, "LOAD"),
            ElementType::Generator => write!(f, "GENERATOR"),
            ElementType::Branch => write!(f, "BRANCH"),
            ElementType::Line => write!(f, "LINE"),
            ElementType::TwoWindingsTransformer => write!(f, "TWO_WINDINGS_TRANSFORMER"),
            ElementType::ThreeWindingsTransformer => write!(f, "THREE_WINDINGS_TRANSFORMER"),
            ElementType::ShuntCompensator => write!(f, "SHUNT_COMPENSATOR"),
            ElementType::StaticVarCompensator => write!(f, "STATIC_VAR_COMPENSATOR"),
            ElementType::DanglingLine => write!(f, "DANGLING_LINE"),
            ElementType::HvdcLine => write!(f, "HVDC_LINE"),
            ElementType::BusbarSection => write!(f, "BUSBAR_SECTION"),
        }
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| Error::invalid_element_type(format!("Unknown element type: {s}")))
    }
}

/// An element tripped by a contingency.
#[derive(Clone, Debug, PartialEq)]
pub struct ContingencyElement {
    pub id: String,
    pub element_type: ElementType,
}

impl ContingencyElement {
    pub fn new(id: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
        }
    }
}

/// A named set of elements tripped together.
#[derive(Clone, Debug, PartialEq)]
pub struct Contingency {
    pub id: String,
    pub elements: Vec<ContingencyElement>,
}

impl Contingency {
    pub fn new(id: impl Into<String>, elements: Vec<ContingencyElement>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }
}
