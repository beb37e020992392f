// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Equipment attached to a single node.

/// A point of a reactive capability curve: the reactive power range
/// available at active power `p`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReactiveCurvePoint {
    pub p: f64,
    pub qmin: f64,
    pub qmax: f64,
}

impl ReactiveCurvePoint {
    pub fn new(p: f64, qmin: f64, qmax: f64) -> Self {
        Self { p, qmin, qmax }
    }
}

/// A generator, with its active and reactive capabilities.
///
/// Powers follow the generator convention, except `target_p` which follows
/// the load convention: a producing generator has a negative `target_p`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Generator {
    pub id: String,
    pub voltage_regulation_on: bool,
    /// Reactive capability curve.  When empty, the diagram is the rectangle
    /// bounded by `pmin`, `pmax`, `qmin` and `qmax`.
    pub points: Vec<ReactiveCurvePoint>,
    pub qmin: f64,
    pub qmax: f64,
    pub pmin: f64,
    pub pmax: f64,
    pub q: f64,
    pub target_p: f64,
    /// Nominal voltage of the bus the generator is connected to, in kV.
    pub nominal_voltage: f64,
    pub regulated_bus_id: String,
    pub connected_bus_id: String,
    pub is_nuclear: bool,
}

impl Generator {
    /// Returns `true` if the generator regulates the voltage of another bus
    /// than the one it is connected to.
    pub fn regulates_remotely(&self) -> bool {
        self.regulated_bus_id != self.connected_bus_id
    }
}

/// A load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Load {
    pub id: String,
    pub fictitious: bool,
    /// Whether both the active and the reactive set points are zero.
    pub not_injecting: bool,
}

impl Load {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shunt {
    pub id: String,
}

impl Shunt {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DanglingLine {
    pub id: String,
}

impl DanglingLine {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BusBarSection {
    pub id: String,
}

impl BusBarSection {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A static var compensator.
///
/// Activation thresholds, set point bounds and `b0` are only meaningful when
/// the compensator has a stand-by automaton.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticVarCompensator {
    pub id: String,
    pub regulating_voltage: bool,
    pub b_min: f64,
    pub b_max: f64,
    pub voltage_set_point: f64,
    pub u_nom: f64,
    pub u_min_activation: f64,
    pub u_max_activation: f64,
    pub u_set_point_min: f64,
    pub u_set_point_max: f64,
    pub b0: f64,
    /// Slope of the voltage regulation, in kV/MVar.
    pub slope: f64,
    pub has_stand_by_automaton: bool,
    pub has_voltage_per_reactive_power_control: bool,
    pub regulated_bus_id: String,
    pub connected_bus_id: String,
    /// Nominal voltage of the regulated bus, in kV.
    pub u_nom_remote: f64,
}
