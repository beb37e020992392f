// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! HVDC lines and their converter stations.

use std::fmt::Display;

use super::ReactiveCurvePoint;

/// The technology of the converters of an HVDC line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConverterType {
    Lcc,
    Vsc,
}

impl Display for ConverterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverterType::Lcc => write!(f, "LCC"),
            ConverterType::Vsc => write!(f, "VSC"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LccStation {
    pub power_factor: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VscStation {
    pub voltage_regulation_on: bool,
    pub qmin: f64,
    pub qmax: f64,
    pub q: f64,
    pub points: Vec<ReactiveCurvePoint>,
}

/// Technology specific data of a converter.
#[derive(Clone, Debug, PartialEq)]
pub enum ConverterStation {
    Lcc(LccStation),
    Vsc(VscStation),
}

/// One end of an HVDC line.
#[derive(Clone, Debug, PartialEq)]
pub struct Converter {
    pub id: String,
    /// Id of the node the converter is connected to.
    pub bus_id: String,
    pub station: ConverterStation,
}

impl Converter {
    pub fn converter_type(&self) -> ConverterType {
        match self.station {
            ConverterStation::Lcc(_) => ConverterType::Lcc,
            ConverterStation::Vsc(_) => ConverterType::Vsc,
        }
    }

    /// Returns the VSC data of the converter, if it is a VSC converter.
    pub fn vsc(&self) -> Option<&VscStation> {
        match &self.station {
            ConverterStation::Vsc(vsc) => Some(vsc),
            ConverterStation::Lcc(_) => None,
        }
    }
}

/// Active power control by angle droop emulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivePowerControl {
    pub droop: f64,
    pub p0: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HvdcLine {
    pub id: String,
    pub converter1: Converter,
    pub converter2: Converter,
    pub pmax: f64,
    pub active_power_control: Option<ActivePowerControl>,
    pub is_converter1_rectifier: bool,
    /// Nominal DC voltage, in kV.
    pub vdc_nom: f64,
    /// Active power set point, in MW.
    pub p_set_point: f64,
    /// DC resistance, in Ohm.
    pub rdc: f64,
    pub loss_factors: [f64; 2],
}

impl HvdcLine {
    /// Creates an HVDC line between two converters, with zeroed electrical
    /// parameters.
    pub fn new(id: impl Into<String>, converter1: Converter, converter2: Converter) -> Self {
        Self {
            id: id.into(),
            converter1,
            converter2,
            pmax: 0.0,
            active_power_control: None,
            is_converter1_rectifier: true,
            vdc_nom: 0.0,
            p_set_point: 0.0,
            rdc: 0.0,
            loss_factors: [0.0, 0.0],
        }
    }

    /// Returns the converter type of the line, taken from its first converter.
    pub fn converter_type(&self) -> ConverterType {
        self.converter1.converter_type()
    }
}
