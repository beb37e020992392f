// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! HVDC line model variants and definitions.

use crate::assembling::ConverterSide;
use crate::network::{ConverterType, ReactiveCurvePoint, VscStation};

/// Which converters of an HVDC line are in the main connected component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HvdcPosition {
    FirstInMainComponent,
    SecondInMainComponent,
    BothInMainComponent,
}

/// The dynamic model of an HVDC line.
///
/// `Dangling` variants model a line with a single converter in the main
/// component, `DiagramPQ` variants use the converters' reactive diagrams and
/// `EmulationSet` variants emulate an AC line through an angle droop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HvdcModel {
    HvdcPTanPhi,
    HvdcPTanPhiDangling,
    HvdcPTanPhiDanglingDiagramPQ,
    HvdcPTanPhiDiagramPQ,
    HvdcPQProp,
    HvdcPQPropDangling,
    HvdcPQPropDanglingDiagramPQ,
    HvdcPQPropDiagramPQ,
    HvdcPQPropDiagramPQEmulationSet,
    HvdcPQPropEmulationSet,
    HvdcPV,
    HvdcPVDangling,
    HvdcPVDanglingDiagramPQ,
    HvdcPVDiagramPQ,
    HvdcPVDiagramPQEmulationSet,
    HvdcPVEmulationSet,
    HvdcPVEmulationSetRpcl2Side1,
    HvdcPVDiagramPQEmulationSetRpcl2Side1,
    HvdcPVRpcl2Side1,
    HvdcPVDiagramPQRpcl2Side1,
    HvdcPVDanglingRpcl2Side1,
    HvdcPVDanglingDiagramPQRpcl2Side1,
    HvdcPVEmulationSetRpcl2Side2,
    HvdcPVDiagramPQEmulationSetRpcl2Side2,
    HvdcPVRpcl2Side2,
    HvdcPVDiagramPQRpcl2Side2,
    HvdcPVDanglingRpcl2Side2,
    HvdcPVDanglingDiagramPQRpcl2Side2,
}

/// Control scheme of an HVDC line model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HvdcControl {
    PTanPhi,
    PQProp,
    PV,
    /// Voltage control driven by a secondary voltage controller on the given
    /// side.
    PVRpcl2(ConverterSide),
}

impl HvdcModel {
    /// Builds the model of the given control scheme.  Dangling lines and
    /// tan-phi control have no emulation variants.
    pub(crate) fn compose(control: HvdcControl, dangling: bool, emulation: bool, diagram: bool) -> Self {
        use ConverterSide::{Side1, Side2};
        use HvdcControl::*;
        use HvdcModel::*;

        match (control, dangling, emulation, diagram) {
            (PTanPhi, false, _, false) => HvdcPTanPhi,
            (PTanPhi, false, _, true) => HvdcPTanPhiDiagramPQ,
            (PTanPhi, true, _, false) => HvdcPTanPhiDangling,
            (PTanPhi, true, _, true) => HvdcPTanPhiDanglingDiagramPQ,

            (PQProp, false, false, false) => HvdcPQProp,
            (PQProp, false, false, true) => HvdcPQPropDiagramPQ,
            (PQProp, false, true, false) => HvdcPQPropEmulationSet,
            (PQProp, false, true, true) => HvdcPQPropDiagramPQEmulationSet,
            (PQProp, true, _, false) => HvdcPQPropDangling,
            (PQProp, true, _, true) => HvdcPQPropDanglingDiagramPQ,

            (PV, false, false, false) => HvdcPV,
            (PV, false, false, true) => HvdcPVDiagramPQ,
            (PV, false, true, false) => HvdcPVEmulationSet,
            (PV, false, true, true) => HvdcPVDiagramPQEmulationSet,
            (PV, true, _, false) => HvdcPVDangling,
            (PV, true, _, true) => HvdcPVDanglingDiagramPQ,

            (PVRpcl2(Side1), false, false, false) => HvdcPVRpcl2Side1,
            (PVRpcl2(Side1), false, false, true) => HvdcPVDiagramPQRpcl2Side1,
            (PVRpcl2(Side1), false, true, false) => HvdcPVEmulationSetRpcl2Side1,
            (PVRpcl2(Side1), false, true, true) => HvdcPVDiagramPQEmulationSetRpcl2Side1,
            (PVRpcl2(Side1), true, _, false) => HvdcPVDanglingRpcl2Side1,
            (PVRpcl2(Side1), true, _, true) => HvdcPVDanglingDiagramPQRpcl2Side1,

            (PVRpcl2(Side2), false, false, false) => HvdcPVRpcl2Side2,
            (PVRpcl2(Side2), false, false, true) => HvdcPVDiagramPQRpcl2Side2,
            (PVRpcl2(Side2), false, true, false) => HvdcPVEmulationSetRpcl2Side2,
            (PVRpcl2(Side2), false, true, true) => HvdcPVDiagramPQEmulationSetRpcl2Side2,
            (PVRpcl2(Side2), true, _, false) => HvdcPVDanglingRpcl2Side2,
            (PVRpcl2(Side2), true, _, true) => HvdcPVDanglingDiagramPQRpcl2Side2,
        }
    }

    pub fn has_diagram_model(self) -> bool {
        use HvdcModel::*;
        matches!(
            self,
            HvdcPTanPhiDanglingDiagramPQ
                | HvdcPQPropDanglingDiagramPQ
                | HvdcPVDanglingDiagramPQ
                | HvdcPTanPhiDiagramPQ
                | HvdcPQPropDiagramPQ
                | HvdcPQPropDiagramPQEmulationSet
                | HvdcPVDiagramPQ
                | HvdcPVDiagramPQEmulationSet
                | HvdcPVDiagramPQEmulationSetRpcl2Side1
                | HvdcPVDiagramPQRpcl2Side1
                | HvdcPVDanglingDiagramPQRpcl2Side1
                | HvdcPVDiagramPQEmulationSetRpcl2Side2
                | HvdcPVDiagramPQRpcl2Side2
                | HvdcPVDanglingDiagramPQRpcl2Side2
        )
    }

    pub fn has_emulation_model(self) -> bool {
        use HvdcModel::*;
        matches!(
            self,
            HvdcPQPropEmulationSet
                | HvdcPQPropDiagramPQEmulationSet
                | HvdcPVEmulationSet
                | HvdcPVDiagramPQEmulationSet
                | HvdcPVEmulationSetRpcl2Side1
                | HvdcPVDiagramPQEmulationSetRpcl2Side1
                | HvdcPVEmulationSetRpcl2Side2
                | HvdcPVDiagramPQEmulationSetRpcl2Side2
        )
    }

    pub fn has_pq_prop_model(self) -> bool {
        use HvdcModel::*;
        matches!(
            self,
            HvdcPQPropDangling
                | HvdcPQPropDanglingDiagramPQ
                | HvdcPQProp
                | HvdcPQPropDiagramPQ
                | HvdcPQPropEmulationSet
                | HvdcPQPropDiagramPQEmulationSet
        )
    }

    pub fn has_dangling_model(self) -> bool {
        use HvdcModel::*;
        matches!(
            self,
            HvdcPTanPhiDangling
                | HvdcPTanPhiDanglingDiagramPQ
                | HvdcPQPropDangling
                | HvdcPQPropDanglingDiagramPQ
                | HvdcPVDangling
                | HvdcPVDanglingDiagramPQ
                | HvdcPVDanglingRpcl2Side1
                | HvdcPVDanglingDiagramPQRpcl2Side1
                | HvdcPVDanglingRpcl2Side2
                | HvdcPVDanglingDiagramPQRpcl2Side2
        )
    }

    pub fn has_rpcl2(self) -> bool {
        self.rpcl2_side().is_some()
    }

    pub fn converter_station_on_side2(self) -> bool {
        self.rpcl2_side() == Some(ConverterSide::Side2)
    }

    fn rpcl2_side(self) -> Option<ConverterSide> {
        use HvdcModel::*;
        match self {
            HvdcPVEmulationSetRpcl2Side1
            | HvdcPVDiagramPQEmulationSetRpcl2Side1
            | HvdcPVRpcl2Side1
            | HvdcPVDiagramPQRpcl2Side1
            | HvdcPVDanglingRpcl2Side1
            | HvdcPVDanglingDiagramPQRpcl2Side1 => Some(ConverterSide::Side1),
            HvdcPVEmulationSetRpcl2Side2
            | HvdcPVDiagramPQEmulationSetRpcl2Side2
            | HvdcPVRpcl2Side2
            | HvdcPVDiagramPQRpcl2Side2
            | HvdcPVDanglingRpcl2Side2
            | HvdcPVDanglingDiagramPQRpcl2Side2 => Some(ConverterSide::Side2),
            _ => None,
        }
    }
}

/// The data of a VSC converter needed by the dynamic models.
#[derive(Clone, Debug, PartialEq)]
pub struct VscDefinition {
    pub id: String,
    pub qmax: f64,
    pub qmin: f64,
    pub q: f64,
    pub pmax: f64,
    /// Always `-pmax`.
    pub pmin: f64,
    pub points: Vec<ReactiveCurvePoint>,
}

impl VscDefinition {
    pub(crate) fn new(id: &str, station: &VscStation, pmax: f64) -> Self {
        Self {
            id: id.to_string(),
            qmax: station.qmax,
            qmin: station.qmin,
            q: station.q,
            pmax,
            pmin: -pmax,
            points: station.points.clone(),
        }
    }
}

/// The model decision for an HVDC line, with the data its dynamic model
/// needs.
#[derive(Clone, Debug, PartialEq)]
pub struct HvdcDefinition {
    pub id: String,
    pub converter_type: ConverterType,
    pub converter1_id: String,
    pub converter1_bus_id: String,
    /// VSC converters only.
    pub converter1_voltage_regulation_on: Option<bool>,
    pub converter2_id: String,
    pub converter2_bus_id: String,
    /// VSC converters only.
    pub converter2_voltage_regulation_on: Option<bool>,
    pub position: HvdcPosition,
    pub model: HvdcModel,
    /// LCC converters only, zero otherwise.
    pub power_factors: [f64; 2],
    pub pmax: f64,
    pub vsc_definition1: Option<VscDefinition>,
    pub vsc_definition2: Option<VscDefinition>,
    pub droop: Option<f64>,
    pub p0: Option<f64>,
    pub is_converter1_rectifier: bool,
    pub vdc_nom: f64,
    pub p_set_point: f64,
    pub rdc: f64,
    pub loss_factors: [f64; 2],
    /// Whether side 1 of the dynamic model is wired to side 1 of the static
    /// line.
    pub converter_station_side1: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        use HvdcModel::*;

        assert_eq!(
            HvdcModel::compose(HvdcControl::PTanPhi, false, true, false),
            HvdcPTanPhi
        );
        assert_eq!(
            HvdcModel::compose(HvdcControl::PTanPhi, true, false, true),
            HvdcPTanPhiDanglingDiagramPQ
        );
        assert_eq!(
            HvdcModel::compose(HvdcControl::PQProp, false, true, true),
            HvdcPQPropDiagramPQEmulationSet
        );
        assert_eq!(
            HvdcModel::compose(HvdcControl::PV, true, true, false),
            HvdcPVDangling
        );
        assert_eq!(
            HvdcModel::compose(HvdcControl::PVRpcl2(ConverterSide::Side2), false, true, false),
            HvdcPVEmulationSetRpcl2Side2
        );
    }

    #[test]
    fn test_predicates() {
        use HvdcModel::*;

        assert!(HvdcPVDiagramPQRpcl2Side1.has_diagram_model());
        assert!(!HvdcPV.has_diagram_model());
        assert!(HvdcPQPropEmulationSet.has_emulation_model());
        assert!(!HvdcPQPropDangling.has_emulation_model());
        assert!(HvdcPQPropDangling.has_pq_prop_model());
        assert!(!HvdcPV.has_pq_prop_model());
        assert!(HvdcPTanPhiDangling.has_dangling_model());
        assert!(!HvdcPTanPhi.has_dangling_model());
        assert!(HvdcPVDanglingRpcl2Side1.has_rpcl2());
        assert!(!HvdcPVDanglingRpcl2Side1.converter_station_on_side2());
        assert!(HvdcPVDanglingDiagramPQRpcl2Side2.converter_station_on_side2());
        assert!(!HvdcPVEmulationSet.has_rpcl2());
    }
}
