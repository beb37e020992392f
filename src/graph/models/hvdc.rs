// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the methods for choosing HVDC line models.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::assembling::ConverterSide;
use crate::definitions::{HvdcControl, HvdcDefinition, HvdcModel, HvdcPosition, VscDefinition};
use crate::graph::{BusRegulationMap, RegulationCount};
use crate::network::{Converter, ConverterStation, ConverterType, HvdcLine, Node};
use crate::numeric::approx_zero;
use crate::{AnalysisConfig, Error, NetworkGraph, SwitchConnectivity};

/// The HVDC line models of the main connected component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HvdcLineDefinitions {
    /// Definitions of the HVDC lines with at least one converter in the main
    /// component, by line id.
    pub lines: BTreeMap<String, HvdcDefinition>,
    /// The VSC converters sharing the voltage regulation of their bus with
    /// other converters, by bus id.
    pub vsc_buses: BTreeMap<String, VscDefinition>,
}

pub(crate) struct HvdcClassifier<'a> {
    graph: &'a NetworkGraph,
    config: &'a AnalysisConfig,
    switches: &'a dyn SwitchConnectivity,
    regulation: &'a BusRegulationMap,
    svc_lines: HashMap<String, ConverterSide>,
}

impl<'a> HvdcClassifier<'a> {
    pub fn new(
        graph: &'a NetworkGraph,
        config: &'a AnalysisConfig,
        switches: &'a dyn SwitchConnectivity,
        regulation: &'a BusRegulationMap,
        svc_lines: HashMap<String, ConverterSide>,
    ) -> Self {
        Self {
            graph,
            config,
            switches,
            regulation,
            svc_lines,
        }
    }

    /// Chooses a model for every HVDC line with a converter on the given
    /// nodes.
    pub fn build(self, nodes: &[NodeIndex]) -> Result<HvdcLineDefinitions, Error> {
        let mut positions: BTreeMap<&str, HvdcPosition> = BTreeMap::new();
        let mut prop_lines: HashSet<&str> = HashSet::new();
        let mut result = HvdcLineDefinitions::default();

        for index in nodes {
            let Some(attachments) = self.graph.attachments(*index) else {
                continue;
            };
            let node = self.graph.node_at(*index);

            for converter_ref in &attachments.converters {
                let line = self
                    .graph
                    .hvdc_line(&converter_ref.hvdc_line_id)
                    .ok_or_else(|| {
                        Error::invalid_hvdc_line(format!(
                            "HVDC line {} not found.",
                            converter_ref.hvdc_line_id
                        ))
                    })?;
                let (converter, position) = if converter_ref.converter_id == line.converter1.id {
                    (&line.converter1, HvdcPosition::FirstInMainComponent)
                } else if converter_ref.converter_id == line.converter2.id {
                    (&line.converter2, HvdcPosition::SecondInMainComponent)
                } else {
                    return Err(Error::invalid_hvdc_line(format!(
                        "HVDC line {} has no converter {}.",
                        line.id, converter_ref.converter_id
                    )));
                };

                positions
                    .entry(line.id.as_str())
                    .and_modify(|p| *p = HvdcPosition::BothInMainComponent)
                    .or_insert(position);

                if let Some(vsc) = converter.vsc() {
                    if !self.svc_lines.contains_key(&line.id) && self.shares_regulation(node, converter) {
                        prop_lines.insert(line.id.as_str());
                        result
                            .vsc_buses
                            .entry(converter.bus_id.clone())
                            .or_insert_with(|| VscDefinition::new(&converter.id, vsc, line.pmax));
                    }
                }
            }
        }

        for (line_id, position) in positions {
            let Some(line) = self.graph.hvdc_line(line_id) else {
                continue;
            };
            let definition = self.definition(line, position, prop_lines.contains(line_id));
            result.lines.insert(line_id.to_string(), definition);
        }

        Ok(result)
    }

    /// Returns whether the voltage of the converter's bus is also regulated by
    /// other VSC converters.
    fn shares_regulation(&self, node: &Node, converter: &Converter) -> bool {
        if self.regulation.get(&converter.bus_id) == Some(&RegulationCount::Multiples) {
            return true;
        }
        self.switches
            .buses_connected_by_switch(&node.id, &node.voltage_level_id)
            .iter()
            .filter_map(|id| self.graph.index_of(id))
            .filter_map(|index| self.graph.attachments(index))
            .flat_map(|attachments| attachments.converters.iter())
            .any(|c| {
                self.graph
                    .hvdc_line(&c.hvdc_line_id)
                    .is_some_and(|l| l.converter_type() == ConverterType::Vsc)
            })
    }

    fn model(&self, line: &HvdcLine, position: HvdcPosition, prop: bool) -> HvdcModel {
        let control = match line.converter_type() {
            ConverterType::Lcc => HvdcControl::PTanPhi,
            ConverterType::Vsc => match self.svc_lines.get(&line.id) {
                Some(side) => HvdcControl::PVRpcl2(*side),
                None if prop => HvdcControl::PQProp,
                None => HvdcControl::PV,
            },
        };
        let emulation = line
            .active_power_control
            .is_some_and(|apc| !approx_zero(apc.droop));

        HvdcModel::compose(
            control,
            position != HvdcPosition::BothInMainComponent,
            emulation,
            !self.config.use_infinite_reactive_limits,
        )
    }

    fn definition(&self, line: &HvdcLine, position: HvdcPosition, prop: bool) -> HvdcDefinition {
        let power_factors = match (&line.converter1.station, &line.converter2.station) {
            (ConverterStation::Lcc(lcc1), ConverterStation::Lcc(lcc2)) => {
                [lcc1.power_factor, lcc2.power_factor]
            }
            _ => [0.0, 0.0],
        };
        let side = self.svc_lines.get(&line.id).copied().unwrap_or_default();

        HvdcDefinition {
            id: line.id.clone(),
            converter_type: line.converter_type(),
            converter1_id: line.converter1.id.clone(),
            converter1_bus_id: line.converter1.bus_id.clone(),
            converter1_voltage_regulation_on: line.converter1.vsc().map(|v| v.voltage_regulation_on),
            converter2_id: line.converter2.id.clone(),
            converter2_bus_id: line.converter2.bus_id.clone(),
            converter2_voltage_regulation_on: line.converter2.vsc().map(|v| v.voltage_regulation_on),
            position,
            model: self.model(line, position, prop),
            power_factors,
            pmax: line.pmax,
            vsc_definition1: line
                .converter1
                .vsc()
                .map(|v| VscDefinition::new(&line.converter1.id, v, line.pmax)),
            vsc_definition2: line
                .converter2
                .vsc()
                .map(|v| VscDefinition::new(&line.converter2.id, v, line.pmax)),
            droop: line.active_power_control.map(|apc| apc.droop),
            p0: line.active_power_control.map(|apc| apc.p0),
            is_converter1_rectifier: line.is_converter1_rectifier,
            vdc_nom: line.vdc_nom,
            p_set_point: line.p_set_point,
            rdc: line.rdc,
            loss_factors: line.loss_factors,
            converter_station_side1: side == ConverterSide::Side1,
        }
    }
}
