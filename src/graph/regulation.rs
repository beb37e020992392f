// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Counting of the equipment regulating the voltage of each bus.

use std::collections::HashMap;

use crate::{NetworkGraph, SwitchConnectivity};

/// How many pieces of equipment regulate the voltage of a bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegulationCount {
    One,
    Multiples,
}

/// Regulation count per bus id.
pub type BusRegulationMap = HashMap<String, RegulationCount>;

fn count_regulated_bus(
    map: &mut BusRegulationMap,
    bus_id: &str,
    voltage_level_id: &str,
    switches: &dyn SwitchConnectivity,
) {
    let connected = switches.buses_connected_by_switch(bus_id, voltage_level_id);
    for id in std::iter::once(bus_id.to_string()).chain(connected) {
        map.entry(id)
            .and_modify(|count| *count = RegulationCount::Multiples)
            .or_insert(RegulationCount::One);
    }
}

impl NetworkGraph {
    /// Returns the number of generators regulating each bus.
    ///
    /// A generator with voltage regulation on counts for its regulated bus and
    /// for every bus tied to it by closed switches.
    pub fn generator_regulation(&self, switches: &dyn SwitchConnectivity) -> BusRegulationMap {
        let mut map = BusRegulationMap::new();
        for node in self.nodes() {
            for generator in node.generators.iter().filter(|g| g.voltage_regulation_on) {
                let voltage_level = self
                    .node(&generator.regulated_bus_id)
                    .map(|n| n.voltage_level_id.as_str())
                    .unwrap_or(&node.voltage_level_id);
                count_regulated_bus(&mut map, &generator.regulated_bus_id, voltage_level, switches);
            }
        }
        map
    }

    /// Returns the number of VSC converters regulating each bus.
    pub fn vsc_regulation(&self, switches: &dyn SwitchConnectivity) -> BusRegulationMap {
        let mut map = BusRegulationMap::new();
        for line in self.hvdc_lines() {
            for converter in [&line.converter1, &line.converter2] {
                if !converter.vsc().is_some_and(|vsc| vsc.voltage_regulation_on) {
                    continue;
                }
                let Ok(node) = self.node(&converter.bus_id) else {
                    continue;
                };
                count_regulated_bus(&mut map, &converter.bus_id, &node.voltage_level_id, switches);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_utils::{regulating_generator, vsc_converter, NetworkBuilder};
    use crate::network::Generator;
    use crate::services::StaticSwitchConnectivity;
    use crate::Error;

    #[test]
    fn test_generator_regulation() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 400.0);
        let b1 = builder.node("VL1", 400.0);
        let b2 = builder.node("VL2", 225.0);
        let b3 = builder.node("VL3", 63.0);
        builder
            .generator(&b0, regulating_generator("G0"))
            .generator(&b2, regulating_generator("G1"))
            .generator(
                &b3,
                Generator {
                    regulated_bus_id: b2.clone(),
                    ..regulating_generator("G2")
                },
            )
            .generator(
                &b3,
                Generator {
                    voltage_regulation_on: false,
                    ..regulating_generator("G3")
                },
            );
        let graph = builder.build()?;

        let mut switches = StaticSwitchConnectivity::new();
        switches.connect(&[&b0, &b1]);

        let map = graph.generator_regulation(&switches);
        assert_eq!(map.get(&b0), Some(&RegulationCount::One));
        assert_eq!(map.get(&b1), Some(&RegulationCount::One));
        assert_eq!(map.get(&b2), Some(&RegulationCount::Multiples));
        assert_eq!(map.get(&b3), None);

        Ok(())
    }

    #[test]
    fn test_vsc_regulation() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 400.0);
        let b1 = builder.node("VL2", 400.0);
        let b2 = builder.node("VL2", 400.0);
        builder.hvdc_line(
            "HVDC1",
            vsc_converter("C1", &b0, true),
            vsc_converter("C2", &b1, false),
        );
        builder.hvdc_line(
            "HVDC2",
            vsc_converter("C3", &b0, true),
            vsc_converter("C4", &b2, true),
        );
        let graph = builder.build()?;

        let map = graph.vsc_regulation(&StaticSwitchConnectivity::new());
        assert_eq!(map.get(&b0), Some(&RegulationCount::Multiples));
        assert_eq!(map.get(&b1), None);
        assert_eq!(map.get(&b2), Some(&RegulationCount::One));

        Ok(())
    }
}
