// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the entry point running every analysis step over a
//! `NetworkGraph`, in order.

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use crate::assembling::{self, AssemblingDataBase};
use crate::contingencies::Contingency;
use crate::definitions::{DynamicModelDefinitions, LoadDefinition, SvarcDefinition};
use crate::graph::{
    BusRegulationMap, ContingencyValidator, DynamicModelFilter, DynamicModelResolver,
    GeneratorClassifier, GeneratorDefinitions, HvdcClassifier, HvdcLineDefinitions,
    LoadClassifier, SvarcClassifier, ValidContingencies,
};
use crate::services::StaticSwitchConnectivity;
use crate::{AnalysisConfig, Error, LibraryResolver, NetworkGraph, SwitchConnectivity};

/// Everything the analysis decided about a network.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResults {
    /// Ids of the nodes of the main connected component, in insertion order.
    pub main_component: Vec<String>,
    pub slack_node: Option<String>,
    pub generators: GeneratorDefinitions,
    pub loads: Vec<LoadDefinition>,
    pub svarcs: Vec<SvarcDefinition>,
    pub hvdc_lines: HvdcLineDefinitions,
    pub dynamic_models: DynamicModelDefinitions,
    /// The declared variable pairs of the macro connections still used by
    /// the dynamic models.
    pub macro_connections: Vec<assembling::MacroConnection>,
    /// Only set when contingencies were given.
    pub contingencies: Option<ValidContingencies>,
    /// Number of shunts per voltage level of the main connected component.
    pub shunts_by_voltage_level: BTreeMap<String, usize>,
}

/// A builder for an analysis run over a [`NetworkGraph`].
///
/// Created with [`NetworkGraph::analysis`].  Every service is optional:
/// without a switch topology every bus is energised and tied to no other, and
/// without a library resolver every automaton library is available.
pub struct Analysis<'a> {
    graph: &'a NetworkGraph,
    config: AnalysisConfig,
    assembling: Option<&'a AssemblingDataBase>,
    switches: Option<&'a dyn SwitchConnectivity>,
    libraries: Option<&'a dyn LibraryResolver>,
    generator_regulation: Option<BusRegulationMap>,
    vsc_regulation: Option<BusRegulationMap>,
    contingencies: Option<&'a [Contingency]>,
}

impl NetworkGraph {
    /// Returns a builder for analysing the network with the given
    /// configuration.
    pub fn analysis(&self, config: AnalysisConfig) -> Analysis<'_> {
        Analysis {
            graph: self,
            config,
            assembling: None,
            switches: None,
            libraries: None,
            generator_regulation: None,
            vsc_regulation: None,
            contingencies: None,
        }
    }
}

impl<'a> Analysis<'a> {
    pub fn with_assembling(mut self, assembling: &'a AssemblingDataBase) -> Self {
        self.assembling = Some(assembling);
        self
    }

    pub fn with_switch_connectivity(mut self, switches: &'a dyn SwitchConnectivity) -> Self {
        self.switches = Some(switches);
        self
    }

    pub fn with_library_resolver(mut self, libraries: &'a dyn LibraryResolver) -> Self {
        self.libraries = Some(libraries);
        self
    }

    /// Uses a precomputed generator regulation count instead of deriving it
    /// from the graph.
    pub fn with_generator_regulation(mut self, regulation: BusRegulationMap) -> Self {
        self.generator_regulation = Some(regulation);
        self
    }

    /// Uses a precomputed VSC converter regulation count instead of deriving
    /// it from the graph.
    pub fn with_vsc_regulation(mut self, regulation: BusRegulationMap) -> Self {
        self.vsc_regulation = Some(regulation);
        self
    }

    pub fn with_contingencies(mut self, contingencies: &'a [Contingency]) -> Self {
        self.contingencies = Some(contingencies);
        self
    }

    /// Runs the analysis.
    ///
    /// Fails when the slack node declared by the network is outside of the
    /// main connected component, when a generator regulation is not
    /// supported, when an HVDC line is inconsistent, or when no generator of
    /// the main connected component regulates the voltage.
    pub fn run(self) -> Result<AnalysisResults, Error> {
        let graph = self.graph;
        let config = &self.config;

        let no_switches = StaticSwitchConnectivity::new();
        let switches: &dyn SwitchConnectivity = self.switches.unwrap_or(&no_switches);
        let all_libraries = |_: &str| true;
        let libraries: &dyn LibraryResolver = self.libraries.unwrap_or(&all_libraries);
        let no_automatons = AssemblingDataBase::new();
        let assembling = self.assembling.unwrap_or(&no_automatons);

        let main = graph.main_component_indices();
        let slack_node = self.slack_node(&main)?;

        let generator_regulation = self
            .generator_regulation
            .unwrap_or_else(|| graph.generator_regulation(switches));
        let vsc_regulation = self
            .vsc_regulation
            .unwrap_or_else(|| graph.vsc_regulation(switches));

        let mut dynamic_models = DynamicModelResolver::new(
            graph,
            assembling,
            libraries,
            switches,
            config.shunt_regulation_on,
        )
        .build();

        let mut generators = GeneratorClassifier::new(
            graph,
            config,
            switches,
            &generator_regulation,
            assembling.rpcl_generators(),
        )
        .build(&main)?;
        if !generators.at_least_one_generator_regulating {
            return Err(Error::no_regulating_generator(
                "No generator regulates the voltage in the main connected component.",
            ));
        }
        let loads = LoadClassifier::new(graph, config).build(&main);
        let svarcs = SvarcClassifier::new(graph).build(&main);
        let hvdc_lines = HvdcClassifier::new(
            graph,
            config,
            switches,
            &vsc_regulation,
            assembling.svc_hvdc_lines(),
        )
        .build(&main)?;

        DynamicModelFilter::new(graph, assembling, &main)
            .build(&mut dynamic_models, &mut generators);
        let macro_connections = dynamic_models
            .used_macro_connections
            .iter()
            .filter_map(|id| assembling.macro_connection(id))
            .cloned()
            .collect();

        let contingencies = self.contingencies.map(|contingencies| {
            ContingencyValidator::new(graph, contingencies).build(&main, &loads, &generators, &svarcs)
        });

        let mut shunts_by_voltage_level = BTreeMap::new();
        for index in &main {
            let node = graph.node_at(*index);
            *shunts_by_voltage_level
                .entry(node.voltage_level_id.clone())
                .or_default() += node.shunts.len();
        }

        Ok(AnalysisResults {
            main_component: main.iter().map(|i| graph.node_at(*i).id.clone()).collect(),
            slack_node: slack_node.map(|i| graph.node_at(i).id.clone()),
            generators,
            loads,
            svarcs,
            hvdc_lines,
            dynamic_models,
            macro_connections,
            contingencies,
            shunts_by_voltage_level,
        })
    }

    /// Returns the slack node of the run.
    ///
    /// The node declared by the network is used unless automatic selection is
    /// configured.  A computed slack node falling outside of the main
    /// connected component is computed again on the main component only.
    fn slack_node(&self, main: &[NodeIndex]) -> Result<Option<NodeIndex>, Error> {
        let graph = self.graph;

        if !self.config.automatic_slack_bus {
            match graph.declared_slack_node() {
                Some(id) => {
                    let index = graph
                        .index_of(id)
                        .ok_or_else(|| Error::node_not_found(format!("Slack node {id} not found.")))?;
                    if !main.contains(&index) {
                        return Err(Error::slack_node_not_connected(format!(
                            "Slack node {id} is not in the main connected component."
                        )));
                    }
                    tracing::info!("Slack node {} declared by the network.", id);
                    return Ok(Some(index));
                }
                None => {
                    tracing::warn!("The network declares no slack node, computing one.");
                }
            }
        }

        let mut slack = graph.slack_node_among(graph.node_indices_in_order());
        if let Some(index) = slack.filter(|index| !main.contains(index)) {
            tracing::warn!(
                "Slack node {} is not in the main connected component, computing it again.",
                graph.node_at(index).id
            );
            slack = graph.slack_node_among(main.iter().copied());
        }
        if let Some(index) = slack {
            tracing::info!("Slack node {} computed.", graph.node_at(index).id);
        }

        Ok(slack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembling::{
        AssociatedElement, Connection, DynamicAutomaton, MacroConnection, SingleAssociation,
        SVC_LIBRARY,
    };
    use crate::contingencies::{ContingencyElement, ElementType};
    use crate::definitions::{GeneratorModel, LoadModel};
    use crate::graph::test_utils::{regulating_generator, NetworkBuilder};
    use crate::graph::RegulationCount;
    use crate::network::{Generator, Load};

    /// A 225 kV meshed area feeding a 63 kV area, and a 400 kV island.
    fn network() -> (NetworkBuilder, Vec<String>) {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL225", 225.0);
        let b1 = builder.node("VL225", 225.0);
        let b2 = builder.node("VL63", 63.0);
        let b3 = builder.node("VL63", 63.0);
        let b4 = builder.node("VL400", 400.0);
        let b5 = builder.node("VL400", 400.0);
        builder.line(&b0, &b1);
        builder.line(&b0, &b1);
        builder.transformer(&[&b1, &b2]);
        builder.coupling(&b2, &b3);
        builder.line(&b4, &b5);
        builder
            .generator(&b2, regulating_generator("G0"))
            .generator(
                &b3,
                Generator {
                    voltage_regulation_on: false,
                    ..regulating_generator("GOff")
                },
            )
            .load(&b2, Load::new("LD0"))
            .load(&b3, Load::new("LD1"))
            .shunt(&b2, "SH0")
            .shunt(&b3, "SH1");
        (builder, vec![b0, b1, b2, b3, b4, b5])
    }

    #[test]
    fn test_run() -> Result<(), Error> {
        let (builder, buses) = network();
        let graph = builder.build()?;

        let mut assembling = AssemblingDataBase::new();
        assembling
            .add_single_association(
                SingleAssociation::new("Bus63").with_element(AssociatedElement::Bus {
                    voltage_level: "VL63".into(),
                }),
            )
            .add_single_association(SingleAssociation::new("Gen").with_generator("G0"))
            .add_single_association(SingleAssociation::new("GenOff").with_generator("GOff"))
            .add_dynamic_automaton(
                DynamicAutomaton::new("SVC", SVC_LIBRARY)
                    .with_macro_connect("SVC_BUS", "Bus63")
                    .with_macro_connect("SVC_GEN", "Gen")
                    .with_macro_connect("SVC_GEN_OFF", "GenOff"),
            );
        let contingencies = vec![
            Contingency::new("N-1", vec![ContingencyElement::new("L0", ElementType::Branch)]),
            Contingency::new("Island", vec![ContingencyElement::new("L4", ElementType::Line)]),
            Contingency::new("GOff", vec![ContingencyElement::new("GOff", ElementType::Generator)]),
        ];

        let results = graph
            .analysis(AnalysisConfig::default())
            .with_assembling(&assembling)
            .with_contingencies(&contingencies)
            .run()?;

        assert_eq!(results.main_component, buses[..4].to_vec());
        // The 400 kV island is too small to be the main component.
        assert_eq!(results.slack_node.as_deref(), Some(buses[1].as_str()));

        assert_eq!(
            results.generators.get("G0").map(|g| g.model),
            Some(GeneratorModel::SignalNRpclRectangular)
        );
        assert_eq!(
            results.generators.get("GOff").map(|g| g.model),
            Some(GeneratorModel::Network)
        );
        assert_eq!(
            results.loads.iter().map(|l| l.model).collect::<Vec<_>>(),
            vec![LoadModel::LoadRestorativeWithLimits; 2]
        );

        // The network generator is dropped from the controller.
        let svc = &results.dynamic_models.models["SVC"];
        assert_eq!(
            svc.node_connections
                .iter()
                .map(|c| c.connected_element_id.as_str())
                .collect::<Vec<_>>(),
            vec![buses[2].as_str(), "G0"]
        );

        let valid = results.contingencies.as_ref().map(|c| {
            c.contingencies
                .iter()
                .map(|c| c.id.as_str())
                .collect::<Vec<_>>()
        });
        assert_eq!(valid, Some(vec!["N-1", "GOff"]));
        assert!(results
            .contingencies
            .as_ref()
            .is_some_and(|c| c.network_elements.contains("GOff")));

        assert_eq!(
            results.shunts_by_voltage_level,
            BTreeMap::from([("VL225".to_string(), 0), ("VL63".to_string(), 2)])
        );

        Ok(())
    }

    #[test]
    fn test_declared_slack_node() -> Result<(), Error> {
        let config = AnalysisConfig {
            automatic_slack_bus: false,
            ..Default::default()
        };

        let (mut builder, buses) = network();
        builder.slack(&buses[3]);
        let graph = builder.build()?;
        let results = graph.analysis(config.clone()).run()?;
        assert_eq!(results.slack_node.as_deref(), Some(buses[3].as_str()));
        assert!(results.contingencies.is_none());

        // Ignored when the slack node is always computed.
        let results = graph.analysis(AnalysisConfig::default()).run()?;
        assert_eq!(results.slack_node.as_deref(), Some(buses[1].as_str()));

        let (mut builder, buses) = network();
        builder.slack(&buses[4]);
        let graph = builder.build()?;
        assert!(graph.analysis(config.clone()).run().is_err_and(|e| e
            == Error::slack_node_not_connected(
                "Slack node B4 is not in the main connected component."
            )));

        // Computed when the network declares none.
        let (builder, buses) = network();
        let graph = builder.build()?;
        let results = graph.analysis(config).run()?;
        assert_eq!(results.slack_node.as_deref(), Some(buses[1].as_str()));

        Ok(())
    }

    #[test]
    fn test_run_with_services() -> Result<(), Error> {
        let (builder, buses) = network();
        let graph = builder.build()?;

        let mut assembling = AssemblingDataBase::new();
        assembling
            .add_single_association(SingleAssociation::new("Gen").with_generator("G0"))
            .add_dynamic_automaton(
                DynamicAutomaton::new("SVC", SVC_LIBRARY).with_macro_connect("SVC_GEN", "Gen"),
            )
            .add_dynamic_automaton(
                DynamicAutomaton::new("Monitor", "MonitorLib").with_macro_connect("MON_GEN", "Gen"),
            );
        let libraries = |lib: &str| lib != SVC_LIBRARY;
        let mut switches = StaticSwitchConnectivity::new();
        switches.connect(&[&buses[2], &buses[3]]);
        let regulation = BusRegulationMap::from([(buses[2].clone(), RegulationCount::Multiples)]);

        let results = graph
            .analysis(AnalysisConfig::default())
            .with_assembling(&assembling)
            .with_library_resolver(&libraries)
            .with_switch_connectivity(&switches)
            .with_generator_regulation(regulation)
            .with_vsc_regulation(BusRegulationMap::new())
            .run()?;

        // G0 shares its bus with GOff through a closed switch.
        assert_eq!(
            results.generators.get("G0").map(|g| g.model),
            Some(GeneratorModel::PropSignalNRectangular)
        );
        assert_eq!(
            results.generators.buses_regulated_by_several_generators,
            BTreeMap::from([(buses[2].clone(), "G0".to_string())])
        );
        assert_eq!(
            results.dynamic_models.models.keys().collect::<Vec<_>>(),
            vec!["Monitor"]
        );
        assert!(results.hvdc_lines.lines.is_empty());

        Ok(())
    }

    #[test]
    fn test_no_regulating_generator() -> Result<(), Error> {
        let mut builder = NetworkBuilder::new();
        let b0 = builder.node("VL1", 225.0);
        let b1 = builder.node("VL1", 225.0);
        builder.line(&b0, &b1);
        builder.generator(
            &b0,
            Generator {
                voltage_regulation_on: false,
                ..regulating_generator("G0")
            },
        );
        let graph = builder.build()?;

        assert!(graph
            .analysis(AnalysisConfig::default())
            .run()
            .is_err_and(|e| e
                == Error::no_regulating_generator(
                    "No generator regulates the voltage in the main connected component."
                )));

        Ok(())
    }

    #[test]
    fn test_automatons_wired_to_an_island() -> Result<(), Error> {
        let (mut builder, buses) = network();
        builder.generator(&buses[4], regulating_generator("GIsland"));
        let graph = builder.build()?;

        let mut assembling = AssemblingDataBase::new();
        assembling
            .add_macro_connection(MacroConnection {
                id: "SVC_GEN".into(),
                connections: vec![Connection {
                    var1: "svc_level".into(),
                    var2: "generator_level".into(),
                }],
            })
            .add_macro_connection(MacroConnection {
                id: "MON_LINE".into(),
                connections: vec![Connection {
                    var1: "monitor_state".into(),
                    var2: "line_state".into(),
                }],
            })
            .add_single_association(
                SingleAssociation::new("Bus63").with_element(AssociatedElement::Bus {
                    voltage_level: "VL63".into(),
                }),
            )
            .add_single_association(
                SingleAssociation::new("Gens")
                    .with_generator("G0")
                    .with_generator("GIsland"),
            )
            .add_single_association(SingleAssociation::new("Gen").with_generator("G0"))
            .add_single_association(
                SingleAssociation::new("IslandLine")
                    .with_element(AssociatedElement::Line("L4".into())),
            )
            .add_dynamic_automaton(
                DynamicAutomaton::new("SVC", SVC_LIBRARY)
                    .with_macro_connect("SVC_BUS", "Bus63")
                    .with_macro_connect("SVC_GEN", "Gens"),
            )
            .add_dynamic_automaton(
                DynamicAutomaton::new("Monitor", "MonitorLib")
                    .with_macro_connect("MON_LINE", "IslandLine")
                    .with_macro_connect("MON_GEN", "Gen"),
            );

        let results = graph
            .analysis(AnalysisConfig::default())
            .with_assembling(&assembling)
            .run()?;

        assert!(results.generators.get("GIsland").is_none());
        assert_eq!(
            results.dynamic_models.models.keys().collect::<Vec<_>>(),
            vec!["SVC"]
        );
        assert_eq!(
            results.dynamic_models.models["SVC"]
                .node_connections
                .iter()
                .map(|c| c.connected_element_id.as_str())
                .collect::<Vec<_>>(),
            vec![buses[2].as_str(), "G0"]
        );
        assert!(!results.dynamic_models.used_macro_connections.contains("MON_LINE"));
        assert_eq!(
            results
                .macro_connections
                .iter()
                .map(|m| m.id.as_str())
                .collect::<Vec<_>>(),
            vec!["SVC_GEN"]
        );

        Ok(())
    }
}
