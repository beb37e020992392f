// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for analysing a
//! `NetworkGraph`.

/// Configuration options for analysing a `NetworkGraph`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Whether generators and converters are modelled with infinite reactive
    /// limits.  When `false`, their reactive capability diagrams are used.
    pub use_infinite_reactive_limits: bool,

    /// Nominal voltage (kV) from which a generator's step-up transformer is
    /// lumped into its dynamic model instead of the static network model.
    pub tfo_voltage_level: f64,

    /// Minimum nominal voltage (kV) of a node for its loads to get a dynamic
    /// model.
    pub dso_voltage_level: f64,

    /// Whether automatons regulating all the shunts of a voltage level are
    /// wired to the network.
    pub shunt_regulation_on: bool,

    /// Whether the slack node is always computed, even when the network
    /// declares one.
    pub automatic_slack_bus: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            use_infinite_reactive_limits: false,
            tfo_voltage_level: 100.0,
            dso_voltage_level: 45.0,
            shunt_regulation_on: true,
            automatic_slack_bus: true,
        }
    }
}
