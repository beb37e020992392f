// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Static var compensator model variants and definitions.

/// The dynamic model of a static var compensator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvarcModel {
    SvarcPv,
    SvarcPvModeHandling,
    SvarcPvRemote,
    SvarcPvRemoteModeHandling,
    SvarcPvProp,
    SvarcPvPropModeHandling,
    SvarcPvPropRemote,
    SvarcPvPropRemoteModeHandling,
    Network,
}

impl SvarcModel {
    /// Builds the model from its three independent options.
    pub(crate) fn compose(mode_handling: bool, remote: bool, prop: bool) -> Self {
        use SvarcModel::*;
        match (prop, remote, mode_handling) {
            (false, false, false) => SvarcPv,
            (false, false, true) => SvarcPvModeHandling,
            (false, true, false) => SvarcPvRemote,
            (false, true, true) => SvarcPvRemoteModeHandling,
            (true, false, false) => SvarcPvProp,
            (true, false, true) => SvarcPvPropModeHandling,
            (true, true, false) => SvarcPvPropRemote,
            (true, true, true) => SvarcPvPropRemoteModeHandling,
        }
    }

    pub fn is_remote_regulation(self) -> bool {
        use SvarcModel::*;
        matches!(
            self,
            SvarcPvRemote | SvarcPvRemoteModeHandling | SvarcPvPropRemote | SvarcPvPropRemoteModeHandling
        )
    }
}

/// The model decision for a static var compensator, with the data its
/// dynamic model needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SvarcDefinition {
    pub id: String,
    pub model: SvarcModel,
    pub b_min: f64,
    pub b_max: f64,
    pub voltage_set_point: f64,
    pub u_nom: f64,
    pub u_min_activation: f64,
    pub u_max_activation: f64,
    pub u_set_point_min: f64,
    pub u_set_point_max: f64,
    pub b0: f64,
    pub slope: f64,
    pub u_nom_remote: f64,
    pub regulated_bus_id: String,
}

impl SvarcDefinition {
    pub fn is_network(&self) -> bool {
        self.model == SvarcModel::Network
    }

    pub fn is_remote_regulation(&self) -> bool {
        self.model.is_remote_regulation()
    }
}
