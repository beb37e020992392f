// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Generator model variants and definitions.

use crate::assembling::ControlLoop;
use crate::network::ReactiveCurvePoint;

/// The dynamic model of a generator.
///
/// Variant names combine the regulation family (`SignalN`, `SignalNTfo` with a
/// lumped step-up transformer, `Remote` and `Prop`), the reactive power
/// control loop (`Rpcl`, `Rpcl2`) and the reactive limits (`Infinite`,
/// `Rectangular` or a full `DiagramPq`).  `Network` keeps the static network
/// behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorModel {
    SignalNInfinite,
    SignalNRectangular,
    DiagramPqSignalN,
    SignalNRpclInfinite,
    SignalNRpclRectangular,
    DiagramPqRpclSignalN,
    SignalNRpcl2Infinite,
    SignalNRpcl2Rectangular,
    DiagramPqRpcl2SignalN,
    SignalNTfoInfinite,
    SignalNTfoRectangular,
    DiagramPqTfoSignalN,
    SignalNTfoRpclInfinite,
    SignalNTfoRpclRectangular,
    DiagramPqTfoRpclSignalN,
    SignalNTfoRpcl2Infinite,
    SignalNTfoRpcl2Rectangular,
    DiagramPqTfoRpcl2SignalN,
    RemoteSignalNInfinite,
    RemoteSignalNRectangular,
    RemoteDiagramPqSignalN,
    PropSignalNInfinite,
    PropSignalNRectangular,
    PropDiagramPqSignalN,
    Network,
}

/// Regulation family of a generator model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Family {
    SignalN,
    SignalNTfo,
    Remote,
    Prop,
}

/// Shape of the reactive limits of a generator model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReactiveLimits {
    Infinite,
    Rectangular,
    Diagram,
}

impl GeneratorModel {
    /// Builds the model of the given family.  The control loop is ignored for
    /// the `Remote` and `Prop` families, which have no RPCL variants.
    pub(crate) fn compose(
        family: Family,
        limits: ReactiveLimits,
        control_loop: Option<ControlLoop>,
    ) -> Self {
        use ControlLoop::{Rpcl, Rpcl2};
        use GeneratorModel::*;
        use ReactiveLimits::{Diagram, Infinite, Rectangular};

        match (family, control_loop, limits) {
            (Family::SignalN, None, Infinite) => SignalNInfinite,
            (Family::SignalN, None, Rectangular) => SignalNRectangular,
            (Family::SignalN, None, Diagram) => DiagramPqSignalN,
            (Family::SignalN, Some(Rpcl), Infinite) => SignalNRpclInfinite,
            (Family::SignalN, Some(Rpcl), Rectangular) => SignalNRpclRectangular,
            (Family::SignalN, Some(Rpcl), Diagram) => DiagramPqRpclSignalN,
            (Family::SignalN, Some(Rpcl2), Infinite) => SignalNRpcl2Infinite,
            (Family::SignalN, Some(Rpcl2), Rectangular) => SignalNRpcl2Rectangular,
            (Family::SignalN, Some(Rpcl2), Diagram) => DiagramPqRpcl2SignalN,
            (Family::SignalNTfo, None, Infinite) => SignalNTfoInfinite,
            (Family::SignalNTfo, None, Rectangular) => SignalNTfoRectangular,
            (Family::SignalNTfo, None, Diagram) => DiagramPqTfoSignalN,
            (Family::SignalNTfo, Some(Rpcl), Infinite) => SignalNTfoRpclInfinite,
            (Family::SignalNTfo, Some(Rpcl), Rectangular) => SignalNTfoRpclRectangular,
            (Family::SignalNTfo, Some(Rpcl), Diagram) => DiagramPqTfoRpclSignalN,
            (Family::SignalNTfo, Some(Rpcl2), Infinite) => SignalNTfoRpcl2Infinite,
            (Family::SignalNTfo, Some(Rpcl2), Rectangular) => SignalNTfoRpcl2Rectangular,
            (Family::SignalNTfo, Some(Rpcl2), Diagram) => DiagramPqTfoRpcl2SignalN,
            (Family::Remote, _, Infinite) => RemoteSignalNInfinite,
            (Family::Remote, _, Rectangular) => RemoteSignalNRectangular,
            (Family::Remote, _, Diagram) => RemoteDiagramPqSignalN,
            (Family::Prop, _, Infinite) => PropSignalNInfinite,
            (Family::Prop, _, Rectangular) => PropSignalNRectangular,
            (Family::Prop, _, Diagram) => PropDiagramPqSignalN,
        }
    }

    /// Returns true if the model bounds the reactive power with a diagram,
    /// rectangular or not.
    pub fn is_using_diagram(self) -> bool {
        use GeneratorModel::*;
        !matches!(
            self,
            SignalNInfinite
                | RemoteSignalNInfinite
                | PropSignalNInfinite
                | SignalNTfoInfinite
                | SignalNRpclInfinite
                | SignalNTfoRpclInfinite
                | SignalNRpcl2Infinite
                | SignalNTfoRpcl2Infinite
                | Network
        )
    }

    pub fn is_using_rectangular_diagram(self) -> bool {
        use GeneratorModel::*;
        matches!(
            self,
            SignalNRectangular
                | SignalNTfoRectangular
                | RemoteSignalNRectangular
                | PropSignalNRectangular
                | SignalNTfoRpclRectangular
                | SignalNRpclRectangular
                | SignalNTfoRpcl2Rectangular
                | SignalNRpcl2Rectangular
        )
    }

    /// Returns true if the model includes the generator's step-up transformer.
    pub fn has_transformer(self) -> bool {
        use GeneratorModel::*;
        matches!(
            self,
            SignalNTfoInfinite
                | SignalNTfoRectangular
                | DiagramPqTfoSignalN
                | SignalNTfoRpclInfinite
                | SignalNTfoRpclRectangular
                | DiagramPqTfoRpclSignalN
                | SignalNTfoRpcl2Infinite
                | SignalNTfoRpcl2Rectangular
                | DiagramPqTfoRpcl2SignalN
        )
    }

    /// Returns true if the model has a reactive power control loop, of either
    /// version.
    pub fn has_rpcl(self) -> bool {
        self.has_rpcl1() || self.has_rpcl2()
    }

    fn has_rpcl1(self) -> bool {
        use GeneratorModel::*;
        matches!(
            self,
            SignalNRpclInfinite
                | SignalNRpclRectangular
                | DiagramPqRpclSignalN
                | SignalNTfoRpclInfinite
                | SignalNTfoRpclRectangular
                | DiagramPqTfoRpclSignalN
        )
    }

    pub fn has_rpcl2(self) -> bool {
        use GeneratorModel::*;
        matches!(
            self,
            SignalNRpcl2Infinite
                | SignalNRpcl2Rectangular
                | DiagramPqRpcl2SignalN
                | SignalNTfoRpcl2Infinite
                | SignalNTfoRpcl2Rectangular
                | DiagramPqTfoRpcl2SignalN
        )
    }

    pub fn is_network(self) -> bool {
        self == GeneratorModel::Network
    }

    pub fn is_regulating_remotely(self) -> bool {
        use GeneratorModel::*;
        matches!(
            self,
            RemoteDiagramPqSignalN | RemoteSignalNInfinite | RemoteSignalNRectangular
        )
    }

    /// Returns the same model without its reactive power control loop.
    pub fn without_rpcl(self) -> Self {
        use GeneratorModel::*;
        match self {
            SignalNRpclInfinite | SignalNRpcl2Infinite => SignalNInfinite,
            SignalNRpclRectangular | SignalNRpcl2Rectangular => SignalNRectangular,
            DiagramPqRpclSignalN | DiagramPqRpcl2SignalN => DiagramPqSignalN,
            SignalNTfoRpclInfinite | SignalNTfoRpcl2Infinite => SignalNTfoInfinite,
            SignalNTfoRpclRectangular | SignalNTfoRpcl2Rectangular => SignalNTfoRectangular,
            DiagramPqTfoRpclSignalN | DiagramPqTfoRpcl2SignalN => DiagramPqTfoSignalN,
            other => other,
        }
    }
}

/// The model decision for a generator, with the data its dynamic model needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorDefinition {
    pub id: String,
    pub model: GeneratorModel,
    /// Id of the node the generator is connected to.
    pub node_id: String,
    pub points: Vec<ReactiveCurvePoint>,
    pub qmin: f64,
    pub qmax: f64,
    pub pmin: f64,
    pub pmax: f64,
    pub q: f64,
    pub target_p: f64,
    pub regulated_bus_id: String,
    pub is_nuclear: bool,
}

impl GeneratorDefinition {
    pub fn is_network(&self) -> bool {
        self.model.is_network()
    }

    pub fn has_rpcl(&self) -> bool {
        self.model.has_rpcl()
    }

    /// Replaces the model with its variant without reactive power control
    /// loop.
    pub fn remove_rpcl(&mut self) {
        self.model = self.model.without_rpcl();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        use GeneratorModel::*;

        assert_eq!(
            GeneratorModel::compose(Family::SignalN, ReactiveLimits::Infinite, None),
            SignalNInfinite
        );
        assert_eq!(
            GeneratorModel::compose(
                Family::SignalNTfo,
                ReactiveLimits::Rectangular,
                Some(ControlLoop::Rpcl2)
            ),
            SignalNTfoRpcl2Rectangular
        );
        assert_eq!(
            GeneratorModel::compose(Family::SignalN, ReactiveLimits::Diagram, Some(ControlLoop::Rpcl)),
            DiagramPqRpclSignalN
        );
        // Remote and proportional regulation never carry a control loop.
        assert_eq!(
            GeneratorModel::compose(Family::Remote, ReactiveLimits::Diagram, Some(ControlLoop::Rpcl)),
            RemoteDiagramPqSignalN
        );
        assert_eq!(
            GeneratorModel::compose(Family::Prop, ReactiveLimits::Infinite, Some(ControlLoop::Rpcl2)),
            PropSignalNInfinite
        );
    }

    #[test]
    fn test_predicates() {
        use GeneratorModel::*;

        assert!(!SignalNInfinite.is_using_diagram());
        assert!(!Network.is_using_diagram());
        assert!(SignalNRectangular.is_using_diagram());
        assert!(PropDiagramPqSignalN.is_using_diagram());

        assert!(RemoteSignalNRectangular.is_using_rectangular_diagram());
        assert!(!DiagramPqSignalN.is_using_rectangular_diagram());

        assert!(DiagramPqTfoRpclSignalN.has_transformer());
        assert!(!SignalNRpclInfinite.has_transformer());

        assert!(SignalNRpclInfinite.has_rpcl());
        assert!(SignalNTfoRpcl2Infinite.has_rpcl());
        assert!(SignalNTfoRpcl2Infinite.has_rpcl2());
        assert!(!SignalNRpclInfinite.has_rpcl2());
        assert!(!PropSignalNInfinite.has_rpcl());

        assert!(RemoteSignalNInfinite.is_regulating_remotely());
        assert!(!SignalNInfinite.is_regulating_remotely());
        assert!(Network.is_network());
    }

    #[test]
    fn test_remove_rpcl() {
        use GeneratorModel::*;

        let mut def = GeneratorDefinition {
            id: "G1".into(),
            model: DiagramPqTfoRpcl2SignalN,
            node_id: "B1".into(),
            points: vec![],
            qmin: 0.0,
            qmax: 0.0,
            pmin: 0.0,
            pmax: 0.0,
            q: 0.0,
            target_p: 0.0,
            regulated_bus_id: "B1".into(),
            is_nuclear: false,
        };
        assert!(def.has_rpcl());
        def.remove_rpcl();
        assert_eq!(def.model, DiagramPqTfoSignalN);
        assert!(!def.has_rpcl());

        assert_eq!(SignalNRpclInfinite.without_rpcl(), SignalNInfinite);
        assert_eq!(SignalNRpcl2Rectangular.without_rpcl(), SignalNRectangular);
        assert_eq!(PropSignalNInfinite.without_rpcl(), PropSignalNInfinite);
        assert_eq!(Network.without_rpcl(), Network);
    }
}
