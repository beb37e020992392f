// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadModel {
    Network,
    LoadRestorativeWithLimits,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadDefinition {
    pub id: String,
    pub model: LoadModel,
    pub node_id: String,
}

impl LoadDefinition {
    pub fn is_network(&self) -> bool {
        self.model == LoadModel::Network
    }
}
