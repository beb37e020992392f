// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Branches make the nodes at their ends neighbours of each other.

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub id: String,
    pub node1: String,
    pub node2: String,
}

impl Line {
    pub fn new(id: impl Into<String>, node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node1: node1.into(),
            node2: node2.into(),
        }
    }
}

/// A two or three windings transformer.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformer {
    pub id: String,
    pub node_ids: Vec<String>,
}

impl Transformer {
    pub fn new<S: Into<String>>(id: impl Into<String>, node_ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            id: id.into(),
            node_ids: node_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// A closed bus coupler or retained switch between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Coupling {
    pub id: String,
    pub node1: String,
    pub node2: String,
}

impl Coupling {
    pub fn new(id: impl Into<String>, node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node1: node1.into(),
            node2: node2.into(),
        }
    }
}

/// A closed electrical path between nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Branch {
    Line(Line),
    Transformer(Transformer),
    Coupling(Coupling),
}

impl Branch {
    pub fn id(&self) -> &str {
        match self {
            Branch::Line(line) => &line.id,
            Branch::Transformer(tfo) => &tfo.id,
            Branch::Coupling(coupling) => &coupling.id,
        }
    }

    /// Returns the ids of the nodes at the ends of the branch.
    pub fn node_ids(&self) -> Vec<&str> {
        match self {
            Branch::Line(line) => vec![&line.node1, &line.node2],
            Branch::Transformer(tfo) => tfo.node_ids.iter().map(String::as_str).collect(),
            Branch::Coupling(coupling) => vec![&coupling.node1, &coupling.node2],
        }
    }
}

impl From<Line> for Branch {
    fn from(line: Line) -> Self {
        Branch::Line(line)
    }
}

impl From<Transformer> for Branch {
    fn from(tfo: Transformer) -> Self {
        Branch::Transformer(tfo)
    }
}

impl From<Coupling> for Branch {
    fn from(coupling: Coupling) -> Self {
        Branch::Coupling(coupling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_ends() {
        let line: Branch = Line::new("L1", "B1", "B2").into();
        assert_eq!(line.id(), "L1");
        assert_eq!(line.node_ids(), vec!["B1", "B2"]);

        let tfo: Branch = Transformer::new("T3", ["B1", "B2", "B3"]).into();
        assert_eq!(tfo.id(), "T3");
        assert_eq!(tfo.node_ids(), vec!["B1", "B2", "B3"]);

        let coupling: Branch = Coupling::new("C1", "B4", "B5").into();
        assert_eq!(coupling.node_ids(), vec!["B4", "B5"]);
    }
}
