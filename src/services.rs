// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Ready-made implementations of the [`SwitchConnectivity`] and
//! [`LibraryResolver`] traits.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use crate::{LibraryResolver, SwitchConnectivity};

/// A [`SwitchConnectivity`] backed by explicit groups of buses tied together
/// by closed switches.
///
/// Bus ids are unique across the network, so voltage level ids are not used
/// for lookups.
#[derive(Clone, Debug, Default)]
pub struct StaticSwitchConnectivity {
    groups: HashMap<String, BTreeSet<String>>,
    disconnected: HashSet<String>,
}

impl StaticSwitchConnectivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that all the given buses are tied together by closed
    /// switches.  Groups sharing a bus are merged.
    pub fn connect<S: AsRef<str>>(&mut self, bus_ids: &[S]) -> &mut Self {
        let mut group: BTreeSet<String> = bus_ids.iter().map(|b| b.as_ref().to_string()).collect();
        for bus_id in bus_ids {
            if let Some(existing) = self.groups.get(bus_id.as_ref()) {
                group.extend(existing.iter().cloned());
            }
        }
        for bus_id in &group {
            self.groups.insert(bus_id.clone(), group.clone());
        }
        self
    }

    /// Declares that the given bus is not energised.
    pub fn disconnect(&mut self, bus_id: impl Into<String>) -> &mut Self {
        self.disconnected.insert(bus_id.into());
        self
    }
}

impl SwitchConnectivity for StaticSwitchConnectivity {
    fn buses_connected_by_switch(&self, node_id: &str, _voltage_level_id: &str) -> Vec<String> {
        self.groups
            .get(node_id)
            .map(|group| group.iter().filter(|b| *b != node_id).cloned().collect())
            .unwrap_or_default()
    }

    fn is_bus_connected(&self, node_id: &str, _voltage_level_id: &str) -> bool {
        !self.disconnected.contains(node_id)
    }
}

/// A [`LibraryResolver`] looking for `<library><platform suffix>` files in a
/// list of directories.
#[derive(Clone, Debug, Default)]
pub struct SearchPathLibraryResolver {
    directories: Vec<PathBuf>,
}

impl SearchPathLibraryResolver {
    pub fn new(directories: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            directories: directories.into_iter().collect(),
        }
    }

    /// Creates a resolver searching the directories listed in the given
    /// environment variable, separated the way `PATH` is on this platform.
    ///
    /// An unset variable gives a resolver that finds nothing.
    pub fn from_env(variable: &str) -> Self {
        let directories = std::env::var_os(variable)
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { directories }
    }

    fn file_name(library: &str) -> String {
        format!("{library}{}", std::env::consts::DLL_SUFFIX)
    }
}

impl LibraryResolver for SearchPathLibraryResolver {
    fn library_exists(&self, library: &str) -> bool {
        let file_name = Self::file_name(library);
        self.directories
            .iter()
            .any(|dir| dir.join(&file_name).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_switch_connectivity() {
        let mut switches = StaticSwitchConnectivity::new();
        switches.connect(&["B1", "B2"]).connect(&["B3", "B2"]);
        switches.disconnect("B4");

        assert_eq!(
            switches.buses_connected_by_switch("B1", "VL"),
            vec!["B2".to_string(), "B3".to_string()]
        );
        assert_eq!(
            switches.buses_connected_by_switch("B3", "VL"),
            vec!["B1".to_string(), "B2".to_string()]
        );
        assert!(switches.buses_connected_by_switch("B5", "VL").is_empty());

        assert!(switches.is_bus_connected("B1", "VL"));
        assert!(!switches.is_bus_connected("B4", "VL"));
    }

    #[test]
    fn test_search_path_library_resolver() -> std::io::Result<()> {
        let dir = std::env::temp_dir().join(format!("grid-model-libs-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(SearchPathLibraryResolver::file_name("SVC")), b"")?;

        let resolver = SearchPathLibraryResolver::new([dir.clone()]);
        assert!(resolver.library_exists("SVC"));
        assert!(!resolver.library_exists("Missing"));

        let empty = SearchPathLibraryResolver::from_env("GRID_MODEL_GRAPH_UNSET_VARIABLE");
        assert!(!empty.library_exists("SVC"));

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
