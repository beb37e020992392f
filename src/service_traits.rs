// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits through which the library queries the
//! services it does not implement itself: switch topology and the
//! availability of dynamic model libraries.

/**
This trait needs to be implemented by the type that knows the switch topology
inside voltage levels.

The library only sees buses and the branches between them.  Which buses of a
voltage level are tied together by closed switches, and whether a bus is
energised at all, comes from the network source.

A map-backed implementation is available as
[`StaticSwitchConnectivity`][crate::services::StaticSwitchConnectivity].

<details>
<summary>Example implementation on top of a network service:</summary>

```ignore
impl frequenz_grid_model_graph::SwitchConnectivity for ServiceManager {
    fn buses_connected_by_switch(&self, node_id: &str, voltage_level_id: &str) -> Vec<String> {
        self.get_buses_connected_by_switch(node_id, voltage_level_id)
            .unwrap_or_else(|e| {
                warn!("Can't compute switch topology of {}: {}", voltage_level_id, e);
                vec![]
            })
    }

    fn is_bus_connected(&self, node_id: &str, voltage_level_id: &str) -> bool {
        self.is_bus_connected(node_id, voltage_level_id)
    }
}
```

</details>
*/
pub trait SwitchConnectivity {
    /// Returns the ids of the buses of the voltage level that are connected to
    /// the given bus through closed switches, not including the bus itself.
    fn buses_connected_by_switch(&self, node_id: &str, voltage_level_id: &str) -> Vec<String>;
    /// Returns true if the given bus is energised.
    fn is_bus_connected(&self, node_id: &str, voltage_level_id: &str) -> bool;
}

/**
This trait needs to be implemented by the type that decides whether the shared
library implementing a dynamic automaton is available at runtime.

Automatons whose library can't be found are dropped from the resolved models.

It is implemented for closures taking the library name, and by
[`SearchPathLibraryResolver`][crate::services::SearchPathLibraryResolver],
which looks for the library file in a list of directories.

```
use frequenz_grid_model_graph::LibraryResolver;

let resolver = |lib: &str| lib != "MissingModel";
assert!(resolver.library_exists("SecondaryVoltageControlSimp"));
assert!(!resolver.library_exists("MissingModel"));
```
*/
pub trait LibraryResolver {
    /// Returns true if the library with the given name can be loaded.
    fn library_exists(&self, library: &str) -> bool;
}

impl<F> LibraryResolver for F
where
    F: Fn(&str) -> bool,
{
    fn library_exists(&self, library: &str) -> bool {
        self(library)
    }
}
