// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! World configuration

/// Tuning knobs for a [`World`](crate::ecs::World)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldConfig {
    /// Entity records reserved up front
    pub initial_entity_capacity: usize,
    /// Slots reserved in each component store when it is first created
    pub initial_component_capacity: usize,
    /// Log group creation at `info` instead of `debug`
    pub log_group_creation: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            initial_entity_capacity: 64,
            initial_component_capacity: 64,
            log_group_creation: false,
        }
    }
}

impl WorldConfig {
    /// Create a configuration with custom capacities
    pub fn new(initial_entity_capacity: usize, initial_component_capacity: usize) -> Self {
        WorldConfig {
            initial_entity_capacity,
            initial_component_capacity,
            log_group_creation: false,
        }
    }

    /// Enable `info`-level logging of group creation
    pub fn with_logging(mut self) -> Self {
        self.log_group_creation = true;
        self
    }

    /// Set the number of entity records reserved up front
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.initial_entity_capacity = capacity;
        self
    }

    /// Set the slots reserved per component store
    pub fn with_component_capacity(mut self, capacity: usize) -> Self {
        self.initial_component_capacity = capacity;
        self
    }
}
