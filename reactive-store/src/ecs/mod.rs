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
//! Entity Component System (ECS) core implementation
//!
//! This module provides the reactive store:
//! - Entity handles with generation-checked recycling
//! - Per-type component storage with free-list slot reuse
//! - Interned type sets and the matchers built from them
//! - Incrementally maintained groups and the collectors that watch them
//! - A phased scheduler for plain and reactive systems

mod collector;
mod component;
mod config;
mod entity;
mod error;
mod group;
mod interner;
mod matcher;
mod record;
mod registry;
mod scheduler;
mod system;
mod world;

pub use collector::{Collector, CollectorId, GroupEvent, Trigger};
pub use component::{AnyComponentStore, Component, ComponentSet, ComponentStore, Disabled};
pub use config::WorldConfig;
pub use entity::{Entity, EntityId};
pub use error::{StoreError, StoreResult, SystemError, SystemResult};
pub use group::{Group, GroupId, Transition};
pub use interner::{TypeSetId, TypeSetInterner};
pub use matcher::{Matcher, MatcherBuilder, MatcherTypes};
pub use record::{EntityArena, EntityRecord};
pub use registry::{Registry, TypeIndex, TypeRegistry};
pub use scheduler::{Phase, PhaseReport, Scheduler};
pub use system::{ReactiveSystem, System};
pub use world::World;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_creation() {
        let world = World::new();
        assert_eq!(world.entity_count(), 0);
        assert!(std::sync::Arc::ptr_eq(world.registry(), &Registry::global()));
    }

    #[test]
    fn test_entity_creation() {
        let mut world = World::with_registry(Registry::shared());
        let entity = world.create_entity();
        assert_eq!(world.entity_count(), 1);
        assert!(world.is_alive(entity));
    }
}
