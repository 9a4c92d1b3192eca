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
//! System traits
//!
//! Systems hold the logic that runs against a [`World`]. A plain
//! [`System`] may take part in any of the three scheduler phases; a
//! [`ReactiveSystem`] additionally declares a [`Trigger`] and, during the
//! execute phase, only sees the entities its collector gathered since the
//! previous run.

use crate::ecs::collector::Trigger;
use crate::ecs::error::SystemResult;
use crate::ecs::registry::Registry;
use crate::ecs::{Entity, World};

/// Trait for systems that operate on the ECS world
///
/// Every phase defaults to a no-op, so a system only implements the
/// phases it cares about.
pub trait System: Send + Sync {
    /// Called once by [`Scheduler::initialize`](crate::ecs::Scheduler::initialize)
    fn initialize(&mut self, _world: &mut World) -> SystemResult {
        Ok(())
    }

    /// Called every tick by [`Scheduler::execute`](crate::ecs::Scheduler::execute)
    fn execute(&mut self, _world: &mut World) -> SystemResult {
        Ok(())
    }

    /// Called once by [`Scheduler::teardown`](crate::ecs::Scheduler::teardown)
    fn teardown(&mut self, _world: &mut World) -> SystemResult {
        Ok(())
    }

    /// Get the name of this system for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A system driven by a collector instead of running unconditionally
///
/// The scheduler replaces [`System::execute`] with [`react`](Self::react)
/// for these systems; `initialize` and `teardown` still apply.
pub trait ReactiveSystem: System {
    /// The subscription this system consumes, resolved once at registration
    fn trigger(&self, registry: &Registry) -> Trigger;

    /// Whether a collected entity should still be handed to [`react`](Self::react)
    ///
    /// Entities can be destroyed between being collected and being
    /// processed, so the default keeps only live ones.
    fn filter(&self, world: &World, entity: Entity) -> bool {
        world.is_alive(entity)
    }

    /// Process the entities collected since the previous run
    ///
    /// Never called with an empty slice.
    fn react(&mut self, world: &mut World, entities: &[Entity]) -> SystemResult;
}
