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
//! # Reactive Store
//!
//! An entity-component data store with incrementally maintained queries and
//! reactive change collection.
//!
//! ## Features
//!
//! - **Generational handles**: destroyed entities recycle their index with a
//!   bumped generation, so stale handles are always detected
//! - **Interned type sets**: every combination of component types maps to a
//!   canonical small id, which makes matchers cheap to compare and hash
//! - **Live groups**: the result set of a matcher is kept up to date on every
//!   mutation instead of being recomputed per query
//! - **Collectors**: accumulate the entities that entered or left a group
//!   since they were last drained
//! - **Parallelization**: optional Rayon integration for seeding new groups
//!
//! ## Threading model
//!
//! A [`World`] has a single mutator. The [`Registry`](ecs::Registry) it
//! resolves types against is internally synchronized and may be shared by
//! any number of worlds across threads.
//!
//! ## Example
//!
//! ```rust
//! use reactive_store::ecs::{Component, Registry, Trigger, World};
//!
//! struct Position(f32, f32);
//! impl Component for Position {}
//!
//! let mut world = World::with_registry(Registry::shared());
//! let positioned = world.matcher().all::<(Position,)>().build();
//! let group = world.get_group(positioned);
//! let removed = world.get_collector(Trigger::removed(positioned));
//!
//! let entity = world.create_entity();
//! world.add_component(entity, Position(0.0, 0.0)).unwrap();
//! assert!(world.group(group).contains(entity));
//!
//! world.remove_component::<Position>(entity).unwrap();
//! assert!(world.group(group).is_empty());
//! assert_eq!(world.drain_collector(removed), vec![entity]);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

pub use ecs::{Entity, World};
