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
//! Entity records and the generational arena that owns them
//!
//! Each slot keeps a generation counter plus two parallel arrays: the type
//! index of every attached component and the [`ComponentStore`] slot that
//! holds its payload. Components are appended on attach and swap-removed on
//! detach, so their order carries no meaning.
//!
//! [`ComponentStore`]: crate::ecs::ComponentStore

use crate::ecs::registry::TypeIndex;
use crate::ecs::Entity;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Live state of one entity slot
#[derive(Debug, Clone, Default)]
pub struct EntityRecord {
    generation: u32,
    alive: bool,
    component_types: Vec<TypeIndex>,
    component_slots: Vec<usize>,
}

impl EntityRecord {
    /// Current generation of this slot
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the slot currently holds a live entity
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Type indices of the attached components, in no particular order
    pub fn component_types(&self) -> &[TypeIndex] {
        &self.component_types
    }

    /// Storage slots, positionally paired with [`component_types`](Self::component_types)
    pub fn component_slots(&self) -> &[usize] {
        &self.component_slots
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.component_types.len()
    }

    /// Whether a component of type `index` is attached
    pub fn contains(&self, index: TypeIndex) -> bool {
        self.component_types.contains(&index)
    }

    /// Storage slot of the component of type `index`, if attached
    pub fn slot_of(&self, index: TypeIndex) -> Option<usize> {
        let position = self.component_types.iter().position(|&t| t == index)?;
        Some(self.component_slots[position])
    }

    /// Type of the most recently appended component
    pub fn last_component(&self) -> Option<TypeIndex> {
        self.component_types.last().copied()
    }

    pub(crate) fn attach(&mut self, index: TypeIndex, slot: usize) {
        debug_assert!(!self.contains(index), "component attached twice");
        self.component_types.push(index);
        self.component_slots.push(slot);
    }

    /// Swap-remove the component of type `index`, returning its slot
    pub(crate) fn detach(&mut self, index: TypeIndex) -> Option<usize> {
        let position = self.component_types.iter().position(|&t| t == index)?;
        self.component_types.swap_remove(position);
        Some(self.component_slots.swap_remove(position))
    }
}

/// Generational arena of entity records
///
/// Freed indices are recycled lowest-first. A recycled slot keeps the
/// generation bumped by its last release, so a new handle never equals a
/// handle that was destroyed.
#[derive(Debug, Default)]
pub struct EntityArena {
    records: Vec<EntityRecord>,
    free: BinaryHeap<Reverse<u32>>,
    alive: usize,
}

impl EntityArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        EntityArena {
            records: Vec::with_capacity(capacity),
            free: BinaryHeap::new(),
            alive: 0,
        }
    }

    /// Allocate a live entity, recycling the lowest free index if any
    pub fn create(&mut self) -> Entity {
        let index = match self.free.pop() {
            Some(Reverse(index)) => index,
            None => {
                self.records.push(EntityRecord::default());
                (self.records.len() - 1) as u32
            }
        };

        let record = &mut self.records[index as usize];
        debug_assert!(!record.alive && record.component_types.is_empty());
        record.alive = true;
        self.alive += 1;
        Entity::new(index, record.generation)
    }

    /// Whether `entity` refers to the live occupant of its slot
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Record of a live entity
    pub fn get(&self, entity: Entity) -> Option<&EntityRecord> {
        self.records
            .get(entity.index())
            .filter(|r| r.alive && r.generation == entity.generation())
    }

    /// Mutable record of a live entity
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        self.records
            .get_mut(entity.index())
            .filter(|r| r.alive && r.generation == entity.generation())
    }

    /// Retire a live entity whose components have all been detached
    ///
    /// Returns false if the handle is stale.
    pub fn release(&mut self, entity: Entity) -> bool {
        let Some(record) = self.get_mut(entity) else {
            return false;
        };
        debug_assert!(record.component_types.is_empty(), "released entity still has components");

        record.alive = false;
        record.generation = record.generation.wrapping_add(1);
        self.free.push(Reverse(entity.id().raw()));
        self.alive -= 1;
        true
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.alive
    }

    /// Check if no entity is alive
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Number of slots ever allocated
    pub fn slot_count(&self) -> usize {
        self.records.len()
    }

    /// All records by slot index, dead ones included
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Iterate over live entities and their records in index order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &EntityRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.alive)
            .map(|(index, r)| (Entity::new(index as u32, r.generation), r))
    }
}
