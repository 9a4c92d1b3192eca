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
//! Live query results
//!
//! A [`Group`] holds every entity currently accepted by one [`Matcher`].
//! The world keeps it current incrementally: after each component change it
//! re-tests only the affected entity against the groups indexed under the
//! changed type. `add` and `remove` are idempotent and report a
//! [`Transition`] only when membership actually flips, which is what the
//! group's listening collectors consume.

use crate::ecs::collector::CollectorId;
use crate::ecs::error::{StoreError, StoreResult};
use crate::ecs::matcher::{Matcher, MatcherTypes};
use crate::ecs::registry::TypeIndex;
use crate::ecs::Entity;
use std::collections::HashSet;

/// Handle to a group owned by a [`World`](crate::ecs::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(usize);

impl GroupId {
    pub(crate) fn new(index: usize) -> Self {
        GroupId(index)
    }

    /// Position of the group in the world's group list
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A change in group membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The entity started matching.
    Added,
    /// The entity stopped matching.
    Removed,
}

/// Incrementally maintained set of entities accepted by one matcher
#[derive(Debug)]
pub struct Group {
    matcher: Matcher,
    types: MatcherTypes,
    members: HashSet<Entity>,
    listeners: Vec<CollectorId>,
}

impl Group {
    pub(crate) fn new(matcher: Matcher, types: MatcherTypes) -> Self {
        Group {
            matcher,
            types,
            members: HashSet::new(),
            listeners: Vec::new(),
        }
    }

    /// The matcher this group answers
    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// Whether an entity with these component types belongs in the group
    pub fn accepts(&self, types: &[TypeIndex]) -> bool {
        self.types.accepts(types)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `entity` is a member
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Iterate over members in no particular order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    /// Members sorted by index
    pub fn to_sorted_vec(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.members.iter().copied().collect();
        entities.sort_unstable();
        entities
    }

    /// The only member of the group
    ///
    /// Fails with [`StoreError::NotASingleton`] unless there is exactly one.
    pub fn single_entity(&self) -> StoreResult<Entity> {
        let mut members = self.members.iter();
        match (members.next(), members.next()) {
            (Some(&entity), None) => Ok(entity),
            _ => Err(StoreError::NotASingleton {
                count: self.members.len(),
            }),
        }
    }

    /// Collectors notified of this group's transitions, in registration order
    pub fn listeners(&self) -> &[CollectorId] {
        &self.listeners
    }

    pub(crate) fn add_listener(&mut self, collector: CollectorId) {
        self.listeners.push(collector);
    }

    /// Insert `entity`; reports a transition only if it was absent
    pub(crate) fn add(&mut self, entity: Entity) -> Option<Transition> {
        self.members.insert(entity).then_some(Transition::Added)
    }

    /// Remove `entity`; reports a transition only if it was present
    pub(crate) fn remove(&mut self, entity: Entity) -> Option<Transition> {
        self.members.remove(&entity).then_some(Transition::Removed)
    }

    /// Re-test `entity` against its current component types
    pub(crate) fn update(&mut self, entity: Entity, types: &[TypeIndex]) -> Option<Transition> {
        if self.types.accepts(types) {
            self.add(entity)
        } else {
            self.remove(entity)
        }
    }

    pub(crate) fn seed(&mut self, entities: impl IntoIterator<Item = Entity>) {
        self.members.extend(entities);
    }
}
