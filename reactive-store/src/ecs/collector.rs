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
//! Reactive accumulation of group transitions
//!
//! A [`Collector`] listens to one group and remembers which entities made
//! the kind of transition its [`Trigger`] asks for since it was last
//! cleared. It keeps only the latest transition per entity: with an
//! add-only trigger, an entity that is added and then removed again drops
//! out of the collector.

use crate::ecs::group::{GroupId, Transition};
use crate::ecs::matcher::Matcher;
use crate::ecs::Entity;
use std::collections::BTreeSet;

/// Handle to a collector owned by a [`World`](crate::ecs::World)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectorId(usize);

impl CollectorId {
    pub(crate) fn new(index: usize) -> Self {
        CollectorId(index)
    }

    /// Position of the collector in the world's collector list
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Which group transitions a trigger reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupEvent {
    /// Entities that started matching.
    Added,
    /// Entities that stopped matching.
    Removed,
    /// Both.
    AddedOrRemoved,
}

impl GroupEvent {
    /// Whether this mask covers `transition`
    pub fn includes(&self, transition: Transition) -> bool {
        matches!(
            (self, transition),
            (GroupEvent::AddedOrRemoved, _)
                | (GroupEvent::Added, Transition::Added)
                | (GroupEvent::Removed, Transition::Removed)
        )
    }
}

/// Key of a reactive subscription: a matcher plus an event mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trigger {
    matcher: Matcher,
    event: GroupEvent,
}

impl Trigger {
    /// Create a trigger
    pub fn new(matcher: Matcher, event: GroupEvent) -> Self {
        Trigger { matcher, event }
    }

    /// React to entities that start matching
    pub fn added(matcher: Matcher) -> Self {
        Self::new(matcher, GroupEvent::Added)
    }

    /// React to entities that stop matching
    pub fn removed(matcher: Matcher) -> Self {
        Self::new(matcher, GroupEvent::Removed)
    }

    /// React to both kinds of transition
    pub fn added_or_removed(matcher: Matcher) -> Self {
        Self::new(matcher, GroupEvent::AddedOrRemoved)
    }

    /// The watched matcher
    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// The event mask
    pub fn event(&self) -> GroupEvent {
        self.event
    }
}

/// Entities whose latest transition matched the trigger, since last cleared
#[derive(Debug)]
pub struct Collector {
    trigger: Trigger,
    group: GroupId,
    entities: BTreeSet<Entity>,
}

impl Collector {
    pub(crate) fn new(trigger: Trigger, group: GroupId) -> Self {
        Collector {
            trigger,
            group,
            entities: BTreeSet::new(),
        }
    }

    /// The trigger this collector was created for
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// The group being watched
    pub fn group(&self) -> GroupId {
        self.group
    }

    pub(crate) fn on_transition(&mut self, entity: Entity, transition: Transition) {
        if self.trigger.event.includes(transition) {
            self.entities.insert(entity);
        } else {
            self.entities.remove(&entity);
        }
    }

    /// Collected entities in index order, without clearing
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Whether `entity` is collected
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Number of collected entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if nothing is collected
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether anything is waiting to be consumed
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Forget every collected entity
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Snapshot the collected entities, then clear
    pub fn drain(&mut self) -> Vec<Entity> {
        let snapshot: Vec<Entity> = self.entities.iter().copied().collect();
        self.entities.clear();
        snapshot
    }
}
