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
//! World management
//!
//! The World is the central container for all ECS data. It owns the entity
//! arena, one [`ComponentStore`] per component type, every [`Group`] and
//! every [`Collector`], and keeps them consistent under mutation.
//!
//! # Change propagation
//!
//! Besides the matcher-to-group cache, the world keeps a reverse index from
//! each component type to the groups whose matcher mentions it. Every group
//! is also indexed under [`Disabled`], so disabling and enabling always
//! re-tests membership. Adding or removing a component of type `T` re-tests
//! the entity only against the groups listed under `T`, then forwards each
//! actual membership change to the group's collectors before the call
//! returns.
//!
//! Groups whose matcher has no all-of and no any-of constraint also accept
//! entities without components, so they are updated on entity creation and
//! destruction as well.

use crate::ecs::collector::{Collector, CollectorId, Trigger};
use crate::ecs::component::{AnyComponentStore, Component, ComponentStore, Disabled};
use crate::ecs::config::WorldConfig;
use crate::ecs::error::{StoreError, StoreResult};
use crate::ecs::group::{Group, GroupId, Transition};
use crate::ecs::matcher::{Matcher, MatcherBuilder, MatcherTypes};
use crate::ecs::record::{EntityArena, EntityRecord};
use crate::ecs::registry::{Registry, TypeIndex};
use crate::ecs::Entity;
use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

/// The main ECS world container
///
/// All operations are synchronous and assume a single mutator; see the
/// crate documentation for the threading model.
pub struct World {
    registry: Arc<Registry>,
    config: WorldConfig,
    entities: EntityArena,
    stores: HashMap<TypeIndex, Box<dyn AnyComponentStore>>,
    groups: Vec<Group>,
    groups_by_matcher: HashMap<Matcher, GroupId>,
    groups_by_type: HashMap<TypeIndex, Vec<GroupId>>,
    open_groups: Vec<GroupId>,
    collectors: Vec<Collector>,
    collectors_by_trigger: HashMap<Trigger, CollectorId>,
}

impl World {
    /// Create a new empty world on the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }

    /// Create a new empty world on the given registry
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self::with_config(WorldConfig::default(), registry)
    }

    /// Create a new empty world with custom configuration
    pub fn with_config(config: WorldConfig, registry: Arc<Registry>) -> Self {
        World {
            registry,
            entities: EntityArena::with_capacity(config.initial_entity_capacity),
            config,
            stores: HashMap::new(),
            groups: Vec::new(),
            groups_by_matcher: HashMap::new(),
            groups_by_type: HashMap::new(),
            open_groups: Vec::new(),
            collectors: Vec::new(),
            collectors_by_trigger: HashMap::new(),
        }
    }

    /// The registry this world resolves component types against
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The configuration this world was built with
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Start building a matcher against this world's registry
    pub fn matcher(&self) -> MatcherBuilder<'_> {
        self.registry.matcher()
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Create a new entity with no components
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        tracing::trace!(%entity, "created entity");

        for &id in &self.open_groups {
            let group = &mut self.groups[id.index()];
            if let Some(transition) = group.update(entity, &[]) {
                dispatch(&mut self.collectors, group.listeners(), entity, transition);
            }
        }
        entity
    }

    /// Destroy an entity
    ///
    /// Components are removed last-attached first, each removal updating
    /// the affected groups, before the index is recycled with a bumped
    /// generation.
    pub fn destroy_entity(&mut self, entity: Entity) -> StoreResult<()> {
        self.record(entity)?;

        while let Some(index) = self.entities.get(entity).and_then(EntityRecord::last_component) {
            if let Some(slot) = self.detach(entity, index) {
                if let Some(store) = self.stores.get_mut(&index) {
                    store.release(slot);
                }
                self.notify_groups(entity, index);
            }
        }

        for &id in &self.open_groups {
            let group = &mut self.groups[id.index()];
            if let Some(transition) = group.remove(entity) {
                dispatch(&mut self.collectors, group.listeners(), entity, transition);
            }
        }

        self.entities.release(entity);
        tracing::trace!(%entity, "destroyed entity");
        Ok(())
    }

    /// Destroy every live entity
    pub fn destroy_all_entities(&mut self) {
        let live: Vec<Entity> = self.entities().collect();
        for entity in live {
            // Handles were just read from the arena, so they are all live.
            let _ = self.destroy_entity(entity);
        }
    }

    /// Check if an entity is alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over alive entities in index order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().map(|(entity, _)| entity)
    }

    /// Type indices of the components attached to `entity`
    pub fn component_types(&self, entity: Entity) -> StoreResult<&[TypeIndex]> {
        Ok(self.record(entity)?.component_types())
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Check whether `entity` carries a `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> StoreResult<bool> {
        let record = self.record(entity)?;
        Ok(self
            .registry
            .types()
            .get::<T>()
            .map_or(false, |index| record.contains(index)))
    }

    /// Get the `T` attached to `entity`
    pub fn get_component<T: Component>(&self, entity: Entity) -> StoreResult<&T> {
        self.try_get_component(entity)?.ok_or(StoreError::ComponentNotFound {
            entity,
            component: type_name::<T>(),
        })
    }

    /// Get the `T` attached to `entity` mutably
    ///
    /// Editing in place does not change the entity's type set, so groups are
    /// not re-evaluated.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> StoreResult<&mut T> {
        let not_found = StoreError::ComponentNotFound {
            entity,
            component: type_name::<T>(),
        };
        let record = self.record(entity)?;
        let Some(index) = self.registry.types().get::<T>() else {
            return Err(not_found);
        };
        let Some(slot) = record.slot_of(index) else {
            return Err(not_found);
        };
        self.typed_store_mut::<T>(index)
            .and_then(|store| store.get_mut(slot))
            .ok_or(not_found)
    }

    /// Get the `T` attached to `entity`, or `None` if it has none
    pub fn try_get_component<T: Component>(&self, entity: Entity) -> StoreResult<Option<&T>> {
        let record = self.record(entity)?;
        let Some(index) = self.registry.types().get::<T>() else {
            return Ok(None);
        };
        Ok(record
            .slot_of(index)
            .and_then(|slot| self.typed_store::<T>(index)?.get(slot)))
    }

    /// Attach `value` to `entity`
    ///
    /// Fails with [`StoreError::DuplicateComponent`] if a `T` is already
    /// attached. On success every group indexed under `T` re-tests the
    /// entity.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<()> {
        let index = self.registry.index_of::<T>();
        if self.record(entity)?.contains(index) {
            return Err(StoreError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }

        let slot = self.store_for::<T>(index).create(value);
        if let Some(record) = self.entities.get_mut(entity) {
            record.attach(index, slot);
        }
        self.notify_groups(entity, index);
        Ok(())
    }

    /// Attach a default-initialized `T` to `entity`
    pub fn add_default_component<T: Component + Default>(&mut self, entity: Entity) -> StoreResult<()> {
        self.add_component(entity, T::default())
    }

    /// Overwrite the `T` attached to `entity`, returning the previous value
    ///
    /// The type set is unchanged, so no group is re-evaluated. Fails with
    /// [`StoreError::ComponentMissing`] if no `T` is attached.
    pub fn replace_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<T> {
        let missing = StoreError::ComponentMissing {
            entity,
            component: type_name::<T>(),
        };
        let record = self.record(entity)?;
        let Some(index) = self.registry.types().get::<T>() else {
            return Err(missing);
        };
        let Some(slot) = record.slot_of(index) else {
            return Err(missing);
        };
        self.typed_store_mut::<T>(index)
            .and_then(|store| store.set(slot, value))
            .ok_or(missing)
    }

    /// Detach the `T` from `entity`, returning it
    ///
    /// Removing a component that is not attached is a no-op returning
    /// `Ok(None)`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> StoreResult<Option<T>> {
        self.record(entity)?;
        let Some(index) = self.registry.types().get::<T>() else {
            return Ok(None);
        };
        let Some(slot) = self.detach(entity, index) else {
            return Ok(None);
        };

        let value = self.typed_store_mut::<T>(index).and_then(|store| store.destroy(slot));
        self.notify_groups(entity, index);
        Ok(value)
    }

    /// Hide `entity` from every group that does not ask for [`Disabled`]
    pub fn disable_entity(&mut self, entity: Entity) -> StoreResult<()> {
        if self.has_component::<Disabled>(entity)? {
            return Ok(());
        }
        self.add_component(entity, Disabled)
    }

    /// Undo [`disable_entity`](Self::disable_entity)
    pub fn enable_entity(&mut self, entity: Entity) -> StoreResult<()> {
        self.remove_component::<Disabled>(entity).map(|_| ())
    }

    /// Whether `entity` is not disabled
    pub fn is_enabled(&self, entity: Entity) -> StoreResult<bool> {
        Ok(!self.record(entity)?.contains(TypeIndex::DISABLED))
    }

    /// Number of live payloads stored for `T`
    pub fn component_count<T: Component>(&self) -> usize {
        self.registry
            .types()
            .get::<T>()
            .and_then(|index| self.stores.get(&index))
            .map_or(0, |store| store.live_count())
    }

    // ------------------------------------------------------------------
    // Groups and collectors
    // ------------------------------------------------------------------

    /// Get the group for `matcher`, creating and seeding it on first use
    ///
    /// Equal matchers always share one group, which lives as long as the
    /// world.
    pub fn get_group(&mut self, matcher: Matcher) -> GroupId {
        if let Some(&id) = self.groups_by_matcher.get(&matcher) {
            return id;
        }

        let types = matcher.resolve(self.registry.type_sets());
        let members = self.scan(&types);
        let member_count = members.len();
        let mut group = Group::new(matcher, types);
        group.seed(members);

        let id = GroupId::new(self.groups.len());
        let mut indices = matcher.indices(&self.registry);
        if let Err(position) = indices.binary_search(&TypeIndex::DISABLED) {
            indices.insert(position, TypeIndex::DISABLED);
        }
        for index in indices {
            self.groups_by_type.entry(index).or_default().push(id);
        }
        if matcher.is_open() {
            self.open_groups.push(id);
        }

        self.groups.push(group);
        self.groups_by_matcher.insert(matcher, id);

        if self.config.log_group_creation {
            tracing::info!(%matcher, group = id.index(), members = member_count, "created group");
        } else {
            tracing::debug!(%matcher, group = id.index(), members = member_count, "created group");
        }
        id
    }

    /// Get a group by handle
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this world.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.index()]
    }

    /// Number of groups created so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Get the collector for `trigger`, creating it (and its group) on first use
    ///
    /// A new collector starts empty; it only sees transitions that happen
    /// after it was created.
    pub fn get_collector(&mut self, trigger: Trigger) -> CollectorId {
        if let Some(&id) = self.collectors_by_trigger.get(&trigger) {
            return id;
        }

        let group = self.get_group(trigger.matcher());
        let id = CollectorId::new(self.collectors.len());
        self.collectors.push(Collector::new(trigger, group));
        self.groups[group.index()].add_listener(id);
        self.collectors_by_trigger.insert(trigger, id);

        tracing::debug!(
            matcher = %trigger.matcher(),
            event = ?trigger.event(),
            collector = id.index(),
            "created collector"
        );
        id
    }

    /// Get a collector by handle
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this world.
    pub fn collector(&self, id: CollectorId) -> &Collector {
        &self.collectors[id.index()]
    }

    /// Get a collector by handle, mutably (to clear it)
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this world.
    pub fn collector_mut(&mut self, id: CollectorId) -> &mut Collector {
        &mut self.collectors[id.index()]
    }

    /// Snapshot a collector's entities and clear it in one step
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this world.
    pub fn drain_collector(&mut self, id: CollectorId) -> Vec<Entity> {
        self.collectors[id.index()].drain()
    }

    /// Number of collectors created so far
    pub fn collector_count(&self) -> usize {
        self.collectors.len()
    }

    /// Recompute, from scratch, the entities a group for `matcher` would hold
    ///
    /// Scans every live entity and caches nothing; prefer
    /// [`get_group`](Self::get_group) for repeated queries.
    pub fn scan_matching(&self, matcher: Matcher) -> Vec<Entity> {
        let mut entities = self.scan(&matcher.resolve(self.registry.type_sets()));
        entities.sort_unstable();
        entities
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn record(&self, entity: Entity) -> StoreResult<&EntityRecord> {
        self.entities
            .get(entity)
            .ok_or(StoreError::EntityDestroyed { entity })
    }

    /// Detach the component of type `index` from a live entity's record
    fn detach(&mut self, entity: Entity, index: TypeIndex) -> Option<usize> {
        self.entities.get_mut(entity)?.detach(index)
    }

    /// Re-test `entity` against every group indexed under `index`
    fn notify_groups(&mut self, entity: Entity, index: TypeIndex) {
        let Some(ids) = self.groups_by_type.get(&index) else {
            return;
        };
        let Some(record) = self.entities.get(entity) else {
            return;
        };
        let types = record.component_types();

        for &id in ids {
            let group = &mut self.groups[id.index()];
            if let Some(transition) = group.update(entity, types) {
                dispatch(&mut self.collectors, group.listeners(), entity, transition);
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, types: &MatcherTypes) -> Vec<Entity> {
        use rayon::prelude::*;

        self.entities
            .records()
            .par_iter()
            .enumerate()
            .filter(|(_, record)| record.is_alive() && types.accepts(record.component_types()))
            .map(|(index, record)| Entity::new(index as u32, record.generation()))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, types: &MatcherTypes) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| types.accepts(record.component_types()))
            .map(|(entity, _)| entity)
            .collect()
    }

    fn typed_store<T: Component>(&self, index: TypeIndex) -> Option<&ComponentStore<T>> {
        self.stores.get(&index)?.as_any().downcast_ref()
    }

    fn typed_store_mut<T: Component>(&mut self, index: TypeIndex) -> Option<&mut ComponentStore<T>> {
        self.stores.get_mut(&index)?.as_any_mut().downcast_mut()
    }

    /// The store for `T`, created on first use
    fn store_for<T: Component>(&mut self, index: TypeIndex) -> &mut ComponentStore<T> {
        let capacity = self.config.initial_component_capacity;
        let store = self.stores.entry(index).or_insert_with(|| {
            let store = ComponentStore::<T>::with_capacity(capacity);
            tracing::debug!(component = store.component_name(), %index, "created component store");
            Box::new(store) as Box<dyn AnyComponentStore>
        });
        match store.as_any_mut().downcast_mut::<ComponentStore<T>>() {
            Some(store) => store,
            None => unreachable!("store for {} holds another component type", type_name::<T>()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward one membership change to a group's collectors
fn dispatch(collectors: &mut [Collector], listeners: &[CollectorId], entity: Entity, transition: Transition) {
    for &listener in listeners {
        collectors[listener.index()].on_transition(entity, transition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::collector::GroupEvent;

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {}

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Velocity {
        dx: f32,
    }
    impl Component for Velocity {}

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Frozen;
    impl Component for Frozen {}

    fn world() -> World {
        World::with_registry(Registry::shared())
    }

    #[test]
    fn test_world_entity_lifecycle() {
        let mut world = world();

        let e1 = world.create_entity();
        let e2 = world.create_entity();

        assert_eq!(world.entity_count(), 2);
        assert!(world.is_alive(e1));
        assert!(world.is_alive(e2));

        world.destroy_entity(e1).unwrap();
        assert_eq!(world.entity_count(), 1);
        assert!(!world.is_alive(e1));
        assert!(world.is_alive(e2));
    }

    #[test]
    fn test_entity_generation() {
        let mut world = world();

        let e1 = world.create_entity();
        world.destroy_entity(e1).unwrap();
        let e2 = world.create_entity();

        assert_eq!(e2.id(), e1.id());
        assert_ne!(e2.generation(), e1.generation());
        assert_eq!(world.destroy_entity(e1), Err(StoreError::EntityDestroyed { entity: e1 }));
    }

    #[test]
    fn test_stale_handle_is_rejected_everywhere() {
        let mut world = world();
        let entity = world.create_entity();
        world.destroy_entity(entity).unwrap();
        let stale = StoreError::EntityDestroyed { entity };

        assert_eq!(world.has_component::<Position>(entity), Err(stale.clone()));
        assert_eq!(world.get_component::<Position>(entity).err(), Some(stale.clone()));
        assert_eq!(world.try_get_component::<Position>(entity).err(), Some(stale.clone()));
        assert_eq!(world.add_component(entity, Position::default()), Err(stale.clone()));
        assert_eq!(world.replace_component(entity, Position::default()).err(), Some(stale.clone()));
        assert_eq!(world.remove_component::<Position>(entity), Err(stale));
    }

    #[test]
    fn test_component_round_trip() {
        let mut world = world();
        let entity = world.create_entity();

        world.add_component(entity, Position { x: 1.0, y: 2.0 }).unwrap();
        assert!(world.has_component::<Position>(entity).unwrap());
        assert_eq!(world.get_component::<Position>(entity).unwrap().y, 2.0);

        world.get_component_mut::<Position>(entity).unwrap().x = 7.0;
        assert_eq!(world.get_component::<Position>(entity).unwrap().x, 7.0);

        let removed = world.remove_component::<Position>(entity).unwrap();
        assert_eq!(removed, Some(Position { x: 7.0, y: 2.0 }));
        assert!(!world.has_component::<Position>(entity).unwrap());

        world.add_default_component::<Position>(entity).unwrap();
        assert_eq!(world.get_component::<Position>(entity).unwrap(), &Position::default());
    }

    #[test]
    fn test_missing_component_errors() {
        let mut world = world();
        let entity = world.create_entity();

        assert!(matches!(
            world.get_component::<Velocity>(entity),
            Err(StoreError::ComponentNotFound { .. })
        ));
        assert!(matches!(
            world.replace_component(entity, Velocity { dx: 1.0 }),
            Err(StoreError::ComponentMissing { .. })
        ));
        assert_eq!(world.try_get_component::<Velocity>(entity), Ok(None));
        assert_eq!(world.remove_component::<Velocity>(entity), Ok(None));
    }

    #[test]
    fn test_duplicate_component() {
        let mut world = world();
        let entity = world.create_entity();
        world.add_component(entity, Velocity { dx: 1.0 }).unwrap();

        let err = world.add_component(entity, Velocity { dx: 2.0 }).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateComponent { .. }));
        assert_eq!(world.get_component::<Velocity>(entity).unwrap().dx, 1.0);
    }

    #[test]
    fn test_replace_keeps_membership() {
        let mut world = world();
        let entity = world.create_entity();
        world.add_component(entity, Velocity { dx: 1.0 }).unwrap();

        let matcher = world.matcher().all::<(Velocity,)>().build();
        let group = world.get_group(matcher);
        let collector = world.get_collector(Trigger::added_or_removed(matcher));

        let previous = world.replace_component(entity, Velocity { dx: 3.0 }).unwrap();
        assert_eq!(previous.dx, 1.0);
        assert_eq!(world.get_component::<Velocity>(entity).unwrap().dx, 3.0);
        assert!(world.group(group).contains(entity));
        assert!(world.collector(collector).is_empty());
    }

    #[test]
    fn test_group_is_cached() {
        let mut world = world();
        let a = world.matcher().all::<(Position, Velocity)>().build();
        let b = world.matcher().all::<(Velocity, Position)>().build();

        assert_eq!(world.get_group(a), world.get_group(b));
        assert_eq!(world.group_count(), 1);
    }

    #[test]
    fn test_group_seeded_from_existing_entities() {
        let mut world = world();
        let moving = world.create_entity();
        world.add_component(moving, Position::default()).unwrap();
        world.add_component(moving, Velocity::default()).unwrap();
        let still = world.create_entity();
        world.add_component(still, Position::default()).unwrap();

        let matcher = world.matcher().all::<(Position, Velocity)>().build();
        let group = world.get_group(matcher);
        assert_eq!(world.group(group).to_sorted_vec(), vec![moving]);
    }

    #[test]
    fn test_group_follows_mutations() {
        let mut world = world();
        let matcher = world.matcher().all::<(Position,)>().exclude::<(Frozen,)>().build();
        let group = world.get_group(matcher);
        let entity = world.create_entity();

        world.add_component(entity, Position::default()).unwrap();
        assert!(world.group(group).contains(entity));

        world.add_component(entity, Frozen).unwrap();
        assert!(!world.group(group).contains(entity));

        world.remove_component::<Frozen>(entity).unwrap();
        assert!(world.group(group).contains(entity));

        world.destroy_entity(entity).unwrap();
        assert!(world.group(group).is_empty());
    }

    #[test]
    fn test_open_group_tracks_bare_entities() {
        let mut world = world();
        let everything = world.get_group(Matcher::new());
        let not_frozen = world.get_group(world.matcher().exclude::<(Frozen,)>().build());

        let entity = world.create_entity();
        assert!(world.group(everything).contains(entity));
        assert!(world.group(not_frozen).contains(entity));

        world.add_component(entity, Frozen).unwrap();
        assert!(world.group(everything).contains(entity));
        assert!(!world.group(not_frozen).contains(entity));

        world.disable_entity(entity).unwrap();
        assert!(!world.group(everything).contains(entity));

        world.destroy_entity(entity).unwrap();
        assert!(world.group(everything).is_empty());
        assert!(world.group(not_frozen).is_empty());
    }

    #[test]
    fn test_collector_sees_removal() {
        let mut world = world();
        let entity = world.create_entity();
        world.add_component(entity, Position::default()).unwrap();

        let matcher = world.matcher().all::<(Position,)>().build();
        let group = world.get_group(matcher);
        let removed = world.get_collector(Trigger::new(matcher, GroupEvent::Removed));
        assert!(world.group(group).contains(entity));

        world.remove_component::<Position>(entity).unwrap();
        assert!(!world.group(group).contains(entity));
        assert_eq!(world.collector(removed).entities().collect::<Vec<_>>(), vec![entity]);

        assert_eq!(world.drain_collector(removed), vec![entity]);
        assert!(!world.collector(removed).has_entities());
    }

    #[test]
    fn test_collector_is_cached_and_listens() {
        let mut world = world();
        let matcher = world.matcher().all::<(Position,)>().build();
        let first = world.get_collector(Trigger::added(matcher));
        let second = world.get_collector(Trigger::added(matcher));
        let removed = world.get_collector(Trigger::removed(matcher));

        assert_eq!(first, second);
        assert_ne!(first, removed);
        assert_eq!(world.collector_count(), 2);
        assert_eq!(world.group_count(), 1);

        let group = world.collector(first).group();
        assert_eq!(world.group(group).listeners(), &[first, removed]);
    }

    #[test]
    fn test_disable_and_enable() {
        let mut world = world();
        let entity = world.create_entity();
        world.add_component(entity, Position::default()).unwrap();

        let positioned = world.get_group(world.matcher().all::<(Position,)>().build());
        let disabled = world.get_group(world.matcher().all::<(Disabled,)>().build());

        world.disable_entity(entity).unwrap();
        world.disable_entity(entity).unwrap();
        assert!(!world.is_enabled(entity).unwrap());
        assert!(!world.group(positioned).contains(entity));
        assert!(world.group(disabled).contains(entity));
        assert!(world.has_component::<Position>(entity).unwrap());

        world.enable_entity(entity).unwrap();
        assert!(world.is_enabled(entity).unwrap());
        assert!(world.group(positioned).contains(entity));
        assert!(!world.group(disabled).contains(entity));
    }

    #[test]
    fn test_destroy_frees_component_slots() {
        let mut world = world();
        let entity = world.create_entity();
        world.add_component(entity, Position::default()).unwrap();
        world.add_component(entity, Velocity::default()).unwrap();
        assert_eq!(world.component_count::<Position>(), 1);

        world.destroy_entity(entity).unwrap();
        assert_eq!(world.component_count::<Position>(), 0);
        assert_eq!(world.component_count::<Velocity>(), 0);
        assert_eq!(world.component_count::<Frozen>(), 0);
    }

    #[test]
    fn test_destroy_all_entities() {
        let mut world = world();
        for _ in 0..5 {
            let entity = world.create_entity();
            world.add_component(entity, Position::default()).unwrap();
        }
        let group = world.get_group(world.matcher().all::<(Position,)>().build());
        assert_eq!(world.group(group).len(), 5);

        world.destroy_all_entities();
        assert_eq!(world.entity_count(), 0);
        assert!(world.group(group).is_empty());
    }

    #[test]
    fn test_scan_matching_agrees_with_group() {
        let mut world = world();
        for i in 0..10 {
            let entity = world.create_entity();
            if i % 2 == 0 {
                world.add_component(entity, Position::default()).unwrap();
            }
            if i % 3 == 0 {
                world.add_component(entity, Velocity::default()).unwrap();
            }
        }

        let matcher = world.matcher().any::<(Position, Velocity)>().build();
        let group = world.get_group(matcher);
        assert_eq!(world.group(group).to_sorted_vec(), world.scan_matching(matcher));
        assert_eq!(world.group(group).len(), 7);
    }
}
