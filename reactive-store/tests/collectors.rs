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
//! Collector tests
//!
//! A collector holds exactly the entities whose latest transition on the
//! underlying group matches its event, until it is drained or cleared.

use reactive_store::ecs::{Component, GroupEvent, Registry, Trigger, World};

#[derive(Debug, Default, Clone, PartialEq)]
struct Position(i32, i32);
impl Component for Position {}

#[derive(Debug, Default, Clone, PartialEq)]
struct Sleeping;
impl Component for Sleeping {}

fn world() -> World {
    World::with_registry(Registry::shared())
}

#[test]
fn test_removed_collector_scenario() {
    let mut world = world();
    let entity = world.create_entity();
    world.add_component(entity, Position(1, 2)).unwrap();

    let matcher = world.matcher().all::<(Position,)>().build();
    let group = world.get_group(matcher);
    assert!(world.group(group).contains(entity));

    let removed = world.get_collector(Trigger::removed(matcher));
    world.remove_component::<Position>(entity).unwrap();

    assert!(!world.group(group).contains(entity));
    assert_eq!(world.collector(removed).entities().collect::<Vec<_>>(), vec![entity]);
    assert_eq!(world.collector(removed).len(), 1);

    world.collector_mut(removed).clear();
    assert!(world.collector(removed).is_empty());
}

#[test]
fn test_added_collector_follows_latest_transition() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().exclude::<(Sleeping,)>().build();
    let added = world.get_collector(Trigger::added(matcher));

    let entity = world.create_entity();
    world.add_component(entity, Position::default()).unwrap();
    assert!(world.collector(added).contains(entity));

    // Leaving the group again cancels the pending addition.
    world.add_component(entity, Sleeping).unwrap();
    assert!(!world.collector(added).contains(entity));

    world.remove_component::<Sleeping>(entity).unwrap();
    assert!(world.collector(added).contains(entity));
}

#[test]
fn test_cleared_entities_are_not_resurrected() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().build();
    let added = world.get_collector(Trigger::added(matcher));

    let entity = world.create_entity();
    world.add_component(entity, Position(0, 0)).unwrap();
    assert_eq!(world.drain_collector(added), vec![entity]);

    // Edits that do not change membership are not transitions.
    world.replace_component(entity, Position(5, 5)).unwrap();
    world.get_component_mut::<Position>(entity).unwrap().0 = 6;
    world.add_component(entity, Sleeping).unwrap();
    assert!(!world.collector(added).has_entities());

    world.remove_component::<Position>(entity).unwrap();
    assert!(!world.collector(added).has_entities());

    world.add_component(entity, Position(1, 1)).unwrap();
    assert_eq!(world.drain_collector(added), vec![entity]);
}

#[test]
fn test_added_or_removed_collects_both() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().build();
    let both = world.get_collector(Trigger::new(matcher, GroupEvent::AddedOrRemoved));

    let stays = world.create_entity();
    let leaves = world.create_entity();
    world.add_component(leaves, Position::default()).unwrap();
    world.drain_collector(both);

    world.add_component(stays, Position::default()).unwrap();
    world.remove_component::<Position>(leaves).unwrap();

    assert_eq!(world.drain_collector(both), vec![stays, leaves]);
}

#[test]
fn test_collectors_share_group_and_are_cached() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().build();
    let added = world.get_collector(Trigger::added(matcher));
    let removed = world.get_collector(Trigger::removed(matcher));

    assert_eq!(world.get_collector(Trigger::added(matcher)), added);
    assert_eq!(world.collector(added).group(), world.collector(removed).group());
    assert_eq!(world.group_count(), 1);
    assert_eq!(world.collector_count(), 2);

    let entity = world.create_entity();
    world.add_component(entity, Position::default()).unwrap();
    assert!(world.collector(added).contains(entity));
    assert!(!world.collector(removed).contains(entity));

    world.remove_component::<Position>(entity).unwrap();
    assert!(!world.collector(added).contains(entity));
    assert!(world.collector(removed).contains(entity));
}

#[test]
fn test_collector_starts_empty() {
    let mut world = world();
    let entity = world.create_entity();
    world.add_component(entity, Position::default()).unwrap();

    let matcher = world.matcher().all::<(Position,)>().build();
    let added = world.get_collector(Trigger::added(matcher));
    assert!(world.collector(added).is_empty());
    assert!(world.group(world.collector(added).group()).contains(entity));
}

#[test]
fn test_destroy_reports_removal() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().build();
    let removed = world.get_collector(Trigger::removed(matcher));

    let entity = world.create_entity();
    world.add_component(entity, Position::default()).unwrap();
    world.destroy_entity(entity).unwrap();

    assert_eq!(world.drain_collector(removed), vec![entity]);
    assert!(!world.is_alive(entity));
}

#[test]
fn test_disable_reports_removal_and_enable_reports_addition() {
    let mut world = world();
    let matcher = world.matcher().all::<(Position,)>().build();
    let added = world.get_collector(Trigger::added(matcher));
    let removed = world.get_collector(Trigger::removed(matcher));

    let entity = world.create_entity();
    world.add_component(entity, Position::default()).unwrap();
    world.drain_collector(added);

    world.disable_entity(entity).unwrap();
    assert_eq!(world.drain_collector(removed), vec![entity]);

    world.enable_entity(entity).unwrap();
    assert_eq!(world.drain_collector(added), vec![entity]);
}
