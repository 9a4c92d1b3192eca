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
//! Scheduler integration tests
//!
//! Drives plain and reactive systems through full initialize / execute /
//! teardown cycles against a real world.

use reactive_store::ecs::{
    Component, Entity, GroupId, Phase, ReactiveSystem, Registry, Scheduler, StoreError, System,
    SystemError, SystemResult, Trigger, World,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Health(i32);
impl Component for Health {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Damage(i32);
impl Component for Damage {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dead;
impl Component for Dead {}

/// Applies pending damage every tick
struct DamageSystem {
    damaged: Option<GroupId>,
}

impl System for DamageSystem {
    fn initialize(&mut self, world: &mut World) -> SystemResult {
        let matcher = world.matcher().all::<(Health, Damage)>().build();
        self.damaged = Some(world.get_group(matcher));
        Ok(())
    }

    fn execute(&mut self, world: &mut World) -> SystemResult {
        let Some(group) = self.damaged else {
            return Err(SystemError::Failed("not initialized".to_string()));
        };
        for entity in world.group(group).to_sorted_vec() {
            let damage = world.remove_component::<Damage>(entity)?.map_or(0, |d| d.0);
            let health = world.get_component_mut::<Health>(entity)?;
            health.0 -= damage;
            if health.0 <= 0 {
                world.add_component(entity, Dead)?;
            }
        }
        Ok(())
    }
}

/// Destroys entities once they are marked dead
struct ReaperSystem {
    reaped: Arc<Mutex<Vec<Entity>>>,
}

impl System for ReaperSystem {
    fn name(&self) -> &str {
        "reaper"
    }
}

impl ReactiveSystem for ReaperSystem {
    fn trigger(&self, registry: &Registry) -> Trigger {
        Trigger::added(registry.matcher().all::<(Dead,)>().build())
    }

    fn react(&mut self, world: &mut World, entities: &[Entity]) -> SystemResult {
        for &entity in entities {
            world.destroy_entity(entity)?;
            self.reaped.lock().unwrap().push(entity);
        }
        Ok(())
    }
}

/// Touches a stale handle on every tick
struct StaleHandleSystem {
    stale: Entity,
}

impl System for StaleHandleSystem {
    fn execute(&mut self, world: &mut World) -> SystemResult {
        world.get_component::<Health>(self.stale)?;
        Ok(())
    }
}

#[test]
fn test_damage_then_reap_across_ticks() {
    let reaped = Arc::new(Mutex::new(Vec::new()));
    let mut world = World::with_registry(Registry::shared());
    let mut scheduler = Scheduler::new();
    scheduler.add_system(DamageSystem { damaged: None });
    scheduler.add_reactive_system(ReaperSystem { reaped: Arc::clone(&reaped) }, &mut world);

    let weak = world.create_entity();
    let strong = world.create_entity();
    world.add_component(weak, Health(5)).unwrap();
    world.add_component(strong, Health(50)).unwrap();

    assert!(scheduler.initialize(&mut world).is_clean());

    world.add_component(weak, Damage(10)).unwrap();
    world.add_component(strong, Damage(10)).unwrap();

    // Damage runs first in the same tick, so the reaper already sees the death.
    let report = scheduler.execute(&mut world);
    assert!(report.is_clean());
    assert_eq!(report.ran, 2);
    assert_eq!(*reaped.lock().unwrap(), vec![weak]);
    assert!(!world.is_alive(weak));
    assert_eq!(world.get_component::<Health>(strong).unwrap(), &Health(40));

    let report = scheduler.execute(&mut world);
    assert_eq!(report.ran, 1);

    assert!(scheduler.teardown(&mut world).is_clean());
}

#[test]
fn test_store_errors_surface_as_system_failures() {
    let mut world = World::with_registry(Registry::shared());
    let stale = world.create_entity();
    world.destroy_entity(stale).unwrap();

    let mut system = StaleHandleSystem { stale };
    assert_eq!(
        system.execute(&mut world),
        Err(SystemError::Store(StoreError::EntityDestroyed { entity: stale }))
    );

    let mut scheduler = Scheduler::new();
    scheduler.add_system(system);
    scheduler.add_system(DamageSystem { damaged: None });
    scheduler.initialize(&mut world);

    let report = scheduler.execute(&mut world);
    assert_eq!(report.phase, Phase::Execute);
    assert_eq!(report.ran, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].ends_with("StaleHandleSystem"));
}

#[test]
fn test_uninitialized_system_fails_without_stopping_phase() {
    let reaped = Arc::new(Mutex::new(Vec::new()));
    let mut world = World::with_registry(Registry::shared());
    let mut scheduler = Scheduler::new();
    scheduler.add_system(DamageSystem { damaged: None });
    scheduler.add_reactive_system(ReaperSystem { reaped: Arc::clone(&reaped) }, &mut world);

    let entity = world.create_entity();
    world.add_component(entity, Dead).unwrap();

    let report = scheduler.execute(&mut world);
    assert_eq!(report.ran, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(*reaped.lock().unwrap(), vec![entity]);
}
