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
//! Basic example demonstrating the reactive store
//!
//! This example creates a world, watches a group through a collector and
//! drives a small simulation with the scheduler.

use reactive_store::ecs::{
    Component, Entity, GroupId, ReactiveSystem, Registry, Scheduler, System, SystemResult, Trigger,
    World, WorldConfig,
};

#[derive(Debug)]
struct Position {
    x: f32,
    y: f32,
}

impl Component for Position {}

#[derive(Debug)]
struct Velocity {
    dx: f32,
    dy: f32,
}

impl Component for Velocity {}

// Moves every entity that has both a position and a velocity
struct MovementSystem {
    moving: Option<GroupId>,
}

impl System for MovementSystem {
    fn initialize(&mut self, world: &mut World) -> SystemResult {
        let matcher = world.matcher().all::<(Position, Velocity)>().build();
        self.moving = Some(world.get_group(matcher));
        Ok(())
    }

    fn execute(&mut self, world: &mut World) -> SystemResult {
        let Some(moving) = self.moving else {
            return Ok(());
        };
        for entity in world.group(moving).to_sorted_vec() {
            let (dx, dy) = {
                let velocity = world.get_component::<Velocity>(entity)?;
                (velocity.dx, velocity.dy)
            };
            let position = world.get_component_mut::<Position>(entity)?;
            position.x += dx;
            position.y += dy;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "movement"
    }
}

// Reports entities that started moving since the last tick
struct StartedMovingSystem;

impl System for StartedMovingSystem {
    fn name(&self) -> &str {
        "started-moving"
    }
}

impl ReactiveSystem for StartedMovingSystem {
    fn trigger(&self, registry: &Registry) -> Trigger {
        Trigger::added(registry.matcher().all::<(Velocity,)>().build())
    }

    fn react(&mut self, _world: &mut World, entities: &[Entity]) -> SystemResult {
        for entity in entities {
            println!("  {} started moving", entity);
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Reactive Store - Basic Example");
    println!("==============================\n");

    let config = WorldConfig::new(128, 128).with_logging();
    let mut world = World::with_config(config, Registry::global());
    let mut scheduler = Scheduler::new();
    scheduler.add_system(MovementSystem { moving: None });
    scheduler.add_reactive_system(StartedMovingSystem, &mut world);

    let mut entities = Vec::new();
    for i in 0..4 {
        let entity = world.create_entity();
        world
            .add_component(entity, Position { x: i as f32, y: 0.0 })
            .expect("entity is alive");
        entities.push(entity);
    }
    println!("Created {} entities", world.entity_count());

    scheduler.initialize(&mut world);

    for tick in 0..3 {
        // Give one more entity a velocity each tick.
        world
            .add_component(entities[tick], Velocity { dx: 1.0, dy: 0.5 })
            .expect("entity is alive");

        println!("Tick {}:", tick);
        let report = scheduler.execute(&mut world);
        println!("  {} systems ran, {} failed", report.ran, report.failures.len());
    }

    // Disabled entities drop out of every group until re-enabled.
    world.disable_entity(entities[0]).expect("entity is alive");
    scheduler.execute(&mut world);

    for &entity in &entities {
        let position = world.get_component::<Position>(entity).expect("position attached");
        println!("{} at ({:.1}, {:.1})", entity, position.x, position.y);
    }

    scheduler.teardown(&mut world);
    println!("\nExample completed successfully!");
}
