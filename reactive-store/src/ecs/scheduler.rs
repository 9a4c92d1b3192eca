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
//! Phased system scheduler
//!
//! The scheduler runs an ordered list of systems through three phases:
//! initialize, execute and teardown. Systems run in registration order.
//! A failing system is logged and counted in the returned [`PhaseReport`];
//! it never stops the systems after it.
//!
//! Reactive systems acquire their collector when they are registered. On
//! each execute phase the scheduler checks the collector, snapshots and
//! clears it, filters the snapshot and only then calls
//! [`ReactiveSystem::react`], so anything the system changes while reacting
//! is collected for the next run.

use crate::ecs::collector::CollectorId;
use crate::ecs::error::SystemResult;
use crate::ecs::system::{ReactiveSystem, System};
use crate::ecs::{Entity, World};
use std::fmt;

/// One of the three scheduler phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Run once before the first tick
    Initialize,
    /// Run every tick
    Execute,
    /// Run once at shutdown
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialize => "initialize",
            Phase::Execute => "execute",
            Phase::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

/// Outcome of running one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    /// The phase that ran
    pub phase: Phase,
    /// Number of systems that were actually invoked
    pub ran: usize,
    /// Names of the systems that returned an error, in run order
    pub failures: Vec<String>,
}

impl PhaseReport {
    fn new(phase: Phase) -> Self {
        PhaseReport {
            phase,
            ran: 0,
            failures: Vec::new(),
        }
    }

    /// True when no system failed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Scheduled {
    Plain(Box<dyn System>),
    Reactive {
        system: Box<dyn ReactiveSystem>,
        collector: CollectorId,
    },
}

impl Scheduled {
    fn name(&self) -> &str {
        match self {
            Scheduled::Plain(system) => system.name(),
            Scheduled::Reactive { system, .. } => system.name(),
        }
    }

    /// Run one phase; `None` means the system had nothing to do
    fn run(&mut self, phase: Phase, world: &mut World) -> Option<SystemResult> {
        match (self, phase) {
            (Scheduled::Plain(system), Phase::Initialize) => Some(system.initialize(world)),
            (Scheduled::Plain(system), Phase::Execute) => Some(system.execute(world)),
            (Scheduled::Plain(system), Phase::Teardown) => Some(system.teardown(world)),
            (Scheduled::Reactive { system, .. }, Phase::Initialize) => Some(system.initialize(world)),
            (Scheduled::Reactive { system, .. }, Phase::Teardown) => Some(system.teardown(world)),
            (Scheduled::Reactive { system, collector }, Phase::Execute) => {
                if !world.collector(*collector).has_entities() {
                    return None;
                }
                let entities: Vec<Entity> = world
                    .drain_collector(*collector)
                    .into_iter()
                    .filter(|&entity| system.filter(world, entity))
                    .collect();
                if entities.is_empty() {
                    return None;
                }
                Some(system.react(world, &entities))
            }
        }
    }
}

/// Ordered runner for plain and reactive systems
///
/// # Examples
///
/// ```
/// use reactive_store::ecs::{Registry, Scheduler, System, World};
///
/// struct Tick;
/// impl System for Tick {}
///
/// let mut world = World::with_registry(Registry::shared());
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(Tick);
///
/// assert!(scheduler.initialize(&mut world).is_clean());
/// assert_eq!(scheduler.execute(&mut world).ran, 1);
/// scheduler.teardown(&mut world);
/// ```
pub struct Scheduler {
    systems: Vec<Scheduled>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler { systems: Vec::new() }
    }

    /// Append a plain system
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Scheduled::Plain(Box::new(system)));
    }

    /// Append a reactive system, acquiring its collector from `world`
    ///
    /// The collector only gathers transitions that happen after this call.
    pub fn add_reactive_system<S: ReactiveSystem + 'static>(&mut self, system: S, world: &mut World) -> CollectorId {
        let trigger = system.trigger(world.registry());
        let collector = world.get_collector(trigger);
        tracing::debug!(system = system.name(), collector = collector.index(), "registered reactive system");
        self.systems.push(Scheduled::Reactive {
            system: Box::new(system),
            collector,
        });
        collector
    }

    /// Run every system's `initialize`
    pub fn initialize(&mut self, world: &mut World) -> PhaseReport {
        self.run_phase(Phase::Initialize, world)
    }

    /// Run every system's `execute` (or `react`, for reactive systems)
    pub fn execute(&mut self, world: &mut World) -> PhaseReport {
        self.run_phase(Phase::Execute, world)
    }

    /// Run every system's `teardown`
    pub fn teardown(&mut self, world: &mut World) -> PhaseReport {
        self.run_phase(Phase::Teardown, world)
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Remove all systems
    ///
    /// Collectors acquired for reactive systems stay in the world.
    pub fn clear(&mut self) {
        self.systems.clear();
    }

    fn run_phase(&mut self, phase: Phase, world: &mut World) -> PhaseReport {
        let mut report = PhaseReport::new(phase);

        for scheduled in &mut self.systems {
            let Some(result) = scheduled.run(phase, world) else {
                continue;
            };
            report.ran += 1;
            if let Err(error) = result {
                let system = scheduled.name();
                tracing::error!(system, %phase, %error, "system failed");
                report.failures.push(system.to_string());
            }
        }

        tracing::trace!(%phase, ran = report.ran, failed = report.failures.len(), "phase complete");
        report
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
