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
//! Error types for store and scheduler operations
//!
//! Every failure here is local and synchronous: it is returned at the call
//! site and the store is left unchanged. Removing a component that is not
//! attached is deliberately not an error.

use crate::ecs::Entity;
use thiserror::Error;

/// Errors returned by [`World`](crate::ecs::World) and [`Group`](crate::ecs::Group) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The handle's generation no longer matches the live record.
    #[error("{entity} has been destroyed")]
    EntityDestroyed {
        /// The stale handle.
        entity: Entity,
    },

    /// `get_component` on a component that is not attached.
    #[error("{entity} has no component {component}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// Type name of the requested component.
        component: &'static str,
    },

    /// `replace_component` on a component that is not attached.
    #[error("cannot replace missing component {component} on {entity}")]
    ComponentMissing {
        /// The entity that was addressed.
        entity: Entity,
        /// Type name of the component.
        component: &'static str,
    },

    /// `add_component` on a component that is already attached.
    #[error("{entity} already has component {component}")]
    DuplicateComponent {
        /// The entity that was addressed.
        entity: Entity,
        /// Type name of the component.
        component: &'static str,
    },

    /// `single_entity` on a group that does not hold exactly one member.
    #[error("expected exactly one entity in group, found {count}")]
    NotASingleton {
        /// Actual membership size.
        count: usize,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by system callbacks run from a [`Scheduler`](crate::ecs::scheduler::Scheduler)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SystemError {
    /// A store call inside the system failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The system reported its own failure.
    #[error("system failed: {0}")]
    Failed(String),
}

/// Result type for system callbacks.
pub type SystemResult = Result<(), SystemError>;
