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
//! Component storage and management
//!
//! Components are data containers that can be attached to entities.
//! Each component type lives in its own [`ComponentStore`], a dense array of
//! slots with a free list. Slot indices never move, so an entity record can
//! cache the slot of each of its components.

use crate::ecs::registry::{TypeIndex, TypeRegistry};
use std::any::{type_name, Any};

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior.
pub trait Component: 'static + Send + Sync {}

/// Marker that hides an entity from every group that does not ask for it
///
/// Attaching `Disabled` keeps the entity's other components in place.
/// Groups whose matcher names `Disabled` in its all-of or any-of set still
/// see disabled entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disabled;

impl Component for Disabled {}

/// A static list of component types, written as a tuple
///
/// ```
/// use reactive_store::ecs::{Component, Registry};
///
/// struct Position;
/// impl Component for Position {}
/// struct Velocity;
/// impl Component for Velocity {}
///
/// let registry = Registry::new();
/// let moving = registry.type_set_of::<(Position, Velocity)>();
/// assert_eq!(moving, registry.type_set_of::<(Velocity, Position)>());
/// ```
pub trait ComponentSet: 'static {
    /// Resolve the type index of every member, in tuple order
    fn type_indices(types: &TypeRegistry) -> Vec<TypeIndex>;
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn type_indices(types: &TypeRegistry) -> Vec<TypeIndex> {
                vec![$(types.index_of::<$name>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Dense per-type payload storage with slot reuse
///
/// `create` reuses the most recently freed slot before growing the backing
/// array. `destroy` never shifts other slots, so indices held elsewhere stay
/// valid.
///
/// ```
/// use reactive_store::ecs::{Component, ComponentStore};
///
/// struct Health(u32);
/// impl Component for Health {}
///
/// let mut store = ComponentStore::new();
/// let slot = store.create(Health(10));
/// assert_eq!(store.get(slot).map(|h| h.0), Some(10));
///
/// store.destroy(slot);
/// assert_eq!(store.create(Health(3)), slot);
/// ```
pub struct ComponentStore<T: Component> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T: Component> ComponentStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a store with room for `capacity` payloads before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        ComponentStore {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store `value` and return its slot
    pub fn create(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(slot) => {
                debug_assert!(self.slots[slot].is_none());
                self.slots[slot] = Some(value);
                slot
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }

    /// Free `slot`, returning the payload it held
    ///
    /// Returns `None` if the slot was already free or never allocated.
    pub fn destroy(&mut self, slot: usize) -> Option<T> {
        let value = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        Some(value)
    }

    /// Get the payload in `slot`
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)?.as_ref()
    }

    /// Get the payload in `slot` mutably
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Overwrite the payload in a live slot, returning the previous value
    ///
    /// Returns `None` and stores nothing if the slot is not live.
    pub fn set(&mut self, slot: usize, value: T) -> Option<T> {
        let current = self.slots.get_mut(slot)?.as_mut()?;
        Some(std::mem::replace(current, value))
    }

    /// Number of live payloads
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the store holds no live payloads
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, live or free
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Iterate over live payloads with their slots
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| value.as_ref().map(|v| (slot, v)))
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStore`] held by the world
pub trait AnyComponentStore: Send + Sync {
    /// Free a slot without knowing the payload type
    fn release(&mut self, slot: usize);

    /// Number of live payloads
    fn live_count(&self) -> usize;

    /// Rust type name of the stored component
    fn component_name(&self) -> &'static str;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponentStore for ComponentStore<T> {
    fn release(&mut self, slot: usize) {
        self.destroy(slot);
    }

    fn live_count(&self) -> usize {
        self.len()
    }

    fn component_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
