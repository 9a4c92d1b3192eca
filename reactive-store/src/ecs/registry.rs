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
//! Component type registration
//!
//! The [`TypeRegistry`] hands out a small, stable [`TypeIndex`] for every
//! component type on first use. Together with the [`TypeSetInterner`] it
//! forms a [`Registry`], which is shared between every [`World`] that needs
//! to agree on type identity.
//!
//! # Concurrency
//!
//! Both tables are filled lazily, from whichever store touches a type
//! first, so they sit behind `parking_lot` locks and are shared through
//! `Arc`. A process-wide instance is available via [`Registry::global`];
//! tests that need isolation construct their own with [`Registry::shared`].
//!
//! [`World`]: crate::ecs::World

use crate::ecs::component::{Component, ComponentSet, Disabled};
use crate::ecs::interner::{TypeSetId, TypeSetInterner};
use crate::ecs::matcher::MatcherBuilder;
use parking_lot::RwLock;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Small integer identifying one component type
///
/// Index 0 is reserved to mean "unindexed", so the first registered type
/// gets index 1. That first type is always [`Disabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeIndex(u32);

impl TypeIndex {
    /// Reserved value that never names a type
    pub const UNINDEXED: TypeIndex = TypeIndex(0);

    /// Index of the [`Disabled`] marker in every registry
    pub const DISABLED: TypeIndex = TypeIndex(1);

    pub(crate) fn new(raw: u32) -> Self {
        TypeIndex(raw)
    }

    /// Get the raw index
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

struct TypeTable {
    by_type: HashMap<TypeId, TypeIndex>,
    names: Vec<&'static str>,
}

/// Append-only table from Rust types to [`TypeIndex`] values
pub struct TypeRegistry {
    table: RwLock<TypeTable>,
}

impl TypeRegistry {
    /// Create a registry with [`Disabled`] already registered at index 1
    pub fn new() -> Self {
        let registry = TypeRegistry {
            table: RwLock::new(TypeTable {
                by_type: HashMap::new(),
                names: vec!["<unindexed>"],
            }),
        };
        let disabled = registry.index_of::<Disabled>();
        debug_assert_eq!(disabled, TypeIndex::DISABLED);
        registry
    }

    /// Get the index of `T`, registering it on first use
    pub fn index_of<T: Component>(&self) -> TypeIndex {
        let type_id = TypeId::of::<T>();
        if let Some(&index) = self.table.read().by_type.get(&type_id) {
            return index;
        }

        let mut table = self.table.write();
        // Another caller may have registered T between the two locks.
        if let Some(&index) = table.by_type.get(&type_id) {
            return index;
        }
        let index = TypeIndex::new(table.names.len() as u32);
        table.names.push(type_name::<T>());
        table.by_type.insert(type_id, index);
        tracing::trace!(component = type_name::<T>(), index = index.0, "registered component type");
        index
    }

    /// Get the index of `T` without registering it
    pub fn get<T: Component>(&self) -> Option<TypeIndex> {
        self.table.read().by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Get the Rust type name registered under `index`
    pub fn type_name(&self, index: TypeIndex) -> Option<&'static str> {
        if index == TypeIndex::UNINDEXED {
            return None;
        }
        self.table.read().names.get(index.0 as usize).copied()
    }

    /// Number of registered types, [`Disabled`] included
    pub fn len(&self) -> usize {
        self.table.read().names.len() - 1
    }

    /// Always false: [`Disabled`] is registered at construction
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared type identity for one or more worlds
///
/// Matchers built against one registry are only meaningful to worlds that
/// use the same registry.
pub struct Registry {
    types: TypeRegistry,
    type_sets: TypeSetInterner,
}

static GLOBAL_REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();

impl Registry {
    /// Create an independent registry
    pub fn new() -> Self {
        Registry {
            types: TypeRegistry::new(),
            type_sets: TypeSetInterner::new(),
        }
    }

    /// Create an independent registry ready to be handed to several worlds
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The process-wide registry used by [`World::new`](crate::ecs::World::new)
    ///
    /// It is created on first call and never torn down.
    pub fn global() -> Arc<Registry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(Registry::shared))
    }

    /// The type table
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The type-set interner
    pub fn type_sets(&self) -> &TypeSetInterner {
        &self.type_sets
    }

    /// Shorthand for `self.types().index_of::<T>()`
    pub fn index_of<T: Component>(&self) -> TypeIndex {
        self.types.index_of::<T>()
    }

    /// Shorthand for `self.types().type_name(index)`
    pub fn type_name(&self, index: TypeIndex) -> Option<&'static str> {
        self.types.type_name(index)
    }

    /// Intern the set of component types named by `S`
    pub fn type_set_of<S: ComponentSet>(&self) -> TypeSetId {
        self.type_sets.intern(S::type_indices(&self.types))
    }

    /// Start building a matcher against this registry
    pub fn matcher(&self) -> MatcherBuilder<'_> {
        MatcherBuilder::new(self)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
