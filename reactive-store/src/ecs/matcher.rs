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
//! Query predicates over component types
//!
//! A [`Matcher`] is three interned type sets: all-of, any-of and none-of.
//! Because each set is a [`TypeSetId`], matchers are small `Copy` values
//! that compare and hash in constant time, and composing them is a merge of
//! interned sets. Applying combinators in a different order, or naming the
//! same types in a different order, always yields an equal matcher.
//!
//! A matcher carries exactly one any-of set. Adding more types with
//! [`Matcher::any`] widens that set; it does not create a second,
//! independent "at least one of" requirement.

use crate::ecs::component::ComponentSet;
use crate::ecs::interner::{TypeSetId, TypeSetInterner};
use crate::ecs::registry::{Registry, TypeIndex};
use std::fmt;
use std::sync::Arc;

/// Immutable predicate over an entity's component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Matcher {
    all_of: TypeSetId,
    any_of: TypeSetId,
    none_of: TypeSetId,
}

impl Matcher {
    /// A matcher with no constraints, matching every enabled entity
    pub fn new() -> Self {
        Matcher::default()
    }

    /// Types an entity must all carry
    pub fn all_of(&self) -> TypeSetId {
        self.all_of
    }

    /// Types of which an entity must carry at least one (if non-empty)
    pub fn any_of(&self) -> TypeSetId {
        self.any_of
    }

    /// Types an entity must not carry
    pub fn none_of(&self) -> TypeSetId {
        self.none_of
    }

    /// Require every type in `S`
    pub fn all<S: ComponentSet>(self, registry: &Registry) -> Matcher {
        self.with_all(registry.type_sets(), registry.type_set_of::<S>())
    }

    /// Require at least one type from `S` (together with earlier any-of types)
    pub fn any<S: ComponentSet>(self, registry: &Registry) -> Matcher {
        self.with_any(registry.type_sets(), registry.type_set_of::<S>())
    }

    /// Reject entities carrying any type in `S`
    pub fn exclude<S: ComponentSet>(self, registry: &Registry) -> Matcher {
        self.with_exclude(registry.type_sets(), registry.type_set_of::<S>())
    }

    /// Merge an interned set into the all-of constraint
    pub fn with_all(self, type_sets: &TypeSetInterner, set: TypeSetId) -> Matcher {
        Matcher {
            all_of: type_sets.merge_ids(self.all_of, set),
            ..self
        }
    }

    /// Merge an interned set into the any-of constraint
    pub fn with_any(self, type_sets: &TypeSetInterner, set: TypeSetId) -> Matcher {
        Matcher {
            any_of: type_sets.merge_ids(self.any_of, set),
            ..self
        }
    }

    /// Merge an interned set into the none-of constraint
    pub fn with_exclude(self, type_sets: &TypeSetInterner, set: TypeSetId) -> Matcher {
        Matcher {
            none_of: type_sets.merge_ids(self.none_of, set),
            ..self
        }
    }

    /// Require every type in `indices`, given in any order
    pub fn with_all_indices(self, registry: &Registry, indices: &[TypeIndex]) -> Matcher {
        let set = registry.type_sets().intern(indices.iter().copied());
        self.with_all(registry.type_sets(), set)
    }

    /// Require at least one type in `indices`, given in any order
    pub fn with_any_indices(self, registry: &Registry, indices: &[TypeIndex]) -> Matcher {
        let set = registry.type_sets().intern(indices.iter().copied());
        self.with_any(registry.type_sets(), set)
    }

    /// Reject every type in `indices`, given in any order
    pub fn with_exclude_indices(self, registry: &Registry, indices: &[TypeIndex]) -> Matcher {
        let set = registry.type_sets().intern(indices.iter().copied());
        self.with_exclude(registry.type_sets(), set)
    }

    /// True when neither all-of nor any-of constrains membership
    ///
    /// Such a matcher accepts entities that carry no components at all.
    pub fn is_open(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty()
    }

    /// Look up the sorted type arrays behind this matcher
    pub fn resolve(&self, type_sets: &TypeSetInterner) -> MatcherTypes {
        let all_of = type_sets.types_of(self.all_of);
        let any_of = type_sets.types_of(self.any_of);
        let none_of = type_sets.types_of(self.none_of);
        let sees_disabled = all_of.binary_search(&TypeIndex::DISABLED).is_ok()
            || any_of.binary_search(&TypeIndex::DISABLED).is_ok();

        MatcherTypes {
            all_of,
            any_of,
            none_of,
            sees_disabled,
        }
    }

    /// Every type this matcher mentions, sorted and without duplicates
    pub fn indices(&self, registry: &Registry) -> Vec<TypeIndex> {
        let type_sets = registry.type_sets();
        let mentioned = type_sets.merge_ids(type_sets.merge_ids(self.all_of, self.any_of), self.none_of);
        type_sets.types_of(mentioned).to_vec()
    }

    /// Evaluate the raw predicate against an entity's component types
    ///
    /// The implicit [`Disabled`](crate::ecs::Disabled) exclusion applied by
    /// groups is not part of this test; see [`MatcherTypes::accepts`].
    pub fn matches(&self, registry: &Registry, types: &[TypeIndex]) -> bool {
        self.resolve(registry.type_sets()).matches(types)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matcher(all: {}, any: {}, none: {})",
            self.all_of.raw(),
            self.any_of.raw(),
            self.none_of.raw()
        )
    }
}

/// A matcher with its type sets resolved, ready for repeated evaluation
///
/// Groups keep one of these so evaluating membership never touches the
/// interner lock.
#[derive(Debug, Clone)]
pub struct MatcherTypes {
    all_of: Arc<[TypeIndex]>,
    any_of: Arc<[TypeIndex]>,
    none_of: Arc<[TypeIndex]>,
    sees_disabled: bool,
}

impl MatcherTypes {
    /// Raw predicate: exclusions first, then all-of, then any-of
    pub fn matches(&self, types: &[TypeIndex]) -> bool {
        if types.iter().any(|t| self.none_of.binary_search(t).is_ok()) {
            return false;
        }
        if !self.all_of.iter().all(|t| types.contains(t)) {
            return false;
        }
        self.any_of.is_empty() || self.any_of.iter().any(|t| types.contains(t))
    }

    /// Group membership test: the raw predicate, and disabled entities are
    /// rejected unless the matcher asks for [`Disabled`](crate::ecs::Disabled)
    pub fn accepts(&self, types: &[TypeIndex]) -> bool {
        if !self.sees_disabled && types.contains(&TypeIndex::DISABLED) {
            return false;
        }
        self.matches(types)
    }

    /// Whether `Disabled` appears in the all-of or any-of set
    pub fn sees_disabled(&self) -> bool {
        self.sees_disabled
    }
}

/// Fluent construction of a [`Matcher`] against one registry
///
/// ```
/// use reactive_store::ecs::{Component, Registry};
///
/// struct Position;
/// impl Component for Position {}
/// struct Velocity;
/// impl Component for Velocity {}
/// struct Frozen;
/// impl Component for Frozen {}
///
/// let registry = Registry::new();
/// let moving = registry
///     .matcher()
///     .all::<(Position, Velocity)>()
///     .exclude::<(Frozen,)>()
///     .build();
///
/// let pos = registry.index_of::<Position>();
/// let vel = registry.index_of::<Velocity>();
/// assert!(moving.matches(&registry, &[vel, pos]));
/// ```
pub struct MatcherBuilder<'r> {
    registry: &'r Registry,
    matcher: Matcher,
}

impl<'r> MatcherBuilder<'r> {
    /// Start from an unconstrained matcher
    pub fn new(registry: &'r Registry) -> Self {
        MatcherBuilder {
            registry,
            matcher: Matcher::new(),
        }
    }

    /// Require every type in `S`
    pub fn all<S: ComponentSet>(mut self) -> Self {
        self.matcher = self.matcher.all::<S>(self.registry);
        self
    }

    /// Require at least one type in `S`
    pub fn any<S: ComponentSet>(mut self) -> Self {
        self.matcher = self.matcher.any::<S>(self.registry);
        self
    }

    /// Reject every type in `S`
    pub fn exclude<S: ComponentSet>(mut self) -> Self {
        self.matcher = self.matcher.exclude::<S>(self.registry);
        self
    }

    /// Finish building
    pub fn build(self) -> Matcher {
        self.matcher
    }
}
