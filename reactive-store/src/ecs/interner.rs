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
//! Canonical ids for sets of component types
//!
//! A type-set id names one unordered set of [`TypeIndex`] values. The
//! interner stores every distinct set once, as a sorted slice, so two sets
//! with the same elements always resolve to the same id and the slice
//! behind an id can be shared without copying.

use crate::ecs::registry::TypeIndex;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Interned id of a set of component types
///
/// Id 0 is always the empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TypeSetId(u32);

impl TypeSetId {
    /// The id of the empty set
    pub const EMPTY: TypeSetId = TypeSetId(0);

    /// Get the raw id
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Whether this is the id of the empty set
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for TypeSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeSet({})", self.0)
    }
}

struct InternTable {
    sets: Vec<Arc<[TypeIndex]>>,
    ids: HashMap<Arc<[TypeIndex]>, TypeSetId>,
}

impl InternTable {
    fn intern(&mut self, sorted: &[TypeIndex]) -> TypeSetId {
        if let Some(&id) = self.ids.get(sorted) {
            return id;
        }

        let id = TypeSetId(self.sets.len() as u32);
        let set: Arc<[TypeIndex]> = Arc::from(sorted);
        self.sets.push(Arc::clone(&set));
        self.ids.insert(set, id);
        id
    }
}

/// Intern table mapping sorted type-index sets to [`TypeSetId`]s
///
/// Entries are never removed; an id stays valid for the lifetime of the
/// interner.
pub struct TypeSetInterner {
    table: Mutex<InternTable>,
}

impl TypeSetInterner {
    /// Create an interner holding only the empty set
    pub fn new() -> Self {
        let empty: Arc<[TypeIndex]> = Arc::from(Vec::new());
        let mut ids = HashMap::new();
        ids.insert(Arc::clone(&empty), TypeSetId::EMPTY);

        TypeSetInterner {
            table: Mutex::new(InternTable {
                sets: vec![empty],
                ids,
            }),
        }
    }

    /// Get the id of a sorted, duplicate-free set, interning it on first sight
    ///
    /// Use [`intern`](Self::intern) when the input is in arbitrary order.
    pub fn id_of(&self, sorted: &[TypeIndex]) -> TypeSetId {
        debug_assert!(
            is_sorted_unique(sorted),
            "type set must be sorted and free of duplicates"
        );
        if sorted.is_empty() {
            return TypeSetId::EMPTY;
        }
        self.table.lock().intern(sorted)
    }

    /// Sort and de-duplicate `indices`, then intern the resulting set
    pub fn intern<I>(&self, indices: I) -> TypeSetId
    where
        I: IntoIterator<Item = TypeIndex>,
    {
        let mut sorted: Vec<TypeIndex> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        self.id_of(&sorted)
    }

    /// Get the sorted type indices behind an id, if the id is known
    pub fn try_types_of(&self, id: TypeSetId) -> Option<Arc<[TypeIndex]>> {
        self.table.lock().sets.get(id.0 as usize).cloned()
    }

    /// Get the sorted type indices behind an id
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this interner.
    pub fn types_of(&self, id: TypeSetId) -> Arc<[TypeIndex]> {
        match self.try_types_of(id) {
            Some(set) => set,
            None => panic!("{} was not produced by this interner", id),
        }
    }

    /// Get the id of the union of two interned sets
    ///
    /// # Panics
    ///
    /// Panics if either id was not produced by this interner.
    pub fn merge_ids(&self, a: TypeSetId, b: TypeSetId) -> TypeSetId {
        if a.is_empty() || a == b {
            return b;
        }
        if b.is_empty() {
            return a;
        }

        let mut table = self.table.lock();
        let (left, right) = match (table.sets.get(a.0 as usize), table.sets.get(b.0 as usize)) {
            (Some(left), Some(right)) => (Arc::clone(left), Arc::clone(right)),
            _ => panic!("cannot merge {} with {}: unknown type set", a, b),
        };
        let merged = merge_sorted(&left, &right);
        table.intern(&merged)
    }

    /// Number of distinct sets interned so far, the empty set included
    pub fn len(&self) -> usize {
        self.table.lock().sets.len()
    }

    /// Always false: the empty set is interned at construction
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TypeSetInterner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_sorted_unique(indices: &[TypeIndex]) -> bool {
    indices.windows(2).all(|pair| pair[0] < pair[1])
}

/// Merge two sorted, duplicate-free slices into their sorted union
fn merge_sorted(left: &[TypeIndex], right: &[TypeIndex]) -> Vec<TypeIndex> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => {
                merged.push(left[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(right[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
