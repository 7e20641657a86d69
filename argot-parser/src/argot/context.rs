//! Annotation side-channel for external collaborators
//!
//! Environment binding, settings-file binding and similar collaborators
//! resolve their source data once, before a parse pass, and deposit it into an
//! [`Annotations`] map. Primitives read it during `attempt`/`finalize`. The
//! map is keyed by per-collaborator [`ContextKey`]s whose identity is a
//! process-unique id, so two collaborators never observe each other's data,
//! even after maps are merged into one pass.
//!
//! Lifetime is one parse pass; nothing here outlives it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// A typed, process-unique key into an [`Annotations`] map.
///
/// Two keys created with the same name are still distinct; identity is the id,
/// the name only aids debugging.
pub struct ContextKey<T> {
    id: u64,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> ContextKey<T> {
    pub fn new(name: &'static str) -> Self {
        ContextKey {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextKey({}#{})", self.name, self.id)
    }
}

/// The out-of-band annotation set threaded through a parse pass.
#[derive(Default)]
pub struct Annotations {
    slots: HashMap<u64, Box<dyn Any>>,
}

impl Annotations {
    pub fn new() -> Self {
        Annotations::default()
    }

    /// Write-once per key: inserting under the same key replaces the value,
    /// but collaborators populate before the pass starts and never after.
    pub fn insert<T: 'static>(&mut self, key: &ContextKey<T>, value: T) {
        self.slots.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: &ContextKey<T>) -> Option<&T> {
        self.slots.get(&key.id).and_then(|v| v.downcast_ref())
    }

    /// Fold another annotation set into this one. Distinct keys stay fully
    /// isolated; a colliding key (same collaborator annotated twice) takes
    /// the incoming value.
    pub fn merge(&mut self, other: Annotations) {
        self.slots.extend(other.slots);
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Annotations({} slots)", self.slots.len())
    }
}
