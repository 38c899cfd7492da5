//! Building maps keyed by identity.
//!
//! ```ignore
//! use std::collections::HashMap;
//! use identity::IdentityMapExt;
//!
//! let images: HashMap<ImageId, Image> = HashMap::from_unique_identifiables(images);
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use crate::{Identifiable, IdentifiedValue};

pub trait IdentityMapExt<K, V>: Sized {
    /// Keys every item by its id.
    ///
    /// # Panics
    ///
    /// If two items share an id.
    fn from_unique_identifiables<I>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        K: Debug;

    /// Keys every item by its id, merging repeats with
    /// `combine(existing, incoming)` in iteration order.
    fn from_identifiables_uniquing<I, F>(items: I, combine: F) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        F: FnMut(V, V) -> V;

    fn try_from_identifiables_uniquing<I, F, E>(items: I, combine: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        F: FnMut(V, V) -> Result<V, E>;

    /// Collects every item under its id, in iteration order.
    fn grouping_identifiables_by_id<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Identifiable<Id = K>,
        V: Default + Extend<T>;

    /// # Panics
    ///
    /// If two values share an id.
    fn from_unique_identified_values<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        K: Debug;

    fn from_identified_values_uniquing<T, I, F>(items: I, combine: F) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        F: FnMut(V, V) -> V;

    fn try_from_identified_values_uniquing<T, I, F, E>(items: I, combine: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        F: FnMut(V, V) -> Result<V, E>;

    fn grouping_values_by_id<T, I, W>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = W>,
        V: Default + Extend<W>;
}

impl<K, V, S> IdentityMapExt<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_unique_identifiables<I>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        K: Debug,
    {
        unique(items.into_iter().map(|item| (item.id(), item)))
    }

    fn from_identifiables_uniquing<I, F>(items: I, mut combine: F) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        F: FnMut(V, V) -> V,
    {
        infallible(Self::try_from_identifiables_uniquing(items, |existing, incoming| {
            Ok(combine(existing, incoming))
        }))
    }

    fn try_from_identifiables_uniquing<I, F, E>(items: I, combine: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = V>,
        V: Identifiable<Id = K>,
        F: FnMut(V, V) -> Result<V, E>,
    {
        uniquing(items.into_iter().map(|item| (item.id(), item)), combine)
    }

    fn grouping_identifiables_by_id<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Identifiable<Id = K>,
        V: Default + Extend<T>,
    {
        grouping(items.into_iter().map(|item| (item.id(), item)))
    }

    fn from_unique_identified_values<T, I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        K: Debug,
    {
        unique(items.into_iter().map(IdentifiedValue::into_parts))
    }

    fn from_identified_values_uniquing<T, I, F>(items: I, mut combine: F) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        F: FnMut(V, V) -> V,
    {
        infallible(Self::try_from_identified_values_uniquing(
            items,
            |existing, incoming| Ok(combine(existing, incoming)),
        ))
    }

    fn try_from_identified_values_uniquing<T, I, F, E>(items: I, combine: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = V>,
        F: FnMut(V, V) -> Result<V, E>,
    {
        uniquing(items.into_iter().map(IdentifiedValue::into_parts), combine)
    }

    fn grouping_values_by_id<T, I, W>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IdentifiedValue<Id = K, Value = W>,
        V: Default + Extend<W>,
    {
        grouping(items.into_iter().map(IdentifiedValue::into_parts))
    }
}

fn unique<K, V, S>(entries: impl Iterator<Item = (K, V)>) -> HashMap<K, V, S>
where
    K: Eq + Hash + Debug,
    S: BuildHasher + Default,
{
    let mut map = HashMap::with_hasher(S::default());
    for (id, value) in entries {
        match map.entry(id) {
            Entry::Occupied(entry) => panic!("duplicate identity {:?}", entry.key()),
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    map
}

fn uniquing<K, V, S, F, E>(
    entries: impl Iterator<Item = (K, V)>,
    mut combine: F,
) -> Result<HashMap<K, V, S>, E>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
    F: FnMut(V, V) -> Result<V, E>,
{
    let mut map = HashMap::with_hasher(S::default());
    for (id, value) in entries {
        match map.entry(id) {
            Entry::Occupied(entry) => {
                let (id, existing) = entry.remove_entry();
                let combined = combine(existing, value)?;
                map.insert(id, combined);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(map)
}

fn grouping<K, T, V, S>(entries: impl Iterator<Item = (K, T)>) -> HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Default + Extend<T>,
    S: BuildHasher + Default,
{
    let mut map: HashMap<K, V, S> = HashMap::with_hasher(S::default());
    for (id, item) in entries {
        map.entry(id).or_default().extend(Some(item));
    }
    map
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
