//! Concurrent key-addressed containers
//!
//! A [`SyncMap`] maps an `i64` key to a slot guarded by a single
//! `parking_lot::RwLock`: many readers proceed in parallel, while `add`,
//! `extend` and `clear` take the lock exclusively. What `add` does to an
//! existing slot is decided by the container's [`MergeStrategy`]:
//!
//! | Strategy | `add(k, v)` | `get(k)` when absent |
//! |---|---|---|
//! | [`Overwrite<V>`] | replaces the value | `None` |
//! | [`Append<V>`] | pushes onto the key's list | empty `Vec` |
//! | [`Accumulate`] | adds the delta to the total | `0` |
//!
//! Containers are independent: no operation spans two of them.

use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Key type shared by every container
pub type Key = i64;

/// How a value handed to [`SyncMap::add`] is combined with what is already stored
pub trait MergeStrategy: 'static {
    /// Value accepted by `add`
    type Value;
    /// Value kept per key
    type Slot;
    /// Value returned by `get`
    type Output;

    /// Build the slot for a key seen for the first time
    fn create(value: Self::Value) -> Self::Slot;

    /// Combine a new value into an existing slot
    fn merge(slot: &mut Self::Slot, value: Self::Value);

    /// Produce the read result, including the absent case
    fn read(slot: Option<&Self::Slot>) -> Self::Output;
}

/// Last write wins
pub struct Overwrite<V>(PhantomData<fn() -> V>);

impl<V: Clone + 'static> MergeStrategy for Overwrite<V> {
    type Value = V;
    type Slot = V;
    type Output = Option<V>;

    fn create(value: V) -> V {
        value
    }

    fn merge(slot: &mut V, value: V) {
        *slot = value;
    }

    fn read(slot: Option<&V>) -> Option<V> {
        slot.cloned()
    }
}

/// Ordered list per key; never deduplicates or reorders
pub struct Append<V>(PhantomData<fn() -> V>);

impl<V: Clone + 'static> MergeStrategy for Append<V> {
    type Value = V;
    type Slot = Vec<V>;
    type Output = Vec<V>;

    fn create(value: V) -> Vec<V> {
        vec![value]
    }

    fn merge(slot: &mut Vec<V>, value: V) {
        slot.push(value);
    }

    fn read(slot: Option<&Vec<V>>) -> Vec<V> {
        slot.cloned().unwrap_or_default()
    }
}

/// Running total per key, starting from zero
pub struct Accumulate;

impl MergeStrategy for Accumulate {
    type Value = i64;
    type Slot = i64;
    type Output = i64;

    fn create(delta: i64) -> i64 {
        delta
    }

    fn merge(total: &mut i64, delta: i64) {
        *total = total.saturating_add(delta);
    }

    fn read(total: Option<&i64>) -> i64 {
        total.copied().unwrap_or(0)
    }
}

/// Single-value container
pub type OverwriteMap<V> = SyncMap<Overwrite<V>>;

/// Append-only list container
pub type AppendMap<V> = SyncMap<Append<V>>;

/// Counter container
pub type AccumulateMap = SyncMap<Accumulate>;

struct Inner<T> {
    entries: HashMap<Key, T>,
    loaded: bool,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            loaded: false,
        }
    }
}

/// Thread-safe map from `i64` keys to slots merged by `S`
///
/// Besides its entries, the container tracks whether a loader has finished
/// populating it since the last [`clear`](Self::clear), so readers can tell
/// "not loaded" apart from "loaded and empty" when they need to.
pub struct SyncMap<S: MergeStrategy> {
    inner: RwLock<Inner<S::Slot>>,
    _strategy: PhantomData<fn() -> S>,
}

impl<S: MergeStrategy> SyncMap<S> {
    /// Create an empty container
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            _strategy: PhantomData,
        }
    }

    /// Merge `value` into the slot at `key`, creating it if absent
    pub fn add(&self, key: Key, value: S::Value) {
        let mut inner = self.inner.write();
        Self::merge_entry(&mut inner.entries, key, value);
    }

    /// Merge many values while holding the write lock once
    pub fn extend<I>(&self, values: I)
    where
        I: IntoIterator<Item = (Key, S::Value)>,
    {
        let mut inner = self.inner.write();
        for (key, value) in values {
            Self::merge_entry(&mut inner.entries, key, value);
        }
    }

    /// Read the value at `key`, or the strategy's absent value
    pub fn get(&self, key: Key) -> S::Output {
        S::read(self.inner.read().entries.get(&key))
    }

    /// Borrow the slot at `key` under the read lock without cloning it
    pub fn get_with<R>(&self, key: Key, f: impl FnOnce(Option<&S::Slot>) -> R) -> R {
        f(self.inner.read().entries.get(&key))
    }

    /// Check whether `key` has a slot
    pub fn contains_key(&self, key: Key) -> bool {
        self.inner.read().entries.contains_key(&key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check whether the container holds no keys
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Copy of every slot, taken under one read lock
    pub fn snapshot(&self) -> HashMap<Key, S::Slot>
    where
        S::Slot: Clone,
    {
        self.inner.read().entries.clone()
    }

    /// Discard every entry and the loaded flag
    pub fn clear(&self) {
        *self.inner.write() = Inner::default();
    }

    /// Record that a loader has fully populated the container
    pub fn mark_loaded(&self) {
        self.inner.write().loaded = true;
    }

    /// Whether a loader has succeeded since the last `clear`
    pub fn is_loaded(&self) -> bool {
        self.inner.read().loaded
    }

    fn merge_entry(entries: &mut HashMap<Key, S::Slot>, key: Key, value: S::Value) {
        match entries.entry(key) {
            Entry::Occupied(mut slot) => S::merge(slot.get_mut(), value),
            Entry::Vacant(slot) => {
                slot.insert(S::create(value));
            }
        }
    }
}

impl<S: MergeStrategy> Default for SyncMap<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MergeStrategy> fmt::Debug for SyncMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SyncMap")
            .field("len", &inner.entries.len())
            .field("loaded", &inner.loaded)
            .finish()
    }
}
