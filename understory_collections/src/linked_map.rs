// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hash map threaded on a doubly linked list.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::mem;

use hashbrown::HashMap;

use crate::CollectionError;

/// Iteration order maintained by a [`LinkedMap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Entries keep the position of their first insertion.
    #[default]
    Insertion,
    /// Every successful read or overwrite moves the entry to the back.
    ///
    /// The front is then the least recently used entry.
    Access,
}

/// Decides whether the eldest entry of a [`LinkedMap`] should be dropped.
///
/// The map consults the policy right after a new key is linked at the back.
/// Overwriting an existing key, [`LinkedMap::remove`], and the explicit pops
/// never consult it. The map is not borrowed while the policy runs, so a
/// policy cannot reach back into it.
pub trait EvictionPolicy<K, V> {
    /// Returns `true` to evict the eldest entry.
    ///
    /// `len` counts the newly inserted entry.
    fn should_evict(&mut self, len: usize, eldest_key: &K, eldest_value: &V) -> bool;

    /// Called once for every entry evicted by this policy.
    fn on_evicted(&mut self, key: K, value: V) {
        let _ = (key, value);
    }
}

/// Capacity policy: evicts once the map grows past `max` entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaxLen {
    max: usize,
    evicted: usize,
}

impl MaxLen {
    /// Creates a policy bounding the map to `max` entries.
    #[must_use]
    pub const fn new(max: usize) -> Self {
        Self { max, evicted: 0 }
    }

    /// The configured bound.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Number of entries evicted so far.
    #[must_use]
    pub const fn evicted(&self) -> usize {
        self.evicted
    }
}

impl<K, V> EvictionPolicy<K, V> for MaxLen {
    fn should_evict(&mut self, len: usize, _eldest_key: &K, _eldest_value: &V) -> bool {
        len > self.max
    }

    fn on_evicted(&mut self, _key: K, _value: V) {
        self.evicted += 1;
    }
}

struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A hash map that remembers an order over its entries.
///
/// Entries live in a slab and are linked front (eldest) to back (newest).
/// The hash index maps each key to its slab slot, so every live entry is
/// reachable both through the index and through exactly one list position.
///
/// Under [`Order::Insertion`] the map also works as a double-ended ordered
/// collection through [`push_front`](Self::push_front),
/// [`pop_back`](Self::pop_back) and friends. Under [`Order::Access`] those
/// operations fail with [`CollectionError::AccessOrder`].
pub struct LinkedMap<K, V> {
    index: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    order: Order,
    reversed: bool,
    policy: Option<Box<dyn EvictionPolicy<K, V>>>,
    eviction_suppressed: bool,
}

impl<K: Hash + Eq + Clone, V> LinkedMap<K, V> {
    /// Creates an empty map in insertion order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(Order::Insertion)
    }

    /// Creates an empty map maintaining `order`.
    #[must_use]
    pub fn with_order(order: Order) -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            order,
            reversed: false,
            policy: None,
            eviction_suppressed: false,
        }
    }

    /// The order this map maintains.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether iteration runs back to front.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Makes iteration run back to front (newest first).
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Installs an eviction policy, returning the previous one.
    pub fn set_eviction_policy(
        &mut self,
        policy: Option<Box<dyn EvictionPolicy<K, V>>>,
    ) -> Option<Box<dyn EvictionPolicy<K, V>>> {
        mem::replace(&mut self.policy, policy)
    }

    /// Temporarily stops the policy from being consulted.
    pub fn set_eviction_suppressed(&mut self, suppressed: bool) {
        self.eviction_suppressed = suppressed;
    }

    /// Whether eviction is currently suppressed.
    #[must_use]
    pub const fn is_eviction_suppressed(&self) -> bool {
        self.eviction_suppressed
    }

    /// Returns `true` if `key` is present. Never reorders.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Looks up `key` without touching its position.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.node(idx).map(|node| &node.value)
    }

    /// Looks up `key`, moving it to the back under [`Order::Access`].
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.touch(key)?;
        self.node(idx).map(|node| &node.value)
    }

    /// Mutable lookup, moving the entry to the back under [`Order::Access`].
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.touch(key)?;
        self.slots
            .get_mut(idx)
            .and_then(Option::as_mut)
            .map(|node| &mut node.value)
    }

    /// Inserts or overwrites an entry, returning the previous value.
    ///
    /// A new key is linked at the back and may trigger eviction of the
    /// eldest entry. Overwriting keeps the position under
    /// [`Order::Insertion`] and moves the entry to the back under
    /// [`Order::Access`].
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            let old = self
                .slots
                .get_mut(idx)
                .and_then(Option::as_mut)
                .map(|node| mem::replace(&mut node.value, value));
            if self.order == Order::Access {
                self.move_to_back(idx);
            }
            return old;
        }
        let idx = self.alloc(key.clone(), value);
        self.index.insert(key, idx);
        self.link_back(idx);
        self.evict_eldest();
        None
    }

    /// Removes `key`, returning its value. Never consults the eviction policy.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.remove_slot(idx).map(|(_, value)| value)
    }

    /// Removes every entry. The eviction policy is kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Inserts at the back, or moves an existing key there.
    pub fn push_back(&mut self, key: K, value: V) -> Result<Option<V>, CollectionError> {
        self.require_insertion_order()?;
        let old = self.insert(key.clone(), value);
        if let Some(&idx) = self.index.get(&key) {
            self.move_to_back(idx);
        }
        Ok(old)
    }

    /// Inserts at the front, or moves an existing key there.
    ///
    /// The eviction check runs while the new entry is still at the back.
    pub fn push_front(&mut self, key: K, value: V) -> Result<Option<V>, CollectionError> {
        self.require_insertion_order()?;
        let old = self.insert(key.clone(), value);
        if let Some(&idx) = self.index.get(&key) {
            self.move_to_front(idx);
        }
        Ok(old)
    }

    /// Removes and returns the eldest entry.
    pub fn pop_front(&mut self) -> Result<(K, V), CollectionError> {
        self.require_insertion_order()?;
        let idx = self.head.ok_or(CollectionError::Empty)?;
        self.remove_slot(idx).ok_or(CollectionError::Empty)
    }

    /// Removes and returns the newest entry.
    pub fn pop_back(&mut self) -> Result<(K, V), CollectionError> {
        self.require_insertion_order()?;
        let idx = self.tail.ok_or(CollectionError::Empty)?;
        self.remove_slot(idx).ok_or(CollectionError::Empty)
    }

    /// Returns the eldest entry.
    pub fn peek_front(&self) -> Result<(&K, &V), CollectionError> {
        self.require_insertion_order()?;
        self.head
            .and_then(|idx| self.node(idx))
            .map(|node| (&node.key, &node.value))
            .ok_or(CollectionError::Empty)
    }

    /// Returns the newest entry.
    pub fn peek_back(&self) -> Result<(&K, &V), CollectionError> {
        self.require_insertion_order()?;
        self.tail
            .and_then(|idx| self.node(idx))
            .map(|node| (&node.key, &node.value))
            .ok_or(CollectionError::Empty)
    }

    /// Iterates entries in list order, honouring [`set_reversed`](Self::set_reversed).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            map: self,
            cursor: if self.reversed { self.tail } else { self.head },
            remaining: self.len(),
        }
    }

    /// Iterates keys in list order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates values in list order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    fn require_insertion_order(&self) -> Result<(), CollectionError> {
        match self.order {
            Order::Insertion => Ok(()),
            Order::Access => Err(CollectionError::AccessOrder),
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn touch<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        if self.order == Order::Access {
            self.move_to_back(idx);
        }
        Some(idx)
    }

    fn alloc(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn set_next(&mut self, idx: Option<usize>, next: Option<usize>) {
        match idx.and_then(|idx| self.slots.get_mut(idx)).and_then(Option::as_mut) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
    }

    fn set_prev(&mut self, idx: Option<usize>, prev: Option<usize>) {
        match idx.and_then(|idx| self.slots.get_mut(idx)).and_then(Option::as_mut) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.node(idx).map(|node| (node.prev, node.next)) else {
            return;
        };
        self.set_next(prev, next);
        self.set_prev(next, prev);
        if let Some(node) = self.slots.get_mut(idx).and_then(Option::as_mut) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_back(&mut self, idx: usize) {
        let tail = self.tail;
        if let Some(node) = self.slots.get_mut(idx).and_then(Option::as_mut) {
            node.prev = tail;
            node.next = None;
        }
        self.set_next(tail, Some(idx));
        self.tail = Some(idx);
    }

    fn link_front(&mut self, idx: usize) {
        let head = self.head;
        if let Some(node) = self.slots.get_mut(idx).and_then(Option::as_mut) {
            node.prev = None;
            node.next = head;
        }
        self.set_prev(head, Some(idx));
        self.head = Some(idx);
    }

    fn move_to_back(&mut self, idx: usize) {
        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head != Some(idx) {
            self.unlink(idx);
            self.link_front(idx);
        }
    }

    fn remove_slot(&mut self, idx: usize) -> Option<(K, V)> {
        self.unlink(idx);
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    fn evict_eldest(&mut self) {
        if self.eviction_suppressed {
            return;
        }
        let Some(head) = self.head else {
            return;
        };
        let Some(policy) = self.policy.as_mut() else {
            return;
        };
        let Some(eldest) = self.slots.get(head).and_then(Option::as_ref) else {
            return;
        };
        if !policy.should_evict(self.index.len(), &eldest.key, &eldest.value) {
            return;
        }
        if let Some((key, value)) = self.remove_slot(head)
            && let Some(policy) = self.policy.as_mut()
        {
            policy.on_evicted(key, value);
        }
    }
}

impl<K: Hash + Eq + Clone, V> Default for LinkedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone + fmt::Debug, V: fmt::Debug> fmt::Debug for LinkedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for LinkedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for LinkedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K: Hash + Eq + Clone, V> IntoIterator for &'a LinkedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`LinkedMap`].
pub struct Iter<'a, K, V> {
    map: &'a LinkedMap<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.map.slots.get(idx).and_then(Option::as_ref)?;
        self.cursor = if self.map.reversed {
            node.prev
        } else {
            node.next
        };
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over the keys of a [`LinkedMap`].
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over the values of a [`LinkedMap`].
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
