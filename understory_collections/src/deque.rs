// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growable ring-buffer deque.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::CollectionError;

/// Capacity allocated by the first push.
const MIN_CAPACITY: usize = 4;

/// Below this capacity the buffer doubles; at or above it grows by half.
const DOUBLING_LIMIT: usize = 64;

/// A double-ended queue backed by a growable ring buffer.
///
/// Elements are addressed by logical index from the front. Every structural
/// mutation (push, pop, clear) bumps an internal version stamp, which a
/// detached [`Cursor`] uses to detect modification between steps.
///
/// ```rust
/// use understory_collections::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(2);
/// deque.push_back(3);
/// deque.push_front(1);
///
/// assert_eq!(deque.get(0), Some(&1));
/// assert_eq!(deque.peek_back(), Ok(&3));
/// assert_eq!(deque.pop_front(), Ok(1));
/// assert_eq!(deque.len(), 2);
/// ```
pub struct Deque<T> {
    buf: Vec<Option<T>>,
    head: usize,
    len: usize,
    version: u64,
}

impl<T> Deque<T> {
    /// Creates an empty deque without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            head: 0,
            len: 0,
            version: 0,
        }
    }

    /// Creates an empty deque with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            buf,
            head: 0,
            len: 0,
            version: 0,
        }
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the ring buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Structural version stamp, bumped by every push, pop, and clear.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Physical slot of logical index `index`. Caller guarantees a non-empty buffer.
    fn slot(&self, index: usize) -> usize {
        (self.head + index) % self.buf.len()
    }

    fn grow(&mut self) {
        let cap = self.buf.len();
        let new_cap = if cap < MIN_CAPACITY {
            MIN_CAPACITY
        } else if cap < DOUBLING_LIMIT {
            cap * 2
        } else {
            cap + cap / 2
        };
        let mut buf = Vec::with_capacity(new_cap);
        for i in 0..self.len {
            let slot = (self.head + i) % cap;
            buf.push(self.buf[slot].take());
        }
        buf.resize_with(new_cap, || None);
        self.buf = buf;
        self.head = 0;
    }

    /// Appends an element at the back.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.buf.len() {
            self.grow();
        }
        let slot = self.slot(self.len);
        self.buf[slot] = Some(value);
        self.len += 1;
        self.version = self.version.wrapping_add(1);
    }

    /// Prepends an element at the front.
    pub fn push_front(&mut self, value: T) {
        if self.len == self.buf.len() {
            self.grow();
        }
        let cap = self.buf.len();
        self.head = (self.head + cap - 1) % cap;
        self.buf[self.head] = Some(value);
        self.len += 1;
        self.version = self.version.wrapping_add(1);
    }

    /// Removes and returns the front element.
    ///
    /// Fails with [`CollectionError::Empty`] when the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, CollectionError> {
        if self.len == 0 {
            return Err(CollectionError::Empty);
        }
        let value = self.buf[self.head].take();
        self.head = (self.head + 1) % self.buf.len();
        self.len -= 1;
        self.version = self.version.wrapping_add(1);
        value.ok_or(CollectionError::Empty)
    }

    /// Removes and returns the back element.
    ///
    /// Fails with [`CollectionError::Empty`] when the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, CollectionError> {
        if self.len == 0 {
            return Err(CollectionError::Empty);
        }
        let slot = self.slot(self.len - 1);
        let value = self.buf[slot].take();
        self.len -= 1;
        self.version = self.version.wrapping_add(1);
        value.ok_or(CollectionError::Empty)
    }

    /// Returns the front element.
    pub fn peek_front(&self) -> Result<&T, CollectionError> {
        self.get(0).ok_or(CollectionError::Empty)
    }

    /// Returns the back element.
    pub fn peek_back(&self) -> Result<&T, CollectionError> {
        match self.len {
            0 => Err(CollectionError::Empty),
            len => self.get(len - 1).ok_or(CollectionError::Empty),
        }
    }

    /// Returns a mutable reference to the front element.
    pub fn peek_front_mut(&mut self) -> Result<&mut T, CollectionError> {
        self.get_mut(0).ok_or(CollectionError::Empty)
    }

    /// Returns a mutable reference to the back element.
    pub fn peek_back_mut(&mut self) -> Result<&mut T, CollectionError> {
        match self.len {
            0 => Err(CollectionError::Empty),
            len => self.get_mut(len - 1).ok_or(CollectionError::Empty),
        }
    }

    /// Returns the element at logical index `index`, counted from the front.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.buf[self.slot(index)].as_ref()
    }

    /// Returns a mutable reference to the element at logical index `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.slot(index);
        self.buf[slot].as_mut()
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        for i in 0..self.len {
            let slot = self.slot(i);
            self.buf[slot] = None;
        }
        self.head = 0;
        self.len = 0;
        self.version = self.version.wrapping_add(1);
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            front: 0,
            back: self.len,
        }
    }

    /// Iterates mutably from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let cap = self.buf.len();
        let (low, high) = self.buf.split_at_mut(self.head.min(cap));
        let first_len = self.len.min(high.len());
        let second_len = self.len - first_len;
        IterMut {
            first: high[..first_len].iter_mut(),
            second: low[..second_len].iter_mut(),
        }
    }

    /// Creates a detached cursor positioned at the front.
    ///
    /// Unlike [`Deque::iter`], a cursor does not borrow the deque between
    /// steps. Any structural mutation after the cursor was created makes the
    /// next step fail with [`CollectionError::ConcurrentModification`].
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        Cursor {
            index: 0,
            version: self.version,
        }
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Borrowing front-to-back iterator over a [`Deque`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.deque.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.deque.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable front-to-back iterator over a [`Deque`].
#[derive(Debug)]
pub struct IterMut<'a, T> {
    first: core::slice::IterMut<'a, Option<T>>,
    second: core::slice::IterMut<'a, Option<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.first.next() {
            Some(slot) => slot.as_mut(),
            None => self.second.next().and_then(Option::as_mut),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.first.len() + self.second.len();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.second.next_back() {
            Some(slot) => slot.as_mut(),
            None => self.first.next_back().and_then(Option::as_mut),
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// A detached position in a [`Deque`], validated against its version stamp.
///
/// ```rust
/// use understory_collections::{CollectionError, Deque};
///
/// let mut deque: Deque<u32> = [1, 2].into_iter().collect();
/// let mut cursor = deque.cursor();
/// assert_eq!(cursor.next(&deque), Ok(Some(&1)));
///
/// deque.push_back(3);
/// assert_eq!(cursor.next(&deque), Err(CollectionError::ConcurrentModification));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    version: u64,
}

impl Cursor {
    /// Logical index of the element the next step yields.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Yields the next element, or `None` past the back.
    pub fn next<'a, T>(&mut self, deque: &'a Deque<T>) -> Result<Option<&'a T>, CollectionError> {
        if deque.version != self.version {
            return Err(CollectionError::ConcurrentModification);
        }
        let item = deque.get(self.index);
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}
