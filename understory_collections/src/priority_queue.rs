// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary min-heap with arbitrary removal.

use alloc::vec::Vec;
use core::fmt;

use crate::CollectionError;

/// A binary min-heap: [`pop`](Self::pop) returns the smallest element.
///
/// Besides the usual heap operations it supports [`remove`](Self::remove)
/// of an arbitrary element, found by linear scan and then repaired with a
/// sift in either direction.
///
/// ```rust
/// use understory_collections::PriorityQueue;
///
/// let mut queue: PriorityQueue<u32> = [5, 1, 4].into_iter().collect();
/// queue.push(2);
/// assert!(queue.remove(&4));
/// assert_eq!(queue.pop(), Ok(1));
/// assert_eq!(queue.pop(), Ok(2));
/// assert_eq!(queue.peek(), Ok(&5));
/// ```
#[derive(Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Creates an empty queue with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds an element.
    pub fn push(&mut self, value: T) {
        self.heap.push(value);
        self.sift_up(self.heap.len() - 1);
    }

    /// Returns the smallest element.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.heap.first().ok_or(CollectionError::Empty)
    }

    /// Removes and returns the smallest element.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }
        let value = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(value)
    }

    /// Removes one element equal to `value`, returning whether one was found.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(pos) = self.heap.iter().position(|item| item == value) else {
            return false;
        };
        self.heap.swap_remove(pos);
        if pos < self.heap.len() {
            self.sift_down(pos);
            self.sift_up(pos);
        }
        true
    }

    /// Returns `true` if an element equal to `value` is queued.
    pub fn contains(&self, value: &T) -> bool {
        self.heap.contains(value)
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Releases spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.heap.shrink_to_fit();
    }

    /// Iterates in heap order, which is unspecified beyond the first element.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Consumes the queue, returning its elements in ascending order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.heap.sort();
        self.heap
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos] >= self.heap[parent] {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };
            if self.heap[pos] <= self.heap[child] {
                break;
            }
            self.heap.swap(pos, child);
            pos = child;
        }
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.heap.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn drain(mut queue: PriorityQueue<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Ok(value) = queue.pop() {
            out.push(value);
        }
        out
    }

    #[test]
    fn pops_in_ascending_order() {
        let queue: PriorityQueue<i32> = [7, 3, 9, 1, 4, 1, 8].into_iter().collect();
        assert_eq!(drain(queue), vec![1, 1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn empty_peek_and_pop_fail() {
        let mut queue = PriorityQueue::<i32>::new();
        assert_eq!(queue.peek(), Err(CollectionError::Empty));
        assert_eq!(queue.pop(), Err(CollectionError::Empty));
    }

    #[test]
    fn remove_repairs_the_heap_in_both_directions() {
        let mut queue: PriorityQueue<i32> = [1, 10, 2, 11, 12, 3, 4].into_iter().collect();
        assert!(queue.remove(&11), "11 is queued");
        assert!(queue.remove(&1), "1 is queued");
        assert!(!queue.remove(&99), "99 was never queued");
        assert!(!queue.contains(&11), "11 was removed");
        assert_eq!(drain(queue), vec![2, 3, 4, 10, 12]);
    }

    #[test]
    fn remove_last_element() {
        let mut queue: PriorityQueue<i32> = [2, 1].into_iter().collect();
        assert!(queue.remove(&2), "2 is queued");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek(), Ok(&1));
    }

    #[test]
    fn into_sorted_vec_sorts() {
        let queue: PriorityQueue<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(queue.into_sorted_vec(), vec![1, 2, 3]);
    }
}
