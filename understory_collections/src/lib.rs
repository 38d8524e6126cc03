// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collections --heading-base-level=0

//! Understory Collections: small ordered containers used by recycling layouts.
//!
//! This crate provides three containers:
//!
//! - [`Deque`]: a growable ring buffer with O(1) access at both ends and O(1)
//!   random access by logical index. A detached [`Cursor`] detects structural
//!   mutation between steps.
//! - [`LinkedMap`]: a hash map whose entries are threaded on a doubly linked
//!   list, iterated in insertion order or, with [`Order::Access`], in
//!   least-recently-used order. An [`EvictionPolicy`] turns it into a bounded
//!   cache.
//! - [`PriorityQueue`]: a binary min-heap that also supports removing an
//!   arbitrary element.
//!
//! Fallible operations return [`CollectionError`].
//!
//! ## Minimal example
//!
//! A bounded LRU cache:
//!
//! ```rust
//! use understory_collections::{LinkedMap, MaxLen, Order};
//!
//! let mut cache = LinkedMap::with_order(Order::Access);
//! cache.set_eviction_policy(Some(Box::new(MaxLen::new(2))));
//!
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! // Touch "a" so that "b" becomes the eldest entry.
//! assert_eq!(cache.get(&"a"), Some(&1));
//! cache.insert("c", 3);
//!
//! assert!(cache.contains_key(&"a"));
//! assert!(!cache.contains_key(&"b"));
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod deque;
mod error;
mod linked_map;
mod priority_queue;

pub use deque::{Cursor, Deque, Iter as DequeIter, IterMut as DequeIterMut};
pub use error::CollectionError;
pub use linked_map::{EvictionPolicy, Iter as LinkedMapIter, Keys, LinkedMap, MaxLen, Order, Values};
pub use priority_queue::PriorityQueue;
