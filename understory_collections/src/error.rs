// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned by fallible collection operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollectionError {
    /// The collection holds no elements.
    Empty,
    /// The collection was structurally modified after a cursor was created.
    ConcurrentModification,
    /// Explicit positioning was requested on a map that tracks access order.
    ///
    /// Reads reorder such a map, so front/back mutators and peeks are refused.
    AccessOrder,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("collection is empty"),
            Self::ConcurrentModification => {
                f.write_str("collection was modified while a cursor was active")
            }
            Self::AccessOrder => {
                f.write_str("positional access is not supported while tracking access order")
            }
        }
    }
}

impl core::error::Error for CollectionError {}
