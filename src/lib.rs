#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A key-value map over the fixed-capacity [`HashTable`].
///
/// This module provides `ArrayHash`, which hashes keys with a configurable
/// `BuildHasher` and stores `(K, V)` pairs in the underlying table.
pub mod array_hash;

/// A set over the fixed-capacity [`HashTable`].
///
/// This module provides `ArraySet`, which hashes values with a configurable
/// `BuildHasher`.
pub mod array_set;

pub mod error;

pub mod hash_table;

/// Conway's Game of Life on an unbounded plane, driven by [`ArrayHash`] and
/// [`ArraySet`].
pub mod life;

pub mod rle;

pub use array_hash::ArrayHash;
pub use array_set::ArraySet;
pub use error::Error;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder for the default hasher builder when neither `foldhash`
        /// nor `std` is enabled. Supply a hasher builder explicitly.
        pub enum DefaultHashBuilder {}
    }
}
