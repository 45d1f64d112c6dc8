//! Error types for the `array-hash` crate

/// Errors returned by table operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Every slot on the probe ring is occupied by some other key.
    ///
    /// Tables never grow on their own. This is a sizing error on the
    /// caller's side: construct the table with a larger capacity hint, or
    /// call `reserve` before inserting.
    #[error("hash table is full, unable to make room for a new key (capacity {capacity})")]
    TableFull {
        /// Number of slots in the table that rejected the insert.
        capacity: usize,
    },

    /// The requested key is not present in the table.
    #[error("no such key")]
    KeyNotFound,
}
