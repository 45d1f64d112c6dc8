//! A fixed-capacity open-addressing hash table with linear probing.
//!
//! [`HashTable`] is the raw storage layer used by [`ArrayHash`] and
//! [`ArraySet`]. It does not hash anything itself: every operation takes the
//! caller's `u64` hash together with an equality predicate, the same way
//! `hashbrown::HashTable` does.
//!
//! The table is sized once, at construction, to a prime number of slots (see
//! [`round_up_to_table_size`]) and never grows behind the caller's back. An
//! insert that finds no free slot fails with [`Error::TableFull`]. Growth is
//! available only as an explicit call to [`HashTable::reserve`].
//!
//! [`ArrayHash`]: crate::ArrayHash
//! [`ArraySet`]: crate::ArraySet

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::mem::MaybeUninit;

use crate::error::Error;

/// Cached hash value marking an empty slot.
///
/// A real hash equal to this value is stored as `1` instead, so the value is
/// reserved exclusively for emptiness.
const EMPTY: u64 = 0;

/// Table sizes, in slots, that capacity hints are rounded up to.
///
/// Every entry is prime so that `hash % capacity` doesn't fold keys whose
/// hashes share a factor with the table size onto the same few slots. Past
/// the first ten, each entry is the first prime above twice its predecessor.
pub const TABLE_SIZES: &[usize] = &[
    37, 79, 131, 181, 239, 293, 359, 421, 821, 953, 1907, 3821, 7643, 15287, 30577, 61169, 122347,
    244703, 489407, 978821, 1957651, 3915341, 7830701, 15661423, 31322867, 62645741, 125291483,
    250582987, 501165979, 1002331963, 2004663929,
];

/// Returns the number of slots a table built for `hint` elements gets.
///
/// This is the smallest entry of [`TABLE_SIZES`] strictly greater than
/// `hint`, or `2 * hint + 1` once `hint` is past the last entry. The result
/// is always greater than `hint` (saturating at `usize::MAX`) and never
/// decreases as `hint` grows.
///
/// # Examples
///
/// ```rust
/// use array_hash::hash_table::round_up_to_table_size;
///
/// assert_eq!(round_up_to_table_size(0), 37);
/// assert_eq!(round_up_to_table_size(5), 37);
/// assert_eq!(round_up_to_table_size(37), 79);
/// assert_eq!(round_up_to_table_size(3_000_000_000), 6_000_000_001);
/// ```
pub fn round_up_to_table_size(hint: usize) -> usize {
    match TABLE_SIZES.iter().find(|&&size| size > hint) {
        Some(&size) => size,
        None => hint.saturating_mul(2).saturating_add(1),
    }
}

#[inline(always)]
fn slot_hash(hash: u64) -> u64 {
    if hash == EMPTY { EMPTY + 1 } else { hash }
}

#[derive(Clone, Copy)]
struct Capacity {
    slots: usize,
}

impl From<usize> for Capacity {
    #[inline(always)]
    fn from(hint: usize) -> Self {
        Capacity {
            slots: round_up_to_table_size(hint),
        }
    }
}

impl Capacity {
    #[inline(always)]
    fn home(self, hash: u64) -> usize {
        (hash % self.slots as u64) as usize
    }
}

/// Outcome of a linear probe.
enum Probe {
    /// Slot holding the matching value.
    Occupied(usize),
    /// First empty slot on the probe ring; the value is absent.
    Vacant(usize),
    /// Every slot is taken by something else.
    Full,
}

/// Debug statistics for probe-length analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Distance from its home slot of the farthest displaced element
    pub longest_probe: usize,
    /// Mean distance of elements from their home slot
    pub average_probe: f64,
    /// Total memory in bytes used by the slot arrays
    pub total_bytes: usize,
    /// Bytes held by empty slots
    pub wasted_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Probe length: {} longest, {:.2} average",
            self.longest_probe, self.average_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// A fixed-capacity hash table using linear probing over a prime number of
/// slots.
///
/// `HashTable<V>` stores values of type `V`. Like other raw tables, it
/// requires you to provide both the hash value and an equality predicate for
/// each operation; [`ArrayHash`] and [`ArraySet`] wrap it with a
/// `BuildHasher`.
///
/// Each slot caches the full 64-bit hash of its value next to the value, and
/// a cached hash of `0` marks the slot empty. Probing starts at
/// `hash % capacity` and walks forward, wrapping once, until it reaches the
/// matching value or the first empty slot. There is no deletion of single
/// values, so an empty slot always terminates a probe correctly.
///
/// ## Performance Characteristics
///
/// - **Memory**: the size of `V` plus a u64 for the hash, per slot.
/// - **Probing**: expected probe length is governed by the load factor; a
///   table sized generously up front stays fast.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use array_hash::hash_table::Entry;
/// # use array_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Ok(Entry::Vacant(entry)) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Ok(Entry::Occupied(_)) => println!("Person already exists"),
///     Err(e) => panic!("{e}"),
/// }
/// assert_eq!(table.len(), 1);
/// ```
///
/// [`ArrayHash`]: crate::ArrayHash
/// [`ArraySet`]: crate::ArraySet
pub struct HashTable<V> {
    hashes: Box<[u64]>,
    buckets: Box<[MaybeUninit<V>]>,
    populated: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        if self.is_empty() {
            return f
                .debug_struct("HashTable")
                .field("slots", &"empty")
                .field("populated", &self.populated)
                .field("capacity", &self.capacity())
                .finish();
        }

        let capacity = self.capacity_policy();
        let slots: Vec<String> = self
            .hashes
            .chunks(16)
            .enumerate()
            .map(|(chunk, hashes)| {
                let mut items = Vec::new();
                for (offset, &hash) in hashes.iter().enumerate() {
                    if hash == EMPTY {
                        items.push("..".to_string());
                    } else {
                        let index = chunk * 16 + offset;
                        items.push(format!("{:02}", probe_distance(capacity, index, hash)));
                    }
                }
                items.join(", ")
            })
            .collect();

        f.debug_struct("HashTable")
            .field("slots", &slots)
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Cloning re-derives the capacity from the number of elements, as
/// [`shrink_to_fit`] would, rather than copying the source's capacity.
///
/// A clone of a sparsely filled table is therefore smaller than the original
/// and has correspondingly less room for further inserts.
///
/// [`shrink_to_fit`]: HashTable::shrink_to_fit
impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut new_table = Self::with_capacity(self.populated);
        for (_, hash, value) in self.occupied() {
            new_table.insert_unique(hash, value.clone());
        }

        debug_assert!(new_table.populated == self.populated);
        new_table
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        if core::mem::needs_drop::<V>() && self.populated > 0 {
            for (hash, bucket) in self.hashes.iter().zip(self.buckets.iter_mut()) {
                if *hash != EMPTY {
                    // SAFETY: A non-empty cached hash marks an initialized bucket, and
                    // each bucket is dropped at most once here.
                    unsafe { bucket.assume_init_drop() };
                }
            }
        }
    }
}

#[inline(always)]
fn probe_distance(capacity: Capacity, index: usize, hash: u64) -> usize {
    let home = capacity.home(hash);
    if index >= home {
        index - home
    } else {
        capacity.slots - home + index
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table sized for `capacity` elements.
    ///
    /// The number of slots is [`round_up_to_table_size`]`(capacity)`, which
    /// is always larger than `capacity`. The table never resizes unless
    /// asked to with [`reserve`](Self::reserve).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 131);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_capacity(capacity.into())
    }

    fn from_capacity(capacity: Capacity) -> Self {
        Self {
            hashes: alloc::vec![EMPTY; capacity.slots].into_boxed_slice(),
            buckets: Box::new_uninit_slice(capacity.slots),
            populated: 0,
        }
    }

    #[inline(always)]
    fn capacity_policy(&self) -> Capacity {
        Capacity {
            slots: self.hashes.len(),
        }
    }

    /// Walks the probe ring for `hash`, which must already be a slot hash.
    #[inline]
    fn probe(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Probe {
        let start = self.capacity_policy().home(hash);
        let slots = self.hashes.len();

        for index in (start..slots).chain(0..start) {
            let cached = self.hashes[index];
            if cached == EMPTY {
                return Probe::Vacant(index);
            }

            // SAFETY: A non-empty cached hash marks an initialized bucket.
            if cached == hash && eq(unsafe { self.buckets[index].assume_init_ref() }) {
                return Probe::Occupied(index);
            }
        }

        Probe::Full
    }

    /// Fills the empty slot at `index`.
    ///
    /// # Safety
    ///
    /// The slot at `index` must be empty and `hash` must be a slot hash.
    #[inline]
    unsafe fn write_slot(&mut self, index: usize, hash: u64, value: V) -> &mut V {
        debug_assert!(self.hashes[index] == EMPTY);
        debug_assert!(hash != EMPTY);
        self.populated += 1;
        self.hashes[index] = hash;
        self.buckets[index].write(value)
    }

    /// Inserts a value known to be absent, for rehashing.
    fn insert_unique(&mut self, hash: u64, value: V) {
        match self.probe(hash, |_| false) {
            // SAFETY: `probe` returned an empty slot and `hash` came out of another
            // table's cached hashes.
            Probe::Vacant(index) => unsafe {
                self.write_slot(index, hash, value);
            },
            Probe::Occupied(_) | Probe::Full => {
                unreachable!("rehash target sized below its population")
            }
        }
    }

    /// Empties the next occupied slot at or after `*index`.
    fn take_from(&mut self, index: &mut usize) -> Option<(u64, V)> {
        if self.populated == 0 {
            return None;
        }

        while *index < self.hashes.len() {
            let slot = *index;
            *index += 1;

            let hash = self.hashes[slot];
            if hash != EMPTY {
                self.hashes[slot] = EMPTY;
                self.populated -= 1;
                // SAFETY: The bucket was initialized, and marking the slot empty above
                // ensures it is not read or dropped again.
                let value = unsafe { self.buckets[slot].assume_init_read() };
                return Some((hash, value));
            }
        }

        None
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, u64, &V)> {
        self.hashes
            .iter()
            .zip(self.buckets.iter())
            .enumerate()
            .filter(|(_, (hash, _))| **hash != EMPTY)
            // SAFETY: A non-empty cached hash marks an initialized bucket.
            .map(|(index, (hash, bucket))| (index, *hash, unsafe { bucket.assume_init_ref() }))
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values are yielded in physical slot order, which depends on the
    /// hashes, the capacity, and the order of insertion. Callers must treat
    /// the order as unspecified. Each call starts a fresh pass.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use array_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .unwrap()
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(hash_str("key2"), |s: &String| s == "key2")
    ///     .unwrap()
    ///     .or_insert("key2".to_string());
    ///
    /// assert_eq!(table.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            index: 0,
            remaining: self.populated,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// After the iterator is dropped the table is empty, whether or not it
    /// was fully consumed. The capacity is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(7, |&n: &u64| n == 7).unwrap().or_insert(7);
    ///
    /// let values: Vec<u64> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, vec![7]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            index: 0,
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(1, |&n: &u64| n == 1).unwrap().or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the number of slots in the table.
    ///
    /// At most this many elements fit. Inserting a new value requires an
    /// empty slot, so a table holding `capacity()` elements only accepts
    /// updates.
    pub fn capacity(&self) -> usize {
        self.hashes.len()
    }

    /// Removes all elements from the table, keeping its capacity.
    pub fn clear(&mut self) {
        self.drain().for_each(drop);
    }

    /// Rehashes the table into the smallest table size that fits its
    /// elements.
    ///
    /// Does nothing if the table is already no larger than that.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use array_hash::HashTable;
    ///
    /// let mut table: HashTable<i32> = HashTable::with_capacity(1000);
    /// table.entry(42, |&v| v == 5).unwrap().or_insert(5);
    /// table.entry(123, |&v| v == 10).unwrap().or_insert(10);
    ///
    /// table.shrink_to_fit();
    /// assert_eq!(table.capacity(), 37);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let capacity: Capacity = self.populated.into();
        if capacity.slots < self.capacity() {
            self.rehash(capacity);
        }
    }

    /// Rehashes the table so that at least `additional` more elements fit.
    ///
    /// This is the only way a table grows: inserts never resize on their
    /// own. Does nothing if capacity is already sufficient.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::with_capacity(0);
    /// for i in 0..37 {
    ///     table.entry(i, |&n| n == i).unwrap().or_insert(i);
    /// }
    /// assert!(table.entry(99, |&n| n == 99).is_err());
    ///
    /// table.reserve(50);
    /// assert!(table.capacity() >= 87);
    /// assert!(table.entry(99, |&n| n == 99).is_ok());
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.populated.saturating_add(additional);
        if required > self.capacity() {
            self.rehash(required.into());
        }
    }

    fn rehash(&mut self, capacity: Capacity) {
        let mut rehashed = Self::from_capacity(capacity);
        let mut index = 0;
        while let Some((hash, value)) = self.take_from(&mut index) {
            rehashed.insert_unique(hash, value);
        }

        *self = rehashed;
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// Returns an occupied entry if a value matching `eq` is stored under
    /// `hash`, and a vacant entry positioned at the first empty slot on the
    /// probe ring otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableFull`] if the value is absent and the table has
    /// no empty slot left. The table is not modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use array_hash::hash_table::Entry;
    /// # use array_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s.starts_with("hello")) {
    ///     Ok(Entry::Vacant(entry)) => {
    ///         entry.insert("hello world".to_string());
    ///     }
    ///     Ok(Entry::Occupied(mut entry)) => {
    ///         *entry.get_mut() = "hello again".to_string();
    ///     }
    ///     Err(e) => panic!("{e}"),
    /// }
    /// assert_eq!(
    ///     table.find(hash, |s: &String| s.starts_with("hello")),
    ///     Some(&"hello world".to_string())
    /// );
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Result<Entry<'_, V>, Error> {
        let hash = slot_hash(hash);
        match self.probe(hash, eq) {
            Probe::Occupied(index) => Ok(Entry::Occupied(OccupiedEntry { table: self, index })),
            Probe::Vacant(index) => Ok(Entry::Vacant(VacantEntry {
                table: self,
                index,
                hash,
            })),
            Probe::Full => Err(Error::TableFull {
                capacity: self.capacity(),
            }),
        }
    }

    /// Finds a value by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).unwrap().or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        match self.probe(slot_hash(hash), eq) {
            // SAFETY: `probe` only reports occupied slots, which are initialized.
            Probe::Occupied(index) => Some(unsafe { self.buckets[index].assume_init_ref() }),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Finds a value by hash and equality predicate, returning a mutable
    /// reference.
    ///
    /// The caller must not change the value in a way that alters its hash or
    /// its equality with respect to future lookups.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        match self.probe(slot_hash(hash), eq) {
            // SAFETY: `probe` only reports occupied slots, which are initialized.
            Probe::Occupied(index) => Some(unsafe { self.buckets[index].assume_init_mut() }),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    /// Returns a histogram of probe distances.
    ///
    /// Entry `i` counts the elements stored `i` slots past their home slot.
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let capacity = self.capacity_policy();
        let mut histogram = Vec::new();
        for (index, hash, _) in self.occupied() {
            let distance = probe_distance(capacity, index, hash);
            if histogram.len() <= distance {
                histogram.resize(distance + 1, 0);
            }
            histogram[distance] += 1;
        }

        histogram
    }

    /// Collects probe and memory statistics for the table.
    ///
    /// Available with the `stats` feature.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let total_distance: usize = histogram
            .iter()
            .enumerate()
            .map(|(distance, count)| distance * count)
            .sum();
        let slot_bytes = core::mem::size_of::<u64>() + core::mem::size_of::<V>();

        DebugStats {
            populated: self.populated,
            capacity: self.capacity(),
            load_factor: self.populated as f64 / self.capacity() as f64,
            longest_probe: histogram.len().saturating_sub(1),
            average_probe: if self.populated == 0 {
                0.0
            } else {
                total_distance as f64 / self.populated as f64
            },
            total_bytes: slot_bytes * self.capacity(),
            wasted_bytes: slot_bytes * (self.capacity() - self.populated),
        }
    }

    /// Prints the probe-distance histogram.
    ///
    /// Available with the `stats` and `std` features.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let histogram = self.probe_histogram();
        let max = histogram.iter().copied().max().unwrap_or(0);

        println!("=== Probe Length Histogram ===");
        for (distance, &count) in histogram.iter().enumerate() {
            println!(
                "{distance:>4}: {count:>8} {bar}",
                bar = "#".repeat(bar_width(count, max))
            );
        }
    }
}

/// Histogram bar length scaled so `max` fills 50 columns. Non-zero counts
/// always get at least one column.
#[cfg(all(any(test, feature = "stats"), feature = "std"))]
fn bar_width(count: usize, max: usize) -> usize {
    let scaled = (count * 50).checked_div(max).unwrap_or(0);
    scaled.max(usize::from(count > 0))
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            table: self,
            index: 0,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single slot of a [`HashTable`], which is either vacant or
/// occupied.
///
/// This enum is constructed by [`HashTable::entry`].
///
/// # Examples
///
/// ```rust
/// # use array_hash::hash_table::Entry;
/// # use array_hash::hash_table::HashTable;
/// #
/// let mut table = HashTable::with_capacity(10);
///
/// match table.entry(17, |&(k, _): &(u64, &str)| k == 17).unwrap() {
///     Entry::Vacant(entry) => {
///         entry.insert((17, "value"));
///     }
///     Entry::Occupied(entry) => {
///         println!("Key already exists with value: {}", entry.get().1);
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// A vacant entry - the value is not present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - the value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use array_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// let value = table.entry(3, |s: &&str| *s == "key").unwrap().or_insert("key");
    /// assert_eq!(*value, "key");
    ///
    /// let existing = table.entry(3, |s: &&str| *s == "key").unwrap().or_insert("other");
    /// assert_eq!(*existing, "key");
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// The closure is not called if the entry is occupied.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    ///
    /// If the entry is vacant, returns `None` without inserting anything.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(entry) => {
                let value = entry.into_mut();
                f(value);
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant slot of a [`HashTable`].
///
/// Holds the first empty slot on the probe ring of the requested hash.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
    hash: u64,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant slot and returns a mutable reference
    /// to it.
    pub fn insert(self, value: V) -> &'a mut V {
        // SAFETY: `index` came from a probe that found the slot empty, the table
        // has been exclusively borrowed since, and `hash` is a slot hash.
        unsafe { self.table.write_slot(self.index, self.hash, value) }
    }
}

/// A view into an occupied slot of a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        // SAFETY: `index` came from a probe that found the slot occupied, and the
        // table has been exclusively borrowed since.
        unsafe { self.table.buckets[self.index].assume_init_ref() }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        // SAFETY: See `get`.
        unsafe { self.table.buckets[self.index].assume_init_mut() }
    }

    /// Converts the entry into a mutable reference to the value, tied to the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        // SAFETY: See `get`.
        unsafe { self.table.buckets[self.index].assume_init_mut() }
    }

    /// Replaces the value in the entry, returning the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }
}

/// An iterator over the values in a [`HashTable`], in slot order.
///
/// This struct is created by [`HashTable::iter`]. It borrows the table, so
/// the table cannot be modified while the iterator is alive.
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    index: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while self.index < self.table.hashes.len() {
            let slot = self.index;
            self.index += 1;

            if self.table.hashes[slot] != EMPTY {
                self.remaining -= 1;
                // SAFETY: A non-empty cached hash marks an initialized bucket.
                return Some(unsafe { self.table.buckets[slot].assume_init_ref() });
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            table: self.table,
            index: self.index,
            remaining: self.remaining,
        }
    }
}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by [`HashTable::drain`]. It yields owned values and
/// empties the table, including any values left unconsumed when it is
/// dropped.
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.table.take_from(&mut self.index)?;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    table: HashTable<V>,
    index: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.table.take_from(&mut self.index)?;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.populated, Some(self.table.populated))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
