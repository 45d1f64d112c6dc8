use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;

use crate::DefaultHashBuilder;
use crate::error::Error;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A fixed-capacity hash map backed by the open-addressing [`HashTable`].
///
/// `ArrayHash<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq`, and hashes keys with the hasher builder `S`. The number of
/// slots is fixed when the map is created (see
/// [`round_up_to_table_size`]); inserting a new key into a map with no free
/// slot fails with [`Error::TableFull`] instead of growing the map.
///
/// Iteration visits entries in slot order, which is unrelated to insertion
/// order.
///
/// # Performance Characteristics
///
/// - **Memory**: the size of `(K, V)` plus a u64 for the hash, per slot.
///
/// [`round_up_to_table_size`]: crate::hash_table::round_up_to_table_size
#[derive(Clone)]
pub struct ArrayHash<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for ArrayHash<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.table.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> PartialEq for ArrayHash<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ArrayHash<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> ArrayHash<K, V, S> {
    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the map.
    ///
    /// A map holding `capacity()` entries accepts updates to existing keys
    /// but no new keys.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all elements from the map, keeping its capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs of the map, in slot
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use array_hash::ArrayHash;
    ///
    /// let mut map: ArrayHash<i32, &str> = ArrayHash::with_capacity(10);
    /// map.insert(1, "a").unwrap();
    /// map.insert(2, "b").unwrap();
    ///
    /// let mut pairs: Vec<_> = map.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&1, &"a"), (&2, &"b")]);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map, in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map, in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator that removes and yields all key-value pairs from
    /// the map.
    ///
    /// After the iterator is dropped the map is empty.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> ArrayHash<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with room for `capacity` keys, using the given
    /// hasher builder.
    ///
    /// The number of slots is the next table size above `capacity`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates an empty map of the smallest table size, using the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Rehashes the map into the smallest table size that fits its entries.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Rehashes the map so that at least `additional` more keys fit.
    ///
    /// Maps never grow on insert; this is the only way to enlarge one.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Inserts a key-value pair, or updates the value of an existing key.
    ///
    /// Returns `Ok(None)` if the key was not present and `Ok(Some(old))` if
    /// it was, in which case the stored key is kept and only the value is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableFull`] if the key is new and the map has no free
    /// slot. Updating an existing key never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use array_hash::ArrayHash;
    ///
    /// let mut map: ArrayHash<i32, &str> = ArrayHash::with_capacity(5);
    /// assert_eq!(map.insert(37, "a"), Ok(None));
    /// assert_eq!(map.insert(37, "b"), Ok(Some("a")));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// assert_eq!(map.len(), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key)? {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Ok(Some(old_value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                Ok(None)
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        let (_, value) = self.table.find(hash, |(k, _)| k == key)?;
        Some(value)
    }

    /// Returns the stored key and value corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = self.hash_builder.hash_one(key);
        let (k, v) = self.table.find(hash, |(k, _)| k == key)?;
        Some((k, v))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        let (_, value) = self.table.find_mut(hash, |(k, _)| k == key)?;
        Some(value)
    }

    /// Looks up the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use array_hash::ArrayHash;
    /// use array_hash::Error;
    ///
    /// let mut map: ArrayHash<&str, bool> = ArrayHash::with_capacity(5);
    /// map.insert("here", false).unwrap();
    ///
    /// assert_eq!(map.lookup(&"here"), Ok(&false));
    /// assert_eq!(map.lookup(&"gone"), Err(Error::KeyNotFound));
    /// # }
    /// ```
    pub fn lookup(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the number of entries stored under the key, `0` or `1`.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Returns `true` if the map contains a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Gets the given key's entry in the map for in-place manipulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableFull`] if the key is absent and the map has no
    /// free slot for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use array_hash::ArrayHash;
    ///
    /// let mut counts: ArrayHash<char, u32> = ArrayHash::with_capacity(26);
    /// for c in "hello".chars() {
    ///     *counts.entry(c)?.or_default() += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&'l'), Some(&2));
    /// assert_eq!(counts.get(&'h'), Some(&1));
    /// # }
    /// # Ok::<(), array_hash::Error>(())
    /// ```
    pub fn entry(&mut self, key: K) -> Result<Entry<'_, K, V>, Error> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key)? {
            TableEntry::Occupied(entry) => Ok(Entry::Occupied(OccupiedEntry { entry })),
            TableEntry::Vacant(entry) => Ok(Entry::Vacant(VacantEntry { entry, key })),
        }
    }
}

impl<K, V, S> ArrayHash<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map of the smallest table size using the default
    /// hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map with room for `capacity` keys using the default
    /// hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use array_hash::ArrayHash;
    ///
    /// let map: ArrayHash<(i32, i32), bool> = ArrayHash::with_capacity(5);
    /// assert_eq!(map.capacity(), 37);
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for ArrayHash<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if the key is absent, like indexing a slice out of bounds. Use
/// [`ArrayHash::lookup`] for a fallible lookup.
impl<K, V, S> Index<&K> for ArrayHash<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ArrayHash<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ArrayHash<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`ArrayHash`].
///
/// [`entry`]: ArrayHash::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Inserts a value into the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }
}

/// An iterator over the key-value pairs of an `ArrayHash`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the keys of an `ArrayHash`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of an `ArrayHash`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of an `ArrayHash`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// An owning iterator over the key-value pairs of an `ArrayHash`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Sends every key to the same home slot.
    #[derive(Clone, Default)]
    struct ConstantHashBuilder;

    struct ConstantHasher;

    impl core::hash::Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            36
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for ConstantHashBuilder {
        type Hasher = ConstantHasher;

        fn build_hasher(&self) -> Self::Hasher {
            ConstantHasher
        }
    }

    type Map<K, V> = ArrayHash<K, V, SipHashBuilder>;

    #[test]
    fn test_new_and_with_hasher() {
        let map: Map<i32, String> = ArrayHash::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 37);

        let map2 = ArrayHash::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
    }

    #[test]
    fn test_with_capacity() {
        let map: Map<i32, String> = ArrayHash::with_capacity(100);
        assert_eq!(map.capacity(), 131);
        assert!(map.is_empty());

        let map2 =
            ArrayHash::<i32, String, _>::with_capacity_and_hasher(200, SipHashBuilder::default());
        assert_eq!(map2.capacity(), 239);
    }

    #[test]
    fn test_insert_and_get() {
        let mut map: Map<i32, String> = ArrayHash::new();

        assert_eq!(map.insert(1, "hello".to_string()), Ok(None));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);

        assert_eq!(
            map.insert(1, "world".to_string()),
            Ok(Some("hello".to_string()))
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"world".to_string()));
        assert_eq!(map.get_key_value(&1), Some((&1, &"world".to_string())));
    }

    #[test]
    fn test_no_duplicate_keys() {
        let mut map: Map<u64, u64> = ArrayHash::with_capacity(300);
        for k in 0..200u64 {
            map.insert(k, k).unwrap();
        }
        for k in 0..200u64 {
            map.insert(k, k + 1000).unwrap();
        }

        assert_eq!(map.len(), 200);
        for k in 0..200u64 {
            assert_eq!(map.get(&k), Some(&(k + 1000)));
        }
        assert_eq!(map.iter().count(), 200);
    }

    #[test]
    fn test_lookup_and_count() {
        let mut map: Map<&str, bool> = ArrayHash::new();
        map.insert("falsy", false).unwrap();

        assert_eq!(map.lookup(&"falsy"), Ok(&false));
        assert_eq!(map.lookup(&"absent"), Err(Error::KeyNotFound));
        assert_eq!(map.count(&"falsy"), 1);
        assert_eq!(map.count(&"absent"), 0);
        assert!(map.contains_key(&"falsy"));
        assert!(!map.contains_key(&"absent"));
    }

    #[test]
    fn test_index() {
        let mut map: Map<i32, &str> = ArrayHash::new();
        map.insert(7, "seven").unwrap();
        assert_eq!(map[&7], "seven");
    }

    #[test]
    #[should_panic(expected = "no such key")]
    fn test_index_missing_key_panics() {
        let map: Map<i32, &str> = ArrayHash::new();
        let _ = map[&7];
    }

    #[test]
    fn test_get_mut() {
        let mut map: Map<i32, String> = ArrayHash::new();
        map.insert(1, "hello".to_string()).unwrap();

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_coordinate_scenario() {
        let mut map: Map<(i32, i32), bool> = ArrayHash::with_capacity(5);
        assert_eq!(map.capacity(), 37);

        let cells = [(0, 0), (0, 1), (1, 1), (-1, 0), (0, -1)];
        for cell in cells {
            assert_eq!(map.insert(cell, true), Ok(None));
        }

        assert_eq!(map.len(), 5);
        assert_eq!(map.count(&(0, 0)), 1);
        assert_eq!(map.count(&(5, 5)), 0);

        let mut seen: Vec<((i32, i32), bool)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        seen.sort();
        let mut expected: Vec<((i32, i32), bool)> = cells.iter().map(|&c| (c, true)).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_full_map() {
        let mut map: ArrayHash<u32, u32, ConstantHashBuilder> = ArrayHash::new();
        let capacity = map.capacity() as u32;
        for k in 0..capacity {
            assert_eq!(map.insert(k, k), Ok(None));
        }

        assert_eq!(
            map.insert(capacity, capacity),
            Err(Error::TableFull { capacity: 37 })
        );
        assert!(matches!(
            map.entry(capacity),
            Err(Error::TableFull { capacity: 37 })
        ));
        assert_eq!(map.insert(3, 300), Ok(Some(3)));
        assert_eq!(map.len(), 37);
        assert_eq!(map.get(&3), Some(&300));
        assert_eq!(map.get(&capacity), None);
        assert_eq!(map.lookup(&capacity), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_wraparound_collisions() {
        let mut map: ArrayHash<u32, u32, ConstantHashBuilder> = ArrayHash::new();
        let capacity = map.capacity() as u32;
        for k in 0..capacity - 1 {
            map.insert(k, k * 10).unwrap();
        }

        for k in 0..capacity - 1 {
            assert_eq!(map.get(&k), Some(&(k * 10)), "{map:?}");
        }
        assert_eq!(map.get(&capacity), None);
    }

    #[test]
    fn test_clear() {
        let mut map: Map<i32, String> = ArrayHash::new();
        map.insert(1, "hello".to_string()).unwrap();
        map.insert(2, "world".to_string()).unwrap();

        assert_eq!(map.len(), 2);
        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
        assert!(!map.contains_key(&2));
        assert_eq!(map.capacity(), 37);
    }

    #[test]
    fn test_reserve() {
        let mut map: Map<i32, i32> = ArrayHash::new();
        for i in 0..37 {
            map.insert(i, i).unwrap();
        }
        assert!(map.insert(37, 37).is_err());

        map.reserve(1000);
        assert!(map.capacity() >= 1037);
        assert_eq!(map.insert(37, 37), Ok(None));
        for i in 0..38 {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_entry_api() {
        let mut map: Map<i32, String> = ArrayHash::new();

        let value = map.entry(1).unwrap().or_insert("hello".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        let value = map.entry(1).unwrap().or_insert("world".to_string());
        assert_eq!(value, &"hello".to_string());
        assert_eq!(map.len(), 1);

        map.entry(2)
            .unwrap()
            .or_insert_with(|| "computed".to_string());
        assert_eq!(map.get(&2), Some(&"computed".to_string()));

        map.entry(1)
            .unwrap()
            .and_modify(|v| v.push_str(" world"))
            .or_insert("default".to_string());
        assert_eq!(map.get(&1), Some(&"hello world".to_string()));

        assert_eq!(map.entry(3).unwrap().key(), &3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_entry_or_default_counts() {
        let mut map: Map<i32, u8> = ArrayHash::new();

        for k in [1, 2, 1, 3, 1, 2] {
            *map.entry(k).unwrap().or_default() += 1;
        }

        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.get(&2), Some(&2));
        assert_eq!(map.get(&3), Some(&1));
    }

    #[test]
    fn test_occupied_entry() {
        let mut map: Map<i32, String> = ArrayHash::new();
        map.insert(1, "hello".to_string()).unwrap();

        match map.entry(1).unwrap() {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), &1);
                assert_eq!(entry.get(), &"hello".to_string());

                *entry.get_mut() = "world".to_string();
                assert_eq!(entry.get(), &"world".to_string());

                let old_value = entry.insert("new".to_string());
                assert_eq!(old_value, "world".to_string());
                assert_eq!(entry.get(), &"new".to_string());
            }
            Entry::Vacant(_) => panic!("Expected occupied entry"),
        }

        assert_eq!(map.get(&1), Some(&"new".to_string()));
    }

    #[test]
    fn test_vacant_entry() {
        let mut map: Map<i32, String> = ArrayHash::new();

        match map.entry(1).unwrap() {
            Entry::Vacant(entry) => {
                assert_eq!(entry.key(), &1);

                let value = entry.insert("hello".to_string());
                assert_eq!(value, &"hello".to_string());
            }
            Entry::Occupied(_) => panic!("Expected vacant entry"),
        }

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"hello".to_string()));

        match map.entry(2).unwrap() {
            Entry::Vacant(entry) => assert_eq!(entry.into_key(), 2),
            Entry::Occupied(_) => panic!("Expected vacant entry"),
        }
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_iterators() {
        let mut map: Map<i32, String> = ArrayHash::new();
        map.insert(1, "one".to_string()).unwrap();
        map.insert(2, "two".to_string()).unwrap();
        map.insert(3, "three".to_string()).unwrap();

        let pairs: std::collections::HashMap<i32, String> =
            map.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&1), Some(&"one".to_string()));
        assert_eq!(pairs.get(&2), Some(&"two".to_string()));
        assert_eq!(pairs.get(&3), Some(&"three".to_string()));

        let keys: std::collections::HashSet<i32> = map.keys().copied().collect();
        assert_eq!(keys, [1, 2, 3].into_iter().collect());

        let values: std::collections::HashSet<String> = map.values().cloned().collect();
        assert_eq!(values.len(), 3);
        assert!(values.contains("one"));
        assert!(values.contains("two"));
        assert!(values.contains("three"));

        assert_eq!((&map).into_iter().count(), 3);

        let owned: std::collections::HashMap<i32, String> = map.into_iter().collect();
        assert_eq!(owned, pairs);
    }

    #[test]
    fn test_iter_empty() {
        let map: Map<i32, i32> = ArrayHash::with_capacity(1000);
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.keys().count(), 0);
    }

    #[test]
    fn test_drain() {
        let mut map: Map<i32, String> = ArrayHash::new();
        map.insert(1, "one".to_string()).unwrap();
        map.insert(2, "two".to_string()).unwrap();
        map.insert(3, "three".to_string()).unwrap();

        let drained: std::collections::HashMap<i32, String> = map.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(map.is_empty());

        assert_eq!(drained.get(&1), Some(&"one".to_string()));
        assert_eq!(drained.get(&2), Some(&"two".to_string()));
        assert_eq!(drained.get(&3), Some(&"three".to_string()));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map: Map<i32, i32> = ArrayHash::with_capacity(1000);
        for i in 0..10 {
            map.insert(i, i).unwrap();
        }

        let mut copy = map.clone();
        assert_eq!(copy.capacity(), 37);
        assert_eq!(copy, map);

        copy.insert(0, 100).unwrap();
        assert_eq!(map.get(&0), Some(&0));
        assert_eq!(copy.get(&0), Some(&100));
        assert_ne!(copy, map);
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut map: Map<i32, i32> = ArrayHash::with_capacity(1000);
        map.insert(1, 1).unwrap();
        map.shrink_to_fit();
        assert_eq!(map.capacity(), 37);
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_string_keys() {
        let mut map: Map<String, i32> = ArrayHash::new();

        map.insert("hello".to_string(), 1).unwrap();
        map.insert("world".to_string(), 2).unwrap();
        map.insert("rust".to_string(), 3).unwrap();

        assert_eq!(map.get(&"hello".to_string()), Some(&1));
        assert_eq!(map.get(&"world".to_string()), Some(&2));
        assert_eq!(map.get(&"rust".to_string()), Some(&3));
        assert_eq!(map.get(&"missing".to_string()), None);
    }

    #[test]
    fn test_debug() {
        let mut map: Map<i32, &str> = ArrayHash::new();
        assert_eq!(format!("{map:?}"), "{}");
        map.insert(1, "a").unwrap();
        assert_eq!(format!("{map:?}"), r#"{1: "a"}"#);
    }
}
