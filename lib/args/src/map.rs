//! # String-Keyed Maps
//!
//! An open-addressing hash table mapping strings to small copyable handles.
//! Keys are hashed with 32-bit FNV-1a and collisions are resolved by linear
//! probing. The table keeps its load factor at or below one half, and owns a
//! copy of every key.
//!
//! There is no removal operation. All insertions reserve memory fallibly and
//! report [`Exhausted`](crate::mem::Exhausted) on failure, leaving the map
//! unchanged.

use crate::mem;

// Minimum capacity of a non-empty table. Must be a power of two.
const CAPACITY_MIN: usize = 8;

const FNV_OFFSET: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

struct Entry<V> {
    key: alloc::string::String,
    hash: u32,
    value: V,
}

/// Hash table from owned string keys to values of type `V`.
pub struct Map<V> {
    slots: alloc::vec::Vec<Option<Entry<V>>>,
    count: usize,
}

/// Iterator over all entries of a `Map`, in table order.
pub struct MapIter<'this, V>(core::slice::Iter<'this, Option<Entry<V>>>);

/// Hash a string with the 32-bit FNV-1a algorithm.
pub fn hash(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET, |acc, b| {
        (acc ^ b as u32).wrapping_mul(FNV_PRIME)
    })
}

// Find the slot for `key`, which is either the slot holding `key`, or the
// empty slot where it would be inserted. The table must have at least one
// empty slot, which the load limit guarantees.
fn probe<V>(slots: &[Option<Entry<V>>], key: &str, key_hash: u32) -> usize {
    // The capacity is a power of two, so masking is equivalent to modulo.
    let mask = slots.len() - 1;
    let mut idx = key_hash as usize & mask;

    loop {
        match &slots[idx] {
            None => return idx,
            Some(e) if e.hash == key_hash && e.key == key => return idx,
            Some(_) => idx = (idx + 1) & mask,
        }
    }
}

impl<V> Map<V> {
    /// Create a new empty map. This does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: alloc::vec::Vec::new(),
            count: 0,
        }
    }

    /// Yield the number of keys in the map.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Yield the number of slots of the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn threshold(&self) -> usize {
        self.slots.len() / 2
    }

    fn grow(&mut self) -> Result<(), mem::Exhausted> {
        let new_cap = core::cmp::max(CAPACITY_MIN, self.slots.len() * 2);

        let mut slots = alloc::vec::Vec::new();
        slots.try_reserve_exact(new_cap)?;
        slots.resize_with(new_cap, || None);

        let old = core::mem::replace(&mut self.slots, slots);
        for entry in old.into_iter().flatten() {
            let idx = probe(&self.slots, &entry.key, entry.hash);
            self.slots[idx] = Some(entry);
        }

        Ok(())
    }

    /// Grow the table until `additional` new keys fit without exceeding the
    /// load limit.
    pub fn reserve(&mut self, additional: usize) -> Result<(), mem::Exhausted> {
        while self.count.saturating_add(additional) > self.threshold() {
            self.grow()?;
        }
        Ok(())
    }

    // Insert a pre-copied key. Space must have been reserved by the caller.
    fn insert_owned(&mut self, key: alloc::string::String, value: V) {
        let key_hash = hash(&key);
        let idx = probe(&self.slots, &key, key_hash);

        match &mut self.slots[idx] {
            Some(e) => e.value = value,
            slot @ None => {
                *slot = Some(Entry {
                    key: key,
                    hash: key_hash,
                    value: value,
                });
                self.count += 1;
            },
        }
    }

    /// Insert `key` with the given value, or update the value if the key is
    /// already present. The map stores its own copy of `key`.
    pub fn set(&mut self, key: &str, value: V) -> Result<(), mem::Exhausted> {
        self.reserve(1)?;

        let key_hash = hash(key);
        let idx = probe(&self.slots, key, key_hash);

        match &mut self.slots[idx] {
            Some(e) => e.value = value,
            slot @ None => {
                *slot = Some(Entry {
                    key: mem::try_to_owned(key)?,
                    hash: key_hash,
                    value: value,
                });
                self.count += 1;
            },
        }

        Ok(())
    }

    /// Split `keys` on ASCII spaces and insert every word as a separate key
    /// for the same value.
    ///
    /// This either inserts all words or, on failure, leaves the map
    /// untouched.
    pub fn set_split(&mut self, keys: &str, value: V) -> Result<(), mem::Exhausted>
    where
        V: Clone,
    {
        let words = keys.split(' ').filter(|v| !v.is_empty());

        let mut owned = alloc::vec::Vec::new();
        owned.try_reserve_exact(words.clone().count())?;
        for word in words {
            owned.push(mem::try_to_owned(word)?);
        }

        self.reserve(owned.len())?;
        for key in owned {
            self.insert_owned(key, value.clone());
        }

        Ok(())
    }

    /// Look up the value of `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        if self.count == 0 {
            return None;
        }

        let idx = probe(&self.slots, key, hash(key));
        self.slots[idx].as_ref().map(|v| &v.value)
    }

    /// Check whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Yield an iterator over all keys and values, in table order.
    pub fn iter(&self) -> MapIter<'_, V> {
        MapIter(self.slots.iter())
    }
}

impl<V> core::default::Default for Map<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: core::fmt::Debug> core::fmt::Debug for Map<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'this, V>
    core::iter::Iterator
for
    MapIter<'this, V>
{
    type Item = (&'this str, &'this V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.by_ref()
            .flatten()
            .next()
            .map(|v| (v.key.as_str(), &v.value))
    }
}
