//! # Dynamic Sequences
//!
//! An append-only, growable array. Unlike `Vec::push()`, appending to a
//! [`Sequence`] never aborts on allocation failure, but reports
//! [`Exhausted`](crate::mem::Exhausted) to the caller.

use crate::mem;

// Minimum capacity of a non-empty sequence.
const CAPACITY_MIN: usize = 8;

/// Append-only array with amortized doubling growth.
#[derive(Clone, Debug)]
pub struct Sequence<T> {
    inner: alloc::vec::Vec<T>,
}

impl<T> Sequence<T> {
    /// Create a new empty sequence. This does not allocate.
    pub const fn new() -> Self {
        Self {
            inner: alloc::vec::Vec::new(),
        }
    }

    /// Make sure at least one more element can be appended without
    /// reallocation.
    pub fn reserve_one(&mut self) -> Result<(), mem::Exhausted> {
        let len = self.inner.len();
        let cap = self.inner.capacity();

        if len == cap {
            let new_cap = core::cmp::max(CAPACITY_MIN, cap.saturating_mul(2));
            self.inner.try_reserve_exact(new_cap - len)?;
        }

        Ok(())
    }

    /// Append an element to the end of the sequence.
    pub fn push(&mut self, v: T) -> Result<(), mem::Exhausted> {
        self.reserve_one()?;
        self.inner.push(v);
        Ok(())
    }

    /// Yield the number of elements.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Yield the element at the specified position.
    pub fn get(&self, at: usize) -> Option<&T> {
        self.inner.get(at)
    }

    /// Yield the mutable element at the specified position.
    pub fn get_mut(&mut self, at: usize) -> Option<&mut T> {
        self.inner.get_mut(at)
    }

    /// Yield the last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.inner.last()
    }

    /// Yield all elements as a slice, in order of insertion.
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    /// Yield an iterator over all elements.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.inner.iter()
    }

    /// Yield the capacity of the underlying allocation.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl<T> core::default::Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::ops::Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, at: usize) -> &T {
        &self.inner[at]
    }
}

impl<T> core::ops::IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, at: usize) -> &mut T {
        &mut self.inner[at]
    }
}

impl<'this, T> core::iter::IntoIterator for &'this Sequence<T> {
    type Item = &'this T;
    type IntoIter = core::slice::Iter<'this, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let s = Sequence::<u32>::new();

        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(s.capacity(), 0);
        assert_eq!(s.get(0), None);
        assert_eq!(s.last(), None);
    }

    #[test]
    fn growth() {
        let mut s = Sequence::new();

        s.push(0u32).unwrap();
        assert!(s.capacity() >= 8);

        for i in 1..9 {
            s.push(i).unwrap();
        }
        assert!(s.capacity() >= 16);

        assert_eq!(s.len(), 9);
        assert_eq!(s[0], 0);
        assert_eq!(s[8], 8);
        assert_eq!(s.last(), Some(&8));
        assert_eq!(s.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(s.iter().copied().sum::<u32>(), 36);
    }

    #[test]
    fn mutation() {
        let mut s = Sequence::new();

        s.push("a").unwrap();
        s.push("b").unwrap();
        s[1] = "c";
        *s.get_mut(0).unwrap() = "d";

        assert_eq!(s.as_slice(), &["d", "c"]);
    }
}
