//! Linear collection type.
//!
//! A [`List`] is either growable (a variable-length sequence) or fixed (an array whose length
//! was decided at construction). Fixed lists never change length: element removal on them is
//! expressed by zeroing the element instead.

use std::collections::BTreeSet;
use std::fmt;

use super::{Value, ValueError};

/// An ordered, integer-indexed collection of values.
///
/// # Examples
///
/// ```
/// # use dynpath::value::{List, Value};
/// let mut growable = List::growable(vec![Value::Int(1)]);
/// assert!(growable.can_grow());
/// growable.push(2).unwrap();
/// assert_eq!(growable.len(), 2);
///
/// let mut fixed = List::fixed(vec![Value::Int(0); 3]);
/// assert!(!fixed.can_grow());
/// assert!(fixed.push(4).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    items: Vec<Value>,
    fixed: bool,
}

impl List {
    /// Creates a new empty growable list
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            fixed: false,
        }
    }

    /// Creates a growable list from the given items
    pub fn growable(items: Vec<Value>) -> Self {
        Self {
            items,
            fixed: false,
        }
    }

    /// Creates a fixed-length list from the given items
    pub fn fixed(items: Vec<Value>) -> Self {
        Self { items, fixed: true }
    }

    /// Returns true if the list can change length
    pub fn can_grow(&self) -> bool {
        !self.fixed
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Gets the element at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Gets a mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index`, returning the old element.
    ///
    /// Returns `None` without modifying the list if `index` is out of range.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Appends an element to a growable list
    pub fn push(&mut self, value: impl Into<Value>) -> Result<(), ValueError> {
        if self.fixed {
            return Err(ValueError::FixedLength { len: self.len() });
        }
        self.items.push(value.into());
        Ok(())
    }

    /// Grows the list to `len` elements, filling new slots from `fill`.
    ///
    /// `fill` receives the index of each slot being created. Does nothing if the list already
    /// has at least `len` elements.
    pub fn grow_to(
        &mut self,
        len: usize,
        mut fill: impl FnMut(usize) -> Value,
    ) -> Result<(), ValueError> {
        if self.items.len() >= len {
            return Ok(());
        }
        if self.fixed {
            return Err(ValueError::FixedLength { len: self.len() });
        }
        for index in self.items.len()..len {
            self.items.push(fill(index));
        }
        Ok(())
    }

    /// Removes the elements at the given indices, preserving the order of the rest.
    ///
    /// Out-of-range and duplicate indices are ignored. Returns the number of removed elements.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<usize, ValueError> {
        if self.fixed {
            return Err(ValueError::FixedLength { len: self.len() });
        }
        let doomed: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < self.items.len())
            .collect();
        let items = std::mem::take(&mut self.items);
        self.items = items
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !doomed.contains(i))
            .map(|(_, v)| v)
            .collect();
        Ok(doomed.len())
    }

    /// Replaces every element with its zero value, keeping the length
    pub fn zero_all(&mut self) {
        for item in &mut self.items {
            *item = item.zeroed();
        }
    }

    /// Returns an iterator over the elements
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the elements
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.items.iter_mut()
    }

    /// Returns the elements as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Consumes the list, returning its elements
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List::growable(items)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        List::growable(iter.into_iter().collect())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
