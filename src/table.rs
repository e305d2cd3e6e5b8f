#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::value::Value;
use std::fmt;

/// Tables with at least this many entries use a hash index for lookups.
pub(crate) const INDEXED_TABLE_THRESHOLD: usize = 6;

/// A TOML table: key/value pairs in insertion order.
///
/// A `Table` is the top-level value returned by [`decode`](crate::decode) and
/// is also the value inside any `[section]` or inline `{ ... }` table.
///
/// Small tables are searched linearly. Once a table reaches a handful of
/// entries it builds a key index, so that documents with wide tables decode
/// in linear time.
///
/// # Iteration
///
/// `Table` implements [`IntoIterator`] (both by reference and by value),
/// yielding `(key, value)` pairs in the order the keys first appeared.
#[derive(Clone, Default)]
pub struct Table {
    entries: Vec<(String, Value)>,
    index: Option<foldhash::HashMap<String, usize>>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find_index(&self, name: &str) -> Option<usize> {
        match &self.index {
            Some(index) => index.get(name).copied(),
            None => self.entries.iter().position(|(k, _)| k == name),
        }
    }

    /// Inserts a key/value pair, returning the previous value for `key`.
    ///
    /// Replacing a value keeps the key at its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(idx) = self.find_index(&key) {
            return Some(std::mem::replace(&mut self.entries[idx].1, value));
        }
        let idx = self.entries.len();
        match &mut self.index {
            Some(index) => {
                index.insert(key.clone(), idx);
            }
            None if idx + 1 >= INDEXED_TABLE_THRESHOLD => {
                let mut index = foldhash::HashMap::default();
                for (i, (k, _)) in self.entries.iter().enumerate() {
                    index.insert(k.clone(), i);
                }
                index.insert(key.clone(), idx);
                self.index = Some(index);
            }
            None => {}
        }
        self.entries.push((key, value));
        None
    }

    /// Returns a reference to the value for `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.find_index(name)?;
        Some(&self.entries[idx].1)
    }

    /// Returns a mutable reference to the value for `name`.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let idx = self.find_index(name)?;
        Some(&mut self.entries[idx].1)
    }

    /// Returns both the stored key and its value.
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &Value)> {
        let idx = self.find_index(name)?;
        let (k, v) = &self.entries[idx];
        Some((k, v))
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Returns an iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Value> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Drop for Table {
    // Dotted keys and headers can nest tables far deeper than the call stack
    // allows, so nested containers are unlinked onto a heap stack first.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        push_containers(self.entries.drain(..).map(|(_, v)| v), &mut stack);
        while let Some(mut value) = stack.pop() {
            match &mut value {
                Value::Table(table) => {
                    push_containers(table.entries.drain(..).map(|(_, v)| v), &mut stack);
                }
                Value::Array(array) => push_containers(std::mem::take(array), &mut stack),
                _ => {}
            }
        }
    }
}

fn push_containers(values: impl IntoIterator<Item = Value>, stack: &mut Vec<Value>) {
    for value in values {
        match &value {
            Value::Table(table) if !table.is_empty() => stack.push(value),
            Value::Array(array) if !array.is_empty() => stack.push(value),
            _ => {}
        }
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Borrowing iterator over a [`Table`], yielding `(&str, &Value)` pairs.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (k, v) = self.inner.next()?;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Consuming iterator over a [`Table`], yielding `(String, Value)` pairs.
pub struct IntoIter {
    inner: std::vec::IntoIter<(String, Value)>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            inner: std::mem::take(&mut self.entries).into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
