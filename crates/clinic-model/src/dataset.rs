use serde::Serialize;

use crate::records::TabularRecord;

/// Typed records loaded from one resource, in source row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset<T> {
    pub resource: String,
    pub records: Vec<T>,
}

impl<T> Dataset<T> {
    pub fn new(resource: impl Into<String>, records: Vec<T>) -> Self {
        Self {
            resource: resource.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}

impl<T: TabularRecord> Dataset<T> {
    /// An empty dataset for `T`'s conventional resource.
    pub fn empty() -> Self {
        Self::new(T::RESOURCE, Vec::new())
    }
}

impl<T: TabularRecord> Default for Dataset<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a Dataset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
