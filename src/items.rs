use serde::{Deserialize, Serialize};

use crate::errors::{DocumentError, Result};

/// ordered line items; insertion order is display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItems<T> {
    items: Vec<T>,
}

impl<T> Default for LineItems<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> LineItems<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// append and return a reference to the stored item
    pub fn push(&mut self, item: T) -> &T {
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// remove the item at a 0-based position, shifting later items up
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(DocumentError::ItemNotFound {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// drop every item, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based position the next appended item will take
    pub fn next_position(&self) -> usize {
        self.items.len() + 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a LineItems<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut items = LineItems::new();
        items.push("a");
        items.push("b");
        items.push("a");

        assert_eq!(items.as_slice(), &["a", "b", "a"]);
        assert_eq!(items.next_position(), 4);
    }

    #[test]
    fn test_remove_by_position() {
        let mut items = LineItems::new();
        for n in 1..=3 {
            items.push(n);
        }

        assert_eq!(items.remove(1).unwrap(), 2);
        assert_eq!(items.as_slice(), &[1, 3]);
        assert_eq!(
            items.remove(2).unwrap_err(),
            DocumentError::ItemNotFound { index: 2, len: 2 }
        );
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut items = LineItems::new();
        items.push(1);
        items.push(2);

        assert_eq!(items.clear(), 2);
        assert!(items.is_empty());
        assert_eq!(items.clear(), 0);
    }
}
