use std::fmt;

/// Growable array with index-based access.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Swap in `value` at `index`, returning the displaced element.
    /// `None` (and `value` dropped) when out of bounds.
    pub fn replace(&mut self, index: usize, value: T) -> Option<T> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, value))
    }

    /// Remove and return the element at `index`, shifting the tail
    /// left. `None` when out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Render as `[a, b, c]`; `[]` when empty.
    pub fn to_string_with<F>(&self, mut elem_fmt: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let mut out = String::from("[");
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&elem_fmt(v));
        }
        out.push(']');
        out
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_get_len() {
        let mut list = List::new();
        list.append(10);
        list.append(20);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&10));
        assert_eq!(list.get(2), None);
    }

    #[test]
    fn replace_returns_displaced() {
        let mut list: List<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(list.replace(1, 99), Some(2));
        assert_eq!(list.get(1), Some(&99));
        assert_eq!(list.replace(9, 0), None);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn remove_at_shifts() {
        let mut list: List<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(list.remove_at(0), Some(1));
        assert_eq!(list.get(0), Some(&2));
        assert_eq!(list.remove_at(5), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn display_format() {
        let mut list = List::new();
        assert_eq!(list.to_string(), "[]");
        list.append("a");
        list.append("b");
        assert_eq!(list.to_string(), "[a, b]");
        assert_eq!(list.to_string_with(|v| v.to_uppercase()), "[A, B]");
    }

    #[test]
    fn reserve_and_shrink() {
        let mut list: List<u8> = List::with_capacity(4);
        list.reserve(64);
        assert!(list.capacity() >= 64);
        list.append(1);
        list.shrink_to_fit();
        assert!(list.capacity() >= 1);
        list.clear();
        assert!(list.is_empty());
    }
}
