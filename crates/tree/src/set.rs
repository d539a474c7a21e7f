use std::cmp::Ordering;
use std::fmt;

use crate::map::TreeMap;

/// Comparison-ordered set: the map engine with a unit payload.
pub struct TreeSet<T, C = fn(&T, &T) -> Ordering>
where
    C: Fn(&T, &T) -> Ordering,
{
    map: TreeMap<T, (), C>,
}

impl<T: Ord> TreeSet<T> {
    pub fn new() -> Self {
        Self {
            map: TreeMap::new(),
        }
    }
}

impl<T: Ord> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            map: TreeMap::with_comparator(comparator),
        }
    }

    /// `false` when the value is already present; the set is left
    /// untouched in that case.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert_if_absent(value, ())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Move every element of `src` into `self`, emptying `src`; returns
    /// the number of elements that were new to `self`.
    pub fn join(&mut self, src: &mut Self) -> usize {
        self.map.join(&mut src.map)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }

    pub fn for_each<F: FnMut(&T)>(&self, mut f: F) {
        for v in self.iter() {
            f(v);
        }
    }

    /// Render as `{a, b, c}` in ascending order; `{}` when empty.
    pub fn to_string_with<F>(&self, mut elem_fmt: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let mut out = String::from("{");
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&elem_fmt(v));
        }
        out.push('}');
        out
    }

    /// Validate every structural invariant. Test support.
    pub fn check(&self) -> Result<(), String> {
        self.map.check()
    }
}

impl<T, C> fmt::Display for TreeSet<T, C>
where
    T: fmt::Display,
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut set = TreeSet::new();
        assert!(set.insert(2));
        assert!(set.insert(1));
        assert!(!set.insert(2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.len(), 1);
        set.check().unwrap();
    }

    #[test]
    fn join_disjoint_sets() {
        let mut dest = TreeSet::new();
        let mut src = TreeSet::new();
        for v in [1, 2, 3] {
            dest.insert(v);
        }
        for v in [4, 5] {
            src.insert(v);
        }
        assert_eq!(dest.join(&mut src), 2);
        assert_eq!(dest.len(), 5);
        assert!(src.is_empty());
        dest.check().unwrap();
    }

    #[test]
    fn join_overlapping_sets() {
        let mut dest = TreeSet::new();
        let mut src = TreeSet::new();
        for v in [1, 2, 3] {
            dest.insert(v);
        }
        for v in [3, 4, 5] {
            src.insert(v);
        }
        assert_eq!(dest.join(&mut src), 2);
        let elems: Vec<i32> = dest.iter().copied().collect();
        assert_eq!(elems, vec![1, 2, 3, 4, 5]);
        assert!(src.is_empty());
    }

    #[test]
    fn display_format() {
        let mut set = TreeSet::new();
        assert_eq!(set.to_string(), "{}");
        for v in [3, 1, 2] {
            set.insert(v);
        }
        assert_eq!(set.to_string(), "{1, 2, 3}");
        assert_eq!(set.to_string_with(|v| format!("<{v}>")), "{<1>, <2>, <3>}");
    }

    #[test]
    fn reverse_comparator() {
        let mut set = TreeSet::with_comparator(|a: &&str, b: &&str| b.cmp(a));
        for s in ["a", "c", "b"] {
            set.insert(s);
        }
        let elems: Vec<&str> = set.iter().copied().collect();
        assert_eq!(elems, vec!["c", "b", "a"]);
        set.check().unwrap();
    }
}
