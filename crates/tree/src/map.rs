use std::cmp::Ordering;
use std::fmt;

use crate::arena::Arena;
use crate::balance;
use crate::error::ReserveError;
use crate::node::{Color, Node};

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Comparison-ordered map over a red-black tree.
///
/// The comparator is part of the container type and is fixed at
/// construction; ties under the comparator are upserts, never
/// duplicates. All operations are `O(log n)` except `clear`, `join`,
/// and full iteration.
pub struct TreeMap<K, V, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: Arena<Node<K, V>>,
    root: Option<u32>,
    len: usize,
    comparator: C,
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find_node(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            curr = match (self.comparator)(key, &self.arena[i].key) {
                Ordering::Equal => return Some(i),
                Ordering::Less => self.arena[i].left,
                Ordering::Greater => self.arena[i].right,
            };
        }
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_node(key).map(|i| &self.arena[i].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_node(key)?;
        Some(&mut self.arena[i].value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Insert or update. Returns `true` when a new entry was created;
    /// `false` means the key already existed and its value was replaced
    /// (the old value is dropped). Size changes only on `true`.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_inner(key, value, true)
    }

    /// Insert only if the key is absent; an existing entry is left
    /// untouched and the offered pair is dropped. Used by the set facet
    /// and by `join`'s duplicate-discard path.
    pub(crate) fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        self.insert_inner(key, value, false)
    }

    fn insert_inner(&mut self, key: K, value: V, replace: bool) -> bool {
        let mut parent = None;
        let mut curr = self.root;
        while let Some(i) = curr {
            match (self.comparator)(&key, &self.arena[i].key) {
                Ordering::Equal => {
                    if replace {
                        self.arena[i].value = value;
                    }
                    return false;
                }
                Ordering::Less => {
                    parent = Some(i);
                    curr = self.arena[i].left;
                }
                Ordering::Greater => {
                    parent = Some(i);
                    curr = self.arena[i].right;
                }
            }
        }
        let z = self.arena.alloc(Node::new(key, value));
        self.arena[z].parent = parent;
        match parent {
            None => self.root = Some(z),
            Some(p) => {
                if (self.comparator)(&self.arena[z].key, &self.arena[p].key) == Ordering::Less {
                    self.arena[p].left = Some(z);
                } else {
                    self.arena[p].right = Some(z);
                }
            }
        }
        balance::insert_fixup(&mut self.arena, &mut self.root, z);
        self.len += 1;
        true
    }

    /// Remove the entry for `key`, returning its value. `None` leaves
    /// the map untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let z = self.find_node(key)?;
        let a = &mut self.arena;
        let root = &mut self.root;

        let mut spliced_color = a[z].color;
        let x: Option<u32>;
        let x_parent: Option<u32>;

        if a[z].left.is_none() {
            x = a[z].right;
            x_parent = a[z].parent;
            balance::transplant(a, root, z, x);
        } else if a[z].right.is_none() {
            x = a[z].left;
            x_parent = a[z].parent;
            balance::transplant(a, root, z, x);
        } else {
            let zr = a[z].right.expect("two-child case has a right subtree");
            let y = balance::min_node(a, zr);
            spliced_color = a[y].color;
            x = a[y].right;
            if a[y].parent == Some(z) {
                if let Some(x) = x {
                    a[x].parent = Some(y);
                }
                x_parent = Some(y);
            } else {
                // y's old parent is the position the fixup starts from.
                x_parent = a[y].parent;
                balance::transplant(a, root, y, x);
                let zr = a[z].right;
                a[y].right = zr;
                if let Some(r) = zr {
                    a[r].parent = Some(y);
                }
            }
            balance::transplant(a, root, z, Some(y));
            let zl = a[z].left;
            a[y].left = zl;
            if let Some(l) = zl {
                a[l].parent = Some(y);
            }
            a[y].color = a[z].color;
        }

        let node = self.arena.release(z);
        self.len -= 1;

        if spliced_color == Color::Black {
            balance::remove_fixup(&mut self.arena, &mut self.root, x, x_parent);
        }

        Some(node.value)
    }

    /// Drop every entry. Values are released in post-order, children
    /// before their parent. Safe on an already-empty map.
    pub fn clear(&mut self) {
        let root = self.root.take();
        self.clear_subtree(root);
        self.arena.reset();
        self.len = 0;
    }

    fn clear_subtree(&mut self, node: Option<u32>) {
        let Some(i) = node else { return };
        let l = self.arena[i].left;
        let r = self.arena[i].right;
        self.clear_subtree(l);
        self.clear_subtree(r);
        self.arena.release(i);
    }

    /// Move every entry of `src` into `self`, emptying `src`. Returns
    /// how many entries were new to `self`. Keys already present keep
    /// the value `self` had; the duplicate from `src` is dropped at the
    /// point of rejection, so each value is released exactly once.
    pub fn join(&mut self, src: &mut Self) -> usize {
        let before = self.len;
        let src_root = src.root.take();
        self.join_subtree(src, src_root);
        src.clear();
        self.len - before
    }

    // Walks src's structure only; the inserts below mutate self's
    // shape, never src's, so the captured child indices stay valid.
    fn join_subtree(&mut self, src: &mut Self, node: Option<u32>) {
        let Some(i) = node else { return };
        let l = src.arena[i].left;
        let r = src.arena[i].right;
        self.join_subtree(src, l);
        self.join_subtree(src, r);
        let node = src.arena.release(i);
        src.len -= 1;
        self.insert_if_absent(node.key, node.value);
    }

    /// Pre-size the arena for `additional` more entries, surfacing
    /// allocation failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), ReserveError> {
        self.arena
            .try_reserve(additional)
            .map_err(|source| ReserveError {
                requested: additional,
                source,
            })
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            map: self,
            curr: balance::first(&self.arena, self.root),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn for_each<F: FnMut(&K, &V)>(&self, mut f: F) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    /// Render as `{{k : v}, {k : v}}` in ascending key order; `{}` when
    /// empty. The buffer grows as needed, output is never truncated.
    pub fn to_string_with<FK, FV>(&self, mut key_fmt: FK, mut value_fmt: FV) -> String
    where
        FK: FnMut(&K) -> String,
        FV: FnMut(&V) -> String,
    {
        let mut out = String::from("{");
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push('{');
            out.push_str(&key_fmt(k));
            out.push_str(" : ");
            out.push_str(&value_fmt(v));
            out.push('}');
        }
        out.push('}');
        out
    }

    /// Validate every structural invariant. Test support.
    pub fn check(&self) -> Result<(), String> {
        balance::check_tree(&self.arena, self.root, &self.comparator, self.len)
    }
}

impl<K, V, C> Drop for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn drop(&mut self) {
        // Arena slots would be dropped in index order; go through clear
        // so values are released post-order like the explicit call.
        self.clear();
    }
}

pub struct Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    map: &'a TreeMap<K, V, C>,
    curr: Option<u32>,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = balance::next_node(&self.map.arena, i);
        let node = &self.map.arena[i];
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> fmt::Debug for TreeMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for TreeMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V, C> fmt::Display for TreeMap<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{{{k} : {v}}}")?;
        }
        f.write_str("}")
    }
}
