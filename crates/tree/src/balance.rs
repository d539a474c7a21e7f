//! Rotations, fixup passes, and traversal primitives.
//!
//! Every function takes the arena plus a `&mut Option<u32>` root so that
//! rotations at the top of the tree can rewire it. Delete-fixup carries
//! an explicit `x_parent` next to a possibly-absent `x`: an empty slot
//! has no parent pointer of its own, so the caller tracks the position
//! it was spliced out of.

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::node::{Color, Node};

pub(crate) type Tree<K, V> = Arena<Node<K, V>>;

fn is_black<K, V>(a: &Tree<K, V>, n: Option<u32>) -> bool {
    n.map(|i| a[i].color == Color::Black).unwrap_or(true)
}

pub(crate) fn rotate_left<K, V>(a: &mut Tree<K, V>, root: &mut Option<u32>, x: u32) {
    let y = a[x].right.expect("rotate_left requires a right child");
    let yl = a[y].left;
    a[x].right = yl;
    if let Some(yl) = yl {
        a[yl].parent = Some(x);
    }
    let xp = a[x].parent;
    a[y].parent = xp;
    match xp {
        None => *root = Some(y),
        Some(p) => {
            if a[p].left == Some(x) {
                a[p].left = Some(y);
            } else {
                a[p].right = Some(y);
            }
        }
    }
    a[y].left = Some(x);
    a[x].parent = Some(y);
}

pub(crate) fn rotate_right<K, V>(a: &mut Tree<K, V>, root: &mut Option<u32>, y: u32) {
    let x = a[y].left.expect("rotate_right requires a left child");
    let xr = a[x].right;
    a[y].left = xr;
    if let Some(xr) = xr {
        a[xr].parent = Some(y);
    }
    let yp = a[y].parent;
    a[x].parent = yp;
    match yp {
        None => *root = Some(x),
        Some(p) => {
            if a[p].left == Some(y) {
                a[p].left = Some(x);
            } else {
                a[p].right = Some(x);
            }
        }
    }
    a[x].right = Some(y);
    a[y].parent = Some(x);
}

/// Restore the red-black invariants after attaching the red node `z`.
pub(crate) fn insert_fixup<K, V>(a: &mut Tree<K, V>, root: &mut Option<u32>, mut z: u32) {
    loop {
        let Some(p) = a[z].parent else { break };
        if a[p].color == Color::Black {
            break;
        }
        let g = a[p].parent.expect("a red node is never the root");
        if a[g].left == Some(p) {
            match a[g].right {
                Some(u) if a[u].color == Color::Red => {
                    a[p].color = Color::Black;
                    a[u].color = Color::Black;
                    a[g].color = Color::Red;
                    z = g;
                }
                _ => {
                    if a[p].right == Some(z) {
                        z = p;
                        rotate_left(a, root, z);
                    }
                    let p = a[z].parent.expect("outer case keeps a parent");
                    let g = a[p].parent.expect("outer case keeps a grandparent");
                    a[p].color = Color::Black;
                    a[g].color = Color::Red;
                    rotate_right(a, root, g);
                }
            }
        } else {
            match a[g].left {
                Some(u) if a[u].color == Color::Red => {
                    a[p].color = Color::Black;
                    a[u].color = Color::Black;
                    a[g].color = Color::Red;
                    z = g;
                }
                _ => {
                    if a[p].left == Some(z) {
                        z = p;
                        rotate_right(a, root, z);
                    }
                    let p = a[z].parent.expect("outer case keeps a parent");
                    let g = a[p].parent.expect("outer case keeps a grandparent");
                    a[p].color = Color::Black;
                    a[g].color = Color::Red;
                    rotate_left(a, root, g);
                }
            }
        }
    }
    if let Some(r) = *root {
        a[r].color = Color::Black;
    }
}

/// Replace the subtree rooted at `u` with the one rooted at `v` in `u`'s
/// parent. `u`'s own links are left untouched.
pub(crate) fn transplant<K, V>(
    a: &mut Tree<K, V>,
    root: &mut Option<u32>,
    u: u32,
    v: Option<u32>,
) {
    let up = a[u].parent;
    match up {
        None => *root = v,
        Some(p) => {
            if a[p].left == Some(u) {
                a[p].left = v;
            } else {
                a[p].right = v;
            }
        }
    }
    if let Some(v) = v {
        a[v].parent = up;
    }
}

/// Resolve the double-black deficit left by splicing out a black node.
///
/// `x` is the position that replaced the removed node and may be an
/// empty slot; `x_parent` is where that position hangs. Whenever `x` is
/// double-black its sibling must exist, otherwise the black-heights were
/// already unequal before the removal.
pub(crate) fn remove_fixup<K, V>(
    a: &mut Tree<K, V>,
    root: &mut Option<u32>,
    mut x: Option<u32>,
    mut x_parent: Option<u32>,
) {
    while x != *root && is_black(a, x) {
        let Some(p) = x_parent else { break };
        if x == a[p].left {
            let mut w = a[p].right.expect("double-black node has a sibling");
            if a[w].color == Color::Red {
                a[w].color = Color::Black;
                a[p].color = Color::Red;
                rotate_left(a, root, p);
                w = a[p].right.expect("rotation preserves the sibling");
            }
            if is_black(a, a[w].left) && is_black(a, a[w].right) {
                a[w].color = Color::Red;
                x = Some(p);
                x_parent = a[p].parent;
            } else {
                if is_black(a, a[w].right) {
                    if let Some(wl) = a[w].left {
                        a[wl].color = Color::Black;
                    }
                    a[w].color = Color::Red;
                    rotate_right(a, root, w);
                    w = a[p].right.expect("rotation preserves the sibling");
                }
                a[w].color = a[p].color;
                a[p].color = Color::Black;
                if let Some(wr) = a[w].right {
                    a[wr].color = Color::Black;
                }
                rotate_left(a, root, p);
                x = *root;
            }
        } else {
            let mut w = a[p].left.expect("double-black node has a sibling");
            if a[w].color == Color::Red {
                a[w].color = Color::Black;
                a[p].color = Color::Red;
                rotate_right(a, root, p);
                w = a[p].left.expect("rotation preserves the sibling");
            }
            if is_black(a, a[w].right) && is_black(a, a[w].left) {
                a[w].color = Color::Red;
                x = Some(p);
                x_parent = a[p].parent;
            } else {
                if is_black(a, a[w].left) {
                    if let Some(wr) = a[w].right {
                        a[wr].color = Color::Black;
                    }
                    a[w].color = Color::Red;
                    rotate_left(a, root, w);
                    w = a[p].left.expect("rotation preserves the sibling");
                }
                a[w].color = a[p].color;
                a[p].color = Color::Black;
                if let Some(wl) = a[w].left {
                    a[wl].color = Color::Black;
                }
                rotate_right(a, root, p);
                x = *root;
            }
        }
    }
    if let Some(x) = x {
        a[x].color = Color::Black;
    }
}

pub(crate) fn min_node<K, V>(a: &Tree<K, V>, mut n: u32) -> u32 {
    while let Some(l) = a[n].left {
        n = l;
    }
    n
}

pub(crate) fn first<K, V>(a: &Tree<K, V>, root: Option<u32>) -> Option<u32> {
    root.map(|r| min_node(a, r))
}

/// In-order successor via the parent back-references.
pub(crate) fn next_node<K, V>(a: &Tree<K, V>, n: u32) -> Option<u32> {
    if let Some(r) = a[n].right {
        return Some(min_node(a, r));
    }
    let mut c = n;
    let mut p = a[c].parent;
    while let Some(pi) = p {
        if a[pi].left == Some(c) {
            return Some(pi);
        }
        c = pi;
        p = a[pi].parent;
    }
    None
}

/// Full structural validation: parent links, root color, no red-red
/// edge, uniform black-height, in-order keys strictly ascending under
/// `cmp`, and node count equal to `expected_len`.
pub(crate) fn check_tree<K, V, C>(
    a: &Tree<K, V>,
    root: Option<u32>,
    cmp: &C,
    expected_len: usize,
) -> Result<(), String>
where
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        if expected_len != 0 {
            return Err(format!("empty tree but size is {expected_len}"));
        }
        return Ok(());
    };

    if a[root].parent.is_some() {
        return Err("root has a parent".to_string());
    }
    if a[root].color != Color::Black {
        return Err("root is not black".to_string());
    }

    fn black_height<K, V>(a: &Tree<K, V>, node: Option<u32>) -> Result<usize, String> {
        let Some(n) = node else {
            return Ok(0);
        };
        let l = a[n].left;
        let r = a[n].right;
        if let Some(l) = l {
            if a[l].parent != Some(n) {
                return Err("broken parent link on left child".to_string());
            }
        }
        if let Some(r) = r {
            if a[r].parent != Some(n) {
                return Err("broken parent link on right child".to_string());
            }
        }
        if a[n].color == Color::Red {
            if l.map(|i| a[i].color == Color::Red).unwrap_or(false)
                || r.map(|i| a[i].color == Color::Red).unwrap_or(false)
            {
                return Err("red node has a red child".to_string());
            }
        }
        let lh = black_height(a, l)?;
        let rh = black_height(a, r)?;
        if lh != rh {
            return Err(format!("black-height mismatch: {lh} vs {rh}"));
        }
        Ok(lh + usize::from(a[n].color == Color::Black))
    }

    black_height(a, Some(root))?;

    let mut count = 0usize;
    let mut prev: Option<u32> = None;
    let mut curr = first(a, Some(root));
    while let Some(i) = curr {
        count += 1;
        if let Some(p) = prev {
            if cmp(&a[p].key, &a[i].key) != Ordering::Less {
                return Err("in-order keys are not strictly ascending".to_string());
            }
        }
        prev = Some(i);
        curr = next_node(a, i);
    }
    if count != expected_len {
        return Err(format!("size is {expected_len} but {count} nodes are reachable"));
    }

    Ok(())
}
