/// Node color. Absent children count as black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One tree node. `parent` is a non-owning back-reference used only by
/// the rotation and fixup machinery.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub parent: Option<u32>,
    pub color: Color,
}

impl<K, V> Node<K, V> {
    /// Fresh nodes are red and unlinked; insert-fixup restores the
    /// coloring invariants after attachment.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent: None,
            color: Color::Red,
        }
    }
}
