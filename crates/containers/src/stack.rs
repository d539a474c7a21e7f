use std::fmt;

/// LIFO stack; the top is the last element pushed.
#[derive(Clone, Debug, Default)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build from a slice; the last slice element ends up on top.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self {
            items: values.to_vec(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
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

    /// Reverse in place: the bottom element becomes the top.
    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Top-to-bottom iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }

    /// Render top-first as `[top: a, b, c :bottom]`; `[top: :bottom]`
    /// when empty.
    pub fn to_string_with<F>(&self, mut elem_fmt: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let mut out = String::from("[top: ");
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&elem_fmt(v));
        }
        out.push_str(" :bottom]");
        out
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[top: ")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(" :bottom]")
    }
}
