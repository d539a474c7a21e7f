use std::fmt;

/// Fixed-capacity FIFO over a circular buffer.
///
/// The buffer keeps one spare slot so head == tail always means empty;
/// indices advance modulo `capacity + 1`. Capacity never grows:
/// `enqueue` reports `false` when full.
#[derive(Debug)]
pub struct Queue<T> {
    data: Vec<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
    capacity: usize,
}

impl<T> Queue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: (0..capacity + 1).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn enqueue(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.data[self.tail] = Some(value);
        self.tail = (self.tail + 1) % (self.capacity + 1);
        self.count += 1;
        true
    }

    pub fn dequeue(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.data[self.head].take();
        self.head = (self.head + 1) % (self.capacity + 1);
        self.count -= 1;
        value
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.data[self.head].as_ref()
    }

    pub fn clear(&mut self) {
        for slot in &mut self.data {
            slot.take();
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Front-to-back iteration.
    pub fn iter(&self) -> QueueIter<'_, T> {
        QueueIter {
            queue: self,
            offset: 0,
        }
    }

    /// Render front-first as `[a, b, c]`; `[]` when empty.
    pub fn to_string_with<F>(&self, mut elem_fmt: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let mut out = String::from("[");
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&elem_fmt(v));
        }
        out.push(']');
        out
    }
}

pub struct QueueIter<'a, T> {
    queue: &'a Queue<T>,
    offset: usize,
}

impl<'a, T> Iterator for QueueIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.queue.count {
            return None;
        }
        let i = (self.queue.head + self.offset) % (self.queue.capacity + 1);
        self.offset += 1;
        self.queue.data[i].as_ref()
    }
}

impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.iter().enumerate() {
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
    use proptest::prelude::*;

    #[test]
    fn fifo_order() {
        let mut q = Queue::with_capacity(4);
        assert!(q.enqueue(1));
        assert!(q.enqueue(2));
        assert!(q.enqueue(3));
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn rejects_when_full() {
        let mut q = Queue::with_capacity(2);
        assert!(q.enqueue(1));
        assert!(q.enqueue(2));
        assert!(q.is_full());
        assert!(!q.enqueue(3));
        assert_eq!(q.len(), 2);
        assert_eq!(q.dequeue(), Some(1));
        assert!(q.enqueue(3));
    }

    #[test]
    fn wraps_around_the_buffer() {
        let mut q = Queue::with_capacity(3);
        for round in 0..10 {
            assert!(q.enqueue(round));
            assert_eq!(q.dequeue(), Some(round));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut q = Queue::with_capacity(2);
        q.enqueue("a");
        assert_eq!(q.peek(), Some(&"a"));
        assert_eq!(q.len(), 1);
        assert_eq!(q.dequeue(), Some("a"));
        assert_eq!(q.peek(), None);
    }

    #[test]
    fn clear_resets() {
        let mut q = Queue::with_capacity(3);
        q.enqueue(1);
        q.enqueue(2);
        q.clear();
        assert!(q.is_empty());
        assert!(q.enqueue(9));
        assert_eq!(q.dequeue(), Some(9));
    }

    #[test]
    fn display_format() {
        let mut q = Queue::with_capacity(3);
        assert_eq!(q.to_string(), "[]");
        q.enqueue(1);
        q.enqueue(2);
        assert_eq!(q.to_string(), "[1, 2]");
        assert_eq!(q.to_string_with(|v| format!("{v:02}")), "[01, 02]");
    }

    proptest! {
        #[test]
        fn behaves_like_a_bounded_vecdeque(
            capacity in 1usize..16,
            ops in prop::collection::vec(prop::option::of(any::<u8>()), 0..200),
        ) {
            let mut q = Queue::with_capacity(capacity);
            let mut model = std::collections::VecDeque::new();
            for op in ops {
                match op {
                    // Some -> enqueue, None -> dequeue.
                    Some(v) => {
                        let accepted = q.enqueue(v);
                        prop_assert_eq!(accepted, model.len() < capacity);
                        if accepted {
                            model.push_back(v);
                        }
                    }
                    None => {
                        prop_assert_eq!(q.dequeue(), model.pop_front());
                    }
                }
                prop_assert_eq!(q.len(), model.len());
                prop_assert_eq!(q.peek(), model.front());
            }
        }
    }
}
