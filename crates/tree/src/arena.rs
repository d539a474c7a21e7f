use std::ops::{Index, IndexMut};

enum Slot<T> {
    Occupied(T),
    Vacant { next: Option<u32> },
}

/// Slot storage for tree nodes. Vacated slots are threaded on a free
/// list and reused by later allocations, so indices handed out stay
/// stable for as long as their slot is occupied.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Option<u32>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
        }
    }

    pub fn alloc(&mut self, item: T) -> u32 {
        match self.free {
            Some(i) => {
                let slot = std::mem::replace(&mut self.slots[i as usize], Slot::Occupied(item));
                let Slot::Vacant { next } = slot else {
                    unreachable!("free list head points at an occupied slot");
                };
                self.free = next;
                i
            }
            None => {
                self.slots.push(Slot::Occupied(item));
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Vacate slot `i`, returning its contents. The index must not be
    /// used again until the slot is reallocated.
    pub fn release(&mut self, i: u32) -> T {
        let slot = std::mem::replace(
            &mut self.slots[i as usize],
            Slot::Vacant { next: self.free },
        );
        let Slot::Occupied(item) = slot else {
            unreachable!("released slot is already vacant");
        };
        self.free = Some(i);
        item
    }

    /// Drop all slots and forget the free list.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free = None;
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), std::collections::TryReserveError> {
        self.slots.try_reserve(additional)
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;

    fn index(&self, i: u32) -> &T {
        match &self.slots[i as usize] {
            Slot::Occupied(item) => item,
            Slot::Vacant { .. } => unreachable!("dangling node index"),
        }
    }
}

impl<T> IndexMut<u32> for Arena<T> {
    fn index_mut(&mut self, i: u32) -> &mut T {
        match &mut self.slots[i as usize] {
            Slot::Occupied(item) => item,
            Slot::Vacant { .. } => unreachable!("dangling node index"),
        }
    }
}
