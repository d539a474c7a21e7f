//! Sequence containers used alongside the tree crate: a growable
//! [`List`], a LIFO [`Stack`], and a fixed-capacity circular-buffer
//! [`Queue`]. All three are plain synchronous value containers; the
//! queue never grows past the capacity it was built with.

mod list;
mod queue;
mod stack;

pub use list::List;
pub use queue::Queue;
pub use stack::Stack;
