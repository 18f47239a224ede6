//! Pooled-memory substrate for `quadmesh`.
//!
//! Three storage primitives, leaves first:
//!
//! - [`array::DynArray`]: a resizable contiguous array with
//!   non-stable addressing across growth.
//! - [`pool::Pool`]: a fixed-element-size pool with a free list and
//!   STABLE addresses, backed by a chunked allocator that never
//!   relocates a previously handed-out chunk.
//! - [`list::PoolList`]: a singly-linked list whose links are cells
//!   of a caller-supplied [`pool::Pool`].
//!
//! None of these types synchronize internally; callers must not
//! invoke two operations on the same instance concurrently.

#![no_std]

extern crate alloc;

pub mod array;
pub mod list;
pub mod pool;

pub use array::DynArray;
pub use list::{Link, PoolList};
pub use pool::{Pool, PoolHandle};
