//! Morton-encoded quadrant algebra and complete-region refinement.
//!
//! - [`quadrant::Quadrant`]: the `(x, y, level)` cell type, its Z-order
//!   total order, and the bitwise family/ancestry predicates built on
//!   top of it.
//! - [`tree::Tree`]: an ordered sequence of quadrants plus the
//!   diagnostics (`is_sorted`, `is_complete`, `dump`) used to check
//!   the invariants a complete region must hold.
//! - [`region::complete_region`]: builds the minimal sorted sequence
//!   of quadrants tiling the half-open interval between two anchor
//!   quadrants.
//!
//! Storage is borrowed from [`quadmesh_pool`]: a [`tree::Tree`] is
//! backed by a [`quadmesh_pool::DynArray`], and [`region::complete_region`]'s
//! internal work list is a [`quadmesh_pool::PoolList`] over a
//! caller-supplied [`quadmesh_pool::Pool`].

#![no_std]

extern crate alloc;

pub mod quadrant;
pub mod region;
pub mod tree;

pub use quadrant::{compare, Quadrant, L_MAX};
pub use region::complete_region;
pub use tree::{RelationCode, Tree};
