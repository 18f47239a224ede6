use core::cmp::Ordering;
use core::fmt::{self, Write as _};

use quadmesh_pool::DynArray;

use crate::quadrant::{compare, Quadrant, L_MAX};

/// An ordered sequence of quadrants, together with the per-level
/// counts and the running maximum level needed to answer questions
/// about the sequence without rescanning it.
#[derive(Debug)]
pub struct Tree {
    quadrants: DynArray<Quadrant>,
    quadrants_per_level: [u32; L_MAX as usize + 1],
    maxlevel: u8,
}

impl Default for Tree {
    fn default() -> Self {
        Self {
            quadrants: DynArray::new(),
            quadrants_per_level: [0; L_MAX as usize + 1],
            maxlevel: 0,
        }
    }
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quadrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    pub fn maxlevel(&self) -> u8 {
        self.maxlevel
    }

    pub fn quadrants_per_level(&self, level: u8) -> u32 {
        self.quadrants_per_level[level as usize]
    }

    pub fn as_slice(&self) -> &[Quadrant] {
        self.quadrants.as_slice()
    }

    /// Appends `quadrant`, updating the per-level counter and
    /// `maxlevel`. Does not check ordering against the current last
    /// element — that is [`Self::is_sorted`]'s job.
    pub fn push(&mut self, quadrant: Quadrant) {
        debug_assert!(quadrant.is_valid(), "pushed an invalid quadrant");
        self.quadrants_per_level[quadrant.level as usize] += 1;
        if quadrant.level > self.maxlevel {
            self.maxlevel = quadrant.level;
        }
        self.quadrants.push(quadrant);
    }

    /// Whether every quadrant strictly precedes the next in Z-order.
    pub fn is_sorted(&self) -> bool {
        self.quadrants
            .as_slice()
            .windows(2)
            .all(|pair| compare(&pair[0], &pair[1]) == Ordering::Less)
    }

    /// Whether the sequence is sorted and, additionally, every
    /// quadrant is the immediate Z-order successor of the one before
    /// it (no gaps).
    pub fn is_complete(&self) -> bool {
        self.quadrants
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].is_next(&pair[1]))
    }

    /// Writes `tree_id x y level` for every quadrant, followed (from
    /// the second line on) by a one-character relation code against
    /// the previous quadrant:
    ///
    /// - `R` out of order
    /// - `I` identical
    /// - `S<k>` sibling, `k` is the current quadrant's child id
    /// - `C<k>` predecessor is the parent, `k` is the current
    ///   quadrant's child id
    /// - `D` predecessor is a non-parent ancestor
    /// - `N<k>` predecessor's `is_next` successor, `k` is the current
    ///   quadrant's child id
    /// - `Q<k>` none of the above, `k` is the current quadrant's child
    ///   id
    pub fn dump<W: fmt::Write>(&self, tree_id: i64, out: &mut W) -> fmt::Result {
        let mut previous: Option<&Quadrant> = None;
        for quadrant in self.quadrants.iter() {
            write!(out, "{tree_id} {} {} {}", quadrant.x, quadrant.y, quadrant.level)?;
            if let Some(previous) = previous {
                write!(out, " {}", RelationCode::between(previous, quadrant))?;
            }
            writeln!(out)?;
            previous = Some(quadrant);
        }
        Ok(())
    }
}

/// The one-character (plus optional child-id) relation code
/// [`Tree::dump`] prints between consecutive quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationCode {
    OutOfOrder,
    Identical,
    Sibling(u8),
    ParentOfPrevious(u8),
    NonParentAncestor,
    NextOf(u8),
    Other(u8),
}

impl RelationCode {
    pub fn between(previous: &Quadrant, current: &Quadrant) -> Self {
        match compare(previous, current) {
            Ordering::Equal => RelationCode::Identical,
            Ordering::Greater => RelationCode::OutOfOrder,
            Ordering::Less => {
                let child_id = if current.level >= 1 {
                    current.child_id()
                } else {
                    0
                };
                if previous.is_sibling(current) {
                    RelationCode::Sibling(child_id)
                } else if previous.is_parent_of(current) {
                    RelationCode::ParentOfPrevious(child_id)
                } else if previous.is_ancestor_of(current) {
                    RelationCode::NonParentAncestor
                } else if previous.is_next(current) {
                    RelationCode::NextOf(child_id)
                } else {
                    RelationCode::Other(child_id)
                }
            }
        }
    }
}

impl fmt::Display for RelationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationCode::OutOfOrder => f.write_char('R'),
            RelationCode::Identical => f.write_char('I'),
            RelationCode::Sibling(k) => write!(f, "S{k}"),
            RelationCode::ParentOfPrevious(k) => write!(f, "C{k}"),
            RelationCode::NonParentAncestor => f.write_char('D'),
            RelationCode::NextOf(k) => write!(f, "N{k}"),
            RelationCode::Other(k) => write!(f, "Q{k}"),
        }
    }
}
