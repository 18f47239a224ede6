use core::cmp::Ordering;

use quadmesh_pool::PoolHandle;

/// Compile-time maximum refinement depth.
///
/// Coordinates fit in a [`u32`] and linear ids in an [`i64`] at this
/// depth (§9 "Bit-width choice" — 30 bits of coordinate, 60 bits of
/// interleaved id).
pub const L_MAX: u8 = 30;

/// An axis-aligned square cell in the 2D refinement tree, identified
/// by `(x, y, level)`.
///
/// `x` and `y` are encoded coordinates in `[0, 2^L_MAX)`, aligned to
/// the cell size at `level`: the low `L_MAX - level` bits of both are
/// zero. `level` 0 is the root, covering the whole domain; higher
/// levels are smaller cells.
///
/// Equality, ordering, and hashing only ever consider `(x, y,
/// level)` — `user_data` is a handle into an external pool and
/// carries no positional information.
#[derive(Debug, Clone, Copy)]
pub struct Quadrant {
    pub x: u32,
    pub y: u32,
    pub level: u8,
    /// Handle into the mesh's per-element data pool, absent when the
    /// mesh's payload is zero-sized or the quadrant hasn't been
    /// initialized yet.
    pub user_data: Option<PoolHandle>,
}

impl Quadrant {
    pub const L_MAX: u8 = L_MAX;

    /// Builds a quadrant with no associated user data.
    pub fn new(x: u32, y: u32, level: u8) -> Self {
        Self {
            x,
            y,
            level,
            user_data: None,
        }
    }

    /// All fields in range, coordinates aligned for `level`.
    pub fn is_valid(&self) -> bool {
        if self.level > Self::L_MAX {
            return false;
        }
        let shift = Self::L_MAX - self.level;
        let low_mask = (1u32 << shift) - 1;
        let domain = 1u32 << Self::L_MAX;
        self.x & low_mask == 0
            && self.y & low_mask == 0
            && self.x < domain
            && self.y < domain
    }

    /// 2-bit child index: bit 0 from `x`, bit 1 from `y`, sampled at
    /// the `L_MAX - level` bit position. Defined only for `level >=
    /// 1`.
    pub fn child_id(&self) -> u8 {
        debug_assert!(self.level >= 1, "child_id() of the root quadrant");
        let shift = Self::L_MAX - self.level;
        let x_bit = (self.x >> shift) & 1;
        let y_bit = (self.y >> shift) & 1;
        ((y_bit << 1) | x_bit) as u8
    }

    /// Same level, not equal, differing only in the child-id bit at
    /// their shared level.
    pub fn is_sibling(&self, other: &Self) -> bool {
        if self.level != other.level || self.level == 0 {
            return false;
        }
        if *self == *other {
            return false;
        }
        let shift = Self::L_MAX - self.level;
        let mask = !(1u32 << shift);
        self.x & mask == other.x & mask && self.y & mask == other.y & mask
    }

    /// `self` is the parent of `child`: one level up, and `child`'s
    /// coordinates with its child-id bit cleared equal `self`'s.
    pub fn is_parent_of(&self, child: &Self) -> bool {
        if child.level == 0 || child.level != self.level + 1 {
            return false;
        }
        let shift = Self::L_MAX - child.level;
        let mask = !(1u32 << shift);
        child.x & mask == self.x && child.y & mask == self.y
    }

    /// `self.level < descendant.level` and the high `self.level` bits
    /// of both coincide.
    pub fn is_ancestor_of(&self, descendant: &Self) -> bool {
        if self.level >= descendant.level {
            return false;
        }
        let shift = Self::L_MAX - self.level;
        self.x >> shift == descendant.x >> shift && self.y >> shift == descendant.y >> shift
    }

    /// `self` immediately precedes `other` in Z-order with no gap:
    /// letting `l = min(self.level, other.level)`, `self` and `other`
    /// must have consecutive linear ids at level `l`. When `self` is
    /// deeper than `other`, `self` must additionally sit on the
    /// bottom-right (child-id 3) descendant chain of its ancestor at
    /// level `l`.
    pub fn is_next(&self, other: &Self) -> bool {
        if self.cmp(other) != Ordering::Less {
            return false;
        }

        let l = self.level.min(other.level);

        if self.level > other.level {
            let mut cursor = *self;
            while cursor.level > l {
                if cursor.child_id() != 3 {
                    return false;
                }
                cursor = cursor.parent();
            }
        }

        self.linear_id(l) + 1 == other.linear_id(l)
    }

    /// The quadrant one level up. Undefined for the root (`level ==
    /// 0`).
    pub fn parent(&self) -> Self {
        debug_assert!(self.level >= 1, "parent() of the root quadrant");
        let shift = Self::L_MAX - self.level;
        let mask = !(1u32 << shift);
        Self {
            x: self.x & mask,
            y: self.y & mask,
            level: self.level - 1,
            user_data: None,
        }
    }

    /// The four children at `level + 1`, ordered by child id:
    /// `c0` shares `self`'s origin, `c1` sets the x bit, `c2` sets
    /// the y bit, `c3` sets both. Undefined at `level == L_MAX`.
    pub fn children(&self) -> [Self; 4] {
        debug_assert!(
            self.level < Self::L_MAX,
            "children() of a maximum-level quadrant"
        );
        let bit = 1u32 << (Self::L_MAX - (self.level + 1));
        core::array::from_fn(|i| {
            let i = i as u32;
            Self {
                x: self.x | ((i & 1) * bit),
                y: self.y | (((i >> 1) & 1) * bit),
                level: self.level + 1,
                user_data: None,
            }
        })
    }

    /// The smallest (highest-level) quadrant containing both `self`
    /// and `other`.
    pub fn nearest_common_ancestor(&self, other: &Self) -> Self {
        let ex = self.x ^ other.x;
        let ey = self.y ^ other.y;
        let m = (msb(ex | ey) + 1) as u32;
        let mask = if m == 0 { u32::MAX } else { !((1u32 << m) - 1) };
        let level = (Self::L_MAX as u32 - m)
            .min(self.level as u32)
            .min(other.level as u32);
        Self {
            x: self.x & mask,
            y: self.y & mask,
            level: level as u8,
            user_data: None,
        }
    }

    /// The Morton-interleaved id of the top `level` bits of `x` and
    /// `y` (`y` interleaved above `x`). Requires `self.level >= level`.
    pub fn linear_id(&self, level: u8) -> i64 {
        debug_assert!(
            level <= self.level,
            "linear_id() requested at a level finer than the quadrant itself"
        );
        let shift = Self::L_MAX - level;
        let x = (self.x >> shift) as u64;
        let y = (self.y >> shift) as u64;
        morton_interleave(x, y) as i64
    }

    /// Inverse of [`Self::linear_id`]: reconstructs the quadrant at
    /// `level` from its Morton id. Requires `id < 4^level`.
    pub fn set_morton(level: u8, id: i64) -> Self {
        debug_assert!(id >= 0, "set_morton() with a negative id");
        let id = id as u64;
        debug_assert!(
            id < 1u64 << (2 * level as u32),
            "set_morton() id out of range for level"
        );
        let shift = Self::L_MAX - level;
        let x = morton_deinterleave(id) as u32;
        let y = morton_deinterleave(id >> 1) as u32;
        Self {
            x: x << shift,
            y: y << shift,
            level,
            user_data: None,
        }
    }
}

impl PartialEq for Quadrant {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.level == other.level
    }
}

impl Eq for Quadrant {}

impl PartialOrd for Quadrant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quadrant {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

/// The Z-order (Morton) total order on valid quadrants. Equivalent to
/// [`Quadrant::cmp`], kept as a free function for parity with the
/// rest of this crate's vocabulary.
pub fn compare(a: &Quadrant, b: &Quadrant) -> Ordering {
    let ex = a.x ^ b.x;
    let ey = a.y ^ b.y;

    if ex == 0 && ey == 0 {
        return a.level.cmp(&b.level);
    }

    if msb(ey) >= msb(ex) {
        a.y.cmp(&b.y)
    } else {
        a.x.cmp(&b.x)
    }
}

/// Position of the highest set bit, or `-1` for zero.
fn msb(v: u32) -> i32 {
    if v == 0 {
        -1
    } else {
        31 - v.leading_zeros() as i32
    }
}

/// Spreads the low 30 bits of `v` into the even bit positions of a
/// 64-bit word. Ported from the classic 16-bit "magic numbers"
/// technique, scaled up to cover `L_MAX = 30` bits of coordinate.
fn spread_bits(v: u64) -> u64 {
    let mut v = v & 0x3FFF_FFFF;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Inverse of [`spread_bits`]: compacts every other bit back down.
fn compact_bits(v: u64) -> u64 {
    let mut v = v & 0x5555_5555_5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
    v
}

fn morton_interleave(x: u64, y: u64) -> u64 {
    spread_bits(x) | (spread_bits(y) << 1)
}

fn morton_deinterleave(code: u64) -> u64 {
    compact_bits(code)
}
