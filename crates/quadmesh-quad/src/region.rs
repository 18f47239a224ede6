use quadmesh_pool::{Link, Pool, PoolList};

use crate::quadrant::Quadrant;
use crate::tree::Tree;

/// Builds the minimal, sorted, gap-free sequence of quadrants tiling
/// the half-open-on-both-sides interval strictly between `q1` and
/// `q2`, optionally including the endpoints themselves, and appends
/// it to `tree`.
///
/// `tree` must be empty on entry — this function owns the whole
/// sequence it produces, it does not merge into an existing one.
///
/// `work_pool` backs an internal work list used for top-down
/// refinement from the two quadrants' nearest common ancestor; it is
/// drained back to empty before this function returns, regardless of
/// how many quadrants get emitted.
///
/// For every emitted quadrant strictly between `q1` and `q2`,
/// `alloc_data()` reserves a cell in `data_pool` and `init` is called
/// once with a mutable reference to it and the quadrant it belongs
/// to, mirroring how a mesh would attach per-element payload during
/// refinement. `q1` and `q2` themselves are pushed with whatever
/// `user_data` they already carry — they are caller-owned inputs, not
/// newly created cells.
pub fn complete_region<U>(
    q1: Quadrant,
    q2: Quadrant,
    include_q1: bool,
    include_q2: bool,
    tree: &mut Tree,
    work_pool: &mut Pool<Link<Quadrant>>,
    data_pool: &mut Pool<U>,
    mut alloc_data: impl FnMut() -> U,
    mut init: impl FnMut(&mut U, &Quadrant),
) {
    debug_assert!(q1.is_valid() && q2.is_valid(), "invalid endpoint quadrant");
    debug_assert!(q1 < q2, "complete_region requires q1 < q2");
    debug_assert!(tree.is_empty(), "complete_region requires an empty tree");

    if include_q1 {
        tree.push(q1);
    }

    let ancestor = q1.nearest_common_ancestor(&q2);
    let mut work = PoolList::new();
    for child in ancestor.children() {
        work.append(work_pool, child);
    }

    while !work.is_empty() {
        let candidate = work.pop_front(work_pool);

        if q1 < candidate && candidate < q2 && !candidate.is_ancestor_of(&q2) {
            let handle = data_pool.alloc(alloc_data());
            init(data_pool.get_mut(handle), &candidate);
            let mut emitted = candidate;
            emitted.user_data = Some(handle);
            tree.push(emitted);
        } else if candidate.is_ancestor_of(&q1) || candidate.is_ancestor_of(&q2) {
            for child in candidate.children().into_iter().rev() {
                work.prepend(work_pool, child);
            }
        }
        // Otherwise `candidate` lies entirely outside (q1, q2) and is
        // discarded without descending further.
    }

    if include_q2 {
        tree.push(q2);
    }

    debug_assert!(tree.is_sorted());
    debug_assert!(tree.is_complete());
}
