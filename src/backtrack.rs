use crate::formula::{Formula, Model};
use log::trace;

/// Exhaustive depth-first search over the variables in index order, trying
/// true before false, pruning any branch whose partial assignment already
/// falsifies a clause. Returns a satisfying assignment, or `None` after
/// exhausting the space; in the latter case every variable this call assigned
/// is back to unassigned.
pub fn backtrack(f: &mut Formula) -> Option<Model> {
    let var = match f.first_unassigned() {
        Some(v) => v,
        // Every variable is assigned; only reachable when no clause pruned
        // the branch earlier (e.g. a formula with zero clauses).
        None => return if f.sat() { f.model() } else { None },
    };

    for &value in &[true, false] {
        f.assign(var, value);
        trace!("try {} = {}", var, value);
        if !f.unsat() {
            if let Some(model) = backtrack(f) {
                // The chosen value is part of the solution; leave it in place.
                return Some(model);
            }
        }
    }

    trace!("exhausted {}, backtracking", var);
    f.unassign(var);
    None
}
