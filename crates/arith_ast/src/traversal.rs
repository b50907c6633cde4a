//! Stack-safe traversal utilities.
//!
//! All functions here walk the DAG with an explicit stack, so arbitrarily
//! deep expressions cannot overflow the call stack.

use crate::expression::{Context, ExprId};
use rustc_hash::FxHashSet;

/// Count distinct node identities reachable from `root`.
///
/// An id the context never allocated counts as one identity with no operands.
pub fn count_unique_nodes(ctx: &Context, root: ExprId) -> usize {
    let mut seen = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        if let Ok(node) = ctx.try_get(id) {
            stack.extend(node.operands());
        }
    }

    seen.len()
}
