//! Arena-allocated arithmetic expression DAGs.
//!
//! Nodes live in a [`Context`] and are referred to by [`ExprId`]. An id is the
//! identity of a node: building the same value twice yields two ids, and
//! parents may share children freely, so a tree is in general a DAG.

pub mod error;
pub mod expression;
pub mod traversal;

pub use error::AstError;
pub use expression::{CmpOp, Context, ContextStats, Expr, ExprId, Operands};
