//! Error types for arith_ast crate.

use crate::expression::ExprId;
use thiserror::Error;

/// Errors that can occur in AST operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// An operand refers to a node that does not exist in this context
    #[error("dangling operand {operand}: context holds {len} nodes")]
    DanglingOperand { operand: ExprId, len: usize },

    /// Lookup of an id that was never allocated by this context
    #[error("unknown expression {0}")]
    UnknownExpr(ExprId),
}
