//! Per-kind non-negativity rules.
//!
//! | Kind                                | Descends | Verdict              |
//! |-------------------------------------|----------|----------------------|
//! | `Variable`                          | no       | `false`              |
//! | `SizeVariable`                      | no       | `true`               |
//! | `Int(v)`, `Float(v)`                | no       | `v >= 0`             |
//! | `Add`, `Mul`, `Div`, `FloorDiv`     | yes      | `a && b`             |
//! | `Min`, `Max`                        | yes      | `a && b`             |
//! | `Mod`, `FloorMod`                   | yes      | `b` (divisor only)   |
//! | `Sub`                               | no       | `false`              |
//! | `And`, `Or`                         | no       | `true`               |
//! | anything else                       | no       | none (reads `false`) |
//!
//! `Max` only needs one non-negative operand, and `Mul` of two negatives is
//! non-negative; both are left unproven. `Mod`/`FloorMod` ignore the dividend.

use arith_ast::{Expr, ExprId};
use num_traits::Signed;

/// How a parent's verdict is derived from its operands' verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// Both operands must be proven non-negative.
    Both,
    /// Only the right operand (the divisor) is consulted.
    DivisorOnly,
}

impl Combine {
    #[inline]
    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Combine::Both => lhs && rhs,
            Combine::DivisorOnly => rhs,
        }
    }
}

/// What the checker does with one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Verdict is known without looking at operands; operands are not visited.
    Fixed(bool),
    /// Evaluate both operands first, then combine their verdicts.
    Descend {
        lhs: ExprId,
        rhs: ExprId,
        combine: Combine,
    },
    /// No rule for this kind: no verdict is recorded.
    NoRule,
}

pub fn rule_for(expr: &Expr) -> Rule {
    let descend = |lhs: &ExprId, rhs: &ExprId, combine| Rule::Descend {
        lhs: *lhs,
        rhs: *rhs,
        combine,
    };

    match expr {
        Expr::Variable(_) => Rule::Fixed(false),
        Expr::SizeVariable(_) => Rule::Fixed(true),
        Expr::Int(v) => Rule::Fixed(!v.is_negative()),
        // NaN compares false, so it is never proven.
        Expr::Float(v) => Rule::Fixed(*v >= 0.0),

        Expr::Add(a, b)
        | Expr::Mul(a, b)
        | Expr::Div(a, b)
        | Expr::FloorDiv(a, b)
        | Expr::Min(a, b)
        | Expr::Max(a, b) => descend(a, b, Combine::Both),
        Expr::Mod(a, b) | Expr::FloorMod(a, b) => descend(a, b, Combine::DivisorOnly),

        Expr::Sub(..) => Rule::Fixed(false),
        Expr::And(..) | Expr::Or(..) => Rule::Fixed(true),

        Expr::Neg(_)
        | Expr::Not(_)
        | Expr::Cmp(..)
        | Expr::Select { .. }
        | Expr::Cast(_)
        | Expr::Call(..) => Rule::NoRule,
    }
}
