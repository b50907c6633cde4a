//! Conservative non-negativity checking for arithmetic expressions.
//!
//! Rewrite rules such as "`floordiv(a, b)` may become `a / b`" are only legal
//! when operands are known to be `>= 0`. [`NonNegativeChecker`] answers that
//! question soundly: a `true` is always correct, while many non-negative
//! expressions (`x - y` with `x >= y`, `max(-1, n)`) still answer `false`.
//!
//! ```
//! use arith_ast::{Context, Expr};
//! use arith_nonneg::is_non_negative;
//!
//! let mut ctx = Context::new();
//! let n = ctx.size_var("n");
//! let m = ctx.size_var("m");
//! let area = ctx.add(Expr::Mul(n, m));
//! assert!(is_non_negative(&ctx, area));
//!
//! let diff = ctx.add(Expr::Sub(area, n));
//! assert!(!is_non_negative(&ctx, diff));
//! ```

pub mod checker;
pub mod config;
pub mod rules;
pub mod verdicts;

pub use checker::{CheckReport, CheckStats, NonNegativeChecker};
pub use config::{CheckerConfig, ConfigError};
pub use verdicts::Verdicts;

use arith_ast::{Context, ExprId};

/// Check `root` with the default (unlimited) configuration.
pub fn is_non_negative(ctx: &Context, root: ExprId) -> bool {
    NonNegativeChecker::new().check(ctx, root)
}
