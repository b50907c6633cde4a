use arith_ast::{Context, Expr, ExprId};
use proptest::prelude::*;

pub const VAR_NAMES: [&str; 3] = ["a", "b", "c"];
pub const SIZE_NAMES: [&str; 3] = ["n", "m", "k"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    FloorDiv,
    FloorMod,
    Min,
    Max,
    And,
    Or,
}

impl BinKind {
    pub const ALL: [BinKind; 11] = [
        BinKind::Add,
        BinKind::Sub,
        BinKind::Mul,
        BinKind::Div,
        BinKind::Mod,
        BinKind::FloorDiv,
        BinKind::FloorMod,
        BinKind::Min,
        BinKind::Max,
        BinKind::And,
        BinKind::Or,
    ];

    fn build(self, a: ExprId, b: ExprId) -> Expr {
        match self {
            BinKind::Add => Expr::Add(a, b),
            BinKind::Sub => Expr::Sub(a, b),
            BinKind::Mul => Expr::Mul(a, b),
            BinKind::Div => Expr::Div(a, b),
            BinKind::Mod => Expr::Mod(a, b),
            BinKind::FloorDiv => Expr::FloorDiv(a, b),
            BinKind::FloorMod => Expr::FloorMod(a, b),
            BinKind::Min => Expr::Min(a, b),
            BinKind::Max => Expr::Max(a, b),
            BinKind::And => Expr::And(a, b),
            BinKind::Or => Expr::Or(a, b),
        }
    }
}

/// Owned expression recipe, lowered into a [`Context`] by [`lower`].
#[derive(Debug, Clone)]
pub enum RecExpr {
    Var(usize),
    Size(usize),
    Int(i64),
    Float(f64),
    Neg(Box<RecExpr>),
    Bin(BinKind, Box<RecExpr>, Box<RecExpr>),
}

fn arb_tree(kinds: Vec<BinKind>, with_floats: bool) -> impl Strategy<Value = RecExpr> {
    let float = if with_floats {
        (-10.0f64..10.0).prop_map(RecExpr::Float).boxed()
    } else {
        (-10i64..10).prop_map(RecExpr::Int).boxed()
    };
    let leaf = prop_oneof![
        (0..VAR_NAMES.len()).prop_map(RecExpr::Var),
        (0..SIZE_NAMES.len()).prop_map(RecExpr::Size),
        (-10i64..10).prop_map(RecExpr::Int),
        float,
    ];

    leaf.prop_recursive(
        4,  // levels deep
        64, // max size
        2,  // items per collection
        move |inner| {
            prop_oneof![
                1 => inner.clone().prop_map(|e| RecExpr::Neg(Box::new(e))),
                6 => (prop::sample::select(kinds.clone()), inner.clone(), inner)
                    .prop_map(|(k, l, r)| RecExpr::Bin(k, Box::new(l), Box::new(r))),
            ]
        },
    )
}

/// Any expression over every kind the generator knows.
pub fn arb_expr() -> impl Strategy<Value = RecExpr> {
    arb_tree(BinKind::ALL.to_vec(), true)
}

/// Integer-only expressions without truncating `Mod`, whose divisor-only
/// rule does not hold for a negative dividend.
pub fn arb_int_expr() -> impl Strategy<Value = RecExpr> {
    let kinds = BinKind::ALL
        .into_iter()
        .filter(|k| *k != BinKind::Mod)
        .collect();
    arb_tree(kinds, false)
}

pub fn lower(ctx: &mut Context, re: &RecExpr) -> ExprId {
    match re {
        RecExpr::Var(i) => ctx.var(VAR_NAMES[*i]),
        RecExpr::Size(i) => ctx.size_var(SIZE_NAMES[*i]),
        RecExpr::Int(v) => ctx.int(*v),
        RecExpr::Float(v) => ctx.float(*v),
        RecExpr::Neg(e) => {
            let inner = lower(ctx, e);
            ctx.add(Expr::Neg(inner))
        }
        RecExpr::Bin(kind, l, r) => {
            let l = lower(ctx, l);
            let r = lower(ctx, r);
            ctx.add(kind.build(l, r))
        }
    }
}

pub fn to_context(re: &RecExpr) -> (Context, ExprId) {
    let mut ctx = Context::new();
    let root = lower(&mut ctx, re);
    (ctx, root)
}

fn floor_div(a: i128, b: i128) -> Option<i128> {
    let q = a.checked_div(b)?;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Concrete integer value of `re`. `None` for division by zero, overflow,
/// or float literals.
pub fn eval(re: &RecExpr, vars: &[i128; 3], sizes: &[i128; 3]) -> Option<i128> {
    match re {
        RecExpr::Var(i) => Some(vars[*i]),
        RecExpr::Size(i) => Some(sizes[*i]),
        RecExpr::Int(v) => Some(i128::from(*v)),
        RecExpr::Float(_) => None,
        RecExpr::Neg(e) => eval(e, vars, sizes)?.checked_neg(),
        RecExpr::Bin(kind, l, r) => {
            let a = eval(l, vars, sizes)?;
            let b = eval(r, vars, sizes)?;
            match kind {
                BinKind::Add => a.checked_add(b),
                BinKind::Sub => a.checked_sub(b),
                BinKind::Mul => a.checked_mul(b),
                BinKind::Div => a.checked_div(b),
                BinKind::Mod => a.checked_rem(b),
                BinKind::FloorDiv => floor_div(a, b),
                BinKind::FloorMod => {
                    let q = floor_div(a, b)?;
                    a.checked_sub(q.checked_mul(b)?)
                }
                BinKind::Min => Some(a.min(b)),
                BinKind::Max => Some(a.max(b)),
                BinKind::And => Some(i128::from(a != 0 && b != 0)),
                BinKind::Or => Some(i128::from(a != 0 || b != 0)),
            }
        }
    }
}
