use crate::error::AstError;
use num_bigint::BigInt;
use smallvec::SmallVec;
use std::fmt;

/// Identity of a node inside a [`Context`].
///
/// Two ids are equal only if they name the same arena slot. Value-identical
/// nodes built separately have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Comparison operators. Their result is a 0/1 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq, // ==
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpOp::Eq => write!(f, "=="),
            CmpOp::Ne => write!(f, "!="),
            CmpOp::Lt => write!(f, "<"),
            CmpOp::Le => write!(f, "<="),
            CmpOp::Gt => write!(f, ">"),
            CmpOp::Ge => write!(f, ">="),
        }
    }
}

/// Operand list of a node. No node kind has more than three fixed operands;
/// only `Call` spills to the heap with long argument lists.
pub type Operands = SmallVec<[ExprId; 3]>;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Unconstrained symbolic value.
    Variable(String),
    /// Variable the builder vouches is >= 0 (an extent, a shape dimension).
    SizeVariable(String),
    Int(BigInt),
    Float(f64),

    Add(ExprId, ExprId),
    Sub(ExprId, ExprId),
    Mul(ExprId, ExprId),
    /// Truncating division.
    Div(ExprId, ExprId),
    /// Truncating remainder.
    Mod(ExprId, ExprId),
    FloorDiv(ExprId, ExprId),
    FloorMod(ExprId, ExprId),
    Min(ExprId, ExprId),
    Max(ExprId, ExprId),

    /// Logical and, 0/1 valued.
    And(ExprId, ExprId),
    /// Logical or, 0/1 valued.
    Or(ExprId, ExprId),

    Neg(ExprId),
    Not(ExprId),
    Cmp(CmpOp, ExprId, ExprId),
    Select {
        cond: ExprId,
        then_value: ExprId,
        else_value: ExprId,
    },
    Cast(ExprId),
    Call(String, Vec<ExprId>),
}

impl Expr {
    /// Operands in source order.
    pub fn operands(&self) -> Operands {
        let mut out = Operands::new();
        match self {
            Expr::Variable(_) | Expr::SizeVariable(_) | Expr::Int(_) | Expr::Float(_) => {}
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Mod(a, b)
            | Expr::FloorDiv(a, b)
            | Expr::FloorMod(a, b)
            | Expr::Min(a, b)
            | Expr::Max(a, b)
            | Expr::And(a, b)
            | Expr::Or(a, b)
            | Expr::Cmp(_, a, b) => {
                out.push(*a);
                out.push(*b);
            }
            Expr::Neg(e) | Expr::Not(e) | Expr::Cast(e) => out.push(*e),
            Expr::Select {
                cond,
                then_value,
                else_value,
            } => {
                out.push(*cond);
                out.push(*then_value);
                out.push(*else_value);
            }
            Expr::Call(_, args) => out.extend(args.iter().copied()),
        }
        out
    }

    /// Short name of the node kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Variable(_) => "var",
            Expr::SizeVariable(_) => "size_var",
            Expr::Int(_) => "int",
            Expr::Float(_) => "float",
            Expr::Add(..) => "add",
            Expr::Sub(..) => "sub",
            Expr::Mul(..) => "mul",
            Expr::Div(..) => "div",
            Expr::Mod(..) => "mod",
            Expr::FloorDiv(..) => "floordiv",
            Expr::FloorMod(..) => "floormod",
            Expr::Min(..) => "min",
            Expr::Max(..) => "max",
            Expr::And(..) => "and",
            Expr::Or(..) => "or",
            Expr::Neg(_) => "neg",
            Expr::Not(_) => "not",
            Expr::Cmp(..) => "cmp",
            Expr::Select { .. } => "select",
            Expr::Cast(_) => "cast",
            Expr::Call(..) => "call",
        }
    }
}

/// Allocation counters for a [`Context`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    pub nodes_created: usize,
}

/// Owner of every node of one expression forest.
///
/// Nodes are append-only: once allocated, an `ExprId` keeps naming the same
/// node for the lifetime of the context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    nodes: Vec<Expr>,
    stats: ContextStats,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its fresh identity.
    ///
    /// Never deduplicates. Operands are trusted; use [`Context::add_checked`]
    /// when they come from outside this context's own builders.
    pub fn add(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.nodes.len());
        self.nodes.push(expr);
        self.stats.nodes_created += 1;
        id
    }

    /// Like [`Context::add`], but rejects operands this context never
    /// allocated. A context built only through `add_checked` has no dangling
    /// references.
    pub fn add_checked(&mut self, expr: Expr) -> Result<ExprId, AstError> {
        let len = self.nodes.len();
        if let Some(&operand) = expr.operands().iter().find(|id| id.index() >= len) {
            return Err(AstError::DanglingOperand { operand, len });
        }
        Ok(self.add(expr))
    }

    /// # Panics
    /// Panics if `id` was not allocated by this context.
    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.nodes[id.0]
    }

    pub fn try_get(&self, id: ExprId) -> Result<&Expr, AstError> {
        self.nodes.get(id.0).ok_or(AstError::UnknownExpr(id))
    }

    pub fn var(&mut self, name: &str) -> ExprId {
        self.add(Expr::Variable(name.to_owned()))
    }

    pub fn size_var(&mut self, name: &str) -> ExprId {
        self.add(Expr::SizeVariable(name.to_owned()))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.add(Expr::Int(BigInt::from(value)))
    }

    pub fn int_big(&mut self, value: BigInt) -> ExprId {
        self.add(Expr::Int(value))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.add(Expr::Float(value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> ContextStats {
        self.stats
    }
}
