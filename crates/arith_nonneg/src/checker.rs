//! Memoized bottom-up evaluation of the rule table.
//!
//! The walk is an explicit-stack post-order: entering a node either records
//! its verdict right away or schedules its operands followed by an exit
//! frame that combines their verdicts. A node already in the memo is skipped
//! on entry, so every identity is evaluated at most once even when the DAG
//! shares it between many parents. The memo lives on the stack of
//! [`NonNegativeChecker::check_detailed`]; nothing survives the call.
//!
//! The walk never panics on a malformed context. An id the context did not
//! allocate is treated like a node with no rule, and an operand that leads
//! back to a node still being evaluated is left without a verdict. Both read
//! as not proven.

use crate::config::CheckerConfig;
use crate::rules::{rule_for, Combine, Rule};
use crate::verdicts::Verdicts;
use arith_ast::{Context, ExprId};
use rustc_hash::FxHashSet;

/// Per-call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckStats {
    /// Distinct identities whose rule ran.
    pub nodes_evaluated: usize,
    /// Entries skipped because the identity was already evaluated.
    pub cache_hits: usize,
    /// Distinct identities of kinds with no rule, including ids the context
    /// never allocated.
    pub unrecognized: usize,
    /// The walk stopped early on `CheckerConfig::max_nodes`.
    pub budget_exhausted: bool,
}

/// Everything one check produced.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub non_negative: bool,
    pub verdicts: Verdicts,
    pub stats: CheckStats,
}

enum Frame {
    Enter(ExprId),
    Exit {
        id: ExprId,
        kind: &'static str,
        lhs: ExprId,
        rhs: ExprId,
        combine: Combine,
    },
}

/// Conservative prover of `expr >= 0`.
///
/// `true` is a guarantee; `false` only means "not proven". The checker holds
/// configuration only, so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct NonNegativeChecker {
    config: CheckerConfig,
}

impl NonNegativeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn check(&self, ctx: &Context, root: ExprId) -> bool {
        self.check_detailed(ctx, root).non_negative
    }

    pub fn check_detailed(&self, ctx: &Context, root: ExprId) -> CheckReport {
        let mut verdicts = Verdicts::new();
        let mut stats = CheckStats::default();
        let mut opaque: FxHashSet<ExprId> = FxHashSet::default();
        let mut pending: FxHashSet<ExprId> = FxHashSet::default();
        let mut stack = vec![Frame::Enter(root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id) => {
                    if verdicts.contains(id) || opaque.contains(&id) {
                        stats.cache_hits += 1;
                        continue;
                    }
                    if pending.contains(&id) {
                        tracing::trace!(target: "nonneg", id = %id, "cycle");
                        continue;
                    }
                    if self
                        .config
                        .max_nodes
                        .is_some_and(|max| stats.nodes_evaluated >= max)
                    {
                        stats.budget_exhausted = true;
                        break;
                    }
                    stats.nodes_evaluated += 1;

                    let node = match ctx.try_get(id) {
                        Ok(node) => node,
                        Err(err) => {
                            tracing::trace!(target: "nonneg", id = %id, %err, "unknown id");
                            stats.unrecognized += 1;
                            opaque.insert(id);
                            continue;
                        }
                    };
                    match rule_for(node) {
                        Rule::Fixed(non_negative) => {
                            tracing::trace!(
                                target: "nonneg",
                                id = %id,
                                kind = node.kind_name(),
                                non_negative,
                                "verdict"
                            );
                            verdicts.record(id, non_negative);
                        }
                        Rule::Descend { lhs, rhs, combine } => {
                            pending.insert(id);
                            stack.push(Frame::Exit {
                                id,
                                kind: node.kind_name(),
                                lhs,
                                rhs,
                                combine,
                            });
                            stack.push(Frame::Enter(rhs));
                            stack.push(Frame::Enter(lhs));
                        }
                        Rule::NoRule => {
                            tracing::trace!(
                                target: "nonneg",
                                id = %id,
                                kind = node.kind_name(),
                                "no rule"
                            );
                            stats.unrecognized += 1;
                            opaque.insert(id);
                        }
                    }
                }
                Frame::Exit {
                    id,
                    kind,
                    lhs,
                    rhs,
                    combine,
                } => {
                    pending.remove(&id);
                    let non_negative = combine.apply(
                        verdicts.must_non_negative(lhs),
                        verdicts.must_non_negative(rhs),
                    );
                    tracing::trace!(
                        target: "nonneg",
                        id = %id,
                        kind,
                        non_negative,
                        "verdict"
                    );
                    verdicts.record(id, non_negative);
                }
            }
        }

        if stats.budget_exhausted {
            tracing::warn!(
                target: "nonneg",
                root = %root,
                max_nodes = ?self.config.max_nodes,
                "evaluation budget exhausted, reporting not proven"
            );
        }

        let non_negative = !stats.budget_exhausted && verdicts.must_non_negative(root);

        tracing::debug!(
            target: "nonneg",
            root = %root,
            non_negative,
            nodes = stats.nodes_evaluated,
            cache_hits = stats.cache_hits,
            unrecognized = stats.unrecognized,
            "check_done"
        );

        CheckReport {
            non_negative,
            verdicts,
            stats,
        }
    }
}
