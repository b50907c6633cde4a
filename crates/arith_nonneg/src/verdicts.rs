use arith_ast::ExprId;
use rustc_hash::FxHashMap;

/// Identity-keyed memo of proven verdicts for one check.
///
/// Keys are node identities, never values: two separately built `0` literals
/// get separate entries.
#[derive(Debug, Clone, Default)]
pub struct Verdicts {
    map: FxHashMap<ExprId, bool>,
}

impl Verdicts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a verdict. Each identity is written at most once.
    pub(crate) fn record(&mut self, id: ExprId, non_negative: bool) {
        let previous = self.map.insert(id, non_negative);
        debug_assert!(previous.is_none(), "verdict for {id} written twice");
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> Option<bool> {
        self.map.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: ExprId) -> bool {
        self.map.contains_key(&id)
    }

    /// `true` only for a recorded `true`. A missing entry reads as `false`.
    #[inline]
    pub fn must_non_negative(&self, id: ExprId) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
