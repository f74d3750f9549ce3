//! Match hypotheses: the atomic units of a mapping (§3).

use super::expr::Item;

/// A pair `(base, target)` where both sides are of the same kind (both
/// entities or both expressions) — never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mh {
    pub base: Item,
    pub target: Item,
}

impl Mh {
    /// Construct an MH, enforcing the "never crosses entity/expression kind"
    /// invariant (§3, §8 invariant 1). Returns `None` if `base` and `target`
    /// are of different kinds.
    pub fn new(base: Item, target: Item) -> Option<Self> {
        if base.is_entity() == target.is_entity() {
            Some(Self { base, target })
        } else {
            None
        }
    }

    /// An MH is an emap iff both sides are entities.
    pub fn is_emap(&self) -> bool {
        self.base.is_entity()
    }
}

impl std::fmt::Display for Mh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} <-> {})", self.base, self.target)
    }
}
