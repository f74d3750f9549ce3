//! Rule shapes: small pure functions over a tagged-variant item, differing
//! only in input shape between the two rule families (§9 "Dynamic dispatch
//! over rules").

use crate::model::{Graph, Item, Mh};

type FilterClosure = dyn Fn(&Graph, Item, &Graph, Item) -> Result<Option<Mh>, String> + Send + Sync;
type InternClosure = dyn Fn(&Graph, &Graph, Mh) -> Result<Vec<Mh>, String> + Send + Sync;

/// A filter rule: `(base_item, target_item) -> MH | nothing`, applied to the
/// full cartesian product of base and target items (§4.B).
pub struct FilterRule {
    pub name: &'static str,
    f: Box<FilterClosure>,
}

impl FilterRule {
    pub fn new(
        name: &'static str,
        f: impl Fn(&Graph, Item, &Graph, Item) -> Result<Option<Mh>, String> + Send + Sync + 'static,
    ) -> Self {
        Self { name, f: Box::new(f) }
    }

    pub fn apply(&self, base_graph: &Graph, base: Item, target_graph: &Graph, target: Item) -> Result<Option<Mh>, String> {
        (self.f)(base_graph, base, target_graph, target)
    }
}

/// An intern rule: `MH -> collection of MH`, applied transitively to fixpoint
/// (§4.B).
pub struct InternRule {
    pub name: &'static str,
    f: Box<InternClosure>,
}

impl InternRule {
    pub fn new(
        name: &'static str,
        f: impl Fn(&Graph, &Graph, Mh) -> Result<Vec<Mh>, String> + Send + Sync + 'static,
    ) -> Self {
        Self { name, f: Box::new(f) }
    }

    pub fn apply(&self, base_graph: &Graph, target_graph: &Graph, mh: Mh) -> Result<Vec<Mh>, String> {
        (self.f)(base_graph, target_graph, mh)
    }
}

/// A ruleset: an ordered collection of filter rules and an ordered collection
/// of intern rules (§6 "Ruleset shape").
#[derive(Default)]
pub struct RuleSet {
    pub filters: Vec<FilterRule>,
    pub interns: Vec<InternRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, rule: FilterRule) -> Self {
        self.filters.push(rule);
        self
    }

    pub fn with_intern(mut self, rule: InternRule) -> Self {
        self.interns.push(rule);
        self
    }
}
