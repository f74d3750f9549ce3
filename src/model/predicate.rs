//! Predicates: named relational symbols with arity and type metadata.

use serde::{Deserialize, Serialize};

use super::symbol::PredicateId;

/// The type tag a predicate carries, per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    Relation,
    Function,
    Attribute,
    Logical,
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredicateKind::Relation => write!(f, "relation"),
            PredicateKind::Function => write!(f, "function"),
            PredicateKind::Attribute => write!(f, "attribute"),
            PredicateKind::Logical => write!(f, "logical"),
        }
    }
}

/// A predicate symbol. `commutative`/`ordered` are metadata consumed only by
/// the rule engine (§4.A) — the knowledge model itself never branches on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predicate {
    pub id: PredicateId,
    pub name: String,
    pub arity: usize,
    pub kind: PredicateKind,
    pub commutative: bool,
    pub ordered: bool,
}

impl Predicate {
    pub(crate) fn new(id: PredicateId, name: impl Into<String>, arity: usize, kind: PredicateKind) -> Self {
        Self {
            id,
            name: name.into(),
            arity,
            kind,
            commutative: false,
            ordered: true,
        }
    }

    pub fn commutative(mut self, yes: bool) -> Self {
        self.commutative = yes;
        self
    }

    pub fn ordered(mut self, yes: bool) -> Self {
        self.ordered = yes;
        self
    }
}
