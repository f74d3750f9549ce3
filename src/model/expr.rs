//! Expressions: `(functor, args)` nodes forming a DAG over entities.

use serde::{Deserialize, Serialize};

use super::symbol::{EntityId, ExprId, PredicateId};

/// Either side of a match hypothesis, or an argument slot: entities and
/// expressions are never mixed within one [`Item`] comparison (§3 invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Entity(EntityId),
    Expr(ExprId),
}

impl Item {
    pub fn is_entity(self) -> bool {
        matches!(self, Item::Entity(_))
    }

    pub fn is_expr(self) -> bool {
        matches!(self, Item::Expr(_))
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Entity(id) => write!(f, "{id}"),
            Item::Expr(id) => write!(f, "{id}"),
        }
    }
}

/// A node `(functor, args)`. `args` may reference entities or other
/// expressions, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expression {
    pub id: ExprId,
    pub functor: PredicateId,
    pub args: Vec<Item>,
}

impl Expression {
    pub(crate) fn new(id: ExprId, functor: PredicateId, args: Vec<Item>) -> Self {
        Self { id, functor, args }
    }
}
