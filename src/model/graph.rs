//! Graphs: arenas of entities and expressions, built bottom-up so the
//! resulting structure is a DAG by construction.

use std::collections::HashSet;

use crate::error::{SmeError, SmeResult};

use super::entity::{AttrValue, Entity};
use super::expr::{Expression, Item};
use super::predicate::{Predicate, PredicateKind};
use super::symbol::{EntityId, ExprId, PredicateId};

/// A knowledge graph: a set of top-level expressions plus the transitive
/// closure of reachable expressions and entities (§3).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    entities: Vec<Entity>,
    predicates: Vec<Predicate>,
    expressions: Vec<Expression>,
    roots: Vec<ExprId>,
}

impl Graph {
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.slot()]
    }

    pub fn predicate(&self, id: PredicateId) -> &Predicate {
        &self.predicates[id.slot()]
    }

    pub fn expression(&self, id: ExprId) -> &Expression {
        &self.expressions[id.slot()]
    }

    pub fn functor(&self, id: ExprId) -> PredicateId {
        self.expression(id).functor
    }

    pub fn args(&self, id: ExprId) -> &[Item] {
        &self.expression(id).args
    }

    pub fn roots(&self) -> &[ExprId] {
        &self.roots
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.entities.len()).map(EntityId::from_index)
    }

    pub fn expressions(&self) -> impl Iterator<Item = ExprId> + '_ {
        (0..self.expressions.len()).map(ExprId::from_index)
    }

    /// All entities and expressions transitively reachable from `item`,
    /// excluding `item` itself. Iterative (explicit worklist) since arbitrary
    /// expression nesting depth should not grow the native call stack.
    pub fn descendants(&self, item: Item) -> HashSet<Item> {
        let mut seen = HashSet::new();
        let mut stack = vec![item];
        while let Some(current) = stack.pop() {
            if let Item::Expr(id) = current {
                for &arg in self.args(id) {
                    if seen.insert(arg) {
                        stack.push(arg);
                    }
                }
            }
        }
        seen
    }

    /// Whether `candidate` is a strict ancestor of `e` (some chain of args
    /// leads from `candidate` down to `e`).
    pub fn is_ancestor(&self, candidate: Item, e: Item) -> bool {
        candidate != e && self.descendants(candidate).contains(&e)
    }
}

/// Builds a [`Graph`] bottom-up: predicates and entities first, then
/// expressions in dependency order, so every argument already exists in the
/// arena by the time it is referenced (enforcing the DAG invariant without a
/// separate cycle check).
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_predicate(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        kind: PredicateKind,
    ) -> PredicateId {
        let id = PredicateId::from_index(self.graph.predicates.len());
        self.graph.predicates.push(Predicate::new(id, name, arity, kind));
        id
    }

    pub fn declare_predicate_ext(
        &mut self,
        name: impl Into<String>,
        arity: usize,
        kind: PredicateKind,
        commutative: bool,
        ordered: bool,
    ) -> PredicateId {
        let id = self.declare_predicate(name, arity, kind);
        let pred = &mut self.graph.predicates[id.slot()];
        pred.commutative = commutative;
        pred.ordered = ordered;
        id
    }

    pub fn add_entity(&mut self, attrs: Vec<(String, AttrValue)>) -> EntityId {
        let id = EntityId::from_index(self.graph.entities.len());
        self.graph.entities.push(Entity::new(id, attrs));
        id
    }

    /// Register an expression. Fails with [`SmeError::MalformedGraph`] if the
    /// functor is unknown, the arity disagrees, or an argument references an
    /// entity/expression that has not yet been added.
    pub fn add_expression(&mut self, functor: PredicateId, args: Vec<Item>) -> SmeResult<ExprId> {
        if functor.slot() >= self.graph.predicates.len() {
            return Err(SmeError::MalformedGraph {
                detail: format!("expression references unknown predicate {functor}"),
            });
        }
        let arity = self.graph.predicate(functor).arity;
        if args.len() != arity {
            return Err(SmeError::MalformedGraph {
                detail: format!(
                    "predicate {} declares arity {arity} but expression has {} args",
                    self.graph.predicate(functor).name,
                    args.len()
                ),
            });
        }
        for &arg in &args {
            let in_bounds = match arg {
                Item::Entity(e) => e.slot() < self.graph.entities.len(),
                Item::Expr(x) => x.slot() < self.graph.expressions.len(),
            };
            if !in_bounds {
                return Err(SmeError::MalformedGraph {
                    detail: format!(
                        "expression argument {arg} was not registered before its use \
                         (forward reference or cycle)"
                    ),
                });
            }
        }
        let id = ExprId::from_index(self.graph.expressions.len());
        self.graph.expressions.push(Expression::new(id, functor, args));
        Ok(id)
    }

    /// Register an expression and mark it as a top-level (root) expression.
    pub fn add_root_expression(&mut self, functor: PredicateId, args: Vec<Item>) -> SmeResult<ExprId> {
        let id = self.add_expression(functor, args)?;
        self.graph.roots.push(id);
        Ok(id)
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
