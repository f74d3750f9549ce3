//! JSON graph loading: the one allowed concrete syntax, a thin adapter over
//! [`model::GraphBuilder`] (§1 — parsing a textual predicate-calculus-like
//! notation is explicitly out of scope; this is the wire format embedders use
//! instead).
//!
//! Entities and expressions are addressed by position in their respective
//! JSON arrays, matching the order they must be declared in for the
//! builder's forward-reference check (§4.A) to accept them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SmeError, SmeResult};
use crate::model::{AttrValue, Graph, GraphBuilder, Item, PredicateKind};

#[derive(Debug, Deserialize, Serialize)]
struct PredicateDoc {
    name: String,
    arity: usize,
    kind: PredicateKind,
    #[serde(default)]
    commutative: bool,
    #[serde(default = "default_ordered")]
    ordered: bool,
}

fn default_ordered() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize)]
struct EntityDoc {
    #[serde(default)]
    attrs: Vec<(String, AttrValue)>,
}

/// A wire-format item reference: either an entity or an expression, each
/// addressed by its 0-based position in the document's `entities`/
/// `expressions` array.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ItemDoc {
    Entity { index: usize },
    Expr { index: usize },
}

#[derive(Debug, Deserialize, Serialize)]
struct ExpressionDoc {
    /// Index into `predicates`.
    functor: usize,
    args: Vec<ItemDoc>,
    #[serde(default)]
    root: bool,
}

#[derive(Debug, Deserialize, Serialize)]
struct GraphDoc {
    #[serde(default)]
    predicates: Vec<PredicateDoc>,
    #[serde(default)]
    entities: Vec<EntityDoc>,
    #[serde(default)]
    expressions: Vec<ExpressionDoc>,
}

fn resolve(item: &ItemDoc, entity_ids: &[crate::model::EntityId], expr_ids: &[crate::model::ExprId]) -> SmeResult<Item> {
    match *item {
        ItemDoc::Entity { index } => entity_ids.get(index).copied().map(Item::Entity).ok_or_else(|| {
            SmeError::MalformedGraph {
                detail: format!("entity index {index} out of range"),
            }
        }),
        ItemDoc::Expr { index } => expr_ids.get(index).copied().map(Item::Expr).ok_or_else(|| SmeError::MalformedGraph {
            detail: format!("expression index {index} out of range (must reference an earlier expression)"),
        }),
    }
}

/// Build a [`Graph`] from a parsed [`GraphDoc`], declaring predicates and
/// entities first and expressions in document order so every argument has
/// already been registered by the time it is referenced.
fn build_graph(doc: GraphDoc) -> SmeResult<Graph> {
    let mut builder = GraphBuilder::new();

    let predicate_ids: Vec<_> = doc
        .predicates
        .into_iter()
        .map(|p| builder.declare_predicate_ext(p.name, p.arity, p.kind, p.commutative, p.ordered))
        .collect();

    let entity_ids: Vec<_> = doc.entities.into_iter().map(|e| builder.add_entity(e.attrs)).collect();

    let mut expr_ids = Vec::with_capacity(doc.expressions.len());
    for expr in doc.expressions {
        let functor = *predicate_ids.get(expr.functor).ok_or_else(|| SmeError::MalformedGraph {
            detail: format!("predicate index {} out of range", expr.functor),
        })?;
        let args = expr
            .args
            .iter()
            .map(|a| resolve(a, &entity_ids, &expr_ids))
            .collect::<SmeResult<Vec<_>>>()?;
        let id = if expr.root {
            builder.add_root_expression(functor, args)?
        } else {
            builder.add_expression(functor, args)?
        };
        expr_ids.push(id);
    }

    Ok(builder.build())
}

/// Parse a graph from a JSON document.
pub fn graph_from_json(s: &str) -> SmeResult<Graph> {
    let doc: GraphDoc = serde_json::from_str(s)?;
    build_graph(doc)
}

/// Load a graph from a JSON file on disk.
pub fn load_graph(path: impl AsRef<Path>) -> SmeResult<Graph> {
    let text = std::fs::read_to_string(path)?;
    graph_from_json(&text)
}
