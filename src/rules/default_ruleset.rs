//! Literal-similarity: the default ruleset required by §4.B.
//!
//! Same-functor relation matching, child-generation for matching arguments,
//! and entity-pair interning where both parents align.

use crate::model::Item;

use super::rule::{FilterRule, InternRule, RuleSet};

/// Build the literal-similarity ruleset.
pub fn default_ruleset() -> RuleSet {
    RuleSet::new()
        .with_filter(FilterRule::new("same-functor", |bg, b, tg, t| {
            let (Item::Expr(bx), Item::Expr(tx)) = (b, t) else {
                return Ok(None);
            };
            let b_name = &bg.predicate(bg.functor(bx)).name;
            let t_name = &tg.predicate(tg.functor(tx)).name;
            if b_name == t_name {
                Ok(crate::model::Mh::new(b, t))
            } else {
                Ok(None)
            }
        }))
        .with_intern(InternRule::new("positional-children", |bg, tg, mh| {
            if mh.is_emap() {
                return Ok(Vec::new());
            }
            let (Item::Expr(bx), Item::Expr(tx)) = (mh.base, mh.target) else {
                return Ok(Vec::new());
            };
            let b_args = bg.args(bx);
            let t_args = tg.args(tx);
            if b_args.len() != t_args.len() {
                return Ok(Vec::new());
            }
            Ok(b_args
                .iter()
                .zip(t_args.iter())
                .filter(|(a, b)| a.is_expr() && b.is_expr())
                .filter_map(|(&a, &b)| crate::model::Mh::new(a, b))
                .collect())
        }))
        .with_intern(InternRule::new("entity-pairs", |bg, tg, mh| {
            if mh.is_emap() {
                return Ok(Vec::new());
            }
            let (Item::Expr(bx), Item::Expr(tx)) = (mh.base, mh.target) else {
                return Ok(Vec::new());
            };
            let b_args = bg.args(bx);
            let t_args = tg.args(tx);
            if b_args.len() != t_args.len() {
                return Ok(Vec::new());
            }
            Ok(b_args
                .iter()
                .zip(t_args.iter())
                .filter(|(a, b)| a.is_entity() && b.is_entity())
                .filter_map(|(&a, &b)| crate::model::Mh::new(a, b))
                .collect())
        }))
}
