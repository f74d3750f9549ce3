//! Entities: opaque identity plus an ordered content record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::symbol::EntityId;

/// A single attribute value: numeric or symbolic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Symbol(String),
}

/// An entity: opaque identity plus an ordered attribute-name → value record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Ordered so content comparisons and serialization are deterministic.
    pub attrs: Vec<(String, AttrValue)>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, attrs: Vec<(String, AttrValue)>) -> Self {
        Self { id, attrs }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Attribute names, in declaration order.
    fn attr_names(&self, unmatched: &HashSet<String>) -> Vec<&str> {
        self.attrs
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !unmatched.contains(*n))
            .collect()
    }

    /// Two entities match by content (§3) when their attribute-name lists are
    /// equal (after dropping `unmatched`) and each pair of values is equal,
    /// numeric values compared after rounding to two decimal places half-up.
    pub fn content_eq(&self, other: &Entity, unmatched: &HashSet<String>) -> bool {
        let mut mine = self.attr_names(unmatched);
        let mut theirs = other.attr_names(unmatched);
        mine.sort_unstable();
        theirs.sort_unstable();
        if mine != theirs {
            return false;
        }
        mine.iter().all(|name| {
            match (self.attr(name), other.attr(name)) {
                (Some(AttrValue::Number(a)), Some(AttrValue::Number(b))) => {
                    round_half_up_2dp(*a) == round_half_up_2dp(*b)
                }
                (Some(AttrValue::Symbol(a)), Some(AttrValue::Symbol(b))) => a == b,
                _ => false,
            }
        })
    }
}

/// Round to two decimal places, half-up (ties round toward +infinity), as an
/// integer number of cents so equality comparison is exact.
pub fn round_half_up_2dp(value: f64) -> i64 {
    ((value * 100.0) + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ent(id: usize, attrs: &[(&str, AttrValue)]) -> Entity {
        Entity::new(
            EntityId::from_index(id),
            attrs.iter().map(|(n, v)| (n.to_string(), v.clone())).collect(),
        )
    }

    #[test]
    fn rounding_ties_by_two_decimals() {
        let unmatched = HashSet::new();
        let a = ent(
            0,
            &[
                ("x", AttrValue::Number(1.004)),
                ("y", AttrValue::Symbol("a".into())),
            ],
        );
        let b = ent(
            1,
            &[
                ("x", AttrValue::Number(1.001)),
                ("y", AttrValue::Symbol("a".into())),
            ],
        );
        assert!(a.content_eq(&b, &unmatched));

        let c = ent(
            2,
            &[
                ("x", AttrValue::Number(1.006)),
                ("y", AttrValue::Symbol("a".into())),
            ],
        );
        assert!(!a.content_eq(&c, &unmatched));
    }

    #[test]
    fn unmatched_attribute_is_ignored() {
        let mut unmatched = HashSet::new();
        unmatched.insert("z".to_string());
        let a = ent(
            0,
            &[("x", AttrValue::Number(1.0)), ("z", AttrValue::Number(9.0))],
        );
        let b = ent(
            1,
            &[("x", AttrValue::Number(1.0)), ("z", AttrValue::Number(2.0))],
        );
        assert!(a.content_eq(&b, &unmatched));
    }

    #[test]
    fn differing_attribute_sets_do_not_match() {
        let unmatched = HashSet::new();
        let a = ent(0, &[("x", AttrValue::Number(1.0))]);
        let b = ent(1, &[("y", AttrValue::Number(1.0))]);
        assert!(!a.content_eq(&b, &unmatched));
    }

    proptest::proptest! {
        /// §3/§8.5: single-attribute content equality holds exactly when the
        /// two values round half-up to the same two-decimal-place bucket.
        #[test]
        fn content_eq_matches_rounded_equality(a in -10_000.0f64..10_000.0, b in -10_000.0f64..10_000.0) {
            let unmatched = HashSet::new();
            let ea = ent(0, &[("x", AttrValue::Number(a))]);
            let eb = ent(1, &[("x", AttrValue::Number(b))]);
            let expect = round_half_up_2dp(a) == round_half_up_2dp(b);
            proptest::prop_assert_eq!(ea.content_eq(&eb, &unmatched), expect);
        }
    }
}
