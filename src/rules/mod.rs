//! Rule Engine: applies filter and intern rules to produce match hypotheses
//! (§4.B).

pub mod default_ruleset;
pub mod engine;
pub mod rule;

pub use default_ruleset::default_ruleset;
pub use engine::run;
pub use rule::{FilterRule, InternRule, RuleSet};
