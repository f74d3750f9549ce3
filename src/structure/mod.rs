//! Hypothesis Structurer: annotates each MH with emaps/nogoods/children and
//! propagates them upward (§4.C).

pub mod build;
pub mod record;

pub use build::{build, MhStructure};
pub use record::MhRecord;
