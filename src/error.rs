//! Rich diagnostic error types for the SME engine.
//!
//! A single top-level [`SmeError`] composes the two fatal failure kinds
//! §7 of the design calls out. Inference's "cannot infer entity" condition is
//! deliberately absent here: it is local to one GMap and suppressed, never
//! surfaced as an error value (see [`crate::infer`]).

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the SME engine.
///
/// Both variants are fatal: a match invocation that produces one of these
/// short-circuits the whole pipeline and surfaces it to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum SmeError {
    #[error("rule failed: {rule}: {detail}")]
    #[diagnostic(
        code(sme::rules::failure),
        help(
            "A filter or intern rule raised an error or returned malformed data. \
             Rule functions must be pure and total over their declared input shape; \
             check the rule named above for a panic, unwrap, or partial match."
        )
    )]
    RuleFailure { rule: String, detail: String },

    #[error("malformed graph: {detail}")]
    #[diagnostic(
        code(sme::model::malformed_graph),
        help(
            "An expression referenced an entity or expression that was not yet \
             registered in the graph, or a cycle was detected. Expression graphs \
             must be DAGs built bottom-up: register every argument before the \
             expression that references it."
        )
    )]
    MalformedGraph { detail: String },

    #[error("failed to load graph: {0}")]
    #[diagnostic(
        code(sme::io::load_failure),
        help("Check that the file exists and contains a JSON document matching the graph schema.")
    )]
    Io(#[from] std::io::Error),

    #[error("failed to parse graph document: {0}")]
    #[diagnostic(code(sme::io::parse_failure), help("The JSON document does not match the expected graph schema."))]
    Parse(#[from] serde_json::Error),
}

pub type SmeResult<T> = Result<T, SmeError>;
