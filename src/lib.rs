//! # sme-engine
//!
//! A Structure Mapping Engine: analogical mapping between two typed
//! relational graphs (a base and a target) via match hypotheses, structural
//! consistency, maximal combination, and scoring, with an optional inference
//! transfer stage.
//!
//! ## Pipeline
//!
//! - **Model** (`model`): the expression DAG (entities, predicates,
//!   expressions) both graphs are built from, plus match hypotheses (`Mh`).
//! - **Rules** (`rules`): pluggable filter/intern rules that propose and
//!   expand the candidate hypothesis set.
//! - **Structure** (`structure`): per-hypothesis emaps/nogood/children
//!   annotation, propagated bottom-up over the expression DAG.
//! - **GMap** (`gmap`): root-consistent hypothesis trees grown into maximal
//!   internally consistent subtrees.
//! - **Combine** (`combine`): Bron–Kerbosch enumeration of every maximal
//!   mutually consistent subset of GMaps, then merge into single GMaps.
//! - **Score** (`score`): structural evaluation (SES trickle-down) plus
//!   entity content-match counts.
//! - **Infer** (`infer`): optional transfer of unmatched base structure onto
//!   the target, reachable from a GMap's alignment.
//!
//! ## Library usage
//!
//! ```no_run
//! use sme_engine::{match_graphs, config::MatchConfig};
//! use sme_engine::model::GraphBuilder;
//!
//! let base = GraphBuilder::new().build();
//! let target = GraphBuilder::new().build();
//! let outcome = match_graphs(&base, &target, None, &MatchConfig::default()).unwrap();
//! for gmap in &outcome.gmaps {
//!     println!("score = {}", gmap.score);
//! }
//! ```

pub mod combine;
pub mod config;
pub mod error;
pub mod gmap;
pub mod infer;
pub mod io;
pub mod model;
pub mod rules;
pub mod score;
pub mod structure;

use tracing::info;

use combine::Cancel;
use config::MatchConfig;
use error::SmeResult;
use gmap::GMap;
use model::Graph;
use rules::RuleSet;
use structure::MhStructure;

/// Everything a single `match` invocation produces: the final scored (and
/// optionally inference-transferred) GMaps, plus the intermediate structure
/// record set they were grown from — useful for diagnostics and for callers
/// who want to inspect `emaps`/`nogood`/`children` directly.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub gmaps: Vec<GMap>,
    pub structure: MhStructure,
}

/// Run the full pipeline (§4.A–G, plus §4.H when enabled) with the default
/// ruleset and no cancellation.
pub fn match_graphs(
    base: &Graph,
    target: &Graph,
    ruleset: Option<&RuleSet>,
    config: &MatchConfig,
) -> SmeResult<MatchOutcome> {
    match_graphs_cancellable(base, target, ruleset, config, &|| false)
}

/// Same pipeline as [`match_graphs`], but `cancel` is polled during the
/// combiner's Bron–Kerbosch search — the one stage whose cost is sensitive
/// to pathological hypothesis graphs — and a cancellation unwinds the search
/// to whatever maximal subsets had already been completed.
pub fn match_graphs_cancellable(
    base: &Graph,
    target: &Graph,
    ruleset: Option<&RuleSet>,
    config: &MatchConfig,
    cancel: Cancel,
) -> SmeResult<MatchOutcome> {
    let span = tracing::info_span!("match");
    let _enter = span.enter();

    let default_rs;
    let ruleset = match ruleset {
        Some(rs) => rs,
        None => {
            default_rs = rules::default_ruleset();
            &default_rs
        }
    };

    let hypotheses = rules::run(base, target, ruleset)?;
    let structure = structure::build(base, target, &hypotheses);
    let initial_gmaps = gmap::build_gmaps(&structure);
    let subsets = combine::maximal_consistent_subsets(&initial_gmaps, cancel);
    let merged: Vec<GMap> = subsets.iter().map(|s| combine::merge_subset(s)).collect();

    let score_config = config.score_config();
    let mut scored: Vec<GMap> = merged
        .iter()
        .map(|g| score::score_gmap(g, &structure, base, target, &score_config))
        .collect();

    if config.run_inference {
        scored = scored.iter().map(|g| infer::infer_gmap(g, base)).collect();
    }

    info!(gmaps = scored.len(), "match complete");
    Ok(MatchOutcome { gmaps: scored, structure })
}

/// Match many base/target pairs in parallel. Each pair is independent, so
/// this is trivially data-parallel over rayon's global pool (§5).
pub fn match_many(
    pairs: &[(&Graph, &Graph)],
    ruleset: Option<&RuleSet>,
    config: &MatchConfig,
) -> Vec<SmeResult<MatchOutcome>> {
    use rayon::prelude::*;
    pairs
        .par_iter()
        .map(|&(base, target)| match_graphs(base, target, ruleset, config))
        .collect()
}
