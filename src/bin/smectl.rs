//! smectl: command-line front end for the Structure Mapping Engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use sme_engine::config::MatchConfig;
use sme_engine::io;

#[derive(Parser)]
#[command(name = "smectl", version, about = "Structure Mapping Engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a base graph against a target graph and report the resulting GMaps.
    Match {
        /// Path to the base graph (JSON).
        #[arg(long)]
        base: PathBuf,

        /// Path to the target graph (JSON).
        #[arg(long)]
        target: PathBuf,

        /// Disable the inference-transfer stage.
        #[arg(long)]
        no_infer: bool,

        /// Comma-separated attribute names to drop before entity content comparison.
        #[arg(long)]
        unmatched: Option<String>,

        /// Emit the full outcome as JSON instead of a summary table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match { base, target, no_infer, unmatched, json } => {
            let base_graph = io::load_graph(&base).into_diagnostic()?;
            let target_graph = io::load_graph(&target).into_diagnostic()?;

            let config = MatchConfig {
                unmatched_attributes: unmatched
                    .map(|s| s.split(',').map(|a| a.trim().to_string()).collect())
                    .unwrap_or_default(),
                run_inference: !no_infer,
            };

            let outcome = sme_engine::match_graphs(&base_graph, &target_graph, None, &config).into_diagnostic()?;

            if json {
                println!("{}", summary_json(&outcome));
            } else {
                print_summary(&outcome);
            }
        }
    }

    Ok(())
}

fn print_summary(outcome: &sme_engine::MatchOutcome) {
    println!("{} GMap(s) found:", outcome.gmaps.len());
    for (i, gmap) in outcome.gmaps.iter().enumerate() {
        println!(
            "  [{i}] score={} emap_matches={} mhs={} inferences={}",
            gmap.score,
            gmap.emap_matches,
            gmap.mhs.len(),
            gmap.inferences.as_ref().map(|s| s.len()).unwrap_or(0),
        );
        for (base, target) in &gmap.mapping {
            println!("      {base} <-> {target}");
        }
    }
}

fn summary_json(outcome: &sme_engine::MatchOutcome) -> String {
    let gmaps: Vec<serde_json::Value> = outcome
        .gmaps
        .iter()
        .map(|g| {
            serde_json::json!({
                "score": g.score,
                "emap_matches": g.emap_matches,
                "mh_count": g.mhs.len(),
                "mapping": g.mapping.iter().map(|(b, t)| format!("{b} <-> {t}")).collect::<Vec<_>>(),
                "inference_count": g.inferences.as_ref().map(|s| s.len()).unwrap_or(0),
            })
        })
        .collect();
    serde_json::json!({ "gmaps": gmaps }).to_string()
}
