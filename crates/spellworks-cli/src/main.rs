//! SpellWorks spell search CLI
//!
//! Loads a spell catalog, replays the search panel inputs given on the command
//! line and prints the records that remain visible.
//!
//! Usage:
//!   spellworks --catalog spells.json --text "fire" --cast-method 2
//!   spellworks --catalog spells.json --fuzzy --text "frots bolt" --format json

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use spellworks_search::{
    CastMethod, Catalog, EffectType, SearchConfig, SearchController, SearchEvent, SpellRecord,
    TargetMechanicFlags, TargetMechanicType,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// SpellWorks spell search
#[derive(Parser, Debug)]
#[command(name = "spellworks")]
#[command(author, version, about = "Search a spell catalog by description, id and attributes")]
struct Args {
    /// Spell catalog (JSON array of spell records)
    #[arg(short, long, env = "SPELLWORKS_CATALOG")]
    catalog: PathBuf,

    /// Search configuration (YAML)
    #[arg(long, env = "SPELLWORKS_CONFIG")]
    config: Option<PathBuf>,

    /// Interpret the search text as a spell id
    #[arg(long, conflicts_with = "fuzzy")]
    id: bool,

    /// Match descriptions approximately
    #[arg(long)]
    fuzzy: bool,

    /// Search text
    #[arg(short, long)]
    text: Option<String>,

    /// Only spells with this cast method
    #[arg(long)]
    cast_method: Option<u32>,

    /// Only spells with this target mechanic type
    #[arg(long)]
    target_mechanic_type: Option<u32>,

    /// Only spells with exactly these target mechanic flags
    #[arg(long)]
    target_mechanic_flags: Option<u32>,

    /// Only spells with this effect type
    #[arg(long)]
    effect_type: Option<u32>,

    /// Spell id to show as selected
    #[arg(long)]
    select: Option<u32>,

    /// Output format: text (default), json
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    mode: String,
    total: usize,
    visible: Vec<&'a SpellRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<&'a SpellRecord>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = Catalog::from_file(&args.catalog)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    let config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };

    let mut search = SearchController::new(Arc::new(catalog), config);
    for event in events_from_args(&args) {
        search.handle(event);
    }
    search.select(args.select);
    info!(
        "Search finished: mode={:?}, visible={}/{}",
        search.mode(),
        search.results().len(),
        search.catalog().len()
    );

    let report = Report {
        mode: format!("{:?}", search.mode()),
        total: search.catalog().len(),
        visible: search.results().iter().map(|r| r.as_ref()).collect(),
        selected: search.selected().map(|r| r.as_ref()),
    };

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode results")?;
        println!("{json}");
    } else {
        print_report(&report, args.select);
    }
    Ok(())
}

/// Logs go to stderr so JSON output stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SPELLWORKS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Turn the command line into panel events: toggles, then text, then
/// categorical filters.
fn events_from_args(args: &Args) -> Vec<SearchEvent> {
    let mut events = Vec::new();

    if args.id {
        events.push(SearchEvent::SetIdSearch(true));
    }
    if args.fuzzy {
        events.push(SearchEvent::SetFuzzy(true));
    }
    if let Some(text) = &args.text {
        events.push(SearchEvent::SetText(text.clone()));
    }
    if let Some(value) = args.cast_method {
        events.push(SearchEvent::SetCastMethod(Some(CastMethod(value))));
    }
    if let Some(value) = args.target_mechanic_type {
        events.push(SearchEvent::SetTargetMechanicType(Some(TargetMechanicType(
            value,
        ))));
    }
    if let Some(value) = args.target_mechanic_flags {
        events.push(SearchEvent::SetTargetMechanicFlags(Some(
            TargetMechanicFlags(value),
        )));
    }
    if let Some(value) = args.effect_type {
        events.push(SearchEvent::SetEffectType(Some(EffectType(value))));
    }

    events
}

fn print_report(report: &Report<'_>, requested: Option<u32>) {
    println!("{BOLD}{CYAN}SpellWorks Search{RESET}");
    println!("{DIM}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{RESET}");
    println!("{DIM}Mode:{RESET}     {}", report.mode);
    println!(
        "{DIM}Matches:{RESET}  {BOLD}{}{RESET} of {}\n",
        report.visible.len(),
        report.total
    );

    for record in &report.visible {
        let marker = if report.selected.is_some_and(|s| s.id == record.id) {
            format!("{GREEN}▶{RESET}")
        } else {
            " ".to_string()
        };
        println!(
            "{marker} {BOLD}{:>7}{RESET}  {}",
            record.id,
            record.description.as_deref().unwrap_or("<no description>")
        );
        println!(
            "           {DIM}cast={} target={} flags={:#x} effect={}{RESET}",
            record.cast_method.0,
            record.target_mechanic_type.0,
            record.target_mechanic_flags.0,
            record.effect_type.0
        );
    }

    if report.visible.is_empty() {
        println!("{YELLOW}No spells match the current search.{RESET}");
    }

    if let (Some(id), None) = (requested, report.selected) {
        println!("\n{YELLOW}Warning:{RESET} spell {id} is not in the catalog");
    }
}
