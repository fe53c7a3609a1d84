mod analysis;
mod api;
mod config;
mod display;
mod error;
mod queue;

use analysis::aggregator::AggregationTree;
use anyhow::{Context, Result};
use api::client::RiotApiClient;
use api::MatchSource;
use chrono::NaiveDate;
use clap::Parser;
use config::Config;
use display::output::{
    display_error, display_info, display_report, display_success, display_warning,
};
use error::AppError;
use indicatif::{ProgressBar, ProgressStyle};
use queue::ProcessingQueue;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Match Stats")]
#[command(about = "Aggregate a player's match history into per-mode, per-champion and per-role stats", long_about = None)]
struct Args {
    /// Riot Game Name
    game_name: String,

    /// Riot Tag (tag line)
    tag_line: String,

    /// Platform region (default: RIOT_REGION or euw1)
    #[arg(short, long)]
    region: Option<String>,

    /// Match ids requested per listing page (1-100)
    #[arg(long)]
    page_size: Option<usize>,

    /// Only list matches played on or after this day (YYYY-MM-DD, UTC)
    #[arg(long)]
    since: Option<String>,

    /// Only list matches played before this day (YYYY-MM-DD, UTC)
    #[arg(long)]
    until: Option<String>,

    /// Stop after the first listing page
    #[arg(long)]
    first_page_only: bool,

    /// Attempts per request before giving up
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Log every request and hydrated match
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_day(flag: &str, value: &str) -> Result<i64, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp())
        .ok_or_else(|| AppError::ConfigError(format!("{} expects YYYY-MM-DD, got {}", flag, value)))
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<(), AppError> {
    if let Some(region) = &args.region {
        config.region = region.clone();
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.pacing.max_attempts = max_attempts;
    }
    if let Some(since) = &args.since {
        config.start_time = Some(parse_day("--since", since)?);
    }
    if let Some(until) = &args.until {
        config.end_time = Some(parse_day("--until", until)?);
    }
    config.first_page_only |= args.first_page_only;
    config.validate()
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &args)?;

    let player_key = format!("{}#{}", args.game_name, args.tag_line);
    display_info(&format!(
        "Fetching data for {} in region {}",
        player_key, config.region
    ));

    let client = RiotApiClient::new(config.clone());

    // Step 1: the account lookup is the only step without retries
    display_info("Step 1: Getting account info...");
    let account = client
        .get_account(&args.game_name, &args.tag_line)
        .context("account lookup failed")?;
    let short_puuid: String = account.puuid.chars().take(8).collect();
    display_success(&format!(
        "Found {}#{} (PUUID: {})",
        account.game_name, account.tag_line, short_puuid
    ));

    // Step 2: list match ids
    display_info("Step 2: Listing match history...");
    let match_ids = queue::list_all_for_player(
        &client,
        &account.puuid,
        config.page_size,
        config.first_page_only,
        &config.pacing,
    )
    .context("listing matches failed")?;

    if match_ids.is_empty() {
        return Err(AppError::NoMatches.into());
    }
    display_success(&format!("Found {} matches to analyze", match_ids.len()));

    // Step 3: hydrate every match, one request at a time
    display_info("Step 3: Fetching match details...");
    let mut match_queue = ProcessingQueue::new();
    match_queue.enqueue(match_ids);

    let pb = ProgressBar::new(match_queue.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    let drained = match_queue.drain_all(&client, &config.pacing, &pb);
    match &drained {
        Ok(()) => pb.finish_with_message("✓ Match data fetched"),
        Err(_) if !match_queue.is_drained() => {
            pb.abandon();
            display_warning(&format!(
                "Stopped with {} matches still pending; reporting on the {} fetched so far",
                match_queue.pending().len(),
                match_queue.processed().len()
            ));
        }
        Err(_) => pb.abandon(),
    }

    // Step 4: aggregate
    let mut tree = AggregationTree::new();
    let summary = tree.fold(match_queue.processed(), &account.puuid);
    if summary.skipped_missing_participant > 0 {
        display_warning(&format!(
            "{} matches did not list {} and were skipped",
            summary.skipped_missing_participant, player_key
        ));
    }

    display_report(&tree, &player_key);

    drained.context("match hydration did not complete")?;
    Ok(())
}
