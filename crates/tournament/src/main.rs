//! Tournament CLI
//!
//! Manage the roster, generate rounds and record results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pairing_core::{
    head_to_head, head_to_head_summary, pairing_stats, rank, rank_of, recommend_opponents,
    CompetitorId, Margin,
};
use tournament::{
    leaderboard_report, stats_report, RoundConfig, RoundOrder, RoundRunner, TournamentConfig,
    TournamentStore, DEFAULT_CONFIG_FILE,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Score-based tournament pairing
#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Roster and match log file (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a competitor
    Add {
        name: String,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        score: i64,
    },
    /// Remove a competitor who has not played yet
    Remove { id: u64 },
    /// Rename a competitor
    Rename { id: u64, name: String },
    /// Generate pairings for the next round
    Round {
        #[arg(long, allow_hyphen_values = true)]
        margin: Option<i64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Visit strongest competitors first instead of shuffling
        #[arg(long)]
        sorted: bool,
        /// Also write the round as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Record the result of a match
    Record {
        player_a: u64,
        player_b: u64,
        #[arg(long)]
        winner: u64,
    },
    /// Show the standings
    #[command(alias = "standings")]
    Leaderboard,
    /// Show one competitor's position
    Rank { id: u64 },
    /// Suggest opponents for a competitor
    Opponents {
        id: u64,
        #[arg(long, allow_hyphen_values = true)]
        margin: Option<i64>,
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Head-to-head record of two competitors
    H2h { player_a: u64, player_b: u64 },
    /// Pool-wide pairing statistics
    Stats {
        #[arg(long, allow_hyphen_values = true)]
        margin: Option<i64>,
    },
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Flag value if given, otherwise the configured margin
fn resolve_margin(flag: Option<i64>, config: &TournamentConfig) -> Result<Margin> {
    match flag {
        Some(value) => Margin::try_from(value).context("Invalid --margin"),
        None => Ok(config.margin),
    }
}

fn run(cli: Cli, config: TournamentConfig) -> Result<()> {
    let data_file = cli.data.unwrap_or_else(|| config.data_file.clone());
    let mut store = TournamentStore::load_or_default(&data_file)
        .with_context(|| format!("Failed to load {}", data_file.display()))?;

    match cli.command {
        Command::Add { name, score } => {
            let competitor = store.add_competitor(&name, score)?;
            println!("Added {} as {}", competitor.name, competitor.id);
            store.save(&data_file)?;
        }
        Command::Remove { id } => {
            let removed = store.remove_competitor(CompetitorId(id))?;
            println!("Removed {}", removed.name);
            store.save(&data_file)?;
        }
        Command::Rename { id, name } => {
            store.rename_competitor(CompetitorId(id), &name)?;
            println!("Renamed {} to {}", CompetitorId(id), name.trim());
            store.save(&data_file)?;
        }
        Command::Round {
            margin,
            seed,
            sorted,
            save,
        } => {
            let round_config = RoundConfig {
                margin: resolve_margin(margin, &config)?,
                seed: seed.or(config.seed),
                order: if sorted {
                    RoundOrder::ByScore
                } else {
                    RoundOrder::Shuffled
                },
            };
            let report = RoundRunner::new(round_config).run(&store);
            report.print_report();
            if let Some(path) = save {
                report
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Command::Record {
            player_a,
            player_b,
            winner,
        } => {
            let record =
                store.record_match(CompetitorId(player_a), CompetitorId(player_b), CompetitorId(winner))?;
            let (winner, loser) = (record.winner, record.loser);
            println!(
                "Recorded: {} beat {}",
                store.competitor(winner)?.name,
                store.competitor(loser)?.name
            );
            store.save(&data_file)?;
        }
        Command::Leaderboard => {
            print!("{}", leaderboard_report(&rank(store.competitors(), store.history())));
        }
        Command::Rank { id } => {
            let id = CompetitorId(id);
            match rank_of(id, store.competitors(), store.history()) {
                Some(position) => println!(
                    "{} is ranked {} of {}",
                    store.competitor(id)?.name,
                    position,
                    store.competitors().len()
                ),
                None => println!("No competitor {}", id),
            }
        }
        Command::Opponents { id, margin, top } => {
            let margin = resolve_margin(margin, &config)?;
            let recommendations = recommend_opponents(
                CompetitorId(id),
                store.competitors(),
                store.history(),
                margin,
                top,
            )?;
            if recommendations.is_empty() {
                println!("No eligible opponents within margin {}", margin);
            }
            for (pos, rec) in recommendations.iter().enumerate() {
                let last = rec
                    .last_played
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{}. {} (score {}, diff {}, met {}x, last {})",
                    pos + 1,
                    rec.opponent.name,
                    rec.opponent.score,
                    rec.score_difference,
                    rec.previous_matches,
                    last
                );
            }
        }
        Command::H2h { player_a, player_b } => {
            let (a, b) = (CompetitorId(player_a), CompetitorId(player_b));
            let (name_a, name_b) = (&store.competitor(a)?.name, &store.competitor(b)?.name);
            let summary = head_to_head_summary(a, b, store.history());
            println!(
                "{} vs {}: {}-{} in {} matches",
                name_a, name_b, summary.wins_a, summary.wins_b, summary.matches
            );
            for record in head_to_head(a, b, store.history()) {
                let winner = if record.winner == a { name_a } else { name_b };
                println!("  {} won by {}", record.timestamp.format("%Y-%m-%d %H:%M"), winner);
            }
        }
        Command::Stats { margin } => {
            let margin = resolve_margin(margin, &config)?;
            print!("{}", stats_report(&pairing_stats(store.competitors(), store.history(), margin)));
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TournamentConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    init_tracing(&config.log_filter);

    run(cli, config)
}
