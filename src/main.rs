//! HANDICAP: Asian-handicap and goal-line settlement engine
//!
//! Entry point. Loads configuration, initialises structured logging and
//! dispatches one engine operation per invocation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use handicap::batch::{settle_batch, BatchReport};
use handicap::config::{AppConfig, LoggingConfig};
use handicap::storage;
use handicap::{
    coerce_selection, compute_line_result, Ladder, Line, LineOption, OddType, Selection, Settler,
};

/// Settle handicap and goal-total bets with exact decimal lines.
#[derive(Parser, Debug)]
#[command(name = "handicap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable lines for a direction
    Ladder {
        /// Bet direction (ah1, ah2, over, under, draw)
        #[arg(long = "type", value_name = "TYPE")]
        odd_type: Option<OddType>,
        /// List raw condition values instead of the direction's list
        #[arg(long, conflicts_with = "odd_type")]
        raw: bool,
        /// Print JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },

    /// Render a line as shown next to a bet
    Format {
        #[arg(allow_hyphen_values = true)]
        line: Line,
        #[arg(long = "type", value_name = "TYPE")]
        odd_type: OddType,
    },

    /// Show the opposite bet
    Reverse {
        #[arg(allow_hyphen_values = true)]
        line: Line,
        #[arg(long = "type", value_name = "TYPE")]
        odd_type: OddType,
    },

    /// Settle a line for one side's score against the other's
    Result {
        #[arg(allow_hyphen_values = true)]
        line: Line,
        score_for: u64,
        score_against: u64,
    },

    /// Show how a selection changes when switching direction
    Adjust {
        #[arg(long = "type", value_name = "TYPE")]
        odd_type: OddType,
        #[arg(allow_hyphen_values = true)]
        value: Option<Line>,
    },

    /// Settle a JSON batch of bets
    Settle {
        /// JSON array of bet records
        input: PathBuf,
        /// Write the report here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Summarise a saved settlement report
    Report {
        /// Report written by `settle --output`
        path: PathBuf,
        /// Print the whole report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let cfg = AppConfig::load_or_default(&cli.config)?;

    init_logging(&cfg.logging);
    debug!(config = %cli.config, policy = ?cfg.settlement.field_policy, "Configuration loaded");

    match cli.command {
        Command::Ladder { odd_type, raw, json } => {
            let ladder = Ladder::new(&cfg.ladder)?;
            let options = if raw {
                ladder.conditions()
            } else {
                ladder.options_for(odd_type)
            };
            print_options(options, json)?;
        }
        Command::Format { line, odd_type } => {
            println!("{}", line.display_for(odd_type));
        }
        Command::Reverse { line, odd_type } => {
            let reversed = Selection::new(odd_type, line).reversed();
            println!("{reversed}");
        }
        Command::Result {
            line,
            score_for,
            score_against,
        } => {
            let outcome = compute_line_result(&line, score_for, score_against);
            println!("{} ({outcome})", outcome.as_i8());
        }
        Command::Adjust { odd_type, value } => match coerce_selection(odd_type, value.as_ref()) {
            Some(replaced) => println!("{replaced}"),
            None => println!("{}", value.map(|v| v.to_string()).unwrap_or_default()),
        },
        Command::Settle { input, output } => {
            let records = storage::load_batch(&input)?;
            let settler = Settler::new(cfg.settlement.field_policy);
            let report = settle_batch(&settler, &records);
            match output {
                Some(path) => {
                    storage::save_report(&report, &path)?;
                    info!(
                        path = %path.display(),
                        determined = report.determined,
                        undetermined = report.undetermined,
                        failed = report.failed,
                        "Report written"
                    );
                }
                None => println!("{}", storage::render_report(&report)?),
            }
        }
        Command::Report { path, json } => {
            let report = storage::load_report(&path)?;
            if json {
                println!("{}", storage::render_report(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_options(options: &[LineOption], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
    } else {
        for opt in options {
            println!("{}\t{}", opt.value, opt.label);
        }
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    println!("settled at    {}", report.settled_at.to_rfc3339());
    println!(
        "bets          {} ({} determined, {} undetermined, {} failed)",
        report.total, report.determined, report.undetermined, report.failed
    );
    println!(
        "outcomes      {} win / {} push / {} loss",
        report.wins, report.pushes, report.losses
    );
    for entry in &report.entries {
        let id = entry.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let outcome = match (&entry.result, &entry.error) {
            (Some(r), _) => format!("{} {}", r.result, r.score),
            (None, Some(e)) => format!("error: {e}"),
            (None, None) => "undetermined".to_string(),
        };
        println!(
            "{id}\t{} {} {} {}\t{outcome}",
            entry.period, entry.variety, entry.odd_type, entry.condition
        );
    }
}

/// Initialise the `tracing` subscriber on stderr, keeping stdout for results.
fn init_logging(cfg: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    let json_logging = cfg.json || std::env::var("HANDICAP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
