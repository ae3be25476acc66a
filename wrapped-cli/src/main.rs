use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wrapped_core::Receipt;
use wrapped_ingest::{load_receipts, normalize};
use wrapped_metrics::{aggregate_with, slides_with};

mod config;
mod export;
mod render;

use config::{OutputFormat, Overrides};

#[derive(Parser, Debug)]
#[command(
    name = "wrapped",
    version,
    about = "Turn receipt exports into a year-in-review and a spend dashboard"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (overrides config.toml)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full dashboard metrics for a receipt export
    Dashboard {
        /// Receipt export (JSON array)
        file: PathBuf,

        /// Group items with ORG/ORGANIC tokens removed
        #[arg(long)]
        strip_organic: bool,

        /// Rows in the item rankings
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Year-in-review slide facts
    Slides {
        file: PathBuf,

        #[arg(long)]
        strip_organic: bool,
    },

    /// Print the canonical receipts as JSON
    Normalize { file: PathBuf },

    /// Export the per-item table as CSV
    Items {
        file: PathBuf,

        #[arg(long)]
        strip_organic: bool,
    },

    /// Manage ~/.wrapped/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG > --verbose > info; stdout is reserved for output
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Dashboard {
            file,
            strip_organic,
            limit,
        } => {
            let overrides = Overrides {
                strip_organic,
                limit,
                format: cli.format,
            };
            let cfg = config::load_config()?;
            let receipts = load_canonical(&file)?;
            let bundle = aggregate_with(&receipts, &cfg.options(&overrides));
            match cfg.format(&overrides) {
                OutputFormat::Json => print_json(&bundle)?,
                OutputFormat::Text => {
                    print!("{}", render::dashboard_text(&bundle).context("render dashboard")?)
                }
            }
        }

        Command::Slides {
            file,
            strip_organic,
        } => {
            let overrides = Overrides {
                strip_organic,
                limit: None,
                format: cli.format,
            };
            let cfg = config::load_config()?;
            let receipts = load_canonical(&file)?;
            let bundle = slides_with(&receipts, &cfg.options(&overrides));
            match cfg.format(&overrides) {
                OutputFormat::Json => print_json(&bundle)?,
                OutputFormat::Text => {
                    print!("{}", render::slides_text(&bundle).context("render slides")?)
                }
            }
        }

        Command::Normalize { file } => {
            let receipts = load_canonical(&file)?;
            print_json(&receipts)?;
        }

        Command::Items {
            file,
            strip_organic,
        } => {
            let overrides = Overrides {
                strip_organic,
                ..Default::default()
            };
            let cfg = config::load_config()?;
            let receipts = load_canonical(&file)?;
            let bundle = aggregate_with(&receipts, &cfg.options(&overrides));
            export::write_items_csv(&bundle.item_stats, std::io::stdout().lock())
                .context("write items csv")?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

/// Read an export and normalize it. Non-array input is rejected here.
fn load_canonical(path: &Path) -> Result<Vec<Receipt>> {
    if !path.exists() {
        bail!("Receipt export not found: {}", path.display());
    }
    let raw = load_receipts(path).with_context(|| format!("parsing {}", path.display()))?;
    let receipts = normalize(&raw);
    info!(
        receipts = receipts.len(),
        items = receipts.iter().map(Receipt::item_count).sum::<f64>(),
        file = %path.display(),
        "loaded receipt export"
    );
    Ok(receipts)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}
