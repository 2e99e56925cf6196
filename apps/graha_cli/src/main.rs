mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
enum Command {
    /// Six-fold strength of the sapta grahas for a natal chart.
    Shadbala {
        /// JSON request file (`-` for stdin).
        #[arg(long, default_value = "-")]
        input: String,
    },
    /// Transit aspects, house transits and upcoming sign changes.
    Transit {
        /// JSON request file (`-` for stdin).
        #[arg(long, default_value = "-")]
        input: String,
    },
    /// Rank birth-time candidates against dated life events.
    Rectify {
        /// JSON request file (`-` for stdin), with a `reference_chart` the
        /// candidate charts are extrapolated from.
        #[arg(long, default_value = "-")]
        input: String,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Engine config file. Otherwise $GRAHA_CONFIG or configs/graha.toml,
    /// falling back to built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON response.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read request from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read request {}", input))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => graha_config::load_engine_config_from(path)?,
        None => graha_config::load_engine_config_or_default()?,
    };

    let output = match &args.command {
        Command::Shadbala { input } => commands::run_shadbala(&config, &read_input(input)?, args.pretty)?,
        Command::Transit { input } => commands::run_transit(&config, &read_input(input)?, args.pretty)?,
        Command::Rectify { input } => commands::run_rectify(&config, &read_input(input)?, args.pretty).await?,
    };
    println!("{}", output);
    Ok(())
}
