//! lichess-export CLI.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lichess_export::chess::{CompressionMode, RawGameHeader, SpeedThresholds, read_pgn_files};
use lichess_export::export::write_games_to_path;
use lichess_export::lichess::{DateRange, ExportParams, LichessClient, PerfType};
use lichess_export::logging::init_logging;
use lichess_export::pipeline::transform_games;

mod cli;

use crate::cli::Cli;

struct Summary {
    read: usize,
    written: usize,
    skipped: usize,
}

fn main() -> ExitCode {
    // A missing .env file is fine; the token may come from the environment.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(summary) => {
            println!(
                "Done! {} of {} games have been saved to '{}' ({} skipped)",
                summary.written,
                summary.read,
                cli.output.display(),
                summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_games(cli: &Cli) -> Result<Vec<RawGameHeader>> {
    if let Some(pattern) = &cli.pgn {
        let compression = match &cli.compression {
            Some(raw) => raw.parse()?,
            None => CompressionMode::Auto,
        };
        info!(pattern, "reading local PGN");
        return read_pgn_files(pattern, compression)
            .with_context(|| format!("failed to read PGN from '{pattern}'"));
    }

    let perf_types = PerfType::parse_list(cli.perf_type.as_deref().unwrap_or_default())?;
    let range = match (&cli.start_date, &cli.end_date) {
        (Some(start), Some(end)) => Some(DateRange::from_days(start, end)?),
        _ => None,
    };
    let params = ExportParams {
        max: cli.max_games,
        rated: cli.games.as_filter(),
        perf_types,
        range,
    };

    info!(
        username = %cli.username,
        start = cli.start_date.as_deref().unwrap_or("-"),
        end = cli.end_date.as_deref().unwrap_or("-"),
        types = cli.perf_type.as_deref().unwrap_or("all"),
        "exporting games; Lichess streams roughly 30-60 games per second"
    );

    let timeout = cli.timeout_secs.map(Duration::from_secs);
    let client = LichessClient::new(cli.token.clone(), timeout)?;
    client
        .fetch_game_headers(&cli.username, &params)
        .with_context(|| format!("failed to fetch games of '{}'", cli.username))
}

fn run(cli: &Cli) -> Result<Summary> {
    let raw_games = load_games(cli)?;

    let outcome = transform_games(
        &raw_games,
        &cli.username,
        &SpeedThresholds::default(),
        cli.on_error.into(),
    )?;

    write_games_to_path(&outcome.games, &cli.output, cli.format.into())
        .with_context(|| format!("failed to write '{}'", cli.output.display()))?;

    Ok(Summary {
        read: raw_games.len(),
        written: outcome.games.len(),
        skipped: outcome.skipped.len(),
    })
}
