//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use lichess_export::export::OutputFormat;
use lichess_export::pipeline::ErrorPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "lichess-export",
    version,
    about = "Export a Lichess player's games, seen from that player's side, to a table"
)]
pub struct Cli {
    /// Lichess user whose games are exported.
    #[arg(long)]
    pub username: String,

    /// Comma-separated game types (e.g. "blitz,rapid"). All types when omitted.
    #[arg(long, value_name = "TYPES")]
    pub perf_type: Option<String>,

    /// Maximum number of games to export.
    #[arg(long)]
    pub max_games: Option<u32>,

    /// First day to export, YYYY-MM-DD (from 00:00:00 UTC).
    #[arg(long, requires = "end_date")]
    pub start_date: Option<String>,

    /// Last day to export, YYYY-MM-DD (until 23:59:59 UTC).
    #[arg(long, requires = "start_date")]
    pub end_date: Option<String>,

    /// Which games to request by rating mode.
    #[arg(long, value_enum, default_value_t = RatedArg::Rated)]
    pub games: RatedArg,

    /// Read games from local PGN file(s) instead of the API. Accepts a glob.
    #[arg(long, value_name = "PATTERN")]
    pub pgn: Option<String>,

    /// Compression of --pgn input ("zstd" or "none"); detected from `.zst` when omitted.
    #[arg(long, requires = "pgn")]
    pub compression: Option<String>,

    /// Output file; parent directories are created.
    #[arg(short, long, default_value = "output/games.csv")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Policy for games that fail to transform.
    #[arg(long, value_enum, default_value_t = OnErrorArg::Skip)]
    pub on_error: OnErrorArg,

    /// Lichess API token. Optional for public game exports.
    #[arg(long, env = "LICHESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Total HTTP request timeout in seconds, including the streamed download.
    /// Lichess sends roughly 30-60 games per second, so size it for the export
    /// (e.g. 300s covers about 9,000 games). No limit when omitted.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatedArg {
    Rated,
    Casual,
    All,
}

impl RatedArg {
    pub fn as_filter(self) -> Option<bool> {
        match self {
            Self::Rated => Some(true),
            Self::Casual => Some(false),
            Self::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Tsv => OutputFormat::Tsv,
            FormatArg::Jsonl => OutputFormat::JsonLines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnErrorArg {
    Abort,
    Skip,
}

impl From<OnErrorArg> for ErrorPolicy {
    fn from(value: OnErrorArg) -> Self {
        match value {
            OnErrorArg::Abort => ErrorPolicy::Abort,
            OnErrorArg::Skip => ErrorPolicy::Skip,
        }
    }
}
