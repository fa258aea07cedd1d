//! Tabular output of personified games.
//!
//! Columns are [`PersonifiedGameHeader::COLUMNS`] in declaration order; the
//! header row is written even when there are no games. Absent values are
//! empty cells (CSV/TSV) or `null` (JSON Lines).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::chess::PersonifiedGameHeader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    JsonLines,
}

impl OutputFormat {
    fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::JsonLines => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write error: {0}")]
    Io(#[from] io::Error),
}

pub fn write_games<W: Write>(
    games: &[PersonifiedGameHeader],
    writer: W,
    format: OutputFormat,
) -> Result<(), ExportError> {
    match format.delimiter() {
        Some(delimiter) => write_delimited(games, writer, delimiter),
        None => write_json_lines(games, writer),
    }
}

fn write_delimited<W: Write>(
    games: &[PersonifiedGameHeader],
    writer: W,
    delimiter: u8,
) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(PersonifiedGameHeader::COLUMNS)?;
    for game in games {
        writer.serialize(game)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json_lines<W: Write>(
    games: &[PersonifiedGameHeader],
    mut writer: W,
) -> Result<(), ExportError> {
    for game in games {
        serde_json::to_writer(&mut writer, game)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes to `path`, creating missing parent directories.
pub fn write_games_to_path(
    games: &[PersonifiedGameHeader],
    path: &Path,
    format: OutputFormat,
) -> Result<(), ExportError> {
    let create_error = |source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(create_error)?;
    }
    let file = File::create(path).map_err(create_error)?;

    write_games(games, BufWriter::new(file), format)?;
    info!(path = %path.display(), games = games.len(), "wrote games");
    Ok(())
}
