use super::types::RawGameHeader;
use super::visitor::HeaderVisitor;

use pgn_reader::Reader;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("no PGN files match '{0}'")]
    NoMatch(String),

    #[error("failed to open file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize zstd decoder for '{path}': {source}")]
    Decoder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parser-stage error: source='{source_name}'; game_index={game_index}; error={source}")]
    Parse {
        source_name: String,
        game_index: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid compression value '{0}'. Supported values: 'zstd' or omitted")]
    Compression(String),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionMode {
    /// Decide per file from the `.zst` extension.
    #[default]
    Auto,
    Plain,
    Zstd,
}

impl FromStr for CompressionMode {
    type Err = ReadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else if normalized.eq_ignore_ascii_case("none") {
            Ok(Self::Plain)
        } else {
            Err(ReadError::Compression(normalized.to_string()))
        }
    }
}

impl CompressionMode {
    fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto if path.extension().is_some_and(|ext| ext == "zst") => Self::Zstd,
            Self::Auto => Self::Plain,
            other => other,
        }
    }
}

/// Reads every game header from a PGN stream, in order.
///
/// `source_name` only labels parser errors.
pub fn read_headers<R: Read>(input: R, source_name: &str) -> Result<Vec<RawGameHeader>, ReadError> {
    // pgn-reader buffers internally, so no BufReader here.
    let mut reader = Reader::new(input);
    let mut visitor = HeaderVisitor::new();
    let mut headers = Vec::new();

    loop {
        let game_index = headers.len() + 1;
        match reader.read_game(&mut visitor) {
            Ok(Some(header)) => headers.push(header),
            Ok(None) => break,
            Err(source) => {
                return Err(ReadError::Parse {
                    source_name: source_name.to_string(),
                    game_index,
                    source,
                });
            }
        }
    }

    debug!(source = source_name, games = headers.len(), "read PGN headers");
    Ok(headers)
}

/// Expands a single path or a glob pattern (`*`, `?`) into a sorted file list.
pub fn expand_paths(pattern: &str) -> Result<Vec<PathBuf>, ReadError> {
    if !(pattern.contains('*') || pattern.contains('?')) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut paths: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|source| ReadError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(ReadError::NoMatch(pattern.to_string()));
    }
    Ok(paths)
}

pub fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match compression.resolve(path) {
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| ReadError::Decoder {
                path: path.to_path_buf(),
                source,
            }),
        _ => Ok(Box::new(file)),
    }
}

/// Reads all headers from the files matching `pattern`, file by file.
///
/// With several files an unopenable one is logged and skipped; with a single
/// file it is an error.
pub fn read_pgn_files(
    pattern: &str,
    compression: CompressionMode,
) -> Result<Vec<RawGameHeader>, ReadError> {
    let paths = expand_paths(pattern)?;
    let mut headers = Vec::new();

    for path in &paths {
        let input = match open_input_stream(path, compression) {
            Ok(input) => input,
            Err(err) if paths.len() > 1 => {
                warn!("{err}");
                continue;
            }
            Err(err) => return Err(err),
        };

        headers.extend(read_headers(input, &path.display().to_string())?);
    }

    Ok(headers)
}
