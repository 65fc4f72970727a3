//! Tolerant readers for cgroup pseudo-files.
//!
//! Two file shapes cover everything the memory collector needs:
//!
//! - **Scalar files** such as `memory.current` or `memory.max`: a single
//!   value, either a base-10 integer or the literal `max` meaning unlimited.
//! - **Keyed stat files** such as `memory.stat`: one `key value` pair per
//!   line, whitespace-separated.
//!
//! cgroup files are transient by nature (a container can exit between the
//! directory walk and the read) and may be permission-restricted, so both
//! readers degrade to "unknown" instead of surfacing an error: a scalar
//! becomes `None`, a keyed file becomes an empty map. Unreadable files are
//! logged at debug, unparseable content at warn.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::num::ParseIntError;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
enum ScalarReadError {
    #[error("invalid scalar value '{value}': {source}")]
    InvalidValue {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads a single-value cgroup file.
///
/// Returns the parsed integer, or `None` when the file is missing,
/// unreadable, unparseable, or holds the literal `max` (unlimited). Callers
/// therefore never see an error from a scalar read.
pub fn read_scalar(path: &Path) -> Option<u64> {
    let mut reader = match open_reader(path) {
        Ok(reader) => reader,
        Err(err) => {
            log::debug!("failed to read {}: {err}", path.display());
            return None;
        }
    };

    match scalar_from_reader(&mut reader) {
        Ok(Some(value)) => {
            log::debug!("read {value} from {}", path.display());
            Some(value)
        }
        Ok(None) => {
            log::debug!("read 'max' (unlimited) from {}", path.display());
            None
        }
        Err(err @ ScalarReadError::InvalidValue { .. }) => {
            log::warn!("failed to parse {}: {err}", path.display());
            None
        }
        Err(err) => {
            log::debug!("failed to read {}: {err}", path.display());
            None
        }
    }
}

/// Parses a scalar cgroup file body: `Ok(None)` for the `max` sentinel,
/// `Ok(Some(_))` for an integer.
fn scalar_from_reader<R: Read>(buf: &mut R) -> Result<Option<u64>, ScalarReadError> {
    let mut content = String::new();
    buf.read_to_string(&mut content)?;
    let content = content.trim();
    if content == "max" {
        return Ok(None);
    }
    content
        .parse::<u64>()
        .map(Some)
        .map_err(|source| ScalarReadError::InvalidValue {
            value: content.to_owned(),
            source,
        })
}

/// Reads a keyed stat file such as `memory.stat` into a map.
///
/// Each well-formed line is exactly two whitespace-separated tokens,
/// `key value`, with `value` a base-10 integer; anything else is skipped
/// without affecting the rest of the file. A missing or unreadable file
/// yields an empty map, not an error.
pub fn read_keyed_stats(path: &Path) -> HashMap<String, u64> {
    let reader = match open_reader(path) {
        Ok(reader) => reader,
        Err(err) => {
            log::debug!("failed to read {}: {err}", path.display());
            return HashMap::new();
        }
    };
    keyed_stats_from_reader(reader)
}

fn keyed_stats_from_reader<R: BufRead>(reader: R) -> HashMap<String, u64> {
    let mut stats = HashMap::new();
    for line in reader.lines().map_while(Result::ok) {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let Ok(value) = value.parse::<u64>() else {
            continue;
        };
        stats.insert(key.to_owned(), value);
    }
    stats
}

fn open_reader(path: &Path) -> std::io::Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}
