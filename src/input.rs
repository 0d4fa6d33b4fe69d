//! Loading library records
//!
//! Accepts either a JSON array of records or a single record object, from a
//! file or from standard input.

use crate::error::{InputError, InputResult};
use crate::models::Library;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load records from `path`, or from stdin when `path` is `None` or `-`
pub fn load_libraries(path: Option<&Path>) -> InputResult<Vec<Library>> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_libraries(&content, &path.display().to_string())
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(InputError::Stdin)?;
            parse_libraries(&content, "<stdin>")
        }
    }
}

/// Parse records from JSON text; `origin` names the source in errors
pub fn parse_libraries(content: &str, origin: &str) -> InputResult<Vec<Library>> {
    let parse_err = |source| InputError::Parse {
        origin: origin.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(content).map_err(parse_err)?;
    let libraries = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Library>>(value).map_err(parse_err)?,
        other => vec![serde_json::from_value::<Library>(other).map_err(parse_err)?],
    };

    debug!("Loaded {} records from {}", libraries.len(), origin);
    Ok(libraries)
}

/// Parse an RFC 3339 instant, e.g. for an injected "now"
pub fn parse_timestamp(value: &str) -> InputResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| InputError::InvalidTimestamp {
            value: value.to_string(),
        })
}
