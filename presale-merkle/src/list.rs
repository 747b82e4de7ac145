//! Line-delimited identifier lists.
//!
//! Each line's first cell (split on `,` or `;`) holds one base58 identifier.
//! Blank lines, `#` comments and an `address` header cell are skipped. Any
//! other unparseable cell fails the whole list.
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::{Identifier, WhitelistError};

pub fn parse_identifier_list(text: &str) -> Result<Vec<Identifier>, WhitelistError> {
    let mut identifiers = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cell = line.split([',', ';']).next().unwrap_or_default().trim();
        if cell.is_empty() || cell.eq_ignore_ascii_case("address") {
            continue;
        }
        let id = cell
            .parse::<Identifier>()
            .map_err(|e| WhitelistError::Line { line: i + 1, source: Box::new(e) })?;
        identifiers.push(id);
    }
    if identifiers.is_empty() {
        warn!("identifier list produced zero entries");
    }
    Ok(identifiers)
}

pub fn read_identifier_list(path: &Path) -> Result<Vec<Identifier>, WhitelistError> {
    let text = fs::read_to_string(path)
        .map_err(|source| WhitelistError::Io { path: path.to_path_buf(), source })?;
    let identifiers = parse_identifier_list(&text)?;
    info!(path = %path.display(), count = identifiers.len(), "loaded identifier list");
    Ok(identifiers)
}
