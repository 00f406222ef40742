//! Parser for the `authorized_keys` file format.
//!
//! One key per line: `<algorithm> <base64-blob> [comment]`. Full-line `#`
//! comments and blank lines are ignored. Malformed lines are logged as
//! warnings and skipped so a single bad entry never hides the rest of the
//! file.

use super::types::{KeyAlgorithm, KeyParseError, KeyRecord};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Parse an `authorized_keys` byte stream into key records, preserving file
/// order. Empty input yields an empty vector.
pub fn parse_authorized_keys<R: Read>(input: R) -> Result<Vec<KeyRecord>> {
    let reader = BufReader::new(input);
    let mut keys = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("failed to read authorized_keys line")?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_key_line(trimmed) {
            Ok(key) => {
                debug!("line {}: {} key {}", line_no + 1, key.algorithm, key.fingerprint);
                keys.push(key);
            }
            Err(err) => warn!("skipping authorized_keys line {}: {err}", line_no + 1),
        }
    }

    Ok(keys)
}

/// Load and parse an `authorized_keys` file.
///
/// A missing or unreadable file is the one fatal error in the pipeline.
pub fn load_keys(path: &Path) -> Result<Vec<KeyRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open authorized_keys file: {}", path.display()))?;
    parse_authorized_keys(file)
}

/// Split one non-blank, non-comment line into a key record.
fn parse_key_line(line: &str) -> Result<KeyRecord, KeyParseError> {
    let mut fields = line.split_whitespace();

    let token = fields.next().ok_or(KeyParseError::MissingField)?;
    let algorithm = KeyAlgorithm::from_token(token)
        .ok_or_else(|| KeyParseError::UnknownAlgorithm(token.to_string()))?;
    let blob = fields.next().ok_or(KeyParseError::MissingField)?;

    // The comment is everything after the blob and may itself contain spaces.
    let rest: Vec<&str> = fields.collect();
    let comment = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    KeyRecord::new(algorithm, blob, comment)
}
