//! `list-keys` command: report authorized keys by last logged use.
//!
//! Wires the pipeline together: load and parse the authorized_keys file,
//! resolve and scan the rotated auth logs into a usage index, correlate, and
//! print. The one fatal error is a missing or unreadable key file; everything
//! else degrades to warnings.

use crate::authlog::parser::LogRecordParser;
use crate::authlog::rotation::{resolve_rotations, scan_lines};
use crate::authlog::usage::UsageIndex;
use crate::keys::parser::load_keys;
use crate::output::{print_report, OutputFormat};
use crate::report::correlate;
use anyhow::Result;
use chrono::Local;
use log::info;
use std::io;
use std::path::Path;

pub fn run(
    file: &Path,
    log_dir: &Path,
    log_prefix: &str,
    older_than_days: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let keys = load_keys(file)?;
    info!("loaded {} authorized keys from {}", keys.len(), file.display());

    let now = Local::now().naive_local();
    let parser = LogRecordParser::new(now);

    let rotations = resolve_rotations(log_dir, log_prefix);
    info!(
        "resolved {} log file(s) for {}/{}",
        rotations.len(),
        log_dir.display(),
        log_prefix
    );

    let mut index = UsageIndex::new();
    scan_lines(&rotations, |line| {
        if let Some(event) = parser.parse(line) {
            index.record_event(&event);
        }
    });
    info!(
        "indexed {} distinct fingerprints from {} accepted event(s) ({} ignored)",
        index.len(),
        index.accepted_count(),
        index.ignored_count()
    );

    let rows = correlate(&keys, &index, now, older_than_days);
    info!("report contains {} of {} keys", rows.len(), keys.len());

    print_report(&mut io::stdout().lock(), &rows, format)
}
