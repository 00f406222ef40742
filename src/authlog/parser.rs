//! Tolerant parser for sshd auth log lines.
//!
//! Recognizes the `Accepted publickey` / `Failed publickey` sshd line shapes
//! that carry a `SHA256:` key fingerprint. Everything else in an auth log is
//! noise for our purposes: lines that do not match yield no event and no
//! error.
//!
//! Two timestamp styles are supported: the classic syslog form (`Jun 10
//! 03:04:05`, no year) and the ISO 8601 form written by newer syslog daemons.
//! Classic timestamps have their year inferred against a reference "now": the
//! current year, or the previous one when that would place the event in the
//! future (i.e. the log rotated across New Year).

use super::event::{AuthEvent, Outcome};
use chrono::{DateTime, Datelike, NaiveDateTime};
use regex::Regex;

const SYSLOG_FORMAT: &str = "%Y %b %d %H:%M:%S";

/// Parser for single auth log lines, bound to a reference "now" so year
/// inference is deterministic.
pub struct LogRecordParser {
    pattern: Regex,
    now: NaiveDateTime,
}

impl LogRecordParser {
    pub fn new(now: NaiveDateTime) -> Self {
        // Matches e.g.
        //   Jun 10 03:04:05 host sshd[123]: Accepted publickey for alice
        //     from 192.0.2.10 port 50322 ssh2: ED25519 SHA256:xxxx
        // and the same with an ISO 8601 timestamp prefix.
        let pattern = Regex::new(
            r"^(?P<ts>[A-Z][a-z]{2}\s+\d{1,2}\s\d{2}:\d{2}:\d{2}|\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)\s\S+\ssshd\[\d+\]:\s(?P<outcome>Accepted|Failed)\spublickey\sfor\s(?P<user>\S+)\sfrom\s\S+\sport\s\d+\sssh2:\s[\w-]+\s(?P<fpr>SHA256:[A-Za-z0-9+/]+)",
        )
        .expect("invalid auth log pattern");

        Self { pattern, now }
    }

    /// Attempt to extract an authentication event from one line.
    ///
    /// Returns `None` for anything unrecognized, including garbled input.
    pub fn parse(&self, line: &str) -> Option<AuthEvent> {
        let captures = self.pattern.captures(line)?;

        let timestamp = self.parse_timestamp(&captures["ts"])?;
        let outcome = match &captures["outcome"] {
            "Accepted" => Outcome::Accepted,
            "Failed" => Outcome::Failed,
            _ => Outcome::Other,
        };

        Some(AuthEvent {
            fingerprint: captures["fpr"].to_string(),
            username: captures["user"].to_string(),
            timestamp,
            outcome,
        })
    }

    fn parse_timestamp(&self, ts: &str) -> Option<NaiveDateTime> {
        if ts.as_bytes().first().is_some_and(u8::is_ascii_digit) {
            // ISO 8601, with or without a zone offset.
            if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
                return Some(dt.naive_local());
            }
            return NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").ok();
        }

        // Classic syslog timestamp without a year. Single-digit days are
        // double-spaced ("Jun  2"), so collapse runs of whitespace first.
        let normalized: String = ts.split_whitespace().collect::<Vec<_>>().join(" ");

        let current = format!("{} {normalized}", self.now.year());
        match NaiveDateTime::parse_from_str(&current, SYSLOG_FORMAT) {
            Ok(parsed) if parsed <= self.now => Some(parsed),
            // In the future with the current year (or an invalid date, e.g.
            // Feb 29 of a non-leap year): the event belongs to last year.
            _ => {
                let previous = format!("{} {normalized}", self.now.year() - 1);
                NaiveDateTime::parse_from_str(&previous, SYSLOG_FORMAT).ok()
            }
        }
    }
}
