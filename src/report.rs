//! Correlation of authorized keys with logged usage.
//!
//! [`correlate`] is the core of the tool: a pure function joining parsed key
//! records against the usage index, computing an age per key and applying the
//! staleness filter. Given the same inputs and the same `now` it always
//! produces the same rows, in the key file's original order.

use crate::authlog::usage::UsageIndex;
use crate::keys::types::{KeyAlgorithm, KeyRecord};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a key has any accepted use in the scanned log window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyStatus {
    Used,
    NeverUsed,
}

/// One line of the final report. Derived and ephemeral, recomputed each run.
///
/// `age_days` is present exactly when `last_used` is; both absent means no
/// matching accepted event was found (a join miss, not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub algorithm: KeyAlgorithm,
    pub blob: String,
    pub comment: Option<String>,
    pub last_used: Option<NaiveDateTime>,
    pub age_days: Option<i64>,
    pub status: KeyStatus,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.blob)?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        match self.age_days {
            Some(days) => write!(f, " # last used {days} day(s) ago"),
            None => write!(f, " # never used"),
        }
    }
}

/// Join keys against the usage index and apply the staleness filter.
///
/// Every key produces exactly one candidate row, in input order. With a
/// threshold, rows are kept when the key was never used (always considered
/// stale) or when its age in days is at least the threshold. The filter is
/// stable; no re-sorting happens.
pub fn correlate(
    keys: &[KeyRecord],
    index: &UsageIndex,
    now: NaiveDateTime,
    threshold_days: Option<u64>,
) -> Vec<ReportRow> {
    keys.iter()
        .filter_map(|key| {
            let last_used = index.lookup(&key.fingerprint);
            let age_days = last_used.map(|used| now.signed_duration_since(used).num_days());

            if let (Some(threshold), Some(age)) = (threshold_days, age_days) {
                if age < threshold as i64 {
                    return None;
                }
            }

            Some(ReportRow {
                algorithm: key.algorithm,
                blob: key.blob.clone(),
                comment: key.comment.clone(),
                last_used,
                age_days,
                status: if last_used.is_some() {
                    KeyStatus::Used
                } else {
                    KeyStatus::NeverUsed
                },
            })
        })
        .collect()
}
