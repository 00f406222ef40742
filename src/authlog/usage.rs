//! Per-key usage index built from authentication events.

use super::event::{AuthEvent, Outcome};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Maps a key fingerprint to the latest timestamp among its accepted events.
///
/// Built in a single linear pass; `record` is a max-reduction, so the result
/// does not depend on event order.
#[derive(Debug, Default)]
pub struct UsageIndex {
    latest: HashMap<String, NaiveDateTime>,
    accepted: usize,
    ignored: usize,
}

impl UsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one authentication attempt. Only accepted outcomes advance the
    /// stored timestamp; anything else is counted and dropped.
    pub fn record(&mut self, identity: &str, timestamp: NaiveDateTime, outcome: Outcome) {
        match outcome {
            Outcome::Accepted => {
                self.accepted += 1;
                self.latest
                    .entry(identity.to_string())
                    .and_modify(|stored| {
                        if *stored < timestamp {
                            *stored = timestamp;
                        }
                    })
                    .or_insert(timestamp);
            }
            Outcome::Failed | Outcome::Other => self.ignored += 1,
        }
    }

    pub fn record_event(&mut self, event: &AuthEvent) {
        self.record(&event.fingerprint, event.timestamp, event.outcome);
    }

    /// Latest accepted use of the given identity, if any.
    pub fn lookup(&self, identity: &str) -> Option<NaiveDateTime> {
        self.latest.get(identity).copied()
    }

    /// Number of distinct identities with at least one accepted event.
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Accepted events recorded so far.
    pub fn accepted_count(&self) -> usize {
        self.accepted
    }

    /// Non-accepted events seen and dropped.
    pub fn ignored_count(&self) -> usize {
        self.ignored
    }
}
