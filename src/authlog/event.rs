//! Authentication event extracted from one auth log line.

use chrono::NaiveDateTime;

/// Result of a public-key authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Failed,
    /// Recognized line shape with an outcome we do not classify further.
    Other,
}

/// One public-key authentication attempt from the auth log.
///
/// Timestamps are naive wall-clock values; syslog lines carry no zone, so the
/// whole pipeline compares them against a naive local "now".
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    /// `SHA256:...` key fingerprint as logged by sshd.
    pub fingerprint: String,
    pub username: String,
    pub timestamp: NaiveDateTime,
    pub outcome: Outcome,
}
