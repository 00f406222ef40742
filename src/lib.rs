//! # sshkey-audit
//!
//! Command-line tool for auditing SSH `authorized_keys` usage against system
//! auth logs.
//!
//! ## Overview
//!
//! The tool correlates each public key in an `authorized_keys` file with
//! historical sshd authentication records to determine when (or whether) the
//! key was last used, then reports keys filtered by staleness. Rotated and
//! compressed log files (`auth.log`, `auth.log.1`, `auth.log.2.gz`, ...) are
//! resolved and read transparently.
//!
//! Keys and log events are joined on the OpenSSH SHA256 fingerprint: derived
//! from each key blob on one side, extracted verbatim from sshd `Accepted
//! publickey` lines on the other. A key with no matching accepted event is
//! reported as `never-used`, which is a normal state, not an error.
//!
//! ## Architecture
//!
//! - [`keys`] - `authorized_keys` parsing and key identity
//! - [`authlog`] - rotated log reading, line parsing, usage indexing
//! - [`report`] - the correlation engine producing report rows
//! - [`output`] - plain-text and JSON rendering
//! - [`commands`] - CLI subcommand implementations
//!
//! ## Example Usage
//!
//! ```bash
//! # Keys not used for at least 90 days (or never used)
//! sshkey-audit list-keys --older-than-days 90
//!
//! # Audit a specific file against archived logs, as JSON
//! sshkey-audit list-keys --file ./authorized_keys --log-dir /srv/logs --format json
//! ```
//!
//! The tool is read-only: it never modifies the key file or the logs.

pub mod authlog;
pub mod commands;
pub mod keys;
pub mod output;
pub mod report;
