//! Auth log reading, parsing and usage indexing.
//!
//! The pipeline: [`rotation`] resolves and decodes rotated log files into a
//! chronological line stream, [`parser`] turns matching lines into
//! [`event::AuthEvent`]s, and [`usage::UsageIndex`] reduces them to a latest
//! accepted-use timestamp per key fingerprint.

pub mod event;
pub mod parser;
pub mod rotation;
pub mod usage;
