//! `authorized_keys` parsing and key identity.

pub mod parser;
pub mod types;
