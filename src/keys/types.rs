//! Data structures for `authorized_keys` entries.
//!
//! A [`KeyRecord`] carries the parsed fields of one key line plus the derived
//! OpenSSH SHA256 fingerprint. The fingerprint is a function of the key blob
//! alone, so it is stable across comment and whitespace changes, and it is the
//! same value sshd writes into `Accepted publickey` log lines.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Public key algorithm token from the first field of a key line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[serde(rename = "ssh-rsa")]
    Rsa,
    #[serde(rename = "ssh-dss")]
    Dsa,
    #[serde(rename = "ssh-ed25519")]
    Ed25519,
    #[serde(rename = "ecdsa-sha2-nistp256")]
    EcdsaNistp256,
    #[serde(rename = "ecdsa-sha2-nistp384")]
    EcdsaNistp384,
    #[serde(rename = "ecdsa-sha2-nistp521")]
    EcdsaNistp521,
    #[serde(rename = "sk-ssh-ed25519@openssh.com")]
    SkEd25519,
    #[serde(rename = "sk-ecdsa-sha2-nistp256@openssh.com")]
    SkEcdsaNistp256,
}

impl KeyAlgorithm {
    /// Map an algorithm token to a known variant.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ssh-rsa" => Some(Self::Rsa),
            "ssh-dss" => Some(Self::Dsa),
            "ssh-ed25519" => Some(Self::Ed25519),
            "ecdsa-sha2-nistp256" => Some(Self::EcdsaNistp256),
            "ecdsa-sha2-nistp384" => Some(Self::EcdsaNistp384),
            "ecdsa-sha2-nistp521" => Some(Self::EcdsaNistp521),
            "sk-ssh-ed25519@openssh.com" => Some(Self::SkEd25519),
            "sk-ecdsa-sha2-nistp256@openssh.com" => Some(Self::SkEcdsaNistp256),
            _ => None,
        }
    }

    /// The wire token as it appears in `authorized_keys`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rsa => "ssh-rsa",
            Self::Dsa => "ssh-dss",
            Self::Ed25519 => "ssh-ed25519",
            Self::EcdsaNistp256 => "ecdsa-sha2-nistp256",
            Self::EcdsaNistp384 => "ecdsa-sha2-nistp384",
            Self::EcdsaNistp521 => "ecdsa-sha2-nistp521",
            Self::SkEd25519 => "sk-ssh-ed25519@openssh.com",
            Self::SkEcdsaNistp256 => "sk-ecdsa-sha2-nistp256@openssh.com",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a single unparseable key line.
///
/// One bad line is reported and skipped; it never aborts the whole parse.
#[derive(Debug, Error)]
pub enum KeyParseError {
    #[error("line has fewer than two fields")]
    MissingField,
    #[error("unknown key algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("key blob is not valid base64: {0}")]
    InvalidBlob(#[from] base64::DecodeError),
}

/// One parsed `authorized_keys` entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    pub algorithm: KeyAlgorithm,
    /// Base64 key blob exactly as it appeared in the file.
    pub blob: String,
    /// Trailing comment, often an identifier or email address.
    pub comment: Option<String>,
    /// Derived `SHA256:...` fingerprint. Join key against auth log events.
    pub fingerprint: String,
}

impl KeyRecord {
    /// Build a record from parsed fields, deriving the fingerprint.
    ///
    /// Fails if the blob does not decode as base64.
    pub fn new(
        algorithm: KeyAlgorithm,
        blob: &str,
        comment: Option<String>,
    ) -> Result<Self, KeyParseError> {
        let fingerprint = fingerprint(blob)?;
        Ok(Self {
            algorithm,
            blob: blob.to_string(),
            comment,
            fingerprint,
        })
    }
}

impl fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.blob)?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}

/// Compute the OpenSSH SHA256 fingerprint of a base64 key blob.
///
/// This is `SHA256:` followed by the unpadded base64 encoding of the SHA-256
/// digest of the decoded blob, matching `ssh-keygen -lf` and sshd log output.
pub fn fingerprint(blob: &str) -> Result<String, KeyParseError> {
    let raw = STANDARD.decode(blob)?;
    let digest = Sha256::digest(&raw);
    Ok(format!("SHA256:{}", STANDARD_NO_PAD.encode(digest)))
}
