//! Resolution and reading of rotated auth log files.
//!
//! A logical source (directory plus base filename, e.g. `/var/log` +
//! `auth.log`) expands into the base file and its numbered rotations
//! (`auth.log.1`, `auth.log.2.gz`, ...), each tagged with a compression
//! scheme. Rotations are visited oldest-first so the resulting line stream is
//! chronological without sorting.
//!
//! Partial availability is the normal case: a missing base file means an
//! empty stream, a gap in the numbering ends the sequence, and an unreadable
//! rotation is skipped with a warning.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Compression scheme of a rotation, resolved from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Zstd,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Self::Gzip,
            Some("zst") => Self::Zstd,
            _ => Self::None,
        }
    }

    /// Wrap a raw file in the matching decoder.
    fn decoder(self, file: File) -> Result<Box<dyn Read>> {
        match self {
            Self::None => Ok(Box::new(file)),
            Self::Gzip => Ok(Box::new(GzDecoder::new(file))),
            Self::Zstd => {
                let decoder = zstd::Decoder::new(file).context("failed to create zstd decoder")?;
                Ok(Box::new(decoder))
            }
        }
    }
}

/// One resolved rotation file, ready to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationDescriptor {
    pub path: PathBuf,
    pub compression: Compression,
}

impl RotationDescriptor {
    pub fn new(path: PathBuf) -> Self {
        let compression = Compression::from_path(&path);
        Self { path, compression }
    }

    /// Open the rotation with transparent decompression.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        let file = File::open(&self.path)
            .with_context(|| format!("failed to open log file: {}", self.path.display()))?;
        let reader = self.compression.decoder(file)?;
        Ok(Box::new(BufReader::new(reader)))
    }
}

/// Resolve a logical log source into rotation descriptors, oldest first.
///
/// Numbered rotations are probed as `<prefix>.N`, `<prefix>.N.gz` and
/// `<prefix>.N.zst`; the first missing number ends the sequence. The base
/// file, if present, comes last as the newest generation.
pub fn resolve_rotations(dir: &Path, prefix: &str) -> Vec<RotationDescriptor> {
    let mut numbered = Vec::new();

    for n in 1.. {
        let candidates = [
            dir.join(format!("{prefix}.{n}")),
            dir.join(format!("{prefix}.{n}.gz")),
            dir.join(format!("{prefix}.{n}.zst")),
        ];
        match candidates.into_iter().find(|p| p.is_file()) {
            Some(path) => numbered.push(RotationDescriptor::new(path)),
            None => break,
        }
    }

    // Highest rotation number is the oldest data.
    let mut rotations: Vec<RotationDescriptor> = numbered.into_iter().rev().collect();

    let base = dir.join(prefix);
    if base.is_file() {
        rotations.push(RotationDescriptor::new(base));
    }

    rotations
}

/// Feed every line of the resolved rotations to `visit`, oldest file first.
///
/// An unreadable or corrupt rotation is logged and skipped; the remaining
/// rotations are still processed.
pub fn scan_lines<F: FnMut(&str)>(rotations: &[RotationDescriptor], mut visit: F) {
    for rotation in rotations {
        let reader = match rotation.open() {
            Ok(reader) => reader,
            Err(err) => {
                warn!("skipping unreadable rotation {}: {err:#}", rotation.path.display());
                continue;
            }
        };

        for line in reader.lines() {
            match line {
                Ok(line) => visit(&line),
                Err(err) => {
                    warn!(
                        "read error in {}: {err}; skipping rest of this rotation",
                        rotation.path.display()
                    );
                    break;
                }
            }
        }
    }
}
