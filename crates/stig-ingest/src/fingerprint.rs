//! Source file fingerprints for run provenance.

use std::path::Path;

use sha2::Digest;
use stig_model::{SourceProvenance, SourceRole};

use crate::error::{IngestError, Result};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// SHA-256 of a file's contents, lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    Ok(sha256_hex(&bytes))
}

/// Builds the provenance record for one resolved source file.
pub fn provenance(
    role: SourceRole,
    path: &Path,
    revision: Option<&str>,
    records: usize,
) -> Result<SourceProvenance> {
    Ok(SourceProvenance {
        role,
        path: path.to_path_buf(),
        revision: revision.map(str::to_string),
        sha256: sha256_file(path)?,
        records,
    })
}
