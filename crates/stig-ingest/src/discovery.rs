//! Data source discovery and revision fallback.
//!
//! A data directory holds revision-named dataset exports. A run needs the
//! controls catalog and the CCI mapping for one revision; the comparison
//! dataset is optional. Resolution never prompts: either the files are
//! there, or the run fails with an explicit error.

use std::path::{Path, PathBuf};

use stig_model::{Revision, SourceRole};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// File name of the optional revision comparison dataset.
pub const COMPARISON_FILE: &str = "rev4_rev5_comparison.json";

/// File name of the controls catalog export for a revision.
pub fn controls_file(revision: Revision) -> &'static str {
    match revision {
        Revision::Rev4 => "r4controls.json",
        Revision::Rev5 => "r5controls.json",
    }
}

/// File name of the CCI mapping export for a revision.
pub fn cci_file(revision: Revision) -> &'static str {
    match revision {
        Revision::Rev4 => "rev4cci.json",
        Revision::Rev5 => "rev5cci.json",
    }
}

/// Datasets backing one reconciliation run.
#[derive(Debug, Clone)]
pub struct ResolvedSources {
    /// Revision the resolved files belong to. Differs from the requested
    /// revision after fallback.
    pub revision: Revision,
    pub controls: PathBuf,
    pub ccis: PathBuf,
    /// Present only when the comparison dataset exists on disk.
    pub comparison: Option<PathBuf>,
}

/// Resolves the catalog and CCI datasets for a revision inside `data_dir`.
///
/// A revision resolves only as a complete pair: controls and CCI files from
/// the same generation. With `allow_fallback`, an incomplete requested
/// revision falls back to its legacy generation as a whole; mixing files
/// across revisions is never done. When nothing usable exists the error
/// names the first missing file of the requested revision.
pub fn resolve_sources(
    data_dir: &Path,
    requested: Revision,
    allow_fallback: bool,
) -> Result<ResolvedSources> {
    if !data_dir.is_dir() {
        return Err(IngestError::DataDirNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let mut candidates = vec![requested];
    if allow_fallback && let Some(legacy) = requested.legacy() {
        candidates.push(legacy);
    }

    for revision in candidates {
        let controls = data_dir.join(controls_file(revision));
        let ccis = data_dir.join(cci_file(revision));
        if !controls.is_file() || !ccis.is_file() {
            continue;
        }
        if revision != requested {
            warn!(
                requested = %requested,
                resolved = %revision,
                "requested revision incomplete, falling back to legacy datasets"
            );
        }
        let comparison = data_dir.join(COMPARISON_FILE);
        let comparison = comparison.is_file().then_some(comparison);
        if comparison.is_none() {
            debug!(dir = %data_dir.display(), "no revision comparison dataset present");
        }
        debug!(
            revision = %revision,
            controls = %controls.display(),
            ccis = %ccis.display(),
            "resolved data sources"
        );
        return Ok(ResolvedSources {
            revision,
            controls,
            ccis,
            comparison,
        });
    }

    let controls = data_dir.join(controls_file(requested));
    let (role, file) = if controls.is_file() {
        (SourceRole::Cci, cci_file(requested))
    } else {
        (SourceRole::Controls, controls_file(requested))
    };
    Err(IngestError::DataSourceNotFound {
        role,
        revision: requested.label().to_string(),
        dir: data_dir.to_path_buf(),
        file: file.to_string(),
    })
}
