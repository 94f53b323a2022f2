//! Level list loading.
//!
//! Level data arrives either as a JSON object mapping level name to an array
//! of identifier strings, or as a CSV whose columns are level names and whose
//! rows hold identifiers. Both forms preserve source order: downstream
//! reports render levels and controls in exactly the order they were listed.
//! Identifiers are kept raw here; normalization happens during
//! reconciliation.

use std::path::Path;

use serde::de::{MapAccess, Visitor};
use stig_model::{Level, LevelMap};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// The built-in defense level lists used when no level input is supplied.
pub fn builtin_level_map() -> LevelMap {
    let mut map = LevelMap::new();
    map.push(level(
        "DL-1 DODIN",
        &["AT-01", "AT-02", "AT-02(01)", "AT-02(02)", "CM-10(01)"],
    ));
    map.push(level(
        "DL-2 MCEN",
        &["AC-04", "AC-04(01)", "AC-04(02)", "AC-04(03)", "AC-04(04)"],
    ));
    map.push(level(
        "DL-3 MITSC/IPN/ISN/Data Center",
        &["AC-19(04)", "AC-20(02)", "AC-23", "AP-01", "AP-02"],
    ));
    map.push(level(
        "DL-4",
        &["PE-02", "PE-02(01)", "PE-02(02)", "PE-02(03)", "PE-03"],
    ));
    map.push(level(
        "DL-5 System HW/SW/OS",
        &["AC-06(08)", "AC-06(10)", "AC-07", "AC-07(02)", "AC-08"],
    ));
    map.push(level(
        "DL-6 Application",
        &["AC-01", "AC-02", "AC-02(01)", "AC-02(02)", "AC-02(03)"],
    ));
    map
}

fn level(name: &str, controls: &[&str]) -> Level {
    Level::new(name, controls.iter().map(|c| (*c).to_string()).collect())
}

/// Loads a level map from a file, choosing the parser by extension.
pub fn load_level_map(path: &Path) -> Result<LevelMap> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let map = match extension.as_deref() {
        Some("json") => level_map_from_json(path)?,
        Some("csv") => level_map_from_csv(path)?,
        _ => {
            return Err(IngestError::UnsupportedLevelFormat {
                path: path.to_path_buf(),
            });
        }
    };

    if map.is_empty() {
        return Err(IngestError::EmptyLevels {
            path: path.to_path_buf(),
        });
    }
    debug!(
        path = %path.display(),
        levels = map.len(),
        controls = map.total_controls(),
        "loaded level map"
    );
    Ok(map)
}

/// JSON form: `{"DL-1 DODIN": ["AC-1", ...], ...}`.
///
/// Deserialized through a map visitor so level order follows the document,
/// not key sort order. Empty identifier strings are dropped.
fn level_map_from_json(path: &Path) -> Result<LevelMap> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let OrderedLevels(levels) =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::json(path, e))?;
    Ok(LevelMap { levels })
}

struct OrderedLevels(Vec<Level>);

impl<'de> serde::Deserialize<'de> for OrderedLevels {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct OrderedLevelsVisitor;

        impl<'de> Visitor<'de> for OrderedLevelsVisitor {
            type Value = OrderedLevels;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a map of level name to identifier list")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut levels = Vec::new();
                while let Some((name, controls)) = access.next_entry::<String, Vec<String>>()? {
                    let controls = controls.into_iter().filter(|c| !c.is_empty()).collect();
                    levels.push(Level::new(name, controls));
                }
                Ok(OrderedLevels(levels))
            }
        }

        deserializer.deserialize_map(OrderedLevelsVisitor)
    }
}

/// CSV form: header row of level names, each column listing that level's
/// identifiers. Rows may be ragged; blank cells are skipped.
fn level_map_from_csv(path: &Path) -> Result<LevelMap> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .clone();

    let mut levels: Vec<Level> = Vec::new();
    let mut columns: Vec<Option<usize>> = Vec::new();
    for (index, name) in headers.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() {
            warn!(path = %path.display(), column = index, "skipping unnamed level column");
            columns.push(None);
            continue;
        }
        columns.push(Some(levels.len()));
        levels.push(Level::new(name, Vec::new()));
    }

    for row in reader.records() {
        let row = row.map_err(|e| IngestError::csv(path, &e))?;
        for (index, cell) in row.iter().enumerate() {
            let Some(Some(level_index)) = columns.get(index).copied() else {
                continue;
            };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            levels[level_index].controls.push(cell.to_string());
        }
    }

    Ok(LevelMap { levels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn builtin_levels_are_ordered() {
        let map = builtin_level_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map.names()[0], "DL-1 DODIN");
        assert_eq!(map.names()[5], "DL-6 Application");
        assert_eq!(map.total_controls(), 30);
    }

    #[test]
    fn json_levels_preserve_document_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "levels.json",
            r#"{"Zone B": ["AC-1", "", "AC-2"], "Zone A": ["SI-4"]}"#,
        );
        let map = load_level_map(&path).expect("load levels");
        assert_eq!(map.names(), vec!["Zone B", "Zone A"]);
        assert_eq!(map.levels[0].controls, vec!["AC-1", "AC-2"]);
    }

    #[test]
    fn csv_levels_read_columns_with_ragged_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "levels.csv",
            "DL-1 DODIN,DL-2 MCEN\nAC-1,AC-4\nAT-1,\nCM-7,AC-4(1)\n",
        );
        let map = load_level_map(&path).expect("load levels");
        assert_eq!(map.names(), vec!["DL-1 DODIN", "DL-2 MCEN"]);
        assert_eq!(map.levels[0].controls, vec!["AC-1", "AT-1", "CM-7"]);
        assert_eq!(map.levels[1].controls, vec!["AC-4", "AC-4(1)"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "levels.xlsx", "not really a workbook");
        let err = load_level_map(&path).expect_err("xlsx should be rejected");
        assert!(matches!(err, IngestError::UnsupportedLevelFormat { .. }));
    }

    #[test]
    fn empty_level_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "levels.json", "{}");
        let err = load_level_map(&path).expect_err("empty map should be rejected");
        assert!(matches!(err, IngestError::EmptyLevels { .. }));
    }
}
