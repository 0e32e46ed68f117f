// Export discovery — finds `<person>_<category>.json` files and loads them.
//
// This is the only place that knows about filenames. It hands the analysis
// core `(person_key, category, raw JSON)` groups and nothing else.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::ingest::profile::PersonInput;
use crate::ingest::records::{Category, RawRecord};

/// One export file matched by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub person_key: String,
    pub category: Category,
    pub path: PathBuf,
}

/// All export files for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFiles {
    pub person_key: String,
    pub files: Vec<ExportFile>,
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Suffix and extension match case-insensitively; the captured person key keeps its case
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(.+?)_(followers|following|topics)\.json$").expect("static pattern is valid")
    })
}

/// Classify a file name, returning its person key and category.
pub fn classify(file_name: &str) -> Option<(String, Category)> {
    let caps = filename_pattern().captures(file_name)?;
    let person = caps.get(1)?.as_str().to_string();
    let category = Category::from_suffix(caps.get(2)?.as_str())?;
    Some((person, category))
}

/// Scan `dir` (non-recursively) and group matching files by person key.
///
/// Groups come back sorted by person key, files within a group sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PersonFiles>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory {}", dir.display()))?;

    let mut groups: BTreeMap<String, Vec<ExportFile>> = BTreeMap::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match classify(name) {
            Some((person_key, category)) => {
                debug!(file = name, person = %person_key, %category, "Matched export file");
                groups.entry(person_key.clone()).or_default().push(ExportFile {
                    person_key,
                    category,
                    path,
                });
            }
            None => debug!(file = name, "Skipping file that is not a recognised export"),
        }
    }

    Ok(groups
        .into_iter()
        .map(|(person_key, mut files)| {
            files.sort_by(|a, b| a.path.cmp(&b.path));
            PersonFiles { person_key, files }
        })
        .collect())
}

/// Read and parse one export file.
///
/// A file that can't be read or isn't valid JSON is logged and skipped: its
/// category simply contributes nothing for that person.
pub fn load_file(file: &ExportFile) -> Option<RawRecord> {
    let text = match fs::read_to_string(&file.path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %file.path.display(), error = %e, "Failed to read export file, skipping");
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(RawRecord::new(file.category, value)),
        Err(e) => {
            warn!(path = %file.path.display(), error = %e, "Export file is not valid JSON, skipping");
            None
        }
    }
}

/// Load every file of a group into the core's input shape.
pub fn load_person(group: &PersonFiles) -> PersonInput {
    let records = group.files.iter().filter_map(load_file).collect();
    PersonInput::new(group.person_key.clone(), records)
}
