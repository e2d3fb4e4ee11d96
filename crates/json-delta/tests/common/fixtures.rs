use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

pub const EXPECTED_FIXTURE_COUNT: usize = 3;

/// One recorded merge: inputs plus the expected outline rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub include_unchanged: bool,
    pub base: Value,
    pub delta: Option<Value>,
    pub outline: Vec<String>,
}

impl Fixture {
    pub fn expected_outline(&self) -> String {
        self.outline.iter().map(|line| format!("{line}\n")).collect()
    }
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn load_fixture(path: &Path) -> Result<Fixture, String> {
    let data = fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// All fixtures, sorted by file name.
pub fn load_fixtures() -> Result<Vec<Fixture>, String> {
    let dir = fixtures_dir();
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|e| format!("failed to list {}: {e}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths.iter().map(|p| load_fixture(p)).collect()
}
