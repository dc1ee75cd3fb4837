//! Character config loading.
//!
//! Two file shapes are supported:
//!
//! - character config: `{"character_presets": [ {...}, ... ]}`
//! - test characters: `{"simple_characters": [...], "detailed_characters": [...],
//!   "diverse_characters": [...], "extreme_characters": [...]}`
//!
//! Each entry is a flat attribute object (see [`CharacterAttributes`]).
//! Entries that fail validation are logged and skipped; an unreadable or
//! malformed file is a [`CoreError::ConfigLoad`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;

use crate::attributes::{CharacterAttributes, Ethnicity, Gender, UNNAMED};
use crate::error::CoreError;

/// Top-level key of a character config file.
pub const PRESETS_KEY: &str = "character_presets";

/// File name prefix of character configs listed by [`list_available_configs`].
pub const CONFIG_FILE_PREFIX: &str = "character_config";

/// Default file name of the test-character file.
pub const TEST_CHARACTERS_FILE: &str = "test_characters.json";

// ---------------------------------------------------------------------------
// Test sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestSet {
    Simple,
    Detailed,
    Diverse,
    Extreme,
}

impl TestSet {
    /// Keys tried in order; the first one present wins.
    fn keys(self) -> &'static [&'static str] {
        match self {
            TestSet::Simple => &["simple_characters"],
            TestSet::Detailed => &["detailed_characters", "diverse_characters"],
            TestSet::Diverse => &["diverse_characters", "detailed_characters"],
            TestSet::Extreme => &["extreme_characters"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestSet::Simple => "simple",
            TestSet::Detailed => "detailed",
            TestSet::Diverse => "diverse",
            TestSet::Extreme => "extreme",
        }
    }
}

impl FromStr for TestSet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TestSet::Simple),
            "detailed" => Ok(TestSet::Detailed),
            "diverse" => Ok(TestSet::Diverse),
            "extreme" => Ok(TestSet::Extreme),
            other => Err(CoreError::Validation(format!(
                "Unknown test set '{other}'. Must be one of: simple, detailed, diverse, extreme"
            ))),
        }
    }
}

impl fmt::Display for TestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn read_json(path: &Path) -> Result<Value, CoreError> {
    let load_err = |reason: String| CoreError::ConfigLoad {
        path: path.display().to_string(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| load_err(format!("invalid JSON: {e}")))
}

/// Parse every entry of a JSON array, skipping invalid ones.
fn parse_entries(entries: &[Value], source: &Path) -> Vec<CharacterAttributes> {
    entries
        .iter()
        .filter_map(|entry| match CharacterAttributes::try_from(entry.clone()) {
            Ok(attrs) => Some(attrs),
            Err(e) => {
                let name = entry.get("name").and_then(Value::as_str).unwrap_or(UNNAMED);
                tracing::warn!(
                    path = %source.display(),
                    character = name,
                    error = %e,
                    "Skipping invalid character entry"
                );
                None
            }
        })
        .collect()
}

fn array_at<'a>(doc: &'a Value, key: &str) -> Option<&'a [Value]> {
    doc.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// Load the `character_presets` array of a character config file.
pub fn load_character_config(path: &Path) -> Result<Vec<CharacterAttributes>, CoreError> {
    let doc = read_json(path)?;
    let entries = array_at(&doc, PRESETS_KEY).ok_or_else(|| CoreError::ConfigLoad {
        path: path.display().to_string(),
        reason: format!("missing '{PRESETS_KEY}' array"),
    })?;

    let characters = parse_entries(entries, path);
    tracing::info!(path = %path.display(), count = characters.len(), "Loaded character config");
    Ok(characters)
}

/// Load one named set from a test-character file.
pub fn load_test_characters(
    path: &Path,
    set: TestSet,
) -> Result<Vec<CharacterAttributes>, CoreError> {
    let doc = read_json(path)?;
    let entries = set
        .keys()
        .iter()
        .find_map(|key| array_at(&doc, key))
        .ok_or_else(|| CoreError::ConfigLoad {
            path: path.display().to_string(),
            reason: format!("no character array for test set '{set}'"),
        })?;

    let characters = parse_entries(entries, path);
    tracing::info!(
        path = %path.display(),
        test_set = %set,
        count = characters.len(),
        "Loaded test characters"
    );
    Ok(characters)
}

/// Built-in fallback characters.
pub fn sample_characters() -> Vec<CharacterAttributes> {
    vec![
        CharacterAttributes {
            height: "m".into(),
            body_shape: "s".into(),
            hips_size: "s".into(),
            breast_penis_size: "s".into(),
            hair_color: "l".into(),
            hair_length: "l".into(),
            ..CharacterAttributes::with_defaults(Gender::Female, 2, Ethnicity::White)
        }
        .with_name("sample_female_01"),
        CharacterAttributes {
            skin_tone: "m".into(),
            ..CharacterAttributes::with_defaults(Gender::Female, 1, Ethnicity::Hispanic)
        }
        .with_name("sample_female_02"),
        CharacterAttributes {
            height: "t".into(),
            body_shape: "f".into(),
            skin_tone: "m".into(),
            hair_color: "d".into(),
            hair_length: "s".into(),
            eye_color: "d".into(),
            ..CharacterAttributes::with_defaults(Gender::Male, 2, Ethnicity::MiddleEastern)
        }
        .with_name("sample_male_01"),
    ]
}

/// Load a character config, falling back to [`sample_characters`] on any
/// load failure.
pub fn load_or_samples(path: &Path) -> Vec<CharacterAttributes> {
    match load_character_config(path) {
        Ok(characters) => characters,
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to built-in sample characters");
            sample_characters()
        }
    }
}

/// Resolve a config name: absolute paths and paths with a separator are
/// used as given, bare file names are looked up in `configs_dir`.
pub fn resolve_config_path(configs_dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() || name.contains('/') || name.contains('\\') {
        path.to_path_buf()
    } else {
        configs_dir.join(name)
    }
}

/// File names of `character_config*.json` files in `configs_dir`, sorted.
/// A missing directory yields an empty list.
pub fn list_available_configs(configs_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(configs_dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(CONFIG_FILE_PREFIX) && name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn samples_are_named_and_mixed_gender() {
        let samples = sample_characters();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].label(), "sample_female_01");
        assert_eq!(samples[2].gender, Gender::Male);
        assert_eq!(samples[2].optional_code(), "tfmmm");
    }

    #[test]
    fn test_set_parsing() {
        assert_eq!("Extreme".parse::<TestSet>().unwrap(), TestSet::Extreme);
        assert_eq!(" diverse ".parse::<TestSet>().unwrap(), TestSet::Diverse);
        assert_matches!("huge".parse::<TestSet>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn resolve_bare_name_uses_configs_dir() {
        let dir = Path::new("configs");
        assert_eq!(
            resolve_config_path(dir, "character_config.json"),
            PathBuf::from("configs/character_config.json")
        );
        assert_eq!(
            resolve_config_path(dir, "other/chars.json"),
            PathBuf::from("other/chars.json")
        );
        assert_eq!(resolve_config_path(dir, "/tmp/x.json"), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn missing_file_is_config_load_error() {
        assert_matches!(
            load_character_config(Path::new("/definitely/not/here.json")),
            Err(CoreError::ConfigLoad { .. })
        );
    }

    #[test]
    fn missing_configs_dir_lists_nothing() {
        assert!(list_available_configs(Path::new("/definitely/not/here")).is_empty());
    }
}
