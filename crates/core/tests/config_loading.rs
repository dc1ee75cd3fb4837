//! Integration tests for character config and test-character loading.

use std::fs;
use std::path::Path;

use assert_matches::assert_matches;
use scw_core::attributes::Gender;
use scw_core::error::CoreError;
use scw_core::loader::{
    list_available_configs, load_character_config, load_or_samples, load_test_characters,
    sample_characters, TestSet,
};

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

// ---------------------------------------------------------------------------
// Test: character_presets
// ---------------------------------------------------------------------------

/// Valid entries load, invalid ones are skipped without failing the file.
#[test]
fn presets_skip_invalid_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "character_config.json",
        r#"{
            "character_presets": [
                {"name": "anna", "gender": "f", "age_group": 2, "ethnicity": "w", "hair_color": "l"},
                {"name": "broken", "gender": "f", "ethnicity": "w"},
                {"name": "omar", "gender": "m", "age_group": 4, "ethnicity": "r", "facial_hair": "b"}
            ]
        }"#,
    );

    let characters = load_character_config(&path).unwrap();
    assert_eq!(characters.len(), 2);
    assert_eq!(characters[0].label(), "anna");
    assert_eq!(characters[0].hair_color, "l");
    assert_eq!(characters[1].gender, Gender::Male);
    assert_eq!(characters[1].facial_hair, "b");
}

/// Malformed JSON and a missing presets array are load errors.
#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = write(dir.path(), "a.json", "{ not json");
    let wrong_shape = write(dir.path(), "b.json", r#"{"characters": []}"#);

    assert_matches!(load_character_config(&garbage), Err(CoreError::ConfigLoad { .. }));
    assert_matches!(load_character_config(&wrong_shape), Err(CoreError::ConfigLoad { .. }));
}

/// Any load failure falls back to the built-in samples.
#[test]
fn load_or_samples_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let characters = load_or_samples(&dir.path().join("missing.json"));
    assert_eq!(characters, sample_characters());
}

// ---------------------------------------------------------------------------
// Test: test characters
// ---------------------------------------------------------------------------

/// `detailed` falls back to `diverse_characters` when absent.
#[test]
fn detailed_set_falls_back_to_diverse() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "test_characters.json",
        r#"{
            "simple_characters": [{"gender": "f", "age_group": 0, "ethnicity": "a"}],
            "diverse_characters": [
                {"gender": "m", "age_group": 1, "ethnicity": "b"},
                {"gender": "f", "age_group": 5, "ethnicity": "h"}
            ]
        }"#,
    );

    assert_eq!(load_test_characters(&path, TestSet::Simple).unwrap().len(), 1);
    assert_eq!(load_test_characters(&path, TestSet::Detailed).unwrap().len(), 2);
    assert_matches!(
        load_test_characters(&path, TestSet::Extreme),
        Err(CoreError::ConfigLoad { .. })
    );
}

// ---------------------------------------------------------------------------
// Test: config discovery
// ---------------------------------------------------------------------------

/// Only `character_config*.json` files are listed, sorted by name.
#[test]
fn lists_character_configs_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "character_config.mini.json",
        "character_config.json",
        "test_characters.json",
        "character_config.txt",
    ] {
        write(dir.path(), name, "{}");
    }

    assert_eq!(
        list_available_configs(dir.path()),
        vec!["character_config.json", "character_config.mini.json"]
    );
}

// ---------------------------------------------------------------------------
// Test: shipped configs
// ---------------------------------------------------------------------------

/// Every entry in the repository's config files is valid.
#[test]
fn shipped_configs_load_without_skips() {
    let configs = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");

    assert_eq!(load_character_config(&configs.join("character_config.json")).unwrap().len(), 3);
    assert_eq!(
        load_character_config(&configs.join("character_config.mini.json")).unwrap().len(),
        1
    );

    let tests = configs.join("test_characters.json");
    for (set, expected) in [
        (TestSet::Simple, 3),
        (TestSet::Detailed, 3),
        (TestSet::Diverse, 3),
        (TestSet::Extreme, 2),
    ] {
        assert_eq!(load_test_characters(&tests, set).unwrap().len(), expected, "{set}");
    }
}
