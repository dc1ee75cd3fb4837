use std::path::{Path, PathBuf};
use std::time::Duration;

use scw_core::attributes::CharacterAttributes;
use scw_core::identity::validate_mod_key;
use scw_core::loader::{self, TestSet, TEST_CHARACTERS_FILE};

/// Errors from reading generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Generator configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// WebUI root URL (default: `http://localhost:7860`).
    pub webui_url: String,
    /// Mod key mixed into seeds and filenames (default: `custom`).
    pub mod_key: String,
    /// Parent directory of session directories.
    pub output_dir: PathBuf,
    /// Character config file, already resolved against `configs_dir`.
    pub character_config: Option<PathBuf>,
    /// Directory holding config and test-character files.
    pub configs_dir: PathBuf,
    pub test_set: Option<TestSet>,
    /// Keep only the first `count` characters.
    pub count: Option<usize>,
    /// Pose codes to render instead of each character's default set.
    pub poses: Option<Vec<String>>,
    /// Pause between backend calls.
    pub delay: Duration,
    /// Attempts per variant, at least 1.
    pub max_retries: u32,
}

const DEFAULT_WEBUI_URL: &str = "http://localhost:7860";
const DEFAULT_MOD_KEY: &str = "custom";
const DEFAULT_OUTPUT_DIR: &str = "generated_characters";
const DEFAULT_CONFIGS_DIR: &str = "configs";
const DEFAULT_DELAY_SECS: u64 = 2;
const DEFAULT_MAX_RETRIES: u32 = 3;

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `WEBUI_URL`            | `http://localhost:7860`  |
    /// | `SCW_MODKEY`           | `custom`                 |
    /// | `SCW_OUTPUT_DIR`       | `generated_characters`   |
    /// | `SCW_CHARACTER_CONFIG` | unset                    |
    /// | `SCW_CONFIGS_DIR`      | `configs`                |
    /// | `SCW_TEST_SET`         | unset                    |
    /// | `SCW_COUNT`            | unset                    |
    /// | `SCW_POSES`            | unset                    |
    /// | `SCW_DELAY_SECS`       | `2`                      |
    /// | `SCW_MAX_RETRIES`      | `3`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable
    /// source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let webui_url = get("WEBUI_URL").unwrap_or_else(|| DEFAULT_WEBUI_URL.into());

        let mod_key = get("SCW_MODKEY").unwrap_or_else(|| DEFAULT_MOD_KEY.into());
        validate_mod_key(&mod_key).map_err(|e| invalid("SCW_MODKEY", &mod_key, e))?;

        let output_dir = PathBuf::from(get("SCW_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into()));
        let configs_dir =
            PathBuf::from(get("SCW_CONFIGS_DIR").unwrap_or_else(|| DEFAULT_CONFIGS_DIR.into()));

        let character_config = get("SCW_CHARACTER_CONFIG")
            .map(|name| loader::resolve_config_path(&configs_dir, &name));

        let test_set = get("SCW_TEST_SET")
            .map(|v| v.parse::<TestSet>().map_err(|e| invalid("SCW_TEST_SET", &v, e)))
            .transpose()?;

        let count = get("SCW_COUNT")
            .map(|v| v.parse::<usize>().map_err(|e| invalid("SCW_COUNT", &v, e)))
            .transpose()?;

        let poses = get("SCW_POSES")
            .map(|v| {
                let codes = v
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>();
                if codes.is_empty() {
                    return Err(invalid("SCW_POSES", &v, "names no pose codes"));
                }
                Ok(codes)
            })
            .transpose()?;

        let delay_secs = get("SCW_DELAY_SECS")
            .map(|v| v.parse::<u64>().map_err(|e| invalid("SCW_DELAY_SECS", &v, e)))
            .transpose()?
            .unwrap_or(DEFAULT_DELAY_SECS);

        let max_retries = get("SCW_MAX_RETRIES")
            .map(|v| v.parse::<u32>().map_err(|e| invalid("SCW_MAX_RETRIES", &v, e)))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 {
            return Err(invalid("SCW_MAX_RETRIES", "0", "must be at least 1"));
        }

        Ok(Self {
            webui_url,
            mod_key,
            output_dir,
            character_config,
            configs_dir,
            test_set,
            count,
            poses,
            delay: Duration::from_secs(delay_secs),
            max_retries,
        })
    }

    /// Path of the test-character file.
    pub fn test_characters_path(&self) -> PathBuf {
        self.configs_dir.join(TEST_CHARACTERS_FILE)
    }

    /// Characters for this run.
    ///
    /// A character config wins over a test set; load failures of either
    /// fall back to the built-in samples. With neither set the list is
    /// empty. `count` truncates the result.
    pub fn select_characters(&self) -> Vec<CharacterAttributes> {
        let mut characters = if let Some(path) = &self.character_config {
            loader::load_or_samples(path)
        } else if let Some(set) = self.test_set {
            load_test_set_or_samples(&self.test_characters_path(), set)
        } else {
            Vec::new()
        };

        if let Some(count) = self.count {
            characters.truncate(count);
        }
        characters
    }
}

fn load_test_set_or_samples(path: &Path, set: TestSet) -> Vec<CharacterAttributes> {
    match loader::load_test_characters(path, set) {
        Ok(characters) => characters,
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to built-in sample characters");
            loader::sample_characters()
        }
    }
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
