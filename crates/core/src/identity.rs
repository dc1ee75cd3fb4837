//! Character identity: a gender-partitioned ID and a seed derived from it.
//!
//! The ID is drawn fresh for every generation call. The seed is a pure
//! function of `(mod_key, char_id)`, so every render of the same ID under
//! the same mod key uses the same backend seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::attributes::Gender;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Width of every character ID.
pub const CHAR_ID_WIDTH: usize = 5;

/// Male IDs occupy `[MALE_ID_START, MALE_ID_END)`.
pub const MALE_ID_START: u32 = 10_000;
pub const MALE_ID_END: u32 = 20_000;

/// Female IDs occupy `[0, FEMALE_ID_END)` minus the male band.
pub const FEMALE_ID_END: u32 = 50_000;

/// Exclusive upper bound of accepted backend seeds (`2^31 - 1`).
pub const MAX_SEED: u32 = 2_147_483_647;

/// Hex digits of the digest used for the seed.
const SEED_HEX_PREFIX: usize = 8;

/// Jitter added to the timestamp, in `[JITTER_MIN, JITTER_MAX)`.
const JITTER_MIN: u64 = 100;
const JITTER_MAX: u64 = 1_000;

/// Maximum length of a mod key.
pub const MAX_MOD_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// `(char_id, seed)` pair for one generated character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterIdentity {
    pub char_id: String,
    pub seed: u32,
}

impl CharacterIdentity {
    /// Draw a new ID for `gender` and derive its seed under `mod_key`.
    pub fn generate(mod_key: &str, gender: Gender) -> Self {
        let char_id = new_character_id(gender);
        let seed = seed_for(mod_key, &char_id);
        Self { char_id, seed }
    }
}

// ---------------------------------------------------------------------------
// Character IDs
// ---------------------------------------------------------------------------

/// New character ID from the current time in microseconds plus jitter.
///
/// Uniqueness is probabilistic only; two characters drawn in the same run
/// may share an ID.
pub fn new_character_id(gender: Gender) -> String {
    let micros = chrono::Utc::now().timestamp_micros().unsigned_abs();
    let jitter = rand::rng().random_range(JITTER_MIN..JITTER_MAX);
    character_id_from_entropy(gender, micros.wrapping_add(jitter))
}

/// Fold arbitrary entropy into the ID space for `gender`.
///
/// - Male: `10000 + e % 10000`, i.e. `[10000, 20000)`.
/// - Female: `e % 40000`, shifted past the male band, i.e.
///   `[0, 10000) ∪ [20000, 50000)`.
pub fn character_id_from_entropy(gender: Gender, entropy: u64) -> String {
    let male_span = u64::from(MALE_ID_END - MALE_ID_START);
    let value = match gender {
        Gender::Male => u64::from(MALE_ID_START) + entropy % male_span,
        Gender::Female => {
            let folded = entropy % (u64::from(FEMALE_ID_END) - male_span);
            if folded >= u64::from(MALE_ID_START) {
                folded + male_span
            } else {
                folded
            }
        }
    };
    format!("{value:0width$}", width = CHAR_ID_WIDTH)
}

/// Recover the gender an ID was drawn for. `None` if the string is not a
/// five-digit ID inside either band.
pub fn gender_of_id(char_id: &str) -> Option<Gender> {
    if char_id.len() != CHAR_ID_WIDTH || !char_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = char_id.parse().ok()?;
    if (MALE_ID_START..MALE_ID_END).contains(&value) {
        Some(Gender::Male)
    } else if value < FEMALE_ID_END {
        Some(Gender::Female)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Seeds
// ---------------------------------------------------------------------------

/// SHA-256 hex digest of the given bytes.
fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Deterministic backend seed for a character ID under a mod key.
///
/// SHA-256 over `"{mod_key}-{char_id}"`, first eight hex digits read as an
/// unsigned integer, reduced modulo [`MAX_SEED`].
pub fn seed_for(mod_key: &str, char_id: &str) -> u32 {
    let digest = sha256_hex(format!("{mod_key}-{char_id}").as_bytes());
    // A SHA-256 hex digest is always 64 lowercase hex digits.
    let prefix = u32::from_str_radix(&digest[..SEED_HEX_PREFIX], 16).unwrap_or_default();
    prefix % MAX_SEED
}

/// Validate a mod key: non-empty, at most [`MAX_MOD_KEY_LENGTH`] chars,
/// ASCII alphanumeric or `_`. Dashes would break filename parsing.
pub fn validate_mod_key(mod_key: &str) -> Result<(), CoreError> {
    if mod_key.is_empty() {
        return Err(CoreError::Validation(
            "Mod key must not be empty".to_string(),
        ));
    }
    if mod_key.len() > MAX_MOD_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Mod key exceeds maximum length of {MAX_MOD_KEY_LENGTH} characters (got {})",
            mod_key.len()
        )));
    }
    if let Some(bad) = mod_key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(CoreError::Validation(format!(
            "Mod key '{mod_key}' contains invalid character '{bad}'. Use letters, digits or '_'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
