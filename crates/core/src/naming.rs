//! On-disk naming contract for generated character images.
//!
//! Two disjoint formats, parsed positionally by downstream game tooling:
//!
//! - headshot: `{mod}-{id}-{gender}{age}{eth}-{h}{b}{hp}{s}{sk}-{hc}{hl}{ec}-u-head.png`
//! - any other pose: `{mod}-{id}-z{reveal_level}-{pose}.png`
//!
//! Field order and the `-` separator are part of the contract.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::attributes::CharacterAttributes;
use crate::error::CoreError;

/// File extension of every generated image.
pub const IMAGE_EXTENSION: &str = "png";

/// Pose code that selects the headshot format.
pub const HEADSHOT_CODE: &str = "head";

static HEADSHOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<mod_key>[A-Za-z0-9_]+)-(?P<char_id>[A-Za-z0-9]+)-(?P<required>[fm]\d[a-z])-(?P<optional>[a-z]{5})-(?P<image>[a-z]{3})-u-head\.png$",
    )
    .expect("valid regex")
});

static POSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<mod_key>[A-Za-z0-9_]+)-(?P<char_id>[A-Za-z0-9]+)-z(?P<level>\d{1,3})-(?P<pose>[a-z0-9]+)\.png$",
    )
    .expect("valid regex")
});

/// Filename for one generated artifact.
///
/// `pose` is written as given, so an alias requested by the caller stays
/// an alias in the filename. Pure; no collision checks.
///
/// ```
/// use scw_core::attributes::{CharacterAttributes, Ethnicity, Gender};
/// use scw_core::naming::filename;
///
/// let attrs = CharacterAttributes::new(Gender::Female, 0, Ethnicity::White).unwrap();
/// assert_eq!(filename("custom", &attrs, "00042", "head", 0), "custom-00042-f0w-mnmml-mmm-u-head.png");
/// assert_eq!(filename("custom", &attrs, "00042", "uw", 4), "custom-00042-z4-uw.png");
/// ```
pub fn filename(
    mod_key: &str,
    attrs: &CharacterAttributes,
    char_id: &str,
    pose: &str,
    reveal_level: u8,
) -> String {
    if pose == HEADSHOT_CODE {
        format!(
            "{mod_key}-{char_id}-{}-{}-{}-u-{HEADSHOT_CODE}.{IMAGE_EXTENSION}",
            attrs.required_code(),
            attrs.optional_code(),
            attrs.image_code(),
        )
    } else {
        format!("{mod_key}-{char_id}-z{reveal_level}-{pose}.{IMAGE_EXTENSION}")
    }
}

/// Fields recovered from a generated filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedFilename {
    Headshot {
        mod_key: String,
        char_id: String,
        /// `{gender}{age_group}{ethnicity}`
        required_code: String,
        /// `{height}{body_shape}{hips_size}{breast_penis_size}{skin_tone}`
        optional_code: String,
        /// `{hair_color}{hair_length}{eye_color}`
        image_code: String,
    },
    Pose {
        mod_key: String,
        char_id: String,
        reveal_level: u8,
        pose: String,
    },
}

impl ParsedFilename {
    pub fn mod_key(&self) -> &str {
        match self {
            Self::Headshot { mod_key, .. } | Self::Pose { mod_key, .. } => mod_key,
        }
    }

    pub fn char_id(&self) -> &str {
        match self {
            Self::Headshot { char_id, .. } | Self::Pose { char_id, .. } => char_id,
        }
    }

    pub fn is_headshot(&self) -> bool {
        matches!(self, Self::Headshot { .. })
    }
}

/// Parse a filename produced by [`filename`]. Leading directories are not
/// accepted; pass the file name only.
pub fn parse_filename(name: &str) -> Result<ParsedFilename, CoreError> {
    if let Some(caps) = HEADSHOT_RE.captures(name) {
        return Ok(ParsedFilename::Headshot {
            mod_key: caps["mod_key"].to_string(),
            char_id: caps["char_id"].to_string(),
            required_code: caps["required"].to_string(),
            optional_code: caps["optional"].to_string(),
            image_code: caps["image"].to_string(),
        });
    }

    if let Some(caps) = POSE_RE.captures(name) {
        let reveal_level = caps["level"].parse::<u8>().map_err(|_| {
            CoreError::InvalidFilename(format!(
                "Reveal level out of range in '{name}'"
            ))
        })?;
        return Ok(ParsedFilename::Pose {
            mod_key: caps["mod_key"].to_string(),
            char_id: caps["char_id"].to_string(),
            reveal_level,
            pose: caps["pose"].to_string(),
        });
    }

    Err(CoreError::InvalidFilename(format!(
        "'{name}' matches neither the headshot nor the pose format"
    )))
}
