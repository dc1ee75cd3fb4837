//! Character attribute schema.
//!
//! A [`CharacterAttributes`] record is the only input the prompt compiler
//! and filename encoder ever see about a character. Required traits
//! (`gender`, `age_group`, `ethnicity`) are strongly typed and validated at
//! construction; every optional trait is a single-letter code that is
//! accepted as-is and resolved to a phrase (or a neutral fallback) at
//! compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Youngest age band. Every band, including this one, describes an adult.
pub const MIN_AGE_GROUP: u8 = 0;

/// Oldest age band.
pub const MAX_AGE_GROUP: u8 = 5;

pub const DEFAULT_HEIGHT: &str = "m";
pub const DEFAULT_BODY_SHAPE: &str = "n";
pub const DEFAULT_HIPS_SIZE: &str = "m";
pub const DEFAULT_BREAST_PENIS_SIZE: &str = "m";
pub const DEFAULT_SKIN_TONE: &str = "l";
pub const DEFAULT_HAIR_COLOR: &str = "m";
pub const DEFAULT_HAIR_LENGTH: &str = "m";
pub const DEFAULT_EYE_COLOR: &str = "m";
pub const DEFAULT_HAIR_STYLE: &str = "n";
pub const DEFAULT_FACIAL_HAIR: &str = "n";
pub const DEFAULT_MAKEUP: &str = "n";
pub const DEFAULT_TATTOOS: &str = "n";
pub const DEFAULT_PIERCINGS: &str = "n";
pub const DEFAULT_EXPRESSION: &str = "n";
pub const DEFAULT_CLOTHING_STYLE: &str = "c";

/// The "none" code shared by facial hair, makeup, tattoos and piercings.
pub const NONE_CODE: &str = "n";

/// Label used in log and error messages when a character has no name.
pub const UNNAMED: &str = "unnamed";

// ---------------------------------------------------------------------------
// Required trait types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "m")]
    Male,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Gender::Female => "f",
            Gender::Male => "m",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "f" => Some(Gender::Female),
            "m" => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ethnicity {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
    #[serde(rename = "h")]
    Hispanic,
    #[serde(rename = "a")]
    Asian,
    #[serde(rename = "r")]
    MiddleEastern,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 5] = [
        Ethnicity::White,
        Ethnicity::Black,
        Ethnicity::Hispanic,
        Ethnicity::Asian,
        Ethnicity::MiddleEastern,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Ethnicity::White => "w",
            Ethnicity::Black => "b",
            Ethnicity::Hispanic => "h",
            Ethnicity::Asian => "a",
            Ethnicity::MiddleEastern => "r",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

impl fmt::Display for Ethnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Attribute record
// ---------------------------------------------------------------------------

/// Immutable description of one character.
///
/// Build it with [`CharacterAttributes::new`] and struct update syntax for
/// the optional traits, or deserialize it from a flat JSON object:
///
/// ```
/// use scw_core::attributes::{CharacterAttributes, Ethnicity, Gender};
///
/// let attrs = CharacterAttributes {
///     body_shape: "s".into(),
///     ..CharacterAttributes::new(Gender::Female, 2, Ethnicity::White).unwrap()
/// };
/// assert_eq!(attrs.required_code(), "f2w");
/// assert_eq!(attrs.hair_color, "m");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAttributes")]
pub struct CharacterAttributes {
    pub gender: Gender,
    pub age_group: u8,
    pub ethnicity: Ethnicity,

    pub height: String,
    pub body_shape: String,
    pub hips_size: String,
    pub breast_penis_size: String,
    pub skin_tone: String,

    pub hair_color: String,
    pub hair_length: String,
    pub eye_color: String,

    pub hair_style: String,
    /// Only rendered for male characters.
    pub facial_hair: String,
    /// Only rendered for female characters.
    pub makeup: String,
    pub tattoos: String,
    pub piercings: String,
    pub expression: String,
    pub clothing_style: String,

    /// Display label for logs and errors. Never part of identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CharacterAttributes {
    /// Create a record from the required traits, filling every optional
    /// trait with its default code.
    pub fn new(gender: Gender, age_group: u8, ethnicity: Ethnicity) -> Result<Self, CoreError> {
        validate_age_group(i64::from(age_group), UNNAMED)?;
        Ok(Self::with_defaults(gender, age_group, ethnicity))
    }

    /// Same as [`new`](Self::new) for callers that already hold a valid
    /// age band.
    pub(crate) fn with_defaults(gender: Gender, age_group: u8, ethnicity: Ethnicity) -> Self {
        Self {
            gender,
            age_group,
            ethnicity,
            height: DEFAULT_HEIGHT.to_string(),
            body_shape: DEFAULT_BODY_SHAPE.to_string(),
            hips_size: DEFAULT_HIPS_SIZE.to_string(),
            breast_penis_size: DEFAULT_BREAST_PENIS_SIZE.to_string(),
            skin_tone: DEFAULT_SKIN_TONE.to_string(),
            hair_color: DEFAULT_HAIR_COLOR.to_string(),
            hair_length: DEFAULT_HAIR_LENGTH.to_string(),
            eye_color: DEFAULT_EYE_COLOR.to_string(),
            hair_style: DEFAULT_HAIR_STYLE.to_string(),
            facial_hair: DEFAULT_FACIAL_HAIR.to_string(),
            makeup: DEFAULT_MAKEUP.to_string(),
            tattoos: DEFAULT_TATTOOS.to_string(),
            piercings: DEFAULT_PIERCINGS.to_string(),
            expression: DEFAULT_EXPRESSION.to_string(),
            clothing_style: DEFAULT_CLOTHING_STYLE.to_string(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for log and error messages.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    /// `{gender}{age_group}{ethnicity}`, e.g. `f0w`.
    pub fn required_code(&self) -> String {
        format!("{}{}{}", self.gender, self.age_group, self.ethnicity)
    }

    /// `{height}{body_shape}{hips_size}{breast_penis_size}{skin_tone}`.
    ///
    /// Always five letters: a code that is not a single lowercase letter
    /// is written as that axis's default.
    pub fn optional_code(&self) -> String {
        [
            filename_code(&self.height, DEFAULT_HEIGHT),
            filename_code(&self.body_shape, DEFAULT_BODY_SHAPE),
            filename_code(&self.hips_size, DEFAULT_HIPS_SIZE),
            filename_code(&self.breast_penis_size, DEFAULT_BREAST_PENIS_SIZE),
            filename_code(&self.skin_tone, DEFAULT_SKIN_TONE),
        ]
        .concat()
    }

    /// `{hair_color}{hair_length}{eye_color}`, always three letters.
    pub fn image_code(&self) -> String {
        [
            filename_code(&self.hair_color, DEFAULT_HAIR_COLOR),
            filename_code(&self.hair_length, DEFAULT_HAIR_LENGTH),
            filename_code(&self.eye_color, DEFAULT_EYE_COLOR),
        ]
        .concat()
    }
}

/// One positional filename letter for an optional axis.
fn filename_code<'a>(value: &'a str, default: &'a str) -> &'a str {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => value,
        _ => default,
    }
}

impl TryFrom<serde_json::Value> for CharacterAttributes {
    type Error = CoreError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let raw: RawAttributes = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Malformed character record: {e}")))?;
        Self::try_from(raw)
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Flat mapping as found in config files. Every key is optional here so
/// that a missing required field surfaces as a [`CoreError::Validation`]
/// naming the field, not as a generic serde error.
#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    gender: Option<String>,
    age_group: Option<i64>,
    ethnicity: Option<String>,
    height: Option<String>,
    body_shape: Option<String>,
    hips_size: Option<String>,
    breast_penis_size: Option<String>,
    skin_tone: Option<String>,
    hair_color: Option<String>,
    hair_length: Option<String>,
    eye_color: Option<String>,
    hair_style: Option<String>,
    facial_hair: Option<String>,
    makeup: Option<String>,
    tattoos: Option<String>,
    piercings: Option<String>,
    expression: Option<String>,
    clothing_style: Option<String>,
    name: Option<String>,
}

impl TryFrom<RawAttributes> for CharacterAttributes {
    type Error = CoreError;

    fn try_from(raw: RawAttributes) -> Result<Self, Self::Error> {
        let label = raw.name.clone().unwrap_or_else(|| UNNAMED.to_string());

        let gender_code = raw.gender.ok_or_else(|| missing("gender", &label))?;
        let gender = Gender::from_code(&gender_code).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid gender '{gender_code}' for character '{label}'. Must be one of: f, m"
            ))
        })?;

        let age_raw = raw.age_group.ok_or_else(|| missing("age_group", &label))?;
        let age_group = validate_age_group(age_raw, &label)?;

        let ethnicity_code = raw.ethnicity.ok_or_else(|| missing("ethnicity", &label))?;
        let ethnicity = Ethnicity::from_code(&ethnicity_code).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid ethnicity '{ethnicity_code}' for character '{label}'. Must be one of: w, b, h, a, r"
            ))
        })?;

        let or = |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

        Ok(Self {
            gender,
            age_group,
            ethnicity,
            height: or(raw.height, DEFAULT_HEIGHT),
            body_shape: or(raw.body_shape, DEFAULT_BODY_SHAPE),
            hips_size: or(raw.hips_size, DEFAULT_HIPS_SIZE),
            breast_penis_size: or(raw.breast_penis_size, DEFAULT_BREAST_PENIS_SIZE),
            skin_tone: or(raw.skin_tone, DEFAULT_SKIN_TONE),
            hair_color: or(raw.hair_color, DEFAULT_HAIR_COLOR),
            hair_length: or(raw.hair_length, DEFAULT_HAIR_LENGTH),
            eye_color: or(raw.eye_color, DEFAULT_EYE_COLOR),
            hair_style: or(raw.hair_style, DEFAULT_HAIR_STYLE),
            facial_hair: or(raw.facial_hair, DEFAULT_FACIAL_HAIR),
            makeup: or(raw.makeup, DEFAULT_MAKEUP),
            tattoos: or(raw.tattoos, DEFAULT_TATTOOS),
            piercings: or(raw.piercings, DEFAULT_PIERCINGS),
            expression: or(raw.expression, DEFAULT_EXPRESSION),
            clothing_style: or(raw.clothing_style, DEFAULT_CLOTHING_STYLE),
            name: raw.name,
        })
    }
}

fn missing(field: &str, label: &str) -> CoreError {
    CoreError::Validation(format!(
        "Missing required field '{field}' for character '{label}'"
    ))
}

fn validate_age_group(age: i64, label: &str) -> Result<u8, CoreError> {
    if !(i64::from(MIN_AGE_GROUP)..=i64::from(MAX_AGE_GROUP)).contains(&age) {
        return Err(CoreError::Validation(format!(
            "age_group must be between {MIN_AGE_GROUP} and {MAX_AGE_GROUP} for character '{label}' (got {age})"
        )));
    }
    Ok(age as u8)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
