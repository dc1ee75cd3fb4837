//! Trait code to prompt phrase tables.
//!
//! Each table is a pure `code -> phrase` mapping. `None` means "this code
//! contributes nothing"; the compiler decides whether that axis then falls
//! back to a neutral phrase or is simply left out.

use crate::attributes::{Ethnicity, Gender};

// ---------------------------------------------------------------------------
// Neutral fallbacks for the core axes
// ---------------------------------------------------------------------------

pub const FALLBACK_AGE: &str = "adult";
pub const FALLBACK_BODY_SHAPE: &str = "normal body type, average build";
pub const FALLBACK_HAIR_COLOR: &str = "brown hair";
pub const FALLBACK_HAIR_LENGTH: &str = "medium length hair";

// ---------------------------------------------------------------------------
// Required traits
// ---------------------------------------------------------------------------

pub fn gender(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "beautiful adult woman, female",
        Gender::Male => "handsome adult man, male",
    }
}

/// Age band phrases. Band 0 is the youngest band and is still an adult.
pub fn age(age_group: u8) -> Option<&'static str> {
    match age_group {
        0 => Some("young adult, 20 years old"),
        1 => Some("young adult, 23 years old"),
        2 => Some("adult, 28 years old"),
        3 => Some("adult, 35 years old"),
        4 => Some("middle-aged, 45 years old"),
        5 => Some("mature, 55 years old"),
        _ => None,
    }
}

pub fn ethnicity(ethnicity: Ethnicity) -> &'static str {
    match ethnicity {
        Ethnicity::White => "caucasian, white skin",
        Ethnicity::Black => "african american, dark skin",
        Ethnicity::Hispanic => "hispanic, latin, medium skin tone",
        Ethnicity::Asian => "asian, light skin",
        Ethnicity::MiddleEastern => "middle eastern, medium skin tone",
    }
}

// ---------------------------------------------------------------------------
// Physical traits
// ---------------------------------------------------------------------------

pub fn body_shape(code: &str) -> Option<&'static str> {
    match code {
        "s" => Some("slim body, skinny"),
        "n" => Some("normal body type, average build"),
        "c" => Some("curvy body, voluptuous"),
        "f" => Some("fit body, athletic, muscular"),
        _ => None,
    }
}

/// Only non-default heights are described.
pub fn height(code: &str) -> Option<&'static str> {
    match code {
        "t" => Some("tall"),
        "s" => Some("short stature"),
        _ => None,
    }
}

/// Only non-default hip sizes are described.
pub fn hips(code: &str) -> Option<&'static str> {
    match code {
        "s" => Some("narrow hips"),
        "l" => Some("wide hips"),
        _ => None,
    }
}

/// Only non-default skin tones are described; ethnicity already implies one.
pub fn skin_tone(code: &str) -> Option<&'static str> {
    match code {
        "m" => Some("tanned skin"),
        "d" => Some("deep skin tone"),
        _ => None,
    }
}

/// Bust phrasing for women, muscularity phrasing for men. The default
/// size `m` is not described.
pub fn size(code: &str, gender: Gender) -> Option<&'static str> {
    match (gender, code) {
        (Gender::Female, "s") => Some("small breasts"),
        (Gender::Female, "l") => Some("large breasts, big bust"),
        (Gender::Female, "h") => Some("huge breasts, very large bust"),
        (Gender::Female, "x") => Some("extra huge breasts, gigantic bust"),
        (Gender::Male, "s") => Some("slim build, lean"),
        (Gender::Male, "l") => Some("athletic build, muscular"),
        (Gender::Male, "h") => Some("very muscular, strong build"),
        (Gender::Male, "x") => Some("extremely muscular, bodybuilder"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Hair and face
// ---------------------------------------------------------------------------

pub fn hair_color(code: &str) -> Option<&'static str> {
    match code {
        "l" => Some("blonde hair, light hair"),
        "m" => Some("brown hair, medium hair color"),
        "d" => Some("dark hair, black hair"),
        _ => None,
    }
}

pub fn hair_length(code: &str) -> Option<&'static str> {
    match code {
        "b" => Some("bald, no hair"),
        "s" => Some("short hair"),
        "m" => Some("medium length hair"),
        "l" => Some("long hair"),
        _ => None,
    }
}

pub fn hair_style(code: &str) -> Option<&'static str> {
    match code {
        "n" => Some("natural hair"),
        "s" => Some("straight hair"),
        "c" => Some("curly hair, curls"),
        "w" => Some("wavy hair, waves"),
        _ => None,
    }
}

/// The default eye color `m` is not described.
pub fn eye_color(code: &str) -> Option<&'static str> {
    match code {
        "l" => Some("light eyes, blue eyes"),
        "d" => Some("dark eyes, brown eyes"),
        _ => None,
    }
}

pub fn expression(code: &str) -> Option<&'static str> {
    match code {
        "n" => Some("neutral expression"),
        "s" => Some("slight smile, smiling"),
        "h" => Some("happy, joyful expression"),
        "f" => Some("flirty, seductive expression"),
        _ => None,
    }
}

pub fn facial_hair(code: &str) -> Option<&'static str> {
    match code {
        "m" => Some("mustache"),
        "b" => Some("beard, facial hair"),
        "f" => Some("full beard, heavy facial hair"),
        _ => None,
    }
}

pub fn makeup(code: &str) -> Option<&'static str> {
    match code {
        "l" => Some("light makeup, subtle"),
        "m" => Some("makeup, cosmetics"),
        "h" => Some("heavy makeup, glamorous"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Body art and style
// ---------------------------------------------------------------------------

pub fn tattoos(code: &str) -> Option<&'static str> {
    match code {
        "s" => Some("small tattoo"),
        "m" => Some("tattoos, body art"),
        "l" => Some("many tattoos, heavily tattooed"),
        _ => None,
    }
}

pub fn piercings(code: &str) -> Option<&'static str> {
    match code {
        "e" => Some("ear piercings"),
        "o" => Some("nose piercing"),
        "m" => Some("multiple piercings, facial piercings"),
        _ => None,
    }
}

/// The default style `c` (casual) is not described.
pub fn clothing_style(code: &str) -> Option<&'static str> {
    match code {
        "e" => Some("elegant style, refined"),
        "g" => Some("gothic style, dark aesthetic"),
        "s" => Some("sporty style, athletic wear"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_age_band_is_an_adult() {
        for band in 0..=5 {
            let phrase = age(band).unwrap();
            assert!(phrase.contains("adult") || phrase.contains("aged") || phrase.contains("mature"));
            assert!(!phrase.contains("teen"));
        }
        assert_eq!(age(6), None);
    }

    #[test]
    fn default_size_is_not_described() {
        assert_eq!(size("m", Gender::Female), None);
        assert_eq!(size("m", Gender::Male), None);
    }

    #[test]
    fn size_phrasing_branches_on_gender() {
        assert!(size("l", Gender::Female).unwrap().contains("breasts"));
        assert!(size("l", Gender::Male).unwrap().contains("muscular"));
    }
}
