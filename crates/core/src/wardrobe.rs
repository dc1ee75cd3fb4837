//! Clothing and footwear description tables, indexed by
//! `(canonical pose, reveal level)`.
//!
//! Lookup order for both tables:
//!
//! 1. male override (male characters only),
//! 2. the default table for the pose,
//! 3. a reveal-level-only general table (footwear only),
//! 4. a fixed generic phrase.
//!
//! The nude pose bypasses all of this and always returns [`NUDE_OUTFIT`].
//! No lookup ever returns an empty string.

use crate::attributes::Gender;
use crate::poses::Pose;

/// Fixed outfit phrase for the nude pose, footwear included.
pub const NUDE_OUTFIT: &str = "no clothing, fully nude, bare skin, no outfit, bare feet";

/// Returned when no clothing table has an entry.
pub const FALLBACK_CLOTHING: &str = "appropriate clothing";

/// Returned when no footwear table has an entry.
pub const FALLBACK_FOOTWEAR: &str = "appropriate footwear";

// ---------------------------------------------------------------------------
// Clothing
// ---------------------------------------------------------------------------

fn default_clothing(pose: Pose, level: u8) -> Option<&'static str> {
    use Pose::*;
    let phrase = match (pose, level) {
        (Casual, 0) => "blue jeans and white t-shirt, casual everyday outfit",
        (Casual, 1) => "fitted dark jeans and tight colorful top, stylish casual",
        (Casual, 2) => "short denim skirt and crop top, trendy casual showing some skin",

        (BusinessCasual, 0) => {
            "white business blouse and dark pants, conservative professional attire"
        }
        (BusinessCasual, 1) => "fitted gray blazer and pencil skirt, professional but elegant",
        (BusinessCasual, 2) => {
            "partially unbuttoned blouse and tight skirt, business casual revealing"
        }

        (Business, 0) => "dark business suit with jacket and pants, formal conservative wear",
        (Business, 1) => "fitted navy suit with short skirt, professional attractive look",
        (Business, 2) => "open suit jacket with tight blouse and mini skirt, formal revealing",

        (Fun, 0) => "sports bra and leggings, workout outfit",
        (Fun, 1) => "tank top and running shorts, athletic wear",
        (Fun, 2) => "cropped sports top and tight bike shorts, gym outfit",

        (Underwear, 3) => "matching white cotton bra and panties, classic lingerie set",
        (Underwear, 4) => "black lacy bra and panties, elegant lingerie, sheer mesh panels",
        (Underwear, 5) => "red silk lingerie set, barely covering, seductive underwear",

        (Swimsuit, 2) => "blue one-piece swimsuit, modest athletic swimming attire",
        (Swimsuit, 3) => "colorful bikini top and bottom, classic two-piece beachwear",
        (Swimsuit, 4) => "tiny string bikini, minimal coverage, revealing swimwear",

        (Topless, 6) => "topless, panties only, no top",
        (Topless, 7) => "topless, micro skirt or shorts, no bra",
        (Topless, 8) => "topless, sheer lace panties, no bra",

        (Stripper1, 1) => "sparkly sequined mini dress, fishnet stockings",
        (Stripper1, 2) => "tight mini dress with deep neckline, thigh-high stockings, garter belt",
        (Stripper1, 3) => "corset top with short skirt, fishnets, feather boa, rhinestones",

        (Stripper2, 3) => "black corset and g-string, garter belt, fishnet stockings, gloves",
        (Stripper2, 4) => "latex mini dress, thigh-high stockings, choker",
        (Stripper2, 5) => "pasties and g-string, garter belt, fishnets, feather boa, glitter",

        (Stripper3, 5) => "micro bikini top and thong, fishnets, garter belt, glitter",
        (Stripper3, 6) => "strappy lingerie harness, g-string, thigh-highs, rhinestones",
        (Stripper3, 7) => "pasties, g-string, body glitter, feather boa",

        (Pregnant, 1) => "flowing maternity dress, visible baby bump",
        (Pregnant, 3) => "maternity bra and panties, bare round belly",
        (Pregnant, 6) => "open silk robe over bare round belly, panties only",

        _ => return None,
    };
    Some(phrase)
}

fn male_clothing(pose: Pose, level: u8) -> Option<&'static str> {
    use Pose::*;
    let phrase = match (pose, level) {
        (Casual, 0) => "jeans and t-shirt, casual outfit",
        (Casual, 1) => "fitted t-shirt and jeans, casual wear",
        (Casual, 2) => "shorts and tank top, casual sportswear",

        (BusinessCasual, 0) => "button-up shirt and slacks, conservative professional",
        (BusinessCasual, 1) => "fitted shirt and slacks, business casual",
        (BusinessCasual, 2) => "open collar shirt and fitted slacks, stylish business casual",

        (Business, 0) => "business suit with tie, formal wear",
        (Business, 1) => "fitted suit, no tie, professional",
        (Business, 2) => "open jacket, fitted shirt and pants, formal",

        (Fun, 0) => "athletic t-shirt and track pants, workout outfit",
        (Fun, 1) => "sleeveless shirt and running shorts, athletic wear",
        (Fun, 2) => "shirtless, gym shorts, athletic build on display",

        (Underwear, 3) => "boxers",
        (Underwear, 4) => "briefs",
        (Underwear, 5) => "boxer briefs",

        (Swimsuit, 2) => "swim trunks",
        (Swimsuit, 3) => "board shorts",
        (Swimsuit, 4) => "speedo swim briefs",

        _ => return None,
    };
    Some(phrase)
}

/// Outfit phrase for a pose and reveal level, without footwear.
pub fn clothing_phrase(pose: Pose, level: u8, gender: Gender) -> &'static str {
    let male = match gender {
        Gender::Male => male_clothing(pose, level),
        Gender::Female => None,
    };
    male.or_else(|| default_clothing(pose, level))
        .unwrap_or_else(|| {
            tracing::debug!(pose = %pose, reveal_level = level, "No clothing entry, using fallback");
            FALLBACK_CLOTHING
        })
}

// ---------------------------------------------------------------------------
// Footwear
// ---------------------------------------------------------------------------

fn default_footwear(pose: Pose, level: u8) -> Option<&'static str> {
    use Pose::*;
    let phrase = match (pose, level) {
        (Casual, 0) => "white sneakers, cotton socks",
        (Casual, 1) => "stylish sneakers, ankle socks",
        (Casual, 2) => "fashionable boots, bare legs",

        (BusinessCasual, 0) => "black office shoes, nude pantyhose",
        (BusinessCasual, 1) => "high heels, sheer stockings",
        (BusinessCasual, 2) => "stiletto heels, lace-top stockings",

        (Business, 0) => "conservative black pumps, professional pantyhose",
        (Business, 1) => "elegant heels, nude stockings",
        (Business, 2) => "sexy high heels, seductive stockings",

        (Fun, 0) => "athletic shoes, sports socks",
        (Fun, 1) => "running shoes, ankle socks",
        (Fun, 2) => "gym shoes, athletic socks",

        (Underwear, 3) => "bare feet, no socks",
        (Underwear, 4) => "thigh-high stockings, bare feet",
        (Underwear, 5) => "sexy stockings with garters, bare feet",

        (Swimsuit, 2) => "bare feet",
        (Swimsuit, 3) => "beach sandals",
        (Swimsuit, 4) => "bare feet",

        (Topless, 6) => "high heels",
        (Topless, 7) => "stiletto heels",
        (Topless, 8) => "platform heels",

        (Stripper1, 1) => "high heels",
        (Stripper1, 2) => "stiletto heels",
        (Stripper1, 3) => "platform heels",

        (Stripper2, 3) => "platform heels",
        (Stripper2, 4) => "stiletto heels",
        (Stripper2, 5) => "platform heels, ankle strap",

        (Stripper3, 5) => "platform heels",
        (Stripper3, 6) => "stiletto heels",
        (Stripper3, 7) => "platform heels, ankle strap",

        (Pregnant, 1) => "comfortable flats",
        (Pregnant, 3) => "bare feet",
        (Pregnant, 6) => "bare feet",

        _ => return None,
    };
    Some(phrase)
}

fn male_footwear(pose: Pose, level: u8) -> Option<&'static str> {
    use Pose::*;
    match (pose, level) {
        (BusinessCasual, 0..=2) => Some("black dress shoes"),
        (Business, 0..=2) => Some("oxford dress shoes"),
        (Underwear, 3..=5) => Some("bare feet"),
        (Swimsuit, 3) => Some("flip flops"),
        (Swimsuit, 2 | 4) => Some("bare feet"),
        (Topless, 6..=8) => Some("bare feet"),
        (Stripper1, 1..=3) => Some("bare feet"),
        (Stripper2, 3..=5) => Some("bare feet"),
        (Stripper3, 5..=7) => Some("bare feet"),
        _ => None,
    }
}

/// Reveal-level-only footwear, consulted when the pose has no entry.
fn general_footwear(level: u8) -> Option<&'static str> {
    match level {
        0 => Some("modest shoes, regular socks"),
        1 => Some("stylish footwear"),
        2 => Some("fashionable shoes"),
        3 => Some("attractive footwear"),
        4 => Some("sexy shoes, stockings"),
        5 => Some("seductive footwear"),
        9..=11 => Some("bare feet"),
        _ => None,
    }
}

/// Footwear phrase for a pose and reveal level. Never empty.
pub fn footwear_phrase(pose: Pose, level: u8, gender: Gender) -> &'static str {
    let male = match gender {
        Gender::Male => male_footwear(pose, level),
        Gender::Female => None,
    };
    male.or_else(|| default_footwear(pose, level))
        .or_else(|| general_footwear(level))
        .unwrap_or(FALLBACK_FOOTWEAR)
}

// ---------------------------------------------------------------------------
// Combined
// ---------------------------------------------------------------------------

/// `"{clothing}, {footwear}"`, or [`NUDE_OUTFIT`] for the nude pose.
pub fn clothing_description(pose: Pose, level: u8, gender: Gender) -> String {
    if pose == Pose::Nude {
        return NUDE_OUTFIT.to_string();
    }
    format!(
        "{}, {}",
        clothing_phrase(pose, level, gender),
        footwear_phrase(pose, level, gender)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nude_ignores_reveal_level_and_gender() {
        for level in [0, 9, 10, 11, 42] {
            assert_eq!(clothing_description(Pose::Nude, level, Gender::Female), NUDE_OUTFIT);
            assert_eq!(clothing_description(Pose::Nude, level, Gender::Male), NUDE_OUTFIT);
        }
    }

    #[test]
    fn female_casual_combines_outfit_and_footwear() {
        assert_eq!(
            clothing_description(Pose::Casual, 0, Gender::Female),
            "blue jeans and white t-shirt, casual everyday outfit, white sneakers, cotton socks"
        );
    }

    #[test]
    fn male_override_replaces_default_entry() {
        assert_eq!(clothing_phrase(Pose::Underwear, 4, Gender::Male), "briefs");
        assert_eq!(footwear_phrase(Pose::Business, 1, Gender::Male), "oxford dress shoes");
    }

    #[test]
    fn male_without_override_uses_default_table() {
        assert_eq!(
            footwear_phrase(Pose::Casual, 1, Gender::Male),
            "stylish sneakers, ankle socks"
        );
    }

    #[test]
    fn footwear_falls_back_to_general_then_generic() {
        // No head entries at all: general table by level.
        assert_eq!(
            footwear_phrase(Pose::Head, 0, Gender::Female),
            "modest shoes, regular socks"
        );
        // Nothing anywhere.
        assert_eq!(footwear_phrase(Pose::Head, 7, Gender::Female), FALLBACK_FOOTWEAR);
    }

    #[test]
    fn unknown_reveal_level_falls_back_to_generic_clothing() {
        assert_eq!(clothing_phrase(Pose::Casual, 8, Gender::Female), FALLBACK_CLOTHING);
    }
}
