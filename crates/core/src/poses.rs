//! Pose registry: canonical pose codes, alias spellings, gender gating and
//! the reveal levels each pose cycles through.
//!
//! The registry is built once ([`PoseRegistry::standard`]) and shared by
//! reference with the prompt compiler and the planner; nothing mutates it
//! after construction.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::Gender;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Canonical poses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pose {
    Head,
    #[serde(rename = "cas")]
    Casual,
    #[serde(rename = "uw")]
    Underwear,
    Nude,
    #[serde(rename = "bc")]
    BusinessCasual,
    #[serde(rename = "biz")]
    Business,
    Fun,
    #[serde(rename = "tl")]
    Topless,
    #[serde(rename = "ss")]
    Swimsuit,
    #[serde(rename = "s1")]
    Stripper1,
    #[serde(rename = "s2")]
    Stripper2,
    #[serde(rename = "s3")]
    Stripper3,
    #[serde(rename = "preg")]
    Pregnant,
}

impl Pose {
    /// Registry order.
    pub const ALL: [Pose; 13] = [
        Pose::Head,
        Pose::Casual,
        Pose::Underwear,
        Pose::Nude,
        Pose::BusinessCasual,
        Pose::Business,
        Pose::Fun,
        Pose::Topless,
        Pose::Swimsuit,
        Pose::Stripper1,
        Pose::Stripper2,
        Pose::Stripper3,
        Pose::Pregnant,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Pose::Head => "head",
            Pose::Casual => "cas",
            Pose::Underwear => "uw",
            Pose::Nude => "nude",
            Pose::BusinessCasual => "bc",
            Pose::Business => "biz",
            Pose::Fun => "fun",
            Pose::Topless => "tl",
            Pose::Swimsuit => "ss",
            Pose::Stripper1 => "s1",
            Pose::Stripper2 => "s2",
            Pose::Stripper3 => "s3",
            Pose::Pregnant => "preg",
        }
    }

    /// Parse a canonical code. Aliases are *not* accepted here; go through
    /// [`PoseRegistry::lookup`] for user input.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn is_headshot(self) -> bool {
        self == Pose::Head
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

/// Full-body framing shared by every standing pose phrase.
const STANDING_FRAME: &str =
    "full body, full body shot, head to toe, legs visible, feet visible, standing pose, complete figure";

/// Static description of one pose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoseSpec {
    pub pose: Pose,
    /// Alternate spellings that resolve to this pose in one hop.
    pub aliases: &'static [&'static str],
    /// Part of every character's default set.
    pub required: bool,
    /// Never rendered for male characters.
    pub female_only: bool,
    /// Only rendered when explicitly requested.
    pub on_request_only: bool,
    /// Reveal levels rendered for this pose, in variant order.
    pub reveal_variants: &'static [u8],
    pub description: &'static str,
    /// Fixed descriptive phrase inserted into the pose prompt.
    pub prompt: &'static str,
}

impl PoseSpec {
    pub fn code(&self) -> &'static str {
        self.pose.code()
    }
}

/// Optional everyday poses added to every default set after the required ones.
pub const DAILY_WEAR: [Pose; 3] = [Pose::BusinessCasual, Pose::Business, Pose::Fun];

fn standard_specs() -> Vec<PoseSpec> {
    vec![
        PoseSpec {
            pose: Pose::Head,
            aliases: &[],
            required: true,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[0],
            description: "headshot portrait",
            prompt: "close-up portrait, headshot, face centered, looking at viewer, studio lighting, \
                     beauty lighting, soft light, smooth skin, detailed eyes, catchlight in eyes, \
                     symmetrical face, both eyes visible, face in frame, no obstruction",
        },
        PoseSpec {
            pose: Pose::Casual,
            aliases: &[],
            required: true,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[0, 1, 2],
            description: "casual clothes",
            prompt: STANDING_FRAME,
        },
        PoseSpec {
            pose: Pose::Underwear,
            aliases: &[],
            required: true,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[3, 4, 5],
            description: "underwear",
            prompt: STANDING_FRAME,
        },
        PoseSpec {
            pose: Pose::Nude,
            aliases: &[],
            required: true,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[9, 10, 11],
            description: "nude",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, nude, no clothes, no outfit",
        },
        PoseSpec {
            pose: Pose::BusinessCasual,
            aliases: &["bizcas"],
            required: false,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[0, 1],
            description: "business casual",
            prompt: STANDING_FRAME,
        },
        PoseSpec {
            pose: Pose::Business,
            aliases: &["business"],
            required: false,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[0, 1],
            description: "business suit",
            prompt: STANDING_FRAME,
        },
        PoseSpec {
            pose: Pose::Fun,
            aliases: &[],
            required: false,
            female_only: false,
            on_request_only: false,
            reveal_variants: &[0, 1, 2],
            description: "fun/workout clothes",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, active pose, \
                     complete figure",
        },
        PoseSpec {
            pose: Pose::Topless,
            aliases: &[],
            required: false,
            female_only: true,
            on_request_only: false,
            reveal_variants: &[6, 7, 8],
            description: "topless",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, topless, bare chest, no shirt, no top",
        },
        PoseSpec {
            pose: Pose::Swimsuit,
            aliases: &[],
            required: false,
            female_only: true,
            on_request_only: false,
            reveal_variants: &[2, 3, 4],
            description: "swimsuit",
            prompt: STANDING_FRAME,
        },
        PoseSpec {
            pose: Pose::Stripper1,
            aliases: &["strip1"],
            required: false,
            female_only: true,
            on_request_only: false,
            reveal_variants: &[1, 2, 3],
            description: "stripper outfit 1",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, sexy, seductive",
        },
        PoseSpec {
            pose: Pose::Stripper2,
            aliases: &["strip2"],
            required: false,
            female_only: true,
            on_request_only: false,
            reveal_variants: &[3, 4, 5],
            description: "stripper outfit 2",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, sexy, seductive",
        },
        PoseSpec {
            pose: Pose::Stripper3,
            aliases: &["strip3"],
            required: false,
            female_only: true,
            on_request_only: false,
            reveal_variants: &[5, 6, 7],
            description: "stripper outfit 3",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, sexy, seductive",
        },
        PoseSpec {
            pose: Pose::Pregnant,
            aliases: &[],
            required: false,
            female_only: true,
            on_request_only: true,
            reveal_variants: &[1, 3, 6],
            description: "pregnant",
            prompt: "full body, full body shot, head to toe, legs visible, feet visible, standing pose, \
                     complete figure, pregnant, visible baby bump",
        },
    ]
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Read-only pose registry.
#[derive(Debug, Clone)]
pub struct PoseRegistry {
    specs: Vec<PoseSpec>,
    aliases: HashMap<&'static str, Pose>,
}

impl PoseRegistry {
    /// The built-in registry used by the generator.
    pub fn standard() -> Self {
        Self::from_specs(standard_specs())
    }

    /// Build a registry from explicit specs. Later specs win on duplicate
    /// pose or alias codes.
    pub fn from_specs(specs: Vec<PoseSpec>) -> Self {
        let aliases = specs
            .iter()
            .flat_map(|spec| spec.aliases.iter().map(move |alias| (*alias, spec.pose)))
            .collect();
        Self { specs, aliases }
    }

    /// Map an alias to its canonical code. Anything that is not an alias,
    /// including unregistered codes, is returned unchanged.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        match self.aliases.get(code) {
            Some(pose) => pose.code(),
            None => code,
        }
    }

    /// Resolve a user-supplied pose code (canonical or alias) to a
    /// registered pose.
    pub fn lookup(&self, code: &str) -> Result<Pose, CoreError> {
        self.spec_of(self.resolve(code)).map(|spec| spec.pose)
    }

    /// Registry entry for a canonical code.
    pub fn spec_of(&self, canonical_code: &str) -> Result<&PoseSpec, CoreError> {
        self.specs
            .iter()
            .find(|spec| spec.code() == canonical_code)
            .ok_or_else(|| CoreError::UnknownPose(canonical_code.to_string()))
    }

    /// Registry entry for a typed pose.
    pub fn spec(&self, pose: Pose) -> Result<&PoseSpec, CoreError> {
        self.spec_of(pose.code())
    }

    /// All registered specs in registry order.
    pub fn specs(&self) -> &[PoseSpec] {
        &self.specs
    }

    /// Default pose list for a character: required poses, then daily wear,
    /// then (female only) the female-only poses that are not request-only.
    pub fn default_poses_for(&self, gender: Gender) -> Vec<Pose> {
        let mut poses: Vec<Pose> = self
            .specs
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.pose)
            .collect();

        for pose in DAILY_WEAR {
            if self.spec(pose).is_ok() && !poses.contains(&pose) {
                poses.push(pose);
            }
        }

        if gender == Gender::Female {
            poses.extend(
                self.specs
                    .iter()
                    .filter(|spec| spec.female_only && !spec.on_request_only && !spec.required)
                    .map(|spec| spec.pose),
            );
        }

        poses
    }
}

impl Default for PoseRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_pose_has_exactly_one_spec() {
        let registry = PoseRegistry::standard();
        for pose in Pose::ALL {
            let count = registry.specs().iter().filter(|s| s.pose == pose).count();
            assert_eq!(count, 1, "pose {pose} should be registered once");
        }
    }

    #[test]
    fn aliases_resolve_in_one_hop() {
        let registry = PoseRegistry::standard();
        assert_eq!(registry.resolve("business"), "biz");
        assert_eq!(registry.resolve("bizcas"), "bc");
        assert_eq!(registry.resolve("strip1"), "s1");
        assert_eq!(registry.resolve("strip2"), "s2");
        assert_eq!(registry.resolve("strip3"), "s3");
    }

    #[test]
    fn resolve_leaves_canonical_and_unknown_codes_alone() {
        let registry = PoseRegistry::standard();
        assert_eq!(registry.resolve("cas"), "cas");
        assert_eq!(registry.resolve("moonwalk"), "moonwalk");
    }

    #[test]
    fn resolve_is_idempotent() {
        let registry = PoseRegistry::standard();
        let codes = Pose::ALL
            .iter()
            .map(|p| p.code())
            .chain(["business", "bizcas", "strip1", "strip2", "strip3", "moonwalk"]);
        for code in codes {
            let once = registry.resolve(code);
            assert_eq!(registry.resolve(once), once);
        }
    }

    #[test]
    fn spec_of_unknown_code_fails() {
        let registry = PoseRegistry::standard();
        assert_matches!(
            registry.spec_of("moonwalk"),
            Err(CoreError::UnknownPose(code)) if code == "moonwalk"
        );
        // Aliases are not canonical codes.
        assert_matches!(registry.spec_of("business"), Err(CoreError::UnknownPose(_)));
    }

    #[test]
    fn lookup_accepts_aliases() {
        let registry = PoseRegistry::standard();
        assert_eq!(registry.lookup("strip2").unwrap(), Pose::Stripper2);
        assert_eq!(registry.lookup("nude").unwrap(), Pose::Nude);
    }

    #[test]
    fn male_defaults_have_no_female_only_poses() {
        let registry = PoseRegistry::standard();
        let poses = registry.default_poses_for(Gender::Male);
        assert_eq!(
            poses,
            vec![
                Pose::Head,
                Pose::Casual,
                Pose::Underwear,
                Pose::Nude,
                Pose::BusinessCasual,
                Pose::Business,
                Pose::Fun,
            ]
        );
    }

    #[test]
    fn female_defaults_append_female_only_poses() {
        let registry = PoseRegistry::standard();
        let poses = registry.default_poses_for(Gender::Female);
        assert_eq!(&poses[..7], &registry.default_poses_for(Gender::Male)[..]);
        assert_eq!(
            &poses[7..],
            &[
                Pose::Topless,
                Pose::Swimsuit,
                Pose::Stripper1,
                Pose::Stripper2,
                Pose::Stripper3,
            ]
        );
        assert!(!poses.contains(&Pose::Pregnant));
    }

    #[test]
    fn pose_codes_round_trip_through_serde() {
        let json = serde_json::to_string(&Pose::BusinessCasual).unwrap();
        assert_eq!(json, "\"bc\"");
        let parsed: Pose = serde_json::from_str("\"preg\"").unwrap();
        assert_eq!(parsed, Pose::Pregnant);
    }

    #[test]
    fn pose_framing_names_no_anatomy() {
        let registry = PoseRegistry::standard();
        for spec in registry.specs() {
            for term in ["breast", "nipple", "genital", "exposed", "naked"] {
                assert!(
                    !spec.prompt.contains(term),
                    "{} framing contains '{term}'",
                    spec.code()
                );
            }
        }
    }
}
