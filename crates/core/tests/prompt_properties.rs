//! Integration tests for the prompt compiler, wardrobe tables and filename
//! contract, exercised through the public crate API only.

use scw_core::attributes::{CharacterAttributes, Ethnicity, Gender};
use scw_core::identity::{gender_of_id, seed_for, CharacterIdentity};
use scw_core::naming::{filename, parse_filename, ParsedFilename};
use scw_core::plan::plan_character;
use scw_core::poses::{Pose, PoseRegistry};
use scw_core::prompt::{PromptCompiler, FEMALE_ANATOMY, MALE_ANATOMY};

const GENDERS: [Gender; 2] = [Gender::Female, Gender::Male];

fn terms(list: &str) -> Vec<&str> {
    list.split(", ").collect()
}

// ---------------------------------------------------------------------------
// Test: clothing coverage
// ---------------------------------------------------------------------------

/// Every declared reveal level of every pose has a non-empty clothing
/// description for both genders.
#[test]
fn clothing_description_covers_every_declared_variant() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);

    for spec in registry.specs() {
        for &level in spec.reveal_variants {
            for gender in GENDERS {
                let description = compiler
                    .clothing_description(spec.code(), level, gender)
                    .expect("registered pose");
                assert!(
                    !description.trim().is_empty(),
                    "{} z{level} {gender} has no clothing",
                    spec.code()
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test: negative prompt anatomy
// ---------------------------------------------------------------------------

/// Non-nude poses exclude only the opposite sex's anatomy.
#[test]
fn negative_prompt_excludes_only_opposite_anatomy() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);

    for pose in Pose::ALL.into_iter().filter(|p| *p != Pose::Nude) {
        let female = compiler
            .generate_negative_prompt(pose.code(), Gender::Female)
            .unwrap();
        let male = compiler
            .generate_negative_prompt(pose.code(), Gender::Male)
            .unwrap();

        for term in terms(MALE_ANATOMY) {
            assert!(female.contains(term), "{pose}: female negative lacks {term}");
        }
        for term in terms(FEMALE_ANATOMY) {
            assert!(!female.contains(term), "{pose}: female negative has {term}");
            assert!(male.contains(term), "{pose}: male negative lacks {term}");
        }
        for term in ["penis", "testicles", "scrotum"] {
            assert!(!male.contains(term), "{pose}: male negative has {term}");
        }
    }
}

/// The negative prompt is defined for every registered pose and gender.
#[test]
fn negative_prompt_is_total() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);

    for spec in registry.specs() {
        for alias in spec.aliases.iter().copied().chain([spec.code()]) {
            for gender in GENDERS {
                let prompt = compiler.generate_negative_prompt(alias, gender).unwrap();
                assert!(!prompt.is_empty());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test: base prompt shape
// ---------------------------------------------------------------------------

/// No attribute combination produces empty segments in the base prompt.
#[test]
fn base_prompt_never_has_empty_segments() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);

    for gender in GENDERS {
        for age in 0..=5 {
            for ethnicity in Ethnicity::ALL {
                for code in ["n", "m", "x", "?", ""] {
                    let attrs = CharacterAttributes {
                        body_shape: code.into(),
                        hair_style: code.into(),
                        facial_hair: code.into(),
                        makeup: code.into(),
                        tattoos: code.into(),
                        breast_penis_size: code.into(),
                        clothing_style: code.into(),
                        ..CharacterAttributes::new(gender, age, ethnicity).unwrap()
                    };
                    let prompt = compiler.build_base_prompt(&attrs);
                    assert!(prompt.split(", ").all(|part| !part.trim().is_empty()), "{prompt}");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Test: end to end
// ---------------------------------------------------------------------------

/// Youngest-band slim white female: base prompt phrases and headshot name.
#[test]
fn slim_young_adult_female_end_to_end() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);
    let attrs = CharacterAttributes {
        body_shape: "s".into(),
        breast_penis_size: "s".into(),
        ..CharacterAttributes::new(Gender::Female, 0, Ethnicity::White).unwrap()
    };

    let base = compiler.build_base_prompt(&attrs);
    for phrase in ["female", "young adult, 20 years old", "caucasian", "slim body", "small breasts"] {
        assert!(base.contains(phrase), "missing '{phrase}' in {base}");
    }

    let identity = CharacterIdentity::generate("custom", attrs.gender);
    assert_eq!(gender_of_id(&identity.char_id), Some(Gender::Female));

    let name = filename("custom", &attrs, &identity.char_id, "head", 0);
    assert_eq!(name, format!("custom-{}-f0w-msmsl-mmm-u-head.png", identity.char_id));
    assert!(name.contains("-f0w-"));

    let parsed = parse_filename(&name).unwrap();
    assert!(matches!(
        parsed,
        ParsedFilename::Headshot { ref required_code, .. } if required_code == "f0w"
    ));
}

/// Every filename in a full plan parses back to its own ID and mod key.
#[test]
fn planned_filenames_round_trip_through_parser() {
    let registry = PoseRegistry::standard();
    let compiler = PromptCompiler::new(&registry);
    let attrs = CharacterAttributes::new(Gender::Female, 3, Ethnicity::Black).unwrap();
    let identity = CharacterIdentity {
        char_id: "00042".into(),
        seed: seed_for("custom", "00042"),
    };

    let plan = plan_character(&compiler, &attrs, &identity, "custom", None).unwrap();
    assert_eq!(plan.jobs.len(), 32);
    assert_eq!(plan.seed, 370_689_880);

    for job in &plan.jobs {
        let parsed = parse_filename(&job.filename).unwrap();
        assert_eq!(parsed.char_id(), "00042");
        assert_eq!(parsed.mod_key(), "custom");
        assert_eq!(parsed.is_headshot(), job.pose == Pose::Head);
    }
}
