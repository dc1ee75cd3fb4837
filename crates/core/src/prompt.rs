//! Prompt compiler: base character prompt, per-pose positive prompt,
//! negative prompt, and the [`PromptBundle`] that ties them together.
//!
//! The compiler borrows a [`PoseRegistry`] and holds no other state, so a
//! single instance can compile any number of characters, in any order, from
//! any number of threads.

use serde::Serialize;

use crate::attributes::{
    CharacterAttributes, Gender, DEFAULT_CLOTHING_STYLE, NONE_CODE,
};
use crate::error::CoreError;
use crate::phrases;
use crate::poses::{Pose, PoseRegistry};
use crate::wardrobe;

// ---------------------------------------------------------------------------
// Fixed phrases
// ---------------------------------------------------------------------------

/// Separator between prompt phrases.
pub const PROMPT_DELIMITER: &str = ", ";

/// Leading quality tags of every base prompt.
pub const BASE_QUALITY: &str = "masterpiece, best quality";

/// Quality tags of every pose prompt. Disjoint from [`BASE_QUALITY`].
pub const POSE_QUALITY: &str = "high resolution, detailed, realistic, photorealistic";

/// Framing for every non-headshot pose.
pub const FULL_BODY_EMPHASIS: &str = "full body, full shot, long shot, complete figure visible, \
    whole person visible, from head to feet, legs and feet visible, feet on ground, no cropping, \
    entire body in frame, standing full height";

/// Framing for the headshot pose.
pub const HEADSHOT_FRAMING: &str = "tight headshot, face fills frame";

/// Closing photographic style of every pose prompt.
pub const STYLE: &str = "soft lighting, professional photography, clean background";

const NEGATIVE_BASELINE: &str = "low quality, blurry, distorted, deformed, ugly, bad anatomy, \
    bad face, poorly drawn face, deformed face, ugly face, asymmetrical face, asymmetrical eyes, \
    cross-eye, lazy eye, extra eyes, missing eyes, mutated mouth, deformed mouth, huge nose, bad teeth, \
    extra limbs, missing limbs, watermark, signature, text, \
    bad hands, malformed hands, extra fingers, missing fingers, \
    multiple people, two people, extra person, duplicate person, group, crowd, more than one person, \
    child, minor, underage, teenager, childlike features";

const NEGATIVE_CROPPING: &str = "cropped, cut off, incomplete body, missing legs, missing feet, \
    half body, bust shot, torso only, upper body only, portrait crop";

const NEGATIVE_CLOTHING: &str = "clothes, outfit, lingerie, bra, panties, dress, skirt, bikini, \
    g-string, pasties, garter, stockings, fishnets";

const NEGATIVE_CLOSED_POSE: &str = "crossed legs, legs crossed, closed legs, knees together, \
    legs together, ankles together, thighs together, pressed thighs, knees closed, legs tightly closed";

/// Anatomy terms excluded from the *opposite* sex's prompts.
pub const FEMALE_ANATOMY: &str = "vulva, vagina, labia, breasts";
pub const MALE_ANATOMY: &str = "penis, testicles, scrotum, male genitalia";

/// Poses that get the anti-closed-pose exclusions.
pub const REVEALING_POSES: [Pose; 7] = [
    Pose::Nude,
    Pose::Topless,
    Pose::Underwear,
    Pose::Swimsuit,
    Pose::Stripper1,
    Pose::Stripper2,
    Pose::Stripper3,
];

/// Maximum length of a compiled prompt in characters.
pub const MAX_PROMPT_LENGTH: usize = 5_000;

/// CLIP context window in tokens. Longer prompts are truncated by most
/// backends.
pub const CLIP_TOKEN_WINDOW: usize = 75;

/// Multiplier for rough CLIP token estimation from word count.
const TOKEN_ESTIMATE_MULTIPLIER: f64 = 1.3;

// ---------------------------------------------------------------------------
// Diversification
// ---------------------------------------------------------------------------

/// Per-pose stance phrases; variant `i` uses entry `i % len`.
fn diversification(pose: Pose) -> &'static [&'static str] {
    match pose {
        Pose::Head => &[],
        Pose::Nude => &[
            "natural stance, relaxed arms, subtle smile, shoulder-width stance",
            "arms on hips, confident posture, looking at viewer, front view",
            "one hand behind head, playful smile, slight hip tilt",
            "3/4 view, looking over shoulder, soft smile, smooth skin",
            "contrapposto pose, one leg forward, elegant posture, arched back",
            "hands gently at sides, neutral expression, relaxed",
            "back view, looking over shoulder at camera, sensual pose",
            "side profile, hands on hips, confident gaze",
        ],
        Pose::Topless => &[
            "arms crossed under chest, subtle smile",
            "one arm behind head, other on hip, playful",
            "hands on hips, confident, looking at viewer",
            "3/4 view, hair over shoulder",
            "side profile, chest turned to camera",
        ],
        Pose::Casual => &[
            "standing straight, hands at sides",
            "one leg forward, casual stance",
            "hands in pockets, relaxed",
            "leaning slightly, weight on one leg, casual smile",
            "3/4 view, looking over shoulder, casual pose",
            "side profile, head turned to camera",
            "arms crossed, relaxed posture",
            "hand on hip, confident casual stance",
        ],
        Pose::BusinessCasual => &[
            "hands clasped in front, professional posture",
            "one hand on hip, slight smile, professional",
            "3/4 view, looking at viewer, confident",
            "arms crossed, business casual stance",
            "side profile, head turned to camera",
            "leaning slightly forward, friendly smile",
        ],
        Pose::Business => &[
            "standing straight, formal posture",
            "one hand adjusting jacket, professional",
            "hands behind back, confident stance",
            "3/4 view, looking at viewer",
            "side profile, head turned to camera",
            "arms crossed, formal look",
        ],
        Pose::Fun => &[
            "hands on hips, playful smile",
            "one arm raised, casual vibe",
            "slight hip tilt, relaxed pose",
            "3/4 view, looking at viewer, fun expression",
            "side profile, sporty stance",
            "hands behind back, cheerful",
        ],
        Pose::Underwear => &[
            "hands on hips, confident look",
            "one hand behind head, playful",
            "3/4 view, looking at viewer",
            "side profile, head turned to camera",
            "arms crossed below chest, soft smile",
        ],
        Pose::Swimsuit => &[
            "hands on hips, beach vibe",
            "one hand adjusting hair, smiling",
            "3/4 view, looking at viewer, relaxed",
            "side profile, head turned to camera",
            "arms behind back, cheerful",
        ],
        Pose::Stripper1 => &[
            "sexy pose, hip tilt, playful smile",
            "one hand on thigh, other on hip, seductive gaze",
            "back arched, chest forward, provocative stance",
            "3/4 view, looking at viewer, flirty",
            "side profile, hand on thigh, alluring",
        ],
        Pose::Stripper2 => &[
            "corset emphasized, garter belt visible, seductive smile",
            "hip sway, hand sliding on thigh",
            "leaning slightly forward, inviting gaze",
            "3/4 view, looking at viewer, provocative",
            "side profile, arched back, alluring",
        ],
        Pose::Stripper3 => &[
            "hands on hips, confident look, body glitter",
            "one hand behind head, other on hip, provocative",
            "leg lifted slightly on toe, arched back, seductive",
            "3/4 view, looking at viewer, flirty",
            "side profile, hand on hip, alluring",
        ],
        Pose::Pregnant => &[
            "hands resting on belly, gentle smile",
            "3/4 view, cradling belly, looking at viewer",
            "side profile, showing baby bump",
            "one hand on lower back, relaxed stance",
        ],
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Compiled prompts for one `(pose, reveal level, variant index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptBundle {
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub clothing_description: String,
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct PromptCompiler<'r> {
    registry: &'r PoseRegistry,
}

impl<'r> PromptCompiler<'r> {
    pub fn new(registry: &'r PoseRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r PoseRegistry {
        self.registry
    }

    /// Base character prompt, computed once per character.
    ///
    /// Order: quality, gender, age, ethnicity, body shape, height, hips,
    /// skin tone, hair color, hair length, hair style, eye color,
    /// expression, facial hair (men) or makeup (women), tattoos, piercings,
    /// size, clothing style. Core axes fall back to a neutral phrase for
    /// unknown codes; detail axes are left out.
    pub fn build_base_prompt(&self, attrs: &CharacterAttributes) -> String {
        let label = attrs.label();

        let mut parts: Vec<&str> = vec![
            BASE_QUALITY,
            phrases::gender(attrs.gender),
            phrases::age(attrs.age_group)
                .unwrap_or_else(|| fallback("age_group", label, phrases::FALLBACK_AGE)),
            phrases::ethnicity(attrs.ethnicity),
            phrases::body_shape(&attrs.body_shape)
                .unwrap_or_else(|| fallback("body_shape", label, phrases::FALLBACK_BODY_SHAPE)),
        ];

        parts.extend(phrases::height(&attrs.height));
        parts.extend(phrases::hips(&attrs.hips_size));
        parts.extend(phrases::skin_tone(&attrs.skin_tone));

        parts.push(
            phrases::hair_color(&attrs.hair_color)
                .unwrap_or_else(|| fallback("hair_color", label, phrases::FALLBACK_HAIR_COLOR)),
        );
        parts.push(
            phrases::hair_length(&attrs.hair_length)
                .unwrap_or_else(|| fallback("hair_length", label, phrases::FALLBACK_HAIR_LENGTH)),
        );

        parts.extend(phrases::hair_style(&attrs.hair_style));
        parts.extend(phrases::eye_color(&attrs.eye_color));
        parts.extend(phrases::expression(&attrs.expression));

        match attrs.gender {
            Gender::Male if attrs.facial_hair != NONE_CODE => {
                parts.extend(phrases::facial_hair(&attrs.facial_hair));
            }
            Gender::Female if attrs.makeup != NONE_CODE => {
                parts.extend(phrases::makeup(&attrs.makeup));
            }
            _ => {}
        }

        if attrs.tattoos != NONE_CODE {
            parts.extend(phrases::tattoos(&attrs.tattoos));
        }
        if attrs.piercings != NONE_CODE {
            parts.extend(phrases::piercings(&attrs.piercings));
        }

        parts.extend(phrases::size(&attrs.breast_penis_size, attrs.gender));

        if attrs.clothing_style != DEFAULT_CLOTHING_STYLE {
            parts.extend(phrases::clothing_style(&attrs.clothing_style));
        }

        join(parts)
    }

    /// Full positive prompt for one pose variant.
    pub fn build_pose_prompt(
        &self,
        base_prompt: &str,
        pose: &str,
        reveal_level: u8,
        variant_index: usize,
        gender: Gender,
    ) -> Result<String, CoreError> {
        let pose = self.registry.lookup(pose)?;
        let spec = self.registry.spec(pose)?;

        let clothing;
        let mut parts: Vec<&str> = Vec::with_capacity(7);

        if pose.is_headshot() {
            parts.extend([HEADSHOT_FRAMING, POSE_QUALITY, base_prompt, spec.prompt]);
        } else {
            clothing = wardrobe::clothing_description(pose, reveal_level, gender);
            parts.extend([
                FULL_BODY_EMPHASIS,
                POSE_QUALITY,
                base_prompt,
                spec.prompt,
                clothing.as_str(),
            ]);
            let variants = diversification(pose);
            if !variants.is_empty() {
                parts.push(variants[variant_index % variants.len()]);
            }
        }

        parts.push(STYLE);
        Ok(join(parts))
    }

    /// Negative prompt for a pose and gender.
    pub fn generate_negative_prompt(&self, pose: &str, gender: Gender) -> Result<String, CoreError> {
        let pose = self.registry.lookup(pose)?;
        Ok(negative_prompt(pose, gender))
    }

    /// Outfit plus footwear for a pose and reveal level.
    pub fn clothing_description(
        &self,
        pose: &str,
        reveal_level: u8,
        gender: Gender,
    ) -> Result<String, CoreError> {
        let pose = self.registry.lookup(pose)?;
        Ok(wardrobe::clothing_description(pose, reveal_level, gender))
    }

    /// All three outputs for one pose variant.
    pub fn bundle(
        &self,
        base_prompt: &str,
        pose: &str,
        reveal_level: u8,
        variant_index: usize,
        gender: Gender,
    ) -> Result<PromptBundle, CoreError> {
        Ok(PromptBundle {
            positive_prompt: self.build_pose_prompt(
                base_prompt,
                pose,
                reveal_level,
                variant_index,
                gender,
            )?,
            negative_prompt: self.generate_negative_prompt(pose, gender)?,
            clothing_description: self.clothing_description(pose, reveal_level, gender)?,
        })
    }
}

/// Negative prompt for a resolved pose. Total over `Pose x Gender`.
pub fn negative_prompt(pose: Pose, gender: Gender) -> String {
    let mut parts = vec![NEGATIVE_BASELINE];

    if !pose.is_headshot() {
        parts.push(NEGATIVE_CROPPING);
    }

    if pose == Pose::Nude {
        parts.push(NEGATIVE_CLOTHING);
    }
    parts.push(anatomy_of(gender.opposite()));

    if REVEALING_POSES.contains(&pose) {
        parts.push(NEGATIVE_CLOSED_POSE);
    }

    join(parts)
}

fn anatomy_of(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => FEMALE_ANATOMY,
        Gender::Male => MALE_ANATOMY,
    }
}

fn fallback(axis: &str, label: &str, phrase: &'static str) -> &'static str {
    tracing::debug!(axis, character = label, phrase, "Unmapped trait code, using fallback");
    phrase
}

/// Join non-empty phrases with [`PROMPT_DELIMITER`].
fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(PROMPT_DELIMITER)
}

// ---------------------------------------------------------------------------
// Prompt checks
// ---------------------------------------------------------------------------

/// Rough CLIP token estimate: words * 1.3, rounded up.
pub fn estimate_token_count(text: &str) -> usize {
    let word_count = text.split_whitespace().count();
    (word_count as f64 * TOKEN_ESTIMATE_MULTIPLIER).ceil() as usize
}

/// Validate a compiled prompt: non-empty and within length limit.
pub fn validate_prompt(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt must not be empty".to_string(),
        ));
    }
    if text.len() > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
