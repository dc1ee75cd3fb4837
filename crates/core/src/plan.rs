//! Per-character render planning.
//!
//! Compiles every `(pose, reveal level)` variant for one character up front,
//! before any backend call, so a bad pose code or an oversized prompt fails
//! the character without wasting renders.

use serde::Serialize;

use crate::attributes::{CharacterAttributes, Gender};
use crate::error::CoreError;
use crate::identity::{validate_mod_key, CharacterIdentity};
use crate::naming;
use crate::poses::Pose;
use crate::prompt::{self, PromptBundle, PromptCompiler, CLIP_TOKEN_WINDOW};
use crate::settings::RenderProfile;

/// One backend call and the file it produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderJob {
    /// Pose code exactly as requested (may be an alias).
    pub pose_code: String,
    pub pose: Pose,
    pub reveal_level: u8,
    /// Position of `reveal_level` in the pose's variant list.
    pub variant_index: usize,
    pub prompts: PromptBundle,
    pub seed: u32,
    pub filename: String,
    pub profile: RenderProfile,
}

/// All jobs for one character, in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterPlan {
    pub char_id: String,
    pub seed: u32,
    pub gender: Gender,
    pub base_prompt: String,
    pub jobs: Vec<RenderJob>,
    /// Requested pose codes that do not apply to this character.
    pub skipped_poses: Vec<String>,
}

impl CharacterPlan {
    /// Distinct pose codes in render order.
    pub fn pose_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for job in &self.jobs {
            if !codes.contains(&job.pose_code.as_str()) {
                codes.push(&job.pose_code);
            }
        }
        codes
    }
}

/// Build the plan for one character.
///
/// `requested` overrides the registry's default pose list. Unknown codes
/// fail the whole plan with [`CoreError::UnknownPose`]; female-only poses
/// requested for a male character are skipped and reported in
/// [`CharacterPlan::skipped_poses`].
pub fn plan_character(
    compiler: &PromptCompiler<'_>,
    attrs: &CharacterAttributes,
    identity: &CharacterIdentity,
    mod_key: &str,
    requested: Option<&[String]>,
) -> Result<CharacterPlan, CoreError> {
    validate_mod_key(mod_key)?;
    let registry = compiler.registry();
    let gender = attrs.gender;

    let mut skipped_poses = Vec::new();
    let poses: Vec<(String, Pose)> = match requested {
        Some(codes) => {
            let mut poses = Vec::with_capacity(codes.len());
            for code in codes {
                let pose = registry.lookup(code)?;
                if registry.spec(pose)?.female_only && gender == Gender::Male {
                    tracing::warn!(
                        character = attrs.label(),
                        char_id = %identity.char_id,
                        pose = %code,
                        "Skipping female-only pose for male character"
                    );
                    skipped_poses.push(code.clone());
                    continue;
                }
                poses.push((code.clone(), pose));
            }
            poses
        }
        None => registry
            .default_poses_for(gender)
            .into_iter()
            .map(|pose| (pose.code().to_string(), pose))
            .collect(),
    };

    let base_prompt = compiler.build_base_prompt(attrs);
    let mut jobs = Vec::new();

    for (code, pose) in poses {
        let spec = registry.spec(pose)?;
        let profile = RenderProfile::for_pose(pose);

        for (variant_index, &reveal_level) in spec.reveal_variants.iter().enumerate() {
            let prompts = compiler.bundle(&base_prompt, &code, reveal_level, variant_index, gender)?;
            prompt::validate_prompt(&prompts.positive_prompt)?;

            let tokens = prompt::estimate_token_count(&prompts.positive_prompt);
            if tokens > CLIP_TOKEN_WINDOW {
                tracing::warn!(
                    char_id = %identity.char_id,
                    pose = %code,
                    reveal_level,
                    tokens,
                    "Prompt exceeds CLIP token window and may be truncated"
                );
            }

            jobs.push(RenderJob {
                filename: naming::filename(mod_key, attrs, &identity.char_id, &code, reveal_level),
                pose_code: code.clone(),
                pose,
                reveal_level,
                variant_index,
                prompts,
                seed: identity.seed,
                profile: profile.clone(),
            });
        }
    }

    tracing::debug!(
        char_id = %identity.char_id,
        seed = identity.seed,
        job_count = jobs.len(),
        "Planned character"
    );

    Ok(CharacterPlan {
        char_id: identity.char_id.clone(),
        seed: identity.seed,
        gender,
        base_prompt,
        jobs,
        skipped_poses,
    })
}
