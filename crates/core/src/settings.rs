//! Backend render parameters per pose class.
//!
//! Headshots render small and upright with more sampling steps; every other
//! pose renders a tall full-body frame. Both are then resized to the
//! in-game target size by the post-processor.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::poses::Pose;

// ---------------------------------------------------------------------------
// Named constants
// ---------------------------------------------------------------------------

pub const DEFAULT_SAMPLER: &str = "DPM++ 2M Karras";
pub const DEFAULT_CFG_SCALE: f32 = 8.0;

pub const HEADSHOT_RENDER_SIZE: (u32, u32) = (360, 480);
pub const HEADSHOT_TARGET_SIZE: (u32, u32) = (120, 160);
pub const HEADSHOT_STEPS: u32 = 40;

pub const BODY_RENDER_SIZE: (u32, u32) = (640, 1024);
pub const BODY_TARGET_SIZE: (u32, u32) = (512, 800);
pub const BODY_STEPS: u32 = 34;

/// Largest width or height the backend is asked to render.
const MAX_DIMENSION: u32 = 4096;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Everything the backend request needs besides prompts and seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderProfile {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg_scale: f32,
    pub sampler_name: String,
    /// Size of the saved image after post-processing.
    pub target_width: u32,
    pub target_height: u32,
}

impl RenderProfile {
    pub fn headshot() -> Self {
        Self {
            width: HEADSHOT_RENDER_SIZE.0,
            height: HEADSHOT_RENDER_SIZE.1,
            steps: HEADSHOT_STEPS,
            cfg_scale: DEFAULT_CFG_SCALE,
            sampler_name: DEFAULT_SAMPLER.to_string(),
            target_width: HEADSHOT_TARGET_SIZE.0,
            target_height: HEADSHOT_TARGET_SIZE.1,
        }
    }

    pub fn body() -> Self {
        Self {
            width: BODY_RENDER_SIZE.0,
            height: BODY_RENDER_SIZE.1,
            steps: BODY_STEPS,
            cfg_scale: DEFAULT_CFG_SCALE,
            sampler_name: DEFAULT_SAMPLER.to_string(),
            target_width: BODY_TARGET_SIZE.0,
            target_height: BODY_TARGET_SIZE.1,
        }
    }

    pub fn for_pose(pose: Pose) -> Self {
        if pose.is_headshot() {
            Self::headshot()
        } else {
            Self::body()
        }
    }

    /// Validate dimensions, steps and guidance scale.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (label, w, h) in [
            ("render", self.width, self.height),
            ("target", self.target_width, self.target_height),
        ] {
            if w == 0 || h == 0 {
                return Err(CoreError::Validation(format!(
                    "{label} width and height must be greater than 0"
                )));
            }
            if w > MAX_DIMENSION || h > MAX_DIMENSION {
                return Err(CoreError::Validation(format!(
                    "{label} dimensions must not exceed {MAX_DIMENSION}px (got {w}x{h})"
                )));
            }
        }
        if self.steps == 0 {
            return Err(CoreError::Validation(
                "steps must be greater than 0".to_string(),
            ));
        }
        if !(self.cfg_scale > 0.0) {
            return Err(CoreError::Validation(format!(
                "cfg_scale must be positive (got {})",
                self.cfg_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn headshot_profile() {
        let p = RenderProfile::for_pose(Pose::Head);
        assert_eq!((p.width, p.height, p.steps), (360, 480, 40));
        assert_eq!((p.target_width, p.target_height), (120, 160));
    }

    #[test]
    fn every_body_pose_uses_body_profile() {
        for pose in Pose::ALL.into_iter().filter(|p| !p.is_headshot()) {
            assert_eq!(RenderProfile::for_pose(pose), RenderProfile::body());
        }
    }

    #[test]
    fn builtin_profiles_are_valid() {
        assert!(RenderProfile::headshot().validate().is_ok());
        assert!(RenderProfile::body().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = RenderProfile { width: 0, ..RenderProfile::body() };
        let huge = RenderProfile { target_height: 10_000, ..RenderProfile::body() };
        let nan = RenderProfile { cfg_scale: f32::NAN, ..RenderProfile::body() };
        assert_matches!(zero.validate(), Err(CoreError::Validation(_)));
        assert_matches!(huge.validate(), Err(CoreError::Validation(_)));
        assert_matches!(nan.validate(), Err(CoreError::Validation(_)));
    }
}
