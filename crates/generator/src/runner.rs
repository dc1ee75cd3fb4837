//! Sequential generation loop.
//!
//! For each character: draw an identity, compile the full render plan,
//! then render every job in order against the [`ImageBackend`], retrying
//! failed calls, post-processing the result and writing it into the
//! session directory. A failed variant is recorded and the loop moves on;
//! a failed character never stops the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use scw_core::attributes::CharacterAttributes;
use scw_core::error::CoreError;
use scw_core::identity::CharacterIdentity;
use scw_core::plan::{plan_character, RenderJob};
use scw_core::poses::PoseRegistry;
use scw_core::prompt::PromptCompiler;
use scw_webui::api::{Txt2ImgRequest, WebUiApi, WebUiApiError};
use scw_webui::processor::{self, ProcessError};

use crate::config::GeneratorConfig;

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// Anything that turns a txt2img request into encoded image bytes.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    async fn render(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, WebUiApiError>;
}

#[async_trait]
impl ImageBackend for WebUiApi {
    async fn render(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, WebUiApiError> {
        self.txt2img(request).await
    }
}

// ---------------------------------------------------------------------------
// Errors and reports
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Backend failed after {attempts} attempt(s): {source}")]
    Backend {
        attempts: u32,
        #[source]
        source: WebUiApiError,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A variant that could not be produced.
#[derive(Debug, Clone, Serialize)]
pub struct VariantFailure {
    pub pose_code: String,
    pub reveal_level: u8,
    pub filename: String,
    pub error: String,
}

/// Outcome of one character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterReport {
    pub name: String,
    pub char_id: String,
    pub seed: u32,
    /// Saved file names per requested pose code.
    pub saved: BTreeMap<String, Vec<String>>,
    pub failures: Vec<VariantFailure>,
    pub skipped_poses: Vec<String>,
}

impl CharacterReport {
    pub fn saved_count(&self) -> usize {
        self.saved.values().map(Vec::len).sum()
    }
}

/// A character that failed before any render (bad pose list, bad mod key).
#[derive(Debug, Clone, Serialize)]
pub struct CharacterFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<CharacterReport>,
    pub failed_characters: Vec<CharacterFailure>,
}

impl RunSummary {
    pub fn saved_count(&self) -> usize {
        self.reports.iter().map(CharacterReport::saved_count).sum()
    }

    pub fn failed_variant_count(&self) -> usize {
        self.reports.iter().map(|r| r.failures.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct Generator<B> {
    backend: B,
    registry: PoseRegistry,
    mod_key: String,
    session_dir: PathBuf,
    poses: Option<Vec<String>>,
    delay: Duration,
    max_retries: u32,
}

impl<B: ImageBackend> Generator<B> {
    pub fn new(
        backend: B,
        registry: PoseRegistry,
        config: &GeneratorConfig,
        session_dir: PathBuf,
    ) -> Self {
        Self {
            backend,
            registry,
            mod_key: config.mod_key.clone(),
            session_dir,
            poses: config.poses.clone(),
            delay: config.delay,
            max_retries: config.max_retries.max(1),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Generate every character in order.
    pub async fn run(&self, characters: &[CharacterAttributes]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, attrs) in characters.iter().enumerate() {
            tracing::info!(
                character = attrs.label(),
                index = index + 1,
                total = characters.len(),
                "Generating character"
            );
            match self.generate_character(attrs).await {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    tracing::error!(character = attrs.label(), error = %e, "Character failed");
                    summary.failed_characters.push(CharacterFailure {
                        name: attrs.label().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        summary
    }

    /// Generate all variants of one character.
    ///
    /// Planning errors fail the character; per-variant errors are recorded
    /// in the report.
    pub async fn generate_character(
        &self,
        attrs: &CharacterAttributes,
    ) -> Result<CharacterReport, GenerateError> {
        let identity = CharacterIdentity::generate(&self.mod_key, attrs.gender);
        let compiler = PromptCompiler::new(&self.registry);
        let plan = plan_character(
            &compiler,
            attrs,
            &identity,
            &self.mod_key,
            self.poses.as_deref(),
        )?;

        tracing::info!(
            char_id = %plan.char_id,
            seed = plan.seed,
            jobs = plan.jobs.len(),
            "Character planned"
        );

        let mut report = CharacterReport {
            name: attrs.label().to_string(),
            char_id: plan.char_id.clone(),
            seed: plan.seed,
            saved: BTreeMap::new(),
            failures: Vec::new(),
            skipped_poses: plan.skipped_poses.clone(),
        };

        for (index, job) in plan.jobs.iter().enumerate() {
            if index > 0 {
                self.pause().await;
            }

            match self.render_job(job).await {
                Ok(path) => {
                    tracing::info!(
                        char_id = %plan.char_id,
                        pose = %job.pose_code,
                        reveal_level = job.reveal_level,
                        path = %path.display(),
                        "Saved image"
                    );
                    report
                        .saved
                        .entry(job.pose_code.clone())
                        .or_default()
                        .push(job.filename.clone());
                }
                Err(e) => {
                    tracing::error!(
                        char_id = %plan.char_id,
                        pose = %job.pose_code,
                        reveal_level = job.reveal_level,
                        error = %e,
                        "Variant failed"
                    );
                    report.failures.push(VariantFailure {
                        pose_code: job.pose_code.clone(),
                        reveal_level: job.reveal_level,
                        filename: job.filename.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn render_job(&self, job: &RenderJob) -> Result<PathBuf, GenerateError> {
        tracing::debug!(
            pose = %job.pose_code,
            reveal_level = job.reveal_level,
            prompt = %job.prompts.positive_prompt,
            negative_prompt = %job.prompts.negative_prompt,
            "Rendering variant"
        );

        let request = Txt2ImgRequest::from_job(job);
        let raw = self.render_with_retries(&request).await?;
        let png = processor::postprocess_for(&raw, &job.profile)?;

        let path = self.session_dir.join(&job.filename);
        tokio::fs::write(&path, png)
            .await
            .map_err(|source| GenerateError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Ok(path)
    }

    async fn render_with_retries(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, GenerateError> {
        let mut attempt = 1;
        loop {
            match self.backend.render(request).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if attempt < self.max_retries => {
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Backend call failed, retrying"
                    );
                    attempt += 1;
                    self.pause().await;
                }
                Err(source) => {
                    return Err(GenerateError::Backend {
                        attempts: attempt,
                        source,
                    })
                }
            }
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
