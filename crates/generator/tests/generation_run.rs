//! Integration tests for the generation loop against an in-memory backend.
//!
//! Verifies session output, retry behavior and that failures stay scoped
//! to the variant or character they belong to.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use scw_core::attributes::{CharacterAttributes, Ethnicity, Gender};
use scw_core::naming::parse_filename;
use scw_core::poses::PoseRegistry;
use scw_generator::config::GeneratorConfig;
use scw_generator::runner::{Generator, ImageBackend};
use scw_webui::api::{Txt2ImgRequest, WebUiApiError};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 90, 90])))
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode fixture");
    out
}

/// Fails the first `failures` calls, then returns a small PNG.
struct FakeBackend {
    failures: u32,
    calls: AtomicU32,
    requests: Mutex<Vec<Txt2ImgRequest>>,
}

impl FakeBackend {
    fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageBackend for FakeBackend {
    async fn render(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, WebUiApiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if call < self.failures {
            return Err(WebUiApiError::ApiError {
                status: 503,
                body: "busy".into(),
            });
        }
        Ok(png(request.width / 10, request.height / 10))
    }
}

fn config(vars: &[(&str, &str)]) -> GeneratorConfig {
    let mut map: HashMap<String, String> = [("SCW_DELAY_SECS", "0"), ("SCW_MODKEY", "test")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    map.extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    GeneratorConfig::from_lookup(|key| map.get(key).cloned()).expect("valid config")
}

fn female() -> CharacterAttributes {
    CharacterAttributes::new(Gender::Female, 1, Ethnicity::Black)
        .unwrap()
        .with_name("fixture_female")
}

// ---------------------------------------------------------------------------
// Test: happy path
// ---------------------------------------------------------------------------

/// Every planned variant is rendered once and saved at its target size.
#[tokio::test]
async fn saves_every_variant_to_session_dir() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(0);
    let cfg = config(&[("SCW_POSES", "head,cas")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());

    let report = generator.generate_character(&female()).await.unwrap();

    assert_eq!(generator.backend().calls(), 4);
    assert_eq!(report.saved_count(), 4);
    assert!(report.failures.is_empty());
    assert_eq!(report.saved["cas"].len(), 3);

    let head = &report.saved["head"][0];
    let parsed = parse_filename(head).unwrap();
    assert_eq!(parsed.char_id(), report.char_id);
    assert_eq!(parsed.mod_key(), "test");

    let saved = image::open(dir.path().join(head)).unwrap();
    assert_eq!((saved.width(), saved.height()), (120, 160));

    let body = image::open(dir.path().join(&report.saved["cas"][0])).unwrap();
    assert_eq!((body.width(), body.height()), (512, 800));
}

/// Every request for a character carries the same seed.
#[tokio::test]
async fn all_requests_share_the_character_seed() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(0);
    let cfg = config(&[("SCW_POSES", "cas,uw")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());

    let report = generator.generate_character(&female()).await.unwrap();

    let requests = generator.backend().requests.lock().unwrap();
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|r| r.seed == i64::from(report.seed)));
}

// ---------------------------------------------------------------------------
// Test: retries and failures
// ---------------------------------------------------------------------------

/// A transient backend failure is retried and the variant still saved.
#[tokio::test]
async fn transient_failure_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(2);
    let cfg = config(&[("SCW_POSES", "head"), ("SCW_MAX_RETRIES", "3")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());

    let report = generator.generate_character(&female()).await.unwrap();

    assert_eq!(generator.backend().calls(), 3);
    assert_eq!(report.saved_count(), 1);
}

/// Exhausted retries record a failure for that variant only.
#[tokio::test]
async fn exhausted_retries_fail_only_that_variant() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(2);
    let cfg = config(&[("SCW_POSES", "cas"), ("SCW_MAX_RETRIES", "2")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());

    let report = generator.generate_character(&female()).await.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].reveal_level, 0);
    assert!(report.failures[0].error.contains("2 attempt"));
    assert_eq!(report.saved["cas"].len(), 2);
}

/// A character whose plan fails does not stop the others.
#[tokio::test]
async fn bad_pose_list_fails_character_not_run() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(0);
    let cfg = config(&[("SCW_POSES", "head,moonwalk")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());

    let summary = generator.run(&[female(), female()]).await;

    assert_eq!(summary.failed_characters.len(), 2);
    assert!(summary.failed_characters[0].error.contains("moonwalk"));
    assert_eq!(generator.backend().calls(), 0);
}

/// Female-only poses are skipped for men and reported.
#[tokio::test]
async fn male_character_skips_female_only_poses() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new(0);
    let cfg = config(&[("SCW_POSES", "head,ss")]);
    let generator = Generator::new(backend, PoseRegistry::standard(), &cfg, dir.path().to_path_buf());
    let male = CharacterAttributes::new(Gender::Male, 3, Ethnicity::White).unwrap();

    let summary = generator.run(&[male]).await;

    assert_eq!(summary.saved_count(), 1);
    assert_eq!(summary.reports[0].skipped_poses, vec!["ss".to_string()]);
}
