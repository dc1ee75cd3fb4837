//! `scw-generator` -- character image generation run.
//!
//! Loads characters, renders every pose variant through a Stable Diffusion
//! WebUI instance and writes the post-processed images into a new session
//! directory. See [`GeneratorConfig::from_env`] for the environment
//! variables.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scw_core::loader;
use scw_core::poses::PoseRegistry;
use scw_generator::config::GeneratorConfig;
use scw_generator::runner::Generator;
use scw_generator::session;
use scw_webui::api::WebUiApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scw_generator=info,scw_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GeneratorConfig::from_env().context("invalid generator configuration")?;

    let characters = config.select_characters();
    if characters.is_empty() {
        let available = loader::list_available_configs(&config.configs_dir);
        tracing::info!(
            configs_dir = %config.configs_dir.display(),
            available = ?available,
            "No characters selected. Set SCW_CHARACTER_CONFIG or SCW_TEST_SET"
        );
        return Ok(());
    }

    let api = WebUiApi::new(&config.webui_url);
    api.check_connection().await.with_context(|| {
        format!(
            "cannot reach WebUI at {}; make sure it runs with --api",
            config.webui_url
        )
    })?;
    tracing::info!(webui_url = %config.webui_url, "Connected to WebUI");

    let session_dir = session::create_session_dir(&config.output_dir, &config.mod_key)
        .await
        .context("failed to create session directory")?;

    tracing::info!(
        mod_key = %config.mod_key,
        characters = characters.len(),
        poses = ?config.poses,
        "Starting generation run"
    );

    let generator = Generator::new(api, PoseRegistry::standard(), &config, session_dir);
    let summary = generator.run(&characters).await;

    let summary_path = session::write_summary(generator.session_dir(), &summary)
        .await
        .context("failed to write run summary")?;

    tracing::info!(
        saved = summary.saved_count(),
        failed_variants = summary.failed_variant_count(),
        failed_characters = summary.failed_characters.len(),
        summary = %summary_path.display(),
        "Generation run finished"
    );

    Ok(())
}
