//! REST API client for the Stable Diffusion WebUI `/sdapi/v1` endpoints.
//!
//! Wraps connection checks and `txt2img` rendering using [`reqwest`].
//! Rendered images come back base64-encoded and are returned as raw bytes.

use base64::Engine;
use serde::{Deserialize, Serialize};

use scw_core::plan::RenderJob;

/// Path appended to the WebUI base URL.
pub const API_PREFIX: &str = "/sdapi/v1";

/// HTTP client for a single WebUI instance.
#[derive(Debug, Clone)]
pub struct WebUiApi {
    client: reqwest::Client,
    api_url: String,
}

/// Body of `POST /sdapi/v1/txt2img`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Txt2ImgRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub seed: i64,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg_scale: f32,
    pub sampler_name: String,
    pub batch_size: u32,
    pub n_iter: u32,
    pub restore_faces: bool,
}

impl Txt2ImgRequest {
    /// One image per call, faces restored, everything else from the job.
    pub fn from_job(job: &RenderJob) -> Self {
        Self {
            prompt: job.prompts.positive_prompt.clone(),
            negative_prompt: job.prompts.negative_prompt.clone(),
            seed: i64::from(job.seed),
            width: job.profile.width,
            height: job.profile.height,
            steps: job.profile.steps,
            cfg_scale: job.profile.cfg_scale,
            sampler_name: job.profile.sampler_name.clone(),
            batch_size: 1,
            n_iter: 1,
            restore_faces: true,
        }
    }
}

/// Response of `POST /sdapi/v1/txt2img`.
#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    /// Base64-encoded images, one per generated sample.
    #[serde(default)]
    pub images: Vec<String>,
    /// Generation info as a JSON-encoded string.
    #[serde(default)]
    pub info: Option<String>,
}

/// Errors from the WebUI REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum WebUiApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// WebUI returned a non-2xx status code.
    #[error("WebUI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A successful response carried no image.
    #[error("WebUI returned no images")]
    NoImages,

    /// The first image was not valid base64.
    #[error("Failed to decode image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl WebUiApi {
    /// Create a new API client for a WebUI instance.
    ///
    /// * `base_url` - WebUI root URL, e.g. `http://localhost:7860`. The
    ///   `/sdapi/v1` prefix is appended here.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            api_url: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
        }
    }

    /// Full `/sdapi/v1` URL this client talks to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Verify the WebUI API is reachable.
    ///
    /// Sends `GET /options` and discards the body.
    pub async fn check_connection(&self) -> Result<(), WebUiApiError> {
        let response = self
            .client
            .get(format!("{}/options", self.api_url))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Render one image and return its encoded bytes.
    ///
    /// Sends `POST /txt2img` and decodes the first returned image.
    pub async fn txt2img(&self, request: &Txt2ImgRequest) -> Result<Vec<u8>, WebUiApiError> {
        let response = self
            .client
            .post(format!("{}/txt2img", self.api_url))
            .json(request)
            .send()
            .await?;

        let body: Txt2ImgResponse = Self::parse_response(response).await?;
        let first = body.images.first().ok_or(WebUiApiError::NoImages)?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(strip_data_url(first))?;

        tracing::debug!(
            seed = request.seed,
            width = request.width,
            height = request.height,
            bytes = bytes.len(),
            "txt2img returned image"
        );
        Ok(bytes)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`WebUiApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WebUiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WebUiApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WebUiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), WebUiApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Some WebUI builds prefix images with `data:image/png;base64,`.
fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(";base64,") {
        Some((_, data)) => data,
        None => payload,
    }
}
