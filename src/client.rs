use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ProdiaConfig;
use crate::error::{ProdiaError, Result};
use crate::params::*;
use crate::types::*;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Prodia-Key";

/// Path for `/job/{id}` with the id escaped as one segment.
fn job_endpoint(job_id: &str) -> Result<String> {
    if matches!(job_id, "" | "." | "..") {
        return Err(ProdiaError::InvalidJobId(job_id.to_string()));
    }
    let mut url = reqwest::Url::parse("http://localhost/job")
        .map_err(|e| ProdiaError::InvalidJobId(format!("{}: {}", job_id, e)))?;
    url.path_segments_mut()
        .map_err(|_| ProdiaError::InvalidJobId(job_id.to_string()))?
        .push(job_id);
    Ok(url.path().to_string())
}

/// Async client for the Prodia v1 API.
///
/// Every endpoint wrapper goes through [`ProdiaClient::send`], which attaches
/// the JSON and API-key headers and maps HTTP status codes to
/// [`ProdiaError`]. Nothing is retried.
///
/// # Example
/// ```no_run
/// use prodia_rs::{GenerateParams, ProdiaClient};
///
/// # async fn example() -> prodia_rs::Result<()> {
/// let client = ProdiaClient::new("your-api-key");
/// let job = client.generate(&GenerateParams::new("a lighthouse at dusk")).await?;
/// let done = client.wait(job).await?;
/// println!("{:?}", done.image_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProdiaClient {
    http: Client,
    config: ProdiaConfig,
}

impl ProdiaClient {
    /// Create a client for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ProdiaConfig::new(api_key))
    }

    /// Create a client from a full [`ProdiaConfig`].
    pub fn with_config(config: ProdiaConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Create a client configured from `PRODIA_API_KEY` / `PRODIA_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        ProdiaConfig::from_env().map(Self::with_config)
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the configured API root.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ProdiaConfig {
        &self.config
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Send one request and return the decoded JSON body.
    ///
    /// 200 yields the body unchanged (`Value::Null` if it was empty);
    /// 400, 401 and 402 map to their own errors and any other status to
    /// [`ProdiaError::RequestFailed`].
    pub async fn send(&self, request: Request) -> Result<Value> {
        let url = format!("{}{}", self.config.base_url, request.endpoint);
        debug!(method = %request.method, endpoint = %request.endpoint, "sending Prodia request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key);
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| ProdiaError::Network {
            context: format!("Failed to reach Prodia at {}", url),
            source: e,
        })?;

        let status = resp.status().as_u16();
        if let Some(err) = ProdiaError::from_status(status) {
            warn!(status, endpoint = %request.endpoint, "Prodia request rejected");
            return Err(err);
        }

        let bytes = resp.bytes().await.map_err(|e| ProdiaError::Network {
            context: format!("Failed to read Prodia {} response", request.endpoint),
            source: e,
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn call<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let value = self.send(request).await?;
        if value.is_null() {
            return Err(ProdiaError::EmptyResponse);
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn submit<P: Serialize>(&self, endpoint: &str, params: &P) -> Result<Job> {
        let body = serde_json::to_value(params)?;
        let job: Job = self.call(Request::post(endpoint, body)).await?;
        debug!(job = %job.job, status = ?job.status, endpoint, "job submitted");
        Ok(job)
    }

    async fn list(&self, family: ModelFamily, resource: &str) -> Result<Vec<String>> {
        self.call(Request::get(family.path(resource))).await
    }

    // ── SD generation ───────────────────────────────────────────────

    /// Text-to-image with an SD 1.x model.
    pub async fn generate(&self, params: &GenerateParams) -> Result<Job> {
        self.submit("/sd/generate", params).await
    }

    /// Image-to-image with an SD 1.x model.
    pub async fn transform(&self, params: &TransformParams) -> Result<Job> {
        self.submit("/sd/transform", params).await
    }

    /// Repaint the masked region of an image.
    pub async fn inpaint(&self, params: &InpaintParams) -> Result<Job> {
        self.submit("/sd/inpaint", params).await
    }

    /// Generation guided by a ControlNet conditioning image.
    pub async fn controlnet(&self, params: &ControlNetParams) -> Result<Job> {
        self.submit("/sd/controlnet", params).await
    }

    // ── SDXL generation ─────────────────────────────────────────────
    //
    // These share parameter types with the SD wrappers. SD-only fields such
    // as `aspect_ratio` are forwarded as-is and Prodia rejects them with 400
    // (`ProdiaError::InvalidParameters`).

    /// Text-to-image with an SDXL model. Leave `aspect_ratio` unset.
    pub async fn sdxl_generate(&self, params: &GenerateParams) -> Result<Job> {
        self.submit("/sdxl/generate", params).await
    }

    /// Image-to-image with an SDXL model.
    pub async fn sdxl_transform(&self, params: &TransformParams) -> Result<Job> {
        self.submit("/sdxl/transform", params).await
    }

    /// Repaint the masked region of an image with an SDXL model.
    pub async fn sdxl_inpaint(&self, params: &InpaintParams) -> Result<Job> {
        self.submit("/sdxl/inpaint", params).await
    }

    // ── Post-processing ─────────────────────────────────────────────

    /// Enlarge an image 2x or 4x.
    pub async fn upscale(&self, params: &UpscaleParams) -> Result<Job> {
        self.submit("/upscale", params).await
    }

    /// Put the face from `source_url` onto the image at `target_url`.
    pub async fn face_swap(&self, params: &FaceSwapParams) -> Result<Job> {
        self.submit("/faceswap", params).await
    }

    /// Repair distorted faces in an image.
    pub async fn face_restore(&self, params: &FaceRestoreParams) -> Result<Job> {
        self.submit("/facerestore", params).await
    }

    // ── Jobs ────────────────────────────────────────────────────────

    /// Fetch the current state of a job.
    ///
    /// The id is sent as a single escaped path segment.
    pub async fn job(&self, job_id: &str) -> Result<JobResult> {
        self.call(Request::get(job_endpoint(job_id)?)).await
    }

    /// Poll until the job succeeds, sleeping the configured interval
    /// (250ms by default) before each check.
    ///
    /// Never gives up on a job that stays queued or generating; use
    /// [`wait_with_timeout`](Self::wait_with_timeout) for a bound.
    pub async fn wait(&self, job: impl Into<JobResult>) -> Result<JobResult> {
        self.poll(job.into()).await
    }

    /// Like [`wait`](Self::wait) but returns [`ProdiaError::Timeout`] once
    /// `timeout` has elapsed, including while a status request is in flight.
    pub async fn wait_with_timeout(
        &self,
        job: impl Into<JobResult>,
        timeout: Duration,
    ) -> Result<JobResult> {
        let current = job.into();
        let job_id = current.job.clone();
        match tokio::time::timeout(timeout, self.poll(current)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(job = %job_id, ?timeout, "gave up waiting on Prodia job");
                Err(ProdiaError::Timeout { job: job_id })
            }
        }
    }

    async fn poll(&self, mut current: JobResult) -> Result<JobResult> {
        while current.status != JobStatus::Succeeded {
            tokio::time::sleep(self.config.poll_interval).await;

            if current.status == JobStatus::Failed {
                warn!(job = %current.job, "Prodia job failed");
                return Err(ProdiaError::GenerationFailed { job: current.job });
            }

            current = self.job(&current.job).await?;
            debug!(job = %current.job, status = ?current.status, "polled job");
        }
        Ok(current)
    }

    // ── Discovery ───────────────────────────────────────────────────

    /// List available SD model checkpoints.
    pub async fn models(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sd, "models").await
    }

    /// List available SDXL model checkpoints.
    pub async fn sdxl_models(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sdxl, "models").await
    }

    /// List available SD samplers.
    pub async fn samplers(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sd, "samplers").await
    }

    /// List available SDXL samplers.
    pub async fn sdxl_samplers(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sdxl, "samplers").await
    }

    /// List available SD LoRAs.
    pub async fn loras(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sd, "loras").await
    }

    /// List available SDXL LoRAs.
    pub async fn sdxl_loras(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sdxl, "loras").await
    }

    /// List available SD textual-inversion embeddings.
    pub async fn embeddings(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sd, "embeddings").await
    }

    /// List available SDXL textual-inversion embeddings.
    pub async fn sdxl_embeddings(&self) -> Result<Vec<String>> {
        self.list(ModelFamily::Sdxl, "embeddings").await
    }
}
