//! # prodia-rs
//!
//! Async Rust client for the [Prodia](https://prodia.com) image generation
//! API.
//!
//! Provides a typed client with one method per endpoint (SD and SDXL
//! generation, image-to-image, inpainting, ControlNet, upscaling, face swap
//! and restore, model discovery), builder-style request parameters, and a
//! polling helper that waits for a job to finish.
//!
//! ## Quick Start
//!
//! ```no_run
//! use prodia_rs::{GenerateParams, ProdiaClient};
//!
//! # async fn example() -> prodia_rs::Result<()> {
//! let client = ProdiaClient::new("your-api-key");
//!
//! // Discover models
//! let models = client.models().await?;
//!
//! // Submit a job
//! let job = client
//!     .generate(
//!         &GenerateParams::new("a sunset over mountains")
//!             .model(&models[0])
//!             .negative("lowres, blurry")
//!             .steps(25),
//!     )
//!     .await?;
//!
//! // Poll every 250ms until it finishes
//! let result = client.wait(job).await?;
//! if let Some(url) = result.image_url {
//!     println!("Image: {}", url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! HTTP status codes map onto [`ProdiaError`]: 400 is
//! [`InvalidParameters`](ProdiaError::InvalidParameters), 401
//! [`InvalidApiKey`](ProdiaError::InvalidApiKey), 402
//! [`ApiKeyNotEnabled`](ProdiaError::ApiKeyNotEnabled), anything else but
//! 200 [`RequestFailed`](ProdiaError::RequestFailed). Requests are never
//! retried.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod types;

pub use client::ProdiaClient;
pub use config::{ProdiaConfig, ProdiaConfigBuilder};
pub use error::{ProdiaError, Result};
pub use params::{
    AspectRatio, ControlNetParams, FaceRestoreParams, FaceSwapParams, GenerateParams,
    ImageSource, InpaintFill, InpaintParams, SamplingOptions, TransformParams, UpscaleFactor,
    UpscaleParams,
};
pub use types::{Job, JobResult, JobStatus, ModelFamily, Request};
