//! Generate a single image from a text prompt and wait for it.
//!
//! Requires `PRODIA_API_KEY` to be set.
//!
//! ```sh
//! RUST_LOG=prodia_rs=debug cargo run --example simple_generation
//! ```

use prodia_rs::{AspectRatio, GenerateParams, ProdiaClient};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prodia_rs=info")),
        )
        .init();

    let client = ProdiaClient::from_env()?;

    let models = client.models().await?;
    let Some(model) = models.first() else {
        eprintln!("Prodia returned no models");
        return Ok(());
    };
    println!("Using model: {}", model);

    let params = GenerateParams::new("a beautiful sunset over mountains")
        .model(model)
        .negative("lowres, blurry, bad anatomy")
        .steps(25)
        .cfg_scale(7.0)
        .aspect_ratio(AspectRatio::Landscape);

    let job = client.generate(&params).await?;
    println!("Queued job: {}", job.job);

    let result = client
        .wait_with_timeout(job, Duration::from_secs(120))
        .await?;
    match result.image_url {
        Some(url) => println!("Image: {}", url),
        None => eprintln!("Job {} finished without an image URL", result.job),
    }

    Ok(())
}
