//! Transform a local image with SDXL, then upscale and face-restore the result.
//!
//! ```sh
//! PRODIA_API_KEY=... cargo run --example image_editing -- photo.png
//! ```

use prodia_rs::{
    FaceRestoreParams, ImageSource, ProdiaClient, ProdiaError, TransformParams, UpscaleFactor,
    UpscaleParams,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).ok_or("usage: image_editing <image>")?;
    let bytes = std::fs::read(&path)?;
    let client = ProdiaClient::from_env()?;

    let transform = TransformParams::new(ImageSource::bytes(&bytes), "oil painting, impressionist")
        .denoising_strength(0.55)
        .steps(30);
    let job = match client.sdxl_transform(&transform).await {
        Ok(job) => job,
        Err(ProdiaError::InvalidParameters) => {
            eprintln!("Prodia rejected the image or parameters");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let painted = client.wait(job).await?;
    let Some(url) = painted.image_url else {
        return Err("transform finished without an image".into());
    };
    println!("Transformed: {}", url);

    let job = client
        .upscale(&UpscaleParams::new(ImageSource::url(&url), UpscaleFactor::X2))
        .await?;
    let upscaled = client.wait(job).await?;
    let Some(url) = upscaled.image_url else {
        return Err("upscale finished without an image".into());
    };
    println!("Upscaled: {}", url);

    let job = client
        .face_restore(&FaceRestoreParams::new(ImageSource::url(&url)))
        .await?;
    let restored = client.wait(job).await?;
    println!("Restored: {:?}", restored.image_url);

    Ok(())
}
