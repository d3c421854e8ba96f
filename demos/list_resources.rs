//! Print the models, samplers, LoRAs and embeddings for both model families.
//!
//! ```sh
//! PRODIA_API_KEY=... cargo run --example list_resources
//! ```

use prodia_rs::ProdiaClient;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = ProdiaClient::from_env()?;

    println!("SD models:        {:?}", client.models().await?);
    println!("SD samplers:      {:?}", client.samplers().await?);
    println!("SD loras:         {:?}", client.loras().await?);
    println!("SD embeddings:    {:?}", client.embeddings().await?);
    println!("SDXL models:      {:?}", client.sdxl_models().await?);
    println!("SDXL samplers:    {:?}", client.sdxl_samplers().await?);
    println!("SDXL loras:       {:?}", client.sdxl_loras().await?);
    println!("SDXL embeddings:  {:?}", client.sdxl_embeddings().await?);

    Ok(())
}
