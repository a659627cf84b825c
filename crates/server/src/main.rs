//! Simple test harness for the blend orchestrator.
//!
//! This binary runs the end-to-end pipeline against the real content and
//! generation APIs for two handles given on the command line:
//!
//! ```text
//! cargo run --bin server -- alice bob
//! ```

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{BlendConfig, BlendOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")),
        )
        .init();

    info!("Starting post-blend server test harness");

    // A missing .env file is fine; the variables may already be exported
    dotenvy::dotenv().ok();
    let config = BlendConfig::from_env().context("Failed to load configuration")?;
    info!(
        "Using content API at {} and model {}",
        config.base_url, config.openai_model
    );

    let mut args = std::env::args().skip(1);
    let (Some(user1), Some(user2)) = (args.next(), args.next()) else {
        bail!("usage: server <user1> <user2>");
    };

    let orchestrator = BlendOrchestrator::from_config(&config);

    info!("Blending @{} and @{}", user1, user2);
    let result = orchestrator
        .blend(&user1, &user2)
        .await
        .with_context(|| format!("Failed to blend @{user1} and @{user2}"))?;

    let analysis = &result.analysis;
    info!("{} ({}% compatible)", analysis.title, analysis.compatibility_score);
    info!("   Themes: {}", analysis.common_themes.join(", "));
    info!("   Differences: {}", analysis.differences.join(", "));
    info!("   Blended post: {}", analysis.blended_post);
    for line in &analysis.conversation {
        info!("   {}: {}", line.speaker, line.text);
    }
    info!("   {}", analysis.summary);

    // Repeating the pair in reverse order is answered from the cache
    let again = orchestrator.blend(&user2, &user1).await?;
    info!(
        "Reverse-order blend served from cache: {}",
        std::sync::Arc::ptr_eq(&result, &again)
    );

    Ok(())
}
