use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use outfit_finder::client::HttpPredictionClient;
use outfit_finder::config::Config;
use outfit_finder::input::load_candidate;
use outfit_finder::models::Gender;
use outfit_finder::page::Page;
use outfit_finder::{StyleFinder, SubmissionController, SubmissionState, UiEvent};

#[derive(Parser)]
#[clap(
    name = "outfit-finder",
    version,
    about = "Get styling advice for a photo and shopping links for the look"
)]
struct Cli {
    /// Photo to analyse (JPG, PNG or WEBP)
    #[clap(long)]
    photo: PathBuf,

    /// male, female or other
    #[clap(long, default_value = "female")]
    gender: Gender,

    #[clap(long, default_value = "Casual")]
    occasion: String,

    /// Write the rendered results page to this file
    #[clap(long)]
    html: Option<PathBuf>,

    /// Prediction endpoint, overrides STYLIST_ENDPOINT
    #[clap(long)]
    endpoint: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    info!("Starting Outfit Finder against {}", config.endpoint);

    let service = Arc::new(HttpPredictionClient::new(&config)?);
    let controller = SubmissionController::new(Page::with_preferences(cli.gender, cli.occasion))
        .with_max_upload_bytes(config.max_upload_bytes);
    let mut finder = StyleFinder::new(controller, service);

    let candidate = load_candidate(&cli.photo).await?;
    finder.dispatch(UiEvent::FilePicked(candidate));
    finder.dispatch(UiEvent::Submit);
    finder.run_until_settled().await;

    let notices = finder.page_mut().take_notices();
    for notice in &notices {
        eprintln!("{notice}");
    }

    if let Some(path) = &cli.html {
        tokio::fs::write(path, finder.page().to_html())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote results page to {}", path.display());
    }

    match (finder.state(), finder.controller().view()) {
        (SubmissionState::Displayed, Some(view)) => {
            print!("{view}");
            Ok(())
        }
        _ => {
            error!("No recommendations were produced");
            Err(anyhow::anyhow!(
                notices
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "No recommendations were produced".to_string())
            ))
        }
    }
}
