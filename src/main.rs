use anyhow::Result;

use transcript_collector::core::config::AppConfig;
use transcript_collector::menu;
use transcript_collector::utils::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let api_key = menu::prompt("Please enter your YouTube API key: ")?;
    let channel_id = menu::prompt("Please enter the YouTube Channel ID: ")?;
    let languages = menu::prompt(
        "Please enter preferred languages for transcripts (separated by comma, e.g., 'de,en'): ",
    )?;

    let config = AppConfig::new(
        api_key,
        channel_id,
        AppConfig::parse_languages(&languages),
    );
    config.validate()?;

    menu::run(config).await?;
    Ok(())
}
