//! Interactive workflow menu
//!
//! A blocking loop dispatching the four processing steps. Each action runs
//! to completion before the next prompt; an action's error is logged and
//! the loop continues rather than killing the process.

use std::io::{self, Write};
use std::path::Path;

use tracing::error;

use crate::core::aggregator::TranscriptAggregator;
use crate::core::channel::{ChannelLister, YoutubeDataApi};
use crate::core::config::AppConfig;
use crate::core::links::write_links;
use crate::core::models::AppResult;
use crate::core::transcript::{InnertubeCaptionSource, TranscriptFetcher};

/// Menu commands, numbered 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DownloadLinks,
    FetchTranscripts,
    GroupAll,
    GroupBatches,
    Exit,
}

impl Command {
    /// Parse an operator's menu choice; anything but "1"-"5" is invalid.
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim() {
            "1" => Some(Command::DownloadLinks),
            "2" => Some(Command::FetchTranscripts),
            "3" => Some(Command::GroupAll),
            "4" => Some(Command::GroupBatches),
            "5" => Some(Command::Exit),
            _ => None,
        }
    }
}

/// Print a prompt and read one trimmed line from stdin.
pub fn prompt(message: &str) -> AppResult<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_menu() {
    println!();
    println!("YouTube Channel Processing Workflow");
    println!("1. Download video links");
    println!("2. Fetch and save transcripts");
    println!("3. Group transcripts into a single file");
    println!("4. Save transcripts in batches");
    println!("5. Exit");
}

/// Run the menu loop until the operator exits.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let lister = ChannelLister::new(YoutubeDataApi::new(&config.api_key));
    let fetcher = TranscriptFetcher::new(
        ChannelLister::new(YoutubeDataApi::new(&config.api_key)),
        InnertubeCaptionSource::new(),
        config.languages.clone(),
        config.transcript_dir.clone(),
    );
    let aggregator = TranscriptAggregator::new(&config.transcript_dir);

    loop {
        print_menu();
        let choice = prompt("Enter your choice (1-5): ")?;

        let command = match Command::parse(&choice) {
            Some(command) => command,
            None => {
                println!("Invalid choice, please choose again.");
                continue;
            }
        };

        if command == Command::Exit {
            println!("Exiting...");
            return Ok(());
        }

        let outcome = match command {
            Command::DownloadLinks => {
                let result = lister.list_videos(&config.channel_id).await;
                match result {
                    Ok(videos) => write_links(&videos, &config.links_file)
                        .map(|_| "Video links downloaded successfully.".to_string()),
                    Err(err) => Err(err),
                }
            }
            Command::FetchTranscripts => {
                fetcher.fetch_all(&config.links_file).await.map(|report| {
                    format!(
                        "Transcripts fetched and saved successfully ({} saved, {} failed).",
                        report.saved,
                        report.failures.len()
                    )
                })
            }
            Command::GroupAll => aggregator
                .group_all(&config.combined_file)
                .map(|_| "Transcripts grouped into a single file successfully.".to_string()),
            Command::GroupBatches => aggregator
                .group_in_batches(
                    Path::new("."),
                    &config.batch_base_name,
                    config.max_per_batch,
                )
                .map(|batches| {
                    format!(
                        "Transcripts saved in {} batch file(s) successfully.",
                        batches.len()
                    )
                }),
            Command::Exit => unreachable!(),
        };

        match outcome {
            Ok(message) => println!("{}", message),
            Err(err) => {
                error!("Menu action failed: {}", err);
                println!("Action failed: {}", err);
            }
        }
    }
}
