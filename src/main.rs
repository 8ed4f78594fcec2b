use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::error;

use xcaption::commands::{self, AppState, CaptionsResponse};
use xcaption::utils;
use xcaption::utils::time::format_time;

#[derive(Debug, Parser)]
#[command(name = "xcaption", about = "Interactive captions for YouTube videos", version)]
struct Cli {
    /// Override the settings store location
    #[arg(long = "store", global = true)]
    store: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Fetch the captions of a YouTube video
    Load { url: String },
    /// Parse a local .srt, .vtt or .txt subtitle file
    Parse { file: PathBuf },
    /// Show title, uploader and duration of a YouTube video
    Info { url: String },
    /// List, remove or clear recently loaded URLs
    Recent {
        #[arg(long = "remove", conflicts_with = "clear")]
        remove: Option<String>,
        #[arg(long = "clear")]
        clear: bool,
    },
    /// Check that the caption backend answers
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    utils::logger::init_logger();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let state = AppState::init(cli.store).context("Failed to open settings")?;

    match cli.command {
        CliCommand::Load { url } => {
            let response = commands::load_captions(&state, url).await.map_err(anyhow::Error::msg)?;
            print_captions(&response, cli.json)
        }
        CliCommand::Parse { file } => {
            let response = commands::parse_caption_file(file.display().to_string())
                .await
                .map_err(anyhow::Error::msg)?;
            print_captions(&response, cli.json)
        }
        CliCommand::Info { url } => {
            let info = commands::get_video_info(&state, url).await.map_err(anyhow::Error::msg)?;
            if cli.json {
                print_json(&info)
            } else {
                println!("{}", info.title);
                println!("by {} - {}", info.uploader, format_time(info.duration));
                Ok(())
            }
        }
        CliCommand::Recent { remove, clear } => {
            if clear {
                commands::clear_recent_urls(&state).map_err(anyhow::Error::msg)?;
                return Ok(());
            }
            let urls = match remove {
                Some(url) => commands::remove_recent_url(&state, url).map_err(anyhow::Error::msg)?,
                None => commands::get_recent_urls(&state).map_err(anyhow::Error::msg)?,
            };
            if cli.json {
                print_json(&urls)
            } else {
                urls.iter().for_each(|url| println!("{}", url));
                Ok(())
            }
        }
        CliCommand::Health => {
            let health = commands::check_backend(&state).await.map_err(anyhow::Error::msg)?;
            if cli.json {
                print_json(&health)
            } else {
                println!("{} {} ({})", health.service, health.version, health.status);
                Ok(())
            }
        }
    }
}

fn print_captions(response: &CaptionsResponse, json: bool) -> Result<()> {
    if json {
        return print_json(response);
    }
    for caption in &response.captions {
        println!("{:>6}  {}", format_time(caption.start), caption.text);
    }
    println!("{} captions", response.count);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}
