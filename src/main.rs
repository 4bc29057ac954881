use anyhow::Result;
use clap::Parser;
use sentibert::{PipelineConfig, SentimentService};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON pipeline config; falls back to environment variables and defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Classify a single text and exit instead of reading stdin
    #[arg(long)]
    text: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::from_env_or_default(),
    };

    info!("starting sentibert v{}", sentibert::VERSION);

    let mut service = SentimentService::uninitialized();
    if let Err(e) = service.init(config) {
        error!("initialization failed: {}", e);
        return Err(e.into());
    }

    match args.text {
        Some(text) => {
            let reading = service.classify(&text)?;
            println!("{}", reading);
        }
        None => {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    warn!("empty input, skipping");
                    continue;
                }
                match service.classify(&line) {
                    Ok(reading) => println!("{}\n", reading),
                    Err(e) => error!("inference failed: {}", e),
                }
            }
        }
    }

    Ok(())
}
