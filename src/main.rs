use log::error;
use std::env;
use std::process::ExitCode;

use recipe_scrape::{server, MetadataExtractor, ScrapeError, ScraperConfig};

const USAGE: &str = "Usage: recipe-scrape <url> | recipe-scrape --serve [addr]";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<(), ScrapeError> {
    let mut config = ScraperConfig::load()?;

    match args.first().map(String::as_str) {
        Some("--serve") => {
            if let Some(addr) = args.get(1) {
                config.bind_addr = addr.clone();
            }
            server::serve(config).await
        }
        Some(url) if !url.starts_with('-') => {
            let extractor = MetadataExtractor::builder().config(config).build()?;
            let metadata = extractor.extract(url).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            Err(ScrapeError::MissingUrl)
        }
    }
}
