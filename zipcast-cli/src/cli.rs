use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use zipcast_core::{Config, Pipeline, zipcode};

use crate::format;

/// Article cap used by the interactive loop.
const DEFAULT_ARTICLES: usize = 5;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "zipcast",
    version,
    about = "Current weather and local news for a US zipcode"
)]
pub struct Cli {
    /// With no subcommand, starts the interactive zipcode loop.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap and NewsAPI keys.
    Configure,

    /// One-shot lookup for a zipcode.
    Lookup {
        /// US zipcode, e.g. "94040" or "94040-1234".
        zipcode: String,

        /// Maximum number of news articles to show.
        #[arg(long, default_value_t = DEFAULT_ARTICLES)]
        articles: usize,
    },

    /// One-shot lookup for a city and state.
    City {
        /// City name, e.g. "Mountain View".
        city: String,

        /// State name or abbreviation, e.g. "CA".
        state: String,

        /// Maximum number of news articles to show.
        #[arg(long, default_value_t = DEFAULT_ARTICLES)]
        articles: usize,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Lookup { zipcode, articles }) => {
                let pipeline = build_pipeline()?;
                let report = pipeline.run(&zipcode, articles).await?;
                format::print_report(&report);
                Ok(())
            }
            Some(Command::City {
                city,
                state,
                articles,
            }) => {
                let pipeline = build_pipeline()?;
                let report = pipeline.run_city(&city, &state, articles).await?;
                format::print_report(&report);
                Ok(())
            }
            None => interactive_loop().await,
        }
    }
}

fn build_pipeline() -> anyhow::Result<Pipeline> {
    let config = Config::load()?;
    let credentials = config.credentials()?;
    Pipeline::new(credentials)
}

/// Prompt for both API keys and persist them.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let weather_key = Text::new("OpenWeatherMap API key:")
        .with_help_message("Used for geocoding and weather lookups")
        .prompt()
        .context("Failed to read OpenWeatherMap API key")?;

    let news_key = Text::new("NewsAPI key:")
        .with_help_message("Used for local news lookups")
        .prompt()
        .context("Failed to read NewsAPI key")?;

    config.weather_api_key = Some(weather_key);
    config.news_api_key = Some(news_key);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

/// Read zipcodes until the user quits; every error is reported and the loop
/// continues with the next input.
async fn interactive_loop() -> anyhow::Result<()> {
    let pipeline = build_pipeline()?;
    format::print_welcome();

    loop {
        let input = match Text::new("Enter a US zipcode (or 'quit' to exit):").prompt() {
            Ok(line) => line.trim().to_string(),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.is_empty() {
            println!("Please enter a zipcode.");
            continue;
        }
        if !zipcode::is_valid(&input) {
            println!(
                "Invalid zipcode format. Expected a 5-digit US zipcode such as 12345 or 12345-6789."
            );
            continue;
        }

        match pipeline.run(&input, DEFAULT_ARTICLES).await {
            Ok(report) => format::print_report(&report),
            Err(err) => println!("{}", format::describe_pipeline_error(&err)),
        }
    }

    println!("Thanks for using zipcast!");
    Ok(())
}
