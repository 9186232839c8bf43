//! Human-readable rendering of pipeline outcomes.

use chrono::{DateTime, Utc};
use zipcast_core::{Article, Error, PipelineError, Report, Weather};

/// Longest description shown under an article before clipping.
const DESCRIPTION_LIMIT: usize = 150;

pub fn print_welcome() {
    println!("zipcast - current weather and local news for any US zipcode.");
    println!("Type 'quit' or 'exit' to leave.\n");
}

/// Render one pipeline report: location, then the weather section, then the
/// news section. A failed section prints its message without hiding the
/// other.
pub fn print_report(report: &Report) {
    println!("Location: {}", report.location);

    match &report.weather {
        Ok(weather) => print_weather(weather),
        Err(err) => println!("\nWeather unavailable: {}", describe_error(err)),
    }

    match &report.articles {
        Ok(articles) if articles.is_empty() => {
            println!("\nNo local news found for this area.");
        }
        Ok(articles) => print_articles(articles),
        Err(err) => println!("\nNews unavailable: {}", describe_error(err)),
    }
}

fn print_weather(weather: &Weather) {
    println!("\nWeather in {}:", weather.location);
    println!(
        "  Temperature: {:.1}°F (feels like {:.1}°F)",
        weather.temperature, weather.feels_like
    );
    println!(
        "  Condition: {} - {}",
        weather.main_condition, weather.description
    );
    println!("  Humidity: {}%", weather.humidity);
    println!("  Wind: {:.1} mph", weather.wind_speed);
    println!("  Pressure: {:.1} hPa", weather.pressure);
    println!("  Visibility: {} meters", weather.visibility);
}

fn print_articles(articles: &[Article]) {
    println!("\nFound {} news articles:", articles.len());
    for (index, article) in articles.iter().enumerate() {
        println!("{}. {}", index + 1, article.title);
        if let Some(source) = &article.source {
            println!("   Source: {source}");
        }
        if let Some(published) = article.published_at {
            println!("   Published: {}", format_published(published));
        }
        if let Some(description) = &article.description {
            println!("   {}", clip(description, DESCRIPTION_LIMIT));
        }
        if let Some(url) = &article.url {
            println!("   URL: {url}");
        }
        println!();
    }
}

/// Map a run-aborting error to the message shown to the user.
pub fn describe_pipeline_error(err: &PipelineError) -> String {
    format!("Lookup failed while {}: {}", err.stage, describe_error(&err.source))
}

/// Per-kind message suffixes so each failure reads differently.
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::InvalidInput(_) | Error::NotFound(_) => err.to_string(),
        Error::Transport { .. } => {
            format!("{err}. Check your internet connection and API keys.")
        }
        Error::Parse { .. } => {
            format!("{err}. The provider may have changed its response format.")
        }
    }
}

fn format_published(published: DateTime<Utc>) -> String {
    published.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let clipped: String = text.chars().take(max).collect();
        format!("{clipped}...")
    } else {
        text.to_string()
    }
}
