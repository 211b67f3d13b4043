use clap::ArgMatches;
use tracing::{error, info};

use pollwatch_core::{HttpClient, SentimentClient, events};

use super::helpers::{load_config_with_warning, resolve_base_url};

pub(crate) async fn handle_predict_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = matches
        .get_one::<String>("text")
        .ok_or("Text argument is required")?;
    let json_output = matches.get_flag("json");

    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "sentiment", &config.sentiment)?;
    let client = SentimentClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(
        event = "cli.predict_started",
        url = %base_url,
        json_output = json_output
    );

    let prediction = match client.predict(text).await {
        Ok(prediction) => prediction,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.predict_failed", error = %e);
            events::log_typed_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{} {}", prediction.sentiment.icon(), prediction.sentiment);
        println!("Confidence:    {:.1}%", prediction.confidence_percent());
        println!("Response time: {}ms", prediction.latency_ms);
    }

    info!(event = "cli.predict_completed", sentiment = %prediction.sentiment);
    Ok(())
}
