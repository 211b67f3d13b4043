use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use pollwatch_core::traffic_sign::{SignPrediction, TrafficSignClient};
use pollwatch_core::{HttpClient, events};

use super::helpers::{load_config_with_warning, resolve_base_url};

pub(crate) async fn handle_sign_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let image_path = matches
        .get_one::<PathBuf>("image")
        .ok_or("Image argument is required")?;
    let json_output = matches.get_flag("json");

    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "traffic_sign", &config.traffic_sign)?;
    let client = TrafficSignClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(
        event = "cli.sign_started",
        url = %base_url,
        image = %image_path.display()
    );

    let prediction = match client.classify_file(image_path).await {
        Ok(prediction) => prediction,
        Err(e) => {
            eprintln!("❌ {}", e);
            if e.is_model_missing() {
                eprintln!("Tip: Train the model first with 'pollwatch train'.");
            }
            error!(event = "cli.sign_failed", error = %e);
            events::log_typed_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{}", render_prediction(&prediction));
    }

    info!(
        event = "cli.sign_completed",
        class_id = prediction.class_id
    );
    Ok(())
}

fn render_prediction(prediction: &SignPrediction) -> String {
    format!(
        "🚦 {} (class {})\nConfidence: {:.1}% ({})",
        prediction.class_name,
        prediction.class_id,
        prediction.confidence_percent(),
        prediction.confidence_band().label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prediction() {
        let prediction = SignPrediction {
            class_id: 14,
            class_name: "Stop".to_string(),
            confidence: 0.6231,
        };
        assert_eq!(
            render_prediction(&prediction),
            "🚦 Stop (class 14)\nConfidence: 62.3% (medium)"
        );
    }
}
