use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use pollwatch_core::churn::{self, ChurnClient, ChurnPrediction};
use pollwatch_core::{HttpClient, events};

use super::helpers::{load_config_with_warning, resolve_base_url};

pub(crate) async fn handle_churn_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile_path = matches
        .get_one::<PathBuf>("profile")
        .ok_or("Profile argument is required")?;
    let json_output = matches.get_flag("json");

    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "churn", &config.churn)?;
    let client = ChurnClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(
        event = "cli.churn_started",
        url = %base_url,
        profile = %profile_path.display()
    );

    let result = match churn::load_profile(profile_path) {
        Ok(profile) => client.predict(&profile).await,
        Err(e) => Err(e),
    };

    let prediction = match result {
        Ok(prediction) => prediction,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.churn_failed", error = %e);
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
        event = "cli.churn_completed",
        risk_level = %prediction.risk_level
    );
    Ok(())
}

fn render_prediction(prediction: &ChurnPrediction) -> String {
    format!(
        "Churn probability: {}%\n\
         Will churn:        {}\n\
         Risk:              {} Risk\n\
         Priority:          {}\n\
         {}",
        prediction.probability_percent(),
        prediction.churn_prediction,
        prediction.risk_level,
        prediction.priority(),
        prediction.band().recommendation()
    )
}
