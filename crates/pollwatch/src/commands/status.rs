use clap::ArgMatches;
use tracing::{error, info};

use pollwatch_core::events;
use pollwatch_core::training::{StatusReport, TrainingClient};
use pollwatch_core::HttpClient;

use super::helpers::{load_config_with_warning, resolve_base_url};
use crate::table::epoch_table;

pub(crate) async fn handle_status_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "training", &config.training)?;
    let client = TrainingClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(
        event = "cli.status_started",
        url = %base_url,
        json_output = json_output
    );

    let report = match client.status().await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.status_failed", error = %e);
            events::log_typed_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    info!(event = "cli.status_completed", status = %report.status);
    Ok(())
}

fn print_report(report: &StatusReport) {
    println!("Status: {}", report.status);
    if let Some(message) = report.error.as_deref().filter(|m| !m.is_empty()) {
        println!("Error:  {}", message);
    }

    let epochs = report
        .history
        .as_ref()
        .map(|h| h.epochs())
        .unwrap_or_default();
    if !epochs.is_empty() {
        println!("{}", epoch_table(&epochs));
    }
}
