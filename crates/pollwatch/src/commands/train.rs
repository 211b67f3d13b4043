use clap::ArgMatches;
use tokio::sync::oneshot;
use tracing::{error, info};

use pollwatch_core::events;
use pollwatch_core::training::{self, JobOutcome, PollState, TrainingClient};
use pollwatch_core::HttpClient;

use super::helpers::{load_config_with_warning, resolve_base_url};
use crate::table::epoch_table;

pub(crate) async fn handle_train_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "training", &config.training)?;
    let client = TrainingClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(event = "cli.train_started", url = %base_url);

    let (outcome_tx, outcome_rx) = oneshot::channel();
    let on_update = |state: &PollState| {
        println!("{:<10} {:>3}%", state.status(), state.progress());
    };
    let on_terminal = move |outcome: JobOutcome| {
        let _ = outcome_tx.send(outcome);
    };

    let (message, mut handle) = match training::start_training(client, on_update, on_terminal).await
    {
        Ok(started) => started,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(event = "cli.train_failed", error = %e);
            events::log_typed_error(&e);
            return Err(e.into());
        }
    };

    println!("{}", message);

    tokio::select! {
        outcome = outcome_rx => {
            let outcome = outcome.map_err(|_| "Training monitor stopped without a result")?;
            report_outcome(&outcome)
        }
        _ = tokio::signal::ctrl_c() => {
            handle.stop();
            handle.finished().await;
            eprintln!("Stopped following the run. Training continues on the backend.");
            info!(event = "cli.train_interrupted");
            Ok(())
        }
    }
}

fn report_outcome(outcome: &JobOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        JobOutcome::Completed { history } => {
            println!("✅ {}", outcome);
            if let Some(epochs) = history.as_deref().filter(|e| !e.is_empty()) {
                println!("{}", epoch_table(epochs));
            }
            info!(event = "cli.train_completed");
            Ok(())
        }
        JobOutcome::Failed { message } => {
            eprintln!("❌ {}", outcome);
            error!(event = "cli.train_failed", error = %message);
            Err(outcome.to_string().into())
        }
    }
}
