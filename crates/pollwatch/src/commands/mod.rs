use clap::ArgMatches;
use tracing::error;

use pollwatch_core::events;

mod helpers;

mod churn;
mod completions;
mod dashboard;
mod predict;
mod sign;
mod status;
mod train;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let command = matches.subcommand_name().unwrap_or("none");
    events::log_app_startup(command);

    let result = match matches.subcommand() {
        Some(("train", sub_matches)) => train::handle_train_command(sub_matches).await,
        Some(("status", sub_matches)) => status::handle_status_command(sub_matches).await,
        Some(("dashboard", sub_matches)) => {
            dashboard::handle_dashboard_command(sub_matches).await
        }
        Some(("predict", sub_matches)) => predict::handle_predict_command(sub_matches).await,
        Some(("churn", sub_matches)) => churn::handle_churn_command(sub_matches).await,
        Some(("sign", sub_matches)) => sign::handle_sign_command(sub_matches).await,
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_app_shutdown(command, false);
    result
}
