use clap::ArgMatches;
use tokio::sync::mpsc;
use tracing::info;

use pollwatch_core::dashboard::{self, DashboardClient, DashboardView, RecentTable};
use pollwatch_core::HttpClient;

use super::helpers::{load_config_with_warning, resolve_base_url};
use crate::table::{TableFormatter, recent_table};

pub(crate) async fn handle_dashboard_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let once = matches.get_flag("once");
    let config = load_config_with_warning();
    let base_url = resolve_base_url(matches, "dashboard", &config.dashboard)?;
    let client = DashboardClient::new(HttpClient::new(&config.http), &base_url)?;

    info!(event = "cli.dashboard_started", url = %base_url, once = once);

    let (view_tx, mut view_rx) = mpsc::unbounded_channel();
    let mut handle = dashboard::start(client, move |view: &DashboardView| {
        let _ = view_tx.send(view.clone());
    });

    let mut refreshes: u64 = 0;
    let interrupted = loop {
        tokio::select! {
            view = view_rx.recv() => {
                let Some(view) = view else { break false };
                refreshes += 1;
                println!("{}", render_view(&view));
                if once {
                    break false;
                }
            }
            _ = tokio::signal::ctrl_c() => break true,
        }
    };

    handle.stop();
    handle.finished().await;

    info!(
        event = "cli.dashboard_completed",
        refreshes = refreshes,
        interrupted = interrupted
    );
    Ok(())
}

pub(crate) fn render_view(view: &DashboardView) -> String {
    let mut out = Vec::new();

    if let Some(banner) = view.banner() {
        out.push(format!("⚠️  {}", banner));
    }

    let totals = view.totals();
    out.push(format!(
        "Total: {}   😊 Positive: {}   😐 Neutral: {}   😞 Negative: {}",
        totals.total, totals.positive, totals.neutral, totals.negative
    ));

    let series = view.series();
    if !series.is_empty() {
        let rows: Vec<Vec<String>> = (0..series.labels.len())
            .map(|i| {
                vec![
                    series.labels[i].clone(),
                    format!("{:.1}%", series.positive[i]),
                    format!("{:.1}%", series.neutral[i]),
                    format!("{:.1}%", series.negative[i]),
                ]
            })
            .collect();
        out.push(
            TableFormatter::new(&[5, 8, 8, 8])
                .render(&["Time", "Positive", "Neutral", "Negative"], &rows),
        );
    }

    match view.recent() {
        RecentTable::Loading => out.push("Loading recent predictions...".to_string()),
        RecentTable::Rows(rows) => out.push(recent_table(rows)),
        RecentTable::Placeholder(message) => out.push((*message).to_string()),
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollwatch_core::dashboard::{
        CONNECTION_ERROR_MESSAGE, NO_DATA_MESSAGE, RecentPrediction, Sentiment, StatsBucket,
    };

    #[test]
    fn test_render_initial_view() {
        let rendered = render_view(&DashboardView::new());
        assert!(rendered.contains("Total: 0"));
        assert!(rendered.contains("Loading recent predictions..."));
    }

    #[test]
    fn test_render_banner_and_placeholder() {
        let mut view = DashboardView::new();
        view.stats_failed();
        view.apply_recent(&[]);

        let rendered = render_view(&view);
        assert_eq!(rendered.matches(CONNECTION_ERROR_MESSAGE).count(), 1);
        assert!(rendered.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_stats_and_recent() {
        let mut view = DashboardView::new();
        view.apply_stats(&[StatsBucket {
            time: "14:05".to_string(),
            positive_pct: 66.7,
            neutral_pct: None,
            negative_pct: 33.3,
            positive_count: Some(2),
            neutral_count: None,
            negative_count: Some(1),
            total_count: Some(3),
        }]);
        view.apply_recent(&[RecentPrediction {
            time: "2024-05-01T14:05:09".to_string(),
            sentiment: Sentiment::Negative,
        }]);

        let rendered = render_view(&view);
        assert!(rendered.contains("Total: 3"));
        assert!(rendered.contains("14:05"));
        assert!(rendered.contains("66.7%"));
        assert!(rendered.contains("0.0%"));
        assert!(rendered.contains("14:05:09"));
        assert!(rendered.contains("Negative"));
    }
}
