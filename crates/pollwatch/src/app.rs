use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

fn url_arg(about: &'static str) -> Arg {
    Arg::new("url")
        .long("url")
        .short('u')
        .value_name("URL")
        .help(about)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("pollwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Follow ML training jobs and sentiment dashboards from the terminal")
        .long_about("pollwatch talks to ML inference backends over REST. It can start a training run and follow it until it completes or fails, keep a live view of sentiment statistics, and run one-off predictions against the sentiment, churn and traffic sign models.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Start a training run and follow it until it completes or fails")
                .arg(url_arg("Training backend base URL (overrides config)")),
        )
        .subcommand(
            Command::new("status")
                .about("Show the current training status once")
                .arg(url_arg("Training backend base URL (overrides config)"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show live sentiment statistics and recent predictions")
                .arg(url_arg("Dashboard backend base URL (overrides config)"))
                .arg(
                    Arg::new("once")
                        .long("once")
                        .help("Refresh once, print the view and exit")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Classify the sentiment of a tweet")
                .arg(
                    Arg::new("text")
                        .help("Tweet text (at most 500 characters)")
                        .required(true)
                        .index(1),
                )
                .arg(url_arg("Sentiment backend base URL (overrides config)"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("churn")
                .about("Score a customer's churn risk from a TOML or JSON profile")
                .arg(
                    Arg::new("profile")
                        .help("Customer profile keyed by dataset column names")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(url_arg("Churn backend base URL (overrides config)"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("sign")
                .about("Recognize the traffic sign in an image")
                .arg(
                    Arg::new("image")
                        .help("Image file to upload")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(url_arg("Traffic sign backend base URL (overrides config)"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "pollwatch");
        app.debug_assert();
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["pollwatch"]).is_err());
    }

    #[test]
    fn test_cli_train_url_override() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "train", "--url", "http://10.0.0.5:8000"])
            .unwrap();
        let train_matches = matches.subcommand_matches("train").unwrap();
        assert_eq!(
            train_matches.get_one::<String>("url").unwrap(),
            "http://10.0.0.5:8000"
        );
    }

    #[test]
    fn test_cli_status_json_flag() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "status", "--json"])
            .unwrap();
        let status_matches = matches.subcommand_matches("status").unwrap();
        assert!(status_matches.get_flag("json"));
        assert!(status_matches.get_one::<String>("url").is_none());
    }

    #[test]
    fn test_cli_dashboard_once() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "dashboard", "--once"])
            .unwrap();
        assert!(matches.subcommand_matches("dashboard").unwrap().get_flag("once"));
    }

    #[test]
    fn test_cli_predict_requires_text() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["pollwatch", "predict"]).is_err());

        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "predict", "what a game", "--json"])
            .unwrap();
        let predict_matches = matches.subcommand_matches("predict").unwrap();
        assert_eq!(
            predict_matches.get_one::<String>("text").unwrap(),
            "what a game"
        );
        assert!(predict_matches.get_flag("json"));
    }

    #[test]
    fn test_cli_churn_and_sign_take_paths() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "churn", "customer.toml", "--json"])
            .unwrap();
        let churn = matches.subcommand_matches("churn").unwrap();
        assert_eq!(
            churn.get_one::<PathBuf>("profile"),
            Some(&PathBuf::from("customer.toml"))
        );
        assert!(churn.get_flag("json"));

        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "sign", "stop.png", "-u", "http://gpu:8000"])
            .unwrap();
        let sign = matches.subcommand_matches("sign").unwrap();
        assert_eq!(sign.get_one::<PathBuf>("image"), Some(&PathBuf::from("stop.png")));
        assert_eq!(sign.get_one::<String>("url").unwrap(), "http://gpu:8000");

        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["pollwatch", "sign"]).is_err());
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "status", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[test]
    fn test_cli_completions_shell() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["pollwatch", "completions", "bash"])
            .unwrap();
        let completions = matches.subcommand_matches("completions").unwrap();
        assert_eq!(completions.get_one::<Shell>("shell"), Some(&Shell::Bash));

        let app = build_cli();
        assert!(
            app.try_get_matches_from(vec!["pollwatch", "completions", "tcsh"])
                .is_err()
        );
    }
}
