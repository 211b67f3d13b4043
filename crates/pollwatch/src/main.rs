use pollwatch_core::init_logging;

mod app;
mod commands;
mod table;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v is given
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(commands::run_command(&matches));

    // A request abandoned on Ctrl-C may still be blocking a worker thread;
    // exit without waiting for it.
    runtime.shutdown_background();

    result
}
