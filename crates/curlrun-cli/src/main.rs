use curlrun_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stdout is reserved for the report.
    let sink = logging::init_logging();
    tracing::debug!("log sink: {sink}");

    if let Err(err) = Cli::run_from_args() {
        eprintln!("curlrun error: {:#}", err);
        std::process::exit(1);
    }
}
