//! Main entry point for the Binary Quest launcher

use binary_quest_launcher::{cli, logging, Launcher, LauncherConfig};

fn main() -> std::process::ExitCode {
    let _args = cli::run();
    logging::init();

    let outcome = Launcher::for_host(LauncherConfig::from_env()).run();
    tracing::debug!(?outcome, "launcher finished");

    std::process::ExitCode::from(outcome.exit_code())
}
