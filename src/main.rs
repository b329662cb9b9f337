use std::process::ExitCode;

use clap::Parser;
use lyric_atlas::app::{self, RunOutcome};
use lyric_atlas::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied later).
    let explicit_log_level =
        lyric_atlas::debug::init_log_bridge(cli.log_level.map(|level| level.to_level_filter()));

    log::info!("Starting lyric-atlas {}", env!("CARGO_PKG_VERSION"));

    let report = match app::run(&cli, explicit_log_level) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("lyric-atlas: error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    for warning in &report.warnings {
        eprintln!("lyric-atlas: warning: {warning}");
    }

    match report.outcome {
        RunOutcome::Saved { files, .. } => {
            println!("Font generated.");
            for file in files {
                println!("  {}", file.display());
            }
            ExitCode::SUCCESS
        }
        RunOutcome::Canceled => {
            println!("Generation canceled.");
            ExitCode::SUCCESS
        }
        RunOutcome::DidNotFit => {
            eprintln!("lyric-atlas: the glyphs did not fit into the maximum size texture");
            ExitCode::FAILURE
        }
    }
}
