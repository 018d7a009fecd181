//! file_to_image - save a file's icon as a square image
//!
//! Usage: file_to_image <exe|default> <source> <output> <size>
//!
//! Exit status: 0 when an image (or the fallback image) is available,
//! 1 on bad arguments, 2 when nothing could be produced.

use std::process;

use clap::Parser;

use file_to_image::cli::Cli;
use file_to_image::shared::Config;
use file_to_image::{log, CompositionRoot, IconOutcome, IconRequest};

const EXIT_BAD_ARGUMENTS: i32 = 1;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() { EXIT_BAD_ARGUMENTS } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = match &cli.config {
        Some(path) => match Config::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                process::exit(EXIT_BAD_ARGUMENTS);
            }
        },
        None => {
            let (config, ignored) = Config::load();
            if let Some(ignored) = ignored {
                // No log sink exists yet
                eprintln!("{}", ignored);
            }
            config
        }
    };

    init_logging(&config, cli.verbose);
    log!("file_to_image {} starting", env!("CARGO_PKG_VERSION"));

    let root = CompositionRoot::new(config);
    let outcome = root.execute(&IconRequest::from(&cli));
    log!("Outcome: {:?}", outcome);

    report(&outcome, cli.json);
    process::exit(outcome.exit_code());
}

fn init_logging(config: &Config, verbose: bool) {
    match &config.log.file {
        Some(path) => {
            if let Err(e) = log::init_file(path) {
                eprintln!("Cannot open log file {}: {}", path.display(), e);
            }
        }
        None if verbose => log::init_stderr(),
        None => {}
    }
}

fn report(outcome: &IconOutcome, json: bool) {
    if json {
        match serde_json::to_string(outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to serialize outcome: {}", e),
        }
        return;
    }

    match outcome {
        IconOutcome::Produced { path } | IconOutcome::Fallback { path } => {
            println!("{}", path.display())
        }
        IconOutcome::Failed { reason } => eprintln!("Error: {}", reason),
    }
}
