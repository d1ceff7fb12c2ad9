use llm_cli::cli::commands::CliArgs;
use llm_cli::cli::handlers;
use llm_cli::{init_logging, AppConfig, LoggingConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here too and are not failures
            let exit_code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(exit_code);
        }
    };

    init_logging(LoggingConfig::from_args(&args));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let config = AppConfig::from_args(&args);
    let exit_code = handlers::run(&args, &config);

    process::exit(exit_code);
}
