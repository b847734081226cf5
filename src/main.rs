mod cli;

use clap::Parser;

use cli::{Cli, Command};
use quiz_engine::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    // The dashboard owns the terminal, so it logs to a file instead.
    let _guard = match args.command {
        Command::Host { .. } => Some(logging::init_file(&args.config.log_dir)),
        _ => {
            logging::init_stderr();
            None
        }
    };

    if let Err(e) = cli::run(&args.config, args.command).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
