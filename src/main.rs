use algo_quiz::{Config, Console, ConsoleArgs, logging};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = match Config::from_args(ConsoleArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("Failed to open log file {}: {}", config.log_file.display(), e);
        std::process::exit(1);
    }

    let result = match Console::new(config) {
        Ok(console) => console.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(%e, "console stopped");
        eprintln!("Error running console: {}", e);
        std::process::exit(1);
    }
}
