//! # algo-quiz
//!
//! Terminal console for an algorithm catalog served over HTTP: list, search,
//! create, edit and delete algorithms, and take the multiple-choice quiz the
//! service generates for each of them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use algo_quiz::{Config, Console, ConsoleError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ConsoleError> {
//!     let console = Console::new(Config::default())?;
//!
//!     // Takes over the terminal until the user quits
//!     console.run().await
//! }
//! ```

pub mod api;
pub mod config;
pub mod console;
pub mod filter;
pub mod highlight;
pub mod logging;
pub mod models;
pub mod quiz;
pub mod tags;
pub mod terminal;

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use api::{ApiError, HttpClient, ReqwestHttpClient};
pub use config::{Config, ConfigError, ConsoleArgs};
pub use console::Route;

/// Error type for running the console.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A console bound to one catalog service.
pub struct Console {
    config: Config,
    client: Arc<ReqwestHttpClient>,
}

impl Console {
    pub fn new(config: Config) -> Result<Self, ConsoleError> {
        let client = ReqwestHttpClient::new(config.api_url.as_str())?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the console in the terminal.
    ///
    /// This will take over the terminal and return when the user quits.
    pub async fn run(self) -> Result<(), ConsoleError> {
        info!(api_url = %self.client.base_url(), route = %self.config.start_route, "starting console");
        console::run(self.client, &self.config).await
    }
}
