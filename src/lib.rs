//! Last.fm Batch Scrobbler Library
//!
//! This library provides the pieces behind the `scrobcli` binary: the Last.fm
//! desktop authentication handshake, request signing, scrobble submission and
//! a batch planner that backdates and chunks repeated plays of a track.
//!
//! # Modules
//!
//! - `cli` - Interactive prompt loop and one-shot command implementations
//! - `config` - Configuration loading from `.env` files and the environment
//! - `error` - Crate error type
//! - `lastfm` - Last.fm API client: transport, signing, auth and scrobbling
//! - `management` - Credential persistence and batch planning
//! - `types` - Data structures and type definitions
//! - `utils` - Pure helpers for timestamps, chunking and input clamping
//!
//! # Example
//!
//! ```
//! use scrobcli::{config, lastfm::{HttpTransport, Scrobbler}, management::CredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> scrobcli::error::Result<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let transport = HttpTransport::new(&config)?;
//!     let store = CredentialStore::new(config.credentials_path.clone());
//!     let _scrobbler = Scrobbler::new(config, Box::new(transport), store).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Scrobbling {} times...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal errors at the top level of the binary. Library code
/// returns [`error::ScrobbleError`] instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a failed chunk or a browser that
/// could not be opened.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
