//! # CLI Module
//!
//! User-facing layer of scrobcli. It owns the terminal interaction (prompts,
//! progress bar, result tables) and delegates the actual work to
//! [`crate::lastfm`] and [`crate::management`].
//!
//! ## Commands
//!
//! - [`interactive`] - Default mode: prompt for artist, title, count and an
//!   optional backdate, run the batch, repeat until `quit`
//! - [`auth`] - Run (or with `--force`, re-run) the authorization handshake
//! - [`scrobble`] - Run a single batch from command-line arguments
//!
//! ## Usage Patterns
//!
//! ```bash
//! scrobcli                                         # interactive loop
//! scrobcli auth                                    # authorize once
//! scrobcli scrobble --artist A --track T --count 120 --days-ago 3
//! ```
//!
//! Errors returned from here end the process through the `error!` macro in
//! `main`; failed chunks inside a batch are reported but never fatal.

mod auth;
mod interactive;
mod scrobble;

use crate::{
    config::Config,
    error::Result,
    lastfm::{HttpTransport, Scrobbler},
    management::CredentialStore,
};

pub use auth::auth;
pub use interactive::interactive;
pub use interactive::prompt_loop;
pub use interactive::read_request;
pub use scrobble::BatchRequest;
pub use scrobble::execute_batch;
pub use scrobble::scrobble;

/// Wires the HTTP transport, credential store and console gate together.
pub async fn build_scrobbler(config: Config) -> Result<Scrobbler> {
    let transport = HttpTransport::new(&config)?;
    let store = CredentialStore::new(config.credentials_path.clone());
    Ok(Scrobbler::new(config, Box::new(transport), store).await)
}
