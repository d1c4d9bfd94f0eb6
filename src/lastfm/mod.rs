//! # Last.fm Integration Module
//!
//! Client side of the Last.fm Web API as far as scrobbling needs it.
//!
//! ```text
//! Scrobbler (track.scrobble, single and batch)
//!     ├── AuthFlow (auth.getToken -> browser -> auth.getSession)
//!     ├── sign (api_sig: sorted params + shared secret, MD5)
//!     └── ApiTransport (reqwest, JSON bodies)
//! ```
//!
//! Every call except `auth.getToken` carries an `api_sig` computed by
//! [`sign`]. Responses are requested as JSON through `format=json`, which is
//! excluded from the signature.

pub mod auth;
pub mod scrobble;
pub mod signature;
pub mod transport;

pub use auth::{AuthFlow, AuthState, AuthorizationGate, ConsoleGate};
pub use scrobble::Scrobbler;
pub use signature::sign;
pub use transport::{ApiResponse, ApiTransport, HttpTransport, Params};
