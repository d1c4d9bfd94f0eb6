use async_trait::async_trait;

use crate::{
    config::Config,
    error::{Result, ScrobbleError},
    info,
    lastfm::{
        signature::{FORMAT_PARAM, sign},
        transport::{ApiResponse, ApiTransport, Params},
    },
    management::CredentialStore,
    utils, warning,
};

/// Where the desktop authentication handshake currently stands.
///
/// ```text
/// NoSession -> TokenRequested -> AwaitingUserAuth -> SessionAcquired
/// ```
///
/// Any failure drops back to `NoSession`, so the next attempt restarts with
/// a fresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    NoSession,
    TokenRequested { token: String },
    AwaitingUserAuth { token: String, confirmed: bool },
    SessionAcquired { session_key: String },
}

/// The human side of the handshake: show the authorization page and wait
/// until the user says they approved the application.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Shows the authorization URL to the user.
    fn present(&self, url: &str);

    /// Blocks until the user confirms. An error aborts the handshake.
    async fn wait_for_confirmation(&self) -> Result<()>;
}

/// Opens the authorization page in the default browser and waits for Enter.
pub struct ConsoleGate;

#[async_trait]
impl AuthorizationGate for ConsoleGate {
    fn present(&self, url: &str) {
        info!("Please authorize this application by visiting this URL:\n{}", url);
        if webbrowser::open(url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the URL above manually."
            )
        }
    }

    async fn wait_for_confirmation(&self) -> Result<()> {
        info!("Press Enter after you've authorized the application...");
        tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| ())
        })
        .await
        .map_err(|e| ScrobbleError::Auth(format!("confirmation prompt failed: {e}")))?
        .map_err(|e| ScrobbleError::Auth(format!("cannot read confirmation: {e}")))
    }
}

/// Drives the three-step Last.fm desktop authentication and owns the
/// resulting session key.
pub struct AuthFlow {
    config: Config,
    store: CredentialStore,
    state: AuthState,
}

impl AuthFlow {
    /// Creates the flow, picking up a previously stored session key.
    ///
    /// A credential file that cannot be read is logged and ignored; the user
    /// simply authenticates again.
    pub async fn new(config: Config, store: CredentialStore) -> Self {
        let state = match store.load().await {
            Ok(Some(session_key)) => AuthState::SessionAcquired { session_key },
            Ok(None) => AuthState::NoSession,
            Err(e) => {
                log::error!("Error loading credentials: {e}");
                AuthState::NoSession
            }
        };

        AuthFlow {
            config,
            store,
            state,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session_key(&self) -> Option<&str> {
        match &self.state {
            AuthState::SessionAcquired { session_key } => Some(session_key),
            _ => None,
        }
    }

    pub fn authorization_url(&self, token: &str) -> String {
        format!(
            "{auth_url}?api_key={api_key}&token={token}",
            auth_url = self.config.auth_url,
            api_key = self.config.api_key,
            token = token,
        )
    }

    /// Step 1: fetches a one-time token with an unsigned `auth.getToken` call.
    pub async fn request_token(&mut self, transport: &dyn ApiTransport) -> Result<String> {
        self.state = AuthState::NoSession;

        let mut params = Params::new();
        params.insert("method".into(), "auth.getToken".into());
        params.insert("api_key".into(), self.config.api_key.clone());
        params.insert(FORMAT_PARAM.into(), "json".into());

        let res = transport.get(&params).await?;
        let token = res
            .body
            .get("token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| missing_field(&res, "Failed to get authentication token"))?
            .to_string();

        log::debug!("Received authentication token");
        self.state = AuthState::TokenRequested {
            token: token.clone(),
        };
        Ok(token)
    }

    /// Step 2: shows the authorization page for `token` and waits for the
    /// user's confirmation.
    ///
    /// Only a confirmed authorization lets [`AuthFlow::exchange_for_session`]
    /// proceed.
    pub async fn prompt_user_authorization(
        &mut self,
        token: &str,
        gate: &dyn AuthorizationGate,
    ) -> Result<()> {
        match &self.state {
            AuthState::TokenRequested { token: requested } if requested == token => {}
            _ => {
                return Err(ScrobbleError::Auth(
                    "authorization prompted for a token that was not requested".into(),
                ));
            }
        }

        self.state = AuthState::AwaitingUserAuth {
            token: token.to_string(),
            confirmed: false,
        };
        gate.present(&self.authorization_url(token));

        if let Err(e) = gate.wait_for_confirmation().await {
            self.state = AuthState::NoSession;
            return Err(e);
        }

        self.state = AuthState::AwaitingUserAuth {
            token: token.to_string(),
            confirmed: true,
        };
        Ok(())
    }

    /// Step 3: trades the authorized token for a session key with a signed
    /// `auth.getSession` call and persists it.
    pub async fn exchange_for_session(
        &mut self,
        transport: &dyn ApiTransport,
        token: &str,
    ) -> Result<String> {
        match &self.state {
            AuthState::AwaitingUserAuth {
                token: pending,
                confirmed: true,
            } if pending == token => {}
            _ => {
                return Err(ScrobbleError::Auth(
                    "token has not been authorized by the user".into(),
                ));
            }
        }

        let mut params = Params::new();
        params.insert("method".into(), "auth.getSession".into());
        params.insert("api_key".into(), self.config.api_key.clone());
        params.insert("token".into(), token.to_string());
        let api_sig = sign(&params, &self.config.api_secret);
        params.insert("api_sig".into(), api_sig);
        params.insert(FORMAT_PARAM.into(), "json".into());

        let res = match transport.get(&params).await {
            Ok(res) => res,
            Err(e) => {
                self.state = AuthState::NoSession;
                return Err(e);
            }
        };

        let session = res.body.get("session");
        let Some(session_key) = session
            .and_then(|s| s.get("key"))
            .and_then(|k| k.as_str())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
        else {
            self.state = AuthState::NoSession;
            return Err(missing_field(&res, "Failed to get session key"));
        };

        if let Some(name) = session.and_then(|s| s.get("name")).and_then(|n| n.as_str()) {
            log::info!("Authenticated as {name}");
        }

        if let Err(e) = self.store.persist(&session_key).await {
            log::error!("Error saving credentials: {e}");
            warning!("Session key could not be saved, you will be asked to authorize again next time.");
        }

        self.state = AuthState::SessionAcquired {
            session_key: session_key.clone(),
        };
        Ok(session_key)
    }

    /// Returns the session key, running the full handshake first if there is
    /// none yet.
    pub async fn ensure_authenticated(
        &mut self,
        transport: &dyn ApiTransport,
        gate: &dyn AuthorizationGate,
    ) -> Result<String> {
        if let Some(session_key) = self.session_key() {
            return Ok(session_key.to_string());
        }

        let token = self.request_token(transport).await?;
        self.prompt_user_authorization(&token, gate).await?;
        self.exchange_for_session(transport, &token).await
    }

    /// Forgets the current session and removes the credential file.
    pub async fn reset(&mut self) {
        self.state = AuthState::NoSession;
        if let Err(e) = self.store.clear().await {
            log::error!("Error removing credentials: {e}");
        }
    }
}

fn missing_field(res: &ApiResponse, context: &str) -> ScrobbleError {
    match utils::api_error_message(&res.body) {
        Some(message) => ScrobbleError::Auth(format!("{context}: {message}")),
        None => ScrobbleError::Auth(format!("{context} (status {})", res.status)),
    }
}
