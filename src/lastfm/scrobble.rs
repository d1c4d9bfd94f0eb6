use async_trait::async_trait;
use chrono::Utc;

use crate::{
    config::Config,
    error::{Result, ScrobbleError},
    lastfm::{
        auth::{AuthFlow, AuthorizationGate, ConsoleGate},
        signature::{FORMAT_PARAM, sign},
        transport::{ApiTransport, Params},
    },
    management::{BatchSubmitter, CredentialStore},
    types::{ScrobbleEvent, SubmissionResult},
    utils,
};

/// Submits scrobbles to `track.scrobble`, authenticating on first use.
pub struct Scrobbler {
    config: Config,
    transport: Box<dyn ApiTransport>,
    gate: Box<dyn AuthorizationGate>,
    auth: AuthFlow,
}

impl Scrobbler {
    /// Creates a scrobbler that asks for authorization on the console.
    pub async fn new(
        config: Config,
        transport: Box<dyn ApiTransport>,
        store: CredentialStore,
    ) -> Self {
        Self::with_gate(config, transport, store, Box::new(ConsoleGate)).await
    }

    pub async fn with_gate(
        config: Config,
        transport: Box<dyn ApiTransport>,
        store: CredentialStore,
        gate: Box<dyn AuthorizationGate>,
    ) -> Self {
        let auth = AuthFlow::new(config.clone(), store).await;
        Scrobbler {
            config,
            transport,
            gate,
            auth,
        }
    }

    pub fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    pub async fn ensure_authenticated(&mut self) -> Result<String> {
        self.auth
            .ensure_authenticated(self.transport.as_ref(), self.gate.as_ref())
            .await
    }

    /// Drops the stored session and runs the handshake again.
    pub async fn reauthenticate(&mut self) -> Result<String> {
        self.auth.reset().await;
        self.ensure_authenticated().await
    }

    /// Scrobbles a single play. `timestamp` defaults to now.
    ///
    /// The parsed body is returned whatever the HTTP status; callers inspect
    /// it for an API error payload.
    pub async fn submit_one(
        &mut self,
        artist: &str,
        title: &str,
        timestamp: Option<i64>,
    ) -> Result<SubmissionResult> {
        let session_key = self.ensure_authenticated().await?;

        let mut params = self.base_params(&session_key);
        params.insert("artist".into(), artist.to_string());
        params.insert("track".into(), title.to_string());
        params.insert(
            "timestamp".into(),
            timestamp.unwrap_or_else(|| Utc::now().timestamp()).to_string(),
        );
        self.finish(&mut params);

        let res = self.transport.post(&params).await?;
        if !res.is_success() {
            log::warn!("track.scrobble answered with status {}", res.status);
        }
        Ok(res.body)
    }

    /// Scrobbles up to 50 plays in one request using indexed parameters.
    ///
    /// The size ceiling is not enforced here; the batch planner chunks its
    /// input. A non-2xx status is returned as [`ScrobbleError::Http`].
    pub async fn submit_batch(&mut self, events: &[ScrobbleEvent]) -> Result<SubmissionResult> {
        let session_key = self.ensure_authenticated().await?;

        let mut params = self.base_params(&session_key);
        for (idx, event) in events.iter().enumerate() {
            params.insert(format!("artist[{idx}]"), event.artist.clone());
            params.insert(format!("track[{idx}]"), event.track.clone());
            params.insert(format!("timestamp[{idx}]"), event.timestamp.to_string());
        }
        self.finish(&mut params);

        let res = self.transport.post(&params).await?;
        if !res.is_success() {
            return Err(ScrobbleError::Http {
                status: res.status,
                message: utils::api_error_message(&res.body)
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }
        Ok(res.body)
    }

    fn base_params(&self, session_key: &str) -> Params {
        let mut params = Params::new();
        params.insert("method".into(), "track.scrobble".into());
        params.insert("api_key".into(), self.config.api_key.clone());
        params.insert("sk".into(), session_key.to_string());
        params
    }

    fn finish(&self, params: &mut Params) {
        let api_sig = sign(&*params, &self.config.api_secret);
        params.insert("api_sig".into(), api_sig);
        params.insert(FORMAT_PARAM.into(), "json".into());
    }
}

#[async_trait]
impl BatchSubmitter for Scrobbler {
    async fn submit_batch(&mut self, events: &[ScrobbleEvent]) -> Result<SubmissionResult> {
        Scrobbler::submit_batch(self, events).await
    }
}
