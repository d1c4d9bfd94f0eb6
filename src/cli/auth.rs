use crate::{error::Result, lastfm::Scrobbler, success};

/// Runs the authorization handshake if no session is stored, or always when
/// `force` is set.
pub async fn auth(scrobbler: &mut Scrobbler, force: bool) -> Result<()> {
    if force {
        scrobbler.reauthenticate().await?;
    } else if scrobbler.auth().session_key().is_some() {
        success!("Already authenticated. Use --force to authorize again.");
        return Ok(());
    } else {
        scrobbler.ensure_authenticated().await?;
    }

    success!("Successfully authenticated!");
    Ok(())
}
