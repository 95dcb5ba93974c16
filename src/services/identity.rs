//! Identity contract and a local anonymous provider.

use std::future::Future;

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::types::errors::AuthError;
use crate::types::identity::UserHandle;

/// Trait defining the identity operations the app relies on.
pub trait IdentityProvider {
    /// Establishes an anonymous session and returns its user.
    fn sign_in_anonymously(&self) -> impl Future<Output = Result<UserHandle, AuthError>>;
    fn current_user(&self) -> Option<UserHandle>;
    fn sign_out(&self);
    /// Reports every login/logout.
    fn watch(&self) -> watch::Receiver<Option<UserHandle>>;
}

/// Issues a random anonymous uid per session.
pub struct AnonymousIdentity {
    enabled: bool,
    state: watch::Sender<Option<UserHandle>>,
}

impl AnonymousIdentity {
    pub fn new(enabled: bool) -> Self {
        let (state, _) = watch::channel(None);
        Self { enabled, state }
    }
}

impl IdentityProvider for AnonymousIdentity {
    async fn sign_in_anonymously(&self) -> Result<UserHandle, AuthError> {
        if !self.enabled {
            return Err(AuthError::AnonymousDisabled);
        }
        if let Some(user) = self.current_user() {
            return Ok(user);
        }

        let user = UserHandle {
            uid: Uuid::new_v4().to_string(),
            anonymous: true,
        };
        info!(uid = %user.uid, "anonymous session established");
        self.state.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn current_user(&self) -> Option<UserHandle> {
        self.state.borrow().clone()
    }

    fn sign_out(&self) {
        if self.state.send_replace(None).is_some() {
            info!("signed out");
        }
    }

    fn watch(&self) -> watch::Receiver<Option<UserHandle>> {
        self.state.subscribe()
    }
}
