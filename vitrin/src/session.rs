//! Session gate: routes the top-level view from authentication state.
//!
//! One process-wide [`SessionController`] owns the subscription surface:
//! every session change is published on a single [`watch`] channel and
//! observers unsubscribe by dropping their receiver. The routing rule is
//! the whole state machine — a present session shows the dashboard, an
//! absent one the landing page, and a failed auth-subsystem bootstrap
//! pins the gate to a configuration-error view for the process lifetime.

use tokio::sync::watch;

use vitrin_types::account::Session;

use crate::auth::AuthClient;
use crate::error::Result;

/// Top-level view selected by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Auth,
    Dashboard,
    ConfigurationError,
}

/// Observable gate state.
#[derive(Debug, Clone)]
pub struct GateState {
    pub view: View,
    /// Present exactly when `view` is [`View::Dashboard`].
    pub session: Option<Session>,
    /// Diagnostic shown by the configuration-error view.
    pub init_error: Option<String>,
}

impl GateState {
    fn landing() -> Self {
        Self {
            view: View::Landing,
            session: None,
            init_error: None,
        }
    }

    fn configuration_error(message: String) -> Self {
        Self {
            view: View::ConfigurationError,
            session: None,
            init_error: Some(message),
        }
    }
}

/// Process-wide session controller.
pub struct SessionController {
    auth: Option<AuthClient>,
    state: watch::Sender<GateState>,
}

impl SessionController {
    /// Build the controller from the auth service's environment
    /// configuration. A failed bootstrap routes to the
    /// configuration-error view instead of failing construction.
    #[must_use]
    pub fn from_env() -> Self {
        match AuthClient::from_env() {
            Ok(auth) => Self::new(auth),
            Err(err) => Self::with_init_error(err.to_string()),
        }
    }

    /// Controller over a working auth client, starting on the landing view.
    #[must_use]
    pub fn new(auth: AuthClient) -> Self {
        let (state, _) = watch::channel(GateState::landing());
        Self {
            auth: Some(auth),
            state,
        }
    }

    /// Controller pinned to the configuration-error view.
    #[must_use]
    pub fn with_init_error(message: impl Into<String>) -> Self {
        let (state, _) = watch::channel(GateState::configuration_error(message.into()));
        Self { auth: None, state }
    }

    /// Observe routing changes. Drop the receiver to unsubscribe.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Snapshot of the current gate state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    /// The current session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    /// Initial session fetch: validate a persisted access token against
    /// the auth service. A valid token routes to the dashboard; anything
    /// else routes to landing.
    pub async fn restore_session(&self, access_token: &str) {
        let Some(auth) = &self.auth else {
            return;
        };
        match auth.get_user(access_token).await {
            Ok(user) => self.apply_session(Some(Session {
                access_token: access_token.to_string(),
                token_type: None,
                expires_in: None,
                expires_at: None,
                refresh_token: None,
                user,
            })),
            Err(err) => {
                tracing::debug!(error = %err, "stored session rejected");
                self.apply_session(None);
            }
        }
    }

    /// Landing page's get-started action: show the auth view.
    pub fn begin_auth(&self) {
        self.state.send_modify(|state| {
            if state.view == View::Landing {
                state.view = View::Auth;
            }
        });
    }

    /// Sign in with email/password credentials. On success the gate
    /// routes to the dashboard; on failure the state is unchanged and the
    /// error is returned for the auth view to display.
    ///
    /// # Errors
    /// Returns the auth service's rejection or a transport error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let Some(auth) = &self.auth else {
            return Ok(());
        };
        let session = auth.sign_in_with_password(email, password).await?;
        self.apply_session(Some(session));
        Ok(())
    }

    /// Sign out. The remote invalidation is best-effort: its failure is
    /// logged and swallowed, and local state is cleared regardless.
    pub async fn sign_out(&self) {
        if let (Some(auth), Some(session)) = (&self.auth, self.current_session()) {
            if let Err(err) = auth.sign_out(&session.access_token).await {
                tracing::warn!(error = %err, "remote sign-out failed; clearing local session");
            }
        }
        self.apply_session(None);
    }

    /// The routing rule applied to every session-change event.
    fn apply_session(&self, session: Option<Session>) {
        self.state.send_modify(|state| {
            if state.init_error.is_some() {
                return;
            }
            match session {
                Some(session) => {
                    state.session = Some(session);
                    state.view = View::Dashboard;
                }
                None => {
                    state.session = None;
                    state.view = View::Landing;
                }
            }
        });
    }
}
