use super::Action;
use signup_core::{
    auth::{self, register},
    AuthProvider, Notification,
};

/// Connections to external services that effects use. We keep these around to
/// share one connection pool across the app as a whole.
pub struct EffectContext {
    /// The auth provider
    auth: auth::Client,
}

impl EffectContext {
    /// Get a new `EffectContext` talking to the given auth server
    pub fn new(server: String) -> Self {
        Self {
            auth: auth::Client::new(server),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Create an account with the form's contents
    SignUp(register::Req),

    /// Sign up with a Google account
    SignUpWithGoogle,

    /// Show a desktop notification
    Notify(Notification),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self.run_inner(conn).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(self, conn: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::SignUp(req) => {
                tracing::info!(email = %req.email, "signing up");

                let result = conn.auth.sign_up(&req).await;

                Ok(Some(Action::SignedUp {
                    email: req.email,
                    result,
                }))
            }

            Self::SignUpWithGoogle => {
                tracing::info!("signing up with google");

                let result = conn.auth.login_with_google().await;

                Ok(Some(Action::SignedUpWithGoogle(result)))
            }

            Self::Notify(notification) => {
                tracing::debug!(title = %notification.title, "showing desktop notification");

                notify_rust::Notification::new()
                    .appname("signup")
                    .summary(&notification.title)
                    .body(&notification.description)
                    .show()?;

                Ok(None)
            }
        }
    }
}

/// Problems that can happen while running an `Effect`. Sign-up failures
/// aren't here: those go back to the form as data.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// The desktop didn't take our notification, for example because there's
    /// no notification daemon running.
    #[error("Couldn't show a desktop notification: {0}")]
    Notification(#[from] notify_rust::error::Error),
}
