use crossterm::event::KeyEvent;
use signup_core::auth;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The auth provider answered an email/password sign-up
    SignedUp {
        /// The address we registered
        email: String,

        /// What the provider said
        result: auth::error::Result<()>,
    },

    /// The auth provider answered a Google sign-up
    SignedUpWithGoogle(auth::error::Result<()>),

    /// Something bad happened; display it to the user
    Problem(String),
}
