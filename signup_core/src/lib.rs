//! Everything about signing up for an account that isn't drawing it on the
//! screen: validation rules, form state, and the hand-off to the auth
//! provider.

/// Talking to the service that actually creates accounts.
pub mod auth;
pub use auth::AuthProvider;

/// Field values and live validation state.
pub mod form;
pub use form::{Field, FormData, FormError, SignUpForm};

/// Messages for the user outside the form.
pub mod notification;
pub use notification::Notification;

/// The sign-up page as a whole: form plus submission flows.
pub mod page;
pub use page::{Outcome, SignUpPage};

/// Where to send the user next.
pub mod route;
pub use route::Route;

/// Checking individual inputs.
pub mod validation;
