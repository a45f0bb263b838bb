use std::future::Future;

/// The HTTP implementation of `AuthProvider`
pub mod client;
pub use client::Client;

/// Things that can go wrong talking to the auth provider
pub mod error;
pub use error::Error;

/// Sign up (or in) with a Google account
pub mod google;

/// Create an account with an email and password
pub mod register;

/// The service that actually creates accounts. The form only validates and
/// hands off; everything else happens on the other side of this trait.
pub trait AuthProvider {
    /// Create an account. The account needs email verification before it can
    /// be used.
    fn sign_up(&self, req: &register::Req) -> impl Future<Output = error::Result<()>> + Send;

    /// Sign up with a Google account instead of filling in the form.
    fn login_with_google(&self) -> impl Future<Output = error::Result<()>> + Send;
}
