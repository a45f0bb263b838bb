use serde::{Deserialize, Serialize};

/// The request to create a new account with an email and password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Ten-digit phone number
    pub phone: String,

    /// National Identity Card number
    pub nic: String,
}

/// Result of creating an account. The account isn't usable until the email
/// address has been verified.
#[derive(Debug, Serialize, Deserialize)]
pub struct Resp {
    /// Email that was successfully registered.
    pub email: String,
}

/// Where the register endpoint lives.
pub const PATH: &str = "/api/v1/register";
