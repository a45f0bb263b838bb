use serde::{Deserialize, Serialize};

/// Result of signing up (or in) with a Google account.
#[derive(Debug, Serialize, Deserialize)]
pub struct Resp {
    /// The email address on the Google account.
    pub email: String,
}

/// Where the Google sign-in endpoint lives.
pub const PATH: &str = "/api/v1/login/google";
