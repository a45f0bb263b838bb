use std::fmt::{self, Display};
use url::{form_urlencoded, Url};

/// Where to send the user after the form is done with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Check your inbox. Carries the address we sent the verification to.
    VerifyEmail {
        /// The address the account was registered with
        email: String,
    },

    /// First-run setup for accounts that came in through Google.
    Onboarding,

    /// Already have an account? Sign in instead.
    Login,
}

impl Route {
    /// Resolve this route against the app's base URL.
    ///
    /// ## Errors
    ///
    /// If the base URL can't have a path joined onto it.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.to_string())
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerifyEmail { email } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("from", "signup")
                    .append_pair("email", email)
                    .finish();

                write!(f, "/verify-email?{query}")
            }
            Self::Onboarding => f.write_str("/user?tab=qualification&from=signup"),
            Self::Login => f.write_str("/login"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_email_encodes_the_address() {
        let route = Route::VerifyEmail {
            email: "ada+test@example.com".to_string(),
        };

        assert_eq!(
            route.to_string(),
            "/verify-email?from=signup&email=ada%2Btest%40example.com"
        );
    }

    #[test]
    fn onboarding() {
        assert_eq!(
            Route::Onboarding.to_string(),
            "/user?tab=qualification&from=signup"
        );
    }

    #[test]
    fn resolves_against_base() {
        let base = Url::parse("https://app.example.com/some/page").unwrap();

        assert_eq!(
            Route::Login.resolve(&base).unwrap().as_str(),
            "https://app.example.com/login"
        );
    }
}
