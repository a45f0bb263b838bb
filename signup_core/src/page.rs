use crate::auth::{self, register, AuthProvider};
use crate::form::{Field, SignUpForm};
use crate::notification::Notification;
use crate::route::Route;

/// What the user sees after a collaborator call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Toast or desktop notification to show
    pub notification: Notification,

    /// Where to go next. `None` means stay on the form.
    pub navigate: Option<Route>,
}

/// Everything on the sign-up page: the form, the terms checkbox, the inline
/// error, and a loading flag for each of the two ways to sign up.
#[derive(Debug, Default)]
pub struct SignUpPage {
    /// Field values and live validation
    form: SignUpForm,

    /// Has the user agreed to the terms of service and privacy policy?
    agreed_to_terms: bool,

    /// Error shown above the form
    error: Option<String>,

    /// An email/password sign-up is in flight
    loading: bool,

    /// A Google sign-up is in flight
    google_loading: bool,

    /// Show the password in plain text?
    show_password: bool,

    /// Show the password confirmation in plain text?
    show_confirm_password: bool,
}

impl SignUpPage {
    /// A fresh page
    pub fn new() -> Self {
        Self::default()
    }

    /// The form
    pub fn form(&self) -> &SignUpForm {
        &self.form
    }

    /// The inline error, if there is one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Has the user checked the terms box?
    pub fn agreed_to_terms(&self) -> bool {
        self.agreed_to_terms
    }

    /// Is an email/password sign-up in flight?
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Is a Google sign-up in flight?
    pub fn is_google_loading(&self) -> bool {
        self.google_loading
    }

    /// Should this field be shown in plain text? Only the password fields are
    /// ever masked.
    pub fn is_revealed(&self, field: Field) -> bool {
        match field {
            Field::Password => self.show_password,
            Field::ConfirmPassword => self.show_confirm_password,
            _ => true,
        }
    }

    /// Handle the user typing into a field. Inputs are locked while a sign-up
    /// is in flight, so edits are dropped then.
    pub fn input(&mut self, field: Field, value: &str) {
        if self.loading {
            tracing::debug!(?field, "ignoring edit while signing up");
            return;
        }

        self.form.set(field, value);
    }

    /// Check or uncheck the terms of service box.
    pub fn toggle_terms(&mut self) {
        if !self.loading {
            self.agreed_to_terms = !self.agreed_to_terms;
        }
    }

    /// Show or hide a password field. Does nothing for the other fields, or
    /// while we're submitting.
    pub fn toggle_reveal(&mut self, field: Field) {
        if self.loading {
            return;
        }

        match field {
            Field::Password => self.show_password = !self.show_password,
            Field::ConfirmPassword => self.show_confirm_password = !self.show_confirm_password,
            _ => (),
        }
    }

    /// Where the "already have an account?" link goes.
    pub fn sign_in_instead() -> Route {
        Route::Login
    }

    /// Start submitting the form. If everything checks out, we mark the page
    /// as loading and return the request to send to the auth provider. If not,
    /// the first problem becomes the inline error and we return `None`. We
    /// also return `None` if a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<register::Req> {
        if self.loading {
            return None;
        }

        self.error = None;

        if let Err(problem) = self.form.check(self.agreed_to_terms) {
            tracing::debug!(?problem, "form is not ready to submit");
            self.error = Some(problem.to_string());
            return None;
        }

        self.loading = true;

        let data = self.form.data();
        Some(register::Req {
            email: data.email.clone(),
            password: data.password.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            phone: data.phone.clone(),
            nic: data.nic.clone(),
        })
    }

    /// Finish a submission started with `begin_submit`.
    pub fn finish_submit(&mut self, email: &str, result: auth::error::Result<()>) -> Outcome {
        self.loading = false;

        match result {
            Ok(()) => {
                tracing::info!(email, "account created");

                Outcome {
                    notification: Notification::new(
                        "Account Created Successfully!",
                        "Please check your email to verify your account",
                    ),
                    navigate: Some(Route::VerifyEmail {
                        email: email.to_owned(),
                    }),
                }
            }
            Err(err) => self.fail("Sign-up Failed", &err, "Failed to create account"),
        }
    }

    /// Start a Google sign-up. This doesn't look at the form at all. Returns
    /// `false` if one is already in flight.
    pub fn begin_google(&mut self) -> bool {
        if self.google_loading {
            return false;
        }

        self.error = None;
        self.google_loading = true;

        true
    }

    /// Finish a sign-up started with `begin_google`.
    pub fn finish_google(&mut self, result: auth::error::Result<()>) -> Outcome {
        self.google_loading = false;

        match result {
            Ok(()) => {
                tracing::info!("google sign-up succeeded");

                Outcome {
                    notification: Notification::new(
                        "Google Sign-up Successful!",
                        "Welcome to SLT Prodigy Hub",
                    ),
                    navigate: Some(Route::Onboarding),
                }
            }
            Err(err) => self.fail(
                "Google Sign-up Failed",
                &err,
                "Google sign-up failed. Please try again.",
            ),
        }
    }

    /// Surface a collaborator failure inline and as a notification.
    fn fail(&mut self, title: &str, err: &auth::Error, fallback: &str) -> Outcome {
        tracing::warn!(?err, title, "sign-up failed");

        let mut message = err.to_string();
        if message.is_empty() {
            fallback.clone_into(&mut message);
        }

        self.error = Some(message.clone());

        Outcome {
            notification: Notification::destructive(title, message),
            navigate: None,
        }
    }

    /// Validate and submit the form against a provider in one go. Returns
    /// `None` if the form wasn't submitted; check `error` for why.
    pub async fn submit<A: AuthProvider>(&mut self, provider: &A) -> Option<Outcome> {
        let req = self.begin_submit()?;
        let result = provider.sign_up(&req).await;

        Some(self.finish_submit(&req.email, result))
    }

    /// Sign up with Google against a provider in one go. Returns `None` if a
    /// Google sign-up was already in flight.
    pub async fn sign_up_with_google<A: AuthProvider>(&mut self, provider: &A) -> Option<Outcome> {
        if !self.begin_google() {
            return None;
        }
        let result = provider.login_with_google().await;

        Some(self.finish_google(result))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::form;
    use crate::notification::Variant;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// An auth provider that records what it was asked to do
    #[derive(Default)]
    struct FakeProvider {
        /// How many times `sign_up` was called
        sign_ups: AtomicUsize,

        /// How many times `login_with_google` was called
        google_logins: AtomicUsize,

        /// The last request we saw
        last: Mutex<Option<register::Req>>,

        /// Fail with this message, if set
        reject_with: Option<String>,
    }

    impl FakeProvider {
        /// A provider that turns everything down
        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        /// What to answer with
        fn answer(&self) -> auth::error::Result<()> {
            match &self.reject_with {
                Some(message) => Err(auth::Error::Client(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl AuthProvider for FakeProvider {
        async fn sign_up(&self, req: &register::Req) -> auth::error::Result<()> {
            self.sign_ups.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(req.clone());
            self.answer()
        }

        async fn login_with_google(&self) -> auth::error::Result<()> {
            self.google_logins.fetch_add(1, Ordering::SeqCst);
            self.answer()
        }
    }

    /// A page with a complete, valid form and the terms accepted
    fn ready() -> SignUpPage {
        let mut page = SignUpPage {
            form: form::test::filled(),
            ..SignUpPage::default()
        };
        page.toggle_terms();
        page
    }

    #[test_log::test(tokio::test)]
    async fn successful_submit_goes_to_verify_email() {
        let provider = FakeProvider::default();
        let mut page = ready();

        let outcome = page.submit(&provider).await.unwrap();

        assert_eq!(
            outcome.navigate,
            Some(Route::VerifyEmail {
                email: "ada@example.com".to_string()
            })
        );
        assert_eq!(outcome.notification.title, "Account Created Successfully!");
        assert_eq!(outcome.notification.variant, Variant::Default);
        assert_eq!(page.error(), None);
        assert!(!page.is_loading());
    }

    #[test_log::test(tokio::test)]
    async fn submit_sends_every_field() {
        let provider = FakeProvider::default();
        let mut page = ready();

        page.submit(&provider).await.unwrap();

        assert_eq!(
            provider.last.lock().unwrap().clone(),
            Some(register::Req {
                email: "ada@example.com".to_string(),
                password: "Abc123!@".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                phone: "0771234567".to_string(),
                nic: "200322700285".to_string(),
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn invalid_form_never_reaches_provider() {
        let provider = FakeProvider::default();
        let mut page = ready();
        page.input(Field::Phone, "077");

        assert_eq!(page.submit(&provider).await, None);
        assert_eq!(provider.sign_ups.load(Ordering::SeqCst), 0);
        assert_eq!(page.error(), Some("Phone number must be exactly 10 digits"));
        assert!(!page.is_loading());
    }

    #[test_log::test(tokio::test)]
    async fn unchecked_terms_never_reach_provider() {
        let provider = FakeProvider::default();
        let mut page = ready();
        page.toggle_terms();

        assert_eq!(page.submit(&provider).await, None);
        assert_eq!(provider.sign_ups.load(Ordering::SeqCst), 0);
        assert_eq!(
            page.error(),
            Some("You must agree to the Terms of Service and Privacy Policy")
        );
    }

    #[test_log::test(tokio::test)]
    async fn empty_page_reports_first_name_first() {
        let provider = FakeProvider::default();
        let mut page = SignUpPage::new();

        assert_eq!(page.submit(&provider).await, None);
        assert_eq!(page.error(), Some("First name is required"));
    }

    #[test_log::test(tokio::test)]
    async fn rejection_is_shown_inline_and_as_notification() {
        let provider = FakeProvider::rejecting("An account with this email already exists");
        let mut page = ready();

        let outcome = page.submit(&provider).await.unwrap();

        assert_eq!(outcome.navigate, None);
        assert_eq!(
            outcome.notification,
            Notification::destructive("Sign-up Failed", "An account with this email already exists")
        );
        assert_eq!(page.error(), Some("An account with this email already exists"));
        assert!(!page.is_loading());
    }

    #[test_log::test(tokio::test)]
    async fn empty_rejection_falls_back() {
        let provider = FakeProvider::rejecting("");
        let mut page = ready();

        let outcome = page.submit(&provider).await.unwrap();

        assert_eq!(outcome.notification.description, "Failed to create account");
        assert_eq!(page.error(), Some("Failed to create account"));
    }

    #[test_log::test(tokio::test)]
    async fn form_stays_usable_after_failure() {
        let provider = FakeProvider::rejecting("nope");
        let mut page = ready();
        page.submit(&provider).await.unwrap();

        page.input(Field::FirstName, "Grace");

        assert_eq!(page.form().data().first_name, "Grace");
        assert!(page.submit(&FakeProvider::default()).await.is_some());
    }

    #[test]
    fn submit_is_disabled_while_loading() {
        let mut page = ready();

        assert!(page.begin_submit().is_some());
        assert!(page.is_loading());
        assert_eq!(page.begin_submit(), None);
    }

    #[test]
    fn edits_are_ignored_while_loading() {
        let mut page = ready();
        page.begin_submit().unwrap();

        page.input(Field::FirstName, "Grace");
        page.toggle_terms();

        assert_eq!(page.form().data().first_name, "Ada");
        assert!(page.agreed_to_terms());
    }

    #[test]
    fn new_submission_clears_old_error() {
        let mut page = SignUpPage::new();
        page.begin_submit();
        assert!(page.error().is_some());

        page.form = form::test::filled();
        page.toggle_terms();
        page.begin_submit().unwrap();

        assert_eq!(page.error(), None);
    }

    #[test_log::test(tokio::test)]
    async fn google_goes_to_onboarding() {
        let provider = FakeProvider::default();
        let mut page = SignUpPage::new();

        let outcome = page.sign_up_with_google(&provider).await.unwrap();

        assert_eq!(outcome.navigate, Some(Route::Onboarding));
        assert_eq!(outcome.notification.title, "Google Sign-up Successful!");
        assert_eq!(provider.google_logins.load(Ordering::SeqCst), 1);
        assert_eq!(provider.sign_ups.load(Ordering::SeqCst), 0);
        assert!(!page.is_google_loading());
    }

    #[test_log::test(tokio::test)]
    async fn google_failure() {
        let provider = FakeProvider::rejecting("popup closed");
        let mut page = SignUpPage::new();

        let outcome = page.sign_up_with_google(&provider).await.unwrap();

        assert_eq!(
            outcome.notification,
            Notification::destructive("Google Sign-up Failed", "popup closed")
        );
        assert_eq!(page.error(), Some("popup closed"));
    }

    #[test_log::test(tokio::test)]
    async fn google_empty_rejection_falls_back() {
        let provider = FakeProvider::rejecting("");
        let mut page = SignUpPage::new();

        page.sign_up_with_google(&provider).await.unwrap();

        assert_eq!(page.error(), Some("Google sign-up failed. Please try again."));
    }

    #[test]
    fn google_clears_error() {
        let mut page = SignUpPage::new();
        page.begin_submit();

        assert!(page.begin_google());
        assert_eq!(page.error(), None);
    }

    #[test]
    fn loading_flags_are_independent() {
        let mut page = ready();

        assert!(page.begin_google());
        assert!(!page.begin_google());
        assert!(page.begin_submit().is_some());
        assert!(page.is_loading());
        assert!(page.is_google_loading());
    }

    #[test]
    fn passwords_are_masked_until_revealed() {
        let mut page = SignUpPage::new();

        assert!(!page.is_revealed(Field::Password));
        assert!(!page.is_revealed(Field::ConfirmPassword));
        assert!(page.is_revealed(Field::Email));

        page.toggle_reveal(Field::Password);

        assert!(page.is_revealed(Field::Password));
        assert!(!page.is_revealed(Field::ConfirmPassword));
    }

    #[test]
    fn reveal_is_locked_while_submitting() {
        let mut page = ready();
        page.begin_submit().unwrap();

        page.toggle_reveal(Field::Password);
        page.toggle_reveal(Field::ConfirmPassword);

        assert!(!page.is_revealed(Field::Password));
        assert!(!page.is_revealed(Field::ConfirmPassword));
    }

    #[test]
    fn reveal_unlocks_once_submission_finishes() {
        let mut page = ready();
        page.begin_submit().unwrap();
        page.finish_submit("ada@example.com", Err(auth::Error::Server));

        page.toggle_reveal(Field::Password);

        assert!(page.is_revealed(Field::Password));
    }

    #[test]
    fn sign_in_instead_goes_to_login() {
        assert_eq!(SignUpPage::sign_in_instead(), Route::Login);
    }
}
