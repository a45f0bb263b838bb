use regex::Regex;
use std::sync::LazyLock;

/// Something shaped like `local@domain.tld`. We don't try to be any smarter
/// than this; the auth server gets the final say on whether an address works.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Symbols that count toward password strength.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()[]{}-_=+,.?;:";

/// Minimum number of characters in a strong password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// How many digits a phone number has.
pub const PHONE_DIGITS: usize = 10;

/// The result of checking a single input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Did the input pass?
    pub valid: bool,

    /// What to tell the user about it, whether it passed or not.
    pub message: &'static str,
}

impl Verdict {
    /// A passing verdict
    fn pass(message: &'static str) -> Self {
        Self {
            valid: true,
            message,
        }
    }

    /// A failing verdict
    fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message,
        }
    }
}

/// Check that an email address is present and looks like one.
pub fn validate_email(email: &str) -> Verdict {
    if email.is_empty() {
        Verdict::fail("Email is required")
    } else if !is_email(email) {
        Verdict::fail("Please enter a valid email address")
    } else {
        Verdict::pass("Email looks good!")
    }
}

/// Does this look like an email address?
pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Strip everything but digits out of a phone number and cap it at
/// `PHONE_DIGITS` digits.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Is this exactly `PHONE_DIGITS` digits, and nothing else?
pub fn is_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Check an already-normalized phone number.
pub fn validate_phone(phone: &str) -> Verdict {
    if phone.is_empty() {
        Verdict::fail("Phone number is required")
    } else if is_phone(phone) {
        Verdict::pass("Phone number looks good!")
    } else {
        Verdict::fail("Phone number must be exactly 10 digits")
    }
}

/// A strong password is at least `MIN_PASSWORD_LENGTH` characters long and
/// mixes lowercase, uppercase, digits, and something from `PASSWORD_SYMBOLS`.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Check password strength.
pub fn validate_password_strength(password: &str) -> Verdict {
    if is_strong_password(password) {
        Verdict::pass("Strong password")
    } else {
        Verdict::fail("Use 8+ chars incl. upper, lower, number, and symbol")
    }
}

/// Check that a password and its confirmation are both present and agree.
pub fn validate_password_match(password: &str, confirm: &str) -> Verdict {
    match (password.is_empty(), confirm.is_empty()) {
        (true, true) => Verdict::fail("Passwords are required"),
        (true, false) => Verdict::fail("Password is required"),
        (false, true) => Verdict::fail("Please confirm your password"),
        (false, false) if password != confirm => Verdict::fail("Passwords do not match"),
        (false, false) => Verdict::pass("Passwords match!"),
    }
}

/// What the form remembers about a validated field between edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Whether the field passed its last check.
    pub is_valid: bool,

    /// Whether the user has edited the field yet. We don't show a message
    /// for a field the user hasn't touched.
    pub is_touched: bool,

    /// The message from the last check.
    pub message: &'static str,
}

impl From<Verdict> for ValidationState {
    fn from(verdict: Verdict) -> Self {
        Self {
            is_valid: verdict.valid,
            is_touched: true,
            message: verdict.message,
        }
    }
}
