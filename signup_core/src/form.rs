use crate::validation::{self, ValidationState};
use thiserror::Error;

/// The inputs on the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Given name
    FirstName,

    /// Family name
    LastName,

    /// Contact and login address
    Email,

    /// Ten-digit phone number
    Phone,

    /// National Identity Card number. Free text; we don't check the format.
    Nic,

    /// The new password
    Password,

    /// The new password, again
    ConfirmPassword,
}

/// Raw field values, exactly as the user sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact and login address
    pub email: String,

    /// Always digits only, and never more than ten of them.
    pub phone: String,

    /// National Identity Card number
    pub nic: String,

    /// The new password
    pub password: String,

    /// The new password, again
    pub confirm_password: String,
}

impl FormData {
    /// Get the current value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Nic => &self.nic,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Get a mutable handle to a field's value
    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Nic => &mut self.nic,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

/// Live validation results, kept in sync with `FormData` on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validations {
    /// Is the email well-formed?
    pub email: ValidationState,

    /// Do the password and confirmation agree?
    pub password_match: ValidationState,

    /// Is the password strong enough?
    pub password_strength: ValidationState,

    /// Is the phone number ten digits?
    pub phone: ValidationState,
}

/// Form state: field values plus what we know about their validity.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    /// Current values
    data: FormData,

    /// Current validation state for the fields we check as you type
    validations: Validations,
}

impl SignUpForm {
    /// An empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Current validation state
    pub fn validations(&self) -> &Validations {
        &self.validations
    }

    /// Set a field to a new value and re-check anything that depends on it.
    /// Phone numbers are normalized on the way in.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Phone => {
                let phone = validation::normalize_phone(value);
                self.validations.phone = validation::validate_phone(&phone).into();
                self.data.phone = phone;
            }
            _ => value.clone_into(self.data.get_mut(field)),
        }

        match field {
            Field::Email => {
                self.validations.email = validation::validate_email(&self.data.email).into();
            }
            Field::Password => {
                self.validations.password_strength =
                    validation::validate_password_strength(&self.data.password).into();
                self.revalidate_password_match();
            }
            Field::ConfirmPassword => self.revalidate_password_match(),
            _ => (),
        }
    }

    /// Re-check that the password and confirmation agree
    fn revalidate_password_match(&mut self) {
        self.validations.password_match =
            validation::validate_password_match(&self.data.password, &self.data.confirm_password)
                .into();
    }

    /// Check the whole form before submitting. Checks run in a fixed order and
    /// the first failure wins. Checking the terms of service is the caller's
    /// business since it's not part of the data we send.
    ///
    /// ## Errors
    ///
    /// The first `FormError` we find, if any.
    pub fn check(&self, agreed_to_terms: bool) -> Result<(), FormError> {
        let data = &self.data;

        if data.first_name.trim().is_empty() {
            return Err(FormError::FirstNameRequired);
        }
        if data.last_name.trim().is_empty() {
            return Err(FormError::LastNameRequired);
        }
        if data.email.trim().is_empty() {
            return Err(FormError::EmailRequired);
        }
        if !validation::validate_email(&data.email).valid {
            return Err(FormError::EmailInvalid);
        }
        if data.phone.trim().is_empty() {
            return Err(FormError::PhoneRequired);
        }
        if !validation::is_phone(&data.phone) {
            return Err(FormError::PhoneInvalid);
        }
        if data.nic.trim().is_empty() {
            return Err(FormError::NicRequired);
        }
        if !validation::is_strong_password(&data.password) {
            return Err(FormError::PasswordWeak);
        }
        if !validation::validate_password_match(&data.password, &data.confirm_password).valid {
            return Err(FormError::PasswordMismatch);
        }
        if !agreed_to_terms {
            return Err(FormError::TermsNotAccepted);
        }

        Ok(())
    }
}

/// Reasons the form can't be submitted yet. The `Display` impl is the message
/// we show the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// No first name
    #[error("First name is required")]
    FirstNameRequired,

    /// No last name
    #[error("Last name is required")]
    LastNameRequired,

    /// No email
    #[error("Email address is required")]
    EmailRequired,

    /// Email doesn't look like an email
    #[error("Please enter a valid email address")]
    EmailInvalid,

    /// No phone number
    #[error("Phone number is required")]
    PhoneRequired,

    /// Phone number is the wrong length
    #[error("Phone number must be exactly 10 digits")]
    PhoneInvalid,

    /// No NIC
    #[error("NIC number is required")]
    NicRequired,

    /// Password isn't strong enough
    #[error("Password is too weak. Use 8+ chars with upper, lower, number, and symbol.")]
    PasswordWeak,

    /// Confirmation doesn't match
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The terms of service checkbox isn't checked
    #[error("You must agree to the Terms of Service and Privacy Policy")]
    TermsNotAccepted,
}
