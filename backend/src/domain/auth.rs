//! Authentication primitives: login credentials and registration forms.
//!
//! Inbound adapters hand raw form values to these constructors, which
//! perform the presence and shape checks before any port is consulted.
//! Passwords are held in [`Zeroizing`] buffers so they are wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Minimum password length in characters accepted at registration.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Error returned when login payload values are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username or password was absent or blank.
    MissingField,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "Username and password are required"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use heritage::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some(" alice "), Some("secret1")).unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from optional raw form values.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let username = username.map(str::trim).unwrap_or_default();
        let password = password.unwrap_or_default();
        if username.is_empty() || password.is_empty() {
            return Err(LoginValidationError::MissingField);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a registration form is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// One of username, password or confirmation was absent or blank.
    MissingField,
    /// The password is shorter than [`PASSWORD_MIN_LEN`].
    PasswordTooShort { min: usize },
    /// Password and confirmation differ.
    PasswordMismatch,
    /// The username is present but malformed.
    InvalidUsername(UserValidationError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "All fields are required"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::InvalidUsername(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Validated registration request.
///
/// Checks run in a fixed order so each failure maps to exactly one message:
/// presence, password length, confirmation match, then username shape.
/// Username uniqueness needs storage and is checked by the account service.
///
/// # Examples
/// ```
/// use heritage::domain::{Registration, RegistrationError};
///
/// let err = Registration::try_from_parts(Some("alice"), Some("abcde"), Some("abcde"))
///     .unwrap_err();
/// assert_eq!(err, RegistrationError::PasswordTooShort { min: 6 });
///
/// let ok = Registration::try_from_parts(Some("alice"), Some("abcdef"), Some("abcdef"));
/// assert!(ok.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration form values.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
        confirm_password: Option<&str>,
    ) -> Result<Self, RegistrationError> {
        let (Some(username), Some(password), Some(confirm)) = (
            non_blank(username),
            non_empty(password),
            non_empty(confirm_password),
        ) else {
            return Err(RegistrationError::MissingField);
        };

        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(RegistrationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        if password != confirm {
            return Err(RegistrationError::PasswordMismatch);
        }

        let username = Username::new(username).map_err(RegistrationError::InvalidUsername)?;
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("pw"))]
    #[case(Some(""), Some("pw"))]
    #[case(Some("   "), Some("pw"))]
    #[case(Some("alice"), None)]
    #[case(Some("alice"), Some(""))]
    fn login_requires_both_fields(#[case] username: Option<&str>, #[case] password: Option<&str>) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("missing inputs must fail");
        assert_eq!(err, LoginValidationError::MissingField);
        assert_eq!(err.to_string(), "Username and password are required");
    }

    #[rstest]
    fn login_keeps_password_whitespace() {
        let creds =
            LoginCredentials::try_from_parts(Some("alice"), Some(" pw ")).expect("valid inputs");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case(None, Some("secret1"), Some("secret1"), RegistrationError::MissingField)]
    #[case(Some("alice"), None, Some("secret1"), RegistrationError::MissingField)]
    #[case(Some("alice"), Some("secret1"), None, RegistrationError::MissingField)]
    #[case(Some(" "), Some("secret1"), Some("secret1"), RegistrationError::MissingField)]
    #[case(
        Some("alice"),
        Some("abcde"),
        Some("abcde"),
        RegistrationError::PasswordTooShort { min: PASSWORD_MIN_LEN }
    )]
    #[case(Some("alice"), Some("abcdef"), Some("abcdeg"), RegistrationError::PasswordMismatch)]
    #[case(
        Some("ada lovelace"),
        Some("abcdef"),
        Some("abcdef"),
        RegistrationError::InvalidUsername(UserValidationError::UsernameContainsWhitespace)
    )]
    fn registration_rejections(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
        #[case] confirm: Option<&str>,
        #[case] expected: RegistrationError,
    ) {
        let err = Registration::try_from_parts(username, password, confirm)
            .expect_err("invalid registration");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(RegistrationError::MissingField, "All fields are required")]
    #[case(
        RegistrationError::PasswordTooShort { min: 6 },
        "Password must be at least 6 characters"
    )]
    #[case(RegistrationError::PasswordMismatch, "Passwords do not match")]
    fn registration_messages(#[case] error: RegistrationError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn short_password_is_reported_before_mismatch() {
        let err = Registration::try_from_parts(Some("alice"), Some("abc"), Some("xyz"))
            .expect_err("invalid registration");
        assert_eq!(err, RegistrationError::PasswordTooShort { min: 6 });
    }

    #[rstest]
    fn six_character_password_is_accepted() {
        let registration =
            Registration::try_from_parts(Some(" alice "), Some("abcdef"), Some("abcdef"))
                .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.password(), "abcdef");
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let password = "éééééé";
        assert!(Registration::try_from_parts(Some("alice"), Some(password), Some(password)).is_ok());
    }
}
