/// Input validation for accounts and tasks
///
/// Checks run before anything touches storage, so invalid input never costs a
/// password hash or a connection.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Accepted email shape: `local@domain.tld` with a TLD of at least two letters
pub static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Date format for `due_date`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Request to create a new account
///
/// The password is plaintext here and is hashed before the insert.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct NewAccount {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(regex(path = *EMAIL_SHAPE, message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl NewAccount {
    /// Builds an account request from borrowed or owned strings
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keeps the password out of logs and panic messages.
impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request to create a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTask {
    /// Owning user's id
    pub owner_id: i64,

    #[validate(length(min = 1, message = "Task name is required"))]
    pub name: String,

    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    pub priority: Option<String>,

    #[validate(length(min = 1, message = "Task status is required"))]
    pub status: String,
}

/// Returns true if `email` has the `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Parses a due date typed as `YYYY-MM-DD`
///
/// An empty string means "no due date".
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, ValidationErrors> {
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| field_error("due_date", "date", "Due date must be YYYY-MM-DD"))
}

/// Rejects an empty value for a required field
pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationErrors> {
    if value.is_empty() {
        Err(field_error(field, "length", "Value is required"))
    } else {
        Ok(())
    }
}

fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));

    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}
