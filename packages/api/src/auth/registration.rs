//! Local validation of the sign-up form.

use crate::error::ApiError;
use crate::models::RegisterRequest;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Raw fields of the registration form.
#[derive(Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Check the form top to bottom and build the request body.
    ///
    /// Names and contact fields are trimmed; the password is sent as typed.
    pub fn validate(&self) -> Result<RegisterRequest, ApiError> {
        let required = [
            ("firstName", &self.first_name, "First name is required"),
            ("lastName", &self.last_name, "Last name is required"),
            ("username", &self.username, "Username is required"),
            ("email", &self.email, "Email is required"),
            ("password", &self.password, "Password is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                return Err(ApiError::validation(field, message));
            }
        }
        if self.password != self.confirm_password {
            return Err(ApiError::validation(
                "confirmPassword",
                "Passwords do not match",
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
