//! Client-side form validation.

use api::{LoginRequest, SignupRequest, UpdatePasswordRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("The new password must differ from the current one")]
    PasswordUnchanged,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

fn email(value: &str) -> Result<String, FormError> {
    let value = required(value, "Email")?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(value),
        _ => Err(FormError::InvalidEmail),
    }
}

/// Passwords are sent as typed, only emptiness is checked.
fn password(value: &str, field: &'static str) -> Result<String, FormError> {
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: email(&self.email)?,
            password: password(&self.password, "Password")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, FormError> {
        Ok(SignupRequest {
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            email: email(&self.email)?,
            password: password(&self.password, "Password")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<UpdatePasswordRequest, FormError> {
        let current_password = password(&self.current_password, "Current password")?;
        let new_password = password(&self.new_password, "New password")?;
        if new_password == current_password {
            return Err(FormError::PasswordUnchanged);
        }
        if new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(UpdatePasswordRequest {
            current_password,
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form() {
        let form = LoginForm {
            email: "  ana@example.com ".into(),
            password: "secret".into(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, "ana@example.com");
        assert_eq!(request.password, "secret");

        let missing = LoginForm {
            email: "ana@example.com".into(),
            password: String::new(),
        };
        assert_eq!(missing.validate(), Err(FormError::Required("Password")));
    }

    #[test]
    fn test_email_shape() {
        for bad in ["ana", "@example.com", "ana@localhost"] {
            let form = LoginForm {
                email: bad.into(),
                password: "x".into(),
            };
            assert_eq!(form.validate(), Err(FormError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_signup_requires_every_field() {
        let mut form = SignupForm {
            first_name: "Ana".into(),
            last_name: " ".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("Last name")));

        form.last_name = "Lopez".into();
        let request = form.validate().unwrap();
        assert_eq!(request.first_name, "Ana");
        assert_eq!(request.last_name, "Lopez");
    }

    #[test]
    fn test_password_form() {
        let mut form = PasswordForm {
            current_password: "old".into(),
            new_password: "old".into(),
            confirm_password: "old".into(),
        };
        assert_eq!(form.validate(), Err(FormError::PasswordUnchanged));

        form.new_password = "new".into();
        assert_eq!(form.validate(), Err(FormError::PasswordMismatch));

        form.confirm_password = "new".into();
        let request = form.validate().unwrap();
        assert_eq!(request.current_password, "old");
        assert_eq!(request.new_password, "new");

        form.new_password.clear();
        assert_eq!(form.validate(), Err(FormError::Required("New password")));
    }
}
