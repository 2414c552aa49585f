//! Mock account flows: sign-in, sign-up and a fabricated Google identity.
//!
//! Nothing is verified against stored credentials. Requests are validated for
//! required fields and password rules, then a [`User`] is issued with an id
//! from an [`IdentityIssuer`]. Every failure is terminal for the request.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Shortest password accepted at sign-up, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation failures for account requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The payload is the human-readable description of the required fields.
    #[error("{0} are required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// How an account was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Password,
    Google,
}

impl Provider {
    fn id_prefix(self) -> &'static str {
        match self {
            Provider::Password => "user",
            Provider::Google => "google",
        }
    }
}

/// Issues opaque, unique user identifiers.
pub trait IdentityIssuer: Send + Sync {
    fn issue(&self, provider: Provider) -> String;
}

/// Default issuer: `<provider prefix>_<uuid v4>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIssuer;

impl IdentityIssuer for UuidIssuer {
    fn issue(&self, provider: Provider) -> String {
        format!("{}_{}", provider.id_prefix(), Uuid::new_v4().simple())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: Option<String>,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingField("Email and password"));
        }
        Ok(())
    }
}

impl SignUpRequest {
    /// Checks run in order: presence, confirmation, then length.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingField("All fields"));
        }
        if self.confirm_password.as_deref() != Some(self.password.as_str()) {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

/// Accept any well-formed sign-in; the display name is the email's local part.
pub fn sign_in(req: &SignInRequest, issuer: &dyn IdentityIssuer) -> Result<User, AuthError> {
    if let Err(err) = req.validate() {
        warn!(error = %err, "sign_in_rejected");
        return Err(err);
    }

    let name = req.email.split('@').next().unwrap_or_default().to_string();
    let user = User {
        id: issuer.issue(Provider::Password),
        name,
        email: req.email.clone(),
        provider: None,
    };
    info!(user_id = %user.id, "sign_in_success");
    Ok(user)
}

pub fn sign_up(req: &SignUpRequest, issuer: &dyn IdentityIssuer) -> Result<User, AuthError> {
    if let Err(err) = req.validate() {
        warn!(error = %err, "sign_up_rejected");
        return Err(err);
    }

    let user = User {
        id: issuer.issue(Provider::Password),
        name: req.name.clone(),
        email: req.email.clone(),
        provider: None,
    };
    info!(user_id = %user.id, "sign_up_success");
    Ok(user)
}

/// Fabricated identity standing in for a completed Google OAuth flow.
pub fn google_user(issuer: &dyn IdentityIssuer) -> User {
    User {
        id: issuer.issue(Provider::Google),
        name: "Google User".to_string(),
        email: "user@gmail.com".to_string(),
        provider: Some(Provider::Google),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedIssuer;

    impl IdentityIssuer for FixedIssuer {
        fn issue(&self, provider: Provider) -> String {
            format!("{}_fixed", provider.id_prefix())
        }
    }

    fn signup(password: &str, confirm: Option<&str>) -> SignUpRequest {
        SignUpRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: password.into(),
            confirm_password: confirm.map(Into::into),
        }
    }

    #[test]
    fn sign_in_derives_name_from_email() {
        let req = SignInRequest {
            email: "sam.lee@example.com".into(),
            password: "x".into(),
        };
        let user = sign_in(&req, &FixedIssuer).unwrap();
        assert_eq!(user.name, "sam.lee");
        assert_eq!(user.id, "user_fixed");
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let req = SignInRequest {
            email: "sam@example.com".into(),
            password: String::new(),
        };
        let err = sign_in(&req, &FixedIssuer).unwrap_err();
        assert_eq!(err, AuthError::MissingField("Email and password"));
        assert_eq!(err.to_string(), "Email and password are required");
    }

    #[test]
    fn sign_up_checks_in_order() {
        let mut missing = signup("abc", Some("xyz"));
        missing.name.clear();
        assert_eq!(missing.validate(), Err(AuthError::MissingField("All fields")));

        // Mismatch is reported before length.
        assert_eq!(signup("abc", Some("xyz")).validate(), Err(AuthError::PasswordMismatch));
        assert_eq!(signup("abc", None).validate(), Err(AuthError::PasswordMismatch));
        assert_eq!(
            signup("abc", Some("abc")).validate(),
            Err(AuthError::PasswordTooShort { min: 6 })
        );
        assert!(signup("abcdef", Some("abcdef")).validate().is_ok());
    }

    #[test]
    fn too_short_message_names_minimum() {
        let err = AuthError::PasswordTooShort { min: MIN_PASSWORD_LEN };
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn sign_up_request_reads_camel_case() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"name":"Ada","email":"a@b.c","password":"secret1","confirmPassword":"secret1"}"#,
        )
        .unwrap();
        let user = sign_up(&req, &FixedIssuer).unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn uuid_issuer_prefixes_provider() {
        let issuer = UuidIssuer;
        let a = issuer.issue(Provider::Password);
        let b = issuer.issue(Provider::Password);
        assert!(a.starts_with("user_"));
        assert_ne!(a, b);
        assert!(google_user(&issuer).id.starts_with("google_"));
    }
}
