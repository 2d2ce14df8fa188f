//! User record and validated insert payload

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for user names
const MAX_NAME_LEN: usize = 256;

/// Maximum length for email addresses (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 320;

/// User record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Reject empty/whitespace-only and over-long values. The value itself is
/// kept exactly as supplied.
fn check(field: &'static str, s: &str, max: usize) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name.
    ///
    /// # Rules
    /// - Non-empty (whitespace only counts as empty)
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use userctl_store::models::UserName;
    ///
    /// assert!(UserName::new("Leonardo Porto").is_ok());
    /// assert!(UserName::new("").is_err());
    /// assert!(UserName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check("name", s, MAX_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated email address.
///
/// Only presence and length are checked here; uniqueness is the store's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check("email", s, MAX_EMAIL_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Insert payload for the `"user"` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
}

impl NewUser {
    /// Validate both fields, reporting the name first.
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_values() {
        let user = NewUser::new("Leonardo Porto", "leo@email.com").unwrap();
        assert_eq!(user.name.as_str(), "Leonardo Porto");
        assert_eq!(user.email.as_str(), "leo@email.com");
    }

    #[test]
    fn keeps_value_untrimmed() {
        let name = UserName::new("  Ana ").unwrap();
        assert_eq!(name.as_str(), "  Ana ");
    }

    #[test]
    fn rejects_empty_name() {
        let err = NewUser::new("", "a@b.c").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn rejects_whitespace_email() {
        let err = NewUser::new("A", " \t").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "email" });
    }

    #[test]
    fn max_length() {
        let name_256 = "a".repeat(256);
        assert!(UserName::new(&name_256).is_ok());

        let name_257 = "a".repeat(257);
        let err = UserName::new(&name_257).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // 256 two-byte chars
        let name = "é".repeat(256);
        assert!(UserName::new(&name).is_ok());
    }

    #[test]
    fn user_serializes_flat() {
        let user = User {
            id: 1,
            name: "Leonardo Porto".to_owned(),
            email: "leo@email.com".to_owned(),
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":1,"name":"Leonardo Porto","email":"leo@email.com"}"#
        );
    }
}
