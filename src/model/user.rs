use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::validation;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Overwrite the user's fields with `changes`.
    ///
    /// `email` is replaced even when `changes.email` is `None`, clearing it.
    pub fn apply(&mut self, changes: UserChanges) {
        self.name = changes.name;
        self.email = changes.email;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = super::next_timestamp(self.updated_at);
    }
}

/// Arguments of `createUser`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_name(&self.name)?;
        validation::validate_optional_email(self.email.as_deref())
    }
}

/// Arguments of `updateUser`, minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub name: String,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn validate(&self) -> Result<()> {
        validation::validate_name(&self.name)?;
        validation::validate_optional_email(self.email.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            name: "Alice".to_string(),
            email: Some("a@x.com".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_without_email_clears_it() {
        let mut user = sample_user();
        user.apply(UserChanges {
            name: "Alicia".to_string(),
            email: None,
        });
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut user = sample_user();
        let future = Utc::now() + Duration::hours(1);
        user.updated_at = future;
        user.touch();
        assert_eq!(user.updated_at, future);
    }

    #[test]
    fn test_new_user_validation() {
        assert!(NewUser::new("Bob").validate().is_ok());
        assert!(NewUser::new("").validate().is_err());
        assert!(
            NewUser::new("Bob")
                .with_email(Some("not-an-email".to_string()))
                .validate()
                .is_err()
        );
    }
}
