//! User self-registration.

use crate::error::{AppError, CREDENTIALS_REQUIRED, Result, USER_EXISTS};
use parking_lot::Mutex;

/// Message returned on successful registration.
pub const REGISTERED: &str = "User successfully registered. Now you can login";

/// A registered user.
///
/// The password is kept as given.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Password, opaque.
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Append-only registry of users.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Mutex<Vec<User>>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// Both fields must be present and non-empty. The uniqueness check and
    /// the append happen under one lock.
    pub fn register(&self, username: Option<&str>, password: Option<&str>) -> Result<&'static str> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AppError::InvalidInput(CREDENTIALS_REQUIRED.to_string())),
        };

        let mut users = self.users.lock();
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::AlreadyExists(USER_EXISTS.to_string()));
        }

        users.push(User {
            username: username.to_string(),
            password: password.to_string(),
        });

        tracing::info!(username = %username, total = users.len(), "Registered user");
        Ok(REGISTERED)
    }
}

#[cfg(test)]
impl UserRegistry {
    /// Whether `username` is registered.
    pub fn contains(&self, username: &str) -> bool {
        self.users.lock().iter().any(|u| u.username == username)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    /// Whether nobody has registered.
    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }

    /// Usernames in registration order.
    pub fn usernames(&self) -> Vec<String> {
        self.users
            .lock()
            .iter()
            .map(|u| u.username.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_duplicate() {
        let registry = UserRegistry::new();

        assert_eq!(registry.register(Some("bob"), Some("pw")).unwrap(), REGISTERED);
        assert!(matches!(
            registry.register(Some("bob"), Some("pw2")),
            Err(AppError::AlreadyExists(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let registry = UserRegistry::new();

        for (u, p) in [
            (None, Some("pw")),
            (Some("bob"), None),
            (Some(""), Some("pw")),
            (Some("bob"), Some("")),
            (Some(""), Some("")),
            (None, None),
        ] {
            assert!(matches!(
                registry.register(u, p),
                Err(AppError::InvalidInput(_))
            ));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let user = User {
            username: "bob".to_string(),
            password: "secret".to_string(),
        };
        assert!(!format!("{:?}", user).contains("secret"));
    }
}
