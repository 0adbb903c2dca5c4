//! User service for identifying who is talking to Riley.
//!
//! There is no authentication; the identity is whatever the process was
//! started with.

/// Identifier used when nothing else is configured.
pub const DEFAULT_USER_ID: &str = "user-1";

/// Service for retrieving user information.
pub trait UserService: Send + Sync {
    /// Returns the identifier sent with every backend request.
    fn user_id(&self) -> String;
}

/// Single-user implementation backed by a fixed identifier.
#[derive(Debug, Clone)]
pub struct DefaultUserService {
    user_id: String,
}

impl DefaultUserService {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl Default for DefaultUserService {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}

impl UserService for DefaultUserService {
    fn user_id(&self) -> String {
        self.user_id.clone()
    }
}
