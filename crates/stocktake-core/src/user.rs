//! User accounts and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// Role
// ============================================================================

/// Access tier of a user.
///
/// Authorization is two-tier: `viewer` is read-only, every other role may
/// also create, edit, and delete products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access.
    Admin,
    /// Regular operator; may modify inventory.
    #[default]
    User,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Every known role, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Viewer];

    /// Whether this role may mutate products.
    pub fn can_modify(self) -> bool {
        !matches!(self, Role::Viewer)
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                Error::validation_field(
                    "role",
                    format!("unknown role '{s}' (expected admin, user, or viewer)"),
                )
            })
    }
}

// ============================================================================
// User
// ============================================================================

/// A stored user account, including the password hash.
#[derive(Clone, PartialEq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Access tier.
    pub role: Role,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// The user as exposed over the API: no password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Store-assigned identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Access tier.
    pub role: Role,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// A user about to be inserted. The password is already hashed.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    /// Unique login name (trimmed, non-blank).
    pub username: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Display name (trimmed, non-blank).
    pub name: String,
    /// Access tier.
    pub role: Role,
}

impl NewUser {
    /// Build a new user, rejecting blank username or name.
    pub fn new(
        username: &str,
        name: &str,
        role: Role,
        password_hash: impl Into<String>,
    ) -> Result<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::validation_field("username", "username is required"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation_field("name", "name is required"));
        }
        Ok(Self {
            username: username.to_string(),
            password_hash: password_hash.into(),
            name: name.to_string(),
            role,
        })
    }

    /// Materialize into a stored user.
    pub fn into_user(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
            name: self.name,
            role: self.role,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
