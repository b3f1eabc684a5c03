//! User records and their partial-update patches.
//!
//! Users are created in bulk when the store is first seeded and afterwards
//! only change field by field through [`UserPatch`]. They are never deleted:
//! removal from a team sets [`UserStatus::Removed`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
}

/// Stable user identifier.
///
/// ## Invariants
/// - Non-empty once trimmed. Never changes after creation.
///
/// # Examples
/// ```
/// use leadboard::domain::UserId;
///
/// let id = UserId::new("k3v9x0aa").expect("valid id");
/// assert_eq!(id.as_ref(), "k3v9x0aa");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::EmptyId`] for blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Team role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Organization administrator.
    Admin,
    /// Team manager.
    Manager,
    /// Regular team member.
    Member,
}

impl Role {
    /// Whether holders of this role may change other members.
    #[must_use]
    pub const fn can_manage_team(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Membership status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    /// Active member.
    #[default]
    Active,
    /// Suspended member.
    Inactive,
    /// Invited, not yet active.
    Pending,
    /// Removed from the team.
    Removed,
}

/// A stored user.
///
/// Serialised in camelCase with role and status as their capitalised names.
/// `password` is plaintext: login is a demonstration comparison only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Full name.
    pub name: String,
    /// Login name, unique within the store.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Team role.
    pub role: Role,
    /// Membership status.
    #[serde(default)]
    pub status: UserStatus,
    /// Organization used for scoping.
    pub organization: String,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Shallow partial update for a [`User`].
///
/// Every `Some` field overwrites the stored value; `None` leaves it alone.
/// The identifier is not patchable.
///
/// # Examples
/// ```
/// use leadboard::domain::{Role, UserPatch};
///
/// let patch = UserPatch::default().with_role(Role::Admin);
/// assert!(!patch.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    /// New full name.
    pub name: Option<String>,
    /// New login name.
    pub username: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New role.
    pub role: Option<Role>,
    /// New status.
    pub status: Option<UserStatus>,
    /// New organization.
    pub organization: Option<String>,
    /// New contact address.
    pub email: Option<String>,
}

impl UserPatch {
    /// Set the role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the status.
    #[must_use]
    pub const fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the contact address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.organization.is_none()
            && self.email.is_none()
    }

    /// Merge the patch into `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name.clone_from(name);
        }
        if let Some(username) = &self.username {
            user.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            user.password.clone_from(password);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(organization) = &self.organization {
            user.organization.clone_from(organization);
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
    }
}
