//! Login credentials and the session actor they resolve to.
//!
//! Credential checks are plaintext comparisons against stored users. The
//! dashboard is a demonstration, not a security boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use super::{Role, User, UserId, UserStatus};

/// Returned when login inputs are invalid before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use leadboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" olivia ", "password").expect("valid");
/// assert_eq!(creds.username(), "olivia");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] when either part is blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether `user` carries these credentials and may still sign in.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        user.status != UserStatus::Removed
            && user.username == self.username()
            && user.password == self.password()
    }
}

/// The signed-in user every scoped operation acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Role at sign-in time.
    pub role: Role,
    /// Organization used for scoping.
    pub organization: String,
}

impl Actor {
    /// Whether the actor may change other members of the team.
    #[must_use]
    pub const fn can_manage_team(&self) -> bool {
        self.role.can_manage_team()
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
            organization: user.organization.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn olivia() -> User {
        User {
            id: UserId::new("011v1a00").expect("valid id"),
            name: "Olivia Rhye".to_owned(),
            username: "olivia".to_owned(),
            password: "password".to_owned(),
            role: Role::Admin,
            status: UserStatus::Active,
            organization: "Acme Inc".to_owned(),
            email: None,
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("olivia", "password", true)]
    #[case("  olivia ", "password", true)]
    #[case("olivia", "Password", false)]
    #[case("jane", "password", false)]
    fn matching_compares_username_and_password(
        olivia: User,
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("valid");
        assert_eq!(creds.matches(&olivia), expected);
    }

    #[rstest]
    #[case("\tolivia\n", true)]
    #[case(" Olivia ", false)]
    #[case("oli via", false)]
    fn only_surrounding_whitespace_is_ignored(
        olivia: User,
        #[case] username: &str,
        #[case] expected: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(username, "password").expect("valid");
        assert_eq!(creds.matches(&olivia), expected);
    }

    #[rstest]
    fn padded_stored_usernames_are_not_trimmed(mut olivia: User) {
        olivia.username = " olivia ".to_owned();
        let creds = LoginCredentials::try_from_parts(" olivia ", "password").expect("valid");
        assert!(!creds.matches(&olivia));
    }

    #[rstest]
    fn removed_users_never_match(mut olivia: User) {
        olivia.status = UserStatus::Removed;
        let creds = LoginCredentials::try_from_parts("olivia", "password").expect("valid");
        assert!(!creds.matches(&olivia));
    }

    #[rstest]
    fn actor_copies_identity_and_scope(olivia: User) {
        let actor = Actor::from(&olivia);
        assert_eq!(actor.id, olivia.id);
        assert_eq!(actor.organization, "Acme Inc");
        assert!(actor.can_manage_team());
    }
}
