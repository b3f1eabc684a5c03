//! Generated seed record types.
//!
//! This module defines the output types from generation. These types are
//! independent of backend domain types to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// Role of a generated user.
///
/// Mirrors the backend's `Role` enum without creating a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleSeed {
    /// Organization administrator.
    Admin,
    /// Team manager.
    Manager,
    /// Regular team member.
    Member,
}

/// A generated user record.
///
/// Generated users are always active; the backend applies its own default
/// status when converting.
///
/// # Example
///
/// ```
/// use example_data::{RoleSeed, UserSeed};
///
/// let user = UserSeed {
///     id: "k3v9x0aa".to_owned(),
///     name: "Ada Lovelace".to_owned(),
///     username: "ada".to_owned(),
///     password: "password".to_owned(),
///     role: RoleSeed::Member,
///     organization: "Acme Inc".to_owned(),
///     email: Some("ada@example.com".to_owned()),
/// };
///
/// assert_eq!(user.username, "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    /// Random record identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Login name, unique within the roster.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Assigned role.
    pub role: RoleSeed,
    /// Organization the user belongs to.
    pub organization: String,
    /// Contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The user fields lead generation needs to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationMember {
    /// User identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Organization the user belongs to.
    pub organization: String,
}

impl From<&UserSeed> for OrganizationMember {
    fn from(user: &UserSeed) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            organization: user.organization.clone(),
        }
    }
}

/// Origin of a generated lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadKindSeed {
    /// Anonymous lead from the shared network.
    #[serde(rename = "receptoNet")]
    ReceptoNet,
    /// Lead sourced through an organization's own network.
    #[serde(rename = "organization")]
    Organization,
}

/// A person attached to an organization lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSeed {
    /// User identifier of the person.
    pub id: String,
    /// Display name of the person.
    pub name: String,
}

/// A generated lead record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSeed {
    /// Random record identifier.
    pub id: String,
    /// Lead origin.
    #[serde(rename = "type")]
    pub kind: LeadKindSeed,
    /// Lead title.
    pub name: String,
    /// Free-text description searched by the feed.
    pub description: String,
    /// Quality score.
    pub score: u8,
    /// Credits required to unlock contact details.
    pub unlock_credits: u32,
    /// Whether contact details are already unlocked.
    pub unlocked: bool,
    /// Segment label, organization leads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// People linked to the lead, organization leads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<PersonSeed>>,
    /// Location in `"<city>, <country>"` form.
    pub location: String,
    /// Organization the lead was generated for, organization leads only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}
