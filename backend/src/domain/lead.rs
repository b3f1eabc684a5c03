//! Lead records and the in-place transitions the feed applies to them.
//!
//! Leads are replaced wholesale by id when they change. The like/dislike pair
//! is stored as two booleans but modelled as a single [`Reaction`], so the
//! two flags can never both be set.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{User, UserId};

/// Validation errors for lead fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadValidationError {
    /// The identifier was blank.
    #[error("lead id must not be empty")]
    EmptyId,
    /// The score exceeded [`Score::MAX`].
    #[error("score {score} exceeds {max}", max = Score::MAX)]
    ScoreOutOfRange {
        /// Rejected value.
        score: u8,
    },
    /// Both `liked` and `disliked` were set.
    #[error("a lead cannot be both liked and disliked")]
    ConflictingReaction,
}

/// Stable lead identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LeadId(String);

impl LeadId {
    /// Validate and construct a [`LeadId`].
    ///
    /// # Errors
    ///
    /// Returns [`LeadValidationError::EmptyId`] for blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, LeadValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(LeadValidationError::EmptyId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for LeadId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LeadId> for String {
    fn from(value: LeadId) -> Self {
        value.0
    }
}

impl TryFrom<String> for LeadId {
    type Error = LeadValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Quality score in `0..=100`.
///
/// # Examples
/// ```
/// use leadboard::domain::Score;
///
/// assert_eq!(Score::new(87).map(Score::get), Ok(87));
/// assert!(Score::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Highest valid score.
    pub const MAX: u8 = 100;

    /// Validate and construct a score.
    ///
    /// # Errors
    ///
    /// Returns [`LeadValidationError::ScoreOutOfRange`] above [`Self::MAX`].
    pub const fn new(score: u8) -> Result<Self, LeadValidationError> {
        if score > Self::MAX {
            return Err(LeadValidationError::ScoreOutOfRange { score });
        }
        Ok(Self(score))
    }

    /// Raw score value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Score {
    type Error = LeadValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Origin of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadKind {
    /// Anonymous lead from the shared network.
    #[serde(rename = "receptoNet")]
    ReceptoNet,
    /// Lead sourced through an organization's own network.
    #[serde(rename = "organization")]
    Organization,
}

/// The actor's sentiment towards a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ReactionFlags", into = "ReactionFlags")]
pub enum Reaction {
    /// Neither liked nor disliked.
    #[default]
    Neutral,
    /// Liked.
    Liked,
    /// Disliked.
    Disliked,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ReactionFlags {
    #[serde(default)]
    liked: bool,
    #[serde(default)]
    disliked: bool,
}

impl From<Reaction> for ReactionFlags {
    fn from(value: Reaction) -> Self {
        Self {
            liked: value == Reaction::Liked,
            disliked: value == Reaction::Disliked,
        }
    }
}

impl TryFrom<ReactionFlags> for Reaction {
    type Error = LeadValidationError;

    fn try_from(value: ReactionFlags) -> Result<Self, Self::Error> {
        match (value.liked, value.disliked) {
            (false, false) => Ok(Self::Neutral),
            (true, false) => Ok(Self::Liked),
            (false, true) => Ok(Self::Disliked),
            (true, true) => Err(LeadValidationError::ConflictingReaction),
        }
    }
}

/// A person linked to an organization lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// User identifier of the person.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// A stored lead.
///
/// Serialised in camelCase with `type` for [`LeadKind`] and the reaction
/// flattened into `liked` / `disliked` booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Stable identifier.
    pub id: LeadId,
    /// Lead origin.
    #[serde(rename = "type")]
    pub kind: LeadKind,
    /// Lead title.
    pub name: String,
    /// Free-text description searched by the feed.
    pub description: String,
    /// Quality score.
    pub score: Score,
    /// Credits required to unlock contact details.
    pub unlock_credits: u32,
    /// Whether contact details are unlocked.
    #[serde(default)]
    pub unlocked: bool,
    /// Like/dislike state.
    #[serde(flatten)]
    pub reaction: Reaction,
    /// Assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    /// Assignee display name, stored alongside the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
    /// Segment label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Linked people.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<Vec<Person>>,
    /// Location in `"<city>, <country>"` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Organization an organization lead belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Lead {
    /// Whether the lead is liked.
    #[must_use]
    pub fn is_liked(&self) -> bool {
        self.reaction == Reaction::Liked
    }

    /// Whether the lead is disliked.
    #[must_use]
    pub fn is_disliked(&self) -> bool {
        self.reaction == Reaction::Disliked
    }

    /// Flip the like flag, clearing any dislike.
    pub fn toggle_like(&mut self) {
        self.reaction = if self.is_liked() {
            Reaction::Neutral
        } else {
            Reaction::Liked
        };
    }

    /// Flip the dislike flag, clearing any like.
    pub fn toggle_dislike(&mut self) {
        self.reaction = if self.is_disliked() {
            Reaction::Neutral
        } else {
            Reaction::Disliked
        };
    }

    /// Reveal contact details.
    pub const fn unlock(&mut self) {
        self.unlocked = true;
    }

    /// Record `user` as the assignee.
    pub fn assign_to(&mut self, user: &User) {
        self.assigned_to = Some(user.id.clone());
        self.assigned_to_name = Some(user.name.clone());
    }

    /// Location used for filtering; absent locations compare as `""`.
    #[must_use]
    pub fn location_or_empty(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}
