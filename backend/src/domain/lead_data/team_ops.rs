//! Team management commands.
//!
//! Only admins and managers change members, and only members of their own
//! organization. Every change goes through [`LeadDataService::update_user`].

use pagination::{Page, PageRequest};
use serde_json::json;

use crate::domain::ports::{KeyValueStore, SeedSource};
use crate::domain::views::scope_by_organization;
use crate::domain::{Actor, DomainError, Role, User, UserId, UserPatch, UserStatus};

use super::service::{LeadDataService, UpdateOutcome};

/// Members shown per team page.
pub const TEAM_PAGE_SIZE: usize = 5;

impl<S, G> LeadDataService<S, G>
where
    S: KeyValueStore,
    G: SeedSource,
{
    /// Users of the actor's organization, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the users cannot be read.
    pub fn team_members(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        let users = self.get_users()?;
        Ok(scope_by_organization(&users, &actor.organization))
    }

    /// One page of [`LeadDataService::team_members`].
    ///
    /// `page` is clamped to the pages that exist.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the users cannot be read.
    pub fn team_page(&self, actor: &Actor, page: usize) -> Result<Page<User>, DomainError> {
        let members = self.team_members(actor)?;
        let request = PageRequest::new(page, TEAM_PAGE_SIZE)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        Ok(Page::from_items(&members, request))
    }

    /// Change a member's role.
    ///
    /// # Errors
    ///
    /// Returns a forbidden error when the actor may not manage the member,
    /// or a not-found error when the member does not exist.
    pub fn change_role(&self, actor: &Actor, member: &UserId, role: Role) -> Result<(), DomainError> {
        self.manage_member(actor, member, &UserPatch::default().with_role(role))
    }

    /// Change a member's status.
    ///
    /// # Errors
    ///
    /// See [`LeadDataService::change_role`].
    pub fn change_status(
        &self,
        actor: &Actor,
        member: &UserId,
        status: UserStatus,
    ) -> Result<(), DomainError> {
        self.manage_member(actor, member, &UserPatch::default().with_status(status))
    }

    /// Update a member's email and role together.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for a blank email, otherwise see
    /// [`LeadDataService::change_role`].
    pub fn edit_member(
        &self,
        actor: &Actor,
        member: &UserId,
        email: &str,
        role: Role,
    ) -> Result<(), DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::invalid_request("email must not be empty"));
        }
        let patch = UserPatch::default().with_email(email).with_role(role);
        self.manage_member(actor, member, &patch)
    }

    /// Mark a member as removed. The record is kept.
    ///
    /// # Errors
    ///
    /// See [`LeadDataService::change_role`].
    pub fn remove_from_team(&self, actor: &Actor, member: &UserId) -> Result<(), DomainError> {
        self.change_status(actor, member, UserStatus::Removed)
    }

    fn manage_member(
        &self,
        actor: &Actor,
        member: &UserId,
        patch: &UserPatch,
    ) -> Result<(), DomainError> {
        if !actor.can_manage_team() {
            return Err(DomainError::forbidden("only admins and managers can manage the team")
                .with_details(json!({ "role": actor.role })));
        }

        let target = self
            .get_users()?
            .into_iter()
            .find(|user| user.id == *member)
            .ok_or_else(|| member_not_found(member))?;
        if target.organization != actor.organization {
            return Err(DomainError::forbidden("member belongs to another organization")
                .with_details(json!({ "userId": member.as_ref() })));
        }

        match self.update_user(member, patch)? {
            UpdateOutcome::Applied => Ok(()),
            UpdateOutcome::NotFound => Err(member_not_found(member)),
        }
    }
}

fn member_not_found(member: &UserId) -> DomainError {
    DomainError::not_found("member not found").with_details(json!({ "userId": member.as_ref() }))
}
