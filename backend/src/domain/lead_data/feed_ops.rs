//! Actor-scoped lead feed commands.
//!
//! Every command rewrites one lead wholesale by id, computed from the freshest
//! stored copy. Leads outside the actor's feed are reported as missing.

use serde_json::json;

use crate::domain::ports::{KeyValueStore, SeedSource};
use crate::domain::record_store::Leads;
use crate::domain::views::{is_visible_to, scope_by_organization};
use crate::domain::{Actor, DomainError, Lead, LeadId, User, UserId, UserStatus};

use super::service::{LeadDataService, UpdateOutcome};

impl<S, G> LeadDataService<S, G>
where
    S: KeyValueStore,
    G: SeedSource,
{
    /// Reveal a lead's contact details.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown or invisible leads.
    pub fn unlock_lead(&self, actor: &Actor, lead_id: &LeadId) -> Result<Lead, DomainError> {
        self.modify_lead(actor, lead_id, Lead::unlock)
    }

    /// Flip the like flag, clearing any dislike.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown or invisible leads.
    pub fn toggle_like(&self, actor: &Actor, lead_id: &LeadId) -> Result<Lead, DomainError> {
        self.modify_lead(actor, lead_id, Lead::toggle_like)
    }

    /// Flip the dislike flag, clearing any like.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for unknown or invisible leads.
    pub fn toggle_dislike(&self, actor: &Actor, lead_id: &LeadId) -> Result<Lead, DomainError> {
        self.modify_lead(actor, lead_id, Lead::toggle_dislike)
    }

    /// Users the actor may hand a lead to: active members of their own
    /// organization.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] when the users cannot be read.
    pub fn assignable_users(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        let users = self.get_users()?;
        Ok(scope_by_organization(&users, &actor.organization)
            .into_iter()
            .filter(|user| user.status != UserStatus::Removed)
            .collect())
    }

    /// Assign a lead to a member of the actor's organization.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown lead or assignee, and a
    /// forbidden error when the assignee belongs elsewhere or was removed.
    pub fn assign_lead(
        &self,
        actor: &Actor,
        lead_id: &LeadId,
        assignee_id: &UserId,
    ) -> Result<Lead, DomainError> {
        let assignee = self
            .get_users()?
            .into_iter()
            .find(|user| user.id == *assignee_id)
            .ok_or_else(|| {
                DomainError::not_found("assignee not found")
                    .with_details(json!({ "userId": assignee_id.as_ref() }))
            })?;
        if assignee.organization != actor.organization || assignee.status == UserStatus::Removed {
            return Err(DomainError::forbidden(
                "leads can only be assigned within your organization",
            )
            .with_details(json!({ "userId": assignee_id.as_ref() })));
        }

        self.modify_lead(actor, lead_id, |lead| lead.assign_to(&assignee))
    }

    fn modify_lead<F>(
        &self,
        actor: &Actor,
        lead_id: &LeadId,
        mut change: F,
    ) -> Result<Lead, DomainError>
    where
        F: FnMut(&mut Lead),
    {
        let mut updated = None;
        let outcome = self.update_collection::<Leads, _>(lead_id.as_ref(), |leads| {
            let Some(lead) = leads
                .iter_mut()
                .find(|lead| lead.id == *lead_id && is_visible_to(actor, lead))
            else {
                return false;
            };
            change(lead);
            updated = Some(lead.clone());
            true
        })?;

        match (outcome, updated) {
            (UpdateOutcome::Applied, Some(lead)) => Ok(lead),
            _ => Err(DomainError::not_found("lead not found")
                .with_details(json!({ "leadId": lead_id.as_ref() }))),
        }
    }
}
