//! Mock user and lead generation.
//!
//! [`MockDataGenerator`] owns a ChaCha RNG. Seeding it with a fixed value
//! makes the output reproducible; seeding it from entropy gives every fresh
//! store a different set of leads. Only the structural shape of the output is
//! a contract: counts, value ranges and the fixed roster.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::catalogue::{
    GROUP_NAMES, LOCATIONS, ORGANIZATION_DESCRIPTION, ORGANIZATION_LEADS_PER_ORG,
    RECEPTO_NET_DESCRIPTION, RECEPTO_NET_LEADS, ROSTER, ROSTER_PASSWORD,
};
use crate::error::GenerationError;
use crate::seed::{LeadKindSeed, LeadSeed, OrganizationMember, PersonSeed, UserSeed};
use crate::validation::{RECORD_ID_LENGTH, RECORD_ID_RADIX};

/// Maximum number of attempts to draw an unused record identifier.
const MAX_ID_ATTEMPTS: usize = 100;

/// Score bounds shared by both lead kinds.
const SCORE_RANGE: RangeInclusive<u8> = 70..=99;

/// Unlock cost bounds for network leads.
const RECEPTO_NET_CREDITS: RangeInclusive<u32> = 1..=3;

/// Unlock cost bounds for organization leads.
const ORGANIZATION_CREDITS: RangeInclusive<u32> = 1..=4;

/// Bounds on how many organization members are linked to a lead.
const PEOPLE_RANGE: RangeInclusive<usize> = 1..=3;

/// Probability numerator of a lead starting unlocked (30%).
const UNLOCKED_PROBABILITY_NUMERATOR: u32 = 3;

/// Probability denominator for the unlocked flag.
const UNLOCKED_PROBABILITY_DENOMINATOR: u32 = 10;

/// Generator of mock users and leads.
///
/// Identifiers are unique across everything a single generator instance has
/// produced, so users and leads generated by the same instance never share
/// an id.
///
/// # Example
///
/// ```
/// use example_data::{MockDataGenerator, is_valid_record_id};
///
/// let mut first = MockDataGenerator::from_seed(7);
/// let mut second = MockDataGenerator::from_seed(7);
///
/// let users = first.generate_users().expect("generated");
/// assert!(users.iter().all(|user| is_valid_record_id(&user.id)));
/// // Same seed produces identical users
/// assert_eq!(users, second.generate_users().expect("generated"));
/// ```
#[derive(Debug, Clone)]
pub struct MockDataGenerator {
    rng: ChaCha8Rng,
    issued_ids: HashSet<String>,
}

impl MockDataGenerator {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            issued_ids: HashSet::new(),
        }
    }

    /// Generates the fixed five-user roster with fresh identifiers.
    ///
    /// Every field except `id` is fixed: four users in "Acme Inc", one in
    /// "Beta Corp", all sharing the password `password` and an
    /// `<username>@example.com` address.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::IdGenerationFailed`] if an unused identifier
    /// cannot be drawn.
    pub fn generate_users(&mut self) -> Result<Vec<UserSeed>, GenerationError> {
        ROSTER
            .iter()
            .map(|entry| {
                Ok(UserSeed {
                    id: self.next_id()?,
                    name: entry.name.to_owned(),
                    username: entry.username.to_owned(),
                    password: ROSTER_PASSWORD.to_owned(),
                    role: entry.role,
                    organization: entry.organization.to_owned(),
                    email: Some(format!("{}@example.com", entry.username)),
                })
            })
            .collect()
    }

    /// Generates leads for the given members.
    ///
    /// Produces [`RECEPTO_NET_LEADS`] network leads followed by
    /// [`ORGANIZATION_LEADS_PER_ORG`] leads for every distinct organization in
    /// `members`, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::IdGenerationFailed`] if an unused identifier
    /// cannot be drawn.
    pub fn generate_leads(
        &mut self,
        members: &[OrganizationMember],
    ) -> Result<Vec<LeadSeed>, GenerationError> {
        let organizations = group_by_organization(members);
        let mut leads = Vec::with_capacity(
            RECEPTO_NET_LEADS + ORGANIZATION_LEADS_PER_ORG * organizations.len(),
        );

        for index in 0..RECEPTO_NET_LEADS {
            leads.push(self.recepto_net_lead(index)?);
        }

        for (organization, org_members) in &organizations {
            for index in 0..ORGANIZATION_LEADS_PER_ORG {
                leads.push(self.organization_lead(organization, org_members, index)?);
            }
        }

        Ok(leads)
    }

    fn recepto_net_lead(&mut self, index: usize) -> Result<LeadSeed, GenerationError> {
        Ok(LeadSeed {
            id: self.next_id()?,
            kind: LeadKindSeed::ReceptoNet,
            name: format!("Lead {}", index + 1),
            description: RECEPTO_NET_DESCRIPTION.to_owned(),
            score: self.rng.random_range(SCORE_RANGE),
            unlock_credits: self.rng.random_range(RECEPTO_NET_CREDITS),
            unlocked: self.random_unlocked(),
            group_name: None,
            people: None,
            location: self.random_location(),
            organization: None,
        })
    }

    fn organization_lead(
        &mut self,
        organization: &str,
        members: &[&OrganizationMember],
        index: usize,
    ) -> Result<LeadSeed, GenerationError> {
        let wanted = self.rng.random_range(PEOPLE_RANGE);
        let people = members
            .iter()
            .take(wanted)
            .map(|member| PersonSeed {
                id: member.id.clone(),
                name: member.name.clone(),
            })
            .collect();
        let group_name = GROUP_NAMES
            .iter()
            .cycle()
            .nth(index)
            .map(|name| (*name).to_owned());

        Ok(LeadSeed {
            id: self.next_id()?,
            kind: LeadKindSeed::Organization,
            name: format!("{organization} Lead {}", index + 1),
            description: ORGANIZATION_DESCRIPTION.to_owned(),
            score: self.rng.random_range(SCORE_RANGE),
            unlock_credits: self.rng.random_range(ORGANIZATION_CREDITS),
            unlocked: self.random_unlocked(),
            group_name,
            people: Some(people),
            location: self.random_location(),
            organization: Some(organization.to_owned()),
        })
    }

    fn random_unlocked(&mut self) -> bool {
        self.rng.random_ratio(
            UNLOCKED_PROBABILITY_NUMERATOR,
            UNLOCKED_PROBABILITY_DENOMINATOR,
        )
    }

    fn random_location(&mut self) -> String {
        LOCATIONS
            .choose(&mut self.rng)
            .map_or_else(String::new, |location| (*location).to_owned())
    }

    /// Draws a base-36 token that this generator has not issued before.
    fn next_id(&mut self) -> Result<String, GenerationError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate: String = (0..RECORD_ID_LENGTH)
                .filter_map(|_| {
                    let digit = self.rng.random_range(0..RECORD_ID_RADIX);
                    char::from_digit(digit, RECORD_ID_RADIX)
                })
                .collect();
            if self.issued_ids.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }

        Err(GenerationError::IdGenerationFailed {
            max_attempts: MAX_ID_ATTEMPTS,
        })
    }
}

/// Groups members by organization, preserving first-appearance order.
fn group_by_organization(
    members: &[OrganizationMember],
) -> Vec<(&str, Vec<&OrganizationMember>)> {
    let mut groups: Vec<(&str, Vec<&OrganizationMember>)> = Vec::new();
    for member in members {
        match groups
            .iter_mut()
            .find(|(organization, _)| *organization == member.organization)
        {
            Some((_, group)) => group.push(member),
            None => groups.push((member.organization.as_str(), vec![member])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::validation::is_valid_record_id;

    fn members_of(users: &[UserSeed]) -> Vec<OrganizationMember> {
        users.iter().map(OrganizationMember::from).collect()
    }

    #[fixture]
    fn generated() -> (Vec<UserSeed>, Vec<LeadSeed>) {
        let mut generator = MockDataGenerator::from_seed(42);
        let users = generator.generate_users().expect("users generated");
        let leads = generator
            .generate_leads(&members_of(&users))
            .expect("leads generated");
        (users, leads)
    }

    #[rstest]
    fn generates_fixed_roster(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (users, _) = generated;
        let usernames: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(usernames, ["olivia", "jane", "bob", "alice", "anand"]);
        assert!(users.iter().all(|u| u.password == "password"));
        assert_eq!(users.first().and_then(|u| u.email.as_deref()), Some("olivia@example.com"));
    }

    #[rstest]
    fn lead_count_follows_distinct_organizations(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (_, leads) = generated;
        assert_eq!(leads.len(), RECEPTO_NET_LEADS + 2 * ORGANIZATION_LEADS_PER_ORG);
    }

    #[rstest]
    fn network_leads_come_first(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (_, leads) = generated;
        let (network, organization) = leads.split_at(RECEPTO_NET_LEADS);
        assert!(network.iter().all(|l| l.kind == LeadKindSeed::ReceptoNet));
        assert!(organization.iter().all(|l| l.kind == LeadKindSeed::Organization));
        assert_eq!(network.first().map(|l| l.name.as_str()), Some("Lead 1"));
        assert_eq!(
            organization.first().map(|l| l.name.as_str()),
            Some("Acme Inc Lead 1")
        );
    }

    #[rstest]
    fn values_stay_within_ranges(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (_, leads) = generated;
        for lead in &leads {
            assert!(SCORE_RANGE.contains(&lead.score), "score {}", lead.score);
            assert!(LOCATIONS.contains(&lead.location.as_str()));
            let credits = match lead.kind {
                LeadKindSeed::ReceptoNet => RECEPTO_NET_CREDITS,
                LeadKindSeed::Organization => ORGANIZATION_CREDITS,
            };
            assert!(credits.contains(&lead.unlock_credits));
        }
    }

    #[rstest]
    fn group_names_cycle_by_index(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (_, leads) = generated;
        let groups: Vec<_> = leads
            .iter()
            .filter(|l| l.organization.as_deref() == Some("Beta Corp"))
            .map(|l| l.group_name.clone().expect("group name"))
            .collect();
        assert_eq!(
            groups,
            [
                "Enterprise", "SMB", "Startup", "Agency", "Retail", "Enterprise", "SMB",
                "Startup", "Agency", "Retail"
            ]
        );
    }

    #[rstest]
    fn people_are_drawn_from_the_lead_organization(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (users, leads) = generated;
        for lead in leads.iter().filter(|l| l.kind == LeadKindSeed::Organization) {
            let people = lead.people.as_ref().expect("people present");
            assert!(!people.is_empty() && people.len() <= 3);
            for person in people {
                let user = users.iter().find(|u| u.id == person.id).expect("known user");
                assert_eq!(Some(&user.organization), lead.organization.as_ref());
            }
        }
    }

    #[rstest]
    fn identifiers_are_unique_and_well_formed(generated: (Vec<UserSeed>, Vec<LeadSeed>)) {
        let (users, leads) = generated;
        let ids: Vec<&str> = users
            .iter()
            .map(|u| u.id.as_str())
            .chain(leads.iter().map(|l| l.id.as_str()))
            .collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| is_valid_record_id(id)));
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let mut first = MockDataGenerator::from_seed(9);
        let mut second = MockDataGenerator::from_seed(9);
        let users = first.generate_users().expect("generated");
        assert_eq!(users, second.generate_users().expect("generated"));
        let members = members_of(&users);
        assert_eq!(
            first.generate_leads(&members).expect("generated"),
            second.generate_leads(&members).expect("generated")
        );
    }

    #[test]
    fn leads_without_members_are_network_only() {
        let mut generator = MockDataGenerator::from_entropy();
        let leads = generator.generate_leads(&[]).expect("generated");
        assert_eq!(leads.len(), RECEPTO_NET_LEADS);
    }

    #[test]
    fn grouping_preserves_first_appearance_order() {
        let member = |id: &str, organization: &str| OrganizationMember {
            id: id.to_owned(),
            name: id.to_owned(),
            organization: organization.to_owned(),
        };
        let members = [member("a", "Zeta"), member("b", "Alpha"), member("c", "Zeta")];
        let groups = group_by_organization(&members);
        let names: Vec<_> = groups.iter().map(|(org, group)| (*org, group.len())).collect();
        assert_eq!(names, [("Zeta", 2), ("Alpha", 1)]);
    }
}
