//! Seed source backed by the `example-data` generator.
//!
//! Converts generator output into domain users and leads. The generator keeps
//! track of issued ids across calls, so users and leads drawn from one source
//! never share an id.

use std::sync::{Mutex, MutexGuard};

use example_data::{
    LeadKindSeed, LeadSeed, MockDataGenerator, OrganizationMember, PersonSeed, RoleSeed, UserSeed,
};
use tracing::info;

use crate::domain::ports::{SeedSource, SeedSourceError};
use crate::domain::{
    Lead, LeadId, LeadKind, Person, Reaction, Role, Score, User, UserId, UserStatus,
};

/// [`SeedSource`] drawing from a [`MockDataGenerator`].
#[derive(Debug)]
pub struct RandomSeedSource {
    generator: Mutex<MockDataGenerator>,
}

impl RandomSeedSource {
    /// Seeded when `seed` is given, otherwise drawn from entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let generator = match seed {
            Some(value) => {
                info!(seed = value, "mock data generator seeded");
                MockDataGenerator::from_seed(value)
            }
            None => MockDataGenerator::from_entropy(),
        };
        Self {
            generator: Mutex::new(generator),
        }
    }

    fn generator(&self) -> Result<MutexGuard<'_, MockDataGenerator>, SeedSourceError> {
        self.generator
            .lock()
            .map_err(|_| SeedSourceError::generation("generator lock poisoned"))
    }
}

impl SeedSource for RandomSeedSource {
    fn users(&self) -> Result<Vec<User>, SeedSourceError> {
        let seeds = self
            .generator()?
            .generate_users()
            .map_err(|err| SeedSourceError::generation(err.to_string()))?;
        seeds.into_iter().map(convert_user).collect()
    }

    fn leads(&self, users: &[User]) -> Result<Vec<Lead>, SeedSourceError> {
        let members: Vec<OrganizationMember> = users
            .iter()
            .map(|user| OrganizationMember {
                id: user.id.to_string(),
                name: user.name.clone(),
                organization: user.organization.clone(),
            })
            .collect();
        let seeds = self
            .generator()?
            .generate_leads(&members)
            .map_err(|err| SeedSourceError::generation(err.to_string()))?;
        seeds.into_iter().map(convert_lead).collect()
    }
}

fn convert_user(seed: UserSeed) -> Result<User, SeedSourceError> {
    Ok(User {
        id: UserId::new(seed.id).map_err(invalid)?,
        name: seed.name,
        username: seed.username,
        password: seed.password,
        role: map_role(seed.role),
        status: UserStatus::Active,
        organization: seed.organization,
        email: seed.email,
    })
}

fn convert_lead(seed: LeadSeed) -> Result<Lead, SeedSourceError> {
    let people = seed
        .people
        .map(|seeds| seeds.into_iter().map(convert_person).collect::<Result<Vec<_>, _>>())
        .transpose()?;
    Ok(Lead {
        id: LeadId::new(seed.id).map_err(invalid)?,
        kind: map_kind(seed.kind),
        name: seed.name,
        description: seed.description,
        score: Score::new(seed.score).map_err(invalid)?,
        unlock_credits: seed.unlock_credits,
        unlocked: seed.unlocked,
        reaction: Reaction::Neutral,
        assigned_to: None,
        assigned_to_name: None,
        group_name: seed.group_name,
        people,
        location: Some(seed.location),
        organization: seed.organization,
    })
}

fn convert_person(seed: PersonSeed) -> Result<Person, SeedSourceError> {
    Ok(Person {
        id: UserId::new(seed.id).map_err(invalid)?,
        name: seed.name,
    })
}

fn invalid(err: impl std::error::Error) -> SeedSourceError {
    SeedSourceError::generation(format!("generated record failed validation: {err}"))
}

const fn map_role(role: RoleSeed) -> Role {
    match role {
        RoleSeed::Admin => Role::Admin,
        RoleSeed::Manager => Role::Manager,
        RoleSeed::Member => Role::Member,
    }
}

const fn map_kind(kind: LeadKindSeed) -> LeadKind {
    match kind {
        LeadKindSeed::ReceptoNet => LeadKind::ReceptoNet,
        LeadKindSeed::Organization => LeadKind::Organization,
    }
}
