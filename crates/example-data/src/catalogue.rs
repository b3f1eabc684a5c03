//! Fixed vocabularies the generator draws from.

use crate::seed::RoleSeed;

/// Number of generic network leads produced per run.
pub const RECEPTO_NET_LEADS: usize = 10;

/// Number of leads produced for each distinct organization.
pub const ORGANIZATION_LEADS_PER_ORG: usize = 10;

/// Locations assigned to generated leads, formatted as `"<city>, <country>"`.
pub const LOCATIONS: [&str; 10] = [
    "Mumbai, India",
    "Bangalore, India",
    "Delhi, India",
    "New York, United States of America",
    "San Francisco, United States of America",
    "London, United Kingdom",
    "Berlin, Germany",
    "Paris, France",
    "Tokyo, Japan",
    "Singapore, Singapore",
];

/// Group names cycled through by organization leads.
pub const GROUP_NAMES: [&str; 5] = ["Enterprise", "SMB", "Startup", "Agency", "Retail"];

pub(crate) const RECEPTO_NET_DESCRIPTION: &str = "Looking for recommendations on product \
     analytics tools for our B2B SaaS platform. Currently evaluating options for a team of 50 \
     developers.";

pub(crate) const ORGANIZATION_DESCRIPTION: &str = "A team from *company name mentioned* is \
     seeking a highly motivated Business Development Executive to outreach and secure business \
     opportunities.";

/// Shared password of every roster entry.
pub(crate) const ROSTER_PASSWORD: &str = "password";

/// One row of the fixed user roster.
pub(crate) struct RosterEntry {
    pub(crate) name: &'static str,
    pub(crate) username: &'static str,
    pub(crate) role: RoleSeed,
    pub(crate) organization: &'static str,
}

pub(crate) const ROSTER: [RosterEntry; 5] = [
    RosterEntry {
        name: "Olivia Rhye",
        username: "olivia",
        role: RoleSeed::Admin,
        organization: "Acme Inc",
    },
    RosterEntry {
        name: "Jane Smith",
        username: "jane",
        role: RoleSeed::Manager,
        organization: "Acme Inc",
    },
    RosterEntry {
        name: "Bob Johnson",
        username: "bob",
        role: RoleSeed::Member,
        organization: "Acme Inc",
    },
    RosterEntry {
        name: "Alice Brown",
        username: "alice",
        role: RoleSeed::Member,
        organization: "Acme Inc",
    },
    RosterEntry {
        name: "Anand Kumar",
        username: "anand",
        role: RoleSeed::Admin,
        organization: "Beta Corp",
    },
];
