//! Pure view computations over stored records.
//!
//! Nothing here touches the store. The feed and team views re-run these
//! functions on every refresh against freshly read records.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{Actor, Lead, LeadKind, User};

/// Records that belong to an organization.
pub trait OrganizationScoped {
    /// Owning organization, if the record has one.
    fn organization(&self) -> Option<&str>;
}

impl OrganizationScoped for User {
    fn organization(&self) -> Option<&str> {
        Some(self.organization.as_str())
    }
}

impl OrganizationScoped for Lead {
    fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }
}

/// Records whose organization equals `organization`.
///
/// Records without an organization never match.
#[must_use]
pub fn scope_by_organization<T>(records: &[T], organization: &str) -> Vec<T>
where
    T: OrganizationScoped + Clone,
{
    records
        .iter()
        .filter(|record| record.organization() == Some(organization))
        .cloned()
        .collect()
}

/// Leads matching a search query and a location set.
///
/// A lead passes when both hold:
/// - `query` is empty, or the description contains it case-insensitively,
///   or the lead is an organization lead whose name contains it.
/// - `locations` is empty, or contains the lead's location (a missing location
///   compares as `""`).
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use leadboard::domain::views::filter_leads;
///
/// assert!(filter_leads(&[], "", &BTreeSet::new()).is_empty());
/// ```
#[must_use]
pub fn filter_leads(leads: &[Lead], query: &str, locations: &BTreeSet<String>) -> Vec<Lead> {
    let needle = query.to_lowercase();
    leads
        .iter()
        .filter(|lead| matches_query(lead, &needle) && matches_location(lead, locations))
        .cloned()
        .collect()
}

fn matches_query(lead: &Lead, needle: &str) -> bool {
    needle.is_empty()
        || lead.description.to_lowercase().contains(needle)
        || (lead.kind == LeadKind::Organization && lead.name.to_lowercase().contains(needle))
}

fn matches_location(lead: &Lead, locations: &BTreeSet<String>) -> bool {
    locations.is_empty() || locations.contains(lead.location_or_empty())
}

/// Search text and selected locations for the lead feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFilter {
    /// Case-insensitive search text.
    pub query: String,
    /// Selected `"<city>, <country>"` labels.
    pub locations: BTreeSet<String>,
}

impl LeadFilter {
    /// Filter on `query` only.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            locations: BTreeSet::new(),
        }
    }

    /// Toggle a location in the selection, as the filter dialog does.
    pub fn toggle_location(&mut self, label: &str) {
        if !self.locations.remove(label) {
            self.locations.insert(label.to_owned());
        }
    }

    /// Apply the filter.
    #[must_use]
    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        filter_leads(leads, &self.query, &self.locations)
    }
}

/// Leads the actor's feed shows.
///
/// Network leads are shared. Organization leads show only to their own
/// organization; those without an organization field stay visible.
#[must_use]
pub fn visible_leads(actor: &Actor, leads: &[Lead]) -> Vec<Lead> {
    leads
        .iter()
        .filter(|lead| is_visible_to(actor, lead))
        .cloned()
        .collect()
}

/// Whether `lead` appears in `actor`'s feed.
#[must_use]
pub fn is_visible_to(actor: &Actor, lead: &Lead) -> bool {
    match (lead.kind, lead.organization.as_deref()) {
        (LeadKind::ReceptoNet, _) | (LeadKind::Organization, None) => true,
        (LeadKind::Organization, Some(organization)) => organization == actor.organization,
    }
}

/// Counters shown above the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    /// All leads counted.
    pub total: usize,
    /// Leads with contact details unlocked.
    pub unlocked: usize,
    /// Leads with an assignee.
    pub assigned: usize,
    /// Liked leads.
    pub liked: usize,
    /// Disliked leads.
    pub disliked: usize,
    /// Leads neither liked nor disliked.
    pub neutral: usize,
}

impl LeadStats {
    /// Count `leads`.
    #[must_use]
    pub fn from_leads(leads: &[Lead]) -> Self {
        leads.iter().fold(Self::default(), |mut stats, lead| {
            stats.total += 1;
            stats.unlocked += usize::from(lead.unlocked);
            stats.assigned += usize::from(lead.assigned_to.is_some());
            stats.liked += usize::from(lead.is_liked());
            stats.disliked += usize::from(lead.is_disliked());
            stats.neutral += usize::from(!lead.is_liked() && !lead.is_disliked());
            stats
        })
    }
}

/// Deterministic "found" label derived from the lead id.
///
/// The UTF-16 code units of the id are summed and reduced modulo 24; each
/// band of three maps to one label.
#[must_use]
pub fn recency_label(lead: &Lead) -> &'static str {
    let sum: u32 = lead.id.as_ref().encode_utf16().map(u32::from).sum();
    match sum.rem_euclid(24) {
        0..=2 => "Found 2 hour ago",
        3..=5 => "3 hours ago",
        6..=8 => "Today",
        9..=11 => "Yesterday",
        12..=14 => "2 days ago",
        15..=17 => "3 days ago",
        18..=20 => "Last week",
        _ => "2 weeks ago",
    }
}

/// One country of the location filter dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryLocations {
    /// Country name.
    pub country: &'static str,
    /// Cities offered for the country.
    pub cities: &'static [&'static str],
}

impl CountryLocations {
    /// Filter labels for every city of the country.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.cities
            .iter()
            .map(|city| location_label(city, self.country))
    }
}

/// Countries and cities the location filter offers.
pub const LOCATION_CATALOGUE: [CountryLocations; 10] = [
    CountryLocations {
        country: "India",
        cities: &["Mumbai", "Bangalore", "Delhi", "Hyderabad"],
    },
    CountryLocations {
        country: "United States of America",
        cities: &["New York", "San Francisco", "Chicago", "Los Angeles"],
    },
    CountryLocations {
        country: "United Kingdom",
        cities: &["London", "Manchester", "Birmingham", "Edinburgh"],
    },
    CountryLocations {
        country: "Germany",
        cities: &["Berlin", "Munich", "Hamburg", "Frankfurt"],
    },
    CountryLocations {
        country: "France",
        cities: &["Paris", "Lyon", "Marseille", "Toulouse"],
    },
    CountryLocations {
        country: "Japan",
        cities: &["Tokyo", "Osaka", "Kyoto", "Yokohama"],
    },
    CountryLocations {
        country: "China",
        cities: &["Beijing", "Shanghai", "Shenzhen", "Guangzhou"],
    },
    CountryLocations {
        country: "Singapore",
        cities: &["Singapore"],
    },
    CountryLocations {
        country: "South Africa",
        cities: &["Johannesburg", "Cape Town", "Durban", "Pretoria"],
    },
    CountryLocations {
        country: "Australia",
        cities: &["Sydney", "Melbourne", "Brisbane", "Perth"],
    },
];

/// Filter label for a city, matching stored lead locations.
///
/// ```
/// use leadboard::domain::views::location_label;
///
/// assert_eq!(location_label("Berlin", "Germany"), "Berlin, Germany");
/// ```
#[must_use]
pub fn location_label(city: &str, country: &str) -> String {
    format!("{city}, {country}")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{LeadId, Reaction, Role, Score, UserId, UserStatus};
    use rstest::{fixture, rstest};

    fn lead(id: &str, kind: LeadKind, name: &str, location: Option<&str>) -> Lead {
        Lead {
            id: LeadId::new(id).expect("valid id"),
            kind,
            name: name.to_owned(),
            description: "Looking for product analytics tools".to_owned(),
            score: Score::new(80).expect("valid score"),
            unlock_credits: 2,
            unlocked: false,
            reaction: Reaction::Neutral,
            assigned_to: None,
            assigned_to_name: None,
            group_name: None,
            people: None,
            location: location.map(str::to_owned),
            organization: (kind == LeadKind::Organization).then(|| "Acme Inc".to_owned()),
        }
    }

    #[fixture]
    fn leads() -> Vec<Lead> {
        vec![
            lead("aaaa0001", LeadKind::ReceptoNet, "Lead 1", Some("Berlin, Germany")),
            lead("aaaa0002", LeadKind::Organization, "Acme Inc Lead 1", Some("Paris, France")),
            lead("aaaa0003", LeadKind::ReceptoNet, "Acme Lead", None),
        ]
    }

    fn actor(organization: &str) -> Actor {
        Actor {
            id: UserId::new("act0r000").expect("valid id"),
            name: "Olivia Rhye".to_owned(),
            role: Role::Admin,
            organization: organization.to_owned(),
        }
    }

    fn ids(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|lead| lead.id.as_ref()).collect()
    }

    #[rstest]
    fn empty_filter_is_identity(leads: Vec<Lead>) {
        assert_eq!(filter_leads(&leads, "", &BTreeSet::new()), leads);
    }

    #[rstest]
    #[case("ANALYTICS", vec!["aaaa0001", "aaaa0002", "aaaa0003"])]
    #[case("acme", vec!["aaaa0002"])]
    #[case("nothing matches", vec![])]
    fn query_matches_description_or_organization_name(
        leads: Vec<Lead>,
        #[case] query: &str,
        #[case] expected: Vec<&str>,
    ) {
        let filtered = filter_leads(&leads, query, &BTreeSet::new());
        assert_eq!(ids(&filtered), expected);
    }

    #[rstest]
    fn location_set_restricts_results(leads: Vec<Lead>) {
        let locations = BTreeSet::from(["Paris, France".to_owned()]);
        assert_eq!(ids(&filter_leads(&leads, "", &locations)), vec!["aaaa0002"]);
    }

    #[rstest]
    fn missing_location_matches_the_empty_label(leads: Vec<Lead>) {
        let locations = BTreeSet::from([String::new()]);
        assert_eq!(ids(&filter_leads(&leads, "", &locations)), vec!["aaaa0003"]);
    }

    #[rstest]
    fn toggling_a_location_twice_clears_it() {
        let mut filter = LeadFilter::with_query("lead");
        filter.toggle_location("Tokyo, Japan");
        assert!(filter.locations.contains("Tokyo, Japan"));
        filter.toggle_location("Tokyo, Japan");
        assert!(filter.locations.is_empty());
    }

    #[rstest]
    fn scope_keeps_matching_organization_only(leads: Vec<Lead>) {
        assert_eq!(ids(&scope_by_organization(&leads, "Acme Inc")), vec!["aaaa0002"]);
        assert!(scope_by_organization(&leads, "Beta Corp").is_empty());
    }

    #[rstest]
    fn other_organizations_leads_are_hidden(leads: Vec<Lead>) {
        assert_eq!(visible_leads(&actor("Acme Inc"), &leads).len(), 3);
        assert_eq!(
            ids(&visible_leads(&actor("Beta Corp"), &leads)),
            vec!["aaaa0001", "aaaa0003"]
        );
    }

    #[rstest]
    fn stats_count_each_state(mut leads: Vec<Lead>) {
        if let Some(first) = leads.first_mut() {
            first.toggle_like();
            first.unlock();
        }
        if let Some(second) = leads.get_mut(1) {
            second.toggle_dislike();
        }
        let stats = LeadStats::from_leads(&leads);
        assert_eq!(
            stats,
            LeadStats {
                total: 3,
                unlocked: 1,
                assigned: 0,
                liked: 1,
                disliked: 1,
                neutral: 1,
            }
        );
    }

    #[rstest]
    #[case("E", "2 weeks ago")]
    #[case("0", "Found 2 hour ago")]
    #[case("3", "3 hours ago")]
    #[case("9", "Yesterday")]
    fn recency_label_follows_id_checksum(#[case] id: &str, #[case] expected: &str) {
        let lead = lead(id, LeadKind::ReceptoNet, "Lead", None);
        assert_eq!(recency_label(&lead), expected);
    }

    #[test]
    fn catalogue_labels_use_city_country_form() {
        let labels: Vec<String> = LOCATION_CATALOGUE
            .iter()
            .flat_map(CountryLocations::labels)
            .collect();
        assert_eq!(labels.len(), 37);
        assert!(labels.contains(&"Cape Town, South Africa".to_owned()));
        assert!(labels.contains(&"Singapore, Singapore".to_owned()));
    }

    #[test]
    fn users_are_always_scoped() {
        let user = User {
            id: UserId::new("u5er0000").expect("valid id"),
            name: "Anand Kumar".to_owned(),
            username: "anand".to_owned(),
            password: "password".to_owned(),
            role: Role::Admin,
            status: UserStatus::Active,
            organization: "Beta Corp".to_owned(),
            email: None,
        };
        assert_eq!(user.organization(), Some("Beta Corp"));
    }
}
