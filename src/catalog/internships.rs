use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Pro,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LocationFilter {
    #[default]
    All,
    /// Location text mentions Cameroon.
    Cameroon,
    /// Everything else, remote included.
    International,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub industry: String,
    pub location: String,
    pub roles: Vec<String>,
    pub level: ExperienceLevel,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub application_deadline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternshipFilters {
    /// Case-insensitive match against company, industry or any role.
    pub search: String,
    pub level: Option<ExperienceLevel>,
    pub location: LocationFilter,
    /// Exact industry name; `None` is "all industries".
    pub industry: Option<String>,
}

impl InternshipFilters {
    pub fn matches(&self, internship: &Internship) -> bool {
        let term = self.search.to_lowercase();
        if !term.is_empty()
            && !internship.company.to_lowercase().contains(&term)
            && !internship.industry.to_lowercase().contains(&term)
            && !internship
                .roles
                .iter()
                .any(|role| role.to_lowercase().contains(&term))
        {
            return false;
        }

        if self.level.is_some_and(|level| level != internship.level) {
            return false;
        }

        let in_cameroon = internship.location.contains("Cameroon");
        let location_ok = match self.location {
            LocationFilter::All => true,
            LocationFilter::Cameroon => in_cameroon,
            LocationFilter::International => !in_cameroon,
        };

        location_ok
            && self
                .industry
                .as_deref()
                .map_or(true, |industry| internship.industry == industry)
    }
}

pub fn filter_internships<'a>(
    internships: &'a [Internship],
    filters: &InternshipFilters,
) -> Vec<&'a Internship> {
    internships.iter().filter(|i| filters.matches(i)).collect()
}

/// Distinct industries in order of first appearance.
pub fn industries(internships: &[Internship]) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    for internship in internships {
        if !found.contains(&internship.industry.as_str()) {
            found.push(&internship.industry);
        }
    }
    found
}

pub fn featured_internships<'a>(internships: &[&'a Internship]) -> Vec<&'a Internship> {
    internships.iter().copied().filter(|i| i.is_featured).collect()
}
