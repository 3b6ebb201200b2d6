//! Browsable mentor and internship listings.
//!
//! Filtering is pure: a filter set and a slice go in, the matching entries
//! come out in their original order.

pub mod internships;
pub mod mentors;

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

pub use internships::{
    featured_internships, filter_internships, industries, ExperienceLevel, Internship,
    InternshipFilters, LocationFilter,
};
pub use mentors::{
    all_skills, filter_mentors, group_mentors, Mentor, MentorFilters, MentorGroups,
    DEFAULT_MAX_PRICE,
};

/// Read a JSON array of listings.
pub async fn load_catalog<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let entries: Vec<T> = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "loaded catalog");
    Ok(entries)
}
