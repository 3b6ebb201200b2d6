use serde::{Deserialize, Serialize};

/// Price ceiling applied when the user has not moved the slider.
pub const DEFAULT_MAX_PRICE: u64 = 10_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub skills: Vec<String>,
    pub rating: f32,
    #[serde(default)]
    pub sessions: u32,
    /// XAF per session.
    pub price: u64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub is_top_mentor: bool,
    #[serde(default)]
    pub is_near_you: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentorFilters {
    /// Case-insensitive match against name, title or any skill.
    pub search: String,
    /// Every listed skill must be present, compared exactly.
    pub skills: Vec<String>,
    pub min_rating: f32,
    pub max_price: u64,
    /// Case-insensitive substring of the availability text; `None` is "all".
    pub availability: Option<String>,
}

impl Default for MentorFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            skills: Vec::new(),
            min_rating: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            availability: None,
        }
    }
}

impl MentorFilters {
    /// Add the skill if absent, drop it otherwise.
    pub fn toggle_skill(&mut self, skill: &str) {
        match self.skills.iter().position(|s| s == skill) {
            Some(index) => {
                self.skills.remove(index);
            }
            None => self.skills.push(skill.to_string()),
        }
    }

    pub fn matches(&self, mentor: &Mentor) -> bool {
        let term = self.search.to_lowercase();
        if !term.is_empty()
            && !mentor.name.to_lowercase().contains(&term)
            && !mentor.title.to_lowercase().contains(&term)
            && !mentor
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&term))
        {
            return false;
        }

        if !self.skills.iter().all(|wanted| mentor.skills.contains(wanted)) {
            return false;
        }

        if mentor.rating < self.min_rating || mentor.price > self.max_price {
            return false;
        }

        match &self.availability {
            Some(wanted) => mentor
                .availability
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
            None => true,
        }
    }
}

pub fn filter_mentors<'a>(mentors: &'a [Mentor], filters: &MentorFilters) -> Vec<&'a Mentor> {
    mentors.iter().filter(|m| filters.matches(m)).collect()
}

/// Distinct skills in order of first appearance.
pub fn all_skills(mentors: &[Mentor]) -> Vec<&str> {
    let mut skills: Vec<&str> = Vec::new();
    for skill in mentors.iter().flat_map(|m| m.skills.iter()) {
        if !skills.contains(&skill.as_str()) {
            skills.push(skill);
        }
    }
    skills
}

/// Sections of the explore page. A mentor who is both top and nearby shows
/// up in both; `others` holds everyone else.
#[derive(Debug, Default, PartialEq)]
pub struct MentorGroups<'a> {
    pub top: Vec<&'a Mentor>,
    pub near_you: Vec<&'a Mentor>,
    pub others: Vec<&'a Mentor>,
}

pub fn group_mentors<'a>(mentors: &[&'a Mentor]) -> MentorGroups<'a> {
    let mut groups = MentorGroups::default();
    for &mentor in mentors {
        if mentor.is_top_mentor {
            groups.top.push(mentor);
        }
        if mentor.is_near_you {
            groups.near_you.push(mentor);
        }
        if !mentor.is_top_mentor && !mentor.is_near_you {
            groups.others.push(mentor);
        }
    }
    groups
}
