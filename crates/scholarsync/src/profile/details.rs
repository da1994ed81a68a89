use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::strength::calculate_profile_strength;
use crate::matching::{Activity, Profile, UserId};

/// Full editable profile as captured by onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDetails {
    pub user_id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub current_school: Option<String>,
    pub expected_graduation: Option<NaiveDate>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub gpa: Option<f64>,
    pub academic_standing: Option<String>,
    pub background: Option<String>,
    pub challenges: Option<String>,
    pub academic_journey: Option<String>,
    pub career_goals: Option<String>,
    pub why_education: Option<String>,
    pub personal_values: Option<String>,
}

impl ProfileDetails {
    /// Snapshot the fields the matching engine reads, with a fresh strength score.
    pub fn to_match_profile(&self, activities: Vec<Activity>) -> Profile {
        let profile_strength_score = calculate_profile_strength(self, &activities);

        Profile {
            user_id: self.user_id.clone(),
            gpa: self.gpa,
            major: non_blank(&self.major),
            academic_standing: non_blank(&self.academic_standing),
            profile_strength_score,
            activities,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|text| !text.is_empty()).cloned()
}
