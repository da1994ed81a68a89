use super::details::ProfileDetails;
use crate::matching::Activity;

const BASIC_INFO_POINTS: f64 = 30.0;
const ACADEMIC_INFO_POINTS: f64 = 30.0;
const NARRATIVE_POINTS: f64 = 30.0;
const ACTIVITY_POINTS: f64 = 10.0;

/// Narrative answers shorter than this do not count toward completeness.
const MIN_NARRATIVE_CHARS: usize = 50;
/// Number of activities that earns the full activity allotment.
const FULL_ACTIVITY_COUNT: f64 = 3.0;

/// Completeness score in `[0, 100]` consumed by the matching engine as
/// `profile_strength_score`.
pub fn calculate_profile_strength(details: &ProfileDetails, activities: &[Activity]) -> u8 {
    let basic = [
        filled(&details.first_name),
        filled(&details.last_name),
        filled(&details.phone),
        details.date_of_birth.is_some(),
        filled(&details.street_address),
        filled(&details.city),
        filled(&details.state),
        filled(&details.zip),
    ];

    let academic = [
        filled(&details.current_school),
        details.expected_graduation.is_some(),
        filled(&details.major),
        details.gpa.is_some(),
        filled(&details.academic_standing),
    ];

    let narrative = [
        &details.background,
        &details.challenges,
        &details.academic_journey,
        &details.career_goals,
        &details.why_education,
        &details.personal_values,
    ]
    .map(substantial);

    let activity_share = (activities.len() as f64 / FULL_ACTIVITY_COUNT).min(1.0);

    let score = share(&basic) * BASIC_INFO_POINTS
        + share(&academic) * ACADEMIC_INFO_POINTS
        + share(&narrative) * NARRATIVE_POINTS
        + activity_share * ACTIVITY_POINTS;

    score.round().clamp(0.0, 100.0) as u8
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.is_empty())
}

fn substantial(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|text| text.chars().count() > MIN_NARRATIVE_CHARS)
}

fn share(flags: &[bool]) -> f64 {
    let completed = flags.iter().filter(|flag| **flag).count();
    completed as f64 / flags.len() as f64
}
