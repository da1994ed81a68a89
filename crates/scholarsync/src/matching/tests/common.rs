use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::matching::domain::{
    Activity, EligibilityRequirements, Profile, Scholarship, ScholarshipId, UserId,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn days_from_now(days: i64) -> DateTime<Utc> {
    now() + Duration::days(days)
}

pub(super) fn profile() -> Profile {
    Profile {
        user_id: UserId("user-1".to_string()),
        gpa: Some(3.8),
        major: Some("Computer Science".to_string()),
        academic_standing: Some("Undergraduate".to_string()),
        profile_strength_score: 85,
        activities: vec![Activity::of_type("volunteer"), Activity::of_type("leadership")],
    }
}

pub(super) fn stem_requirements() -> EligibilityRequirements {
    EligibilityRequirements {
        min_gpa: Some(3.5),
        academic_standing: Some(vec!["Undergraduate".to_string()]),
        majors: Some(vec![
            "Computer Science".to_string(),
            "Engineering".to_string(),
            "Mathematics".to_string(),
        ]),
        citizenship_required: Some(true),
        essay_required: Some(true),
        recommendations_required: Some(2),
        ..EligibilityRequirements::default()
    }
}

pub(super) fn scholarship(id: &str, deadline_days: i64) -> Scholarship {
    Scholarship {
        id: ScholarshipId(id.to_string()),
        title: "STEM Excellence Award".to_string(),
        organization: "Tech Foundation".to_string(),
        amount: 10_000.0,
        deadline: days_from_now(deadline_days),
        description: "For outstanding STEM students".to_string(),
        application_url: Some("https://example.com/apply".to_string()),
        tags: vec![
            "STEM".to_string(),
            "Technology".to_string(),
            "Leadership".to_string(),
        ],
        eligibility_requirements: stem_requirements(),
        is_active: true,
    }
}

pub(super) fn open_scholarship(id: &str, deadline_days: i64) -> Scholarship {
    let mut scholarship = scholarship(id, deadline_days);
    scholarship.eligibility_requirements = EligibilityRequirements::default();
    scholarship
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
