use std::sync::Arc;

use super::common::*;
use crate::matching::domain::{EligibilityStatus, MissingRequirement, Scholarship};
use crate::matching::{FixedClock, MatchEngine};

fn engine() -> MatchEngine {
    MatchEngine::new(Arc::new(FixedClock(now())))
}

#[test]
fn perfect_match_scores_high_and_is_eligible() {
    let result = engine().calculate_match_score(&profile(), &scholarship("sch-1", 30));

    assert_eq!(result.factors.gpa_match, 1.0);
    assert_eq!(result.factors.major_match, 1.0);
    assert_eq!(result.factors.academic_standing_match, 1.0);
    assert_eq!(result.factors.deadline_proximity, 1.0);
    assert_eq!(result.eligibility_status, EligibilityStatus::Eligible);
    assert!(result.missing_requirements.is_empty());
    assert!(result.score > 80);
    assert_eq!(result.score, 93);
}

#[test]
fn low_gpa_is_ineligible_with_a_shortfall_message() {
    let mut low_gpa = profile();
    low_gpa.gpa = Some(3.0);

    let result = engine().calculate_match_score(&low_gpa, &scholarship("sch-1", 30));

    assert!(approx(result.factors.gpa_match, 3.0 / 3.5));
    assert_eq!(result.eligibility_status, EligibilityStatus::Ineligible);
    assert!(result
        .missing_requirement_messages()
        .iter()
        .any(|message| message.starts_with("GPA must be 3.5 or higher")));
}

#[test]
fn expired_deadline_overrides_everything_else() {
    let result = engine().calculate_match_score(&profile(), &scholarship("sch-1", -1));

    assert_eq!(result.factors.deadline_proximity, 0.0);
    assert_eq!(result.eligibility_status, EligibilityStatus::Ineligible);
    assert_eq!(
        result.missing_requirement_messages(),
        vec!["Deadline has passed".to_string()]
    );
}

#[test]
fn five_day_deadline_is_urgent() {
    let result = engine().calculate_match_score(&profile(), &scholarship("sch-1", 5));

    assert_eq!(result.factors.deadline_proximity, 0.3);
}

#[test]
fn profile_without_activities_is_neutral_on_activity_match() {
    let mut candidate = profile();
    candidate.activities.clear();

    let result = engine().calculate_match_score(&candidate, &scholarship("sch-1", 30));

    assert_eq!(result.factors.activity_match, 0.5);
}

#[test]
fn soft_gaps_produce_a_partial_match() {
    let mut candidate = profile();
    candidate.major = Some("History".to_string());

    let result = engine().calculate_match_score(&candidate, &scholarship("sch-1", 30));

    assert_eq!(result.eligibility_status, EligibilityStatus::Partial);
    assert!(matches!(
        result.missing_requirements.as_slice(),
        [MissingRequirement::MajorNotAccepted { .. }]
    ));
}

#[test]
fn open_scholarship_is_always_eligible() {
    let mut sparse = profile();
    sparse.gpa = None;
    sparse.major = None;
    sparse.academic_standing = None;

    let result = engine().calculate_match_score(&sparse, &open_scholarship("open", 100));

    assert_eq!(result.eligibility_status, EligibilityStatus::Eligible);
    assert!(result.score > 0);
}

#[test]
fn repeated_scoring_is_identical() {
    let engine = engine();
    let candidate = profile();
    let scholarship = scholarship("sch-1", 42);

    let first = engine.calculate_match_score(&candidate, &scholarship);
    for _ in 0..10 {
        assert_eq!(engine.calculate_match_score(&candidate, &scholarship), first);
    }
}

#[test]
fn engine_ranks_and_limits_with_its_clock() {
    let catalog = vec![
        open_scholarship("far", 120),
        open_scholarship("near", 14),
        scholarship("expired", -4),
    ];

    let ranked = engine().rank_scholarships(&profile(), &catalog);
    assert_eq!(ranked[0].scholarship.id.0, "near");

    let top = engine().get_top_matches(&profile(), &catalog, 5);
    assert_eq!(top.len(), 2);
}

#[test]
fn seed_format_scholarships_deserialize() {
    let raw = r#"{
        "title": "Future Leaders Grant",
        "organization": "Civic Trust",
        "amount": 2500,
        "deadline": "2025-10-01T00:00:00Z",
        "description": "Supports student leaders",
        "eligibilityRequirements": {
            "minGPA": 3.2,
            "academicStanding": ["Undergraduate"],
            "states": ["MA"],
            "essayRequired": true
        },
        "applicationUrl": "https://example.com/leaders",
        "tags": ["Leadership"],
        "essayPrompts": [{"prompt": "Why you?", "wordLimit": 500, "required": true}]
    }"#;

    let scholarship: Scholarship = serde_json::from_str(raw).expect("seed record parses");

    assert_eq!(scholarship.eligibility_requirements.min_gpa, Some(3.2));
    assert_eq!(
        scholarship.eligibility_requirements.academic_standing,
        Some(vec!["Undergraduate".to_string()])
    );
    assert!(scholarship.eligibility_requirements.majors.is_none());
    assert!(scholarship.is_active);

    let result = engine().calculate_match_score(&profile(), &scholarship);
    assert_eq!(result.eligibility_status, EligibilityStatus::Eligible);
}

#[test]
fn match_results_serialize_with_labelled_status() {
    let result = engine().calculate_match_score(&profile(), &scholarship("sch-1", -1));

    let value = serde_json::to_value(&result).expect("serializes");

    assert_eq!(value["eligibilityStatus"], "ineligible");
    assert_eq!(value["missingRequirements"][0]["kind"], "deadline_passed");
    assert_eq!(value["factors"]["deadlineProximity"], 0.0);
}
