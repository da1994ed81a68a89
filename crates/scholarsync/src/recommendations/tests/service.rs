use super::common::*;
use crate::config::MatchingConfig;
use crate::matching::{EligibilityStatus, ScholarshipId, UserId};
use crate::recommendations::repository::RepositoryError;
use crate::recommendations::{MatchQuery, MatchService, MatchServiceError};
use std::sync::Arc;

#[test]
fn default_query_returns_eligible_and_partial_matches_above_floor() {
    let (service, _) = build_service();

    let matches = service
        .matched_scholarships(&user(), MatchQuery::default())
        .expect("matches load");

    assert_eq!(ids(&matches), vec!["sch-stem", "sch-open", "sch-arts"]);
    let scores: Vec<u8> = matches.iter().map(|result| result.score).collect();
    assert_eq!(scores, vec![93, 90, 78]);
    assert_eq!(matches[2].eligibility_status, EligibilityStatus::Partial);
}

#[test]
fn min_score_and_limit_narrow_the_listing() {
    let (service, _) = build_service();

    let strong = service
        .matched_scholarships(
            &user(),
            MatchQuery {
                limit: None,
                min_score: Some(80),
            },
        )
        .expect("matches load");
    assert_eq!(ids(&strong), vec!["sch-stem", "sch-open"]);

    let single = service
        .matched_scholarships(
            &user(),
            MatchQuery {
                limit: Some(1),
                min_score: Some(0),
            },
        )
        .expect("matches load");
    assert_eq!(ids(&single), vec!["sch-stem"]);
}

#[test]
fn configured_defaults_apply_when_query_is_empty() {
    let config = MatchingConfig {
        default_limit: 2,
        default_min_score: 0,
        candidate_multiplier: 1,
    };
    let service = MatchService::new(
        Arc::new(MemoryProfiles::with(profile())),
        Arc::new(MemoryScholarships::new(catalog())),
        Arc::new(MemoryScores::default()),
        engine(),
        config,
    );

    let matches = service
        .matched_scholarships(&user(), MatchQuery::default())
        .expect("matches load");

    assert_eq!(ids(&matches), vec!["sch-stem", "sch-open"]);
    assert_eq!(service.config().default_limit, 2);
}

#[test]
fn returned_matches_are_recorded_once_per_pair() {
    let (service, scores) = build_service();

    service
        .matched_scholarships(&user(), MatchQuery::default())
        .expect("first run");
    service
        .matched_scholarships(&user(), MatchQuery::default())
        .expect("second run");

    let records = scores.records();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record.user_id == user()));
    assert!(records.iter().all(|record| record.calculated_at == now()));
    let stem = records
        .iter()
        .find(|record| record.scholarship_id == ScholarshipId("sch-stem".to_string()))
        .expect("stem recorded");
    assert_eq!(stem.match_score, 93);
    assert_eq!(stem.match_factors.deadline_proximity, 1.0);
}

#[test]
fn unknown_user_has_no_profile() {
    let (service, scores) = build_service();

    match service.matched_scholarships(&UserId("ghost".to_string()), MatchQuery::default()) {
        Err(MatchServiceError::ProfileNotFound(user)) => assert_eq!(user.0, "ghost"),
        other => panic!("expected missing profile, got {other:?}"),
    }
    assert!(scores.records().is_empty());
}

#[test]
fn single_match_is_returned_even_when_ineligible() {
    let (service, scores) = build_service();

    let result = service
        .scholarship_match(&user(), &ScholarshipId("sch-grad".to_string()))
        .expect("match computed");

    assert_eq!(result.eligibility_status, EligibilityStatus::Ineligible);
    assert_eq!(result.score, 70);
    assert_eq!(
        result.missing_requirement_messages(),
        vec!["Academic standing must be: Graduate".to_string()]
    );
    assert_eq!(scores.records().len(), 1);
}

#[test]
fn single_match_reports_unknown_scholarship() {
    let (service, _) = build_service();

    let error = service
        .scholarship_match(&user(), &ScholarshipId("sch-9999".to_string()))
        .expect_err("scholarship is unknown");

    assert!(matches!(error, MatchServiceError::ScholarshipNotFound(_)));
    assert_eq!(error.to_string(), "scholarship sch-9999 not found");
}

#[test]
fn repository_failures_propagate() {
    let service = MatchService::new(
        Arc::new(MemoryProfiles::with(profile())),
        Arc::new(UnavailableScholarships),
        Arc::new(MemoryScores::default()),
        engine(),
        MatchingConfig::default(),
    );

    match service.matched_scholarships(&user(), MatchQuery::default()) {
        Err(MatchServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "catalog offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn score_store_failures_propagate() {
    let service = MatchService::new(
        Arc::new(MemoryProfiles::with(profile())),
        Arc::new(MemoryScholarships::new(catalog())),
        Arc::new(ReadOnlyScores),
        engine(),
        MatchingConfig::default(),
    );

    let error = service
        .scholarship_match(&user(), &ScholarshipId("sch-stem".to_string()))
        .expect_err("store rejects writes");

    assert!(matches!(error, MatchServiceError::Repository(_)));
}
