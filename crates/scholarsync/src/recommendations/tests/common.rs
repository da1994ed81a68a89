use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::matching::{
    Activity, EligibilityRequirements, FixedClock, MatchEngine, Profile, Scholarship,
    ScholarshipId, UserId,
};
use crate::recommendations::repository::{
    MatchScoreRecord, MatchScoreStore, ProfileRepository, RepositoryError, ScholarshipRepository,
};
use crate::recommendations::{match_router, MatchService};

pub(super) type MemoryService = MatchService<MemoryProfiles, MemoryScholarships, MemoryScores>;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn user() -> UserId {
    UserId("user-1".to_string())
}

pub(super) fn profile() -> Profile {
    Profile {
        user_id: user(),
        gpa: Some(3.8),
        major: Some("Computer Science".to_string()),
        academic_standing: Some("Undergraduate".to_string()),
        profile_strength_score: 85,
        activities: vec![Activity::of_type("volunteer"), Activity::of_type("leadership")],
    }
}

fn listing(
    id: &str,
    deadline_days: i64,
    tags: &[&str],
    requirements: EligibilityRequirements,
) -> Scholarship {
    Scholarship {
        id: ScholarshipId(id.to_string()),
        title: format!("{id} award"),
        organization: "ScholarSync Partners".to_string(),
        amount: 2_500.0,
        deadline: now() + Duration::days(deadline_days),
        description: String::new(),
        application_url: None,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        eligibility_requirements: requirements,
        is_active: true,
    }
}

/// Eligible at 93, eligible at 90, partial at 78, ineligible at 70, plus a
/// closed and an inactive listing the repository never returns as active.
pub(super) fn catalog() -> Vec<Scholarship> {
    let stem = EligibilityRequirements {
        min_gpa: Some(3.5),
        academic_standing: Some(vec!["Undergraduate".to_string()]),
        majors: Some(vec![
            "Computer Science".to_string(),
            "Engineering".to_string(),
        ]),
        ..EligibilityRequirements::default()
    };
    let arts = EligibilityRequirements {
        majors: Some(vec!["Fine Arts".to_string()]),
        ..EligibilityRequirements::default()
    };
    let graduate = EligibilityRequirements {
        academic_standing: Some(vec!["Graduate".to_string()]),
        ..EligibilityRequirements::default()
    };

    let mut inactive = listing("sch-inactive", 30, &["STEM"], stem.clone());
    inactive.is_active = false;

    vec![
        listing("sch-grad", 60, &[], graduate),
        listing("sch-arts", 20, &["Arts", "Leadership"], arts),
        listing(
            "sch-open",
            45,
            &["Volunteer", "Arts", "Music"],
            EligibilityRequirements::default(),
        ),
        listing("sch-closed", -3, &["STEM"], EligibilityRequirements::default()),
        listing("sch-stem", 30, &["STEM", "Technology", "Leadership"], stem),
        inactive,
    ]
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(Arc::new(FixedClock(now())))
}

pub(super) fn build_service() -> (MemoryService, Arc<MemoryScores>) {
    let profiles = Arc::new(MemoryProfiles::with(profile()));
    let scholarships = Arc::new(MemoryScholarships::new(catalog()));
    let scores = Arc::new(MemoryScores::default());
    let service = MatchService::new(
        profiles,
        scholarships,
        scores.clone(),
        engine(),
        MatchingConfig::default(),
    );
    (service, scores)
}

pub(super) fn build_router() -> (axum::Router, Arc<MemoryScores>) {
    let (service, scores) = build_service();
    (match_router(Arc::new(service)), scores)
}

pub(super) fn ids(matches: &[crate::matching::MatchResult]) -> Vec<&str> {
    matches
        .iter()
        .map(|result| result.scholarship.id.0.as_str())
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<BTreeMap<UserId, Profile>>>,
}

impl MemoryProfiles {
    pub(super) fn with(profile: Profile) -> Self {
        let repository = Self::default();
        repository
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.user_id.clone(), profile);
        repository
    }
}

impl ProfileRepository for MemoryProfiles {
    fn profile_for_user(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryScholarships {
    scholarships: Vec<Scholarship>,
}

impl MemoryScholarships {
    pub(super) fn new(scholarships: Vec<Scholarship>) -> Self {
        Self { scholarships }
    }
}

impl ScholarshipRepository for MemoryScholarships {
    fn active(&self, now: DateTime<Utc>) -> Result<Vec<Scholarship>, RepositoryError> {
        Ok(self
            .scholarships
            .iter()
            .filter(|scholarship| scholarship.is_active && scholarship.deadline >= now)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        Ok(self
            .scholarships
            .iter()
            .find(|scholarship| &scholarship.id == id)
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryScores {
    records: Arc<Mutex<BTreeMap<(UserId, ScholarshipId), MatchScoreRecord>>>,
}

impl MemoryScores {
    pub(super) fn records(&self) -> Vec<MatchScoreRecord> {
        self.records
            .lock()
            .expect("score mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl MatchScoreStore for MemoryScores {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), RepositoryError> {
        let key = (record.user_id.clone(), record.scholarship_id.clone());
        self.records
            .lock()
            .expect("score mutex poisoned")
            .insert(key, record);
        Ok(())
    }
}

pub(super) struct UnavailableScholarships;

impl ScholarshipRepository for UnavailableScholarships {
    fn active(&self, _now: DateTime<Utc>) -> Result<Vec<Scholarship>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn fetch(&self, _id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) struct ReadOnlyScores;

impl MatchScoreStore for ReadOnlyScores {
    fn upsert(&self, _record: MatchScoreRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
