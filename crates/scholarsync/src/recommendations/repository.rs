use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{MatchFactors, Profile, Scholarship, ScholarshipId, UserId};

/// Persisted outcome of one profile/scholarship evaluation, keyed by the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScoreRecord {
    pub user_id: UserId,
    pub scholarship_id: ScholarshipId,
    pub match_score: u8,
    pub match_factors: MatchFactors,
    pub calculated_at: DateTime<Utc>,
}

pub trait ProfileRepository: Send + Sync {
    fn profile_for_user(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError>;
}

pub trait ScholarshipRepository: Send + Sync {
    /// Listings that are active and still open at `now`.
    fn active(&self, now: DateTime<Utc>) -> Result<Vec<Scholarship>, RepositoryError>;
    fn fetch(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError>;
}

/// Upsert semantics: a later record for the same user and scholarship
/// replaces the earlier one.
pub trait MatchScoreStore: Send + Sync {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
