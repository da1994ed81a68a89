use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::repository::{
    MatchScoreRecord, MatchScoreStore, ProfileRepository, RepositoryError, ScholarshipRepository,
};
use crate::config::MatchingConfig;
use crate::matching::{
    calculate_match, top_matches, MatchEngine, MatchResult, Profile, ScholarshipId, UserId,
};

/// Optional overrides for a recommendation request; unset fields fall back to
/// the configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub min_score: Option<u8>,
}

/// Service composing the profile and catalog repositories, the match engine
/// and the score store.
pub struct MatchService<P, S, M> {
    profiles: Arc<P>,
    scholarships: Arc<S>,
    scores: Arc<M>,
    engine: MatchEngine,
    config: MatchingConfig,
}

impl<P, S, M> MatchService<P, S, M>
where
    P: ProfileRepository + 'static,
    S: ScholarshipRepository + 'static,
    M: MatchScoreStore + 'static,
{
    pub fn new(
        profiles: Arc<P>,
        scholarships: Arc<S>,
        scores: Arc<M>,
        engine: MatchEngine,
        config: MatchingConfig,
    ) -> Self {
        Self {
            profiles,
            scholarships,
            scores,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Best matches for `user` among the open scholarships, scored at or
    /// above the floor and capped at the limit.
    pub fn matched_scholarships(
        &self,
        user: &UserId,
        query: MatchQuery,
    ) -> Result<Vec<MatchResult>, MatchServiceError> {
        let limit = query.limit.unwrap_or(self.config.default_limit);
        let min_score = query.min_score.unwrap_or(self.config.default_min_score);
        let now = self.engine.clock().now();

        let profile = self.load_profile(user)?;
        let scholarships = self.scholarships.active(now)?;
        let candidate_limit = limit.saturating_mul(self.config.candidate_multiplier);

        let mut matches: Vec<MatchResult> =
            top_matches(&profile, &scholarships, candidate_limit, now)
                .into_iter()
                .filter(|result| result.score >= min_score)
                .collect();
        matches.truncate(limit);

        for result in &matches {
            self.record(user, result, now)?;
        }

        info!(
            user_id = %user,
            candidates = scholarships.len(),
            matches = matches.len(),
            min_score,
            "calculated scholarship matches"
        );

        Ok(matches)
    }

    /// Score one scholarship for `user`, whatever its eligibility.
    pub fn scholarship_match(
        &self,
        user: &UserId,
        scholarship_id: &ScholarshipId,
    ) -> Result<MatchResult, MatchServiceError> {
        let profile = self.load_profile(user)?;
        let scholarship = self
            .scholarships
            .fetch(scholarship_id)?
            .ok_or_else(|| MatchServiceError::ScholarshipNotFound(scholarship_id.clone()))?;

        let now = self.engine.clock().now();
        let result = calculate_match(&profile, &scholarship, now);
        self.record(user, &result, now)?;

        info!(
            user_id = %user,
            scholarship_id = %scholarship_id,
            score = result.score,
            status = result.eligibility_status.label(),
            "calculated scholarship match"
        );

        Ok(result)
    }

    fn load_profile(&self, user: &UserId) -> Result<Profile, MatchServiceError> {
        self.profiles
            .profile_for_user(user)?
            .ok_or_else(|| MatchServiceError::ProfileNotFound(user.clone()))
    }

    fn record(
        &self,
        user: &UserId,
        result: &MatchResult,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), MatchServiceError> {
        self.scores.upsert(MatchScoreRecord {
            user_id: user.clone(),
            scholarship_id: result.scholarship.id.clone(),
            match_score: result.score,
            match_factors: result.factors,
            calculated_at,
        })?;
        Ok(())
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("profile not found for user {0}")]
    ProfileNotFound(UserId),
    #[error("scholarship {0} not found")]
    ScholarshipNotFound(ScholarshipId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
