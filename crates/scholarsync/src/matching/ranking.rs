use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::aggregate::aggregate_score;
use super::domain::{EligibilityStatus, MatchResult, Profile, Scholarship};
use super::factors::score_factors;

/// Score, classify and explain a single scholarship for `profile`.
pub fn calculate_match(
    profile: &Profile,
    scholarship: &Scholarship,
    now: DateTime<Utc>,
) -> MatchResult {
    let assessment = score_factors(profile, scholarship, now);
    let score = aggregate_score(&assessment.factors);
    let eligibility_status = EligibilityStatus::classify(
        assessment.eligible,
        !assessment.missing_requirements.is_empty(),
    );

    MatchResult {
        scholarship: scholarship.clone(),
        score,
        factors: assessment.factors,
        eligibility_status,
        missing_requirements: assessment.missing_requirements,
    }
}

/// Score every scholarship and order by score (desc), then deadline (asc).
/// Remaining ties keep their input order.
pub fn rank_scholarships(
    profile: &Profile,
    scholarships: &[Scholarship],
    now: DateTime<Utc>,
) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = scholarships
        .iter()
        .map(|scholarship| calculate_match(profile, scholarship, now))
        .collect();

    matches.sort_by(ranking_order);
    matches
}

fn ranking_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.scholarship.deadline.cmp(&b.scholarship.deadline))
}

/// Keep eligible matches, partial ones when `include_partial`, never ineligible ones.
pub fn filter_eligible(matches: Vec<MatchResult>, include_partial: bool) -> Vec<MatchResult> {
    matches
        .into_iter()
        .filter(|result| match result.eligibility_status {
            EligibilityStatus::Eligible => true,
            EligibilityStatus::Partial => include_partial,
            EligibilityStatus::Ineligible => false,
        })
        .collect()
}

/// Rank, drop ineligible results (partial ones stay) and keep the first `limit`.
pub fn top_matches(
    profile: &Profile,
    scholarships: &[Scholarship],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<MatchResult> {
    let ranked = rank_scholarships(profile, scholarships, now);
    let mut eligible = filter_eligible(ranked, true);
    eligible.truncate(limit);
    eligible
}
