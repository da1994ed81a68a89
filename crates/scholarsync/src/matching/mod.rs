//! Scholarship/profile matching engine.
//!
//! Six independent factors are scored for each pair, combined with fixed
//! weights into a 0-100 score, and classified as eligible, partial or
//! ineligible with a list of explanations. Ranking orders by score, then by
//! the earlier deadline. Nothing here performs I/O or reads the system clock
//! except [`SystemClock`].

mod aggregate;
mod clock;
pub mod domain;
mod engine;
mod factors;
mod ranking;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_score, aggregate_with, MatchWeights};
pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    Activity, EligibilityRequirements, EligibilityStatus, MatchFactorKind, MatchFactors,
    MatchResult, MissingRequirement, Profile, Scholarship, ScholarshipId, UserId,
};
pub use engine::MatchEngine;
pub use factors::{days_until, deadline_band, score_factors, FactorAssessment};
pub use ranking::{calculate_match, filter_eligible, rank_scholarships, top_matches};
