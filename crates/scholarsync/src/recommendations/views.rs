use serde::Serialize;

use crate::matching::{MatchFactors, MatchResult, Scholarship};

/// Response shape for a scored scholarship.
#[derive(Debug, Clone, Serialize)]
pub struct MatchView {
    pub scholarship: Scholarship,
    pub match_score: u8,
    pub match_factors: MatchFactors,
    pub eligibility_status: &'static str,
    pub missing_requirements: Vec<String>,
}

impl From<MatchResult> for MatchView {
    fn from(result: MatchResult) -> Self {
        let missing_requirements = result.missing_requirement_messages();
        Self {
            scholarship: result.scholarship,
            match_score: result.score,
            match_factors: result.factors,
            eligibility_status: result.eligibility_status.label(),
            missing_requirements,
        }
    }
}
