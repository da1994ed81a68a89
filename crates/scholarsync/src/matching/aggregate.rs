use serde::Serialize;

use super::domain::{MatchFactorKind, MatchFactors};

/// Weight applied to each factor. The standard set sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchWeights {
    pub gpa_match: f64,
    pub major_match: f64,
    pub academic_standing_match: f64,
    pub deadline_proximity: f64,
    pub profile_strength: f64,
    pub activity_match: f64,
}

impl MatchWeights {
    pub const STANDARD: MatchWeights = MatchWeights {
        gpa_match: 0.20,
        major_match: 0.25,
        academic_standing_match: 0.15,
        deadline_proximity: 0.15,
        profile_strength: 0.10,
        activity_match: 0.15,
    };

    pub fn get(&self, kind: MatchFactorKind) -> f64 {
        match kind {
            MatchFactorKind::GpaMatch => self.gpa_match,
            MatchFactorKind::MajorMatch => self.major_match,
            MatchFactorKind::AcademicStandingMatch => self.academic_standing_match,
            MatchFactorKind::DeadlineProximity => self.deadline_proximity,
            MatchFactorKind::ProfileStrength => self.profile_strength,
            MatchFactorKind::ActivityMatch => self.activity_match,
        }
    }

    pub fn total(&self) -> f64 {
        MatchFactorKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    /// Continuous (unrounded) contribution of one factor on the 0-100 scale.
    pub fn contribution(&self, factors: &MatchFactors, kind: MatchFactorKind) -> f64 {
        factors.get(kind) * self.get(kind) * 100.0
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Combine the factors into a 0-100 score with the standard weights.
pub fn aggregate_score(factors: &MatchFactors) -> u8 {
    aggregate_with(factors, &MatchWeights::STANDARD)
}

/// Sum every weighted contribution first, then round once.
pub fn aggregate_with(factors: &MatchFactors, weights: &MatchWeights) -> u8 {
    let total: f64 = MatchFactorKind::ALL
        .iter()
        .map(|kind| weights.contribution(factors, *kind))
        .sum();

    total.round().clamp(0.0, 100.0) as u8
}
