use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for scholarship records.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipId(pub String);

/// Identifier wrapper for the account owning a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Student snapshot consumed by the matching engine.
///
/// `gpa`, when present, is expected to have been validated into `[0, 4]` by
/// the profile-update path before it reaches the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub academic_standing: Option<String>,
    #[serde(default)]
    pub profile_strength_score: u8,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Extracurricular or work entry attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub hours_per_week: Option<u16>,
}

impl Activity {
    pub fn of_type(activity_type: impl Into<String>) -> Self {
        Self {
            activity_type: activity_type.into(),
            ..Self::default()
        }
    }
}

/// Scholarship listing as materialised from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    #[serde(default)]
    pub id: ScholarshipId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub amount: f64,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub eligibility_requirements: EligibilityRequirements,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Key-optional requirement record. An absent key places no constraint on
/// that dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequirements {
    #[serde(
        default,
        rename = "minGPA",
        alias = "minGpa",
        alias = "min_gpa",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_standing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub majors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essay_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations_required: Option<u8>,
}

/// The six independent fit dimensions, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFactors {
    pub gpa_match: f64,
    pub major_match: f64,
    pub academic_standing_match: f64,
    pub deadline_proximity: f64,
    pub profile_strength: f64,
    pub activity_match: f64,
}

impl MatchFactors {
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

    /// Per-factor breakdown in a fixed order, for explanations.
    pub fn breakdown(&self) -> impl Iterator<Item = (MatchFactorKind, f64)> + '_ {
        MatchFactorKind::ALL
            .iter()
            .map(move |kind| (*kind, self.get(*kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactorKind {
    GpaMatch,
    MajorMatch,
    AcademicStandingMatch,
    DeadlineProximity,
    ProfileStrength,
    ActivityMatch,
}

impl MatchFactorKind {
    pub const ALL: [MatchFactorKind; 6] = [
        MatchFactorKind::GpaMatch,
        MatchFactorKind::MajorMatch,
        MatchFactorKind::AcademicStandingMatch,
        MatchFactorKind::DeadlineProximity,
        MatchFactorKind::ProfileStrength,
        MatchFactorKind::ActivityMatch,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MatchFactorKind::GpaMatch => "GPA",
            MatchFactorKind::MajorMatch => "Major",
            MatchFactorKind::AcademicStandingMatch => "Academic standing",
            MatchFactorKind::DeadlineProximity => "Deadline",
            MatchFactorKind::ProfileStrength => "Profile strength",
            MatchFactorKind::ActivityMatch => "Activities",
        }
    }
}

/// Tri-state eligibility classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityStatus {
    Eligible,
    Partial,
    Ineligible,
}

impl EligibilityStatus {
    /// A hard failure wins; otherwise any outstanding gap makes the match partial.
    pub const fn classify(eligible: bool, has_missing_requirements: bool) -> Self {
        if !eligible {
            EligibilityStatus::Ineligible
        } else if has_missing_requirements {
            EligibilityStatus::Partial
        } else {
            EligibilityStatus::Eligible
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::Partial => "partial",
            EligibilityStatus::Ineligible => "ineligible",
        }
    }
}

/// Structured explanation of an unmet or unverifiable requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissingRequirement {
    GpaNotProvided,
    GpaBelowMinimum { minimum: f64, actual: f64 },
    MajorNotProvided,
    MajorNotAccepted { accepted: Vec<String> },
    AcademicStandingNotProvided,
    AcademicStandingNotAccepted { accepted: Vec<String> },
    DeadlinePassed,
}

impl MissingRequirement {
    /// True for the failures that force an ineligible verdict.
    pub const fn is_hard_failure(&self) -> bool {
        matches!(
            self,
            MissingRequirement::GpaBelowMinimum { .. }
                | MissingRequirement::AcademicStandingNotAccepted { .. }
                | MissingRequirement::DeadlinePassed
        )
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MissingRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRequirement::GpaNotProvided => write!(f, "GPA not provided in profile"),
            MissingRequirement::GpaBelowMinimum { minimum, actual } => {
                write!(f, "GPA must be {minimum} or higher (yours: {actual})")
            }
            MissingRequirement::MajorNotProvided => write!(f, "Major not provided in profile"),
            MissingRequirement::MajorNotAccepted { accepted } => {
                write!(f, "Major must be one of: {}", accepted.join(", "))
            }
            MissingRequirement::AcademicStandingNotProvided => {
                write!(f, "Academic standing not provided in profile")
            }
            MissingRequirement::AcademicStandingNotAccepted { accepted } => {
                write!(f, "Academic standing must be: {}", accepted.join(" or "))
            }
            MissingRequirement::DeadlinePassed => write!(f, "Deadline has passed"),
        }
    }
}

/// Scored, explained match between one profile and one scholarship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub scholarship: Scholarship,
    pub score: u8,
    pub factors: MatchFactors,
    pub eligibility_status: EligibilityStatus,
    pub missing_requirements: Vec<MissingRequirement>,
}

impl MatchResult {
    /// User-facing strings for each missing requirement, in discovery order.
    pub fn missing_requirement_messages(&self) -> Vec<String> {
        self.missing_requirements
            .iter()
            .map(MissingRequirement::summary)
            .collect()
    }
}
