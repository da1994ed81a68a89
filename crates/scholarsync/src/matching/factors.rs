use chrono::{DateTime, Utc};

use super::domain::{MatchFactors, MissingRequirement, Profile, Scholarship};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Soft penalty for a major outside the accepted list.
const MAJOR_MISMATCH_CREDIT: f64 = 0.3;
/// Neutral activity credit when the profile lists no activities.
const NO_ACTIVITY_CREDIT: f64 = 0.5;
/// Flat bonus for having any activities at all.
const ACTIVITY_BASELINE_BONUS: f64 = 0.3;

/// Raw output of the factor scorer before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorAssessment {
    pub factors: MatchFactors,
    pub eligible: bool,
    pub missing_requirements: Vec<MissingRequirement>,
}

struct FactorScore {
    value: f64,
    gap: Option<MissingRequirement>,
}

impl FactorScore {
    fn met(value: f64) -> Self {
        Self { value, gap: None }
    }

    fn short(value: f64, gap: MissingRequirement) -> Self {
        Self {
            value,
            gap: Some(gap),
        }
    }
}

/// Compute all six factors for one profile/scholarship pair at `now`.
pub fn score_factors(
    profile: &Profile,
    scholarship: &Scholarship,
    now: DateTime<Utc>,
) -> FactorAssessment {
    let requirements = &scholarship.eligibility_requirements;

    let gpa = gpa_match(profile.gpa, requirements.min_gpa);
    let major = major_match(profile.major.as_deref(), requirements.majors.as_deref());
    let standing = academic_standing_match(
        profile.academic_standing.as_deref(),
        requirements.academic_standing.as_deref(),
    );
    let deadline = deadline_proximity(days_until(scholarship.deadline, now));

    let factors = MatchFactors {
        gpa_match: gpa.value,
        major_match: major.value,
        academic_standing_match: standing.value,
        deadline_proximity: deadline.value,
        profile_strength: profile_strength(profile.profile_strength_score),
        activity_match: activity_match(profile, &scholarship.tags),
    };

    let missing_requirements: Vec<MissingRequirement> = [gpa, major, standing, deadline]
        .into_iter()
        .filter_map(|score| score.gap)
        .collect();
    let eligible = !missing_requirements
        .iter()
        .any(MissingRequirement::is_hard_failure);

    FactorAssessment {
        factors,
        eligible,
        missing_requirements,
    }
}

fn gpa_match(gpa: Option<f64>, min_gpa: Option<f64>) -> FactorScore {
    let minimum = match min_gpa {
        Some(minimum) if minimum > 0.0 => minimum,
        _ => return FactorScore::met(1.0),
    };

    match gpa {
        None => FactorScore::short(0.0, MissingRequirement::GpaNotProvided),
        Some(actual) if actual >= minimum => FactorScore::met(1.0),
        Some(actual) => FactorScore::short(
            (actual / minimum).max(0.0),
            MissingRequirement::GpaBelowMinimum { minimum, actual },
        ),
    }
}

fn major_match(major: Option<&str>, accepted: Option<&[String]>) -> FactorScore {
    let accepted = match accepted {
        Some(list) if !list.is_empty() => list,
        _ => return FactorScore::met(1.0),
    };

    let major = match major.filter(|value| !value.is_empty()) {
        Some(major) => major.to_lowercase(),
        None => return FactorScore::short(0.0, MissingRequirement::MajorNotProvided),
    };

    let matched = accepted.iter().any(|candidate| {
        let candidate = candidate.to_lowercase();
        major.contains(&candidate) || candidate.contains(&major)
    });

    if matched {
        FactorScore::met(1.0)
    } else {
        FactorScore::short(
            MAJOR_MISMATCH_CREDIT,
            MissingRequirement::MajorNotAccepted {
                accepted: accepted.to_vec(),
            },
        )
    }
}

fn academic_standing_match(standing: Option<&str>, accepted: Option<&[String]>) -> FactorScore {
    let accepted = match accepted {
        Some(list) if !list.is_empty() => list,
        _ => return FactorScore::met(1.0),
    };

    match standing.filter(|value| !value.is_empty()) {
        None => FactorScore::short(0.0, MissingRequirement::AcademicStandingNotProvided),
        Some(standing) if accepted.iter().any(|candidate| candidate == standing) => {
            FactorScore::met(1.0)
        }
        Some(_) => FactorScore::short(
            0.0,
            MissingRequirement::AcademicStandingNotAccepted {
                accepted: accepted.to_vec(),
            },
        ),
    }
}

/// Whole days from `now` until `deadline`, floored, so any past instant is negative.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Desirability of a deadline `days` out. Peaks in the 7 to 30 day window.
pub fn deadline_band(days: i64) -> f64 {
    match days {
        d if d < 0 => 0.0,
        0..=6 => 0.3,
        7..=30 => 1.0,
        31..=60 => 0.8,
        61..=90 => 0.6,
        _ => 0.4,
    }
}

fn deadline_proximity(days: i64) -> FactorScore {
    if days < 0 {
        FactorScore::short(0.0, MissingRequirement::DeadlinePassed)
    } else {
        FactorScore::met(deadline_band(days))
    }
}

fn profile_strength(score: u8) -> f64 {
    f64::from(score.min(100)) / 100.0
}

fn activity_match(profile: &Profile, tags: &[String]) -> f64 {
    if profile.activities.is_empty() {
        return NO_ACTIVITY_CREDIT;
    }

    let activity_types: Vec<String> = profile
        .activities
        .iter()
        .map(|activity| activity.activity_type.to_lowercase())
        .collect();

    let tag_matches = tags
        .iter()
        .filter(|tag| {
            let tag = tag.to_lowercase();
            activity_types
                .iter()
                .any(|kind| kind.contains(&tag) || tag.contains(kind.as_str()))
        })
        .count();

    let overlap = tag_matches as f64 / tags.len().max(1) as f64;
    (overlap + ACTIVITY_BASELINE_BONUS).min(1.0)
}
