use chrono::{Datelike, NaiveDate};

use super::details::ProfileDetails;
use crate::matching::Activity;

pub const VALID_ACADEMIC_STANDINGS: [&str; 6] = [
    "freshman",
    "sophomore",
    "junior",
    "senior",
    "graduate",
    "postgraduate",
];

pub const VALID_ACTIVITY_TYPES: [&str; 6] = [
    "leadership",
    "work",
    "volunteer",
    "award",
    "skill",
    "extracurricular",
];

const MIN_AGE_YEARS: i32 = 13;
const MAX_AGE_YEARS: i32 = 100;
const MAX_HOURS_PER_WEEK: u16 = 168;

/// A single problem found while validating profile or activity input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileIssue {
    #[error("GPA must be between 0.0 and 4.0")]
    GpaOutOfRange(f64),
    #[error("Invalid phone number format")]
    InvalidPhone,
    #[error("Invalid date of birth (age must be between 13 and 100)")]
    ImplausibleAge(i32),
    #[error("Invalid academic standing. Must be one of: {}", VALID_ACADEMIC_STANDINGS.join(", "))]
    UnknownAcademicStanding(String),
    #[error("Activity type must be one of: {}", VALID_ACTIVITY_TYPES.join(", "))]
    UnknownActivityType(String),
    #[error("Hours per week must be between 0 and 168")]
    HoursPerWeekOutOfRange(u16),
    #[error("End date must be after start date")]
    EndBeforeStart,
    #[error("Current activities should not have an end date")]
    CurrentActivityHasEndDate,
}

/// Every issue found in one validation pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.issues))]
pub struct ValidationReport {
    pub issues: Vec<ProfileIssue>,
}

fn summarize(issues: &[ProfileIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationReport {
    fn from_issues(issues: Vec<ProfileIssue>) -> Result<(), ValidationReport> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { issues })
        }
    }
}

/// Check the profile fields the engine and the essay pipeline rely on.
/// `today` anchors the age check.
pub fn validate_profile(details: &ProfileDetails, today: NaiveDate) -> Result<(), ValidationReport> {
    let mut issues = Vec::new();

    if let Some(gpa) = details.gpa {
        if !(0.0..=4.0).contains(&gpa) {
            issues.push(ProfileIssue::GpaOutOfRange(gpa));
        }
    }

    if let Some(phone) = details.phone.as_deref().filter(|phone| !phone.is_empty()) {
        if !is_phone_like(phone) {
            issues.push(ProfileIssue::InvalidPhone);
        }
    }

    if let Some(born) = details.date_of_birth {
        let age = today.year() - born.year();
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age) {
            issues.push(ProfileIssue::ImplausibleAge(age));
        }
    }

    if let Some(standing) = details
        .academic_standing
        .as_deref()
        .filter(|standing| !standing.is_empty())
    {
        let normalized = standing.to_lowercase();
        if !VALID_ACADEMIC_STANDINGS.contains(&normalized.as_str()) {
            issues.push(ProfileIssue::UnknownAcademicStanding(standing.to_string()));
        }
    }

    ValidationReport::from_issues(issues)
}

/// Check an activity entry before it is attached to a profile.
pub fn validate_activity(activity: &Activity) -> Result<(), ValidationReport> {
    let mut issues = Vec::new();

    let kind = activity.activity_type.to_lowercase();
    if !VALID_ACTIVITY_TYPES.contains(&kind.as_str()) {
        issues.push(ProfileIssue::UnknownActivityType(
            activity.activity_type.clone(),
        ));
    }

    if let Some(hours) = activity.hours_per_week {
        if hours > MAX_HOURS_PER_WEEK {
            issues.push(ProfileIssue::HoursPerWeekOutOfRange(hours));
        }
    }

    if let (false, Some(start), Some(end)) =
        (activity.is_current, activity.start_date, activity.end_date)
    {
        if end < start {
            issues.push(ProfileIssue::EndBeforeStart);
        }
    }

    if activity.is_current && activity.end_date.is_some() {
        issues.push(ProfileIssue::CurrentActivityHasEndDate);
    }

    ValidationReport::from_issues(issues)
}

// Optional leading '+', then at least one digit, space, '-', '(' or ')'.
fn is_phone_like(raw: &str) -> bool {
    let body = raw.strip_prefix('+').unwrap_or(raw);
    !body.is_empty()
        && body
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '\t' | '-' | '(' | ')'))
}
