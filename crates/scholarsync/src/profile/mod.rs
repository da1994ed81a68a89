//! Profile completeness and validation, applied before profiles reach the
//! matching engine.

mod details;
mod strength;
mod validation;

pub use details::ProfileDetails;
pub use strength::calculate_profile_strength;
pub use validation::{
    validate_activity, validate_profile, ProfileIssue, ValidationReport, VALID_ACADEMIC_STANDINGS,
    VALID_ACTIVITY_TYPES,
};
