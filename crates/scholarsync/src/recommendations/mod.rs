//! Per-user match recommendations: loads a profile and the active catalog,
//! runs the engine, keeps results above a score floor and records the
//! computed scores.

pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use repository::{
    MatchScoreRecord, MatchScoreStore, ProfileRepository, RepositoryError, ScholarshipRepository,
};
pub use router::match_router;
pub use service::{MatchQuery, MatchService, MatchServiceError};
pub use views::MatchView;
