use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::domain::{MatchResult, Profile, Scholarship};
use super::ranking;

/// Clock-backed entry point. Reads the time once per call and delegates to the
/// pure ranking functions, so concurrent callers share nothing but the clock.
#[derive(Clone)]
pub struct MatchEngine {
    clock: Arc<dyn Clock>,
}

impl MatchEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn calculate_match_score(
        &self,
        profile: &Profile,
        scholarship: &Scholarship,
    ) -> MatchResult {
        ranking::calculate_match(profile, scholarship, self.clock.now())
    }

    pub fn rank_scholarships(
        &self,
        profile: &Profile,
        scholarships: &[Scholarship],
    ) -> Vec<MatchResult> {
        ranking::rank_scholarships(profile, scholarships, self.clock.now())
    }

    pub fn get_top_matches(
        &self,
        profile: &Profile,
        scholarships: &[Scholarship],
        limit: usize,
    ) -> Vec<MatchResult> {
        ranking::top_matches(profile, scholarships, limit, self.clock.now())
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("now", &self.clock.now())
            .finish()
    }
}
