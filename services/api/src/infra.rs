use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use scholarsync::catalog::ScholarshipCatalog;
use scholarsync::error::AppError;
use scholarsync::matching::{Profile, Scholarship, ScholarshipId, UserId};
use scholarsync::recommendations::{
    MatchScoreRecord, MatchScoreStore, ProfileRepository, RepositoryError, ScholarshipRepository,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<ScholarshipCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn from_profiles(profiles: Vec<Profile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.profiles.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn profile_for_user(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store poisoned".to_string()))?;
        Ok(guard.get(user).cloned())
    }
}

#[derive(Clone)]
pub(crate) struct CatalogScholarshipRepository {
    catalog: Arc<ScholarshipCatalog>,
}

impl CatalogScholarshipRepository {
    pub(crate) fn new(catalog: Arc<ScholarshipCatalog>) -> Self {
        Self { catalog }
    }
}

impl ScholarshipRepository for CatalogScholarshipRepository {
    fn active(&self, now: DateTime<Utc>) -> Result<Vec<Scholarship>, RepositoryError> {
        Ok(self.catalog.active_at(now))
    }

    fn fetch(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        Ok(self.catalog.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMatchScoreStore {
    records: Arc<Mutex<HashMap<(UserId, ScholarshipId), MatchScoreRecord>>>,
}

impl MatchScoreStore for InMemoryMatchScoreStore {
    fn upsert(&self, record: MatchScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("score store poisoned".to_string()))?;
        guard.insert(
            (record.user_id.clone(), record.scholarship_id.clone()),
            record,
        );
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryMatchScoreStore {
    pub(crate) fn records(&self) -> Vec<MatchScoreRecord> {
        self.records
            .lock()
            .expect("score mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

pub(crate) fn load_profiles(path: &Path) -> Result<Vec<Profile>, AppError> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(file)
        .map_err(|err| AppError::Input(format!("invalid profiles file {}: {err}", path.display())))
}

pub(crate) fn load_profile(path: &Path) -> Result<Profile, AppError> {
    let file = std::fs::File::open(path)?;
    serde_json::from_reader(file)
        .map_err(|err| AppError::Input(format!("invalid profile file {}: {err}", path.display())))
}

/// RFC 3339 timestamps, or `YYYY-MM-DD` read as midnight UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    opt.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}
