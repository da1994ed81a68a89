//! Scholarship catalog: seed JSON and CSV imports plus the read-side queries
//! the match service and HTTP surface run against it.

mod normalizer;
mod parser;

use crate::matching::{Scholarship, ScholarshipId};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use parser::RowError;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    /// `line` is the CSV line, or the 1-based record position in a JSON seed.
    InvalidRecord {
        line: u64,
        reason: String,
    },
    UnsupportedFormat(String),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read scholarship catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON data: {}", err),
            CatalogImportError::InvalidRecord { line, reason } => {
                write!(f, "invalid scholarship record at {}: {}", line, reason)
            }
            CatalogImportError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported catalog format '{}' (expected .json or .csv)",
                extension
            ),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::InvalidRecord { .. } | CatalogImportError::UnsupportedFormat(_) => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<RowError> for CatalogImportError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::Csv(err) => Self::Csv(err),
            RowError::Invalid { line, reason } => Self::InvalidRecord { line, reason },
        }
    }
}

/// An ordered, in-memory list of scholarships.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScholarshipCatalog {
    scholarships: Vec<Scholarship>,
}

impl ScholarshipCatalog {
    /// Wraps `scholarships`, assigning `sch-NNNN` ids to entries without one.
    pub fn new(scholarships: Vec<Scholarship>) -> Self {
        let mut scholarships = scholarships;
        for (index, scholarship) in scholarships.iter_mut().enumerate() {
            if scholarship.id.0.trim().is_empty() {
                scholarship.id = ScholarshipId(format!("sch-{:04}", index + 1));
            }
        }

        Self { scholarships }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let catalog = match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?)?,
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => return Err(CatalogImportError::UnsupportedFormat(extension)),
        };

        tracing::info!(
            path = %path.display(),
            scholarships = catalog.len(),
            "scholarship catalog loaded"
        );
        Ok(catalog)
    }

    /// Reads the seed format: a JSON array of camelCase scholarship objects.
    /// Deadlines may be RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let records: Vec<Value> = serde_json::from_reader(reader)?;
        Self::from_json_values(records)
    }

    /// Builds a catalog from already-parsed seed records.
    pub fn from_json_values(records: Vec<Value>) -> Result<Self, CatalogImportError> {
        let mut scholarships = Vec::with_capacity(records.len());

        for (index, mut record) in records.into_iter().enumerate() {
            let line = index as u64 + 1;
            normalize_deadline(&mut record, line)?;
            let scholarship: Scholarship =
                serde_json::from_value(record).map_err(|err| CatalogImportError::InvalidRecord {
                    line,
                    reason: err.to_string(),
                })?;
            scholarships.push(scholarship);
        }

        Ok(Self::new(scholarships))
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let scholarships = parser::parse_csv(reader)?;
        Ok(Self::new(scholarships))
    }

    pub fn all(&self) -> &[Scholarship] {
        &self.scholarships
    }

    pub fn len(&self) -> usize {
        self.scholarships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scholarships.is_empty()
    }

    pub fn get(&self, id: &ScholarshipId) -> Option<&Scholarship> {
        self.scholarships
            .iter()
            .find(|scholarship| &scholarship.id == id)
    }

    /// Active listings whose deadline has not passed at `now`.
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<Scholarship> {
        self.scholarships
            .iter()
            .filter(|scholarship| scholarship.is_active && scholarship.deadline >= now)
            .cloned()
            .collect()
    }

    /// Listings carrying at least one of `tags`; an empty filter keeps all.
    pub fn with_any_tag(&self, tags: &[String]) -> Vec<Scholarship> {
        if tags.is_empty() {
            return self.scholarships.clone();
        }

        self.scholarships
            .iter()
            .filter(|scholarship| scholarship.tags.iter().any(|tag| tags.contains(tag)))
            .cloned()
            .collect()
    }

    /// Every tag in the catalog, de-duplicated and sorted.
    pub fn tags(&self) -> Vec<String> {
        self.scholarships
            .iter()
            .flat_map(|scholarship| scholarship.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Case-insensitive substring search over title, organization and description.
    pub fn search(&self, query: &str) -> Vec<Scholarship> {
        let needle = query.trim().to_lowercase();
        self.scholarships
            .iter()
            .filter(|scholarship| {
                [
                    &scholarship.title,
                    &scholarship.organization,
                    &scholarship.description,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}

fn normalize_deadline(record: &mut Value, line: u64) -> Result<(), CatalogImportError> {
    let Some(raw) = record.get("deadline").and_then(Value::as_str) else {
        return Ok(());
    };

    let deadline =
        parser::parse_deadline(raw).ok_or_else(|| CatalogImportError::InvalidRecord {
            line,
            reason: format!("unrecognised deadline '{raw}'"),
        })?;

    if let Some(object) = record.as_object_mut() {
        object.insert("deadline".to_string(), Value::String(deadline.to_rfc3339()));
    }

    Ok(())
}
