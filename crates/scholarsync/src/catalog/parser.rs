use super::normalizer::{normalize_label, split_list};
use crate::matching::{EligibilityRequirements, Scholarship, ScholarshipId};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    Invalid { line: u64, reason: String },
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Scholarship>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scholarships = Vec::new();

    let headers = csv_reader.headers()?.clone();

    for record in csv_reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let row: CatalogRow = record.deserialize(Some(&headers))?;
        scholarships.push(row.into_scholarship(line)?);
    }

    Ok(scholarships)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    title: String,
    #[serde(default)]
    organization: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    deadline: String,
    #[serde(default)]
    tags: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_gpa: Option<String>,
    #[serde(default)]
    majors: String,
    #[serde(default)]
    academic_standing: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    citizenship_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    essay_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    recommendations_required: Option<String>,
}

impl CatalogRow {
    fn into_scholarship(self, line: u64) -> Result<Scholarship, RowError> {
        let invalid = |reason: String| RowError::Invalid { line, reason };

        let deadline = parse_deadline(&self.deadline)
            .ok_or_else(|| invalid(format!("unrecognised deadline '{}'", self.deadline)))?;

        let amount = match self.amount.as_deref() {
            Some(raw) => raw
                .replace([',', '$'], "")
                .parse::<f64>()
                .map_err(|_| invalid(format!("amount '{raw}' is not a number")))?,
            None => 0.0,
        };

        let min_gpa = match self.min_gpa.as_deref() {
            Some(raw) => Some(
                raw.parse::<f64>()
                    .map_err(|_| invalid(format!("min_gpa '{raw}' is not a number")))?,
            ),
            None => None,
        };

        let recommendations_required = match self.recommendations_required.as_deref() {
            Some(raw) => Some(raw.parse::<u8>().map_err(|_| {
                invalid(format!("recommendations_required '{raw}' is not a count"))
            })?),
            None => None,
        };

        let citizenship_required = parse_flag(self.citizenship_required.as_deref())
            .map_err(|raw| invalid(format!("citizenship_required '{raw}' is not a boolean")))?;
        let essay_required = parse_flag(self.essay_required.as_deref())
            .map_err(|raw| invalid(format!("essay_required '{raw}' is not a boolean")))?;

        let majors = split_list(&self.majors);
        let academic_standing = split_list(&self.academic_standing);

        Ok(Scholarship {
            id: ScholarshipId(self.id.unwrap_or_default()),
            title: normalize_label(&self.title),
            organization: normalize_label(&self.organization),
            amount,
            deadline,
            description: String::new(),
            application_url: None,
            tags: split_list(&self.tags),
            eligibility_requirements: EligibilityRequirements {
                min_gpa,
                academic_standing: (!academic_standing.is_empty()).then_some(academic_standing),
                majors: (!majors.is_empty()).then_some(majors),
                states: None,
                citizenship_required,
                essay_required,
                recommendations_required,
            },
            is_active: true,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(raw: Option<&str>) -> Result<Option<bool>, String> {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(value) => match value.as_str() {
            "true" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "0" => Ok(Some(false)),
            _ => Err(value),
        },
    }
}

/// RFC 3339 timestamps, or bare dates read as midnight UTC.
pub(crate) fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt));
    }

    None
}
