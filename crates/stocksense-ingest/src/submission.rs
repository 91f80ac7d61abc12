//! Wire types for the write surface, checked and parsed before any side
//! effect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stocksense_core::constants::MAX_NOTE_CHARS;
use stocksense_core::errors::{StockError, StockResult};
use stocksense_core::models::StockStatus;

/// Reference to the location a report is about: an already-known id, or the
/// fields to create one on the fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    Existing {
        id: String,
    },
    New {
        name: String,
        address: String,
        lat: f64,
        lng: f64,
    },
}

impl LocationRef {
    /// Reject incomplete or out-of-range references.
    pub fn validate(&self) -> StockResult<()> {
        match self {
            LocationRef::Existing { id } => {
                if id.trim().is_empty() {
                    return Err(missing("location.id"));
                }
            }
            LocationRef::New {
                name,
                address,
                lat,
                lng,
            } => {
                if name.trim().is_empty() {
                    return Err(missing("location.name"));
                }
                if address.trim().is_empty() {
                    return Err(missing("location.address"));
                }
                check_coordinates(*lat, *lng)?;
            }
        }
        Ok(())
    }
}

/// A public availability report as it arrives from the outside.
///
/// `status` stays a raw string here and is parsed into [`StockStatus`]
/// exactly once, in [`validate`](Self::validate). `reporter` is an opaque,
/// already-resolved identity reference; the pipeline stores it untouched and
/// never mints identities itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub item_identifier: String,
    pub status: String,
    pub location: LocationRef,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub reporter: Option<String>,
}

/// A [`ReportSubmission`] with every field checked and parsed.
#[derive(Debug, Clone)]
pub struct ValidatedReport {
    pub item_identifier: String,
    pub status: StockStatus,
    pub location: LocationRef,
    pub note: Option<String>,
    pub reporter: Option<String>,
}

impl ReportSubmission {
    /// Check and parse every field. Runs before any side effect; an error
    /// here means nothing was created.
    pub fn validate(&self) -> StockResult<ValidatedReport> {
        let identifier = self.item_identifier.trim();
        if identifier.is_empty() {
            return Err(missing("item_identifier"));
        }
        let status: StockStatus = self.status.parse()?;
        self.location.validate()?;

        Ok(ValidatedReport {
            item_identifier: identifier.to_string(),
            status,
            location: self.location.clone(),
            note: clean_note(self.note.as_deref()),
            reporter: self.reporter.clone(),
        })
    }
}

/// One row of a bulk import feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    pub item_identifier: String,
    pub status: String,
    pub location: LocationRef,
    /// Feed-supplied observation time; the ingest time applies when absent.
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

/// An [`ImportRecord`] with every field checked and parsed.
#[derive(Debug, Clone)]
pub struct ValidatedImport {
    pub item_identifier: String,
    pub status: StockStatus,
    pub location: LocationRef,
    pub observed_at: Option<DateTime<Utc>>,
}

impl ImportRecord {
    pub fn validate(&self) -> StockResult<ValidatedImport> {
        let identifier = self.item_identifier.trim();
        if identifier.is_empty() {
            return Err(missing("item_identifier"));
        }
        let status: StockStatus = self.status.parse()?;
        self.location.validate()?;

        Ok(ValidatedImport {
            item_identifier: identifier.to_string(),
            status,
            location: self.location.clone(),
            observed_at: self.observed_at,
        })
    }
}

fn missing(field: &str) -> StockError {
    StockError::MissingField {
        field: field.to_string(),
    }
}

fn check_coordinates(lat: f64, lng: f64) -> StockResult<()> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(StockError::InvalidCoordinate {
            detail: format!("latitude {lat} out of range"),
        });
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(StockError::InvalidCoordinate {
            detail: format!("longitude {lng} out of range"),
        });
    }
    Ok(())
}

/// Drop blank notes; truncate the rest to the storage cap without splitting
/// a character.
fn clean_note(note: Option<&str>) -> Option<String> {
    let note = note?.trim();
    if note.is_empty() {
        return None;
    }
    Some(note.chars().take(MAX_NOTE_CHARS).collect())
}
