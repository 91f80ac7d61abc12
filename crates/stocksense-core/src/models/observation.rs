use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{ObservationSource, StockStatus};

/// One immutable status claim about an item at a location.
///
/// Observations are append-only: never mutated, deleted only by cascading
/// removal of their item or location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// UUID v4 identifier.
    pub id: String,
    pub item_id: String,
    pub location_id: String,
    pub status: StockStatus,
    pub source: ObservationSource,
    /// When the claim was recorded. Immutable; drives decay.
    pub created_at: DateTime<Utc>,
    /// Optional free-text note, truncated to 500 chars at ingestion.
    pub note: Option<String>,
    /// Opaque reference to the submitting identity. Nullable; nulled if the
    /// identity is later removed. Never interpreted by the core.
    pub reporter: Option<String>,
}

impl Observation {
    /// Create a new observation stamped with the current time.
    pub fn new(
        item_id: impl Into<String>,
        location_id: impl Into<String>,
        status: StockStatus,
        source: ObservationSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            item_id: item_id.into(),
            location_id: location_id.into(),
            status,
            source,
            created_at: Utc::now(),
            note: None,
            reporter: None,
        }
    }

    /// Builder-style note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Builder-style reporter reference.
    pub fn with_reporter(mut self, reporter: impl Into<String>) -> Self {
        self.reporter = Some(reporter.into());
        self
    }

    /// Builder-style timestamp override, for deterministic construction.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
