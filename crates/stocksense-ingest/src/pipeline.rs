//! IngestPipeline: the one path by which observations enter the system.
//!
//! Every surface runs the same stages in the same order: admission gate →
//! validation → entity resolution → observation insert → synchronous
//! recompute for the touched pair. The response is not produced until the
//! recompute has completed, so a successful write always reads back its own
//! effect.

use std::collections::HashSet;
use std::sync::Arc;

use stocksense_admission::AdmissionLimiter;
use stocksense_consensus::ConsensusEngine;
use stocksense_core::config::AdmissionConfig;
use stocksense_core::errors::{StockError, StockResult};
use stocksense_core::models::{Item, Location, Observation, ObservationSource, StatusAggregate};
use stocksense_core::traits::IStockStore;
use tracing::{debug, info};

use crate::submission::{ImportRecord, LocationRef, ReportSubmission};

/// Route key for public report submissions.
pub const REPORTS_ROUTE: &str = "reports";
/// Route key for staff availability updates.
pub const AVAILABILITY_ROUTE: &str = "availability";

/// A successful write: the stored observation and the aggregate recomputed
/// from it.
///
/// `aggregate` is `None` only if the pair's observations were cascade-deleted
/// between the insert and the recompute.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub observation: Observation,
    pub aggregate: Option<StatusAggregate>,
}

/// Result of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub pairs_recomputed: usize,
}

/// The write pipeline. Owns its admission limiter and consensus engine;
/// storage is passed per call so one pipeline serves any store.
pub struct IngestPipeline {
    limiter: Arc<AdmissionLimiter>,
    consensus: Arc<ConsensusEngine>,
    admission: AdmissionConfig,
}

impl IngestPipeline {
    pub fn new(
        limiter: Arc<AdmissionLimiter>,
        consensus: Arc<ConsensusEngine>,
        admission: AdmissionConfig,
    ) -> Self {
        Self {
            limiter,
            consensus,
            admission,
        }
    }

    /// Accept a public availability report.
    ///
    /// `caller` is the admission key (derived from the request origin), not
    /// the reporter identity; attribution travels inside the submission.
    /// Public reports may create the item and the location they reference.
    pub fn submit_report(
        &self,
        store: &dyn IStockStore,
        submission: &ReportSubmission,
        caller: &str,
    ) -> StockResult<ReportOutcome> {
        // Stage 1: admission. A rejection records nothing.
        self.limiter
            .admit(REPORTS_ROUTE, caller, self.admission.reports)?;

        // Stage 2: validation, before any side effect.
        let report = submission.validate()?;

        // Stage 3: entity resolution.
        let item = resolve_or_create_item(store, &report.item_identifier)?;
        let location = resolve_or_create_location(store, &report.location)?;

        // Stage 4: the immutable observation.
        let mut observation = Observation::new(
            &item.id,
            &location.id,
            report.status,
            ObservationSource::Public,
        );
        if let Some(note) = report.note {
            observation = observation.with_note(note);
        }
        if let Some(reporter) = report.reporter {
            observation = observation.with_reporter(reporter);
        }
        store.insert_observation(&observation)?;
        debug!(
            item = %item.name,
            location = %location.name,
            status = %observation.status,
            "public report recorded"
        );

        // Stage 5: synchronous recompute for the pair.
        let aggregate = self.consensus.recompute(store, &item.id, &location.id)?;
        info!(item = %item.name, location = %location.name, "report accepted");
        Ok(ReportOutcome {
            observation,
            aggregate,
        })
    }

    /// Accept a staff update for an item the system already knows.
    ///
    /// Staff updates never create items: an unresolved identifier is an
    /// error, unlike the public path. The location must exist as well. The
    /// observation carries neither note nor reporter.
    pub fn record_staff_update(
        &self,
        store: &dyn IStockStore,
        location_id: &str,
        item_identifier: &str,
        status: &str,
        caller: &str,
    ) -> StockResult<ReportOutcome> {
        self.limiter
            .admit(AVAILABILITY_ROUTE, caller, self.admission.availability)?;

        let identifier = item_identifier.trim();
        if identifier.is_empty() {
            return Err(StockError::MissingField {
                field: "item_identifier".to_string(),
            });
        }
        let status = status.parse()?;

        let item = store
            .resolve_item(identifier)?
            .ok_or_else(|| StockError::ItemNotFound {
                id: identifier.to_string(),
            })?;
        let location =
            store
                .find_location(location_id)?
                .ok_or_else(|| StockError::LocationNotFound {
                    id: location_id.to_string(),
                })?;

        let observation =
            Observation::new(&item.id, &location.id, status, ObservationSource::Staff);
        store.insert_observation(&observation)?;
        debug!(
            item = %item.name,
            location = %location.name,
            status = %observation.status,
            "staff update recorded"
        );

        let aggregate = self.consensus.recompute(store, &item.id, &location.id)?;
        info!(item = %item.name, location = %location.name, "staff update accepted");
        Ok(ReportOutcome {
            observation,
            aggregate,
        })
    }

    /// Ingest a bulk feed of IMPORT observations.
    ///
    /// An internal surface: no admission gate. The whole batch is validated
    /// before anything is written, then each touched pair is recomputed once
    /// no matter how many rows fed it.
    pub fn import_observations(
        &self,
        store: &dyn IStockStore,
        batch: &[ImportRecord],
    ) -> StockResult<ImportSummary> {
        let mut validated = Vec::with_capacity(batch.len());
        for record in batch {
            validated.push(record.validate()?);
        }

        let mut touched: HashSet<(String, String)> = HashSet::new();
        let mut inserted = 0;
        for entry in validated {
            let item = resolve_or_create_item(store, &entry.item_identifier)?;
            let location = resolve_or_create_location(store, &entry.location)?;

            let mut observation = Observation::new(
                &item.id,
                &location.id,
                entry.status,
                ObservationSource::Import,
            );
            if let Some(observed_at) = entry.observed_at {
                observation = observation.with_created_at(observed_at);
            }
            store.insert_observation(&observation)?;
            inserted += 1;
            touched.insert((item.id, location.id));
        }

        for (item_id, location_id) in &touched {
            self.consensus.recompute(store, item_id, location_id)?;
        }

        info!(inserted, pairs = touched.len(), "import complete");
        Ok(ImportSummary {
            inserted,
            pairs_recomputed: touched.len(),
        })
    }
}

/// Resolve an identifier or create the item it names.
///
/// Two concurrent submissions can race on the unique canonical name; the
/// loser's insert fails and must pick up the winner's row.
fn resolve_or_create_item(store: &dyn IStockStore, identifier: &str) -> StockResult<Item> {
    if let Some(item) = store.resolve_item(identifier)? {
        return Ok(item);
    }
    let item = Item::new(identifier);
    match store.insert_item(&item) {
        Ok(()) => Ok(item),
        Err(err) => store.resolve_item(identifier)?.ok_or(err),
    }
}

fn resolve_or_create_location(
    store: &dyn IStockStore,
    reference: &LocationRef,
) -> StockResult<Location> {
    match reference {
        LocationRef::Existing { id } => {
            store
                .find_location(id)?
                .ok_or_else(|| StockError::LocationNotFound { id: id.clone() })
        }
        LocationRef::New {
            name,
            address,
            lat,
            lng,
        } => {
            let location = Location::new(name, address, *lat, *lng);
            store.insert_location(&location)?;
            Ok(location)
        }
    }
}
