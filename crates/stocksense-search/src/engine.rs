//! SearchEngine: two-mode proximity search over stored aggregates.
//!
//! Item mode answers "where nearby can I get X"; location mode answers
//! "what do the stores around me carry". Both share one shape: bounding-box
//! prefilter → exact distance re-check → rank → truncate.

use chrono::{DateTime, Utc};
use stocksense_core::config::SearchConfig;
use stocksense_core::errors::StockResult;
use stocksense_core::models::{Confidence, GeoPoint, Item, Location, Radius, StockStatus};
use stocksense_core::traits::IStockStore;
use tracing::{debug, info};

use crate::geo;
use crate::suggest::{self, Suggestion};

/// Center, radius, and optional result cap shared by both search modes.
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    pub center: GeoPoint,
    pub radius: Radius,
    /// Requested result cap. Clamped to `[1, max_limit]`; the configured
    /// default applies when absent.
    pub limit: Option<usize>,
}

/// One item-mode result: a location carrying the item.
#[derive(Debug, Clone)]
pub struct ItemHit {
    pub location: Location,
    pub status: StockStatus,
    pub confidence: Confidence,
    pub last_verified_at: DateTime<Utc>,
    pub distance_km: f64,
}

/// Item-mode output. `item` is `None` when the identifier resolved to
/// nothing; that is an empty result, not an error.
#[derive(Debug, Clone)]
pub struct ItemSearch {
    pub item: Option<Item>,
    pub hits: Vec<ItemHit>,
}

/// One entry in a location-mode status bucket.
#[derive(Debug, Clone)]
pub struct BucketEntry {
    pub item: Item,
    pub last_verified_at: DateTime<Utc>,
}

/// A location's aggregates partitioned by status.
#[derive(Debug, Clone, Default)]
pub struct StatusBuckets {
    pub in_stock: Vec<BucketEntry>,
    pub low: Vec<BucketEntry>,
    pub out: Vec<BucketEntry>,
    pub unknown: Vec<BucketEntry>,
}

impl StatusBuckets {
    fn push(&mut self, status: StockStatus, entry: BucketEntry) {
        match status {
            StockStatus::InStock => self.in_stock.push(entry),
            StockStatus::Low => self.low.push(entry),
            StockStatus::Out => self.out.push(entry),
            StockStatus::Unknown => self.unknown.push(entry),
        }
    }

    /// Total entries across all four buckets.
    pub fn len(&self) -> usize {
        self.in_stock.len() + self.low.len() + self.out.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One location-mode result with the location's full stock picture.
#[derive(Debug, Clone)]
pub struct LocationHit {
    pub location: Location,
    pub distance_km: f64,
    pub stock: StatusBuckets,
}

/// Two-mode proximity search over a storage backend.
pub struct SearchEngine<'a> {
    store: &'a dyn IStockStore,
    config: SearchConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a dyn IStockStore, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Find locations carrying the item within the radius, nearest first.
    ///
    /// The identifier resolves through exact code, then case-insensitive
    /// name, then synonyms. Out-of-stock locations are never returned in
    /// this mode.
    pub fn search_items(
        &self,
        identifier: &str,
        query: &ProximityQuery,
    ) -> StockResult<ItemSearch> {
        // Step 1: resolve the identifier to an item.
        let Some(item) = self.store.resolve_item(identifier)? else {
            debug!(identifier, "identifier resolved to no item");
            return Ok(ItemSearch {
                item: None,
                hits: Vec::new(),
            });
        };

        // Step 2: rectangular prefilter sized to contain the radius circle,
        // with out-of-stock rows dropped in the query.
        let radius_km = query.radius.as_km();
        let bounds = geo::bounding_box(query.center, radius_km);
        let candidates = self
            .store
            .aggregates_for_item_in_bounds(&item.id, &bounds, true)?;
        debug!(
            item = %item.name,
            candidates = candidates.len(),
            "bounding box prefilter"
        );

        // Step 3: the box over-admits; the exact distance decides.
        let mut hits = Vec::new();
        for (aggregate, location) in candidates {
            let distance_km = geo::haversine_km(query.center, location.point());
            if distance_km > radius_km {
                continue;
            }
            hits.push(ItemHit {
                location,
                status: aggregate.status,
                confidence: aggregate.confidence,
                last_verified_at: aggregate.last_verified_at,
                distance_km,
            });
        }

        // Step 4: nearest first; equal distances rank the fresher aggregate
        // higher.
        hits.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.last_verified_at.cmp(&a.last_verified_at))
        });
        hits.truncate(self.effective_limit(query.limit));

        info!(item = %item.name, hits = hits.len(), radius_km, "item search complete");
        Ok(ItemSearch {
            item: Some(item),
            hits,
        })
    }

    /// Find locations within the radius, each carrying its aggregates split
    /// into the four status buckets.
    ///
    /// `name_terms` are case-insensitive substrings matched against location
    /// names with OR semantics; an empty slice applies no name filter.
    pub fn search_locations(
        &self,
        name_terms: &[String],
        query: &ProximityQuery,
    ) -> StockResult<Vec<LocationHit>> {
        // Step 1: prefilter by box and name terms.
        let radius_km = query.radius.as_km();
        let bounds = geo::bounding_box(query.center, radius_km);
        let candidates = self.store.locations_in_bounds(&bounds, name_terms)?;
        if candidates.is_empty() {
            debug!("no locations inside the prefilter box");
            return Ok(Vec::new());
        }
        debug!(candidates = candidates.len(), "bounding box prefilter");

        // Step 2: exact distance, rank, truncate. Equal distances fall back
        // to name order.
        let mut ranked = Vec::new();
        for location in candidates {
            let distance_km = geo::haversine_km(query.center, location.point());
            if distance_km <= radius_km {
                ranked.push((location, distance_km));
            }
        }
        ranked.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.name.cmp(&b.0.name))
        });
        ranked.truncate(self.effective_limit(query.limit));

        // Step 3: fetch the stock picture for each surviving location.
        let mut hits = Vec::new();
        for (location, distance_km) in ranked {
            let mut stock = StatusBuckets::default();
            for (aggregate, item) in self.store.aggregates_for_location(&location.id)? {
                stock.push(
                    aggregate.status,
                    BucketEntry {
                        item,
                        last_verified_at: aggregate.last_verified_at,
                    },
                );
            }
            hits.push(LocationHit {
                location,
                distance_km,
                stock,
            });
        }

        info!(hits = hits.len(), radius_km, "location search complete");
        Ok(hits)
    }

    /// Autocomplete suggestions, capped at the configured suggestion limit.
    pub fn suggest(&self, query: &str) -> StockResult<Vec<Suggestion>> {
        suggest::suggest_items(self.store, query, self.config.suggest_limit)
    }

    fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit)
    }
}
