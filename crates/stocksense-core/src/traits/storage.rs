use crate::errors::StockResult;
use crate::models::{
    GeoBounds, Item, Location, Observation, StatusAggregate, StockStatus,
};

/// The persistence surface consumed by the consensus, search, and ingest
/// engines. Items, locations, observations, aggregates, plus the stats
/// queries serving external admin screens.
///
/// Observations are append-only: there is deliberately no update or
/// single-row delete for them. They disappear only through the cascading
/// `delete_item` / `delete_location`.
pub trait IStockStore: Send + Sync {
    // --- Items ---
    fn insert_item(&self, item: &Item) -> StockResult<()>;
    fn find_item(&self, id: &str) -> StockResult<Option<Item>>;
    /// Resolve an identifier: exact code, then case-insensitive exact name,
    /// then case-insensitive synonym. First hit wins.
    fn resolve_item(&self, identifier: &str) -> StockResult<Option<Item>>;
    /// Case-insensitive substring match on name or synonym, or exact code
    /// match. Name-ordered, capped at `limit`.
    fn suggest_items(&self, query: &str, limit: usize) -> StockResult<Vec<Item>>;
    /// Cascade-delete an item with its synonyms, observations, and aggregates.
    fn delete_item(&self, id: &str) -> StockResult<()>;

    // --- Locations ---
    fn insert_location(&self, location: &Location) -> StockResult<()>;
    fn find_location(&self, id: &str) -> StockResult<Option<Location>>;
    /// Locations inside the bounds whose name matches any of `name_terms`
    /// case-insensitively (OR semantics). An empty term list matches all.
    fn locations_in_bounds(
        &self,
        bounds: &GeoBounds,
        name_terms: &[String],
    ) -> StockResult<Vec<Location>>;
    /// Cascade-delete a location with its observations and aggregates.
    fn delete_location(&self, id: &str) -> StockResult<()>;

    // --- Observations ---
    fn insert_observation(&self, observation: &Observation) -> StockResult<()>;
    /// Up to `limit` most recent observations for the pair, newest first.
    fn recent_observations(
        &self,
        item_id: &str,
        location_id: &str,
        limit: usize,
    ) -> StockResult<Vec<Observation>>;
    /// Null out the reporter reference on every observation submitted by
    /// `reporter`. Returns the number of rows touched. Called when the
    /// identity collaborator removes an identity.
    fn detach_reporter(&self, reporter: &str) -> StockResult<usize>;

    // --- Aggregates ---
    /// Create or overwrite the single aggregate row for the pair.
    fn upsert_aggregate(&self, aggregate: &StatusAggregate) -> StockResult<()>;
    fn get_aggregate(
        &self,
        item_id: &str,
        location_id: &str,
    ) -> StockResult<Option<StatusAggregate>>;
    /// Aggregates for an item whose location lies inside the bounds, joined
    /// with their locations. `exclude_out` drops OUT rows in the query.
    fn aggregates_for_item_in_bounds(
        &self,
        item_id: &str,
        bounds: &GeoBounds,
        exclude_out: bool,
    ) -> StockResult<Vec<(StatusAggregate, Location)>>;
    /// All aggregates at a location, joined with their items.
    fn aggregates_for_location(
        &self,
        location_id: &str,
    ) -> StockResult<Vec<(StatusAggregate, Item)>>;

    // --- Stats ---
    fn count_items(&self) -> StockResult<u64>;
    fn count_locations(&self) -> StockResult<u64>;
    fn count_observations(&self) -> StockResult<u64>;
    /// Per-status aggregate counts for an item, in status scan order.
    fn item_status_breakdown(&self, item_id: &str) -> StockResult<Vec<(StockStatus, u64)>>;
}
