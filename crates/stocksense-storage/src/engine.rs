//! StorageEngine owns the ConnectionPool, runs migrations on startup, and
//! implements the storage trait consumed by the rest of the workspace.

use std::path::Path;

use stocksense_core::config::StorageConfig;
use stocksense_core::errors::StockResult;
use stocksense_core::models::{
    GeoBounds, Item, Location, Observation, StatusAggregate, StockStatus,
};
use stocksense_core::traits::IStockStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The main storage engine. Owns the connection pool and provides the full
/// IStockStore interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk, with defaults.
    pub fn open(path: &Path) -> StockResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a storage engine backed by a file on disk.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> StockResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). Routes all reads
    /// through the writer since in-memory read pool connections can't see
    /// the writer's changes.
    pub fn open_in_memory() -> StockResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> StockResult<()> {
        self.pool.writer.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> StockResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> StockResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }
}

impl IStockStore for StorageEngine {
    // --- Items ---

    fn insert_item(&self, item: &Item) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::item_ops::insert_item(conn, item))
    }

    fn find_item(&self, id: &str) -> StockResult<Option<Item>> {
        self.with_reader(|conn| queries::item_ops::get_item(conn, id))
    }

    fn resolve_item(&self, identifier: &str) -> StockResult<Option<Item>> {
        self.with_reader(|conn| queries::item_ops::resolve_item(conn, identifier))
    }

    fn suggest_items(&self, query: &str, limit: usize) -> StockResult<Vec<Item>> {
        self.with_reader(|conn| queries::item_ops::suggest_items(conn, query, limit))
    }

    fn delete_item(&self, id: &str) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::item_ops::delete_item(conn, id))
    }

    // --- Locations ---

    fn insert_location(&self, location: &Location) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::location_ops::insert_location(conn, location))
    }

    fn find_location(&self, id: &str) -> StockResult<Option<Location>> {
        self.with_reader(|conn| queries::location_ops::get_location(conn, id))
    }

    fn locations_in_bounds(
        &self,
        bounds: &GeoBounds,
        name_terms: &[String],
    ) -> StockResult<Vec<Location>> {
        self.with_reader(|conn| {
            queries::location_ops::locations_in_bounds(conn, bounds, name_terms)
        })
    }

    fn delete_location(&self, id: &str) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::location_ops::delete_location(conn, id))
    }

    // --- Observations ---

    fn insert_observation(&self, observation: &Observation) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::observation_ops::insert_observation(conn, observation))
    }

    fn recent_observations(
        &self,
        item_id: &str,
        location_id: &str,
        limit: usize,
    ) -> StockResult<Vec<Observation>> {
        self.with_reader(|conn| {
            queries::observation_ops::recent_observations(conn, item_id, location_id, limit)
        })
    }

    fn detach_reporter(&self, reporter: &str) -> StockResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| queries::observation_ops::detach_reporter(conn, reporter))
    }

    // --- Aggregates ---

    fn upsert_aggregate(&self, aggregate: &StatusAggregate) -> StockResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::aggregate_ops::upsert_aggregate(conn, aggregate))
    }

    fn get_aggregate(
        &self,
        item_id: &str,
        location_id: &str,
    ) -> StockResult<Option<StatusAggregate>> {
        self.with_reader(|conn| queries::aggregate_ops::get_aggregate(conn, item_id, location_id))
    }

    fn aggregates_for_item_in_bounds(
        &self,
        item_id: &str,
        bounds: &GeoBounds,
        exclude_out: bool,
    ) -> StockResult<Vec<(StatusAggregate, Location)>> {
        self.with_reader(|conn| {
            queries::aggregate_ops::aggregates_for_item_in_bounds(
                conn,
                item_id,
                bounds,
                exclude_out,
            )
        })
    }

    fn aggregates_for_location(
        &self,
        location_id: &str,
    ) -> StockResult<Vec<(StatusAggregate, Item)>> {
        self.with_reader(|conn| queries::aggregate_ops::aggregates_for_location(conn, location_id))
    }

    // --- Stats ---

    fn count_items(&self) -> StockResult<u64> {
        self.with_reader(queries::stats_ops::count_items)
    }

    fn count_locations(&self) -> StockResult<u64> {
        self.with_reader(queries::stats_ops::count_locations)
    }

    fn count_observations(&self) -> StockResult<u64> {
        self.with_reader(queries::stats_ops::count_observations)
    }

    fn item_status_breakdown(&self, item_id: &str) -> StockResult<Vec<(StockStatus, u64)>> {
        self.with_reader(|conn| queries::stats_ops::item_status_breakdown(conn, item_id))
    }
}
