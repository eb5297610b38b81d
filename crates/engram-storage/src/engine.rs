//! StorageEngine: owns the connection pool, runs migrations at open, and
//! implements `IArtifactStore`.

use std::path::Path;

use tracing::debug;

use engram_core::artifact::{Artifact, ArtifactState, OutputKind};
use engram_core::config::StorageConfig;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{GcSweepLog, IndexEntry, IndexKind, TrustEvent};
use engram_core::traits::IArtifactStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{aggregation, artifact_crud, artifact_query, event_ops, index_ops, sweep_ops};

/// The SQLite-backed artifact store.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, read operations use the read pool (file-backed mode).
    /// When false, all reads route through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open the store described by `config`. A `:memory:` db_path opens an
    /// in-memory store.
    pub fn open(config: &StorageConfig) -> EngramResult<Self> {
        if config.db_path == ":memory:" {
            return Self::open_in_memory_with(config);
        }
        Self::open_at(Path::new(&config.db_path), config)
    }

    /// Open a store backed by a specific file path.
    pub fn open_at(path: &Path, config: &StorageConfig) -> EngramResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        debug!(path = %path.display(), readers = engine.pool.readers.size(), "storage engine open");
        Ok(engine)
    }

    /// Open an in-memory store with default config (for testing).
    pub fn open_in_memory() -> EngramResult<Self> {
        Self::open_in_memory_with(&StorageConfig::default())
    }

    fn open_in_memory_with(config: &StorageConfig) -> EngramResult<Self> {
        let pool = ConnectionPool::open_in_memory(config)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run pending migrations on the write connection.
    fn initialize(&self) -> EngramResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    /// The underlying connection pool, for maintenance operations.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> EngramResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> EngramResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }
}

impl IArtifactStore for StorageEngine {
    fn create(
        &self,
        artifact: &Artifact,
        entries: &[IndexEntry],
        initial_event: &TrustEvent,
    ) -> EngramResult<()> {
        self.pool.writer.with_conn(|conn| {
            artifact_crud::insert_artifact(conn, artifact, entries, initial_event)
        })?;
        debug!(artifact_id = %artifact.id, trust = %artifact.trust, "artifact stored");
        Ok(())
    }

    fn get(&self, id: &str) -> EngramResult<Option<Artifact>> {
        self.with_reader(|conn| artifact_crud::get_artifact(conn, id))
    }

    fn get_bulk(&self, ids: &[String]) -> EngramResult<Vec<Artifact>> {
        self.with_reader(|conn| artifact_crud::bulk_get(conn, ids))
    }

    fn update(
        &self,
        artifact: &Artifact,
        expected_version: u64,
        event: Option<&TrustEvent>,
    ) -> EngramResult<u64> {
        self.pool.writer.with_conn(|conn| {
            artifact_crud::update_artifact(conn, artifact, expected_version, event)
        })
    }

    fn ids_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<String>> {
        self.with_reader(|conn| artifact_query::ids_by_state(conn, states))
    }

    fn query_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<Artifact>> {
        self.with_reader(|conn| artifact_query::query_by_state(conn, states))
    }

    fn lookup_index(&self, kind: IndexKind, value: &str) -> EngramResult<Vec<String>> {
        self.with_reader(|conn| index_ops::lookup(conn, kind, value))
    }

    fn trust_events(&self, artifact_id: &str) -> EngramResult<Vec<TrustEvent>> {
        self.with_reader(|conn| {
            if !artifact_crud::artifact_exists(conn, artifact_id)? {
                return Err(EngramError::NotFound {
                    id: artifact_id.to_string(),
                });
            }
            event_ops::events_for_artifact(conn, artifact_id)
        })
    }

    fn record_sweep(&self, log: &GcSweepLog) -> EngramResult<()> {
        self.pool
            .writer
            .with_conn(|conn| sweep_ops::insert_sweep(conn, log))
    }

    fn sweep_history(&self, limit: usize) -> EngramResult<Vec<GcSweepLog>> {
        self.with_reader(|conn| sweep_ops::recent_sweeps(conn, limit))
    }

    fn count_by_state(&self) -> EngramResult<Vec<(ArtifactState, u64)>> {
        self.with_reader(aggregation::count_by_state)
    }

    fn count_by_kind(&self) -> EngramResult<Vec<(OutputKind, u64)>> {
        self.with_reader(aggregation::count_by_kind)
    }

    fn average_trust(&self) -> EngramResult<f64> {
        self.with_reader(aggregation::average_trust)
    }
}
