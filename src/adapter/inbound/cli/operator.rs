//! Store wiring for CLI handlers.
//!
//! Opens the SQLite database once per invocation and hands out the services
//! the handlers drive.

use std::path::Path;
use std::sync::Arc;

use crate::adapter::outbound::sqlite::database::connection::{
    configure_sqlite_connection, create_pool, run_migrations,
};
use crate::adapter::outbound::sqlite::{
    SqliteJournalStore, SqliteSettingStore, SqliteStrategyStore, SqliteTradeStore,
};
use crate::app::clock::SystemClock;
use crate::app::entry::EntryService;
use crate::app::gate::GateService;
use crate::domain::day::DayKey;
use crate::error::{Result, StorageError};

/// Gate service over the SQLite stores and the system clock.
pub type SqliteGateService =
    GateService<SqliteSettingStore, SqliteTradeStore, SqliteJournalStore, SystemClock>;

/// Entry service over the SQLite stores and the system clock.
pub type SqliteEntryService = EntryService<
    SqliteSettingStore,
    SqliteTradeStore,
    SqliteJournalStore,
    SqliteStrategyStore,
    SystemClock,
>;

/// Live stores for one CLI invocation.
pub struct Operator {
    pub settings: Arc<SqliteSettingStore>,
    pub trades: Arc<SqliteTradeStore>,
    pub journal: Arc<SqliteJournalStore>,
    pub strategies: Arc<SqliteStrategyStore>,
    pub clock: Arc<SystemClock>,
}

impl Operator {
    /// Open (creating if needed) the database at `db_path` and build stores.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let database_url = db_path.to_string_lossy().to_string();
        let pool = create_pool(&database_url)?;
        run_migrations(&pool)?;
        {
            let mut conn = pool
                .get()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            configure_sqlite_connection(&mut conn)?;
        }

        Ok(Self {
            settings: Arc::new(SqliteSettingStore::new(pool.clone())),
            trades: Arc::new(SqliteTradeStore::new(pool.clone())),
            journal: Arc::new(SqliteJournalStore::new(pool.clone())),
            strategies: Arc::new(SqliteStrategyStore::new(pool)),
            clock: Arc::new(SystemClock),
        })
    }

    /// Gate service over these stores.
    #[must_use]
    pub fn gate(&self) -> SqliteGateService {
        GateService::new(
            Arc::clone(&self.settings),
            Arc::clone(&self.trades),
            Arc::clone(&self.journal),
            Arc::clone(&self.clock),
        )
    }

    /// Trade-entry service over these stores.
    #[must_use]
    pub fn entry(&self) -> SqliteEntryService {
        EntryService::new(
            self.gate(),
            Arc::clone(&self.trades),
            Arc::clone(&self.strategies),
            Arc::clone(&self.clock),
        )
    }

    /// Today's day key in device-local time.
    #[must_use]
    pub fn today(&self) -> DayKey {
        use crate::app::clock::Clock;
        DayKey::from_datetime(&self.clock.now())
    }
}
