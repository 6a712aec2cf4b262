//! SQLite daily plan / closeout store implementation.

use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{DailyCloseoutRow, DailyPlanRow};
use crate::adapter::outbound::sqlite::database::schema::{daily_closeouts, daily_plans};
use crate::domain::day::DayKey;
use crate::domain::plan::{DailyCloseout, DailyPlan, Mood};
use crate::error::{Error, Result, StorageError};
use crate::port::outbound::store::JournalStore;

/// SQLite-backed store for daily plans and closeouts.
///
/// Both tables key on the day, so `replace_into` gives the one-row-per-day
/// upsert semantics the journal needs.
pub struct SqliteJournalStore {
    pool: DbPool,
}

impl SqliteJournalStore {
    /// Create a new SQLite journal store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn plan_to_row(plan: &DailyPlan) -> DailyPlanRow {
        DailyPlanRow {
            day: plan.day.to_string(),
            bias: plan.bias.clone(),
            news_caution: i32::from(plan.news_caution),
            key_levels: plan.key_levels.clone(),
            scenarios: plan.scenarios.clone(),
            created_at: plan.created_at_ms,
        }
    }

    fn plan_from_row(row: DailyPlanRow) -> Result<DailyPlan> {
        Ok(DailyPlan {
            day: row.day.parse().map_err(Error::Domain)?,
            bias: row.bias,
            news_caution: row.news_caution != 0,
            key_levels: row.key_levels,
            scenarios: row.scenarios,
            created_at_ms: row.created_at,
        })
    }

    fn closeout_to_row(closeout: &DailyCloseout) -> DailyCloseoutRow {
        DailyCloseoutRow {
            day: closeout.day.to_string(),
            mood: i32::from(closeout.mood.value()),
            grade: closeout.grade.clone(),
            review: closeout.review.clone(),
            created_at: closeout.created_at_ms,
        }
    }

    fn closeout_from_row(row: DailyCloseoutRow) -> Result<DailyCloseout> {
        Ok(DailyCloseout {
            day: row.day.parse().map_err(Error::Domain)?,
            mood: Mood::try_new(i64::from(row.mood)).map_err(Error::Domain)?,
            grade: row.grade,
            review: row.review,
            created_at_ms: row.created_at,
        })
    }
}

impl JournalStore for SqliteJournalStore {
    async fn upsert_plan(&self, plan: &DailyPlan) -> Result<()> {
        let row = Self::plan_to_row(plan);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        diesel::replace_into(daily_plans::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn plan(&self, day: &DayKey) -> Result<Option<DailyPlan>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<DailyPlanRow> = daily_plans::table
            .find(day.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(Self::plan_from_row).transpose()
    }

    async fn has_plan(&self, day: &DayKey) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let count: i64 = daily_plans::table
            .filter(daily_plans::day.eq(day.to_string()))
            .select(count_star())
            .first(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn upsert_closeout(&self, closeout: &DailyCloseout) -> Result<()> {
        let row = Self::closeout_to_row(closeout);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        diesel::replace_into(daily_closeouts::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn closeout(&self, day: &DayKey) -> Result<Option<DailyCloseout>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let row: Option<DailyCloseoutRow> = daily_closeouts::table
            .find(day.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(Self::closeout_from_row).transpose()
    }

    async fn has_closeout(&self, day: &DayKey) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let count: i64 = daily_closeouts::table
            .filter(daily_closeouts::day.eq(day.to_string()))
            .select(count_star())
            .first(&mut conn)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(count > 0)
    }
}
