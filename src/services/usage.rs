// src/services/usage.rs
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::AppError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("storage is not configured")]
    NotConfigured,
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCheck {
    pub current_usage: u64,
    pub max_daily_requests: u64,
    pub can_proceed: bool,
}

impl UsageCheck {
    pub fn new(current_usage: u64, max_daily_requests: u64) -> Self {
        Self {
            current_usage,
            max_daily_requests,
            can_proceed: current_usage < max_daily_requests,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.max_daily_requests.saturating_sub(self.current_usage)
    }
}

/// Outcome of claiming one of today's request slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Granted,
    Exhausted { limit: u64 },
}

/// Daily request counter behind the chat endpoint.
#[async_trait]
pub trait UsageStore: Send + Sync {
    async fn check(&self) -> Result<UsageCheck, StorageError>;

    /// Claim a slot before the provider call. Stores that count nothing
    /// answer from `check`.
    async fn reserve(&self) -> Result<Reservation, StorageError> {
        let check = self.check().await?;
        Ok(if check.can_proceed {
            Reservation::Granted
        } else {
            Reservation::Exhausted {
                limit: check.max_daily_requests,
            }
        })
    }

    /// Hand back a granted slot whose request did not complete.
    async fn release(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Mark one handled chat request for today.
    async fn record(&self) -> Result<(), StorageError>;

    /// Trivial liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;

    fn is_configured(&self) -> bool;

    /// One-time setup at startup, such as creating tables.
    async fn prepare(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn close(&self) {}
}

/// Stand-in used when no database is configured: reports the ceiling and always permits.
#[derive(Debug, Clone)]
pub struct AdvisoryUsage {
    max_daily_requests: u64,
}

impl AdvisoryUsage {
    pub fn new(max_daily_requests: u64) -> Self {
        Self { max_daily_requests }
    }
}

#[async_trait]
impl UsageStore for AdvisoryUsage {
    async fn check(&self) -> Result<UsageCheck, StorageError> {
        debug!("running without database usage tracking");
        Ok(UsageCheck {
            current_usage: 0,
            max_daily_requests: self.max_daily_requests,
            can_proceed: true,
        })
    }

    async fn record(&self) -> Result<(), StorageError> {
        info!(at = %Utc::now().to_rfc3339(), "chat request processed");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS daily_usage (
    usage_date DATE NOT NULL PRIMARY KEY,
    request_count BIGINT UNSIGNED NOT NULL DEFAULT 0
)";

/// MySQL-backed counter, one row per UTC day. Slots are claimed with a
/// conditional increment so concurrent requests cannot overshoot the ceiling.
#[derive(Debug, Clone)]
pub struct MySqlUsage {
    pool: MySqlPool,
    max_daily_requests: u64,
}

impl MySqlUsage {
    /// Build a lazily connecting pool; nothing touches the network until first use.
    pub fn connect_lazy(db: &DatabaseConfig, max_daily_requests: u64) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .password(&db.password)
            .database(&db.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(DatabaseConfig::MAX_CONNECTIONS)
            .acquire_timeout(DatabaseConfig::ACQUIRE_TIMEOUT)
            .connect_lazy_with(options);

        Self {
            pool,
            max_daily_requests,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[async_trait]
impl UsageStore for MySqlUsage {
    async fn check(&self) -> Result<UsageCheck, StorageError> {
        let count: Option<u64> =
            sqlx::query_scalar("SELECT request_count FROM daily_usage WHERE usage_date = ?")
                .bind(Self::today())
                .fetch_optional(&self.pool)
                .await?;
        Ok(UsageCheck::new(count.unwrap_or(0), self.max_daily_requests))
    }

    async fn reserve(&self) -> Result<Reservation, StorageError> {
        let today = Self::today();
        sqlx::query(
            "INSERT INTO daily_usage (usage_date, request_count) VALUES (?, 0) \
             ON DUPLICATE KEY UPDATE request_count = request_count",
        )
        .bind(today)
        .execute(&self.pool)
        .await?;

        let claimed = sqlx::query(
            "UPDATE daily_usage SET request_count = request_count + 1 \
             WHERE usage_date = ? AND request_count < ?",
        )
        .bind(today)
        .bind(self.max_daily_requests)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(if claimed == 1 {
            Reservation::Granted
        } else {
            Reservation::Exhausted {
                limit: self.max_daily_requests,
            }
        })
    }

    async fn release(&self) -> Result<(), StorageError> {
        sqlx::query(
            "UPDATE daily_usage SET request_count = request_count - 1 \
             WHERE usage_date = ? AND request_count > 0",
        )
        .bind(Self::today())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn record(&self) -> Result<(), StorageError> {
        // counted when the slot was reserved
        debug!("chat request completed against reserved slot");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn prepare(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_underflows() {
        for (today, limit) in [(0, 1000), (999, 1000), (1000, 1000), (1500, 1000), (0, 0)] {
            let check = UsageCheck::new(today, limit);
            assert_eq!(check.remaining(), limit.saturating_sub(today));
            assert_eq!(check.can_proceed, today < limit);
        }
    }

    struct Full;

    #[async_trait]
    impl UsageStore for Full {
        async fn check(&self) -> Result<UsageCheck, StorageError> {
            Ok(UsageCheck::new(5, 5))
        }

        async fn record(&self) -> Result<(), StorageError> {
            Ok(())
        }

        async fn ping(&self) -> Result<(), StorageError> {
            Ok(())
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn default_reservation_follows_check() {
        assert_eq!(Full.reserve().await.unwrap(), Reservation::Exhausted { limit: 5 });
    }

    #[tokio::test]
    async fn advisory_store_always_permits() {
        let store = AdvisoryUsage::new(1000);
        let check = store.check().await.unwrap();
        assert!(check.can_proceed);
        assert_eq!(check.current_usage, 0);
        assert_eq!(check.max_daily_requests, 1000);
        assert_eq!(store.reserve().await.unwrap(), Reservation::Granted);
        assert!(store.release().await.is_ok());
        assert!(store.record().await.is_ok());
        assert!(!store.is_configured());
    }
}
