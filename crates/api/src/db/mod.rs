//! Postgres access layer.
//!
//! The store is strictly read-only: a bounded connection pool, a
//! per-connection statement timeout, and parameterized SELECTs.

pub mod pivot;
pub mod query;
pub mod stats;
mod store;

pub use store::WeatherStore;

use std::str::FromStr;
use std::time::Duration;

use log::info;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::FromRow;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

use crate::pagination::{Page, Paginated};
use crate::utils::Settings;
use self::query::ListQuery;

const SQL_DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to query postgres: {0}")]
    Query(#[from] sqlx::Error),
    #[error("failed to format time value: {0}")]
    TimeFormat(#[from] time::error::Format),
}

/// Format a date for a `$n::DATE` bind.
pub(crate) fn format_date(date: Date) -> Result<String, Error> {
    Ok(date.format(&crate::params::DATE_FORMAT)?)
}

/// Format a timestamp for a `$n::TIMESTAMP` bind.
pub(crate) fn format_datetime(datetime: PrimitiveDateTime) -> Result<String, Error> {
    Ok(datetime.format(&SQL_DATETIME_FORMAT)?)
}

pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Connect a bounded pool. Each new connection gets a statement
    /// execution ceiling so one slow query cannot hold a connection
    /// indefinitely.
    pub async fn connect(settings: &Settings) -> Result<Self, Error> {
        let options = PgConnectOptions::from_str(&settings.database_url)?;
        let statement_timeout_ms = settings.statement_timeout_ms;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    sqlx::query(&format!("SET statement_timeout = {}", statement_timeout_ms))
                        .execute(conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_with(options)
            .await?;

        info!(
            "connected to postgres ({} max connections, {}ms statement timeout)",
            settings.max_connections, statement_timeout_ms
        );
        Ok(Self { pool })
    }

    /// Issue the count query and the data query of a list query and
    /// wrap the page in the response envelope. `total` always comes
    /// from the count query, never from the returned page.
    pub(crate) async fn fetch_page<T>(
        &self,
        query: &ListQuery,
        page: Page,
    ) -> Result<Paginated<T>, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let count_sql = query.count_sql();
        let mut count = sqlx::query_scalar::<_, i64>(&count_sql);
        for bind in query.binds() {
            count = count.bind(bind.as_str());
        }
        let total = count.fetch_one(&self.pool).await?;

        let data_sql = query.data_sql(page.limit, page.offset);
        let data = self.fetch_all_as(&data_sql, query.binds()).await?;

        Ok(Paginated {
            total,
            offset: page.offset,
            limit: page.limit,
            data,
        })
    }

    /// Run a "latest N" list query: ordered, capped, no envelope.
    pub(crate) async fn fetch_latest<T>(&self, query: &ListQuery, limit: i64) -> Result<Vec<T>, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = query.latest_sql(limit);
        self.fetch_all_as(&sql, query.binds()).await
    }

    /// Run an unpaginated list query.
    pub(crate) async fn fetch_unpaged<T>(&self, query: &ListQuery) -> Result<Vec<T>, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = query.all_sql();
        self.fetch_all_as(&sql, query.binds()).await
    }

    pub(crate) async fn fetch_all_as<T>(&self, sql: &str, binds: &[String]) -> Result<Vec<T>, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for bind in binds {
            query = query.bind(bind.as_str());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    pub(crate) async fn fetch_one_as<T>(&self, sql: &str, binds: &[String]) -> Result<T, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for bind in binds {
            query = query.bind(bind.as_str());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    pub(crate) async fn fetch_optional_as<T>(
        &self,
        sql: &str,
        binds: &[String],
    ) -> Result<Option<T>, Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for bind in binds {
            query = query.bind(bind.as_str());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    pub(crate) async fn fetch_strings(&self, sql: &str) -> Result<Vec<String>, Error> {
        Ok(sqlx::query_scalar::<_, String>(sql)
            .fetch_all(&self.pool)
            .await?)
    }
}
