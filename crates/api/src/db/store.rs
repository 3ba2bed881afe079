//! The `WeatherStore` trait and its Postgres implementation.
//!
//! Handlers depend on `Arc<dyn WeatherStore>` so the integration tests
//! can substitute a mock; every method maps to exactly one endpoint's
//! data need.

use std::collections::HashSet;

use async_trait::async_trait;
use scooby::postgres::Parameters;
use time::Date;

use super::pivot::pivot_observations;
use super::query::{Cast, ListQuery};
use super::{format_date, format_datetime, Db, Error};
use crate::models::{
    AggregateRow, AgriDaily, AgriMinutely, AgriMonthly, AgriRealtimeStation, AgriStation,
    AsosDaily, AsosStation, ComparisonRow, MidForecast, MidForecastRegion, NarrowObservation,
    PivotKey, RealtimeObservation, RealtimePivot, RealtimeRegion, ShortForecast, StationPeriod,
    StatsSummary, TableSummary,
};
use crate::pagination::{Page, Paginated};
use crate::params::{DateRange, DateTimeRange, MonthRange, OpenDateRange};

#[async_trait]
pub trait WeatherStore: Send + Sync {
    // KMA ASOS daily summaries
    async fn asos_latest(&self, stn_id: Option<i32>, limit: i64) -> Result<Vec<AsosDaily>, Error>;
    async fn asos_by_date(&self, date: Date, stn_id: Option<i32>)
        -> Result<Vec<AsosDaily>, Error>;
    async fn asos_range(
        &self,
        range: DateRange,
        stn_id: Option<i32>,
        page: Page,
    ) -> Result<Paginated<AsosDaily>, Error>;
    async fn asos_stations(&self) -> Result<Vec<AsosStation>, Error>;

    // KMA very-short-range observations
    async fn realtime_latest(
        &self,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<RealtimeObservation>, Error>;
    async fn realtime_latest_pivot(
        &self,
        sido: Option<String>,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<RealtimePivot>, Error>;
    async fn realtime_by_region(
        &self,
        region_name: String,
        date: Option<Date>,
        page: Page,
    ) -> Result<Paginated<RealtimeObservation>, Error>;
    async fn realtime_regions(&self, sido: Option<String>) -> Result<Vec<RealtimeRegion>, Error>;
    async fn realtime_sidos(&self) -> Result<Vec<String>, Error>;

    // KMA forecasts
    async fn short_forecast_latest(
        &self,
        region_name: Option<String>,
        category: Option<String>,
        limit: i64,
    ) -> Result<Vec<ShortForecast>, Error>;
    async fn short_forecast_by_region(
        &self,
        region_name: String,
        fcst_date: Option<Date>,
        category: Option<String>,
        page: Page,
    ) -> Result<Paginated<ShortForecast>, Error>;
    async fn mid_forecast_latest(
        &self,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<MidForecast>, Error>;
    async fn mid_forecast_by_region(
        &self,
        region_name: String,
        forecast_date: Option<Date>,
        page: Page,
    ) -> Result<Paginated<MidForecast>, Error>;
    async fn mid_forecast_regions(&self) -> Result<Vec<MidForecastRegion>, Error>;

    // RDA agri-weather
    async fn agri_minutely_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriMinutely>, Error>;
    async fn agri_minutely_by_station(
        &self,
        stn_cd: String,
        range: DateTimeRange,
        page: Page,
    ) -> Result<Paginated<AgriMinutely>, Error>;
    async fn agri_daily_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriDaily>, Error>;
    async fn agri_daily_by_date(
        &self,
        date: Date,
        stn_cd: Option<String>,
    ) -> Result<Vec<AgriDaily>, Error>;
    async fn agri_daily_range(
        &self,
        range: DateRange,
        stn_cd: Option<String>,
        page: Page,
    ) -> Result<Paginated<AgriDaily>, Error>;
    async fn agri_monthly_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriMonthly>, Error>;
    async fn agri_monthly_by_year(
        &self,
        year: i32,
        stn_cd: Option<String>,
    ) -> Result<Vec<AgriMonthly>, Error>;
    async fn agri_monthly_range(
        &self,
        range: MonthRange,
        stn_cd: Option<String>,
        page: Page,
    ) -> Result<Paginated<AgriMonthly>, Error>;
    async fn agri_stations(&self) -> Result<Vec<AgriStation>, Error>;
    async fn agri_minutely_stations(
        &self,
        province: Option<String>,
    ) -> Result<Vec<AgriRealtimeStation>, Error>;
    async fn agri_provinces(&self) -> Result<Vec<String>, Error>;

    // Statistics
    async fn stats_summary(&self) -> Result<StatsSummary, Error>;
    async fn asos_station_aggregates(
        &self,
        stn_id: i32,
        range: OpenDateRange,
    ) -> Result<AggregateRow, Error>;
    async fn asos_station_period(&self, stn_id: i32) -> Result<Option<StationPeriod>, Error>;
    async fn agri_station_aggregates(
        &self,
        stn_cd: String,
        range: OpenDateRange,
    ) -> Result<AggregateRow, Error>;
    async fn agri_station_period(&self, stn_cd: String) -> Result<Option<StationPeriod>, Error>;
    async fn comparison_aggregates(
        &self,
        stn_id: i32,
        range: DateRange,
    ) -> Result<Option<ComparisonRow>, Error>;
}

#[async_trait]
impl WeatherStore for Db {
    async fn asos_latest(&self, stn_id: Option<i32>, limit: i64) -> Result<Vec<AsosDaily>, Error> {
        let mut query = ListQuery::new(AsosDaily::TABLE, AsosDaily::COLUMNS, "tm DESC, stn_id ASC");
        if let Some(stn_id) = stn_id {
            query.filter("stn_id", "=", Cast::Int, stn_id.to_string());
        }
        self.fetch_latest(&query, limit).await
    }

    async fn asos_by_date(
        &self,
        date: Date,
        stn_id: Option<i32>,
    ) -> Result<Vec<AsosDaily>, Error> {
        let mut query = ListQuery::new(AsosDaily::TABLE, AsosDaily::COLUMNS, "stn_id ASC");
        query.filter("tm", "=", Cast::Date, format_date(date)?);
        if let Some(stn_id) = stn_id {
            query.filter("stn_id", "=", Cast::Int, stn_id.to_string());
        }
        self.fetch_unpaged(&query).await
    }

    async fn asos_range(
        &self,
        range: DateRange,
        stn_id: Option<i32>,
        page: Page,
    ) -> Result<Paginated<AsosDaily>, Error> {
        let mut query = ListQuery::new(AsosDaily::TABLE, AsosDaily::COLUMNS, "tm ASC, stn_id ASC");
        query.filter("tm", ">=", Cast::Date, format_date(range.start)?);
        query.filter("tm", "<=", Cast::Date, format_date(range.end)?);
        if let Some(stn_id) = stn_id {
            query.filter("stn_id", "=", Cast::Int, stn_id.to_string());
        }
        self.fetch_page(&query, page).await
    }

    async fn asos_stations(&self) -> Result<Vec<AsosStation>, Error> {
        let sql = "SELECT stn_id, stn_nm, COUNT(id) AS data_count, \
                   MIN(tm) AS first_date, MAX(tm) AS last_date \
                   FROM asos_daily_data GROUP BY stn_id, stn_nm ORDER BY stn_id";
        self.fetch_all_as(sql, &[]).await
    }

    async fn realtime_latest(
        &self,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<RealtimeObservation>, Error> {
        let mut query = ListQuery::new(
            RealtimeObservation::TABLE,
            RealtimeObservation::COLUMNS,
            "base_date DESC, base_time DESC, id ASC",
        );
        if let Some(region_name) = region_name {
            query.filter("region_name", "=", Cast::Text, region_name);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn realtime_latest_pivot(
        &self,
        sido: Option<String>,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<RealtimePivot>, Error> {
        // Phase one: the most recent distinct issue keys, newest first.
        let mut params = Parameters::new();
        let mut binds = Vec::new();
        let mut predicates = vec![
            "region_name IS NOT NULL".to_string(),
            "base_date IS NOT NULL".to_string(),
            "base_time IS NOT NULL".to_string(),
        ];
        if let Some(sido) = sido {
            predicates.push(format!("sido = {}::TEXT", params.next()));
            binds.push(sido);
        }
        if let Some(region_name) = region_name {
            predicates.push(format!("region_name = {}::TEXT", params.next()));
            binds.push(region_name);
        }
        let key_sql = format!(
            "SELECT DISTINCT sido, region_name, base_date, base_time FROM weather_realtime \
             WHERE {} ORDER BY base_date DESC, base_time DESC, region_name ASC LIMIT {}",
            predicates.join(" AND "),
            limit
        );
        let keys: Vec<PivotKey> = self.fetch_all_as(&key_sql, &binds).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        // Phase two: every narrow row of every selected key in one
        // query, partitioned client-side.
        let mut params = Parameters::new();
        let mut binds = Vec::new();
        let mut tuples = Vec::new();
        let mut seen = HashSet::new();
        for key in &keys {
            let tuple = (key.region_name.clone(), key.base_date, key.base_time.clone());
            if !seen.insert(tuple) {
                continue;
            }
            tuples.push(format!(
                "({}::TEXT, {}::DATE, {}::TEXT)",
                params.next(),
                params.next(),
                params.next()
            ));
            binds.push(key.region_name.clone());
            binds.push(format_date(key.base_date)?);
            binds.push(key.base_time.clone());
        }
        let rows_sql = format!(
            "SELECT region_name, base_date, base_time, category, obsrvalue \
             FROM weather_realtime \
             WHERE (region_name, base_date, base_time) IN ({}) \
             ORDER BY region_name, base_date, base_time, category",
            tuples.join(", ")
        );
        let rows: Vec<NarrowObservation> = self.fetch_all_as(&rows_sql, &binds).await?;

        Ok(pivot_observations(&keys, &rows))
    }

    async fn realtime_by_region(
        &self,
        region_name: String,
        date: Option<Date>,
        page: Page,
    ) -> Result<Paginated<RealtimeObservation>, Error> {
        let mut query = ListQuery::new(
            RealtimeObservation::TABLE,
            RealtimeObservation::COLUMNS,
            "base_date DESC, base_time DESC, id ASC",
        );
        query.filter("region_name", "=", Cast::Text, region_name);
        if let Some(date) = date {
            query.filter("base_date", "=", Cast::Date, format_date(date)?);
        }
        self.fetch_page(&query, page).await
    }

    async fn realtime_regions(&self, sido: Option<String>) -> Result<Vec<RealtimeRegion>, Error> {
        let mut params = Parameters::new();
        let mut binds = Vec::new();
        let filter = match sido {
            Some(sido) => {
                binds.push(sido);
                format!("WHERE sido = {}::TEXT ", params.next())
            }
            None => String::new(),
        };
        let sql = format!(
            "SELECT sido, region_name, nx, ny, COUNT(id) AS data_count, \
             MIN(base_date) AS first_date, MAX(base_date) AS last_date \
             FROM weather_realtime {}\
             GROUP BY sido, region_name, nx, ny ORDER BY sido, region_name",
            filter
        );
        self.fetch_all_as(&sql, &binds).await
    }

    async fn realtime_sidos(&self) -> Result<Vec<String>, Error> {
        self.fetch_strings(
            "SELECT DISTINCT sido FROM weather_realtime WHERE sido IS NOT NULL ORDER BY sido",
        )
        .await
    }

    async fn short_forecast_latest(
        &self,
        region_name: Option<String>,
        category: Option<String>,
        limit: i64,
    ) -> Result<Vec<ShortForecast>, Error> {
        let mut query = ListQuery::new(
            ShortForecast::TABLE,
            ShortForecast::COLUMNS,
            "base_date DESC, base_time DESC, fcst_date ASC, fcst_time ASC, id ASC",
        );
        if let Some(region_name) = region_name {
            query.filter("region_name", "=", Cast::Text, region_name);
        }
        if let Some(category) = category {
            query.filter("category", "=", Cast::Text, category);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn short_forecast_by_region(
        &self,
        region_name: String,
        fcst_date: Option<Date>,
        category: Option<String>,
        page: Page,
    ) -> Result<Paginated<ShortForecast>, Error> {
        let mut query = ListQuery::new(
            ShortForecast::TABLE,
            ShortForecast::COLUMNS,
            "base_date DESC, base_time DESC, fcst_date ASC, fcst_time ASC, id ASC",
        );
        query.filter("region_name", "=", Cast::Text, region_name);
        if let Some(fcst_date) = fcst_date {
            query.filter("fcst_date", "=", Cast::Date, format_date(fcst_date)?);
        }
        if let Some(category) = category {
            query.filter("category", "=", Cast::Text, category);
        }
        self.fetch_page(&query, page).await
    }

    async fn mid_forecast_latest(
        &self,
        region_name: Option<String>,
        limit: i64,
    ) -> Result<Vec<MidForecast>, Error> {
        let mut query = ListQuery::new(
            MidForecast::TABLE,
            MidForecast::COLUMNS,
            "tm_fc DESC, forecast_date ASC, id ASC",
        );
        if let Some(region_name) = region_name {
            query.filter("region_name", "=", Cast::Text, region_name);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn mid_forecast_by_region(
        &self,
        region_name: String,
        forecast_date: Option<Date>,
        page: Page,
    ) -> Result<Paginated<MidForecast>, Error> {
        let mut query = ListQuery::new(
            MidForecast::TABLE,
            MidForecast::COLUMNS,
            "tm_fc DESC, forecast_date ASC, id ASC",
        );
        query.filter("region_name", "=", Cast::Text, region_name);
        if let Some(forecast_date) = forecast_date {
            query.filter("forecast_date", "=", Cast::Date, format_date(forecast_date)?);
        }
        self.fetch_page(&query, page).await
    }

    async fn mid_forecast_regions(&self) -> Result<Vec<MidForecastRegion>, Error> {
        let sql = "SELECT reg_id, region_name, COUNT(id) AS data_count \
                   FROM weather_mid_forecast GROUP BY reg_id, region_name ORDER BY region_name";
        self.fetch_all_as(sql, &[]).await
    }

    async fn agri_minutely_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriMinutely>, Error> {
        let mut query = ListQuery::new(
            AgriMinutely::TABLE,
            AgriMinutely::COLUMNS,
            "datetime DESC, stn_cd ASC",
        );
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn agri_minutely_by_station(
        &self,
        stn_cd: String,
        range: DateTimeRange,
        page: Page,
    ) -> Result<Paginated<AgriMinutely>, Error> {
        let mut query = ListQuery::new(
            AgriMinutely::TABLE,
            AgriMinutely::COLUMNS,
            "datetime DESC, id ASC",
        );
        query.filter("stn_cd", "=", Cast::Text, stn_cd);
        if let Some(start) = range.start {
            query.filter("datetime", ">=", Cast::Timestamp, format_datetime(start)?);
        }
        if let Some(end) = range.end {
            query.filter("datetime", "<=", Cast::Timestamp, format_datetime(end)?);
        }
        self.fetch_page(&query, page).await
    }

    async fn agri_daily_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriDaily>, Error> {
        let mut query = ListQuery::new(
            AgriDaily::TABLE,
            AgriDaily::COLUMNS,
            "date DESC, stn_cd ASC",
        );
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn agri_daily_by_date(
        &self,
        date: Date,
        stn_cd: Option<String>,
    ) -> Result<Vec<AgriDaily>, Error> {
        let mut query = ListQuery::new(AgriDaily::TABLE, AgriDaily::COLUMNS, "stn_cd ASC");
        query.filter("date", "=", Cast::Date, format_date(date)?);
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_unpaged(&query).await
    }

    async fn agri_daily_range(
        &self,
        range: DateRange,
        stn_cd: Option<String>,
        page: Page,
    ) -> Result<Paginated<AgriDaily>, Error> {
        let mut query = ListQuery::new(
            AgriDaily::TABLE,
            AgriDaily::COLUMNS,
            "date ASC, stn_cd ASC",
        );
        query.filter("date", ">=", Cast::Date, format_date(range.start)?);
        query.filter("date", "<=", Cast::Date, format_date(range.end)?);
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_page(&query, page).await
    }

    async fn agri_monthly_latest(
        &self,
        stn_cd: Option<String>,
        limit: i64,
    ) -> Result<Vec<AgriMonthly>, Error> {
        let mut query = ListQuery::new(
            AgriMonthly::TABLE,
            AgriMonthly::COLUMNS,
            "date DESC, stn_cd ASC",
        );
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_latest(&query, limit).await
    }

    async fn agri_monthly_by_year(
        &self,
        year: i32,
        stn_cd: Option<String>,
    ) -> Result<Vec<AgriMonthly>, Error> {
        // The month key is text (YYYY-MM), so a year is a prefix match.
        let mut query = ListQuery::new(
            AgriMonthly::TABLE,
            AgriMonthly::COLUMNS,
            "date ASC, stn_cd ASC",
        );
        query.filter("date", "LIKE", Cast::Text, format!("{}-%", year));
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_unpaged(&query).await
    }

    async fn agri_monthly_range(
        &self,
        range: MonthRange,
        stn_cd: Option<String>,
        page: Page,
    ) -> Result<Paginated<AgriMonthly>, Error> {
        let mut query = ListQuery::new(
            AgriMonthly::TABLE,
            AgriMonthly::COLUMNS,
            "date ASC, stn_cd ASC",
        );
        query.filter("date", ">=", Cast::Text, range.start);
        query.filter("date", "<=", Cast::Text, range.end);
        if let Some(stn_cd) = stn_cd {
            query.filter("stn_cd", "=", Cast::Text, stn_cd);
        }
        self.fetch_page(&query, page).await
    }

    async fn agri_stations(&self) -> Result<Vec<AgriStation>, Error> {
        let sql = "SELECT stn_cd, stn_name, COUNT(id) AS data_count, \
                   MIN(date) AS first_date, MAX(date) AS last_date \
                   FROM weather_data_daily GROUP BY stn_cd, stn_name ORDER BY stn_cd";
        self.fetch_all_as(sql, &[]).await
    }

    async fn agri_minutely_stations(
        &self,
        province: Option<String>,
    ) -> Result<Vec<AgriRealtimeStation>, Error> {
        let mut params = Parameters::new();
        let mut binds = Vec::new();
        let filter = match province {
            Some(province) => {
                binds.push(province);
                format!("WHERE province = {}::TEXT ", params.next())
            }
            None => String::new(),
        };
        let sql = format!(
            "SELECT province, stn_cd, stn_name, COUNT(id) AS data_count, \
             MIN(datetime) AS first_datetime, MAX(datetime) AS last_datetime \
             FROM weather_data {}\
             GROUP BY province, stn_cd, stn_name ORDER BY province, stn_cd",
            filter
        );
        self.fetch_all_as(&sql, &binds).await
    }

    async fn agri_provinces(&self) -> Result<Vec<String>, Error> {
        self.fetch_strings(
            "SELECT DISTINCT province FROM weather_data WHERE province IS NOT NULL ORDER BY province",
        )
        .await
    }

    async fn stats_summary(&self) -> Result<StatsSummary, Error> {
        let asos_daily: TableSummary = self
            .fetch_one_as(
                "SELECT COUNT(id) AS total_records, MIN(tm) AS first_date, \
                 MAX(tm) AS last_date, COUNT(DISTINCT stn_id) AS station_count \
                 FROM asos_daily_data",
                &[],
            )
            .await?;
        let rda_daily: TableSummary = self
            .fetch_one_as(
                "SELECT COUNT(id) AS total_records, MIN(date) AS first_date, \
                 MAX(date) AS last_date, COUNT(DISTINCT stn_cd) AS station_count \
                 FROM weather_data_daily",
                &[],
            )
            .await?;
        Ok(StatsSummary {
            asos_daily,
            rda_daily,
        })
    }

    async fn asos_station_aggregates(
        &self,
        stn_id: i32,
        range: OpenDateRange,
    ) -> Result<AggregateRow, Error> {
        let mut params = Parameters::new();
        let mut predicates = vec![format!("stn_id = {}::INT4", params.next())];
        let mut binds = vec![stn_id.to_string()];
        if let Some(start) = range.start {
            predicates.push(format!("tm >= {}::DATE", params.next()));
            binds.push(format_date(start)?);
        }
        if let Some(end) = range.end {
            predicates.push(format!("tm <= {}::DATE", params.next()));
            binds.push(format_date(end)?);
        }
        // Everything cast to FLOAT8: postgres widens integer AVG/SUM to
        // NUMERIC, which does not decode as f64.
        let sql = format!(
            "SELECT COUNT(id) AS data_count, \
             AVG(avg_ta)::FLOAT8 AS avg_temp, \
             MAX(max_ta)::FLOAT8 AS max_temp, \
             MIN(min_ta)::FLOAT8 AS min_temp, \
             SUM(sum_rn)::FLOAT8 AS total_rainfall, \
             AVG(avg_rhm)::FLOAT8 AS avg_humidity, \
             AVG(avg_ws)::FLOAT8 AS avg_wind_speed, \
             SUM(sum_ss_hr)::FLOAT8 AS total_sunshine \
             FROM asos_daily_data WHERE {}",
            predicates.join(" AND ")
        );
        self.fetch_one_as(&sql, &binds).await
    }

    async fn asos_station_period(&self, stn_id: i32) -> Result<Option<StationPeriod>, Error> {
        let sql = "SELECT stn_nm AS name, MIN(tm) AS first_date, MAX(tm) AS last_date \
                   FROM asos_daily_data WHERE stn_id = $1::INT4 \
                   GROUP BY stn_nm ORDER BY stn_nm LIMIT 1";
        self.fetch_optional_as(sql, &[stn_id.to_string()]).await
    }

    async fn agri_station_aggregates(
        &self,
        stn_cd: String,
        range: OpenDateRange,
    ) -> Result<AggregateRow, Error> {
        let mut params = Parameters::new();
        let mut predicates = vec![format!("stn_cd = {}::TEXT", params.next())];
        let mut binds = vec![stn_cd];
        if let Some(start) = range.start {
            predicates.push(format!("date >= {}::DATE", params.next()));
            binds.push(format_date(start)?);
        }
        if let Some(end) = range.end {
            predicates.push(format!("date <= {}::DATE", params.next()));
            binds.push(format_date(end)?);
        }
        let sql = format!(
            "SELECT COUNT(id) AS data_count, \
             AVG(temp)::FLOAT8 AS avg_temp, \
             MAX(hghst_artmp)::FLOAT8 AS max_temp, \
             MIN(lowst_artmp)::FLOAT8 AS min_temp, \
             SUM(rn)::FLOAT8 AS total_rainfall, \
             AVG(hum)::FLOAT8 AS avg_humidity, \
             AVG(wind)::FLOAT8 AS avg_wind_speed, \
             SUM(sun_time)::FLOAT8 AS total_sunshine \
             FROM weather_data_daily WHERE {}",
            predicates.join(" AND ")
        );
        self.fetch_one_as(&sql, &binds).await
    }

    async fn agri_station_period(&self, stn_cd: String) -> Result<Option<StationPeriod>, Error> {
        let sql = "SELECT stn_name AS name, MIN(date) AS first_date, MAX(date) AS last_date \
                   FROM weather_data_daily WHERE stn_cd = $1::TEXT \
                   GROUP BY stn_name ORDER BY stn_name LIMIT 1";
        self.fetch_optional_as(sql, &[stn_cd]).await
    }

    async fn comparison_aggregates(
        &self,
        stn_id: i32,
        range: DateRange,
    ) -> Result<Option<ComparisonRow>, Error> {
        let sql = "SELECT stn_nm, COUNT(id) AS data_count, \
                   AVG(avg_ta)::FLOAT8 AS avg_temp, \
                   MAX(max_ta)::FLOAT8 AS max_temp, \
                   MIN(min_ta)::FLOAT8 AS min_temp, \
                   SUM(sum_rn)::FLOAT8 AS total_rainfall, \
                   AVG(avg_rhm)::FLOAT8 AS avg_humidity \
                   FROM asos_daily_data \
                   WHERE stn_id = $1::INT4 AND tm >= $2::DATE AND tm <= $3::DATE \
                   GROUP BY stn_nm ORDER BY stn_nm LIMIT 1";
        let binds = vec![
            stn_id.to_string(),
            format_date(range.start)?,
            format_date(range.end)?,
        ];
        self.fetch_optional_as(sql, &binds).await
    }
}
