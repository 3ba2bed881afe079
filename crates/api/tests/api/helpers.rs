use std::sync::Arc;

use axum::Router;
use mockall::mock;
use time::Date;

use agweather_api::models::{
    AggregateRow, AgriDaily, AgriMinutely, AgriMonthly, AgriRealtimeStation, AgriStation,
    AsosDaily, AsosStation, ComparisonRow, MidForecast, MidForecastRegion, RealtimeObservation,
    RealtimePivot, RealtimeRegion, ShortForecast, StationPeriod, StatsSummary,
};
use agweather_api::params::{DateRange, DateTimeRange, MonthRange, OpenDateRange};
use agweather_api::{app, AppState, DbError, Page, PageLimits, Paginated, WeatherStore};

mock! {
    pub WeatherStore {}

    #[async_trait::async_trait]
    impl WeatherStore for WeatherStore {
        async fn asos_latest(&self, stn_id: Option<i32>, limit: i64) -> Result<Vec<AsosDaily>, DbError>;
        async fn asos_by_date(&self, date: Date, stn_id: Option<i32>) -> Result<Vec<AsosDaily>, DbError>;
        async fn asos_range(
            &self,
            range: DateRange,
            stn_id: Option<i32>,
            page: Page,
        ) -> Result<Paginated<AsosDaily>, DbError>;
        async fn asos_stations(&self) -> Result<Vec<AsosStation>, DbError>;

        async fn realtime_latest(
            &self,
            region_name: Option<String>,
            limit: i64,
        ) -> Result<Vec<RealtimeObservation>, DbError>;
        async fn realtime_latest_pivot(
            &self,
            sido: Option<String>,
            region_name: Option<String>,
            limit: i64,
        ) -> Result<Vec<RealtimePivot>, DbError>;
        async fn realtime_by_region(
            &self,
            region_name: String,
            date: Option<Date>,
            page: Page,
        ) -> Result<Paginated<RealtimeObservation>, DbError>;
        async fn realtime_regions(&self, sido: Option<String>) -> Result<Vec<RealtimeRegion>, DbError>;
        async fn realtime_sidos(&self) -> Result<Vec<String>, DbError>;

        async fn short_forecast_latest(
            &self,
            region_name: Option<String>,
            category: Option<String>,
            limit: i64,
        ) -> Result<Vec<ShortForecast>, DbError>;
        async fn short_forecast_by_region(
            &self,
            region_name: String,
            fcst_date: Option<Date>,
            category: Option<String>,
            page: Page,
        ) -> Result<Paginated<ShortForecast>, DbError>;
        async fn mid_forecast_latest(
            &self,
            region_name: Option<String>,
            limit: i64,
        ) -> Result<Vec<MidForecast>, DbError>;
        async fn mid_forecast_by_region(
            &self,
            region_name: String,
            forecast_date: Option<Date>,
            page: Page,
        ) -> Result<Paginated<MidForecast>, DbError>;
        async fn mid_forecast_regions(&self) -> Result<Vec<MidForecastRegion>, DbError>;

        async fn agri_minutely_latest(
            &self,
            stn_cd: Option<String>,
            limit: i64,
        ) -> Result<Vec<AgriMinutely>, DbError>;
        async fn agri_minutely_by_station(
            &self,
            stn_cd: String,
            range: DateTimeRange,
            page: Page,
        ) -> Result<Paginated<AgriMinutely>, DbError>;
        async fn agri_daily_latest(
            &self,
            stn_cd: Option<String>,
            limit: i64,
        ) -> Result<Vec<AgriDaily>, DbError>;
        async fn agri_daily_by_date(
            &self,
            date: Date,
            stn_cd: Option<String>,
        ) -> Result<Vec<AgriDaily>, DbError>;
        async fn agri_daily_range(
            &self,
            range: DateRange,
            stn_cd: Option<String>,
            page: Page,
        ) -> Result<Paginated<AgriDaily>, DbError>;
        async fn agri_monthly_latest(
            &self,
            stn_cd: Option<String>,
            limit: i64,
        ) -> Result<Vec<AgriMonthly>, DbError>;
        async fn agri_monthly_by_year(
            &self,
            year: i32,
            stn_cd: Option<String>,
        ) -> Result<Vec<AgriMonthly>, DbError>;
        async fn agri_monthly_range(
            &self,
            range: MonthRange,
            stn_cd: Option<String>,
            page: Page,
        ) -> Result<Paginated<AgriMonthly>, DbError>;
        async fn agri_stations(&self) -> Result<Vec<AgriStation>, DbError>;
        async fn agri_minutely_stations(
            &self,
            province: Option<String>,
        ) -> Result<Vec<AgriRealtimeStation>, DbError>;
        async fn agri_provinces(&self) -> Result<Vec<String>, DbError>;

        async fn stats_summary(&self) -> Result<StatsSummary, DbError>;
        async fn asos_station_aggregates(
            &self,
            stn_id: i32,
            range: OpenDateRange,
        ) -> Result<AggregateRow, DbError>;
        async fn asos_station_period(&self, stn_id: i32) -> Result<Option<StationPeriod>, DbError>;
        async fn agri_station_aggregates(
            &self,
            stn_cd: String,
            range: OpenDateRange,
        ) -> Result<AggregateRow, DbError>;
        async fn agri_station_period(&self, stn_cd: String) -> Result<Option<StationPeriod>, DbError>;
        async fn comparison_aggregates(
            &self,
            stn_id: i32,
            range: DateRange,
        ) -> Result<Option<ComparisonRow>, DbError>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn spawn_app(store: MockWeatherStore) -> TestApp {
    let state = AppState {
        limits: PageLimits::default(),
        cors_origins: vec!["*".to_string()],
        store: Arc::new(store),
    };
    TestApp { app: app(state) }
}

pub fn sample_asos_row(stn_id: i32, tm: Date) -> AsosDaily {
    AsosDaily {
        id: 1,
        stn_id,
        stn_nm: Some("Seoul".to_string()),
        tm,
        avg_ta: Some(15.0),
        min_ta: Some(10.0),
        max_ta: Some(20.0),
        sum_rn: Some(0.0),
        avg_ws: Some(2.1),
        avg_rhm: Some(63),
        sum_ss_hr: Some(8.2),
        sum_gsr: Some(18.4),
    }
}
