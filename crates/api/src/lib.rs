pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod params;
pub mod routes;
pub mod startup;
pub mod utils;

pub use db::{Error as DbError, WeatherStore};
pub use error::{Error, ErrorBody};
pub use pagination::{Page, PageLimits, Paginated};
pub use startup::{app, build_app_state, AppState};
pub use utils::{get_config_info, get_log_level, setup_logger, Cli, Settings};
