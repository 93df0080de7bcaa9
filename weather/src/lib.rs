// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod config;
pub mod models;
pub mod present;
pub mod search;
pub mod service;

pub use ::config::DisplayUnit;
pub use crate::config::{Endpoints, WeatherConfig};
pub use error::Error;
pub use models::weather::{
  Condition, Coordinates, CurrentConditions, ForecastEntry, ForecastSeries, WeatherReport,
};
pub use present::{IconSize, ReportView};
pub use search::{SearchOrchestrator, SearchState};
pub use service::{Geocoder, OpenWeatherClient, WeatherFetcher};

pub mod constants {
  use std::time::Duration;
  pub(crate) const GEOCODING_PATH: &str = "/geo/1.0/direct";
  pub(crate) const CURRENT_PATH: &str = "/data/2.5/weather";
  pub(crate) const FORECAST_PATH: &str = "/data/2.5/forecast";
  pub(crate) const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
  pub(crate) const UNITS: &str = "metric";
  pub(crate) const GEOCODING_LIMIT: &str = "1";
  pub(crate) const HOURLY_ENTRIES: usize = 16;
  pub(crate) const DAILY_STRIDE: usize = 8;
  pub(crate) const DAILY_ENTRIES: usize = 5;
  pub(crate) const CLOCK_FORMAT: &str = "%H:%M";
  pub(crate) const CALENDAR_FORMAT: &str = "%a, %b %-d";
  pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
}
