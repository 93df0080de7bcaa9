// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.

//! Turns stored report values into display strings. Nothing here touches the
//! network or the search state.

use crate::{
  constants::*,
  models::weather::{ForecastEntry, ForecastSeries, WeatherReport},
};
use ::config::DisplayUnit;
use chrono::{DateTime, FixedOffset};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
  Small,
  /// The `@2x` variant.
  Large,
}

/// `celsius * 9/5 + 32` for Fahrenheit, always one fractional digit.
pub fn convert_temperature(celsius: f64, unit: DisplayUnit) -> String {
  match unit {
    DisplayUnit::Celsius => format!("{:.1}°C", celsius),
    DisplayUnit::Fahrenheit => format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0),
  }
}

fn local_time(unix_seconds: i64, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
  DateTime::from_timestamp(unix_seconds, 0).map(|dt| dt.with_timezone(offset))
}

/// Two-digit `HH:MM` in the location's local time.
pub fn format_clock_time(unix_seconds: i64, offset: &FixedOffset) -> String {
  local_time(unix_seconds, offset)
    .map(|dt| dt.format(CLOCK_FORMAT).to_string())
    .unwrap_or_else(|| "--:--".into())
}

/// Short weekday, short month and day, e.g. `Mon, Jan 15`.
pub fn format_calendar_date(unix_seconds: i64, offset: &FixedOffset) -> String {
  local_time(unix_seconds, offset)
    .map(|dt| dt.format(CALENDAR_FORMAT).to_string())
    .unwrap_or_else(|| "--".into())
}

pub fn capitalize_first(description: &str) -> String {
  let mut chars = description.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub fn icon_url(icon_code: &str, size: IconSize) -> String {
  icon_url_from(ICON_BASE_URL, icon_code, size)
}

pub fn icon_url_from(base_url: &str, icon_code: &str, size: IconSize) -> String {
  let base_url = base_url.trim_end_matches('/');
  match size {
    IconSize::Small => format!("{}/{}.png", base_url, icon_code),
    IconSize::Large => format!("{}/{}@2x.png", base_url, icon_code),
  }
}

pub fn format_humidity(humidity: u8) -> String {
  format!("{}%", humidity)
}

pub fn format_wind_speed(speed: f64) -> String {
  format!("{} m/s", speed)
}

pub fn format_pressure(pressure: f64) -> String {
  format!("{} hPa", pressure)
}

/// The first sixteen steps, roughly the next 48 hours.
pub fn select_hourly_slice(forecast: &ForecastSeries) -> &[ForecastEntry] {
  let end = forecast.entries.len().min(HOURLY_ENTRIES);
  &forecast.entries[..end]
}

/// Every eighth step (one per day at 3-hour intervals), at most five.
pub fn select_daily_slice(forecast: &ForecastSeries) -> Vec<&ForecastEntry> {
  forecast
    .entries
    .iter()
    .step_by(DAILY_STRIDE)
    .take(DAILY_ENTRIES)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
  pub label: String,
  pub temperature: String,
  pub description: String,
  pub icon: String,
}

/// Everything the result card shows, already formatted for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
  pub headline: String,
  pub temperature: String,
  pub feels_like: String,
  pub description: String,
  pub humidity: String,
  pub wind_speed: String,
  pub pressure: String,
  pub icon: String,
  pub hourly: Vec<ForecastRow>,
  pub daily: Vec<ForecastRow>,
}

impl ReportView {
  pub fn render(report: &WeatherReport, unit: DisplayUnit) -> Self {
    Self::render_with_icons(report, unit, ICON_BASE_URL)
  }

  pub fn render_with_icons(
    report: &WeatherReport,
    unit: DisplayUnit,
    icon_base_url: &str,
  ) -> Self {
    let current = &report.current;
    let offset = &report.forecast.utc_offset;

    let row = |entry: &ForecastEntry, label: String| ForecastRow {
      label,
      temperature: convert_temperature(entry.temperature, unit),
      description: capitalize_first(&entry.condition.description),
      icon: icon_url_from(icon_base_url, &entry.condition.icon, IconSize::Small),
    };

    Self {
      headline: if current.country.is_empty() {
        current.location.clone()
      } else {
        format!("{}, {}", current.location, current.country)
      },
      temperature: convert_temperature(current.temperature, unit),
      feels_like: convert_temperature(current.feels_like, unit),
      description: capitalize_first(&current.condition.description),
      humidity: format_humidity(current.humidity),
      wind_speed: format_wind_speed(current.wind_speed),
      pressure: format_pressure(current.pressure),
      icon: icon_url_from(icon_base_url, &current.condition.icon, IconSize::Large),
      hourly: select_hourly_slice(&report.forecast)
        .iter()
        .map(|entry| row(entry, format_clock_time(entry.timestamp, offset)))
        .collect(),
      daily: select_daily_slice(&report.forecast)
        .into_iter()
        .map(|entry| row(entry, format_calendar_date(entry.timestamp, offset)))
        .collect(),
    }
  }
}

impl fmt::Display for ReportView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.headline)?;
    writeln!(f, "{}  {}", self.temperature, self.description)?;
    writeln!(f, "Feels like: {}", self.feels_like)?;
    writeln!(f, "Humidity: {}", self.humidity)?;
    writeln!(f, "Wind Speed: {}", self.wind_speed)?;
    writeln!(f, "Pressure: {}", self.pressure)?;
    writeln!(f, "Icon: {}", self.icon)?;

    writeln!(f, "\nHourly")?;
    for row in &self.hourly {
      writeln!(f, "  {:>5}  {:>8}  {}", row.label, row.temperature, row.description)?;
    }

    writeln!(f, "\nDaily")?;
    for row in &self.daily {
      writeln!(f, "  {:<11}  {:>8}  {}", row.label, row.temperature, row.description)?;
    }
    Ok(())
  }
}
