// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const DEFAULT_CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub weather: WeatherSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
  pub api_key: Option<String>,
  pub geocoding_url: String,
  pub current_url: String,
  pub forecast_url: String,
  pub icon_base_url: String,
  pub timeout_secs: u64,
  pub unit: DisplayUnit,
}

impl Default for WeatherSettings {
  fn default() -> Self {
    Self {
      api_key: None,
      geocoding_url: DEFAULT_GEOCODING_URL.into(),
      current_url: DEFAULT_CURRENT_URL.into(),
      forecast_url: DEFAULT_FORECAST_URL.into(),
      icon_base_url: DEFAULT_ICON_BASE_URL.into(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      unit: DisplayUnit::default(),
    }
  }
}

/// Unit used when rendering temperatures. Values are always stored in Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
  #[default]
  Celsius,
  Fahrenheit,
}

impl DisplayUnit {
  pub fn toggled(self) -> Self {
    match self {
      DisplayUnit::Celsius => DisplayUnit::Fahrenheit,
      DisplayUnit::Fahrenheit => DisplayUnit::Celsius,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      DisplayUnit::Celsius => "°C",
      DisplayUnit::Fahrenheit => "°F",
    }
  }
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
      Error::Configuration(format!(
        "Failed to read {}: {}",
        path.as_ref().display(),
        e
      ))
    })?;
    let config: Self = content.parse()?;
    debug!("Loaded configuration successfully");
    Ok(config)
  }

  /// Reads `path` when it exists, then lets `OPENWEATHER_API_KEY` override the key.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    Self::load_with_key(path, std::env::var(API_KEY_ENV).ok())
  }

  fn load_with_key<P: AsRef<Path>>(path: P, api_key: Option<String>) -> Result<Self, Error> {
    let mut config = if path.as_ref().exists() {
      Self::from_file(path)?
    } else {
      info!(
        "No configuration file at {}, using defaults",
        path.as_ref().display()
      );
      Self::default()
    };
    config.override_api_key(api_key);
    Ok(config)
  }

  pub fn override_api_key(&mut self, key: Option<String>) {
    if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
      self.weather.api_key = Some(key);
    }
  }

  /// The credential, or a configuration error when none was supplied.
  pub fn api_key(&self) -> Result<&str, Error> {
    self
      .weather
      .api_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty())
      .ok_or_else(|| {
        Error::Configuration(format!(
          "Missing API key: set {} or weather.api_key",
          API_KEY_ENV
        ))
      })
  }
}

impl std::str::FromStr for Config {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    toml::from_str(s).map_err(|e| Error::Configuration(e.to_string()))
  }
}

impl std::fmt::Display for DisplayUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let unit = match self {
      DisplayUnit::Celsius => "Celsius",
      DisplayUnit::Fahrenheit => "Fahrenheit",
    };
    write!(f, "{}", unit)
  }
}
