// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::*;
use ::config::WeatherSettings;
use error::Error;
use std::time::Duration;
use url::Url;

/// The three OpenWeatherMap endpoints a search touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub geocoding: Url,
  pub current: Url,
  pub forecast: Url,
}

impl Endpoints {
  pub fn parse(geocoding: &str, current: &str, forecast: &str) -> Result<Self, Error> {
    let parse = |url: &str| {
      Url::parse(url).map_err(|e| Error::Configuration(format!("Invalid URL '{}': {}", url, e)))
    };

    Ok(Self {
      geocoding: parse(geocoding)?,
      current: parse(current)?,
      forecast: parse(forecast)?,
    })
  }

  pub fn with_base(base_url: &str) -> Result<Self, Error> {
    let base = base_url.trim_end_matches('/');
    let join = |path: &str| {
      Url::parse(&format!("{}{}", base, path))
        .map_err(|e| Error::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))
    };

    Ok(Self {
      geocoding: join(GEOCODING_PATH)?,
      current: join(CURRENT_PATH)?,
      forecast: join(FORECAST_PATH)?,
    })
  }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
  pub(crate) api_key: String,
  pub(crate) endpoints: Endpoints,
  pub(crate) timeout: Duration,
}

impl WeatherConfig {
  pub fn new(
    api_key: impl Into<String>,
    endpoints: Endpoints,
    timeout: Duration,
  ) -> Result<Self, Error> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(Error::Configuration("API key must not be empty".into()));
    }

    Ok(Self {
      api_key: api_key.trim().to_string(),
      endpoints,
      timeout,
    })
  }

  pub fn from_settings(settings: &WeatherSettings, api_key: &str) -> Result<Self, Error> {
    Self::new(
      api_key,
      Endpoints::parse(
        &settings.geocoding_url,
        &settings.current_url,
        &settings.forecast_url,
      )?,
      Duration::from_secs(settings.timeout_secs),
    )
  }

  pub fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_endpoints_from_base() {
    let endpoints = Endpoints::with_base("http://127.0.0.1:8080/").unwrap();
    assert_eq!(
      endpoints.geocoding.as_str(),
      "http://127.0.0.1:8080/geo/1.0/direct"
    );
    assert_eq!(
      endpoints.current.as_str(),
      "http://127.0.0.1:8080/data/2.5/weather"
    );
    assert_eq!(
      endpoints.forecast.as_str(),
      "http://127.0.0.1:8080/data/2.5/forecast"
    );
  }

  #[test]
  fn rejects_garbage_base() {
    assert!(matches!(
      Endpoints::with_base("not a url"),
      Err(Error::Configuration(_))
    ));
  }

  #[test]
  fn blank_key_fails_before_any_client_exists() {
    let endpoints = Endpoints::with_base("https://api.openweathermap.org").unwrap();
    let err = WeatherConfig::new("  ", endpoints, DEFAULT_TIMEOUT).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
  }

  #[test]
  fn from_settings_uses_timeout_and_endpoints() {
    let settings = WeatherSettings {
      current_url: "http://localhost:9000/now".into(),
      timeout_secs: 2,
      ..Default::default()
    };
    let config = WeatherConfig::from_settings(&settings, "key").unwrap();
    assert_eq!(config.timeout, Duration::from_secs(2));
    assert_eq!(
      config.endpoints().current.as_str(),
      "http://localhost:9000/now"
    );
    assert_eq!(
      config.endpoints().forecast.as_str(),
      "https://api.openweathermap.org/data/2.5/forecast"
    );
  }

  #[test]
  fn rejects_invalid_endpoint_setting() {
    let settings = WeatherSettings {
      geocoding_url: "geo".into(),
      ..Default::default()
    };
    assert!(matches!(
      WeatherConfig::from_settings(&settings, "key"),
      Err(Error::Configuration(_))
    ));
  }
}
