// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  config::WeatherConfig,
  constants::*,
  models::{
    api::{ApiErrorBody, CurrentResponse, ForecastResponse, GeocodeMatch},
    weather::{Coordinates, CurrentConditions, ForecastSeries},
  },
};
use async_trait::async_trait;
use error::Error;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

#[async_trait]
pub trait Geocoder: Send + Sync {
  async fn resolve(&self, city: &str) -> Result<Coordinates, Error>;
}

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
  async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions, Error>;
  async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<ForecastSeries, Error>;
}

/// OpenWeatherMap client. Every request goes out with `units=metric`; unit
/// conversion happens at render time.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
  config: WeatherConfig,
  client: reqwest::Client,
}

impl OpenWeatherClient {
  pub fn new(config: WeatherConfig) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { config, client })
  }

  fn weather_url(&self, endpoint: &Url, coordinates: Coordinates) -> Url {
    let mut url = endpoint.clone();
    url
      .query_pairs_mut()
      .append_pair("lat", &coordinates.latitude.to_string())
      .append_pair("lon", &coordinates.longitude.to_string())
      .append_pair("appid", &self.config.api_key)
      .append_pair("units", UNITS);
    url
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
    let response = self.client.get(url).send().await?;

    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
      warn!("Weather API rate limit exceeded");
      return Err(Error::Transport("Rate limit exceeded".into()));
    }
    if !status.is_success() {
      let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Failed to fetch weather data: {}", status));
      error!("API request failed with status {}: {}", status, message);
      return Err(Error::Transport(message));
    }

    Ok(response.json().await?)
  }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
  #[instrument(skip(self))]
  async fn resolve(&self, city: &str) -> Result<Coordinates, Error> {
    let city = city.trim();
    if city.is_empty() {
      return Err(Error::Validation("Please enter a city name".into()));
    }

    let mut url = self.config.endpoints.geocoding.clone();
    url
      .query_pairs_mut()
      .append_pair("q", city)
      .append_pair("limit", GEOCODING_LIMIT)
      .append_pair("appid", &self.config.api_key);

    let matches: Vec<GeocodeMatch> = self.get_json(url).await?;
    let found = matches
      .first()
      .ok_or_else(|| Error::NotFound(format!("City not found: {}", city)))?;

    info!(
      "Resolved {} to {} ({:?}) at {}, {}",
      city, found.name, found.country, found.lat, found.lon
    );
    Ok(Coordinates::from(found))
  }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
  #[instrument(skip(self))]
  async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions, Error> {
    let url = self.weather_url(&self.config.endpoints.current, coordinates);
    let response: CurrentResponse = self.get_json(url).await?;
    debug!("Current conditions received for {}", response.name);
    CurrentConditions::from_response(response)
  }

  #[instrument(skip(self))]
  async fn fetch_forecast(&self, coordinates: Coordinates) -> Result<ForecastSeries, Error> {
    let url = self.weather_url(&self.config.endpoints.forecast, coordinates);
    let response: ForecastResponse = self.get_json(url).await?;
    debug!(
      "Forecast received for {} with {} entries",
      response.city.name,
      response.list.len()
    );
    ForecastSeries::from_response(response)
  }
}
