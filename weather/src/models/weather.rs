// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::api::{CurrentResponse, ForecastItem, ForecastResponse, GeocodeMatch, Weather};
use chrono::FixedOffset;
use error::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
  /// Condition group, e.g. `Clouds`.
  pub code: String,
  pub description: String,
  pub icon: String,
}

/// Current conditions. Temperatures are Celsius, wind m/s, pressure hPa.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
  pub location: String,
  pub country: String,
  pub temperature: f64,
  pub feels_like: f64,
  pub humidity: u8,
  pub wind_speed: f64,
  pub pressure: f64,
  pub condition: Condition,
  pub utc_offset: FixedOffset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
  pub timestamp: i64,
  pub temperature: f64,
  pub feels_like: f64,
  pub humidity: u8,
  pub wind_speed: f64,
  pub pressure: f64,
  pub condition: Condition,
}

/// Three-hour forecast steps in the order the API returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
  pub entries: Vec<ForecastEntry>,
  pub utc_offset: FixedOffset,
}

/// Current conditions and forecast of one successful search. Never one without the other.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
  pub current: CurrentConditions,
  pub forecast: ForecastSeries,
}

fn utc_offset(seconds: i32) -> Result<FixedOffset, Error> {
  FixedOffset::east_opt(seconds)
    .ok_or_else(|| Error::Transport(format!("Invalid timezone offset: {}", seconds)))
}

fn first_condition(weather: &[Weather]) -> Result<Condition, Error> {
  let weather = weather
    .first()
    .ok_or_else(|| Error::Transport("No weather data available".into()))?;

  Ok(Condition {
    code: weather.main.clone(),
    description: weather.description.clone(),
    icon: weather.icon.clone(),
  })
}

impl From<&GeocodeMatch> for Coordinates {
  fn from(found: &GeocodeMatch) -> Self {
    Self {
      latitude: found.lat,
      longitude: found.lon,
    }
  }
}

impl CurrentConditions {
  pub(crate) fn from_response(response: CurrentResponse) -> Result<Self, Error> {
    Ok(Self {
      condition: first_condition(&response.weather)?,
      utc_offset: utc_offset(response.timezone)?,
      location: response.name,
      country: response.sys.country,
      temperature: response.main.temp,
      feels_like: response.main.feels_like,
      humidity: response.main.humidity,
      wind_speed: response.wind.speed,
      pressure: response.main.pressure,
    })
  }
}

impl ForecastEntry {
  fn from_item(item: ForecastItem) -> Result<Self, Error> {
    Ok(Self {
      condition: first_condition(&item.weather)?,
      timestamp: item.dt,
      temperature: item.main.temp,
      feels_like: item.main.feels_like,
      humidity: item.main.humidity,
      wind_speed: item.wind.speed,
      pressure: item.main.pressure,
    })
  }
}

impl ForecastSeries {
  pub(crate) fn from_response(response: ForecastResponse) -> Result<Self, Error> {
    let utc_offset = utc_offset(response.city.timezone)?;
    let entries = response
      .list
      .into_iter()
      .map(ForecastEntry::from_item)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      entries,
      utc_offset,
    })
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::api::{ForecastCity, MainWeather, SysInfo, Wind};

  fn main_weather(temp: f64) -> MainWeather {
    MainWeather {
      temp,
      feels_like: temp - 1.0,
      humidity: 80,
      pressure: 1012.0,
    }
  }

  fn clouds() -> Weather {
    Weather {
      main: "Clouds".into(),
      description: "broken clouds".into(),
      icon: "04d".into(),
    }
  }

  #[test]
  fn current_takes_first_condition_and_offset() {
    let response = CurrentResponse {
      weather: vec![clouds()],
      main: main_weather(15.0),
      wind: Wind { speed: 4.1 },
      sys: SysInfo {
        country: "GB".into(),
      },
      name: "London".into(),
      timezone: 3600,
    };

    let current = CurrentConditions::from_response(response).unwrap();
    assert_eq!(current.location, "London");
    assert_eq!(current.country, "GB");
    assert_eq!(current.temperature, 15.0);
    assert_eq!(current.condition.icon, "04d");
    assert_eq!(current.utc_offset.local_minus_utc(), 3600);
  }

  #[test]
  fn current_without_condition_is_rejected() {
    let response = CurrentResponse {
      weather: vec![],
      main: main_weather(15.0),
      wind: Wind::default(),
      sys: SysInfo {
        country: "GB".into(),
      },
      name: "London".into(),
      timezone: 0,
    };

    assert!(matches!(
      CurrentConditions::from_response(response),
      Err(Error::Transport(_))
    ));
  }

  #[test]
  fn forecast_keeps_order() {
    let response = ForecastResponse {
      list: (0..3)
        .map(|i| ForecastItem {
          dt: 1_700_000_000 + i * 10_800,
          main: main_weather(i as f64),
          weather: vec![clouds()],
          wind: Wind::default(),
        })
        .collect(),
      city: ForecastCity {
        name: "London".into(),
        country: "GB".into(),
        timezone: 0,
      },
    };

    let series = ForecastSeries::from_response(response).unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series.entries[2].timestamp, 1_700_000_000 + 2 * 10_800);
    assert_eq!(series.entries[1].temperature, 1.0);
  }

  #[test]
  fn out_of_range_offset_is_rejected() {
    let response = ForecastResponse {
      list: vec![],
      city: ForecastCity {
        name: "Nowhere".into(),
        country: String::new(),
        timezone: 90_000,
      },
    };

    assert!(ForecastSeries::from_response(response).is_err());
  }
}
