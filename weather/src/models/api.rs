// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodeMatch {
  pub name: String,
  pub lat: f64,
  pub lon: f64,
  #[serde(default)]
  pub country: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrentResponse {
  pub weather: Vec<Weather>,
  pub main: MainWeather,
  pub wind: Wind,
  pub sys: SysInfo,
  pub name: String,
  #[serde(default)]
  pub timezone: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastResponse {
  pub list: Vec<ForecastItem>,
  pub city: ForecastCity,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastItem {
  pub dt: i64,
  pub main: MainWeather,
  pub weather: Vec<Weather>,
  #[serde(default)]
  pub wind: Wind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastCity {
  pub name: String,
  #[serde(default)]
  pub country: String,
  #[serde(default)]
  pub timezone: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Weather {
  pub main: String,
  pub description: String,
  pub icon: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MainWeather {
  pub temp: f64,
  pub feels_like: f64,
  pub humidity: u8,
  pub pressure: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Wind {
  pub speed: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysInfo {
  #[serde(default)]
  pub country: String,
}

/// Body OpenWeatherMap sends with non-2xx responses, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorBody {
  pub message: Option<String>,
}
