// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod app;

use anyhow::Result;
use app::App;
use config::Config;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather::{OpenWeatherClient, SearchOrchestrator, WeatherConfig};

const CONFIG_PATH_ENV: &str = "SKYCAST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "skycast.toml";

#[cfg(debug_assertions)]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  setup_logging();

  let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
  let config = Config::load(&config_path)?;
  let api_key = config.api_key()?;

  let client = OpenWeatherClient::new(WeatherConfig::from_settings(&config.weather, api_key)?)?;
  info!("Weather lookup ready, unit: {}", config.weather.unit);

  App::new(
    SearchOrchestrator::with_client(client),
    config.weather.unit,
    config.weather.icon_base_url.clone(),
  )
  .run()
  .await
}
