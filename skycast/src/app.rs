// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::Result;
use config::DisplayUnit;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, instrument, warn};
use weather::{ReportView, SearchOrchestrator, SearchState};

const PROMPT: &str = "city> ";
const HELP: &str = "Type a city name to search, :unit to switch °C/°F, :quit to exit.";

#[derive(Debug, PartialEq, Eq)]
enum Command {
  Search(String),
  ToggleUnit,
  Help,
  Quit,
}

impl Command {
  fn parse(line: &str) -> Self {
    match line.trim() {
      ":unit" | ":u" => Command::ToggleUnit,
      ":help" | ":h" => Command::Help,
      ":quit" | ":q" => Command::Quit,
      _ => Command::Search(line.to_string()),
    }
  }
}

/// What the screen shows for a state under the chosen unit.
fn render(state: &SearchState, unit: DisplayUnit, icon_base_url: &str) -> String {
  match state {
    SearchState::Idle => HELP.to_string(),
    SearchState::Success(report) => {
      ReportView::render_with_icons(report, unit, icon_base_url).to_string()
    }
    SearchState::Failed(err) => format!("Error: {}", err),
    _ => "Loading...".to_string(),
  }
}

pub struct App {
  search: SearchOrchestrator,
  unit: DisplayUnit,
  icon_base_url: String,
}

impl App {
  pub fn new(search: SearchOrchestrator, unit: DisplayUnit, icon_base_url: String) -> Self {
    Self {
      search,
      unit,
      icon_base_url,
    }
  }

  fn screen(&self) -> String {
    render(&self.search.state(), self.unit, &self.icon_base_url)
  }

  #[instrument(skip(self))]
  pub async fn run(mut self) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    stdout
      .write_all(format!("{}\n", self.screen()).as_bytes())
      .await?;

    loop {
      stdout.write_all(PROMPT.as_bytes()).await?;
      stdout.flush().await?;

      let line = tokio::select! {
        line = lines.next_line() => line?,
        _ = tokio::signal::ctrl_c() => None,
      };
      let Some(line) = line else { break };

      match Command::parse(&line) {
        Command::Quit => break,
        Command::Help => {
          stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;
          continue;
        }
        Command::ToggleUnit => {
          self.unit = self.unit.toggled();
          debug!("Switched to {}", self.unit);
        }
        Command::Search(query) => {
          stdout.write_all(b"Loading...\n").await?;
          tokio::select! {
            result = self.search.submit(&query) => {
              if let Err(e) = result {
                debug!("Search ended without a report: {}", e);
              }
            }
            _ = tokio::signal::ctrl_c() => {
              warn!("Interrupted during search");
              break;
            }
          }
        }
      }

      stdout
        .write_all(format!("{}\n", self.screen()).as_bytes())
        .await?;
    }

    self.search.shutdown();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::FixedOffset;
  use std::sync::Arc;
  use weather::{Condition, CurrentConditions, Error, ForecastSeries, WeatherReport};

  const ICONS: &str = "https://openweathermap.org/img/wn";

  fn report() -> WeatherReport {
    let utc = FixedOffset::east_opt(0).unwrap();
    WeatherReport {
      current: CurrentConditions {
        location: "London".into(),
        country: "GB".into(),
        temperature: 15.0,
        feels_like: 14.0,
        humidity: 81,
        wind_speed: 4.1,
        pressure: 1012.0,
        condition: Condition {
          code: "Clouds".into(),
          description: "broken clouds".into(),
          icon: "04d".into(),
        },
        utc_offset: utc,
      },
      forecast: ForecastSeries {
        entries: vec![],
        utc_offset: utc,
      },
    }
  }

  #[test]
  fn parses_commands() {
    assert_eq!(Command::parse(" :unit "), Command::ToggleUnit);
    assert_eq!(Command::parse(":q"), Command::Quit);
    assert_eq!(Command::parse(":h"), Command::Help);
    assert_eq!(
      Command::parse("New York"),
      Command::Search("New York".into())
    );
    assert_eq!(Command::parse(""), Command::Search(String::new()));
  }

  #[test]
  fn renders_each_state() {
    assert_eq!(render(&SearchState::Idle, DisplayUnit::Celsius, ICONS), HELP);
    assert_eq!(
      render(
        &SearchState::Geocoding {
          query: "London".into()
        },
        DisplayUnit::Celsius,
        ICONS
      ),
      "Loading..."
    );
    assert_eq!(
      render(
        &SearchState::Failed(Error::Validation("Please enter a city name".into())),
        DisplayUnit::Celsius,
        ICONS
      ),
      "Error: Please enter a city name"
    );
  }

  #[test]
  fn unit_toggle_rerenders_the_same_report() {
    let state = SearchState::Success(Arc::new(report()));
    let celsius = render(&state, DisplayUnit::Celsius, ICONS);
    let fahrenheit = render(&state, DisplayUnit::Fahrenheit, ICONS);

    assert!(celsius.starts_with("London, GB\n15.0°C  Broken clouds"));
    assert!(fahrenheit.starts_with("London, GB\n59.0°F  Broken clouds"));
  }
}
