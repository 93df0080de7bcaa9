// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  models::weather::{Coordinates, WeatherReport},
  service::{Geocoder, OpenWeatherClient, WeatherFetcher},
};
use error::Error;
use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Where the current search stands. A report and an error are never visible together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
  #[default]
  Idle,
  Validating {
    query: String,
  },
  Geocoding {
    query: String,
  },
  FetchingWeather {
    query: String,
    coordinates: Coordinates,
  },
  Success(Arc<WeatherReport>),
  Failed(Error),
}

impl SearchState {
  pub fn loading(&self) -> bool {
    matches!(
      self,
      SearchState::Validating { .. }
        | SearchState::Geocoding { .. }
        | SearchState::FetchingWeather { .. }
    )
  }

  pub fn report(&self) -> Option<&WeatherReport> {
    match self {
      SearchState::Success(report) => Some(report.as_ref()),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&Error> {
    match self {
      SearchState::Failed(err) => Some(err),
      _ => None,
    }
  }
}

/// Runs geocode, current conditions and forecast in sequence and publishes
/// each step. It is the only writer of the search state.
///
/// A submit while another search is loading is rejected with [`Error::Busy`].
/// [`SearchOrchestrator::shutdown`] abandons an in-flight search and leaves the
/// state at `Idle`; nothing is published after that.
pub struct SearchOrchestrator {
  geocoder: Arc<dyn Geocoder>,
  fetcher: Arc<dyn WeatherFetcher>,
  state: watch::Sender<SearchState>,
  in_flight: AtomicBool,
  shutdown: CancellationToken,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl SearchOrchestrator {
  pub fn new(geocoder: Arc<dyn Geocoder>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
    let (state, _) = watch::channel(SearchState::Idle);
    Self {
      geocoder,
      fetcher,
      state,
      in_flight: AtomicBool::new(false),
      shutdown: CancellationToken::new(),
    }
  }

  pub fn with_client(client: OpenWeatherClient) -> Self {
    let client = Arc::new(client);
    Self::new(client.clone(), client)
  }

  pub fn subscribe(&self) -> watch::Receiver<SearchState> {
    self.state.subscribe()
  }

  pub fn state(&self) -> SearchState {
    self.state.borrow().clone()
  }

  pub fn loading(&self) -> bool {
    self.state.borrow().loading()
  }

  /// Abandons any in-flight search and resets the state to `Idle`; later
  /// submits fail with [`Error::Cancelled`].
  pub fn shutdown(&self) {
    info!("Shutting down weather search");
    self.shutdown.cancel();
    self.state.send_replace(SearchState::Idle);
  }

  #[instrument(skip(self))]
  pub async fn submit(&self, query: &str) -> Result<Arc<WeatherReport>, Error> {
    if self.shutdown.is_cancelled() {
      return Err(Error::Cancelled);
    }
    if self.in_flight.swap(true, Ordering::AcqRel) {
      warn!("Search already in progress, ignoring submit");
      return Err(Error::Busy);
    }
    let _in_flight = InFlight(&self.in_flight);

    self.publish(SearchState::Validating {
      query: query.to_string(),
    });

    let outcome = tokio::select! {
      biased;
      _ = self.shutdown.cancelled() => {
        debug!("Search abandoned");
        return Err(Error::Cancelled);
      }
      outcome = self.search(query) => outcome,
    };

    match outcome {
      Ok(report) => {
        info!("Search for {} succeeded", query.trim());
        self.publish(SearchState::Success(report.clone()));
        Ok(report)
      }
      Err(err) => {
        warn!("Search for {:?} failed: {}", query, err);
        self.publish(SearchState::Failed(err.clone()));
        Err(err)
      }
    }
  }

  async fn search(&self, query: &str) -> Result<Arc<WeatherReport>, Error> {
    let query = query.trim();
    if query.is_empty() {
      return Err(Error::Validation("Please enter a city name".into()));
    }

    self.publish(SearchState::Geocoding {
      query: query.to_string(),
    });
    let coordinates = self.geocoder.resolve(query).await?;

    self.publish(SearchState::FetchingWeather {
      query: query.to_string(),
      coordinates,
    });
    let current = self.fetcher.fetch_current(coordinates).await?;
    let forecast = self.fetcher.fetch_forecast(coordinates).await?;

    Ok(Arc::new(WeatherReport { current, forecast }))
  }

  // The cancellation check runs under the channel's write lock, so a publish
  // can never land after the `Idle` written by `shutdown`.
  fn publish(&self, state: SearchState) {
    self.state.send_if_modified(|current| {
      if self.shutdown.is_cancelled() {
        return false;
      }
      debug!("Search state: {:?}", state);
      *current = state;
      true
    });
  }
}

impl Drop for SearchOrchestrator {
  fn drop(&mut self) {
    self.shutdown.cancel();
  }
}
