// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

/// Every way a weather search can end without a report.
///
/// Payloads are plain strings so the error can be stored in the published
/// search state and cloned to every reader.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("{0}")]
  Validation(String),
  #[error("Configuration error: {0}")]
  Configuration(String),
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Transport(String),
  #[error("A search is already in progress")]
  Busy,
  #[error("Search was cancelled")]
  Cancelled,
}

impl Error {
  pub fn is_transport(&self) -> bool {
    matches!(self, Error::Transport(_))
  }
}

impl From<reqwest::Error> for Error {
  fn from(err: reqwest::Error) -> Self {
    // Request URLs carry the API key as a query parameter.
    let err = err.without_url();
    if err.is_timeout() {
      return Error::Transport("Request timed out".into());
    }
    if err.is_decode() {
      return Error::Transport(format!("Invalid response from weather API: {}", err));
    }
    Error::Transport(err.to_string())
  }
}
