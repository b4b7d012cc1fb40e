use shared::domain::EmployeeId;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid api url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("{method} {url} returned {status}{}", detail_suffix(.detail))]
    Status {
        method: &'static str,
        url: String,
        status: reqwest::StatusCode,
        detail: Option<String>,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TransportError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND
        )
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The write was stored; only the roster refresh after it failed.
    #[error("employee #{id} was saved, but refreshing the roster failed: {source}")]
    Resync {
        id: EmployeeId,
        #[source]
        source: TransportError,
    },
    #[error("a submission is already in flight")]
    Busy,
    #[error("no form is open")]
    NoOpenForm,
    #[error("no control bound to '{0}'")]
    UnknownControl(String),
}
