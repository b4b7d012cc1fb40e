//! Display-surface events and error modeling.

use shared::domain::EmployeeId;

use crate::{error::ClientError, error::TransportError, roster::SortKey, validation::Field};

/// Everything the display surface can ask the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Refresh,
    Search(String),
    Sort(Option<SortKey>),
    Add,
    Edit(EmployeeId),
    Delete(EmployeeId),
    SetField(Field, String),
    Submit,
    Cancel,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Refresh => "refresh",
            UiEvent::Search(_) => "search",
            UiEvent::Sort(_) => "sort",
            UiEvent::Add => "add",
            UiEvent::Edit(_) => "edit",
            UiEvent::Delete(_) => "delete",
            UiEvent::SetField(..) => "set_field",
            UiEvent::Submit => "submit",
            UiEvent::Cancel => "cancel",
        }
    }
}

/// Notifications for whoever is drawing the roster.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    RosterReplaced { count: usize },
    SurfaceChanged { open: bool },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Busy,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Load,
    Submit,
    Delete,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, error: &ClientError) -> Self {
        let category = match error {
            ClientError::Transport(_) | ClientError::Resync { .. } => UiErrorCategory::Transport,
            ClientError::Validation(_) => UiErrorCategory::Validation,
            ClientError::Busy => UiErrorCategory::Busy,
            ClientError::NoOpenForm | ClientError::UnknownControl(_) => UiErrorCategory::Unknown,
        };
        let (context, message) = match error {
            ClientError::Transport(transport) => {
                (context, describe_transport_failure(context, transport))
            }
            ClientError::Resync { id, source } => (
                UiErrorContext::Load,
                format!(
                    "Employee #{id} was saved. {}",
                    describe_transport_failure(UiErrorContext::Load, source)
                ),
            ),
            other => (context, other.to_string()),
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn describe_transport_failure(context: UiErrorContext, error: &TransportError) -> String {
    let action = match context {
        UiErrorContext::Load => "Could not load employees",
        UiErrorContext::Submit => "Could not save employee",
        UiErrorContext::Delete => "Could not delete employee",
        UiErrorContext::General => "Request failed",
    };
    let hint = match error {
        TransportError::Request { source, .. } if source.is_timeout() => {
            "; the server timed out, retry shortly"
        }
        TransportError::Request { source, .. } if source.is_connect() => {
            "; server unreachable, check the API url"
        }
        _ => "",
    };
    format!("{action}: {error}{hint}")
}
