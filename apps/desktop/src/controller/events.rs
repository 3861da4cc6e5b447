//! User-facing descriptions of session failures.

use client_core::{NavigationError, QueueError, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// A command that makes no sense in the current state.
    Usage,
    /// The subject service could not be reached.
    Transport,
    /// The subject service answered, but with an error.
    Service,
    /// The session itself stopped working.
    Internal,
}

#[derive(Debug, Clone)]
pub struct UiFailure {
    category: FailureCategory,
    message: String,
}

impl UiFailure {
    pub fn from_session_error(error: &SessionError) -> Self {
        match error {
            SessionError::Queue(QueueError::Closed) => Self {
                category: FailureCategory::Internal,
                message: "Session has stopped; restart captioner.".to_string(),
            },
            SessionError::Queue(QueueError::Panicked(reason)) => Self {
                category: FailureCategory::Internal,
                message: format!("Internal error: {reason}"),
            },
            SessionError::Navigation(error) => Self::from_navigation_error(error),
        }
    }

    pub fn from_navigation_error(error: &NavigationError) -> Self {
        match error {
            NavigationError::Persist { id, source } => {
                let category = classify_io_failure(&format!("{source:#}"));
                Self {
                    category,
                    message: format!(
                        "Caption for {id} was not saved ({}). Run `save` to retry.",
                        io_hint(category, source)
                    ),
                }
            }
            NavigationError::FetchIdentifiers { source }
            | NavigationError::FetchSubject { source, .. } => {
                let category = classify_io_failure(&format!("{source:#}"));
                Self {
                    category,
                    message: format!("Could not load subjects ({}).", io_hint(category, source)),
                }
            }
            other => Self {
                category: FailureCategory::Usage,
                message: capitalize(&other.to_string()),
            },
        }
    }

    pub fn category(&self) -> FailureCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn classify_io_failure(message: &str) -> FailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("connection refused")
        || lower.contains("error sending request")
        || lower.contains("timed out")
        || lower.contains("dns")
        || lower.contains("connect")
    {
        FailureCategory::Transport
    } else {
        FailureCategory::Service
    }
}

fn io_hint(category: FailureCategory, source: &anyhow::Error) -> String {
    match category {
        FailureCategory::Transport => "server unreachable; check the API URL and network".to_string(),
        _ => format!("{source:#}"),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
