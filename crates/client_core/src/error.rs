use shared::domain::SubjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("task queue is closed")]
    Closed,
    #[error("queued task panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid subject index {index} (have {len} subjects)")]
    InvalidIndex { index: usize, len: usize },
    #[error("unknown subject id {0}")]
    UnknownIdentifier(SubjectId),
    #[error("subject id {id} matches {matches} subjects")]
    AmbiguousIdentifier { id: SubjectId, matches: usize },
    #[error("no current subject")]
    NoCurrentSubject,
    #[error("subject service returned duplicate id {0}")]
    DuplicateIdentifier(SubjectId),
    #[error("subjects are already loaded")]
    AlreadyLoaded,
    #[error("failed to fetch subject ids: {source}")]
    FetchIdentifiers { source: anyhow::Error },
    #[error("failed to fetch subject {id}: {source}")]
    FetchSubject { id: SubjectId, source: anyhow::Error },
    #[error("failed to save caption for subject {id}: {source}")]
    Persist { id: SubjectId, source: anyhow::Error },
}

impl NavigationError {
    /// True for programmer or invariant violations, false for collaborator I/O failures.
    pub fn is_caller_error(&self) -> bool {
        !matches!(
            self,
            NavigationError::FetchIdentifiers { .. }
                | NavigationError::FetchSubject { .. }
                | NavigationError::Persist { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
