use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSubjectId {
    #[error("subject id must not be empty")]
    Empty,
}
