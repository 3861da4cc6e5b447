//! Ordered caption editing over a remote subject service.
//!
//! [`SubjectSession`] is the entry point for UI events: every operation is
//! submitted to a [`TaskQueue`] that owns the [`Navigator`], so caption saves
//! and moves run strictly in submission order.

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{Subject, SubjectId};

pub mod error;
pub mod navigator;
pub mod task_queue;
pub mod transport;
pub mod view;

pub use error::{NavigationError, QueueError, SessionError};
pub use navigator::{Completion, Navigator, NavigatorSnapshot, Position, SubjectSession};
pub use task_queue::{TaskHandle, TaskQueue};
pub use transport::HttpSubjectService;
pub use view::{Edge, SubjectView};

/// Remote store that owns the authoritative copy of every subject.
#[async_trait]
pub trait SubjectService: Send + Sync {
    async fn fetch_subject_ids(&self) -> Result<Vec<SubjectId>>;
    async fn fetch_subject(&self, id: &SubjectId) -> Result<Subject>;
    async fn update_subject(&self, subject: &Subject) -> Result<()>;
}
