//! Position state machine over a fixed list of subjects.
//!
//! [`Navigator`] saves the caption of the subject being left before it moves,
//! and only updates the view once both steps succeeded. It never queues work
//! itself: [`SubjectSession`] moves it into a [`TaskQueue`] and is the only way
//! UI code reaches it, so every mutation is serialized by the queue. Outside
//! this crate only the read-only accessors are visible.

use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt};
use shared::domain::{Subject, SubjectId};
use tracing::{debug, error, info};

use crate::{
    error::{NavigationError, SessionError},
    task_queue::{TaskHandle, TaskQueue},
    view::{Edge, SubjectView},
    SubjectService,
};

/// Outcome of a navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Move refused at the edge of the list; nothing changed except a re-save.
    Error,
    /// A subject is displayed.
    NotDone,
    /// Every subject has been visited; the completion notice is displayed.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Nothing loaded or displayed yet.
    Unloaded,
    Positioned(usize),
    /// Navigation ran off the list, or the service had no subjects.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorSnapshot {
    pub position: Position,
    pub len: usize,
    pub current: Option<Subject>,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Previous,
    Next,
}

/// Reachable from other crates only as the state handed to
/// [`SubjectSession::enqueue`] tasks, which can read it but not move it:
///
/// ```compile_fail
/// fn skip_queue<V: client_core::SubjectView>(nav: &mut client_core::Navigator<V>) {
///     let _ = nav.advance_next();
/// }
/// ```
///
/// ```compile_fail
/// use std::sync::Arc;
///
/// fn build<V: client_core::SubjectView>(
///     service: Arc<dyn client_core::SubjectService>,
///     view: V,
/// ) -> client_core::Navigator<V> {
///     client_core::Navigator::new(service, view)
/// }
/// ```
pub struct Navigator<V> {
    service: Arc<dyn SubjectService>,
    view: V,
    subjects: Vec<Subject>,
    position: Position,
    loaded: bool,
}

impl<V: SubjectView> Navigator<V> {
    pub(crate) fn new(service: Arc<dyn SubjectService>, view: V) -> Self {
        Self {
            service,
            view,
            subjects: Vec::new(),
            position: Position::Unloaded,
            loaded: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Index of the displayed subject, `None` when nothing is displayed.
    pub fn cursor(&self) -> Option<usize> {
        match self.position {
            Position::Positioned(index) => Some(index),
            Position::Unloaded | Position::Completed => None,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn current_subject(&self) -> Option<&Subject> {
        self.cursor().and_then(|index| self.subjects.get(index))
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            position: self.position,
            len: self.subjects.len(),
            current: self.current_subject().cloned(),
        }
    }

    /// Loads every subject in service order and displays the first one.
    pub(crate) async fn init(&mut self) -> Result<Completion, NavigationError> {
        if self.loaded {
            return Err(NavigationError::AlreadyLoaded);
        }

        let ids = self
            .service
            .fetch_subject_ids()
            .await
            .map_err(|source| NavigationError::FetchIdentifiers { source })?;
        debug!(count = ids.len(), "fetched subject ids");

        if ids.is_empty() {
            self.loaded = true;
            info!("no subjects to caption");
            return Ok(self.complete());
        }

        let mut subjects: Vec<Subject> = Vec::with_capacity(ids.len());
        for id in ids {
            let subject = self
                .service
                .fetch_subject(&id)
                .await
                .map_err(|source| NavigationError::FetchSubject {
                    id: id.clone(),
                    source,
                })?;
            if subjects.iter().any(|known| known.id == subject.id) {
                return Err(NavigationError::DuplicateIdentifier(subject.id));
            }
            subjects.push(subject);
        }

        self.subjects = subjects;
        self.loaded = true;
        self.view.populate(&self.subjects);
        self.go_to_index(Some(0)).await
    }

    /// Saves the displayed caption, then displays subject `index`.
    ///
    /// `None` ends the session: the image is hidden and the completion notice shown.
    pub(crate) async fn go_to_index(
        &mut self,
        index: Option<usize>,
    ) -> Result<Completion, NavigationError> {
        debug!(?index, "go to subject index");
        self.persist_current().await?;

        let Some(index) = index else {
            return Ok(self.complete());
        };

        let Some(subject) = self.subjects.get(index) else {
            return Err(NavigationError::InvalidIndex {
                index,
                len: self.subjects.len(),
            });
        };

        self.view.show_subject(index, subject);
        self.position = Position::Positioned(index);
        debug!(index, id = %subject.id, "subject displayed");
        Ok(Completion::NotDone)
    }

    pub(crate) async fn go_to_id(
        &mut self,
        id: Option<SubjectId>,
    ) -> Result<Completion, NavigationError> {
        let index = id.map(|id| self.index_of(&id)).transpose()?;
        self.go_to_index(index).await
    }

    pub(crate) async fn advance_previous(&mut self) -> Result<Completion, NavigationError> {
        self.advance(Step::Previous).await
    }

    pub(crate) async fn advance_next(&mut self) -> Result<Completion, NavigationError> {
        self.advance(Step::Next).await
    }

    /// Saves the displayed caption without moving.
    pub(crate) async fn save(&mut self) -> Result<(), NavigationError> {
        self.persist_current().await
    }

    pub(crate) fn edit_caption(&mut self, caption: &str) {
        self.view.set_caption(caption);
    }

    /// Resolves `id` to its list index. More than one match means the list is corrupt.
    pub fn index_of(&self, id: &SubjectId) -> Result<usize, NavigationError> {
        let mut matches = self
            .subjects
            .iter()
            .enumerate()
            .filter(|(_, subject)| &subject.id == id)
            .map(|(index, _)| index);

        match (matches.next(), matches.count()) {
            (Some(index), 0) => Ok(index),
            (None, _) => Err(NavigationError::UnknownIdentifier(id.clone())),
            (Some(_), extra) => Err(NavigationError::AmbiguousIdentifier {
                id: id.clone(),
                matches: extra + 1,
            }),
        }
    }

    async fn advance(&mut self, step: Step) -> Result<Completion, NavigationError> {
        let current = self.cursor().ok_or(NavigationError::NoCurrentSubject)?;
        let target = match step {
            Step::Previous => current.checked_sub(1),
            Step::Next => Some(current + 1).filter(|next| *next < self.subjects.len()),
        };

        let Some(target) = target else {
            self.persist_current().await?;
            let edge = match step {
                Step::Previous => Edge::First,
                Step::Next => Edge::Last,
            };
            info!(index = current, ?edge, "already at the edge of the subject list");
            self.view.flash_edge(edge);
            return Ok(Completion::Error);
        };

        self.go_to_index(Some(target)).await
    }

    fn complete(&mut self) -> Completion {
        self.position = Position::Completed;
        self.view.hide_subject();
        self.view.show_completion();
        info!("all subjects completed");
        Completion::Done
    }

    /// Copies the draft caption into the displayed subject and sends it to the service.
    async fn persist_current(&mut self) -> Result<(), NavigationError> {
        let Some(index) = self.cursor() else {
            return Ok(());
        };
        let caption = self.view.caption();
        let Some(subject) = self.subjects.get_mut(index) else {
            return Ok(());
        };
        subject.caption = caption;
        let subject = subject.clone();

        debug!(index, id = %subject.id, "saving caption");
        if let Err(source) = self.service.update_subject(&subject).await {
            error!(id = %subject.id, error = %format!("{source:#}"), "failed to save caption");
            self.view
                .report_persist_failure(&subject.id, &format!("{source:#}"));
            return Err(NavigationError::Persist {
                id: subject.id,
                source,
            });
        }
        Ok(())
    }
}

pub type SessionFuture<T> = BoxFuture<'static, Result<T, SessionError>>;

/// Queue-fronted handle on a [`Navigator`]; the boundary where UI events enter.
///
/// Each method submits its operation immediately and returns a future for that
/// operation's own outcome. Awaiting is optional: an operation runs whether or
/// not its future is polled.
pub struct SubjectSession<V> {
    queue: TaskQueue<Navigator<V>>,
}

impl<V> Clone for SubjectSession<V> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<V: SubjectView + 'static> SubjectSession<V> {
    /// Must be called from within a tokio runtime.
    pub fn new(service: Arc<dyn SubjectService>, view: V) -> Self {
        Self {
            queue: TaskQueue::new(Navigator::new(service, view)),
        }
    }

    pub fn init(&self) -> SessionFuture<Completion> {
        settle(self.queue.enqueue(|nav| nav.init().boxed()))
    }

    pub fn advance_next(&self) -> SessionFuture<Completion> {
        settle(self.queue.enqueue(|nav| nav.advance_next().boxed()))
    }

    pub fn advance_previous(&self) -> SessionFuture<Completion> {
        settle(self.queue.enqueue(|nav| nav.advance_previous().boxed()))
    }

    /// Selector handler: jump to `id`, or finish when `None`.
    pub fn select(&self, id: Option<SubjectId>) -> SessionFuture<Completion> {
        settle(self.queue.enqueue(move |nav| nav.go_to_id(id).boxed()))
    }

    pub fn go_to_index(&self, index: Option<usize>) -> SessionFuture<Completion> {
        settle(self.queue.enqueue(move |nav| nav.go_to_index(index).boxed()))
    }

    pub fn finish(&self) -> SessionFuture<Completion> {
        self.go_to_index(None)
    }

    pub fn save(&self) -> SessionFuture<()> {
        settle(self.queue.enqueue(|nav| nav.save().boxed()))
    }

    pub fn edit_caption(&self, caption: impl Into<String>) -> TaskHandle<()> {
        let caption = caption.into();
        self.queue.enqueue(move |nav| {
            async move {
                nav.edit_caption(&caption);
            }
            .boxed()
        })
    }

    pub fn snapshot(&self) -> TaskHandle<NavigatorSnapshot> {
        self.queue
            .enqueue(|nav| async move { nav.snapshot() }.boxed())
    }

    /// Runs an arbitrary task in the same total order as navigation.
    pub fn enqueue<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: for<'a> FnOnce(&'a mut Navigator<V>) -> BoxFuture<'a, T> + Send + 'static,
    {
        self.queue.enqueue(task)
    }
}

fn settle<T: Send + 'static>(
    handle: TaskHandle<Result<T, NavigationError>>,
) -> SessionFuture<T> {
    async move { Ok::<T, SessionError>(handle.await??) }.boxed()
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
