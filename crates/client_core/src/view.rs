//! Presentation seam between the navigator and whatever renders subjects.

use shared::domain::{Subject, SubjectId};

/// Which end of the subject list a blocked move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

/// Visual side of a navigation session.
///
/// All methods are synchronous; the navigator calls them only after the I/O
/// for a transition has finished, so a view never shows a half-applied move.
pub trait SubjectView: Send + Sync {
    /// Fills the subject selector, one entry per subject in list order.
    fn populate(&mut self, subjects: &[Subject]);
    /// Displays `subject`, loads its caption as the draft and selects `index`.
    fn show_subject(&mut self, index: usize, subject: &Subject);
    fn hide_subject(&mut self);
    fn show_completion(&mut self);
    /// Current draft caption, saved when the displayed subject is left.
    fn caption(&self) -> String;
    fn set_caption(&mut self, caption: &str);
    /// Signals that a move was refused at the edge of the list.
    fn flash_edge(&mut self, edge: Edge);
    fn report_persist_failure(&mut self, id: &SubjectId, message: &str);
}
