//! Dispatch of parsed commands into the session queue.
//!
//! Commands are submitted the moment they are read, so a burst of input is
//! ordered by the queue rather than by how fast the service answers.

use anyhow::{Context, Result};
use client_core::{
    Completion, NavigatorSnapshot, Position, SessionError, SubjectSession, SubjectView,
};
use futures::{
    future::{self, BoxFuture},
    FutureExt,
};
use shared::domain::Subject;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};
use tracing::{debug, info, warn};

use crate::controller::{
    commands::{Command, HELP},
    events::UiFailure,
};

/// Text to print once a dispatched command settles, if any.
pub type Report = BoxFuture<'static, Option<String>>;

pub fn dispatch<V: SubjectView + 'static>(session: &SubjectSession<V>, command: Command) -> Report {
    debug!(?command, "queued command");
    match command {
        Command::Next => report_move(session.advance_next()),
        Command::Previous => report_move(session.advance_previous()),
        Command::Go(id) => report_move(session.select(Some(id))),
        Command::Index(index) => report_move(session.go_to_index(Some(index))),
        Command::Finish => report_move(session.finish()),
        Command::Save => {
            let saved = session.save();
            async move {
                Some(match saved.await {
                    Ok(()) => "Caption saved.".to_string(),
                    Err(error) => failure_text(&error),
                })
            }
            .boxed()
        }
        Command::Caption(text) => {
            let edited = session.edit_caption(text);
            async move {
                edited
                    .await
                    .err()
                    .map(|error| failure_text(&SessionError::from(error)))
            }
            .boxed()
        }
        Command::Status => {
            let snapshot = session.snapshot();
            async move {
                Some(match snapshot.await {
                    Ok(snapshot) => describe_snapshot(&snapshot),
                    Err(error) => failure_text(&SessionError::from(error)),
                })
            }
            .boxed()
        }
        Command::List => {
            let listing = session
                .enqueue(|nav| async move { describe_subjects(nav.subjects(), nav.cursor()) }.boxed());
            async move {
                Some(match listing.await {
                    Ok(listing) => listing,
                    Err(error) => failure_text(&SessionError::from(error)),
                })
            }
            .boxed()
        }
        Command::Help => future::ready(Some(HELP.to_string())).boxed(),
        Command::Quit => future::ready(None).boxed(),
    }
}

/// Reads commands until `quit` or end of input, then saves the displayed caption
/// and waits for every queued command to settle.
pub async fn run<V, R>(session: SubjectSession<V>, input: R) -> Result<()>
where
    V: SubjectView + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut reports = JoinSet::new();

    while let Some(line) = lines.next_line().await.context("failed to read command")? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let report = dispatch(&session, command);
        reports.spawn(async move {
            if let Some(text) = report.await {
                println!("{text}");
            }
        });
    }

    info!("input closed; saving the displayed caption");
    let flushed = session.save();
    while reports.join_next().await.is_some() {}
    if let Err(error) = flushed.await {
        eprintln!("{}", failure_text(&error));
    }
    Ok(())
}

fn report_move(pending: BoxFuture<'static, Result<Completion, SessionError>>) -> Report {
    async move {
        match pending.await {
            Ok(_) => None,
            Err(error) => Some(failure_text(&error)),
        }
    }
    .boxed()
}

fn failure_text(error: &SessionError) -> String {
    let failure = UiFailure::from_session_error(error);
    warn!(category = ?failure.category(), %error, "command failed");
    failure.message().to_string()
}

pub fn describe_snapshot(snapshot: &NavigatorSnapshot) -> String {
    match (&snapshot.position, &snapshot.current) {
        (Position::Positioned(index), Some(subject)) => format!(
            "subject {}/{}: {} ({})",
            index + 1,
            snapshot.len,
            subject.id,
            subject.image_path
        ),
        (Position::Completed, _) => format!("completed ({} subjects)", snapshot.len),
        _ => "no subjects loaded".to_string(),
    }
}

pub fn describe_subjects(subjects: &[Subject], cursor: Option<usize>) -> String {
    if subjects.is_empty() {
        return "no subjects".to_string();
    }
    subjects
        .iter()
        .enumerate()
        .map(|(index, subject)| {
            let marker = if cursor == Some(index) { '>' } else { ' ' };
            format!("{marker} {:>3}. {}  {}", index + 1, subject.id, subject.image_path)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
