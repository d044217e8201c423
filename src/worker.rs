//! Running an organize pass off the caller's thread.
//!
//! The core calls block. Interactive callers spawn them here and drain
//! [`WorkerEvent`]s from the returned handle to keep their own loop responsive.

use std::any::Any;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::error::{OrganizeError, ReportError};
use crate::file_category::Category;
use crate::file_organizer::{CancelToken, OrganizeObserver, OrganizeResult, Organizer};
use crate::report::ReportGenerator;

/// Progress and completion messages sent by a worker.
#[derive(Debug)]
pub enum WorkerEvent {
    Scanned {
        total: usize,
    },
    Moved {
        filename: String,
        category: Category,
        final_name: String,
    },
    Failed {
        filename: String,
        reason: String,
    },
    Skipped {
        filename: String,
    },
    ReportsWritten(Vec<PathBuf>),
    ReportsFailed(ReportError),
    /// Always the last event.
    Finished(Result<OrganizeResult, OrganizeError>),
}

struct ChannelObserver {
    tx: Sender<WorkerEvent>,
}

impl ChannelObserver {
    fn send(&self, event: WorkerEvent) {
        // receiver gone means nobody is listening any more
        let _ = self.tx.send(event);
    }
}

impl OrganizeObserver for ChannelObserver {
    fn scanned(&mut self, total: usize) {
        self.send(WorkerEvent::Scanned { total });
    }

    fn moved(&mut self, filename: &str, category: Category, final_name: &str) {
        self.send(WorkerEvent::Moved {
            filename: filename.to_string(),
            category,
            final_name: final_name.to_string(),
        });
    }

    fn failed(&mut self, filename: &str, reason: &str) {
        self.send(WorkerEvent::Failed {
            filename: filename.to_string(),
            reason: reason.to_string(),
        });
    }

    fn skipped(&mut self, filename: &str) {
        self.send(WorkerEvent::Skipped {
            filename: filename.to_string(),
        });
    }
}

/// Handle to a running organize worker.
pub struct WorkerHandle {
    events: Receiver<WorkerEvent>,
    cancel: CancelToken,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Asks the worker to stop before its next move.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Events in the order the worker produced them.
    pub fn events(&self) -> &Receiver<WorkerEvent> {
        &self.events
    }

    /// Blocks until the worker finishes and returns its final outcome,
    /// discarding intermediate events.
    pub fn wait(self) -> Result<OrganizeResult, OrganizeError> {
        let mut outcome = None;
        for event in self.events.iter() {
            if let WorkerEvent::Finished(result) = event {
                outcome = Some(result);
            }
        }
        let joined = self.thread.join();
        match (outcome, joined) {
            (Some(result), _) => result,
            (None, Err(payload)) => Err(OrganizeError::WorkerPanicked(panic_message(&*payload))),
            (None, Ok(())) => Err(OrganizeError::WorkerPanicked(
                "worker exited without a result".to_string(),
            )),
        }
    }

    /// Waits for the worker thread to exit.
    pub fn join(self) {
        if let Err(payload) = self.thread.join() {
            warn!(reason = %panic_message(&*payload), "organizer worker panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs `organizer` over `folder` on a new thread.
///
/// When `with_reports` is set and organizing succeeds, reports are written
/// before `Finished` is sent.
///
/// # Examples
///
/// ```no_run
/// use foldsort::worker::{spawn_organize, WorkerEvent};
/// use foldsort::Organizer;
///
/// let handle = spawn_organize(Organizer::default(), "/home/user/Downloads".into(), true);
/// for event in handle.events().iter() {
///     if let WorkerEvent::Moved { filename, category, .. } = &event {
///         println!("{filename} -> {category}");
///     }
///     if matches!(event, WorkerEvent::Finished(_)) {
///         break;
///     }
/// }
/// handle.join();
/// ```
pub fn spawn_organize(organizer: Organizer, folder: PathBuf, with_reports: bool) -> WorkerHandle {
    let (tx, rx) = mpsc::channel();
    let cancel = organizer.cancel_token().clone();

    let thread = thread::spawn(move || {
        let mut observer = ChannelObserver { tx };
        let outcome = organizer.organize_with_observer(&folder, &mut observer);

        if with_reports && let Ok(result) = &outcome {
            match ReportGenerator::new(&folder).generate(result) {
                Ok(written) => observer.send(WorkerEvent::ReportsWritten(written)),
                Err(err) => observer.send(WorkerEvent::ReportsFailed(err)),
            }
        }

        debug!(folder = %folder.display(), ok = outcome.is_ok(), "worker finished");
        observer.send(WorkerEvent::Finished(outcome));
    });

    WorkerHandle {
        events: rx,
        cancel,
        thread,
    }
}
