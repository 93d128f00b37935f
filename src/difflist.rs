//! Diff List
//!
//! Drives content retrieval for the flattened file list. Every file submits a
//! left and a right fetch to one shared `FetchQueue`, so the concurrency bound
//! holds across the whole list. Files complete independently and in any order;
//! a failure only affects its own pane.

use crate::error::FetchError;
use crate::fetch::{FetchQueue, Retriever};
use crate::linediff::{diff_lines, has_changes, Segment};
use crate::selection::PendingSelection;
use crate::tree::DiffFile;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

/// Rendering layer callbacks.
///
/// Called from whichever task completed the file, never concurrently with each
/// other and never with the list state locked. Implementations must not call
/// back into the `DiffList`.
pub trait Presenter: Send + Sync {
    fn file_ready(&self, file: &DiffFile, segments: &[Segment]);
    fn file_failed(&self, file: &DiffFile, error: &FetchError);
    fn scroll_to(&self, file: &DiffFile);
}

/// Display state of one file pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneState {
    Loading,
    Ready(Vec<Segment>),
    Failed(String),
}

struct ListState {
    generation: u64,
    files: Vec<DiffFile>,
    panes: Vec<PaneState>,
    selection: PendingSelection<usize>,
}

pub struct DiffList {
    queue: FetchQueue,
    retriever: Arc<dyn Retriever>,
    presenter: Arc<dyn Presenter>,
    state: Arc<Mutex<ListState>>,
    /// Held across a state transition and the presenter callbacks it triggers
    render: Arc<Mutex<()>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DiffList {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        presenter: Arc<dyn Presenter>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            queue: FetchQueue::new(max_concurrent),
            retriever,
            presenter,
            state: Arc::new(Mutex::new(ListState {
                generation: 0,
                files: Vec::new(),
                panes: Vec::new(),
                selection: PendingSelection::new(),
            })),
            render: Arc::new(Mutex::new(())),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self) -> &FetchQueue {
        &self.queue
    }

    /// Replace the file list and start fetching every file.
    ///
    /// Fetches are submitted in list order. Completions belonging to a previous
    /// list are ignored; an outstanding scroll request is kept.
    pub fn set_files(&self, files: Vec<DiffFile>) {
        let generation = {
            let _render = self.render.lock();
            let mut state = self.state.lock();
            state.generation += 1;
            state.panes = vec![PaneState::Loading; files.len()];
            state.files = files.clone();
            state.selection.clear_completed();
            state.generation
        };
        debug!(generation, files = files.len(), "Diff list replaced");

        let mut handles = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let left = self.submit_fetch(file.change.left_location().cloned());
            let right = self.submit_fetch(file.change.right_location().cloned());
            let state = Arc::clone(&self.state);
            let render = Arc::clone(&self.render);
            let presenter = Arc::clone(&self.presenter);

            handles.push(tokio::spawn(async move {
                let outcome = futures::future::try_join(left, right).await;
                let _render = render.lock();
                finish(&state, presenter.as_ref(), generation, index, &file, outcome);
            }));
        }

        let mut tasks = self.tasks.lock();
        tasks.retain(|handle| !handle.is_finished());
        tasks.extend(handles);
    }

    fn submit_fetch(
        &self,
        location: Option<Url>,
    ) -> impl Future<Output = Result<String, FetchError>> + Send + 'static {
        let retriever = Arc::clone(&self.retriever);
        self.queue.submit(move || async move {
            match location {
                Some(location) => retriever.fetch_text(&location).await,
                None => Ok(String::new()),
            }
        })
    }

    /// Scroll to a file once its content is available.
    ///
    /// Returns true when the scroll happened immediately.
    pub fn scroll_to(&self, uid: &str) -> bool {
        let _render = self.render.lock();
        let target = {
            let mut state = self.state.lock();
            let index = state.selection.request(uid).copied();
            index.map(|i| state.files[i].clone())
        };
        match target {
            Some(file) => {
                self.presenter.scroll_to(&file);
                true
            }
            None => {
                debug!(uid, "Scroll deferred until file content arrives");
                false
            }
        }
    }

    pub fn files(&self) -> Vec<DiffFile> {
        self.state.lock().files.clone()
    }

    pub fn pane(&self, uid: &str) -> Option<PaneState> {
        let state = self.state.lock();
        let index = state.files.iter().position(|f| f.uid == uid)?;
        state.panes.get(index).cloned()
    }

    pub fn pending_scroll(&self) -> Option<String> {
        self.state.lock().selection.pending().map(str::to_string)
    }

    /// Wait for every file submitted so far to finish (ready or failed)
    pub async fn settled(&self) {
        loop {
            let handles: Vec<_> = std::mem::take(&mut *self.tasks.lock());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Diff list task ended abnormally");
                }
            }
        }
    }
}

/// Record a file's outcome and notify the presenter.
///
/// The caller holds the render lock, so no scroll or list replacement can slip
/// in between the state update and the callbacks.
fn finish(
    state: &Mutex<ListState>,
    presenter: &dyn Presenter,
    generation: u64,
    index: usize,
    file: &DiffFile,
    outcome: Result<(String, String), FetchError>,
) {
    match outcome {
        Ok((left, right)) => {
            let segments = diff_lines(&left, &right);
            let scroll = {
                let mut state = state.lock();
                if state.generation != generation {
                    debug!(path = %file.entry_name, "Dropping result for replaced list");
                    return;
                }
                state.panes[index] = PaneState::Ready(segments.clone());
                state.selection.complete(&file.uid, index).is_some()
            };
            debug!(
                path = %file.entry_name,
                segments = segments.len(),
                changed = has_changes(&segments),
                "File diff ready"
            );
            presenter.file_ready(file, &segments);
            if scroll {
                presenter.scroll_to(file);
            }
        }
        Err(error) => {
            {
                let mut state = state.lock();
                if state.generation != generation {
                    return;
                }
                state.panes[index] = PaneState::Failed(error.to_string());
            }
            warn!(path = %file.entry_name, error = %error, "Failed to load file contents");
            presenter.file_failed(file, &error);
        }
    }
}
