//! Shared fixtures: an in-memory retriever with per-location latency.

use async_trait::async_trait;
use parking_lot::Mutex;
use staticdiff::error::FetchError;
use staticdiff::fetch::{Retrieved, Retriever};
use staticdiff::manifest::{FileDescriptor, Manifest, ManifestSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

enum Entry {
    Body { served_from: Url, body: String },
    Fail(u16),
}

/// Serves fixed bodies, tracks how many retrievals overlap
#[derive(Default)]
pub struct MemoryRetriever {
    entries: Mutex<HashMap<String, Entry>>,
    delays: Mutex<HashMap<String, Duration>>,
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, location: &str, body: &str) {
        let url = Url::parse(location).unwrap();
        self.entries.lock().insert(
            location.to_string(),
            Entry::Body {
                served_from: url,
                body: body.to_string(),
            },
        );
    }

    /// Serve `location` as if redirected to `served_from`
    pub fn insert_redirected(&self, location: &str, served_from: &str, body: &str) {
        self.entries.lock().insert(
            location.to_string(),
            Entry::Body {
                served_from: Url::parse(served_from).unwrap(),
                body: body.to_string(),
            },
        );
    }

    pub fn fail(&self, location: &str, status: u16) {
        self.entries
            .lock()
            .insert(location.to_string(), Entry::Fail(status));
    }

    pub fn delay(&self, location: &str, delay: Duration) {
        self.delays.lock().insert(location.to_string(), delay);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for MemoryRetriever {
    async fn retrieve(&self, location: &Url) -> Result<Retrieved, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .lock()
            .get(location.as_str())
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        let result = match self.entries.lock().get(location.as_str()) {
            Some(Entry::Body { served_from, body }) => Ok(Retrieved {
                location: served_from.clone(),
                body: body.clone(),
            }),
            Some(Entry::Fail(status)) => Err(FetchError::Status {
                location: location.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                location: location.to_string(),
                status: 404,
            }),
        };
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Parse manifest lines as if served from `base` (a directory URL)
pub fn manifest(base: &str, lines: &[&str]) -> Manifest {
    let location = Url::parse(base).unwrap().join("MANIFEST").unwrap();
    Manifest::parse(
        &lines.join("\n"),
        ManifestSource {
            identifier: base,
            manifest_file: "MANIFEST",
            location: &location,
        },
        None,
    )
    .unwrap()
}

/// Descriptor with a deterministic location under `base`
pub fn descriptor(base: &str, path: &str, hash: &str) -> FileDescriptor {
    FileDescriptor {
        uid: urlencoding::encode(path).into_owned(),
        display_path: path.to_string(),
        hash: hash.to_string(),
        location: Url::parse(base).unwrap().join(path).unwrap(),
    }
}
