//! Pending-Selection Resolver
//!
//! Tracks at most one outstanding "scroll to file" request. A request for a
//! file whose content is already available resolves immediately; otherwise it
//! waits for that file's completion. A newer request replaces an older one.

use crate::types::Uid;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PendingSelection<H> {
    pending: Option<Uid>,
    completed: HashMap<Uid, H>,
}

impl<H> Default for PendingSelection<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PendingSelection<H> {
    pub fn new() -> Self {
        Self {
            pending: None,
            completed: HashMap::new(),
        }
    }

    /// Request a scroll to `uid`.
    ///
    /// Returns the handle when the file is already complete (the request is
    /// resolved and any outstanding one cleared); otherwise stores `uid` as the
    /// outstanding request and returns `None`.
    pub fn request(&mut self, uid: &str) -> Option<&H> {
        if self.completed.contains_key(uid) {
            self.pending = None;
            return self.completed.get(uid);
        }
        self.pending = Some(uid.to_string());
        None
    }

    /// Record a completed file. Returns its handle when it was the outstanding request.
    pub fn complete(&mut self, uid: &str, handle: H) -> Option<&H> {
        self.completed.insert(uid.to_string(), handle);
        if self.pending.as_deref() == Some(uid) {
            self.pending = None;
            return self.completed.get(uid);
        }
        None
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Forget completed handles, keeping the outstanding request
    pub fn clear_completed(&mut self) {
        self.completed.clear();
    }
}
