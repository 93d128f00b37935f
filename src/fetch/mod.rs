//! Content retrieval
//!
//! `Retriever` is the seam to the outside world (HTTP or local files);
//! `FetchQueue` bounds how many retrievals are in flight at once.

pub mod queue;
pub mod source;

pub use queue::{FetchQueue, QueueStats};
pub use source::{DefaultRetriever, Retrieved, Retriever};
