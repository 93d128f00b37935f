//! Comparison session
//!
//! Loads both manifests concurrently, builds and diffs their trees, and hands
//! the flattened result to a `DiffList`. Any manifest or tree error aborts the
//! whole comparison; nothing partial is produced.

use crate::config::{AppConfig, ComparisonParams};
use crate::difflist::{DiffList, Presenter};
use crate::error::ApiError;
use crate::fetch::Retriever;
use crate::manifest::{load_manifest, Manifest};
use crate::tree::{build_tree, diff_trees, flatten_diff, DiffDirectory, DiffFile};
use std::sync::Arc;
use tracing::info;

/// The immutable result of comparing two manifests
#[derive(Debug, Clone)]
pub struct Comparison {
    pub left: Manifest,
    pub right: Manifest,
    pub diff: DiffDirectory,
    pub files: Vec<DiffFile>,
}

impl Comparison {
    /// Diff two already parsed manifests
    pub fn from_manifests(left: Manifest, right: Manifest) -> Result<Self, ApiError> {
        let left_tree = build_tree(&left.files)?;
        let right_tree = build_tree(&right.files)?;
        let diff = diff_trees(&left_tree, &right_tree);
        let files = flatten_diff(&diff);

        info!(
            left = %left.name,
            right = %right.name,
            changed = files.len(),
            "Comparison built"
        );
        Ok(Self {
            left,
            right,
            diff,
            files,
        })
    }

    /// Fetch both manifests concurrently and diff them
    pub async fn load(
        params: &ComparisonParams,
        config: &AppConfig,
        retriever: &dyn Retriever,
    ) -> Result<Self, ApiError> {
        let base = config.base()?;
        let manifest_file = params.manifest_file_or(&config.manifest_file);

        let (left, right) = tokio::try_join!(
            load_manifest(
                retriever,
                &params.left,
                base.as_ref(),
                manifest_file,
                params.left_name.as_deref(),
            ),
            load_manifest(
                retriever,
                &params.right,
                base.as_ref(),
                manifest_file,
                params.right_name.as_deref(),
            ),
        )?;

        Self::from_manifests(left, right)
    }

    pub fn title(&self) -> String {
        format!("{} vs. {} - StaticDiff", self.left.name, self.right.name)
    }
}

/// A running comparison: the diff plus the content pipeline for its files
pub struct Session {
    params: ComparisonParams,
    comparison: Comparison,
    list: DiffList,
}

impl Session {
    /// Load the comparison, start fetching file contents and honour an initial selection
    pub async fn start(
        params: ComparisonParams,
        config: &AppConfig,
        retriever: Arc<dyn Retriever>,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        let comparison = Comparison::load(&params, config, retriever.as_ref()).await?;

        let list = DiffList::new(retriever, presenter, config.fetch.max_concurrent);
        list.set_files(comparison.files.clone());
        if let Some(selected) = params.selected.as_deref() {
            list.scroll_to(selected);
        }

        Ok(Self {
            params,
            comparison,
            list,
        })
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    pub fn params(&self) -> &ComparisonParams {
        &self.params
    }

    pub fn list(&self) -> &DiffList {
        &self.list
    }

    /// Select a file: record it in the parameters and scroll to it.
    ///
    /// Returns the re-encoded parameters; the comparison is not rebuilt.
    pub fn select(&mut self, uid: &str) -> String {
        self.params.select(uid);
        self.list.scroll_to(uid);
        self.params.encode()
    }

    /// Wait for every file's content to load or fail
    pub async fn settled(&self) {
        self.list.settled().await;
    }
}
