//! End-to-end comparisons: manifest loading, diffing and content retrieval

use super::support::MemoryRetriever;
use staticdiff::config::{AppConfig, ComparisonParams};
use staticdiff::difflist::PaneState;
use staticdiff::error::{ApiError, FetchError, ManifestError};
use staticdiff::fetch::DefaultRetriever;
use staticdiff::render::TextPresenter;
use staticdiff::tree::FileStatus;
use staticdiff::{Comparison, Session};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn local_directories_end_to_end() {
    let temp = tempfile::tempdir().unwrap();
    let left = temp.path().join("v1");
    let right = temp.path().join("v2");
    write(&left, "MANIFEST", "h1 a.txt\nh2 ./b/c.txt\nh0 MANIFEST\n");
    write(&left, "a.txt", "alpha\n");
    write(&left, "b/c.txt", "one\ntwo\n");
    write(&right, "MANIFEST", "h1 a.txt\nh3 b/c.txt\nh4 d.txt\n");
    write(&right, "a.txt", "alpha\n");
    write(&right, "b/c.txt", "one\n2\n");
    write(&right, "d.txt", "delta\n");

    let params = ComparisonParams::new(left.to_str().unwrap(), right.to_str().unwrap());
    let presenter = Arc::new(TextPresenter::new(false));
    let session = Session::start(
        params,
        &AppConfig::default(),
        Arc::new(DefaultRetriever::new()),
        presenter.clone(),
    )
    .await
    .unwrap();

    let comparison = session.comparison();
    assert_eq!(comparison.title(), "v1 vs. v2 - StaticDiff");
    let names: Vec<&str> = comparison.files.iter().map(|f| f.entry_name.as_str()).collect();
    assert_eq!(names, vec!["b/c.txt", "d.txt"]);

    session.settled().await;
    assert_eq!(
        presenter.pane("b%2Fc.txt").unwrap(),
        "b/c.txt\n  one\n- two\n+ 2\n"
    );
    assert_eq!(presenter.pane("d.txt").unwrap(), "d.txt\n+ delta\n");
}

#[tokio::test]
async fn content_locations_follow_manifest_redirect() {
    let retriever = Arc::new(MemoryRetriever::new());
    retriever.insert_redirected(
        "https://cdn.example/left/MANIFEST",
        "https://mirror.example/cache/left/MANIFEST",
        "h1 a.txt",
    );
    retriever.insert("https://cdn.example/right/MANIFEST", "h2 a.txt");

    let params = ComparisonParams::parse(
        "l=https://cdn.example/left&r=https://cdn.example/right&lname=before",
        "MANIFEST",
    )
    .unwrap();
    let comparison = Comparison::load(&params, &AppConfig::default(), &*retriever)
        .await
        .unwrap();

    assert_eq!(comparison.title(), "before vs. right - StaticDiff");
    let file = &comparison.files[0];
    assert_eq!(file.status(), FileStatus::Modified);
    assert_eq!(
        file.change.left_location().unwrap().as_str(),
        "https://mirror.example/cache/left/a.txt"
    );
    assert_eq!(
        file.change.right_location().unwrap().as_str(),
        "https://cdn.example/right/a.txt"
    );
}

#[tokio::test]
async fn relative_identifiers_resolve_against_base_url() {
    let retriever = Arc::new(MemoryRetriever::new());
    retriever.insert("https://host.example/builds/1/SUMS", "h1 x.txt");
    retriever.insert("https://host.example/builds/2/SUMS", "h1 x.txt\nh2 y.txt");

    let mut config = AppConfig::default();
    config.base_url = Some("https://host.example/app/index.html".to_string());
    let params =
        ComparisonParams::parse("l=/builds/1&r=/builds/2&manifest=SUMS", "MANIFEST").unwrap();

    let comparison = Comparison::load(&params, &config, &*retriever)
        .await
        .unwrap();
    assert_eq!(comparison.files.len(), 1);
    assert_eq!(comparison.files[0].entry_name, "y.txt");
    assert_eq!(comparison.files[0].status(), FileStatus::Added);
}

#[tokio::test]
async fn bad_manifest_aborts_comparison() {
    let retriever = Arc::new(MemoryRetriever::new());
    retriever.insert("https://host.example/l/MANIFEST", "h1 a.txt\nabc123   \n");
    retriever.insert("https://host.example/r/MANIFEST", "h1 a.txt");

    let params = ComparisonParams::new("https://host.example/l", "https://host.example/r");
    let err = Comparison::load(&params, &AppConfig::default(), &*retriever)
        .await
        .unwrap_err();
    match err {
        ApiError::Manifest(ManifestError::MissingPath { manifest, line }) => {
            assert_eq!(manifest, "https://host.example/l/MANIFEST");
            assert_eq!(line, "abc123");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_manifest_aborts_comparison() {
    let retriever = Arc::new(MemoryRetriever::new());
    retriever.insert("https://host.example/l/MANIFEST", "h1 a.txt");

    let params = ComparisonParams::new("https://host.example/l", "https://host.example/r");
    let err = Comparison::load(&params, &AppConfig::default(), &*retriever)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Fetch(FetchError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn invalid_config_rejected_before_loading() {
    let retriever = Arc::new(MemoryRetriever::new());
    let mut config = AppConfig::default();
    config.fetch.max_concurrent = 0;

    let params = ComparisonParams::new("https://host.example/l", "https://host.example/r");
    let result = Session::start(
        params,
        &config,
        retriever.clone(),
        Arc::new(TextPresenter::new(false)),
    )
    .await;
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
    assert_eq!(retriever.calls(), 0);
}

#[tokio::test]
async fn initial_and_interactive_selection() {
    let retriever = Arc::new(MemoryRetriever::new());
    retriever.insert("https://host.example/l/MANIFEST", "h1 a.txt\nh1 z.txt");
    retriever.insert("https://host.example/r/MANIFEST", "h2 a.txt\nh2 z.txt");
    retriever.insert("https://host.example/l/a.txt", "a\n");
    retriever.insert("https://host.example/r/a.txt", "A\n");
    retriever.insert("https://host.example/l/z.txt", "z\n");
    retriever.insert("https://host.example/r/z.txt", "Z\n");
    retriever.delay("https://host.example/r/z.txt", Duration::from_millis(20));

    let params = ComparisonParams::parse(
        "l=https://host.example/l&r=https://host.example/r&selected=z.txt",
        "MANIFEST",
    )
    .unwrap();
    let presenter = Arc::new(TextPresenter::new(false));
    let mut session = Session::start(
        params,
        &AppConfig::default(),
        retriever.clone(),
        presenter.clone(),
    )
    .await
    .unwrap();

    assert_eq!(session.list().pending_scroll().as_deref(), Some("z.txt"));
    session.settled().await;
    assert_eq!(presenter.scrolls(), vec!["z.txt".to_string()]);
    assert!(matches!(session.list().pane("z.txt"), Some(PaneState::Ready(_))));

    let encoded = session.select("a.txt");
    assert_eq!(session.params().selected.as_deref(), Some("a.txt"));
    assert!(encoded.contains("selected=a.txt"));
    assert_eq!(
        presenter.scrolls(),
        vec!["z.txt".to_string(), "a.txt".to_string()]
    );
    // Selecting does not reload anything
    assert_eq!(retriever.calls(), 6);
}
