//! Tests for the command-line shell: messages and exit codes.

use globus_http::cli::{run_from, BuildInfo, EXIT_FAILURE, EXIT_SUCCESS};
use tempfile::tempdir;

async fn run_args(args: &[&str]) -> (u8, String) {
    let mut out = Vec::new();
    let mut argv = vec!["globus-http"];
    argv.extend_from_slice(args);

    let code = run_from(argv, &BuildInfo::current(), &mut out).await;
    (code, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_no_arguments() {
    let (code, out) = run_args(&[]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("Missing command"));
    assert!(out.contains("ClientSecret"));
}

#[tokio::test]
async fn test_version() {
    let (code, out) = run_args(&["-version"]).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
    assert!(out.starts_with("globus-http "));
}

#[tokio::test]
async fn test_version_wins_over_command() {
    let (code, out) = run_args(&["--version", "download", "https://example.org/a"]).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_version_wins_over_unknown_command() {
    let (code, out) = run_args(&["-version", "bogus"]).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
    assert!(!out.contains("Unknown command"));
}

#[tokio::test]
async fn test_extra_operands_are_ignored() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nonexistent.toml");

    let (code, out) = run_args(&[
        "-config",
        config.to_str().unwrap(),
        "download",
        "https://example.org/a",
        "a",
        "extra",
    ])
    .await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.starts_with("ERROR: failed to get client"));
    assert!(!out.contains("unexpected argument"));
}

#[tokio::test]
async fn test_unknown_flag_prints_usage_once() {
    let (code, out) = run_args(&["--bogus"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.starts_with("error: unexpected argument '--bogus'"));
    assert_eq!(out.matches("Usage:").count(), 1);
}

#[tokio::test]
async fn test_help() {
    let (code, out) = run_args(&["--help"]).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains("download"));
    assert!(out.contains("upload"));
    assert!(out.contains("Scopes = "));
}

#[tokio::test]
async fn test_download_missing_operands() {
    let (code, out) = run_args(&["download", "https://example.org/a"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("Missing source and/or destination for download"));
}

#[tokio::test]
async fn test_upload_missing_operands() {
    let (code, out) = run_args(&["upload"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("Missing source and/or destination for upload"));
}

#[tokio::test]
async fn test_unknown_command() {
    let (code, out) = run_args(&["frobnicate"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("Unknown command: frobnicate"));
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("missing.toml");
    let config = config.to_str().unwrap();

    let (code, out) =
        run_args(&["-config", config, "upload", "a.txt", "https://example.org/a.txt"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.starts_with("ERROR: failed to get client: failed to read config file"));
    assert!(out.contains("missing.toml"));
}

#[tokio::test]
async fn test_invalid_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "ClientID = ").unwrap();
    let flag = format!("-config={}", config.to_str().unwrap());

    let (code, out) = run_args(&[flag.as_str(), "download", "https://example.org/a", "a"]).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("ERROR: failed to get client: failed to parse config file"));
}

#[tokio::test]
async fn test_config_with_wrong_value_type() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("typed.toml");
    std::fs::write(&config, "ClientID = \"id\"\nScopes = \"not-a-list\"\n").unwrap();

    let (code, out) = run_args(&[
        "-config",
        config.to_str().unwrap(),
        "download",
        "https://example.org/a",
        "a",
    ])
    .await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.starts_with("ERROR: failed to get client: failed to parse config file"));
}

#[tokio::test]
async fn test_missing_source_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "ClientID = \"id\"\nClientSecret = \"secret\"\nScopes = []\n").unwrap();
    let source = dir.path().join("nope.txt");

    let (code, out) = run_args(&[
        "-config",
        config.to_str().unwrap(),
        "upload",
        source.to_str().unwrap(),
        "https://example.org/nope.txt",
    ])
    .await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.starts_with("ERROR: failed to open source"));
}
