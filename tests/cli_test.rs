use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_cli(workdir: &Path, args: &[&str], envs: &[(&str, &str)], stdin: &str) -> Output {
    use std::io::Write;

    let mut command = Command::new(env!("CARGO_BIN_EXE_places-enricher"));
    command
        .args(args)
        .current_dir(workdir)
        .env_remove("GOOGLE_PLACES_API_KEY")
        .env_remove("YELP_API_KEY")
        .env_remove("PLACES_API_ENDPOINT")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command.spawn().unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_missing_api_key_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--file", "input.csv"], &[], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GOOGLE_PLACES_API_KEY"));
}

#[test]
fn test_missing_file_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(
        temp_dir.path(),
        &["--file", "does-not-exist.csv"],
        &[("GOOGLE_PLACES_API_KEY", "test-key")],
        "",
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_invalid_arguments_exit_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(temp_dir.path(), &["--file"], &[], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_zero_places_completes_with_exit_zero() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("input.csv"),
        "company,email,phone\nNowhere Co,n@x.com,555-0000\n",
    )
    .unwrap();

    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST).path("/v1/places:searchText");
        then.status(200).json_body(json!({"places": []}));
    });
    let endpoint = server.url("/v1/places:searchText");

    let output = run_cli(
        temp_dir.path(),
        &["--file", "input.csv", "--batch-delay-ms", "0"],
        &[
            ("GOOGLE_PLACES_API_KEY", "test-key"),
            ("PLACES_API_ENDPOINT", endpoint.as_str()),
        ],
        "",
    );

    search.assert_hits(1);
    assert_eq!(output.status.code(), Some(0));
    let written = std::fs::read_to_string(temp_dir.path().join("google_places_results.csv")).unwrap();
    assert_eq!(written.trim_end(), "Business Name,Address,Phone Number");
}

#[test]
fn test_interactive_mode_prints_results() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/places:searchText")
            .json_body(json!({"textQuery": "Acme Corp Boulder, CO"}));
        then.status(200).json_body(json!({
            "places": [{
                "displayName": {"text": "Acme Corp"},
                "formattedAddress": "5 Pearl St, Boulder, CO"
            }]
        }));
    });
    let endpoint = server.url("/v1/places:searchText");

    let output = run_cli(
        temp_dir.path(),
        &[],
        &[
            ("GOOGLE_PLACES_API_KEY", "test-key"),
            ("PLACES_API_ENDPOINT", endpoint.as_str()),
        ],
        "Acme Corp\nBoulder, CO\n",
    );

    search.assert();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Business found!"));
    assert!(stdout.contains("5 Pearl St, Boulder, CO"));
}

#[test]
fn test_interactive_mode_cancelled_on_eof() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(
        temp_dir.path(),
        &[],
        &[("GOOGLE_PLACES_API_KEY", "test-key")],
        "",
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Operation cancelled"));
}
