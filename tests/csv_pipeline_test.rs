use httpmock::prelude::*;
use places_enricher::core::PlaceLookup;
use places_enricher::{
    CsvPipeline, EnrichEngine, EnrichError, EnrichSettings, GooglePlacesClient, LocalStorage,
};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const SEARCH_PATH: &str = "/v1/places:searchText";

fn write_input(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("businesses.csv");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn google(server: &MockServer) -> Arc<dyn PlaceLookup> {
    Arc::new(
        GooglePlacesClient::new(SecretString::from("integration-key".to_string()))
            .with_endpoint(server.url(SEARCH_PATH))
            .with_page_delay(Duration::from_millis(1)),
    )
}

fn settings() -> EnrichSettings {
    EnrichSettings {
        batch_size: 5,
        batch_delay: Duration::from_millis(10),
        ..EnrichSettings::default()
    }
}

fn engine_for(
    input_path: &str,
    server: &MockServer,
) -> EnrichEngine<CsvPipeline<LocalStorage, EnrichSettings>> {
    let (storage, input_file) = LocalStorage::beside(input_path);
    EnrichEngine::new(CsvPipeline::new(
        storage,
        settings().with_input_file(input_file),
        google(server),
    ))
}

#[tokio::test]
async fn test_end_to_end_with_paginated_results() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        "Company,Email,Phone\nAcme Corp,a@x.com,555-1111\n,b@x.com,555-2222\nBeta LLC,c@x.com,555-3333\n",
    );

    let server = MockServer::start();
    let acme_first = server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .header("X-Goog-Api-Key", "integration-key")
            .json_body(json!({"textQuery": "Acme Corp Denver, Colorado"}));
        then.status(200).json_body(json!({
            "places": [{
                "displayName": {"text": "Acme Corp"},
                "formattedAddress": "1 Main St, Denver, CO 80202, USA",
                "internationalPhoneNumber": "+1 303-555-1111"
            }],
            "nextPageToken": "acme-page-2"
        }));
    });
    let acme_second = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH).json_body(json!({
            "textQuery": "Acme Corp Denver, Colorado",
            "pageToken": "acme-page-2"
        }));
        then.status(200).json_body(json!({
            "places": [{
                "displayName": {"text": "Acme Corp Warehouse"},
                "formattedAddress": "9 Dock Rd, Denver, CO 80216, USA"
            }]
        }));
    });
    let beta = server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body(json!({"textQuery": "Beta LLC Denver, Colorado"}));
        then.status(200).json_body(json!({
            "places": [{"displayName": {"text": "Beta LLC"}}]
        }));
    });

    let summary = engine_for(&input, &server).run().await.unwrap();

    acme_first.assert_hits(1);
    acme_second.assert_hits(1);
    beta.assert_hits(1);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.total_results, 3);
    assert_eq!(summary.outcomes.skipped, 1);

    let output_path = temp_dir.path().join("google_places_results.csv");
    assert_eq!(summary.output_path, output_path.display().to_string());

    let output = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Business Name,Address,Phone Number",
            "\"Acme Corp\",\"1 Main St, Denver, CO 80202, USA\",\"+1 303-555-1111\"",
            "\"Acme Corp Warehouse\",\"9 Dock Rd, Denver, CO 80216, USA\",\"\"",
            "\"Beta LLC\",\"\",\"\"",
        ]
    );
}

#[tokio::test]
async fn test_zero_matches_and_api_errors_do_not_abort_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
        &temp_dir,
        "company,email,phone\nGhost Diner,g@x.com,1\nFlaky Inc,f@x.com,2\nReal Cafe,r@x.com,3\n",
    );

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body(json!({"textQuery": "Ghost Diner Denver, Colorado"}));
        then.status(200).json_body(json!({}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body(json!({"textQuery": "Flaky Inc Denver, Colorado"}));
        then.status(500).body("backend error");
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .json_body(json!({"textQuery": "Real Cafe Denver, Colorado"}));
        then.status(200)
            .json_body(json!({"places": [{"displayName": {"text": "Real Cafe"}}]}));
    });

    let summary = engine_for(&input, &server).run().await.unwrap();

    assert_eq!(summary.total_results, 1);
    assert_eq!(summary.outcomes.not_found, 1);
    assert_eq!(summary.outcomes.failed, 1);
    assert_eq!(summary.outcomes.found, 1);

    let output =
        std::fs::read_to_string(temp_dir.path().join("google_places_results.csv")).unwrap();
    assert_eq!(output.lines().count(), 2);
    assert!(output.contains("\"Real Cafe\""));
}

#[tokio::test]
async fn test_missing_headers_fail_before_any_request() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "company,telephone\nAcme Corp,555-1111\n");

    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(200).json_body(json!({"places": []}));
    });

    let err = engine_for(&input, &server).run().await.unwrap_err();

    any_request.assert_hits(0);
    match err {
        EnrichError::MissingHeaders { missing } => {
            assert_eq!(missing, vec!["email".to_string(), "phone".to_string()]);
        }
        other => panic!("expected MissingHeaders, got {:?}", other),
    }
    assert!(!temp_dir.path().join("google_places_results.csv").exists());
}

#[tokio::test]
async fn test_empty_and_missing_files() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let empty = write_input(&temp_dir, "\n\n   \n");
    let err = engine_for(&empty, &server).run().await.unwrap_err();
    assert!(matches!(err, EnrichError::EmptyFile { .. }));

    let missing = temp_dir.path().join("nope.csv");
    let err = engine_for(missing.to_str().unwrap(), &server)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_header_only_file_writes_header_only_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(&temp_dir, "company,email,phone\n");
    let server = MockServer::start();

    let summary = engine_for(&input, &server).run().await.unwrap();

    assert_eq!(summary.rows, 0);
    assert_eq!(summary.batches, 0);
    let output =
        std::fs::read_to_string(temp_dir.path().join("google_places_results.csv")).unwrap();
    assert_eq!(output.trim_end(), "Business Name,Address,Phone Number");
}
