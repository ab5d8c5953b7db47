//! Every failure inside an invocation surfaces as an error-flagged result;
//! nothing escapes the dispatch boundary.

mod support;

use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use support::{ScriptedGateway, call, result_text, server, server_with_config, test_config};

#[tokio::test]
async fn api_failure_is_reported_with_status_and_body() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_status(404, "Not Found", "Not Found");
    let server = server(gateway.clone());

    let result = call(&server, "read_sheet", json!({"sheetId": "missing"})).await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        result_text(&result),
        "Error: API call failed: 404 Not Found - Not Found"
    );
}

#[tokio::test]
async fn every_tool_wraps_api_failures_uniformly() {
    let invocations = [
        ("create_spreadsheet", json!({"title": "t"})),
        ("read_sheet", json!({"sheetId": "s"})),
        (
            "write_sheet",
            json!({"sheetId": "s", "range": "A1", "values": [["v"]]}),
        ),
        ("append_to_sheet", json!({"sheetId": "s", "values": [["v"]]})),
        ("clear_range", json!({"sheetId": "s", "range": "A1:B2"})),
        ("batch_get_ranges", json!({"sheetId": "s", "ranges": ["A1"]})),
        (
            "batch_update_ranges",
            json!({"sheetId": "s", "data": [{"range": "A1", "values": [["v"]]}]}),
        ),
        ("get_sheet_metadata", json!({"sheetId": "s"})),
        (
            "delete_rows",
            json!({"sheetId": "s", "startIndex": 0, "endIndex": 1}),
        ),
        (
            "batch_update_spreadsheet",
            json!({"sheetId": "s", "requests": [{}]}),
        ),
    ];

    for (name, arguments) in invocations {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_status(500, "Internal Server Error", "backend exploded");
        let server = server(gateway.clone());

        let result = call(&server, name, arguments).await;
        assert_eq!(result.is_error, Some(true), "{name} did not flag the error");
        let text = result_text(&result);
        assert!(
            text.contains("API call failed: 500"),
            "{name} lost the status: {text}"
        );
        assert!(
            text.contains("backend exploded"),
            "{name} lost the body: {text}"
        );
    }
}

#[tokio::test]
async fn unknown_tool_returns_error_result() {
    let gateway = Arc::new(ScriptedGateway::new());
    let server = server(gateway.clone());

    let result = call(&server, "delete_sheet", json!({"sheetId": "abc"})).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("Unknown tool: delete_sheet"));
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn missing_required_argument_is_rejected_before_any_request() {
    let gateway = Arc::new(ScriptedGateway::new());
    let server = server(gateway.clone());

    let result = call(
        &server,
        "write_sheet",
        json!({"sheetId": "abc", "values": [["x"]]}),
    )
    .await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("Invalid arguments for tool 'write_sheet'"));
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn empty_delete_span_is_rejected_before_any_request() {
    let gateway = Arc::new(ScriptedGateway::new());
    let server = server(gateway.clone());

    let result = call(
        &server,
        "delete_rows",
        json!({"sheetId": "abc", "startIndex": 5, "endIndex": 5}),
    )
    .await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("endIndex must be greater than startIndex"));
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn disabled_tool_is_refused() {
    let gateway = Arc::new(ScriptedGateway::new());
    let enabled: HashSet<String> = ["read_sheet".to_string()].into_iter().collect();
    let server = server_with_config(gateway.clone(), test_config(Some(enabled)));

    let result = call(&server, "create_spreadsheet", json!({"title": "nope"})).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("disabled by server configuration"));
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn metadata_formatting_is_idempotent() {
    let fixture = json!({
        "spreadsheetId": "abc123",
        "properties": {"title": "Budget", "locale": "en_US", "timeZone": "UTC"},
        "sheets": [
            {"sheetId": 0, "title": "Summary", "gridProperties": {"rowCount": 10, "columnCount": 4}}
        ]
    });

    let gateway = Arc::new(ScriptedGateway::new());
    gateway.push_ok(fixture.clone());
    gateway.push_ok(fixture);
    let server = server(gateway.clone());

    let first = call(&server, "get_sheet_metadata", json!({"sheetId": "abc123"})).await;
    let second = call(&server, "get_sheet_metadata", json!({"sheetId": "abc123"})).await;

    assert_eq!(result_text(&first), result_text(&second));
    assert_eq!(gateway.request_count(), 2);
}
