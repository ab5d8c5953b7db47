//! Tool parameter types and handlers.
//!
//! Each handler builds exactly one [`ApiRequest`], hands it to the gateway,
//! and renders the JSON reply as a single text block. Parameters are decoded
//! into these structs before dispatch, so a missing or mistyped argument is
//! rejected up front instead of failing somewhere inside a handler.
//!
//! Argument names are camelCase on the wire to match the catalog schemas.

use crate::client::{ApiRequest, SheetsGateway};
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Row listing cutoff for `read_sheet` output.
const MAX_LISTED_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    #[default]
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            MajorDimension::Rows => "ROWS",
            MajorDimension::Columns => "COLUMNS",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    #[default]
    FormattedValue,
    UnformattedValue,
    Formula,
}

impl ValueRenderOption {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueRenderOption::FormattedValue => "FORMATTED_VALUE",
            ValueRenderOption::UnformattedValue => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    Raw,
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// One range/values pair for `batch_update_ranges`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpreadsheetParams {
    pub title: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadSheetParams {
    pub sheet_id: String,
    #[serde(default = "default_read_range")]
    pub range: String,
    #[serde(default)]
    pub major_dimension: MajorDimension,
    #[serde(default)]
    pub value_render_option: ValueRenderOption,
}

fn default_read_range() -> String {
    "A:Z".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteSheetParams {
    pub sheet_id: String,
    pub range: String,
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendToSheetParams {
    pub sheet_id: String,
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearRangeParams {
    pub sheet_id: String,
    pub range: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetRangesParams {
    pub sheet_id: String,
    pub ranges: Vec<String>,
    #[serde(default)]
    pub major_dimension: MajorDimension,
    #[serde(default)]
    pub value_render_option: ValueRenderOption,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRangesParams {
    pub sheet_id: String,
    pub data: Vec<ValueRange>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetSheetMetadataParams {
    pub sheet_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRowsParams {
    pub sheet_id: String,
    /// First row to delete, zero-based inclusive.
    pub start_index: u32,
    /// End of the span, zero-based exclusive.
    pub end_index: u32,
    #[serde(default)]
    pub sheet_tab_id: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateSpreadsheetParams {
    pub sheet_id: String,
    /// Raw request objects passed through to the API untouched.
    pub requests: Vec<Value>,
}

pub async fn create_spreadsheet(
    gateway: &dyn SheetsGateway,
    params: CreateSpreadsheetParams,
) -> Result<String> {
    let request = ApiRequest::post("/api/sheets/create").body(json!({ "title": params.title }));
    let response = gateway.execute(request).await?;

    let mut out = format!(
        "Spreadsheet created successfully!\nTitle: {}\nID: {}\nURL: {}",
        params.title,
        field(&response, "spreadsheetId"),
        field(&response, "spreadsheetUrl"),
    );
    let message = field(&response, "message");
    if !message.is_empty() {
        out.push('\n');
        out.push_str(&message);
    }
    Ok(out)
}

pub async fn read_sheet(gateway: &dyn SheetsGateway, params: ReadSheetParams) -> Result<String> {
    let request = ApiRequest::get(format!("/api/sheets/{}", params.sheet_id))
        .query("range", params.range.clone())
        .query("majorDimension", params.major_dimension.as_str())
        .query("valueRenderOption", params.value_render_option.as_str());
    let response = gateway.execute(request).await?;

    let range = response
        .get("range")
        .and_then(Value::as_str)
        .unwrap_or(&params.range);
    let rows = response
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let row_count = response
        .get("rowCount")
        .and_then(Value::as_u64)
        .unwrap_or(rows.len() as u64);

    let mut out = format!("Sheet data for range {range} ({row_count} rows):");
    if let Some(headers) = response.get("headers").and_then(Value::as_array) {
        if !headers.is_empty() {
            out.push('\n');
            out.push_str(&render_cells(headers));
        }
    }
    for row in rows.iter().take(MAX_LISTED_ROWS) {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    if rows.len() > MAX_LISTED_ROWS {
        out.push('\n');
        out.push_str(&format!(
            "...and {} more rows",
            rows.len() - MAX_LISTED_ROWS
        ));
    }
    Ok(out)
}

pub async fn write_sheet(gateway: &dyn SheetsGateway, params: WriteSheetParams) -> Result<String> {
    let request = ApiRequest::put(format!("/api/sheets/{}/values", params.sheet_id)).body(json!({
        "range": params.range,
        "values": params.values,
        "valueInputOption": params.value_input_option.as_str(),
    }));
    let response = gateway.execute(request).await?;

    Ok(format!(
        "Updated {} cells in {} ({} rows x {} columns)",
        field(&response, "updatedCells"),
        field(&response, "updatedRange"),
        field(&response, "updatedRows"),
        field(&response, "updatedColumns"),
    ))
}

pub async fn append_to_sheet(
    gateway: &dyn SheetsGateway,
    params: AppendToSheetParams,
) -> Result<String> {
    let request = ApiRequest::post(format!("/api/sheets/{}/append", params.sheet_id)).body(json!({
        "values": params.values,
        "valueInputOption": params.value_input_option.as_str(),
    }));
    let response = gateway.execute(request).await?;

    let updates = response.get("updates").cloned().unwrap_or(Value::Null);
    Ok(format!(
        "Appended {} cells to {}",
        field(&updates, "updatedCells"),
        field(&updates, "updatedRange"),
    ))
}

pub async fn clear_range(gateway: &dyn SheetsGateway, params: ClearRangeParams) -> Result<String> {
    let request = ApiRequest::delete(format!("/api/sheets/{}/values", params.sheet_id))
        .query("range", params.range.clone());
    let response = gateway.execute(request).await?;

    let cleared = response
        .get("clearedRange")
        .and_then(Value::as_str)
        .unwrap_or(&params.range);
    Ok(format!("Cleared range {cleared}"))
}

pub async fn batch_get_ranges(
    gateway: &dyn SheetsGateway,
    params: BatchGetRangesParams,
) -> Result<String> {
    let request =
        ApiRequest::post(format!("/api/sheets/{}/batch-get", params.sheet_id)).body(json!({
            "ranges": params.ranges,
            "majorDimension": params.major_dimension.as_str(),
            "valueRenderOption": params.value_render_option.as_str(),
        }));
    let response = gateway.execute(request).await?;

    let value_ranges = response
        .get("valueRanges")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut out = format!("Retrieved {} ranges:", value_ranges.len());
    for value_range in &value_ranges {
        let range = value_range
            .get("range")
            .and_then(Value::as_str)
            .unwrap_or("(unknown range)");
        let rows = value_range
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.len())
            .unwrap_or(0);
        out.push_str(&format!("\n- {range}: {rows} rows"));
    }
    Ok(out)
}

pub async fn batch_update_ranges(
    gateway: &dyn SheetsGateway,
    params: BatchUpdateRangesParams,
) -> Result<String> {
    let range_count = params.data.len();
    let request =
        ApiRequest::put(format!("/api/sheets/{}/batch-update", params.sheet_id)).body(json!({
            "data": params.data,
            "valueInputOption": params.value_input_option.as_str(),
        }));
    let response = gateway.execute(request).await?;

    Ok(format!(
        "Batch update applied to {} ranges: {} cells updated",
        range_count,
        field(&response, "totalUpdatedCells"),
    ))
}

pub async fn get_sheet_metadata(
    gateway: &dyn SheetsGateway,
    params: GetSheetMetadataParams,
) -> Result<String> {
    let request = ApiRequest::get(format!("/api/sheets/{}/metadata", params.sheet_id));
    let response = gateway.execute(request).await?;

    let properties = response.get("properties").cloned().unwrap_or(Value::Null);
    let sheets = response
        .get("sheets")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut out = format!(
        "Spreadsheet: {} ({})\nLocale: {} | Time zone: {}\nSheets ({}):",
        field(&properties, "title"),
        field(&response, "spreadsheetId"),
        field(&properties, "locale"),
        field(&properties, "timeZone"),
        sheets.len(),
    );
    for sheet in &sheets {
        let grid = sheet.get("gridProperties").cloned().unwrap_or(Value::Null);
        out.push_str(&format!(
            "\n- {} (id {}): {} rows x {} columns",
            field(sheet, "title"),
            field(sheet, "sheetId"),
            field(&grid, "rowCount"),
            field(&grid, "columnCount"),
        ));
    }
    Ok(out)
}

pub async fn delete_rows(gateway: &dyn SheetsGateway, params: DeleteRowsParams) -> Result<String> {
    anyhow::ensure!(
        params.end_index > params.start_index,
        "endIndex must be greater than startIndex"
    );

    let request = ApiRequest::delete(format!("/api/sheets/{}/rows", params.sheet_id))
        .query("startIndex", params.start_index.to_string())
        .query("endIndex", params.end_index.to_string())
        .query("sheetTabId", params.sheet_tab_id.to_string());
    gateway.execute(request).await?;

    // The endpoint publishes no response contract; report the submitted span.
    let deleted = params.end_index - params.start_index;
    Ok(format!(
        "Deleted rows {} to {} from sheet tab {} ({} rows total)",
        params.start_index,
        params.end_index - 1,
        params.sheet_tab_id,
        deleted,
    ))
}

pub async fn batch_update_spreadsheet(
    gateway: &dyn SheetsGateway,
    params: BatchUpdateSpreadsheetParams,
) -> Result<String> {
    let operation_count = params.requests.len();
    let request = ApiRequest::post(format!(
        "/api/sheets/{}/batch-update-spreadsheet",
        params.sheet_id
    ))
    .body(json!({ "requests": params.requests }));
    gateway.execute(request).await?;

    Ok(format!(
        "Submitted {} batch operations to spreadsheet {}",
        operation_count, params.sheet_id,
    ))
}

/// Scalar field lookup for display: strings come back bare, everything else
/// in its JSON form, absent/null as empty.
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn render_row(row: &Value) -> String {
    match row.as_array() {
        Some(cells) => render_cells(cells),
        None => render_scalar(row),
    }
}

fn render_cells(cells: &[Value]) -> String {
    cells
        .iter()
        .map(render_scalar)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_sheet_params_fill_defaults() {
        let params: ReadSheetParams = serde_json::from_value(json!({"sheetId": "abc"})).unwrap();
        assert_eq!(params.sheet_id, "abc");
        assert_eq!(params.range, "A:Z");
        assert_eq!(params.major_dimension, MajorDimension::Rows);
        assert_eq!(params.value_render_option, ValueRenderOption::FormattedValue);
    }

    #[test]
    fn write_sheet_params_require_range() {
        let result: Result<WriteSheetParams, _> =
            serde_json::from_value(json!({"sheetId": "abc", "values": [["x"]]}));
        assert_matches::assert_matches!(result, Err(_));
    }

    #[test]
    fn delete_rows_params_default_tab_to_zero() {
        let params: DeleteRowsParams =
            serde_json::from_value(json!({"sheetId": "abc", "startIndex": 2, "endIndex": 5}))
                .unwrap();
        assert_eq!(params.sheet_tab_id, 0);
    }

    #[test]
    fn enum_wire_names_are_screaming_snake() {
        let dim: MajorDimension = serde_json::from_value(json!("COLUMNS")).unwrap();
        assert_eq!(dim, MajorDimension::Columns);
        assert_eq!(dim.as_str(), "COLUMNS");

        let render: ValueRenderOption = serde_json::from_value(json!("UNFORMATTED_VALUE")).unwrap();
        assert_eq!(render.as_str(), "UNFORMATTED_VALUE");

        let input: ValueInputOption = serde_json::from_value(json!("RAW")).unwrap();
        assert_eq!(input.as_str(), "RAW");
        assert_eq!(ValueInputOption::default().as_str(), "USER_ENTERED");
    }

    #[test]
    fn render_row_joins_cells_with_pipes() {
        let row = json!(["Ada", 42, true, null]);
        assert_eq!(render_row(&row), "Ada | 42 | true | ");
    }

    #[test]
    fn field_renders_scalars_bare() {
        let value = json!({"id": "abc", "count": 7});
        assert_eq!(field(&value, "id"), "abc");
        assert_eq!(field(&value, "count"), "7");
        assert_eq!(field(&value, "missing"), "");
    }
}
