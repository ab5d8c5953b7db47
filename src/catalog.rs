//! Static tool catalog.
//!
//! Declares the ten supported operations with their names, descriptions, and
//! schemars-derived input schemas. Built once, never mutated; the "list
//! tools" request serves this verbatim.

use crate::tools::{
    AppendToSheetParams, BatchGetRangesParams, BatchUpdateRangesParams,
    BatchUpdateSpreadsheetParams, ClearRangeParams, CreateSpreadsheetParams, DeleteRowsParams,
    GetSheetMetadataParams, ReadSheetParams, WriteSheetParams,
};
use once_cell::sync::Lazy;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::Value;
use std::sync::Arc;

pub const TOOL_NAMES: [&str; 10] = [
    "create_spreadsheet",
    "read_sheet",
    "write_sheet",
    "append_to_sheet",
    "clear_range",
    "batch_get_ranges",
    "batch_update_ranges",
    "get_sheet_metadata",
    "delete_rows",
    "batch_update_spreadsheet",
];

static TOOLS: Lazy<Vec<Tool>> = Lazy::new(build);

pub fn tools() -> Vec<Tool> {
    TOOLS.clone()
}

pub fn contains(name: &str) -> bool {
    TOOL_NAMES.contains(&name)
}

fn build() -> Vec<Tool> {
    vec![
        tool::<CreateSpreadsheetParams>(
            "create_spreadsheet",
            "Create a new spreadsheet with the given title",
        ),
        tool::<ReadSheetParams>(
            "read_sheet",
            "Read values from a sheet range (defaults to A:Z)",
        ),
        tool::<WriteSheetParams>("write_sheet", "Write values to a specific range"),
        tool::<AppendToSheetParams>(
            "append_to_sheet",
            "Append rows after the last row with data",
        ),
        tool::<ClearRangeParams>("clear_range", "Clear all values from a range"),
        tool::<BatchGetRangesParams>("batch_get_ranges", "Read multiple ranges in one call"),
        tool::<BatchUpdateRangesParams>(
            "batch_update_ranges",
            "Write multiple ranges in one call",
        ),
        tool::<GetSheetMetadataParams>(
            "get_sheet_metadata",
            "Get spreadsheet properties and per-sheet dimensions",
        ),
        tool::<DeleteRowsParams>("delete_rows", "Delete a span of rows from a sheet tab"),
        tool::<BatchUpdateSpreadsheetParams>(
            "batch_update_spreadsheet",
            "Apply advanced batch operations (formatting, sheet management) to a spreadsheet",
        ),
    ]
}

fn tool<P: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(name, description, input_schema::<P>())
}

fn input_schema<P: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(P);
    match serde_json::to_value(&schema) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_all_ten_tools() {
        let tools = tools();
        assert_eq!(tools.len(), TOOL_NAMES.len());
        for name in TOOL_NAMES {
            assert!(
                tools.iter().any(|tool| tool.name == name),
                "catalog is missing {name}"
            );
        }
    }

    #[test]
    fn schemas_are_objects_with_properties() {
        for tool in tools() {
            assert_eq!(
                tool.input_schema.get("type").and_then(Value::as_str),
                Some("object"),
                "{} schema is not an object",
                tool.name
            );
            assert!(
                tool.input_schema.contains_key("properties"),
                "{} schema has no properties",
                tool.name
            );
        }
    }

    #[test]
    fn contains_rejects_unlisted_names() {
        assert!(contains("read_sheet"));
        assert!(!contains("delete_sheet"));
    }
}
