use crate::catalog;
use crate::error::{InvalidArgumentsError, ToolDisabledError, UnknownToolError};
use crate::state::AppState;
use crate::tools;
use anyhow::Result;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    transport::stdio,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const INSTRUCTIONS: &str = "\
Sheetlink MCP: spreadsheet operations over the hosted Sheetlink API.

WORKFLOW:
1) create_spreadsheet to start fresh, or get_sheet_metadata to orient on an \
existing spreadsheet (sheet tabs, dimensions)
2) read_sheet or batch_get_ranges to inspect data
3) write_sheet / append_to_sheet / batch_update_ranges to change values
4) clear_range / delete_rows to remove data
5) batch_update_spreadsheet for advanced operations (formatting, tab management)

RANGES: Use A1 notation (e.g., A1:D10). read_sheet defaults to A:Z.

Every tool returns a text summary. Failures come back as an error-flagged \
result whose text names the cause; the process itself never aborts on a bad \
call.";

#[derive(Clone)]
pub struct SheetsServer {
    state: Arc<AppState>,
}

impl SheetsServer {
    pub fn from_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn run_stdio(self) -> Result<()> {
        let service = self
            .serve(stdio())
            .await
            .inspect_err(|error| tracing::error!("serving error: {:?}", error))?;
        service.waiting().await?;
        Ok(())
    }

    /// Route one invocation and render its outcome. This is the single error
    /// boundary: whatever fails inside the branch comes back as an
    /// error-flagged result, never as a protocol error.
    pub async fn dispatch(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match self.try_dispatch(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(error) => {
                tracing::warn!(tool = name, error = %error, "tool invocation failed");
                CallToolResult::error(vec![Content::text(format!("Error: {error}"))])
            }
        }
    }

    async fn try_dispatch(&self, name: &str, arguments: JsonObject) -> Result<String> {
        tracing::info!(tool = name, "tool invocation requested");
        if !catalog::contains(name) {
            return Err(UnknownToolError::new(name).into());
        }
        if !self.state.config().is_tool_enabled(name) {
            return Err(ToolDisabledError::new(name).into());
        }

        let gateway = self.state.gateway();
        match name {
            "create_spreadsheet" => {
                tools::create_spreadsheet(gateway, decode(name, arguments)?).await
            }
            "read_sheet" => tools::read_sheet(gateway, decode(name, arguments)?).await,
            "write_sheet" => tools::write_sheet(gateway, decode(name, arguments)?).await,
            "append_to_sheet" => tools::append_to_sheet(gateway, decode(name, arguments)?).await,
            "clear_range" => tools::clear_range(gateway, decode(name, arguments)?).await,
            "batch_get_ranges" => tools::batch_get_ranges(gateway, decode(name, arguments)?).await,
            "batch_update_ranges" => {
                tools::batch_update_ranges(gateway, decode(name, arguments)?).await
            }
            "get_sheet_metadata" => {
                tools::get_sheet_metadata(gateway, decode(name, arguments)?).await
            }
            "delete_rows" => tools::delete_rows(gateway, decode(name, arguments)?).await,
            "batch_update_spreadsheet" => {
                tools::batch_update_spreadsheet(gateway, decode(name, arguments)?).await
            }
            other => Err(UnknownToolError::new(other).into()),
        }
    }
}

fn decode<P: DeserializeOwned>(tool: &str, arguments: JsonObject) -> Result<P> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|source| InvalidArgumentsError::new(tool, source).into())
}

impl ServerHandler for SheetsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: catalog::tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.dispatch(&request.name, arguments).await)
    }
}
