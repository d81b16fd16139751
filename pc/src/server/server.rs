//! Stdio server - line-delimited JSON-RPC over any async reader/writer pair

use std::sync::Arc;

use eyre::{Context, Result};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::messages::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, ListToolsResult, RpcError, RpcRequest, RpcResponse,
};
use crate::tools::{ToolCall, ToolContext, ToolExecutor};

/// Protocol revision reported by `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "promptcatalog";

/// Dispatches JSON-RPC requests to the tool executor
pub struct Server {
    executor: Arc<ToolExecutor>,
    ctx: ToolContext,
}

impl Server {
    pub fn new(executor: Arc<ToolExecutor>, ctx: ToolContext) -> Self {
        debug!(tools = executor.tool_names().len(), "Server::new: called");
        Self { executor, ctx }
    }

    /// Handle one raw line; `None` when no response is due
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "handle_line: malformed JSON");
                return Some(RpcResponse::error(Value::Null, RpcError::parse_error(e)));
            }
        };

        if !value.is_object() {
            warn!("handle_line: request is not a JSON object");
            return Some(RpcResponse::error(
                Value::Null,
                RpcError::invalid_request("expected a single request object"),
            ));
        }

        // An object without an id is a notification, so a bad one is dropped
        let id = value.get("id").cloned();
        let request: RpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "handle_line: invalid request");
                return id.map(|id| RpcResponse::error(id, RpcError::invalid_request(e)));
            }
        };

        self.handle(request).await
    }

    /// Handle a parsed request; notifications yield `None`
    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!(method = %request.method, id = ?request.id, "Server::handle: called");
        let outcome = self.dispatch(&request).await;

        let id = match request.id {
            Some(id) => id,
            None => {
                if let Err(e) = outcome {
                    debug!(method = %request.method, error = %e.message, "Server::handle: notification failed");
                }
                return None;
            }
        };

        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::error(id, error),
        })
    }

    async fn dispatch(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => to_value(ListToolsResult {
                tools: self.executor.definitions(),
            }),
            "tools/call" => self.call_tool(request.params.clone()).await,
            method if method.starts_with("notifications/") => Ok(Value::Null),
            method => Err(RpcError::method_not_found(method)),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: CallToolParams = match params {
            Some(p) => serde_json::from_value(p).map_err(RpcError::invalid_params)?,
            None => return Err(RpcError::invalid_params("missing params")),
        };
        let input = match params.arguments {
            None | Some(Value::Null) => json!({}),
            Some(args @ Value::Object(_)) => args,
            Some(other) => return Err(RpcError::invalid_params(format!("arguments must be an object, got {}", other))),
        };

        info!(tool = %params.name, "call_tool: executing");
        let result = self.executor.execute(&ToolCall::new(params.name, input), &self.ctx).await;
        to_value(CallToolResult::from(result))
    }

    /// Serve until the reader reaches EOF
    ///
    /// Every request runs in its own task. Responses go through one writer
    /// task, so lines are never interleaved but may arrive out of order.
    pub async fn serve<R, W>(self: Arc<Self>, reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!("serve: started");
        let (tx, mut rx) = mpsc::unbounded_channel::<RpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response).context("Failed to serialize response")?;
                writer.write_all(line.as_bytes()).await.context("Failed to write response")?;
                writer.write_all(b"\n").await.context("Failed to write newline")?;
                writer.flush().await.context("Failed to flush response")?;
            }
            Ok::<(), eyre::Report>(())
        });

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read request")? {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_line(&line).await
                    && tx.send(response).is_err()
                {
                    warn!("serve: writer closed, dropping response");
                }
            });
        }

        info!("serve: input closed, draining responses");
        drop(tx);
        writer_task.await.context("Writer task panicked")??;
        Ok(())
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
}
