//! Stdio JSON-RPC server exposing the catalog tools

pub mod messages;
mod server;

pub use messages::{RpcError, RpcRequest, RpcResponse};
pub use server::{PROTOCOL_VERSION, SERVER_NAME, Server};
