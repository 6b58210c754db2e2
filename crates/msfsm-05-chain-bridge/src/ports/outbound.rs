//! Outbound port: raw JSON-RPC access to a node.

use crate::errors::RpcError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Sends one JSON-RPC request and returns its `result` (`null` included).
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        (**self).request(method, params).await
    }
}
