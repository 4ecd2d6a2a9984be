//! Traits abstracting `perform_rpc_request` over the two transports.
//!
//! The clients are generic over [`BlockingRpc`] and [`AsyncRpc`], which lets them be
//! tested against mocks and run over custom transports.

use mosaic_torrent_types::ClientError;
use serde_json::{Map, Value};

use crate::http::{AsyncHttpSend, HttpSend};
use crate::request::RpcMethod;
use crate::transport::{AsyncTransport, BlockingTransport};

/// Blocking RPC execution.
#[cfg_attr(test, mockall::automock)]
pub trait BlockingRpc {
    /// Call `method` with `arguments` and return the decoded reply.
    fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError>;
}

/// Non-blocking RPC execution.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub trait AsyncRpc {
    /// Call `method` with `arguments` and return the decoded reply.
    async fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError>;
}

impl<H: HttpSend> BlockingRpc for BlockingTransport<H> {
    fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        BlockingTransport::perform_rpc_request(self, method, arguments)
    }
}

impl<H: AsyncHttpSend> AsyncRpc for AsyncTransport<H> {
    async fn perform_rpc_request(
        &self,
        method: RpcMethod,
        arguments: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        AsyncTransport::perform_rpc_request(self, method, arguments).await
    }
}
