use async_trait::async_trait;
use thiserror::Error;

use crate::ident::{IpId, VlanId};
use crate::record::{AvailableIp, Outcome};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by an [`InventoryApi`] transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
    /// The server answered with a status the caller does not accept.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The response body was not the expected JSON document.
    #[error("failed to decode response: {0}")]
    Decode(#[source] BoxError),
}

impl ApiError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ApiError::Transport(err.into())
    }

    pub fn decode(err: impl Into<BoxError>) -> Self {
        ApiError::Decode(err.into())
    }
}

/// Server endpoints the host form talks to.
///
/// The request/response calls are awaited by the caller. `release_beacon` is
/// the one-way path used while the form is being torn down: it must start the
/// request before returning and must not wait for, or report, any response.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn available_ips(
        &self,
        vlan: &VlanId,
        selected: Option<&IpId>,
    ) -> Result<Vec<AvailableIp>, ApiError>;

    async fn reserve(&self, ip: &IpId) -> Result<Outcome, ApiError>;

    async fn release(&self, ip: &IpId) -> Result<Outcome, ApiError>;

    fn release_beacon(&self, ip: &IpId);
}
