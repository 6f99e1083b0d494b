use serde::{Deserialize, Serialize};

use crate::ident::IpId;

/// One address offered by the availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableIp {
    pub id: IpId,
    pub ip_address: String,
}

/// Body of `GET /inventory/get-available-ips/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableIps {
    #[serde(default)]
    pub available_ips: Vec<AvailableIp>,
}

/// Body returned by the reserve and release endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// How a reserve or release call ended, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ack", content = "message", rename_all = "snake_case")]
pub enum Ack {
    /// The server answered `success: true`.
    Confirmed,
    /// The server answered `success: false`, possibly with a reason.
    Refused(Option<String>),
    /// No usable answer: transport failure or an unreadable body.
    Unreachable,
}

impl Ack {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Ack::Confirmed)
    }
}

impl From<Outcome> for Ack {
    fn from(outcome: Outcome) -> Self {
        if outcome.success {
            Ack::Confirmed
        } else {
            Ack::Refused(outcome.message)
        }
    }
}
