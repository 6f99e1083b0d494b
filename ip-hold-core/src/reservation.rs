use std::sync::Arc;

use tracing::{debug, error};

use crate::api::InventoryApi;
use crate::ident::IpId;
use crate::notify::Notifier;
use crate::record::Ack;

/// Shown when the server refuses a reservation without saying why.
pub const DEFAULT_REFUSAL: &str = "The IP address could not be reserved.";

/// Issues reserve and release calls and stops every failure at this boundary.
///
/// A refused reservation is surfaced through the [`Notifier`]. Refused releases
/// and transport or decode failures are only logged, and none are retried.
#[derive(Clone)]
pub struct ReservationClient {
    api: Arc<dyn InventoryApi>,
    notifier: Arc<dyn Notifier>,
}

impl ReservationClient {
    pub fn new(api: Arc<dyn InventoryApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn reserve(&self, ip: &IpId) -> Ack {
        let ack = match self.api.reserve(ip).await {
            Ok(outcome) => Ack::from(outcome),
            Err(err) => {
                error!(ip = %ip, error = %err, "error during IP reservation");
                return Ack::Unreachable;
            }
        };

        match &ack {
            Ack::Confirmed => debug!(ip = %ip, "IP reserved"),
            Ack::Refused(message) => {
                self.notifier
                    .alert(message.as_deref().unwrap_or(DEFAULT_REFUSAL));
            }
            Ack::Unreachable => {}
        }
        ack
    }

    pub async fn release(&self, ip: &IpId) -> Ack {
        let ack = match self.api.release(ip).await {
            Ok(outcome) => Ack::from(outcome),
            Err(err) => {
                error!(ip = %ip, error = %err, "error during IP release");
                return Ack::Unreachable;
            }
        };

        match &ack {
            Ack::Confirmed => debug!(ip = %ip, "IP released"),
            Ack::Refused(message) => {
                error!(ip = %ip, message = message.as_deref().unwrap_or(""), "error releasing IP");
            }
            Ack::Unreachable => {}
        }
        ack
    }

    /// Fire the one-way release used during teardown. Nothing is awaited.
    pub fn release_on_unload(&self, ip: &IpId) {
        debug!(ip = %ip, "dispatching unload release");
        self.api.release_beacon(ip);
    }
}
