use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use ip_hold_core::{
    csrf_token, ApiError, AvailableIp, AvailableIps, InventoryApi, IpId, Outcome, VlanId,
};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;

/// Header Django reads the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// [`InventoryApi`] over HTTP against the inventory web application.
pub struct HttpInventory {
    client: Client,
    base_url: String,
    app_label: String,
    cookie: String,
    beacons: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpInventory {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_label: config.app_label.clone(),
            cookie: config.cookie.clone(),
            beacons: Mutex::new(Vec::new()),
        }
    }

    pub fn availability_url(&self) -> String {
        format!("{}/inventory/get-available-ips/", self.base_url)
    }

    pub fn reserve_url(&self) -> String {
        self.host_action_url("reserve-ip")
    }

    pub fn release_url(&self) -> String {
        self.host_action_url("release-ip")
    }

    /// Wait up to `grace` for dispatched unload releases to finish sending.
    ///
    /// Their responses are never inspected. Returns `false` if some were still
    /// in flight when the grace period ran out.
    pub async fn settle(&self, grace: Duration) -> bool {
        let pending: Vec<JoinHandle<()>> = self
            .beacons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        if pending.is_empty() {
            return true;
        }

        let count = pending.len();
        let drained = tokio::time::timeout(grace, async move {
            for handle in pending {
                let _ = handle.await;
            }
        })
        .await
        .is_ok();
        if !drained {
            warn!(count, "unload releases still in flight after grace period");
        }
        drained
    }

    fn host_action_url(&self, action: &str) -> String {
        format!("{}/admin/{}/host/{action}/", self.base_url, self.app_label)
    }

    fn post_ip(&self, url: String, ip: &IpId) -> RequestBuilder {
        let mut request = self.client.post(url).form(&[("ip_id", ip.as_str())]);
        if !self.cookie.trim().is_empty() {
            request = request.header(COOKIE, self.cookie.as_str());
        }
        match csrf_token(&self.cookie) {
            Some(token) => request.header(CSRF_HEADER, token),
            None => {
                debug!("no csrftoken cookie configured; sending without {CSRF_HEADER}");
                request
            }
        }
    }

    async fn send_for_outcome(request: RequestBuilder) -> Result<Outcome, ApiError> {
        let response = request.send().await.map_err(ApiError::transport)?;
        let body = response.bytes().await.map_err(ApiError::transport)?;
        serde_json::from_slice(&body).map_err(ApiError::decode)
    }
}

#[async_trait]
impl InventoryApi for HttpInventory {
    async fn available_ips(
        &self,
        vlan: &VlanId,
        selected: Option<&IpId>,
    ) -> Result<Vec<AvailableIp>, ApiError> {
        let mut query = vec![("vlan", vlan.as_str())];
        if let Some(selected) = selected {
            query.push(("selected_ip", selected.as_str()));
        }

        let response = self
            .client
            .get(self.availability_url())
            .query(&query)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ApiError::transport)?;
        let parsed: AvailableIps = serde_json::from_slice(&body).map_err(ApiError::decode)?;
        Ok(parsed.available_ips)
    }

    async fn reserve(&self, ip: &IpId) -> Result<Outcome, ApiError> {
        Self::send_for_outcome(self.post_ip(self.reserve_url(), ip)).await
    }

    async fn release(&self, ip: &IpId) -> Result<Outcome, ApiError> {
        Self::send_for_outcome(self.post_ip(self.release_url(), ip)).await
    }

    fn release_beacon(&self, ip: &IpId) {
        let request = self.post_ip(self.release_url(), ip);
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(ip = %ip, "no async runtime available; unload release dropped");
            return;
        };

        let ip = ip.clone();
        let handle = runtime.spawn(async move {
            match request.send().await {
                Ok(response) => {
                    debug!(ip = %ip, status = %response.status(), "unload release sent")
                }
                Err(err) => debug!(ip = %ip, error = %err, "unload release failed"),
            }
        });
        self.beacons
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}
