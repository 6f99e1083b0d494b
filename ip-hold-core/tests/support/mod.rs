#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ip_hold_core::{
    ApiError, AvailableIp, CollectingNotifier, HoldPolicy, InventoryApi, IpId, Outcome,
    ReservationClient, ReservationSession, VlanId,
};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup {
        vlan: String,
        selected: Option<String>,
    },
    Reserve(String),
    Release(String),
    Beacon(String),
}

/// Records every call in issue order and answers from canned data.
#[derive(Default)]
pub struct FakeInventory {
    calls: Mutex<Vec<Call>>,
    records: Mutex<HashMap<String, Vec<AvailableIp>>>,
    refusals: Mutex<HashMap<String, String>>,
    unreachable: Mutex<bool>,
    reserve_gate: Option<Arc<Semaphore>>,
    release_gate: Option<Arc<Semaphore>>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve calls are recorded, then wait for a permit on `gate`.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            reserve_gate: Some(gate),
            ..Self::default()
        }
    }

    /// Release calls are recorded, then wait for a permit on `gate`.
    pub fn gated_release(gate: Arc<Semaphore>) -> Self {
        Self {
            release_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_records(self, vlan: &str, records: &[(u64, &str)]) -> Self {
        let records = records
            .iter()
            .map(|(id, addr)| AvailableIp {
                id: IpId::parse(&id.to_string()).expect("id"),
                ip_address: addr.to_string(),
            })
            .collect();
        self.records
            .lock()
            .expect("records")
            .insert(vlan.to_string(), records);
        self
    }

    pub fn refusing(self, ip: &str, message: &str) -> Self {
        self.refusals
            .lock()
            .expect("refusals")
            .insert(ip.to_string(), message.to_string());
        self
    }

    pub fn set_unreachable(&self, down: bool) {
        *self.unreachable.lock().expect("unreachable") = down;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls").push(call);
    }

    fn is_unreachable(&self) -> bool {
        *self.unreachable.lock().expect("unreachable")
    }
}

#[async_trait]
impl InventoryApi for FakeInventory {
    async fn available_ips(
        &self,
        vlan: &VlanId,
        selected: Option<&IpId>,
    ) -> Result<Vec<AvailableIp>, ApiError> {
        self.record(Call::Lookup {
            vlan: vlan.to_string(),
            selected: selected.map(ToString::to_string),
        });
        if self.is_unreachable() {
            return Err(ApiError::Status(503));
        }
        Ok(self
            .records
            .lock()
            .expect("records")
            .get(vlan.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn reserve(&self, ip: &IpId) -> Result<Outcome, ApiError> {
        self.record(Call::Reserve(ip.to_string()));
        if let Some(gate) = &self.reserve_gate {
            gate.acquire().await.expect("gate open").forget();
        }
        if self.is_unreachable() {
            return Err(ApiError::transport("connection refused"));
        }
        let refusal = self.refusals.lock().expect("refusals").get(ip.as_str()).cloned();
        Ok(match refusal {
            Some(message) => Outcome {
                success: false,
                message: Some(message),
            },
            None => Outcome {
                success: true,
                message: None,
            },
        })
    }

    async fn release(&self, ip: &IpId) -> Result<Outcome, ApiError> {
        self.record(Call::Release(ip.to_string()));
        if let Some(gate) = &self.release_gate {
            gate.acquire().await.expect("gate open").forget();
        }
        if self.is_unreachable() {
            return Err(ApiError::transport("connection refused"));
        }
        Ok(Outcome {
            success: true,
            message: None,
        })
    }

    fn release_beacon(&self, ip: &IpId) {
        self.record(Call::Beacon(ip.to_string()));
    }
}

pub struct Harness {
    pub api: Arc<FakeInventory>,
    pub notifier: Arc<CollectingNotifier>,
    pub session: Arc<ReservationSession>,
}

pub fn harness(api: FakeInventory, policy: HoldPolicy) -> Harness {
    let api = Arc::new(api);
    let notifier = Arc::new(CollectingNotifier::new());
    let client = ReservationClient::new(api.clone(), notifier.clone());
    Harness {
        api,
        notifier,
        session: Arc::new(ReservationSession::new(client, policy)),
    }
}

/// Let spawned tasks on the current-thread runtime run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn reserve(ip: &str) -> Call {
    Call::Reserve(ip.to_string())
}

pub fn release(ip: &str) -> Call {
    Call::Release(ip.to_string())
}

pub fn beacon(ip: &str) -> Call {
    Call::Beacon(ip.to_string())
}
