//! Per-form reservation state machine.
//!
//! A [`ReservationSession`] tracks the single IP this form currently holds. A
//! selection change releases the previous hold before reserving the new one,
//! clearing the selection releases it, and [`ReservationSession::unload`] fires
//! a one-way release when the form goes away.
//!
//! Selections are dispatched through a FIFO queue so the release/reserve pair
//! of one change reaches the server before the pair of the next change. The
//! held id is recorded when the change is decided, before the reserve call
//! returns, so an unload racing an in-flight reserve still releases it. An
//! unload landing while the release of the old hold is in flight cancels the
//! reserve that would have followed it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ident::IpId;
use crate::record::Ack;
use crate::reservation::ReservationClient;

/// When a reserve attempt counts as a hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPolicy {
    /// Hold whatever was last attempted, whatever the server answered.
    #[default]
    Optimistic,
    /// Only a confirmed reserve leaves the session holding the address.
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "ip", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Held(IpId),
}

/// Calls issued in response to one selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The selection matched the current hold; nothing was sent.
    Unchanged,
    /// Idle to held.
    Reserved { ip: IpId, ack: Ack },
    /// Held one address, now holds another.
    Replaced {
        released: IpId,
        reserved: IpId,
        ack: Ack,
    },
    /// Selection cleared; the previous hold was released.
    Released(IpId),
    /// The session was already unloaded.
    Ignored,
}

impl Transition {
    /// Server answer to the reserve this transition sent, if it sent one.
    pub fn reserve_ack(&self) -> Option<&Ack> {
        match self {
            Transition::Reserved { ack, .. } | Transition::Replaced { ack, .. } => Some(ack),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    reserved: Option<IpId>,
    generation: u64,
    unloaded: bool,
}

pub struct ReservationSession {
    client: ReservationClient,
    policy: HoldPolicy,
    inner: Mutex<Inner>,
    dispatch: tokio::sync::Mutex<()>,
}

impl ReservationSession {
    /// A fresh session always starts idle, whatever the form shows.
    pub fn new(client: ReservationClient, policy: HoldPolicy) -> Self {
        Self {
            client,
            policy,
            inner: Mutex::new(Inner::default()),
            dispatch: tokio::sync::Mutex::new(()),
        }
    }

    pub fn policy(&self) -> HoldPolicy {
        self.policy
    }

    pub fn state(&self) -> SessionState {
        match &self.lock().reserved {
            Some(ip) => SessionState::Held(ip.clone()),
            None => SessionState::Idle,
        }
    }

    pub fn reserved(&self) -> Option<IpId> {
        self.lock().reserved.clone()
    }

    pub fn is_unloaded(&self) -> bool {
        self.lock().unloaded
    }

    /// React to the IP selector changing to `value` (empty means cleared).
    pub async fn select(&self, value: &str) -> Transition {
        let _turn = self.dispatch.lock().await;
        let next = IpId::parse(value);

        let (previous, generation) = {
            let mut inner = self.lock();
            if inner.unloaded {
                return Transition::Ignored;
            }
            if inner.reserved == next {
                return Transition::Unchanged;
            }
            inner.generation += 1;
            let previous = std::mem::replace(&mut inner.reserved, next.clone());
            (previous, inner.generation)
        };

        if let Some(old) = &previous {
            self.client.release(old).await;
        }

        let Some(ip) = next else {
            return match previous {
                Some(released) => Transition::Released(released),
                None => Transition::Unchanged,
            };
        };

        // An unload while the release was in flight already beaconed `ip`.
        if self.superseded(generation) {
            debug!(ip = %ip, "session unloaded before reserve, skipping it");
            return match previous {
                Some(released) => Transition::Released(released),
                None => Transition::Ignored,
            };
        }

        let ack = self.client.reserve(&ip).await;
        if self.policy == HoldPolicy::Confirmed && !ack.is_confirmed() {
            self.forget_unconfirmed(&ip, generation);
        }

        match previous {
            Some(released) => Transition::Replaced {
                released,
                reserved: ip,
                ack,
            },
            None => Transition::Reserved { ip, ack },
        }
    }

    /// Release the current hold through the one-way transport and stop
    /// reacting to selections. Returns the address released, if any.
    ///
    /// Only the first call dispatches anything.
    pub fn unload(&self) -> Option<IpId> {
        let held = {
            let mut inner = self.lock();
            if inner.unloaded {
                return None;
            }
            inner.unloaded = true;
            inner.generation += 1;
            inner.reserved.take()
        };

        if let Some(ip) = &held {
            self.client.release_on_unload(ip);
        }
        held
    }

    fn superseded(&self, generation: u64) -> bool {
        let inner = self.lock();
        inner.unloaded || inner.generation != generation
    }

    fn forget_unconfirmed(&self, ip: &IpId, generation: u64) {
        let mut inner = self.lock();
        if inner.generation == generation && inner.reserved.as_ref() == Some(ip) {
            debug!(ip = %ip, "reservation not confirmed, back to idle");
            inner.reserved = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
