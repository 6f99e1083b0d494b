use std::sync::Arc;

use serde::Serialize;

use crate::api::InventoryApi;
use crate::ident::IpId;
use crate::lookup::{IpLookup, LookupOutcome};
use crate::notify::Notifier;
use crate::reservation::ReservationClient;
use crate::select::SelectWidget;
use crate::session::{HoldPolicy, ReservationSession, SessionState, Transition};
use crate::toggle::{toggle_ip_input, IpInputVisibility};

/// Element id of the parent (VLAN) selector.
pub const VLAN_SELECT_ID: &str = "id_vlan";
/// Element id of the IP selector.
pub const IP_SELECT_ID: &str = "id_ip_address";
/// Element id of the manual-entry checkbox.
pub const MANUAL_CHECKBOX_ID: &str = "id_use_manual_ip";

/// Widget state of the host form as the behaviour layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostForm {
    pub vlan: String,
    pub ip_select: SelectWidget,
    pub use_manual_ip: bool,
    pub visibility: IpInputVisibility,
}

impl Default for HostForm {
    fn default() -> Self {
        Self {
            vlan: String::new(),
            ip_select: SelectWidget::default(),
            use_manual_ip: false,
            visibility: toggle_ip_input(false),
        }
    }
}

impl HostForm {
    /// A form as rendered by the server, possibly pre-filled for an edit.
    pub fn prefilled(vlan: &str, ip_select: SelectWidget, use_manual_ip: bool) -> Self {
        Self {
            vlan: vlan.to_string(),
            ip_select,
            use_manual_ip,
            visibility: toggle_ip_input(use_manual_ip),
        }
    }
}

/// The form plus the handlers wired to its load, change and unload events.
pub struct HostFormPage {
    form: HostForm,
    lookup: IpLookup,
    session: ReservationSession,
}

impl HostFormPage {
    pub fn new(
        form: HostForm,
        api: Arc<dyn InventoryApi>,
        notifier: Arc<dyn Notifier>,
        policy: HoldPolicy,
    ) -> Self {
        let client = ReservationClient::new(Arc::clone(&api), notifier);
        Self {
            form,
            lookup: IpLookup::new(api),
            session: ReservationSession::new(client, policy),
        }
    }

    pub fn form(&self) -> &HostForm {
        &self.form
    }

    pub fn session(&self) -> &ReservationSession {
        &self.session
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Establish visibility and, when editing, load the choices for the
    /// pre-selected parent keeping the current IP selected. The pre-selected
    /// IP is not reserved.
    pub async fn on_load(&mut self) -> Option<LookupOutcome> {
        self.apply_toggle();
        if self.form.vlan.trim().is_empty() {
            return None;
        }
        let selected = self.form.ip_select.value().to_string();
        let outcome = self
            .lookup
            .load_available_ips(&mut self.form.ip_select, &self.form.vlan, Some(&selected))
            .await;
        Some(outcome)
    }

    /// Repopulating the IP selector does not count as an IP change, so a
    /// current hold survives a parent change.
    pub async fn on_parent_change(&mut self, vlan: &str) -> LookupOutcome {
        self.form.vlan = vlan.to_string();
        self.lookup
            .load_available_ips(&mut self.form.ip_select, vlan, None)
            .await
    }

    /// Select `value` in the IP selector and feed the reservation session.
    ///
    /// Values with no matching option are ignored, as a browser would.
    pub async fn on_ip_change(&mut self, value: &str) -> Option<Transition> {
        if !self.form.ip_select.select(value) {
            return None;
        }
        let current = self.form.ip_select.value().to_string();
        Some(self.session.select(&current).await)
    }

    pub fn on_manual_toggle(&mut self, checked: bool) -> IpInputVisibility {
        self.form.use_manual_ip = checked;
        self.apply_toggle()
    }

    pub fn on_unload(&self) -> Option<IpId> {
        self.session.unload()
    }

    fn apply_toggle(&mut self) -> IpInputVisibility {
        self.form.visibility = toggle_ip_input(self.form.use_manual_ip);
        self.form.visibility
    }
}
