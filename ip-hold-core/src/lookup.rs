use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::InventoryApi;
use crate::ident::{IpId, VlanId};
use crate::select::SelectWidget;

/// What a lookup did to the target widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Parent was empty: widget reset to the placeholder, nothing requested.
    Cleared,
    /// Widget repopulated with this many records (placeholder excluded).
    Populated(usize),
    /// Request failed; the widget still shows its previous options.
    Unchanged,
}

/// Repopulates the IP selector from the availability endpoint.
#[derive(Clone)]
pub struct IpLookup {
    api: Arc<dyn InventoryApi>,
}

impl IpLookup {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    pub async fn load_available_ips(
        &self,
        widget: &mut SelectWidget,
        parent: &str,
        selected: Option<&str>,
    ) -> LookupOutcome {
        let Some(vlan) = VlanId::parse(parent) else {
            widget.reset();
            return LookupOutcome::Cleared;
        };
        let selected = selected.and_then(IpId::parse);

        match self.api.available_ips(&vlan, selected.as_ref()).await {
            Ok(records) => {
                debug!(vlan = %vlan, count = records.len(), "loaded available IPs");
                widget.populate(&records, selected.as_ref());
                LookupOutcome::Populated(records.len())
            }
            Err(err) => {
                warn!(vlan = %vlan, error = %err, "available IP lookup failed");
                LookupOutcome::Unchanged
            }
        }
    }
}
