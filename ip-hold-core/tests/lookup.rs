mod support;

use std::sync::Arc;

use ip_hold_core::select::PLACEHOLDER_LABEL;
use ip_hold_core::{IpLookup, LookupOutcome, SelectWidget};
use pretty_assertions::assert_eq;

use support::{Call, FakeInventory};

fn lookup(api: &Arc<FakeInventory>) -> IpLookup {
    IpLookup::new(api.clone())
}

#[tokio::test]
async fn empty_parent_resets_without_request() {
    let api = Arc::new(FakeInventory::new().with_records("10", &[(1, "10.0.0.1")]));
    let mut widget = SelectWidget::default();
    lookup(&api)
        .load_available_ips(&mut widget, "10", None)
        .await;
    assert_eq!(widget.options().len(), 2);

    for parent in ["", "   "] {
        let outcome = lookup(&api).load_available_ips(&mut widget, parent, None).await;
        assert_eq!(outcome, LookupOutcome::Cleared);
        assert_eq!(widget.values(), vec![""]);
        assert_eq!(widget.labels(), vec![PLACEHOLDER_LABEL]);
    }
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn populates_placeholder_then_records_in_server_order() {
    let api = Arc::new(
        FakeInventory::new().with_records("10", &[(1, "10.0.0.1"), (2, "10.0.0.2")]),
    );
    let mut widget = SelectWidget::default();

    let outcome = lookup(&api)
        .load_available_ips(&mut widget, "10", None)
        .await;

    assert_eq!(outcome, LookupOutcome::Populated(2));
    assert_eq!(widget.values(), vec!["", "1", "2"]);
    assert_eq!(widget.labels(), vec![PLACEHOLDER_LABEL, "10.0.0.1", "10.0.0.2"]);
    assert!(widget.options().iter().all(|o| !o.selected));
    assert_eq!(
        api.calls(),
        vec![Call::Lookup {
            vlan: "10".to_string(),
            selected: None
        }]
    );
}

#[tokio::test]
async fn marks_requested_selection_with_loose_id_match() {
    let api = Arc::new(
        FakeInventory::new().with_records("3", &[(4, "10.0.3.4"), (12, "10.0.3.12")]),
    );
    let mut widget = SelectWidget::default();

    lookup(&api)
        .load_available_ips(&mut widget, "3", Some("012"))
        .await;

    let selected: Vec<&str> = widget
        .options()
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(selected, vec!["12"]);
    assert_eq!(
        api.calls(),
        vec![Call::Lookup {
            vlan: "3".to_string(),
            selected: Some("12".to_string())
        }]
    );
}

#[tokio::test]
async fn failed_lookup_keeps_previous_options() {
    let api = Arc::new(FakeInventory::new().with_records("10", &[(1, "10.0.0.1")]));
    let mut widget = SelectWidget::default();
    lookup(&api)
        .load_available_ips(&mut widget, "10", None)
        .await;
    let before = widget.clone();

    api.set_unreachable(true);
    let outcome = lookup(&api)
        .load_available_ips(&mut widget, "20", None)
        .await;

    assert_eq!(outcome, LookupOutcome::Unchanged);
    assert_eq!(widget, before);
}
