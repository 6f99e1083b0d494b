use serde::Serialize;

/// CSS class marking the container of the IP dropdown.
pub const IP_DROPDOWN_CLASS: &str = "field-ip_address";
/// CSS class marking the container of the manual IP input.
pub const MANUAL_IP_CLASS: &str = "field-manual_ip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    Block,
    None,
}

/// Visibility of the two mutually exclusive IP inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpInputVisibility {
    pub dropdown: Display,
    pub manual: Display,
}

/// Checked shows the manual input and hides the dropdown; unchecked the inverse.
pub fn toggle_ip_input(use_manual: bool) -> IpInputVisibility {
    if use_manual {
        IpInputVisibility {
            dropdown: Display::None,
            manual: Display::Block,
        }
    } else {
        IpInputVisibility {
            dropdown: Display::Block,
            manual: Display::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{toggle_ip_input, Display};

    #[test]
    fn checked_shows_manual_entry_only() {
        let vis = toggle_ip_input(true);
        assert_eq!(vis.dropdown, Display::None);
        assert_eq!(vis.manual, Display::Block);
    }

    #[test]
    fn unchecked_shows_dropdown_only_and_is_idempotent() {
        assert_eq!(toggle_ip_input(false), toggle_ip_input(false));
        assert_eq!(toggle_ip_input(false).dropdown, Display::Block);
        assert_eq!(toggle_ip_input(false).manual, Display::None);
    }
}
