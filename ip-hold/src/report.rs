use colored::Colorize;
use ip_hold_core::form::{IP_SELECT_ID, MANUAL_CHECKBOX_ID, VLAN_SELECT_ID};
use ip_hold_core::toggle::Display;
use ip_hold_core::{Ack, HostForm, IpId, Notifier, SelectWidget, SessionState, Transition};
use serde::Serialize;

/// Prints alerts to stderr as they happen.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {message}", "ALERT".red().bold());
    }
}

/// One step of a replayed form session, as emitted in JSON mode.
#[derive(Debug, Serialize)]
pub struct SessionStep<'a> {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Server answer to the reserve sent by this step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<Ack>,
    pub form: &'a HostForm,
    pub session: SessionState,
    pub alerts: Vec<String>,
}

/// Render selector options, one per line, marking the selected one.
pub fn render_options(widget: &SelectWidget) -> String {
    let mut out = Vec::new();
    for option in widget.options() {
        let marker = if option.selected { "[x]" } else { "[ ]" };
        let value = if option.value.is_empty() {
            "\"\"".to_string()
        } else {
            option.value.clone()
        };
        let line = format!("{marker} {value:<6} {}", option.label);
        out.push(if option.selected {
            line.green().to_string()
        } else {
            line
        });
    }
    out.join("\n")
}

/// Render the widget state of the form plus the current hold on one line.
pub fn render_form(form: &HostForm, state: &SessionState) -> String {
    let held = match state {
        SessionState::Idle => "none".dimmed().to_string(),
        SessionState::Held(ip) => ip.to_string().cyan().to_string(),
    };
    format!(
        "{VLAN_SELECT_ID}={} {IP_SELECT_ID}={} {MANUAL_CHECKBOX_ID}={} dropdown={} manual={} held={held}",
        display_value(&form.vlan),
        display_value(form.ip_select.value()),
        form.use_manual_ip,
        display_name(form.visibility.dropdown),
        display_name(form.visibility.manual),
    )
}

pub fn render_ack(action: &str, ip: &IpId, ack: &Ack) -> String {
    match ack {
        Ack::Confirmed => format!("{action} ip={ip} success=true").green().to_string(),
        Ack::Refused(message) => format!(
            "{action} ip={ip} success=false message={}",
            message.as_deref().unwrap_or("")
        )
        .yellow()
        .to_string(),
        Ack::Unreachable => format!("{action} ip={ip} unreachable").red().to_string(),
    }
}

pub fn render_transition(transition: &Transition) -> String {
    match transition {
        Transition::Unchanged => "no change".dimmed().to_string(),
        Transition::Ignored => "ignored (unloaded)".dimmed().to_string(),
        Transition::Reserved { ip, ack } => render_ack("reserve", ip, ack),
        Transition::Replaced {
            released,
            reserved,
            ack,
        } => format!(
            "release ip={released}; {}",
            render_ack("reserve", reserved, ack)
        ),
        Transition::Released(ip) => format!("release ip={ip}"),
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "\"\""
    } else {
        value
    }
}

fn display_name(display: Display) -> &'static str {
    match display {
        Display::Block => "block",
        Display::None => "none",
    }
}
