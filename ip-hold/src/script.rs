use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One user action replayed against the host form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Parent selector changed; empty means cleared.
    Vlan(String),
    /// IP selector changed; empty means cleared.
    Ip(String),
    /// Manual-entry checkbox set or unset.
    Manual(bool),
    /// Form torn down.
    Unload,
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormEvent::Vlan(v) if v.is_empty() => f.write_str("vlan (cleared)"),
            FormEvent::Vlan(v) => write!(f, "vlan {v}"),
            FormEvent::Ip(v) if v.is_empty() => f.write_str("ip (cleared)"),
            FormEvent::Ip(v) => write!(f, "ip {v}"),
            FormEvent::Manual(true) => f.write_str("manual on"),
            FormEvent::Manual(false) => f.write_str("manual off"),
            FormEvent::Unload => f.write_str("unload"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown event '{word}'")]
    UnknownEvent { line: usize, word: String },
    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
}

impl FromStr for FormEvent {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut words = raw.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments in '{}'", raw.trim()));
        }

        match verb {
            "vlan" => Ok(FormEvent::Vlan(arg.unwrap_or_default().to_string())),
            "ip" => Ok(FormEvent::Ip(arg.unwrap_or_default().to_string())),
            "manual" => match arg {
                Some("on") | Some("true") => Ok(FormEvent::Manual(true)),
                Some("off") | Some("false") => Ok(FormEvent::Manual(false)),
                _ => Err("manual expects 'on' or 'off'".to_string()),
            },
            "unload" if arg.is_none() => Ok(FormEvent::Unload),
            "unload" => Err("unload takes no argument".to_string()),
            other => Err(format!("unknown event '{other}'")),
        }
    }
}

/// Parse a session script: one event per line, blank lines and `#` comments
/// ignored.
pub fn parse_script(raw: &str) -> Result<Vec<FormEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line_no = index + 1;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let verb = content.split_whitespace().next().unwrap_or_default();
        if !matches!(verb, "vlan" | "ip" | "manual" | "unload") {
            return Err(ScriptError::UnknownEvent {
                line: line_no,
                word: verb.to_string(),
            });
        }
        let event = content.parse().map_err(|message| ScriptError::Invalid {
            line: line_no,
            message,
        })?;
        events.push(event);
    }
    Ok(events)
}
