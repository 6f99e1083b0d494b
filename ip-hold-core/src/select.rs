use serde::Serialize;

use crate::ident::IpId;
use crate::record::AvailableIp;

/// Label of the empty leading option.
pub const PLACEHOLDER_LABEL: &str = "---------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
            selected: false,
        }
    }
}

/// In-memory model of a single-choice `<select>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectWidget {
    options: Vec<SelectOption>,
}

impl Default for SelectWidget {
    fn default() -> Self {
        Self {
            options: vec![SelectOption::placeholder()],
        }
    }
}

impl SelectWidget {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace every option with the single empty placeholder.
    pub fn reset(&mut self) {
        self.options = vec![SelectOption::placeholder()];
    }

    /// Replace every option with the placeholder followed by `records` in order.
    ///
    /// The record whose id equals `selected` is marked selected.
    pub fn populate(&mut self, records: &[AvailableIp], selected: Option<&IpId>) {
        let mut options = Vec::with_capacity(records.len() + 1);
        options.push(SelectOption::placeholder());
        options.extend(records.iter().map(|record| SelectOption {
            value: record.id.to_string(),
            label: record.ip_address.clone(),
            selected: selected == Some(&record.id),
        }));
        self.options = options;
    }

    /// Current value; with nothing marked, the first option is the value.
    pub fn value(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.selected)
            .or_else(|| self.options.first())
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    /// Mark the option carrying `value` as the only selected one.
    ///
    /// Returns `false` and leaves the widget untouched when no option matches.
    pub fn select(&mut self, value: &str) -> bool {
        let wanted = IpId::parse(value);
        let Some(index) = self
            .options
            .iter()
            .position(|option| IpId::parse(&option.value) == wanted)
        else {
            return false;
        };
        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }
        true
    }

    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }
}
