//! Command-line client for the inventory host form's IP reservations.
//!
//! Drives [`ip_hold_core`] against a live inventory server:
//!
//! - [`config`] — TOML connection settings with an embedded default
//! - [`http`] — reqwest transport implementing [`ip_hold_core::InventoryApi`]
//! - [`script`] — form-event scripts replayed by `ip-hold session`
//! - [`report`] — terminal rendering of options, form state and outcomes

pub mod config;
pub mod http;
pub mod report;
pub mod script;
