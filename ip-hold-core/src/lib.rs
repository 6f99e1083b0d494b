//! Client-side IP reservation protocol for the inventory host form.
//!
//! While an administrator edits a host, the address picked in the IP selector
//! is held on the server so nobody else can take it. The hold is released when
//! the selection is cleared or replaced, and once more through a one-way request
//! when the form is torn down.
//!
//! # Architecture
//!
//! - [`cookie`] — CSRF token extraction from a `Cookie` header
//! - [`ident`] — canonical identifiers so form values and JSON ids compare equal
//! - [`api`] — the [`InventoryApi`] seam implemented by real transports
//! - [`lookup`] — repopulates the IP selector for a parent network
//! - [`reservation`] — reserve/release calls with failures stopped at the boundary
//! - [`session`] — the per-form state machine holding at most one address
//! - [`toggle`] — dropdown vs manual-entry visibility
//! - [`form`] — wires the pieces to load, change and unload events
//!
//! Nothing here performs I/O directly; transports and user notification are
//! supplied by the caller.

pub mod api;
pub mod cookie;
pub mod form;
pub mod ident;
pub mod lookup;
pub mod notify;
pub mod record;
pub mod reservation;
pub mod select;
pub mod session;
pub mod toggle;

pub use api::{ApiError, InventoryApi};
pub use cookie::{csrf_token, get_token, CSRF_COOKIE};
pub use form::{HostForm, HostFormPage};
pub use ident::{IpId, VlanId};
pub use lookup::{IpLookup, LookupOutcome};
pub use notify::{CollectingNotifier, Notifier};
pub use record::{Ack, AvailableIp, AvailableIps, Outcome};
pub use reservation::ReservationClient;
pub use select::{SelectOption, SelectWidget};
pub use session::{HoldPolicy, ReservationSession, SessionState, Transition};
pub use toggle::{toggle_ip_input, IpInputVisibility};
