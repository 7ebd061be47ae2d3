//! Move motion controller device session.
//!
//! This crate owns the I/O side of the driver: it opens the controller
//! through a [`HidTransport`], keeps the cached outbound LED/rumble report
//! and the last received input report, and exposes the public operations:
//! LED and rumble control, Bluetooth pairing-address access, non-blocking
//! sensor polling, and connection-type classification.
//!
//! The session is purely caller-driven: no threads, no event loop. One
//! [`MoveController::poll`] call retrieves at most one HID report; if the
//! OS queue holds several, the caller loops until `poll` reports no frame.
//!
//! Wire formats live in `openmove-hid-psmove-protocol`; this crate only
//! moves the bytes.
//!
//! [`HidTransport`]: openmove_hid_common::HidTransport

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod controller;
pub mod error;
pub mod transport;

pub use controller::MoveController;
pub use error::MoveDeviceError;
pub use transport::{HidapiTransport, enumerate_controllers};

pub use openmove_hid_psmove_protocol as protocol;
