//! Sony Move motion controller HID protocol: report decoding and encoding.
//!
//! This crate is intentionally I/O-free and allocation-free. It provides
//! pure functions and types that can be tested and fuzzed without hardware
//! or OS-level HID plumbing: the 49-byte interrupt report layouts, the
//! feature-report frames for Bluetooth pairing-address access, and the
//! decoders for the packed button/trigger/IMU/magnetometer payload.
//!
//! All layouts are explicit byte offsets. The controller firmware lays the
//! reports out byte-by-byte on the wire; relying on compiler struct layout
//! would tie correctness to target alignment rules.

#![deny(static_mut_refs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod ids;
pub mod input;
pub mod output;
pub mod types;

pub use ids::{
    BT_ADDR_GET_LEN, BT_ADDR_SET_LEN, CALIBRATION_REPORT_LEN, INPUT_REPORT_LEN, LED_REPORT_LEN,
    SONY_VENDOR_ID, product_ids, request,
};
pub use input::{MoveInputReport, MoveInputState, parse_input_report};
pub use output::{
    LedReport, build_get_bt_addr_request, build_get_calibration_request, build_set_bt_addr,
    parse_bt_addr_reply,
};
pub use types::{AxisTriple, BtAddress, Button, ConnectionKind};
