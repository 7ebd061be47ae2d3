//! Move controller USB identity, request codes, and report sizes.

#![deny(static_mut_refs)]

/// Sony USB Vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// Known product IDs under [`SONY_VENDOR_ID`].
pub mod product_ids {
    /// Move motion controller. The same PID is reported over USB and
    /// Bluetooth HID; the transport is told apart by the serial string
    /// (see `ConnectionKind::from_serial`).
    pub const MOTION_CONTROLLER: u16 = 0x03D5;
}

/// Request codes carried in byte 0 of every report, in both directions.
pub mod request {
    /// Inbound interrupt input state.
    pub const GET_INPUT: u8 = 0x01;
    /// Outbound interrupt LED/rumble update.
    pub const SET_LEDS: u8 = 0x02;
    /// Feature read of the paired host Bluetooth address.
    pub const GET_BT_ADDR: u8 = 0x04;
    /// Feature write of the host Bluetooth address to pair with.
    pub const SET_BT_ADDR: u8 = 0x05;
    /// Feature read of factory calibration blocks.
    pub const GET_CALIBRATION: u8 = 0x10;
}

/// Interrupt-in input report size.
pub const INPUT_REPORT_LEN: usize = 49;

/// Interrupt-out LED/rumble report size.
pub const LED_REPORT_LEN: usize = 49;

/// Calibration feature report size.
pub const CALIBRATION_REPORT_LEN: usize = 49;

/// Get-Bluetooth-address feature reply size.
pub const BT_ADDR_GET_LEN: usize = 16;

/// Set-Bluetooth-address feature frame size.
pub const BT_ADDR_SET_LEN: usize = 23;
