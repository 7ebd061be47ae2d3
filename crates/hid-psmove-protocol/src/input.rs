//! Move controller HID input report decoding.
//!
//! All functions are pure and allocation-free.
//!
//! # Input report format (49 bytes, request code 0x01)
//!
//! The controller streams one interrupt report per sensor frame:
//!
//! - bytes 1..=4: four button bytes, composed into a 32-bit mask
//! - byte 4 low nibble: 4-bit frame sequence counter
//! - byte 6: analog trigger, 0..=255
//! - bytes 13..=24: accelerometer, two consecutive 16-bit sub-frames per axis
//! - bytes 25..=36: gyroscope, same dual-frame layout
//! - bytes 38..=42: magnetometer, three 12-bit values packed with nibble
//!   alignment
//!
//! The IMU ships unsigned samples centered at 0x8000; decoding averages the
//! two sub-frames and re-centers so the unsigned zero-point maps to 0.

#![deny(static_mut_refs)]

use crate::ids::{INPUT_REPORT_LEN, request};
use crate::types::AxisTriple;

/// Byte offsets within the input report.
pub mod offsets {
    pub const BUTTONS1: usize = 1;
    pub const BUTTONS2: usize = 2;
    pub const BUTTONS3: usize = 3;
    pub const BUTTONS4: usize = 4;
    pub const TRIGGER: usize = 6;
    pub const MAG_START: usize = 38;

    /// The four bytes of one dual-frame IMU axis: each sub-frame is a
    /// 16-bit unsigned sample split into low and high bytes.
    #[derive(Debug, Clone, Copy)]
    pub struct AxisOffsets {
        pub low1: usize,
        pub high1: usize,
        pub low2: usize,
        pub high2: usize,
    }

    pub const ACCEL_X: AxisOffsets = AxisOffsets { low1: 13, high1: 14, low2: 19, high2: 20 };
    pub const ACCEL_Y: AxisOffsets = AxisOffsets { low1: 15, high1: 16, low2: 21, high2: 22 };
    pub const ACCEL_Z: AxisOffsets = AxisOffsets { low1: 17, high1: 18, low2: 23, high2: 24 };
    pub const GYRO_X: AxisOffsets = AxisOffsets { low1: 25, high1: 26, low2: 31, high2: 32 };
    pub const GYRO_Y: AxisOffsets = AxisOffsets { low1: 27, high1: 28, low2: 33, high2: 34 };
    pub const GYRO_Z: AxisOffsets = AxisOffsets { low1: 29, high1: 30, low2: 35, high2: 36 };
}

/// One raw 49-byte input report, validated at construction.
///
/// The default value is the all-zero report a fresh session caches before
/// the first frame arrives; its accessors yield the all-zero decodings
/// (buttons 0, IMU axes at −0x8000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInputReport {
    raw: [u8; INPUT_REPORT_LEN],
}

impl Default for MoveInputReport {
    fn default() -> Self {
        Self { raw: [0; INPUT_REPORT_LEN] }
    }
}

impl MoveInputReport {
    /// Wrap a raw interrupt report.
    ///
    /// Returns `None` if `data` is shorter than the full report or does not
    /// begin with the input request code.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let raw: [u8; INPUT_REPORT_LEN] = data.get(..INPUT_REPORT_LEN)?.try_into().ok()?;
        if raw[0] != request::GET_INPUT {
            return None;
        }
        Some(Self { raw })
    }

    pub const fn as_bytes(&self) -> &[u8; INPUT_REPORT_LEN] {
        &self.raw
    }

    /// The composed 32-bit button mask, wire bits preserved verbatim:
    /// buttons2 in bits 0..=7, buttons1 in bits 8..=15, the PS bit of
    /// buttons3 in bit 16, the high nibble of buttons4 in bits 17..=20.
    pub fn buttons(&self) -> u32 {
        let b1 = self.raw[offsets::BUTTONS1] as u32;
        let b2 = self.raw[offsets::BUTTONS2] as u32;
        let b3 = self.raw[offsets::BUTTONS3] as u32;
        let b4 = self.raw[offsets::BUTTONS4] as u32;
        b2 | (b1 << 8) | ((b3 & 0x01) << 16) | ((b4 & 0xF0) << 13)
    }

    /// 4-bit frame counter, incrementing modulo 16 per report. Comparing
    /// against the previous frame's value detects dropped frames.
    pub fn sequence(&self) -> u8 {
        self.raw[offsets::BUTTONS4] & 0x0F
    }

    /// Analog trigger position, 0..=255.
    pub fn trigger(&self) -> u8 {
        self.raw[offsets::TRIGGER]
    }

    /// Accelerometer sample, averaged over the two sub-frames and
    /// re-centered to 0 (range −0x8000..=0x7FFF per axis).
    pub fn accelerometer(&self) -> AxisTriple {
        AxisTriple {
            x: self.axis(offsets::ACCEL_X),
            y: self.axis(offsets::ACCEL_Y),
            z: self.axis(offsets::ACCEL_Z),
        }
    }

    /// Gyroscope sample, decoded the same way as the accelerometer.
    pub fn gyroscope(&self) -> AxisTriple {
        AxisTriple {
            x: self.axis(offsets::GYRO_X),
            y: self.axis(offsets::GYRO_Y),
            z: self.axis(offsets::GYRO_Z),
        }
    }

    /// Magnetometer sample, three 12-bit values unpacked from the
    /// nibble-aligned bytes at offsets 38..=42.
    ///
    /// The z composition reproduces the controller's published decoding
    /// verbatim, unusual `<< 15` shift included; callers that want a
    /// different interpretation can recompute from [`magnetometer_raw`].
    ///
    /// [`magnetometer_raw`]: MoveInputReport::magnetometer_raw
    pub fn magnetometer(&self) -> AxisTriple {
        let [m38, m39, m40, m41, m42] = self.magnetometer_raw().map(i32::from);
        AxisTriple {
            x: m38 << 12 | m39 << 4,
            y: m40 << 8 | (m41 & 0xF0),
            z: m41 << 12 | m42 << 15,
        }
    }

    /// The five raw magnetometer bytes.
    pub fn magnetometer_raw(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        out.copy_from_slice(&self.raw[offsets::MAG_START..offsets::MAG_START + 5]);
        out
    }

    /// One-shot decoded snapshot of the whole report.
    pub fn state(&self) -> MoveInputState {
        MoveInputState {
            buttons: self.buttons(),
            sequence: self.sequence(),
            trigger: self.trigger(),
            accelerometer: self.accelerometer(),
            gyroscope: self.gyroscope(),
            magnetometer: self.magnetometer(),
        }
    }

    /// Average the two unsigned 16-bit sub-frames of one axis and re-center.
    ///
    /// The byte sums reach 0x1FE and the shifted high sum 0x1FE00, so the
    /// arithmetic is done in `i32` before the division re-centers around
    /// the 0x8000 zero-point.
    fn axis(&self, off: offsets::AxisOffsets) -> i32 {
        let low = self.raw[off.low1] as i32 + self.raw[off.low2] as i32;
        let high = self.raw[off.high1] as i32 + self.raw[off.high2] as i32;
        (low + (high << 8)) / 2 - 0x8000
    }
}

/// Decoded state from one Move input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInputState {
    /// Composed 32-bit button mask.
    pub buttons: u32,
    /// 4-bit frame sequence counter.
    pub sequence: u8,
    /// Analog trigger, 0..=255.
    pub trigger: u8,
    /// Accelerometer, re-centered dual-frame average.
    pub accelerometer: AxisTriple,
    /// Gyroscope, re-centered dual-frame average.
    pub gyroscope: AxisTriple,
    /// Magnetometer, 12-bit nibble-packed unpacking.
    pub magnetometer: AxisTriple,
}

/// Parse one Move input report (request code 0x01, 49 bytes).
///
/// Returns `None` if `data` is too short or does not begin with the input
/// request code.
pub fn parse_input_report(data: &[u8]) -> Option<MoveInputState> {
    MoveInputReport::from_bytes(data).map(|report| report.state())
}
