//! The controller session.

use openmove_hid_common::HidTransport;
use openmove_hid_psmove_protocol::{
    AxisTriple, BT_ADDR_GET_LEN, BT_ADDR_SET_LEN, BtAddress, Button, CALIBRATION_REPORT_LEN,
    ConnectionKind, INPUT_REPORT_LEN, LED_REPORT_LEN, LedReport, MoveInputReport, SONY_VENDOR_ID,
    build_get_bt_addr_request, build_get_calibration_request, build_set_bt_addr,
    parse_bt_addr_reply, product_ids,
};
use tracing::{debug, trace, warn};

use crate::error::MoveDeviceError;
use crate::transport::HidapiTransport;

/// One opened Move controller.
///
/// Owns its transport exclusively, together with the cached outbound
/// LED/rumble report and the last successfully received input report.
/// Single-owner by construction; concurrent use requires external
/// serialization, exactly as with any `&mut self` API.
pub struct MoveController<T: HidTransport> {
    transport: T,
    leds: LedReport,
    input: MoveInputReport,
}

impl MoveController<HidapiTransport> {
    /// Open the first attached controller and set up non-blocking input.
    ///
    /// # Errors
    ///
    /// [`MoveDeviceError::DeviceNotFound`] when no controller is attached;
    /// transport errors when one is attached but cannot be opened. Nothing
    /// is left to release on failure.
    pub fn connect() -> Result<Self, MoveDeviceError> {
        let transport = HidapiTransport::open(SONY_VENDOR_ID, product_ids::MOTION_CONTROLLER)?;
        Ok(Self::from_transport(transport))
    }
}

impl<T: HidTransport> MoveController<T> {
    /// Wrap an already-opened transport.
    ///
    /// The transport must deliver non-blocking reads; the mock transport
    /// used in tests does, as does [`HidapiTransport`] after `open`.
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            leds: LedReport::new(),
            input: MoveInputReport::default(),
        }
    }

    /// Release the controller. Consumes the session, so a second release
    /// is unrepresentable.
    ///
    /// # Errors
    ///
    /// Propagates the transport's close failure, if any.
    pub fn disconnect(mut self) -> Result<(), MoveDeviceError> {
        self.transport.close()?;
        Ok(())
    }

    /// Classify the active transport from the HID serial string: the
    /// controller exposes none over USB and the host address over
    /// Bluetooth. A failed query yields [`ConnectionKind::Unknown`].
    pub fn connection_kind(&self) -> ConnectionKind {
        match self.transport.serial_number() {
            Ok(serial) => ConnectionKind::from_serial(serial.as_deref()),
            Err(err) => {
                debug!(%err, "serial number query failed");
                ConnectionKind::Unknown
            }
        }
    }

    /// Read the host Bluetooth address the controller is paired with.
    ///
    /// A calibration feature read is issued first and its payload
    /// discarded; some firmware revisions only answer the address request
    /// after one. Both exchanges must return their full report size.
    ///
    /// # Errors
    ///
    /// [`MoveDeviceError::ShortRead`] on a truncated reply; transport
    /// errors pass through.
    pub fn bt_address(&mut self) -> Result<BtAddress, MoveDeviceError> {
        let mut calibration = build_get_calibration_request();
        let n = self.transport.get_feature_report(&mut calibration)?;
        if n != CALIBRATION_REPORT_LEN {
            return Err(MoveDeviceError::ShortRead {
                expected: CALIBRATION_REPORT_LEN,
                actual: n,
            });
        }

        let mut reply = build_get_bt_addr_request();
        let n = self.transport.get_feature_report(&mut reply)?;
        if n != BT_ADDR_GET_LEN {
            return Err(MoveDeviceError::ShortRead {
                expected: BT_ADDR_GET_LEN,
                actual: n,
            });
        }

        let addr = parse_bt_addr_reply(&reply).ok_or(MoveDeviceError::ShortRead {
            expected: BT_ADDR_GET_LEN,
            actual: reply.len(),
        })?;
        debug!(%addr, "paired host address");
        Ok(addr)
    }

    /// Write the host Bluetooth address the controller should pair with.
    ///
    /// # Errors
    ///
    /// [`MoveDeviceError::ShortWrite`] unless the full 23-byte feature
    /// frame is accepted.
    pub fn set_bt_address(&mut self, addr: &BtAddress) -> Result<(), MoveDeviceError> {
        let frame = build_set_bt_addr(addr);
        let n = self.transport.send_feature_report(&frame)?;
        if n != BT_ADDR_SET_LEN {
            return Err(MoveDeviceError::ShortWrite {
                expected: BT_ADDR_SET_LEN,
                actual: n,
            });
        }
        Ok(())
    }

    /// Update the cached sphere color. Takes effect on [`update_leds`].
    ///
    /// [`update_leds`]: MoveController::update_leds
    pub fn set_leds(&mut self, red: u8, green: u8, blue: u8) {
        self.leds.set_color(red, green, blue);
    }

    /// Update the cached rumble strength. Takes effect on [`update_leds`].
    ///
    /// [`update_leds`]: MoveController::update_leds
    pub fn set_rumble(&mut self, strength: u8) {
        self.leds.set_rumble(strength);
    }

    /// The cached outbound report as it would go on the wire.
    pub fn led_report(&self) -> &LedReport {
        &self.leds
    }

    /// Transmit the cached LED/rumble report.
    ///
    /// The controller reverts LEDs and rumble a few seconds after the last
    /// update, so callers keep calling this periodically to hold a color.
    ///
    /// # Errors
    ///
    /// [`MoveDeviceError::ShortWrite`] unless all 49 bytes are written.
    pub fn update_leds(&mut self) -> Result<(), MoveDeviceError> {
        let n = self.transport.write(self.leds.as_bytes())?;
        if n != LED_REPORT_LEN {
            return Err(MoveDeviceError::ShortWrite {
                expected: LED_REPORT_LEN,
                actual: n,
            });
        }
        Ok(())
    }

    /// Try to receive one input frame without blocking.
    ///
    /// Returns `Ok(Some(sequence))` when a full, valid frame was stored,
    /// `sequence` being the frame's 4-bit counter, and `Ok(None)` when no
    /// frame is pending or the pending data is short or carries the wrong
    /// request code. In the latter cases the cached input state is left
    /// untouched. One call consumes at most one report; loop until `None`
    /// to drain the OS queue.
    ///
    /// # Errors
    ///
    /// Only on transport failure; "no data" is not an error.
    pub fn poll(&mut self) -> Result<Option<u8>, MoveDeviceError> {
        let mut buf = [0u8; INPUT_REPORT_LEN];
        let n = self.transport.read(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if n != INPUT_REPORT_LEN {
            trace!(len = n, "discarding short input report");
            return Ok(None);
        }
        let Some(report) = MoveInputReport::from_bytes(&buf) else {
            warn!(
                report_type = buf[0],
                "unexpected report type on interrupt endpoint"
            );
            return Ok(None);
        };

        let previous = self.input.sequence();
        self.input = report;
        let sequence = report.sequence();
        if sequence != (previous + 1) % 16 {
            debug!(previous, sequence, "input frame sequence gap");
        }
        Ok(Some(sequence))
    }

    /// Composed 32-bit button mask of the last stored frame.
    pub fn buttons(&self) -> u32 {
        self.input.buttons()
    }

    /// Whether `button` is held in the last stored frame.
    pub fn is_pressed(&self, button: Button) -> bool {
        button.is_pressed(self.input.buttons())
    }

    /// Analog trigger of the last stored frame, 0..=255.
    pub fn trigger(&self) -> u8 {
        self.input.trigger()
    }

    /// 4-bit sequence counter of the last stored frame.
    pub fn sequence(&self) -> u8 {
        self.input.sequence()
    }

    /// Accelerometer of the last stored frame.
    pub fn accelerometer(&self) -> AxisTriple {
        self.input.accelerometer()
    }

    /// Gyroscope of the last stored frame.
    pub fn gyroscope(&self) -> AxisTriple {
        self.input.gyroscope()
    }

    /// Magnetometer of the last stored frame (decoded form).
    pub fn magnetometer(&self) -> AxisTriple {
        self.input.magnetometer()
    }

    /// Raw magnetometer bytes of the last stored frame.
    pub fn magnetometer_raw(&self) -> [u8; 5] {
        self.input.magnetometer_raw()
    }

    /// The last stored input report, byte-for-byte.
    pub fn input_report(&self) -> &MoveInputReport {
        &self.input
    }
}
