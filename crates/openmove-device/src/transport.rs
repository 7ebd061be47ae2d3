//! hidapi-backed transport.

use hidapi::{HidApi, HidDevice};
use openmove_hid_common::{HidCommonError, HidCommonResult, HidDeviceInfo, HidTransport};
use openmove_hid_psmove_protocol::{SONY_VENDOR_ID, product_ids};
use tracing::debug;

use crate::error::MoveDeviceError;

/// A [`HidTransport`] over one hidapi device handle.
///
/// Opened non-blocking, so `read` returns `Ok(0)` instead of stalling when
/// no interrupt report is queued.
pub struct HidapiTransport {
    device: HidDevice,
}

impl HidapiTransport {
    /// Open the first attached device matching `vendor_id:product_id`.
    ///
    /// Distinguishes "nothing attached" from "attached but unopenable"
    /// (permissions, exclusive claim) so callers can report the right thing.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self, MoveDeviceError> {
        let api = HidApi::new().map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        Self::open_with(&api, vendor_id, product_id)
    }

    /// Open through an existing [`HidApi`] context.
    pub fn open_with(
        api: &HidApi,
        vendor_id: u16,
        product_id: u16,
    ) -> Result<Self, MoveDeviceError> {
        let attached = api
            .device_list()
            .any(|d| d.vendor_id() == vendor_id && d.product_id() == product_id);
        if !attached {
            return Err(MoveDeviceError::DeviceNotFound {
                vendor_id,
                product_id,
            });
        }

        let device = api
            .open(vendor_id, product_id)
            .map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        device
            .set_blocking_mode(false)
            .map_err(|e| HidCommonError::OpenError(e.to_string()))?;

        debug!(vendor_id, product_id, "opened HID device");
        Ok(Self { device })
    }
}

impl HidTransport for HidapiTransport {
    fn write(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        self.device
            .write(data)
            .map_err(|e| HidCommonError::WriteError(e.to_string()))
    }

    fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
        self.device
            .read(buf)
            .map_err(|e| HidCommonError::ReadError(e.to_string()))
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
        self.device
            .get_feature_report(buf)
            .map_err(|e| HidCommonError::ReadError(e.to_string()))
    }

    fn send_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
        self.device
            .send_feature_report(data)
            .map(|()| data.len())
            .map_err(|e| HidCommonError::WriteError(e.to_string()))
    }

    fn serial_number(&self) -> HidCommonResult<Option<String>> {
        self.device
            .get_serial_number_string()
            .map_err(|e| HidCommonError::ReadError(e.to_string()))
    }

    fn close(&mut self) -> HidCommonResult<()> {
        // hidapi closes on drop; nothing further to release here.
        Ok(())
    }
}

/// Enumerate every attached Move controller.
///
/// # Errors
///
/// Fails only when the hidapi context itself cannot be created; an empty
/// result means no controller is attached.
pub fn enumerate_controllers() -> Result<Vec<HidDeviceInfo>, MoveDeviceError> {
    let api = HidApi::new().map_err(|e| HidCommonError::OpenError(e.to_string()))?;
    Ok(api
        .device_list()
        .filter(|d| {
            d.vendor_id() == SONY_VENDOR_ID && d.product_id() == product_ids::MOTION_CONTROLLER
        })
        .map(|d| {
            let mut info = HidDeviceInfo::new(
                d.vendor_id(),
                d.product_id(),
                d.path().to_string_lossy().into_owned(),
            );
            if let Some(serial) = d.serial_number() {
                info = info.with_serial(serial);
            }
            if let Some(manufacturer) = d.manufacturer_string() {
                info = info.with_manufacturer(manufacturer);
            }
            if let Some(product) = d.product_string() {
                info = info.with_product_name(product);
            }
            info
        })
        .collect())
}
