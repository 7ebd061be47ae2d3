//! Identity metadata for enumerated HID devices

use serde::{Deserialize, Serialize};

/// Identity of one enumerated HID device, as reported by the backend.
///
/// The `path` is the platform-specific device node (`/dev/hidrawN`, a
/// Windows device interface path, an IOKit registry path). The optional
/// strings are only present when the device descriptor carries them; a
/// controller connected over USB typically exposes no serial number at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl HidDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            serial_number: None,
            manufacturer: None,
            product_name: None,
            path: path.into(),
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    /// True when the descriptor carries a non-empty serial number string.
    pub fn has_serial_number(&self) -> bool {
        self.serial_number.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

impl Default for HidDeviceInfo {
    fn default() -> Self {
        Self {
            vendor_id: 0,
            product_id: 0,
            serial_number: None,
            manufacturer: None,
            product_name: None,
            path: String::new(),
        }
    }
}
