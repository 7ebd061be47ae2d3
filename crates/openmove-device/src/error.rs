//! Device-session error types.

use openmove_hid_common::HidCommonError;
use thiserror::Error;

/// Errors surfaced by the controller session.
///
/// All operations are non-retrying; a short transfer is reported to the
/// caller, who decides whether to poll again or dispose of the session.
#[derive(Debug, Error)]
pub enum MoveDeviceError {
    /// No controller with the expected identity is attached.
    #[error("no Move controller found (vendor {vendor_id:#06x}, product {product_id:#06x})")]
    DeviceNotFound {
        /// USB vendor ID searched for
        vendor_id: u16,
        /// USB product ID searched for
        product_id: u16,
    },

    /// The transport failed underneath us.
    #[error(transparent)]
    Transport(#[from] HidCommonError),

    /// A read returned fewer bytes than the fixed report size.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// A write accepted fewer bytes than the fixed report size.
    #[error("short write: expected {expected} bytes, got {actual}")]
    ShortWrite {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },
}
