//! Common HID utilities for Move controller driver crates
//!
//! This crate provides the transport capability consumed by the device
//! session layer: a synchronous, caller-driven HID interface, device
//! identity metadata, and a shared error type. It contains no hardware
//! access of its own; backends live in `openmove-device`, and the
//! [`transport::mock`] module provides an in-memory stand-in for tests.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod transport;

pub use device_info::*;
pub use transport::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Failed to write to device: {0}")]
    WriteError(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
