//! Synchronous HID transport capability
//!
//! The Move controller core is purely caller-driven: every operation
//! performs at most one bounded HID transaction and returns. The trait
//! below is therefore synchronous, and `read` is non-blocking by contract
//! so a polling caller never stalls.

use crate::{HidCommonError, HidCommonResult};

/// One opened HID connection, exclusively owned by its consumer.
///
/// Implementations must arrange for non-blocking reads at open time;
/// `read` returning `Ok(0)` means "no report available right now", not
/// end-of-stream.
pub trait HidTransport {
    /// Interrupt-out transfer. Returns the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> HidCommonResult<usize>;

    /// Non-blocking interrupt-in transfer. `Ok(0)` when no report is queued.
    fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize>;

    /// Feature-report read. `buf[0]` carries the report id on entry and the
    /// reply overwrites `buf` from the start. Returns bytes received.
    fn get_feature_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize>;

    /// Feature-report write, `data[0]` being the report id. Returns bytes sent.
    fn send_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize>;

    /// The device serial number string, when the descriptor exposes one.
    ///
    /// A controller enumerated over USB reports none; over Bluetooth the
    /// host address is reported here.
    fn serial_number(&self) -> HidCommonResult<Option<String>>;

    /// Release the underlying connection. Dropping the transport must have
    /// the same effect; `close` exists for callers that want the error.
    fn close(&mut self) -> HidCommonResult<()>;
}

pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    /// Serial-string behavior of a [`MockTransport`].
    #[derive(Debug, Clone)]
    pub enum MockSerial {
        /// Descriptor exposes no serial string (USB enumeration).
        Missing,
        /// Descriptor exposes this serial string (Bluetooth enumeration).
        Present(String),
        /// The query itself fails.
        Error,
    }

    #[derive(Debug)]
    struct MockState {
        reads: VecDeque<Vec<u8>>,
        writes: Vec<Vec<u8>>,
        feature_replies: HashMap<u8, Vec<u8>>,
        feature_requests: Vec<u8>,
        feature_sent: Vec<Vec<u8>>,
        serial: MockSerial,
        write_cap: Option<usize>,
        feature_write_cap: Option<usize>,
        connected: bool,
    }

    /// In-memory [`HidTransport`] for tests.
    ///
    /// Clones share state, so a test can hand one clone to the device
    /// session and keep another to queue reads and inspect writes while
    /// the session still owns its transport exclusively.
    #[derive(Debug, Clone)]
    pub struct MockTransport {
        inner: Arc<Mutex<MockState>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(MockState {
                    reads: VecDeque::new(),
                    writes: Vec::new(),
                    feature_replies: HashMap::new(),
                    feature_requests: Vec::new(),
                    feature_sent: Vec::new(),
                    serial: MockSerial::Missing,
                    write_cap: None,
                    feature_write_cap: None,
                    connected: true,
                })),
            }
        }

        fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
            self.inner.lock().unwrap_or_else(|e| e.into_inner())
        }

        /// Queue one inbound interrupt report for a later `read`.
        pub fn queue_read(&self, data: impl Into<Vec<u8>>) {
            self.state().reads.push_back(data.into());
        }

        /// All interrupt-out payloads written so far, oldest first.
        pub fn write_history(&self) -> Vec<Vec<u8>> {
            self.state().writes.clone()
        }

        /// Set the reply returned for feature reads of `report_id`.
        pub fn set_feature_reply(&self, report_id: u8, reply: impl Into<Vec<u8>>) {
            self.state().feature_replies.insert(report_id, reply.into());
        }

        /// Report ids of feature reads issued so far, oldest first.
        pub fn feature_requests(&self) -> Vec<u8> {
            self.state().feature_requests.clone()
        }

        /// Feature-report payloads sent so far, oldest first.
        pub fn feature_sent_history(&self) -> Vec<Vec<u8>> {
            self.state().feature_sent.clone()
        }

        pub fn set_serial(&self, serial: MockSerial) {
            self.state().serial = serial;
        }

        /// Clamp the byte count reported by `write`, simulating a short
        /// interrupt transfer. `None` restores full writes.
        pub fn set_write_cap(&self, cap: Option<usize>) {
            self.state().write_cap = cap;
        }

        /// Clamp the byte count reported by `send_feature_report`.
        pub fn set_feature_write_cap(&self, cap: Option<usize>) {
            self.state().feature_write_cap = cap;
        }

        pub fn disconnect(&self) {
            self.state().connected = false;
        }

        pub fn reconnect(&self) {
            self.state().connected = true;
        }

        pub fn is_connected(&self) -> bool {
            self.state().connected
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HidTransport for MockTransport {
        fn write(&mut self, data: &[u8]) -> HidCommonResult<usize> {
            let mut state = self.state();
            if !state.connected {
                return Err(HidCommonError::Disconnected);
            }
            state.writes.push(data.to_vec());
            Ok(state.write_cap.map_or(data.len(), |cap| cap.min(data.len())))
        }

        fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
            let mut state = self.state();
            if !state.connected {
                return Err(HidCommonError::Disconnected);
            }
            let Some(report) = state.reads.pop_front() else {
                return Ok(0);
            };
            let n = report.len().min(buf.len());
            buf[..n].copy_from_slice(&report[..n]);
            Ok(n)
        }

        fn get_feature_report(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
            let mut state = self.state();
            if !state.connected {
                return Err(HidCommonError::Disconnected);
            }
            let Some(&report_id) = buf.first() else {
                return Err(HidCommonError::InvalidReport(
                    "empty feature report buffer".to_string(),
                ));
            };
            state.feature_requests.push(report_id);
            let Some(reply) = state.feature_replies.get(&report_id) else {
                return Err(HidCommonError::ReadError(format!(
                    "no feature reply queued for report {report_id:#04x}"
                )));
            };
            let n = reply.len().min(buf.len());
            buf[..n].copy_from_slice(&reply[..n]);
            Ok(n)
        }

        fn send_feature_report(&mut self, data: &[u8]) -> HidCommonResult<usize> {
            let mut state = self.state();
            if !state.connected {
                return Err(HidCommonError::Disconnected);
            }
            state.feature_sent.push(data.to_vec());
            Ok(state
                .feature_write_cap
                .map_or(data.len(), |cap| cap.min(data.len())))
        }

        fn serial_number(&self) -> HidCommonResult<Option<String>> {
            let state = self.state();
            if !state.connected {
                return Err(HidCommonError::Disconnected);
            }
            match &state.serial {
                MockSerial::Missing => Ok(None),
                MockSerial::Present(s) => Ok(Some(s.clone())),
                MockSerial::Error => Err(HidCommonError::ReadError(
                    "serial number query failed".to_string(),
                )),
            }
        }

        fn close(&mut self) -> HidCommonResult<()> {
            self.state().connected = false;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockSerial, MockTransport};
    use super::*;

    #[test]
    fn test_mock_read_empty_queue_is_zero() {
        let mut transport = MockTransport::new();
        let mut buf = [0u8; 8];
        assert_eq!(transport.read(&mut buf).expect("read"), 0);
    }

    #[test]
    fn test_mock_read_pops_in_order() {
        let mut transport = MockTransport::new();
        transport.queue_read(vec![0x01, 0x02]);
        transport.queue_read(vec![0x03]);

        let mut buf = [0u8; 8];
        assert_eq!(transport.read(&mut buf).expect("read"), 2);
        assert_eq!(&buf[..2], &[0x01, 0x02]);
        assert_eq!(transport.read(&mut buf).expect("read"), 1);
        assert_eq!(buf[0], 0x03);
        assert_eq!(transport.read(&mut buf).expect("read"), 0);
    }

    #[test]
    fn test_mock_write_history_and_cap() {
        let mut transport = MockTransport::new();
        assert_eq!(transport.write(&[0xAA, 0xBB, 0xCC]).expect("write"), 3);

        transport.set_write_cap(Some(2));
        assert_eq!(transport.write(&[0xDD, 0xEE, 0xFF]).expect("write"), 2);

        let history = transport.write_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1], vec![0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_mock_feature_reply_by_report_id() {
        let mut transport = MockTransport::new();
        transport.set_feature_reply(0x04, vec![0x04, 0xFF, 0xFF]);

        let mut buf = [0u8; 16];
        buf[0] = 0x04;
        assert_eq!(transport.get_feature_report(&mut buf).expect("feature"), 3);
        assert_eq!(&buf[..3], &[0x04, 0xFF, 0xFF]);
        assert_eq!(transport.feature_requests(), vec![0x04]);
    }

    #[test]
    fn test_mock_feature_read_without_reply_fails() {
        let mut transport = MockTransport::new();
        let mut buf = [0x10u8; 4];
        assert!(transport.get_feature_report(&mut buf).is_err());
    }

    #[test]
    fn test_mock_disconnect_fails_io() {
        let mut transport = MockTransport::new();
        transport.disconnect();
        assert!(matches!(
            transport.write(&[0x00]),
            Err(HidCommonError::Disconnected)
        ));
        let mut buf = [0u8; 4];
        assert!(transport.read(&mut buf).is_err());
    }

    #[test]
    fn test_mock_serial_behaviors() {
        let transport = MockTransport::new();
        assert_eq!(transport.serial_number().expect("serial"), None);

        transport.set_serial(MockSerial::Present("00:06:f7:c9:a1:e2".into()));
        assert_eq!(
            transport.serial_number().expect("serial").as_deref(),
            Some("00:06:f7:c9:a1:e2")
        );

        transport.set_serial(MockSerial::Error);
        assert!(transport.serial_number().is_err());
    }

    #[test]
    fn test_mock_clones_share_state() {
        let observer = MockTransport::new();
        let mut owned = observer.clone();
        owned.write(&[0x02, 0x00]).expect("write");
        assert_eq!(observer.write_history().len(), 1);
    }
}
