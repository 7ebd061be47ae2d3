//! Mock-transport tests for the controller session.
//!
//! The mock shares state between clones, so each test keeps an observer
//! clone while the session owns its transport exclusively.

use openmove_device::protocol::{
    BT_ADDR_GET_LEN, BtAddress, Button, CALIBRATION_REPORT_LEN, ConnectionKind, INPUT_REPORT_LEN,
    request,
};
use openmove_device::{MoveController, MoveDeviceError};
use openmove_hid_common::transport::mock::{MockSerial, MockTransport};

fn session() -> (MoveController<MockTransport>, MockTransport) {
    let observer = MockTransport::new();
    let controller = MoveController::from_transport(observer.clone());
    (controller, observer)
}

fn input_frame() -> [u8; INPUT_REPORT_LEN] {
    let mut data = [0u8; INPUT_REPORT_LEN];
    data[0] = request::GET_INPUT;
    data
}

// ---------------------------------------------------------------------------
// Polling
// ---------------------------------------------------------------------------

#[test]
fn fresh_session_polls_nothing() {
    let (mut controller, _observer) = session();
    assert!(matches!(controller.poll(), Ok(None)));
    assert_eq!(controller.buttons(), 0);
    assert_eq!(controller.trigger(), 0);
}

#[test]
fn poll_stores_frame_and_returns_sequence() {
    let (mut controller, observer) = session();

    let mut data = input_frame();
    data[1] = 0xA5;
    data[2] = 0x5A;
    data[3] = 0x01;
    data[4] = 0x37;
    data[6] = 0xC3;
    observer.queue_read(data.to_vec());

    assert!(matches!(controller.poll(), Ok(Some(0x07))));
    assert_eq!(controller.buttons(), 0x0007_A55A);
    assert_eq!(controller.trigger(), 0xC3);
    assert_eq!(controller.sequence(), 0x07);
    assert!(controller.is_pressed(Button::Ps));
}

#[test]
fn poll_drains_one_report_per_call() {
    let (mut controller, observer) = session();

    let mut first = input_frame();
    first[4] = 0x01;
    let mut second = input_frame();
    second[4] = 0x02;
    observer.queue_read(first.to_vec());
    observer.queue_read(second.to_vec());

    assert!(matches!(controller.poll(), Ok(Some(1))));
    assert!(matches!(controller.poll(), Ok(Some(2))));
    assert!(matches!(controller.poll(), Ok(None)));
}

#[test]
fn malformed_frame_is_dropped_and_cache_untouched() {
    let (mut controller, observer) = session();

    let mut good = input_frame();
    good[4] = 0x05;
    good[6] = 0x99;
    observer.queue_read(good.to_vec());
    assert!(matches!(controller.poll(), Ok(Some(5))));

    // A full-length frame with the LED request code in byte 0 is not input.
    let mut bad = [0u8; INPUT_REPORT_LEN];
    bad[0] = request::SET_LEDS;
    bad[6] = 0x11;
    observer.queue_read(bad.to_vec());

    assert!(matches!(controller.poll(), Ok(None)));
    assert_eq!(controller.trigger(), 0x99);
    assert_eq!(controller.sequence(), 0x05);
}

#[test]
fn short_frame_is_dropped_and_cache_untouched() {
    let (mut controller, observer) = session();
    observer.queue_read(vec![request::GET_INPUT; 10]);
    assert!(matches!(controller.poll(), Ok(None)));
    assert_eq!(controller.buttons(), 0);
}

#[test]
fn poll_surfaces_transport_failure() {
    let (mut controller, observer) = session();
    observer.disconnect();
    assert!(matches!(
        controller.poll(),
        Err(MoveDeviceError::Transport(_))
    ));
}

// ---------------------------------------------------------------------------
// LEDs and rumble
// ---------------------------------------------------------------------------

#[test]
fn update_leds_transmits_cached_frame() {
    let (mut controller, observer) = session();

    controller.set_leds(0x10, 0x20, 0x30);
    controller.set_rumble(0x40);
    controller.update_leds().expect("update");

    let mut expected = vec![0u8; 49];
    expected[0] = 0x02;
    expected[2] = 0x10;
    expected[3] = 0x20;
    expected[4] = 0x30;
    expected[6] = 0x40;
    assert_eq!(observer.write_history(), vec![expected]);
}

#[test]
fn set_leds_alone_transmits_nothing() {
    let (mut controller, observer) = session();
    controller.set_leds(0xFF, 0x00, 0xFF);
    controller.set_rumble(0x80);
    assert!(observer.write_history().is_empty());
}

#[test]
fn led_request_code_survives_any_setter_sequence() {
    let (mut controller, _observer) = session();
    for i in 0..48u8 {
        controller.set_leds(i, i.wrapping_add(1), i.wrapping_add(2));
        controller.set_rumble(255 - i);
    }
    let bytes = controller.led_report().as_bytes();
    assert_eq!(bytes[0], 0x02);
    assert_eq!(bytes[5], 0x00);
}

#[test]
fn short_interrupt_write_is_an_error() {
    let (mut controller, observer) = session();
    observer.set_write_cap(Some(20));
    assert!(matches!(
        controller.update_leds(),
        Err(MoveDeviceError::ShortWrite {
            expected: 49,
            actual: 20
        })
    ));
}

// ---------------------------------------------------------------------------
// Connection classification
// ---------------------------------------------------------------------------

#[test]
fn connection_kind_usb_bluetooth_unknown() {
    let (controller, observer) = session();
    assert_eq!(controller.connection_kind(), ConnectionKind::Usb);

    observer.set_serial(MockSerial::Present("00:06:f7:c9:a1:e2".into()));
    assert_eq!(controller.connection_kind(), ConnectionKind::Bluetooth);

    observer.set_serial(MockSerial::Error);
    assert_eq!(controller.connection_kind(), ConnectionKind::Unknown);
}

// ---------------------------------------------------------------------------
// Bluetooth pairing address
// ---------------------------------------------------------------------------

#[test]
fn bt_address_primes_calibration_then_reads() {
    let (mut controller, observer) = session();

    observer.set_feature_reply(request::GET_CALIBRATION, vec![0x10; CALIBRATION_REPORT_LEN]);
    let mut reply = vec![0u8; BT_ADDR_GET_LEN];
    reply[0] = request::GET_BT_ADDR;
    reply[10..16].copy_from_slice(&[0xE2, 0xA1, 0xC9, 0xF7, 0x06, 0x00]);
    observer.set_feature_reply(request::GET_BT_ADDR, reply);

    let addr = controller.bt_address().expect("address");
    assert_eq!(addr.to_string(), "00:06:f7:c9:a1:e2");
    assert_eq!(
        observer.feature_requests(),
        vec![request::GET_CALIBRATION, request::GET_BT_ADDR]
    );
}

#[test]
fn bt_address_fails_on_short_calibration_reply() {
    let (mut controller, observer) = session();
    observer.set_feature_reply(request::GET_CALIBRATION, vec![0x10; 12]);

    assert!(matches!(
        controller.bt_address(),
        Err(MoveDeviceError::ShortRead {
            expected: 49,
            actual: 12
        })
    ));
}

#[test]
fn bt_address_fails_on_short_address_reply() {
    let (mut controller, observer) = session();
    observer.set_feature_reply(request::GET_CALIBRATION, vec![0x10; CALIBRATION_REPORT_LEN]);
    observer.set_feature_reply(request::GET_BT_ADDR, vec![0x04; 7]);

    assert!(matches!(
        controller.bt_address(),
        Err(MoveDeviceError::ShortRead {
            expected: 16,
            actual: 7
        })
    ));
}

#[test]
fn set_bt_address_sends_full_frame() {
    let (mut controller, observer) = session();
    let addr = BtAddress::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    controller.set_bt_address(&addr).expect("set");

    let sent = observer.feature_sent_history();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0][0], request::SET_BT_ADDR);
    assert_eq!(&sent[0][1..7], addr.as_bytes());
    assert_eq!(sent[0].len(), 23);
}

#[test]
fn set_bt_address_fails_on_short_feature_write() {
    let (mut controller, observer) = session();
    observer.set_feature_write_cap(Some(5));
    let addr = BtAddress::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
    assert!(matches!(
        controller.set_bt_address(&addr),
        Err(MoveDeviceError::ShortWrite {
            expected: 23,
            actual: 5
        })
    ));
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn disconnect_releases_transport() {
    let (controller, observer) = session();
    controller.disconnect().expect("disconnect");
    assert!(!observer.is_connected());
}

#[test]
fn session_owns_state_per_handle() {
    let (mut first, first_observer) = session();
    let (second, _second_observer) = session();

    let mut data = input_frame();
    data[6] = 0x55;
    first_observer.queue_read(data.to_vec());
    first.poll().expect("poll");

    assert_eq!(first.trigger(), 0x55);
    assert_eq!(second.trigger(), 0x00);
}
