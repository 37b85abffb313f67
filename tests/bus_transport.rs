//! `BusTransport` and the driver on embedded-hal mocks.
//!
//! Run with: cargo test --test bus_transport
#![cfg(not(feature = "async"))]

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use gc9a01_driver::{
    BusTransport, Color, Config, ControlLines, GC9A01, Level, Line, LinePolarity, Transport,
};

type Bus = BusTransport<SpiMock<u8>, ControlLines<PinMock, PinMock, PinMock, PinMock>, NoopDelay>;

/// Mock handles kept by the test so expectations can be checked after the
/// transport has taken ownership of the clones.
struct Handles {
    spi: SpiMock<u8>,
    rst: PinMock,
    cs: PinMock,
    dc: PinMock,
    bl: PinMock,
}

impl Handles {
    fn done(mut self) {
        self.spi.done();
        self.rst.done();
        self.cs.done();
        self.dc.done();
        self.bl.done();
    }
}

fn set(levels: &[PinState]) -> Vec<PinTransaction> {
    levels.iter().map(|&level| PinTransaction::set(level)).collect()
}

fn bus(
    spi: &[SpiTransaction<u8>],
    rst: &[PinState],
    cs: &[PinState],
    dc: &[PinState],
    bl: &[PinState],
    polarity: LinePolarity,
) -> (Bus, Handles) {
    let handles = Handles {
        spi: SpiMock::new(spi),
        rst: PinMock::new(&set(rst)),
        cs: PinMock::new(&set(cs)),
        dc: PinMock::new(&set(dc)),
        bl: PinMock::new(&set(bl)),
    };
    let lines = ControlLines::new(
        handles.rst.clone(),
        handles.cs.clone(),
        handles.dc.clone(),
        handles.bl.clone(),
    );
    let config = Config {
        line_polarity: polarity,
        ..Config::default()
    };
    let transport = BusTransport::new(&config, handles.spi.clone(), lines, NoopDelay);
    (transport, handles)
}

fn write(data: &[u8]) -> [SpiTransaction<u8>; 2] {
    [
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::flush(),
    ]
}

#[test]
fn every_byte_is_flushed_before_returning() {
    let spi: Vec<_> = [write(&[0x11]), write(&[0x29])].concat();
    let (mut transport, handles) = bus(&spi, &[], &[], &[], &[], LinePolarity::Normal);

    transport.write_byte(0x11).unwrap();
    transport.write_byte(0x29).unwrap();

    drop(transport);
    handles.done();
}

#[test]
fn byte_slices_go_out_in_one_write() {
    let spi = write(&[0x00, 0x00, 0x00, 0xEF]);
    let (mut transport, handles) = bus(&spi, &[], &[], &[], &[], LinePolarity::Normal);

    transport.write_bytes(&[0x00, 0x00, 0x00, 0xEF]).unwrap();

    drop(transport);
    handles.done();
}

#[test]
fn lines_follow_logical_levels() {
    use PinState::{High, Low};
    let (mut transport, handles) = bus(&[], &[Low], &[Low], &[High], &[High], LinePolarity::Normal);

    transport.set_line(Line::Reset, Level::Low).unwrap();
    transport.set_line(Line::Select, Level::Low).unwrap();
    transport.set_line(Line::Mode, Level::High).unwrap();
    transport.set_line(Line::Backlight, Level::High).unwrap();

    drop(transport);
    handles.done();
}

#[test]
fn inverted_polarity_in_config_flips_all_four_lines() {
    use PinState::{High, Low};
    let (mut transport, handles) =
        bus(&[], &[High], &[High], &[Low], &[Low], LinePolarity::Inverted);

    transport.set_line(Line::Reset, Level::Low).unwrap();
    transport.set_line(Line::Select, Level::Low).unwrap();
    transport.set_line(Line::Mode, Level::High).unwrap();
    transport.set_line(Line::Backlight, Level::High).unwrap();

    drop(transport);
    handles.done();
}

#[test]
fn fill_rect_on_the_wire() {
    use PinState::{High, Low};
    let spi: Vec<_> = [
        &write(&[0x2A]) as &[_],
        &write(&[0x00, 0x00, 0x00, 0x01]),
        &write(&[0x2B]),
        &write(&[0x00, 0x00, 0x00, 0x00]),
        &write(&[0x2C]),
        &write(&[0xF8, 0x00, 0xF8, 0x00]),
        &[SpiTransaction::flush()],
    ]
    .concat();
    let cs = [Low, High, Low, High, Low, High];
    let dc = [Low, High, Low, High, Low, High];
    let (transport, handles) = bus(&spi, &[], &cs, &dc, &[], LinePolarity::Normal);

    let mut display = GC9A01::new(transport);
    display.fill_rect(0, 0, 2, 1, Color::RED).unwrap();

    drop(display);
    handles.done();
}

#[test]
fn off_panel_fill_touches_nothing() {
    let (transport, handles) = bus(&[], &[], &[], &[], &[], LinePolarity::Normal);

    let mut display = GC9A01::new(transport);
    display.fill_rect(250, 0, 260, 10, Color::WHITE).unwrap();
    display.set_pixel(0, 240, Color::WHITE).unwrap();

    drop(display);
    handles.done();
}

#[test]
fn backlight_is_driven_directly() {
    use PinState::{High, Low};
    let (transport, handles) = bus(&[], &[], &[], &[], &[High, Low], LinePolarity::Normal);

    let mut display = GC9A01::new(transport);
    display.set_backlight(true).unwrap();
    display.set_backlight(false).unwrap();
    assert_eq!(display.transport().timeouts(), 0);

    drop(display);
    handles.done();
}
