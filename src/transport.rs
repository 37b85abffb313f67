//! Byte and control-line level access to the panel bus.
//!
//! Nothing in here knows about commands or pixels. A [`Transport`] moves
//! bytes onto the serial data line, guarantees each byte has left the shift
//! register before returning, and drives the four control lines.

use core::convert::Infallible;

#[cfg(not(feature = "async"))]
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorType, OutputPin};
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::delay::DelayNs;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

use crate::{Config, Error};

/// Control lines between the MCU and the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// RESX, active low.
    Reset,
    /// Chip select, LOW while the panel owns the bus.
    Select,
    /// Data/command select: LOW for command bytes, HIGH for parameters and pixels.
    Mode,
    /// Backlight enable.
    Backlight,
}

/// Logical line level, before any board inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Boards with inverters between the MCU and the panel flip every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinePolarity {
    #[default]
    Normal,
    Inverted,
}

impl LinePolarity {
    /// Level to put on the pin for a logical level.
    pub const fn apply(self, level: Level) -> Level {
        match self {
            LinePolarity::Normal => level,
            LinePolarity::Inverted => level.inverted(),
        }
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Transport",),
    async(feature = "async", keep_self)
)]
/// Byte and line level I/O used by the protocol framer.
pub trait Transport {
    type Error;

    /// Send one byte; returns once it has been fully shifted out.
    async fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Send bytes in order, with the guarantees of [`Transport::write_byte`].
    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.write_byte(byte).await?;
        }
        Ok(())
    }

    /// Block until nothing is left in flight on the bus.
    async fn flush(&mut self) -> Result<(), Self::Error>;

    fn set_line(&mut self, line: Line, level: Level) -> Result<(), Self::Error>;

    async fn delay_ms(&mut self, ms: u32);

    async fn delay_us(&mut self, us: u32);

    /// Number of bus waits abandoned so far.
    fn timeouts(&self) -> u32 {
        0
    }
}

/// Placeholder for a backlight wired straight to the supply.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBacklight;

impl ErrorType for NoBacklight {
    type Error = Infallible;
}

impl OutputPin for NoBacklight {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// The four GPIO driven control lines, with board polarity applied.
///
/// Polarity is taken from [`Config::line_polarity`](crate::Config) when the
/// lines are handed to a transport.
pub struct ControlLines<RST, CS, DC, BL> {
    rst: RST,
    cs: CS,
    dc: DC,
    bl: BL,
    polarity: LinePolarity,
}

impl<RST, CS, DC, BL> ControlLines<RST, CS, DC, BL>
where
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    BL: OutputPin,
{
    pub fn new(rst: RST, cs: CS, dc: DC, bl: BL) -> Self {
        Self {
            rst,
            cs,
            dc,
            bl,
            polarity: LinePolarity::Normal,
        }
    }

    pub fn polarity(&self) -> LinePolarity {
        self.polarity
    }

    pub fn set<E>(&mut self, line: Line, level: Level) -> Result<(), Error<E>> {
        let level = self.polarity.apply(level);
        match line {
            Line::Reset => drive(&mut self.rst, level),
            Line::Select => drive(&mut self.cs, level),
            Line::Mode => drive(&mut self.dc, level),
            Line::Backlight => drive(&mut self.bl, level),
        }
    }

    pub fn release(self) -> (RST, CS, DC, BL) {
        (self.rst, self.cs, self.dc, self.bl)
    }
}

impl<RST, CS, DC, BL> ControlLines<RST, CS, DC, BL> {
    pub(crate) fn with_polarity(mut self, polarity: LinePolarity) -> Self {
        self.polarity = polarity;
        self
    }
}

fn drive<P: OutputPin, E>(pin: &mut P, level: Level) -> Result<(), Error<E>> {
    match level {
        Level::Low => pin.set_low(),
        Level::High => pin.set_high(),
    }
    .map_err(|e| Error::Pin(e.kind()))
}

/// Transport over an embedded-hal [`SpiBus`] with GPIO select.
///
/// The bus, not an `SpiDevice`, is required: select has to stay asserted
/// across several writes, which a device would release after each one.
pub struct BusTransport<SPI, L, D> {
    spi: SPI,
    lines: L,
    delay: D,
}

impl<SPI, RST, CS, DC, BL, D> BusTransport<SPI, ControlLines<RST, CS, DC, BL>, D> {
    /// Only `config.line_polarity` applies here; clock, mode and bit order
    /// belong to the HAL's bus setup.
    pub fn new(config: &Config, spi: SPI, lines: ControlLines<RST, CS, DC, BL>, delay: D) -> Self {
        Self {
            spi,
            lines: lines.with_polarity(config.line_polarity),
            delay,
        }
    }

    pub fn release(self) -> (SPI, ControlLines<RST, CS, DC, BL>, D) {
        (self.spi, self.lines, self.delay)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "BusTransport",),
    async(feature = "async", keep_self)
)]
impl<SPI, RST, CS, DC, BL, D> Transport for BusTransport<SPI, ControlLines<RST, CS, DC, BL>, D>
where
    SPI: SpiBus,
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    type Error = Error<SPI::Error>;

    async fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte]).await.map_err(Error::Comm)?;
        self.spi.flush().await.map_err(Error::Comm)
    }

    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).await.map_err(Error::Comm)?;
        self.spi.flush().await.map_err(Error::Comm)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().await.map_err(Error::Comm)
    }

    fn set_line(&mut self, line: Line, level: Level) -> Result<(), Self::Error> {
        self.lines.set(line, level)
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us).await;
    }
}
