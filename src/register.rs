//! Transport for SPI peripherals driven through their status and data
//! registers, on targets without a blocking HAL driver.

use core::convert::Infallible;

#[cfg(not(feature = "async"))]
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
#[cfg(feature = "async")]
use embedded_hal_async::delay::DelayNs;

use crate::config::{BusSettings, Config, TimeoutPolicy};
use crate::transport::{ControlLines, Level, Line, Transport};
use crate::wait::{Deadline, spin_until};
use crate::Error;

/// Register view of a transmit-only SPI master.
pub trait TxRegister {
    /// Program mode, bit order and prescaler, then enable the peripheral.
    fn configure(&mut self, settings: &BusSettings);

    /// Transmit buffer can take another byte (TXE).
    fn tx_empty(&mut self) -> bool;

    /// A frame is still being shifted out (BSY).
    fn busy(&mut self) -> bool;

    fn write_data(&mut self, byte: u8);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum WaitStage {
    TxEmpty,
    Drain,
}

/// Polls [`TxRegister`] flags with every wait bounded by a [`Deadline`].
pub struct RegisterTransport<P, W, L, D> {
    regs: P,
    deadline: W,
    lines: L,
    delay: D,
    on_timeout: TimeoutPolicy,
    timeouts: u32,
}

impl<P, W, RST, CS, DC, BL, D> RegisterTransport<P, W, ControlLines<RST, CS, DC, BL>, D>
where
    P: TxRegister,
    W: Deadline,
{
    pub fn new(
        config: &Config,
        mut regs: P,
        deadline: W,
        lines: ControlLines<RST, CS, DC, BL>,
        delay: D,
    ) -> Self {
        regs.configure(&config.bus_settings());
        Self {
            regs,
            deadline,
            lines: lines.with_polarity(config.line_polarity),
            delay,
            on_timeout: config.on_timeout,
            timeouts: 0,
        }
    }

    pub fn registers(&self) -> &P {
        &self.regs
    }

    pub fn release(self) -> (P, ControlLines<RST, CS, DC, BL>, D) {
        (self.regs, self.lines, self.delay)
    }

    fn expired(&mut self, stage: WaitStage) -> Result<(), Error<Infallible>> {
        self.timeouts = self.timeouts.saturating_add(1);
        #[cfg(feature = "defmt")]
        defmt::warn!("spi wait abandoned at {} ({} so far)", stage, self.timeouts);
        #[cfg(not(feature = "defmt"))]
        let _ = stage;
        match self.on_timeout {
            TimeoutPolicy::Continue => Ok(()),
            TimeoutPolicy::Fail => Err(Error::Timeout),
        }
    }

    fn wait_drained(&mut self) -> Result<(), Error<Infallible>> {
        let regs = &mut self.regs;
        if spin_until(&mut self.deadline, || !regs.busy()).is_err() {
            self.expired(WaitStage::Drain)?;
        }
        Ok(())
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "RegisterTransport",),
    async(feature = "async", keep_self)
)]
impl<P, W, RST, CS, DC, BL, D> Transport for RegisterTransport<P, W, ControlLines<RST, CS, DC, BL>, D>
where
    P: TxRegister,
    W: Deadline,
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    type Error = Error<Infallible>;

    async fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        let regs = &mut self.regs;
        if spin_until(&mut self.deadline, || regs.tx_empty()).is_err() {
            // The data register is not accepting bytes; drop this one.
            return self.expired(WaitStage::TxEmpty);
        }
        self.regs.write_data(byte);
        self.wait_drained()
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.wait_drained()
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

    fn timeouts(&self) -> u32 {
        self.timeouts
    }
}
