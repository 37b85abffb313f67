#![cfg_attr(not(test), no_std)]
//! Driver for GC9A01 based 240×240 round RGB565 panels on a 4-wire serial
//! bus (clock, data out, chip select, data/command) with GPIO reset and
//! backlight.
//!
//! The stack, from the bottom:
//!
//! - [`Transport`]: bytes and control lines. [`BusTransport`] sits on an
//!   embedded-hal `SpiBus`, [`RegisterTransport`] polls a raw peripheral.
//! - [`Framer`]: command/data framing with software chip select.
//! - [`GC9A01`]: reset and register initialization ([`GC9A01::init`]),
//!   window addressing and solid fills.
//!
//! Enable the `async` feature to build the same API on embedded-hal-async.

mod color;
mod config;
mod error;
mod framer;
mod init_table;
mod instruction;
#[cfg(all(test, not(feature = "async")))]
mod mock;
mod panel;
mod raster;
mod register;
mod transport;
mod wait;

pub use color::Color;
pub use config::{
    BusSettings, Config, DEFAULT_BUS_CLOCK_HZ, DEFAULT_TARGET_HZ, Divider, MIN_DISPLAY_ON_MS,
    MIN_RESET_PULSE_MS, MIN_RESET_RECOVERY_MS, MIN_SLEEP_OUT_MS, TimeoutPolicy, Timing,
};
pub use error::Error;
pub use framer::Framer;
pub use init_table::{INIT_TABLE, Register, UNLOCK_LEN, unlock_sequence};
pub use instruction::Instruction;
pub use panel::PanelState;
pub use raster::Rect;
pub use register::{RegisterTransport, TxRegister};
pub use transport::{BusTransport, ControlLines, Level, Line, LinePolarity, NoBacklight, Transport};
#[cfg(feature = "embassy-time")]
pub use wait::TimeoutDeadline;
pub use wait::{DEFAULT_SPIN_LIMIT, Deadline, SpinBudget, Timeout, spin_until};

// Screen dimensions for GC9A01 240RGB×240
pub const SCREEN_WIDTH: u16 = 240;
pub const SCREEN_HEIGHT: u16 = 240;

/// GC9A01 panel driver.
///
/// Owns the transport (through the [`Framer`]) and the panel power state.
/// Drawing before [`GC9A01::init`] has completed is not defended against.
pub struct GC9A01<T> {
    framer: Framer<T>,
    timing: Timing,
    state: PanelState,
}

impl<T> GC9A01<T> {
    pub fn new(transport: T) -> Self {
        Self::with_timing(transport, Timing::default())
    }

    /// Delays below the datasheet minima are raised to the minima.
    pub fn with_timing(transport: T, timing: Timing) -> Self {
        let timing = timing.sanitized();
        Self {
            framer: Framer::new(transport, &timing),
            timing,
            state: PanelState::Unpowered,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn transport(&self) -> &T {
        self.framer.transport()
    }

    pub fn release(self) -> T {
        self.framer.release()
    }
}
