use embedded_hal::spi::{MODE_3, Mode};

use crate::transport::LinePolarity;

/// Clock feeding the SPI peripheral on the reference board (CH32V003 APB2).
pub const DEFAULT_BUS_CLOCK_HZ: u32 = 48_000_000;
/// Slow enough for panels behind a level translator (SN74LVCC3245A).
pub const DEFAULT_TARGET_HZ: u32 = 1_500_000;

// Datasheet minima for the reset and power sequencing.
pub const MIN_RESET_PULSE_MS: u32 = 10;
pub const MIN_RESET_RECOVERY_MS: u32 = 120;
pub const MIN_SLEEP_OUT_MS: u32 = 120;
pub const MIN_DISPLAY_ON_MS: u32 = 20;

/// What a transport does when a bounded bus wait expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutPolicy {
    /// Count the timeout and carry on.
    #[default]
    Continue,
    /// Count the timeout and return [`Error::Timeout`](crate::Error::Timeout).
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub line_polarity: LinePolarity,
    pub bus_clock_hz: u32,
    pub target_hz: u32,
    pub on_timeout: TimeoutPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_polarity: LinePolarity::Normal,
            bus_clock_hz: DEFAULT_BUS_CLOCK_HZ,
            target_hz: DEFAULT_TARGET_HZ,
            on_timeout: TimeoutPolicy::Continue,
        }
    }
}

impl Config {
    pub fn divider(&self) -> Divider {
        Divider::for_rate(self.bus_clock_hz, self.target_hz)
    }

    pub fn bus_settings(&self) -> BusSettings {
        BusSettings {
            mode: MODE_3,
            msb_first: true,
            divider: self.divider(),
        }
    }
}

/// SPI baud rate prescaler. The discriminant is the value of the BR field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Divider {
    Div2 = 0,
    Div4 = 1,
    Div8 = 2,
    Div16 = 3,
    Div32 = 4,
    Div64 = 5,
    Div128 = 6,
    Div256 = 7,
}

impl Divider {
    const ALL: [Divider; 8] = [
        Divider::Div2,
        Divider::Div4,
        Divider::Div8,
        Divider::Div16,
        Divider::Div32,
        Divider::Div64,
        Divider::Div128,
        Divider::Div256,
    ];

    /// Largest divider not above `clock_hz / target_hz`, between /2 and /256.
    pub fn for_rate(clock_hz: u32, target_hz: u32) -> Self {
        if target_hz == 0 {
            return Divider::Div256;
        }
        let ratio = clock_hz / target_hz;
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|divider| ratio >= divider.ratio())
            .unwrap_or(Divider::Div2)
    }

    /// Prescaler field value for [`TxRegister::configure`](crate::TxRegister::configure).
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn ratio(self) -> u32 {
        2 << (self as u32)
    }

    pub const fn frequency(self, clock_hz: u32) -> u32 {
        clock_hz / self.ratio()
    }
}

/// Electrical settings programmed into a register-level SPI peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusSettings {
    /// Always mode 3: clock idles high, data sampled on the trailing edge.
    pub mode: Mode,
    pub msb_first: bool,
    pub divider: Divider,
}

/// Delays used by the framer and the panel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Reset held inactive before the pulse.
    pub reset_settle_ms: u32,
    pub reset_pulse_ms: u32,
    /// Quiet time after releasing reset, before any bus traffic.
    pub reset_recovery_ms: u32,
    pub sleep_out_ms: u32,
    pub display_on_ms: u32,
    /// Pause after each select or mode change inside a frame.
    pub line_settle_us: u32,
    /// Pause after a frame releases select.
    pub frame_gap_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_settle_ms: 10,
            reset_pulse_ms: MIN_RESET_PULSE_MS,
            reset_recovery_ms: MIN_RESET_RECOVERY_MS,
            sleep_out_ms: MIN_SLEEP_OUT_MS,
            display_on_ms: MIN_DISPLAY_ON_MS,
            line_settle_us: 1,
            frame_gap_us: 10,
        }
    }
}

impl Timing {
    /// Raise every power sequencing delay to its datasheet minimum.
    pub fn sanitized(self) -> Self {
        Self {
            reset_pulse_ms: self.reset_pulse_ms.max(MIN_RESET_PULSE_MS),
            reset_recovery_ms: self.reset_recovery_ms.max(MIN_RESET_RECOVERY_MS),
            sleep_out_ms: self.sleep_out_ms.max(MIN_SLEEP_OUT_MS),
            display_on_ms: self.display_on_ms.max(MIN_DISPLAY_ON_MS),
            ..self
        }
    }
}
