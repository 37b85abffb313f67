use core::fmt;

use embedded_hal::digital::ErrorKind as PinErrorKind;

/// Errors raised by the shipped transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E = ()> {
    /// Communication error
    Comm(E),
    /// Pin setting error
    Pin(PinErrorKind),
    /// A bounded wait on the bus expired and the transport is configured
    /// with [`TimeoutPolicy::Fail`](crate::TimeoutPolicy::Fail).
    Timeout,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Comm(e) => write!(f, "bus communication failed: {e:?}"),
            Error::Pin(kind) => write!(f, "control line could not be driven: {kind:?}"),
            Error::Timeout => f.write_str("bus wait expired"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Comm(_) => defmt::write!(f, "Comm"),
            Error::Pin(_) => defmt::write!(f, "Pin"),
            Error::Timeout => defmt::write!(f, "Timeout"),
        }
    }
}
