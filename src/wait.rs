//! Bounded waits on peripheral status flags.
//!
//! A busy flag that never clears must not hang the firmware. Every wait is
//! guarded by a [`Deadline`]; once it expires the wait is abandoned and the
//! caller decides what to do with the [`Timeout`].

/// Polls allowed per wait before it is abandoned.
pub const DEFAULT_SPIN_LIMIT: u32 = 100_000;

/// Marker returned when a wait is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout;

/// Something that can tell a polling loop to give up.
pub trait Deadline {
    /// Arm the deadline for a new wait.
    fn restart(&mut self);

    /// Called once per failed poll; returns `true` when the wait should be
    /// abandoned.
    fn expired(&mut self) -> bool;
}

/// Counts polls instead of measuring time.
#[derive(Debug, Clone, Copy)]
pub struct SpinBudget {
    limit: u32,
    remaining: u32,
}

impl SpinBudget {
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }
}

impl Default for SpinBudget {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_LIMIT)
    }
}

impl Deadline for SpinBudget {
    fn restart(&mut self) {
        self.remaining = self.limit;
    }

    fn expired(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

/// Wall-clock deadline backed by the embassy time driver.
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy)]
pub struct TimeoutDeadline {
    timeout: embassy_time::Duration,
    until: embassy_time::Instant,
}

#[cfg(feature = "embassy-time")]
impl TimeoutDeadline {
    pub fn new(timeout: embassy_time::Duration) -> Self {
        Self {
            timeout,
            until: embassy_time::Instant::now() + timeout,
        }
    }
}

#[cfg(feature = "embassy-time")]
impl Deadline for TimeoutDeadline {
    fn restart(&mut self) {
        self.until = embassy_time::Instant::now() + self.timeout;
    }

    fn expired(&mut self) -> bool {
        embassy_time::Instant::now() >= self.until
    }
}

/// Poll `ready` until it returns `true` or `deadline` expires.
pub fn spin_until<D, F>(deadline: &mut D, mut ready: F) -> Result<(), Timeout>
where
    D: Deadline + ?Sized,
    F: FnMut() -> bool,
{
    deadline.restart();
    loop {
        if ready() {
            return Ok(());
        }
        if deadline.expired() {
            return Err(Timeout);
        }
        core::hint::spin_loop();
    }
}
