//! Command/data framing on top of a [`Transport`].
//!
//! A frame starts when select goes LOW and ends when it goes HIGH again.
//! Mode is LOW while the opcode is on the wire and HIGH for parameters and
//! pixel data.

use crate::config::Timing;
use crate::transport::{Level, Line, Transport};

pub struct Framer<T> {
    transport: T,
    line_settle_us: u32,
    frame_gap_us: u32,
}

impl<T> Framer<T> {
    pub fn new(transport: T, timing: &Timing) -> Self {
        Self {
            transport,
            line_settle_us: timing.line_settle_us,
            frame_gap_us: timing.frame_gap_us,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Framer",),
    async(feature = "async", keep_self)
)]
impl<T> Framer<T>
where
    T: Transport,
{
    /// Open a frame and send `opcode`. Select stays LOW so the following
    /// parameter or pixel bytes belong to the same transaction.
    pub async fn send_command(&mut self, opcode: u8) -> Result<(), T::Error> {
        self.set(Line::Select, Level::Low).await?;
        self.set(Line::Mode, Level::Low).await?;
        self.transport.write_byte(opcode).await
    }

    /// Send one parameter byte and close the frame.
    pub async fn send_data(&mut self, byte: u8) -> Result<(), T::Error> {
        self.set(Line::Mode, Level::High).await?;
        self.transport.write_byte(byte).await?;
        self.release_select().await
    }

    /// A whole register write as one frame: select is asserted once and
    /// released once.
    pub async fn send_command_with_params(
        &mut self,
        opcode: u8,
        params: &[u8],
    ) -> Result<(), T::Error> {
        self.send_command(opcode).await?;
        if !params.is_empty() {
            self.set(Line::Mode, Level::High).await?;
            self.transport.write_bytes(params).await?;
        }
        self.release_select().await
    }

    /// Switch the open frame to data mode for a pixel stream.
    pub async fn begin_pixels(&mut self) -> Result<(), T::Error> {
        self.set(Line::Mode, Level::High).await
    }

    /// Write data bytes into the open frame.
    pub async fn stream(&mut self, bytes: &[u8]) -> Result<(), T::Error> {
        self.transport.write_bytes(bytes).await
    }

    /// Wait for the last byte to leave the bus, then release select.
    pub async fn end_frame(&mut self) -> Result<(), T::Error> {
        self.transport.flush().await?;
        self.release_select().await
    }

    async fn set(&mut self, line: Line, level: Level) -> Result<(), T::Error> {
        self.transport.set_line(line, level)?;
        if self.line_settle_us > 0 {
            self.transport.delay_us(self.line_settle_us).await;
        }
        Ok(())
    }

    async fn release_select(&mut self) -> Result<(), T::Error> {
        self.transport.set_line(Line::Select, Level::High)?;
        if self.frame_gap_us > 0 {
            self.transport.delay_us(self.frame_gap_us).await;
        }
        Ok(())
    }
}
