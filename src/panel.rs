//! Panel bring-up: hardware reset, vendor register table, sleep out and
//! display on.

use crate::GC9A01;
use crate::init_table::{INIT_TABLE, Register};
use crate::instruction::Instruction;
use crate::transport::{Level, Line, Transport};

/// Power state of the panel as far as the driver knows. Nothing is read
/// back from the panel, so every transition is assumed to succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    Unpowered,
    Resetting,
    Configuring,
    Sleeping,
    Active,
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "GC9A01",),
    async(feature = "async", keep_self)
)]
impl<T> GC9A01<T>
where
    T: Transport,
{
    /// Reset the panel and bring it to [`PanelState::Active`].
    ///
    /// Safe to call again on an active panel; the whole sequence is replayed.
    pub async fn init(&mut self) -> Result<(), T::Error> {
        self.enter(PanelState::Resetting);
        self.reset().await?;

        self.enter(PanelState::Configuring);
        self.replay(INIT_TABLE).await?;

        self.framer
            .send_command_with_params(Instruction::SleepOut as u8, &[])
            .await?;
        self.delay_ms(self.timing.sleep_out_ms).await;
        self.enter(PanelState::Sleeping);

        self.framer
            .send_command_with_params(Instruction::DisplayOn as u8, &[])
            .await?;
        self.delay_ms(self.timing.display_on_ms).await;
        self.enter(PanelState::Active);
        Ok(())
    }

    /// Park the bus, then pulse RESX. No bus traffic may follow until the
    /// recovery delay has elapsed.
    async fn reset(&mut self) -> Result<(), T::Error> {
        let transport = self.framer.transport_mut();
        transport.set_line(Line::Select, Level::High)?;
        transport.set_line(Line::Mode, Level::Low)?;

        transport.set_line(Line::Reset, Level::High)?;
        transport.delay_ms(self.timing.reset_settle_ms).await;
        transport.set_line(Line::Reset, Level::Low)?;
        transport.delay_ms(self.timing.reset_pulse_ms).await;
        transport.set_line(Line::Reset, Level::High)?;
        transport.delay_ms(self.timing.reset_recovery_ms).await;
        Ok(())
    }

    /// Send every entry of `table` in order, one frame per register.
    async fn replay(&mut self, table: &[Register]) -> Result<(), T::Error> {
        for register in table {
            self.framer
                .send_command_with_params(register.opcode, register.params)
                .await?;
            if register.delay_ms > 0 {
                self.delay_ms(register.delay_ms).await;
            }
        }
        Ok(())
    }

    /// Drive the backlight enable line.
    pub async fn set_backlight(&mut self, on: bool) -> Result<(), T::Error> {
        let level = if on { Level::High } else { Level::Low };
        self.framer
            .transport_mut()
            .set_line(Line::Backlight, level)
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.framer.transport_mut().delay_ms(ms).await;
    }

    fn enter(&mut self, state: PanelState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("gc9a01: {} -> {}", self.state, state);
        self.state = state;
    }
}
