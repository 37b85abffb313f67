//! Recording transport for unit tests.

use std::vec::Vec;

use crate::transport::{Level, Line, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Byte(u8),
    Line(Line, Level),
    DelayMs(u32),
    DelayUs(u32),
    Flush,
}

/// Logs every byte, line change, delay and flush in order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Last level driven on `line`; lines start HIGH.
    pub fn level(&self, line: Line) -> Level {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::Line(l, level) if *l == line => Some(*level),
                _ => None,
            })
            .unwrap_or(Level::High)
    }

    /// Opcodes with their parameter bytes, decoded from the mode line.
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut mode = Level::High;
        let mut commands: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in &self.events {
            match *event {
                Event::Line(Line::Mode, level) => mode = level,
                Event::Byte(b) if mode == Level::Low => commands.push((b, Vec::new())),
                Event::Byte(b) => {
                    if let Some((_, params)) = commands.last_mut() {
                        params.push(b);
                    }
                }
                _ => {}
            }
        }
        commands
    }

    /// (falling, rising) edges seen on select.
    pub fn select_toggles(&self) -> (usize, usize) {
        let count = |level| {
            self.events
                .iter()
                .filter(|e| **e == Event::Line(Line::Select, level))
                .count()
        };
        (count(Level::Low), count(Level::High))
    }

    pub fn bytes_sent_with_select_low(&self) -> bool {
        let mut select = Level::High;
        for event in &self.events {
            match *event {
                Event::Line(Line::Select, level) => select = level,
                Event::Byte(_) if select == Level::High => return false,
                _ => {}
            }
        }
        true
    }

    /// Milliseconds of delay between the event at `index` and the next byte.
    pub fn quiet_ms_after(&self, index: usize) -> u32 {
        self.events[index + 1..]
            .iter()
            .take_while(|e| !matches!(e, Event::Byte(_)))
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .sum()
    }

    /// Index of the byte that carried `opcode` as a command.
    pub fn command_index(&self, opcode: u8) -> Option<usize> {
        let mut mode = Level::High;
        self.events.iter().position(|e| match *e {
            Event::Line(Line::Mode, level) => {
                mode = level;
                false
            }
            Event::Byte(b) => mode == Level::Low && b == opcode,
            _ => false,
        })
    }
}

impl Transport for Recorder {
    type Error = ();

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Byte(byte));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Flush);
        Ok(())
    }

    fn set_line(&mut self, line: Line, level: Level) -> Result<(), Self::Error> {
        self.events.push(Event::Line(line, level));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::DelayMs(ms));
    }

    fn delay_us(&mut self, us: u32) {
        self.events.push(Event::DelayUs(us));
    }
}
