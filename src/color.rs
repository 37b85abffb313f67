use embedded_graphics_core::pixelcolor::{Rgb565, raw::RawU16};
use embedded_graphics_core::prelude::RawData;

/// RGB565 pixel value: red in bits 15-11, green in 10-5, blue in 4-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const BLUE: Color = Color(0x001F);
    pub const YELLOW: Color = Color(0xFFE0);
    pub const CYAN: Color = Color(0x07FF);
    pub const MAGENTA: Color = Color(0xF81F);

    /// Channels are masked to 5, 6 and 5 bits.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color(
            ((red as u16 & 0x1F) << 11) | ((green as u16 & 0x3F) << 5) | (blue as u16 & 0x1F),
        )
    }

    pub const fn from_raw(raw: u16) -> Self {
        Color(raw)
    }

    pub const fn into_inner(self) -> u16 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Wire order: high byte first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Color(raw)
    }
}

impl From<Rgb565> for Color {
    fn from(color: Rgb565) -> Self {
        Color(RawU16::from(color).into_inner())
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::from(RawU16::new(color.0))
    }
}
