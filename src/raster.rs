//! Window addressing and solid fills.
//!
//! Rectangles are half-open: `x1` and `y1` are one past the last column and
//! row. The controller wants inclusive end addresses, so the conversion
//! happens in [`GC9A01::set_window`].

#[cfg(not(feature = "async"))]
use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::Rgb565,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::instruction::Instruction;
use crate::transport::Transport;
use crate::{GC9A01, SCREEN_HEIGHT, SCREEN_WIDTH};

// Pixels sent per bus write when filling. 512 bytes of stack keeps
// fill_rect usable from small executor tasks.
const BATCH_PIXELS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    const fn width(&self) -> u16 {
        self.x1.saturating_sub(self.x0)
    }

    const fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0)
    }

    pub const fn pixel_count(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// Cut the far edges down to `width` × `height`. `None` when nothing of
    /// the rectangle is left.
    pub fn clamp(self, width: u16, height: u16) -> Option<Rect> {
        let x1 = self.x1.min(width);
        let y1 = self.y1.min(height);
        if self.x0 >= x1 || self.y0 >= y1 {
            return None;
        }
        Some(Rect { x1, y1, ..self })
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "GC9A01",),
    async(feature = "async", keep_self)
)]
impl<T> GC9A01<T>
where
    T: Transport,
{
    /// Program column and row address ranges for `[x0, x1) × [y0, y1)` and
    /// arm memory write.
    ///
    /// The memory write frame is left open (select LOW): pixel data has to
    /// follow immediately. The window is clamped to the panel like
    /// [`GC9A01::fill_rect`]; an empty window sends nothing and leaves
    /// memory write unarmed.
    pub async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), T::Error> {
        let Some(rect) = Rect::new(x0, y0, x1, y1).clamp(SCREEN_WIDTH, SCREEN_HEIGHT) else {
            return Ok(());
        };
        let Rect { x0, y0, .. } = rect;
        let x_end = rect.x1 - 1;
        let y_end = rect.y1 - 1;

        self.framer
            .send_command_with_params(
                Instruction::ColumnAddressSet as u8,
                &[(x0 >> 8) as u8, (x0 & 0xFF) as u8, (x_end >> 8) as u8, (x_end & 0xFF) as u8],
            )
            .await?;
        self.framer
            .send_command_with_params(
                Instruction::RowAddressSet as u8,
                &[(y0 >> 8) as u8, (y0 & 0xFF) as u8, (y_end >> 8) as u8, (y_end & 0xFF) as u8],
            )
            .await?;
        self.framer
            .send_command(Instruction::MemoryWrite as u8)
            .await
    }

    /// Fill `[x0, x1) × [y0, y1)` with `color`.
    ///
    /// Edges past the panel are clamped; a rectangle with nothing left on
    /// the panel sends nothing.
    pub async fn fill_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Color,
    ) -> Result<(), T::Error> {
        let Some(rect) = Rect::new(x0, y0, x1, y1).clamp(SCREEN_WIDTH, SCREEN_HEIGHT) else {
            return Ok(());
        };

        self.set_window(rect.x0, rect.y0, rect.x1, rect.y1).await?;
        self.framer.begin_pixels().await?;

        let color_bytes = color.to_be_bytes();
        let mut batch_buffer = [0u8; BATCH_PIXELS * 2];
        for pixel in batch_buffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&color_bytes);
        }

        // Select stays LOW for the whole stream.
        let mut remaining = rect.pixel_count() as usize;
        while remaining > 0 {
            let pixels = remaining.min(BATCH_PIXELS);
            self.framer.stream(&batch_buffer[..pixels * 2]).await?;
            remaining -= pixels;
        }

        self.framer.end_frame().await
    }

    /// Fill entire screen with a single color
    pub async fn fill_screen(&mut self, color: Color) -> Result<(), T::Error> {
        self.fill_rect(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT, color)
            .await
    }

    /// Draw a single pixel; points off the panel are ignored.
    pub async fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), T::Error> {
        self.fill_rect(x, y, x.saturating_add(1), y.saturating_add(1), color)
            .await
    }
}

#[cfg(not(feature = "async"))]
impl<T> OriginDimensions for GC9A01<T> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

#[cfg(not(feature = "async"))]
impl<T> DrawTarget for GC9A01<T>
where
    T: Transport,
{
    type Color = Rgb565;
    type Error = T::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.set_pixel(x, y, color.into())?;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        // Clipped to the panel, so every coordinate fits in u16.
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16 + 1,
            bottom_right.y as u16 + 1,
            color.into(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into())
    }
}
