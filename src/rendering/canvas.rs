use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};
use image::{ImageBuffer, Rgba, RgbaImage};
use crate::errors::RenderError;
use crate::rendering::BackBuffer;

/// Pixel buffer that embedded-graphics primitives and fonts can draw into.
/// Pixels outside the buffer are clipped.
pub struct Canvas {
    buffer: BackBuffer
}

impl Canvas {
    /// Allocates a buffer filled with `background`. Allocation failure is
    /// reported instead of aborting the process.
    pub fn allocate(width: u32, height: u32, background: Rgba<u8>) -> Result<Self, RenderError> {
        let exhausted = || RenderError::BufferAllocation { width, height };

        let len = (width as usize).checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(exhausted)?;

        let mut raw: Vec<u8> = Vec::new();
        raw.try_reserve_exact(len).map_err(|_| exhausted())?;
        raw.resize(len, 0);

        let mut buffer: BackBuffer = ImageBuffer::from_raw(width, height, raw).ok_or_else(exhausted)?;
        buffer.pixels_mut().for_each(|p| *p = background);

        Ok(Self { buffer })
    }

    pub fn width(&self) -> u32 { self.buffer.width() }
    pub fn height(&self) -> u32 { self.buffer.height() }

    pub fn set_pixel(&mut self, x: i32, y: i32, colour: Rgb888) {
        if x < 0 || y < 0 { return }
        let (x, y) = (x as u32, y as u32);

        if x < self.buffer.width() && y < self.buffer.height() {
            self.buffer.put_pixel(x, y, Rgba([colour.r(), colour.g(), colour.b(), 255]));
        }
    }

    /// Alpha-blends `image` with its top-left corner at (x, y)
    pub fn overlay(&mut self, image: &RgbaImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.buffer, image, x, y);
    }

    /// A view that draws every pixel as a `factor` x `factor` block, offset by `origin`
    pub fn scaled(&mut self, origin: Point, factor: u32) -> Scaled<'_> {
        Scaled { canvas: self, origin, factor: factor.max(1) }
    }

    pub fn into_buffer(self) -> BackBuffer { self.buffer }

    /// The buffer turned a quarter turn counter-clockwise. The destination is
    /// allocated like any other canvas, so running out of memory is reported.
    pub fn into_rotated_counter_clockwise(self) -> Result<BackBuffer, RenderError> {
        let (width, height) = (self.height(), self.width());
        let mut rotated = Canvas::allocate(width, height, Rgba([0, 0, 0, 0]))?.buffer;

        image::imageops::rotate270_in(&self.buffer, &mut rotated)
            .map_err(|_| RenderError::BufferAllocation { width, height })?;
        Ok(rotated)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { Size::new(self.buffer.width(), self.buffer.height()) }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = RenderError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where I: IntoIterator<Item = Pixel<Self::Color>>
    {
        for Pixel(point, colour) in pixels {
            self.set_pixel(point.x, point.y, colour);
        }
        Ok(())
    }
}

pub struct Scaled<'a> {
    canvas: &'a mut Canvas,
    origin: Point,
    factor: u32
}

impl OriginDimensions for Scaled<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() / self.factor, self.canvas.height() / self.factor)
    }
}

impl DrawTarget for Scaled<'_> {
    type Color = Rgb888;
    type Error = RenderError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where I: IntoIterator<Item = Pixel<Self::Color>>
    {
        let f = self.factor as i32;
        for Pixel(point, colour) in pixels {
            let (x0, y0) = (self.origin.x + point.x * f, self.origin.y + point.y * f);
            for dy in 0..f {
                for dx in 0..f {
                    self.canvas.set_pixel(x0 + dx, y0 + dy, colour);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use crate::rendering::colour::{BLACK, COLOUR_BACKGROUND};

    #[test]
    fn test_allocate_fills_background() {
        let canvas = Canvas::allocate(16, 8, COLOUR_BACKGROUND).unwrap();
        let buffer = canvas.into_buffer();
        assert_eq!(buffer.dimensions(), (16, 8));
        assert!(buffer.pixels().all(|p| *p == COLOUR_BACKGROUND));
    }

    #[test]
    fn test_allocation_overflow_is_an_error() {
        assert!(matches!(Canvas::allocate(u32::MAX, u32::MAX, COLOUR_BACKGROUND),
                         Err(RenderError::BufferAllocation { .. })));
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut canvas = Canvas::allocate(10, 10, COLOUR_BACKGROUND).unwrap();
        Rectangle::new(Point::new(-5, -5), Size::new(30, 30))
            .into_styled(PrimitiveStyle::with_fill(BLACK))
            .draw(&mut canvas)
            .unwrap();

        assert!(canvas.into_buffer().pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn test_rotation_counter_clockwise() {
        let mut canvas = Canvas::allocate(3, 2, COLOUR_BACKGROUND).unwrap();
        canvas.set_pixel(2, 0, BLACK);
        canvas.set_pixel(0, 1, BLACK);

        let rotated = canvas.into_rotated_counter_clockwise().unwrap();
        assert_eq!(rotated.dimensions(), (2, 3));
        // Top-right corner moves to top-left, bottom-left to bottom-right
        assert_eq!(*rotated.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*rotated.get_pixel(1, 2), Rgba([0, 0, 0, 255]));
        assert_eq!(rotated.pixels().filter(|p| **p == COLOUR_BACKGROUND).count(), 4);
    }

    #[test]
    fn test_scaled_view() {
        let mut canvas = Canvas::allocate(10, 10, COLOUR_BACKGROUND).unwrap();
        Pixel(Point::new(1, 1), BLACK).draw(&mut canvas.scaled(Point::new(2, 0), 3)).unwrap();

        let buffer = canvas.into_buffer();
        assert_eq!(*buffer.get_pixel(5, 3), Rgba([0, 0, 0, 255]));
        assert_eq!(*buffer.get_pixel(7, 5), Rgba([0, 0, 0, 255]));
        assert_eq!(*buffer.get_pixel(4, 3), COLOUR_BACKGROUND);
        assert_eq!(*buffer.get_pixel(8, 3), COLOUR_BACKGROUND);
    }
}
