//! CPU framebuffer of ARGB8888 pixels
//!
//! Row-major, top-left origin. Writes outside the buffer are dropped.

use super::color::{argb, channels, colors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// New buffer cleared to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![colors::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for upload to a presentation surface (native endianness)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at `(x, y)`, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel; silently clipped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Count pixels that differ from `color`
    pub fn count_not(&self, color: u32) -> usize {
        self.pixels.iter().filter(|&&p| p != color).count()
    }

    /// Mosaic pass: each `cell × cell` block becomes the average of its RGB
    ///
    /// Partial blocks at the right/bottom edges average only the pixels they
    /// cover. Output alpha is opaque. A cell of 0 or 1 is a no-op.
    pub fn pixelate(&mut self, cell: u32) {
        if cell <= 1 {
            return;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let cell = cell as usize;

        for by in (0..h).step_by(cell) {
            for bx in (0..w).step_by(cell) {
                let y_end = (by + cell).min(h);
                let x_end = (bx + cell).min(w);

                let mut totals = [0u32; 3];
                let mut count = 0u32;
                for y in by..y_end {
                    for &p in &self.pixels[y * w + bx..y * w + x_end] {
                        let [_, r, g, b] = channels(p);
                        totals[0] += r as u32;
                        totals[1] += g as u32;
                        totals[2] += b as u32;
                        count += 1;
                    }
                }

                let avg = argb(
                    0xFF,
                    (totals[0] / count) as u8,
                    (totals[1] / count) as u8,
                    (totals[2] / count) as u8,
                );
                for y in by..y_end {
                    self.pixels[y * w + bx..y * w + x_end].fill(avg);
                }
            }
        }
    }
}
