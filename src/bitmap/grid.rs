use crate::foundation::core::{FACE_HEIGHT, FACE_WIDTH};
use crate::foundation::error::{FacemapError, FacemapResult};

const PIXELS: usize = (FACE_WIDTH * FACE_HEIGHT) as usize;

#[derive(Clone, PartialEq, Eq)]
/// Monochrome 32x16 face layer; `true` means the pixel is set (dark).
pub struct PixelGrid {
    set: Vec<bool>,
}

impl PixelGrid {
    /// Grid with every pixel unset.
    pub fn blank() -> Self {
        Self {
            set: vec![false; PIXELS],
        }
    }

    /// Grid with every pixel set.
    pub fn filled() -> Self {
        Self {
            set: vec![true; PIXELS],
        }
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut grid = Self::blank();
        for y in 0..FACE_HEIGHT {
            for x in 0..FACE_WIDTH {
                grid.set(x, y, f(x, y));
            }
        }
        grid
    }

    /// Threshold a straight-alpha RGBA8 raster.
    ///
    /// The red channel is read back the way a drawing surface returns it: stored
    /// premultiplied, then divided by alpha again. Fully transparent pixels read as red 0.
    /// Anything below full brightness counts as set.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> FacemapResult<Self> {
        if width != FACE_WIDTH || height != FACE_HEIGHT {
            return Err(FacemapError::decode(format!(
                "face layer must be {FACE_WIDTH}x{FACE_HEIGHT}, got {width}x{height}"
            )));
        }
        if rgba.len() != PIXELS * 4 {
            return Err(FacemapError::decode(format!(
                "expected {} RGBA8 bytes, got {}",
                PIXELS * 4,
                rgba.len()
            )));
        }
        let set = rgba
            .chunks_exact(4)
            .map(|px| read_back_red(px[0], px[3]) < u8::MAX)
            .collect();
        Ok(Self { set })
    }

    /// Pixel at `(x, y)`. Out-of-range coordinates read as unset.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= FACE_WIDTH || y >= FACE_HEIGHT {
            return false;
        }
        self.set[(y * FACE_WIDTH + x) as usize]
    }

    /// Set pixel `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= FACE_WIDTH || y >= FACE_HEIGHT {
            return;
        }
        self.set[(y * FACE_WIDTH + x) as usize] = value;
    }

    /// Pixels in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = bool> + '_ {
        self.set.iter().copied()
    }

    /// Number of set pixels.
    pub fn count_set(&self) -> usize {
        self.set.iter().filter(|p| **p).count()
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::blank()
    }
}

impl std::fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PixelGrid {FACE_WIDTH}x{FACE_HEIGHT}")?;
        for row in self.set.chunks(FACE_WIDTH as usize) {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn read_back_red(r: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let a = u32::from(a);
    let stored = (u32::from(r) * a + 127) / 255;
    ((stored * 255 + a / 2) / a).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/grid.rs"]
mod tests;
