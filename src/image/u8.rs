//! Borrowed 8-bit grayscale view, the form decoded images arrive in.
use crate::error::GhtError;
use crate::image::Grid;

#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view over `data`; fails when the buffer is too short.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Result<Self, GhtError> {
        if data.len() < w * h {
            return Err(GhtError::DataLengthMismatch {
                expected: w * h,
                found: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Promote to an owned intensity grid in `[0, 255]`.
    pub fn to_grid(&self) -> Grid {
        Grid::from_u8(self)
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
