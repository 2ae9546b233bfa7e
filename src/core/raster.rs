use image::RgbaImage;
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Row-major interleaved RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster of the given size.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, pixel: Rgba) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * 4 {
            return Err(Error::InvalidInput {
                stage: "raster buffer",
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let (w, h) = image.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            data: image.into_raw(),
        }
    }

    pub fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone()).ok_or(
            Error::InvalidInput {
                stage: "image conversion",
                width: self.width,
                height: self.height,
            },
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, px: Rgba) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.data[(y * self.width + x) * 4 + 3]
    }

    /// One row of interleaved RGBA bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * 4;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * 4;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    pub fn row_has_opaque(&self, y: usize) -> bool {
        self.row(y).chunks_exact(4).any(|px| px[3] != 0)
    }

    pub fn grayscale(&self) -> GrayscaleField {
        GrayscaleField::from_raster(self)
    }
}

/// floor(mean(R, G, B)) per pixel, alpha ignored. Indexed `[row, col]`.
#[derive(Debug, Clone)]
pub struct GrayscaleField {
    values: Array2<u8>,
}

impl GrayscaleField {
    pub fn from_raster(raster: &Raster) -> Self {
        let values = Array2::from_shape_fn((raster.height(), raster.width()), |(row, col)| {
            let [r, g, b, _] = raster.pixel(col, row);
            ((r as u16 + g as u16 + b as u16) / 3) as u8
        });
        Self { values }
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.values.view()
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.values[[row, col]]
    }
}
