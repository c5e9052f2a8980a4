//! Cutting the selected region out of an image.
//!
//! The region is the polygon's bounding box, clamped to the image. A pixel is
//! kept when its centre lies inside the polygon (even-odd rule, edges
//! included); every other pixel becomes fully transparent.

use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use lasso_core::logging::targets;

use crate::error::{Result, SelectionError};
use crate::geometry::{Point, polygon_contains};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Bounding box of `polygon` clamped to a `width` x `height` image, or
/// `None` when it covers no pixel.
pub fn bounding_region(polygon: &[Point], width: u32, height: u32) -> Option<Region> {
    let min_x = polygon.iter().map(|p| p.x).min()?;
    let max_x = polygon.iter().map(|p| p.x).max()?;
    let min_y = polygon.iter().map(|p| p.y).min()?;
    let max_y = polygon.iter().map(|p| p.y).max()?;

    let clamp = |v: i32, limit: u32| v.clamp(0, limit as i32) as u32;
    let region = Region {
        x0: clamp(min_x, width),
        y0: clamp(min_y, height),
        x1: clamp(max_x, width),
        y1: clamp(max_y, height),
    };
    (region.width() > 0 && region.height() > 0).then_some(region)
}

/// The part of `image` enclosed by `polygon`, cropped to its bounding box.
pub fn cut_out(image: &RgbaImage, polygon: &[Point]) -> Result<RgbaImage> {
    let region =
        bounding_region(polygon, image.width(), image.height()).ok_or(SelectionError::EmptyRegion)?;

    Ok(RgbaImage::from_fn(region.width(), region.height(), |x, y| {
        let (ix, iy) = (region.x0 + x, region.y0 + y);
        if polygon_contains(polygon, ix as f64 + 0.5, iy as f64 + 0.5) {
            *image.get_pixel(ix, iy)
        } else {
            TRANSPARENT
        }
    }))
}

/// Encode the region of `image` enclosed by `polygon` as PNG into `sink`.
pub fn write_png<W: Write>(image: &RgbaImage, polygon: &[Point], sink: W) -> Result<()> {
    let cut = cut_out(image, polygon)?;
    PngEncoder::new(sink).write_image(
        cut.as_raw(),
        cut.width(),
        cut.height(),
        ExtendedColorType::Rgba8,
    )?;
    tracing::debug!(
        target: targets::EXPORT,
        width = cut.width(),
        height = cut.height(),
        vertices = polygon.len(),
        "selection exported"
    );
    Ok(())
}
