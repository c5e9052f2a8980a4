//! Pixel cost graphs for intelligent scissors.
//!
//! Every pixel is a vertex connected to its eight neighbours. Stepping onto a
//! pixel is cheap where the image has a strong edge, so shortest paths snap to
//! object boundaries.
//!
//! Edge strength is a cross gradient: the sum of the absolute central
//! differences in x and y, halved and clamped to `0..=255`.
//!
//! - [`CostModel::CrossGradMono`] takes the gradient of BT.709 luminance.
//! - [`CostModel::Color`] takes the strongest gradient of the R, G and B
//!   channels, so boundaries between equally bright colours still attract
//!   the path.

use image::RgbaImage;
use rayon::prelude::*;

use crate::graph::Graph;

/// Step cost for a horizontal or vertical move.
const STRAIGHT_STEP: i64 = 5;
/// Step cost for a diagonal move (5 * sqrt 2, rounded).
const DIAGONAL_STEP: i64 = 7;
/// Minimum per-step weight, paid even on the strongest edge.
const BASE_COST: i64 = 1;
/// Largest edge strength.
const MAX_STRENGTH: i64 = 255;

const NEIGHBOR_OFFSETS: [(i64, i64, i64); 8] = [
    (-1, -1, DIAGONAL_STEP),
    (0, -1, STRAIGHT_STEP),
    (1, -1, DIAGONAL_STEP),
    (-1, 0, STRAIGHT_STEP),
    (1, 0, STRAIGHT_STEP),
    (-1, 1, DIAGONAL_STEP),
    (0, 1, STRAIGHT_STEP),
    (1, 1, DIAGONAL_STEP),
];

/// How pixel colours are turned into edge strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CostModel {
    /// Cross gradient of grayscale luminance.
    #[default]
    CrossGradMono,
    /// Strongest per-channel cross gradient.
    Color,
}

impl CostModel {
    /// Stable name of the cost model.
    pub fn name(self) -> &'static str {
        match self {
            Self::CrossGradMono => "CrossGradMono",
            Self::Color => "Color",
        }
    }

    /// Look a cost model up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CrossGradMono" => Some(Self::CrossGradMono),
            "Color" => Some(Self::Color),
            _ => None,
        }
    }

    fn channels(self, pixel: &image::Rgba<u8>) -> [i32; 3] {
        let [r, g, b, _] = pixel.0;
        match self {
            // BT.709 luminosity in 8.8 fixed point.
            Self::CrossGradMono => {
                let luma = (54 * r as i32 + 183 * g as i32 + 19 * b as i32) >> 8;
                [luma, luma, luma]
            }
            Self::Color => [r as i32, g as i32, b as i32],
        }
    }
}

/// An 8-connected pixel graph weighted by edge strength.
#[derive(Debug, Clone)]
pub struct ImageGraph {
    width: u32,
    height: u32,
    cost_model: CostModel,
    /// Edge strength per pixel, row-major.
    strength: Vec<u8>,
}

impl ImageGraph {
    /// Build the graph for `image`.
    ///
    /// Rows are processed in parallel.
    pub fn new(image: &RgbaImage, cost_model: CostModel) -> Self {
        let (width, height) = image.dimensions();
        let mut strength = vec![0u8; width as usize * height as usize];

        if width > 0 {
            strength
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = cross_gradient(image, cost_model, x as u32, y as u32);
                    }
                });
        }

        tracing::debug!(
            target: crate::SEARCH_TARGET,
            width,
            height,
            cost_model = cost_model.name(),
            "built image cost graph"
        );

        Self {
            width,
            height,
            cost_model,
            strength,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The cost model the graph was built with.
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Vertex id of pixel `(x, y)`, or `None` outside the image.
    pub fn vertex(&self, x: i64, y: i64) -> Option<usize> {
        let inside = x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64;
        inside.then(|| y as usize * self.width as usize + x as usize)
    }

    /// Pixel coordinates of `vertex`.
    pub fn pixel(&self, vertex: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((vertex % width) as u32, (vertex / width) as u32)
    }

    /// Edge strength at `(x, y)`.
    pub fn strength(&self, x: u32, y: u32) -> u8 {
        self.strength[y as usize * self.width as usize + x as usize]
    }

    /// Vertex id of the in-bounds pixel nearest to `(x, y)`.
    ///
    /// Returns `None` only for an empty image.
    pub fn clamp_vertex(&self, x: i64, y: i64) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x = x.clamp(0, self.width as i64 - 1);
        let y = y.clamp(0, self.height as i64 - 1);
        self.vertex(x, y)
    }
}

impl Graph for ImageGraph {
    fn vertex_count(&self) -> usize {
        self.strength.len()
    }

    fn neighbors(&self, vertex: usize, out: &mut Vec<(usize, i64)>) {
        let (x, y) = self.pixel(vertex);
        for &(dx, dy, step) in &NEIGHBOR_OFFSETS {
            if let Some(next) = self.vertex(x as i64 + dx, y as i64 + dy) {
                let weakness = MAX_STRENGTH - self.strength[next] as i64;
                out.push((next, step * (BASE_COST + weakness)));
            }
        }
    }
}

fn cross_gradient(image: &RgbaImage, cost_model: CostModel, x: u32, y: u32) -> u8 {
    let (width, height) = image.dimensions();
    let sample = |sx: u32, sy: u32| cost_model.channels(image.get_pixel(sx, sy));

    let left = sample(x.saturating_sub(1), y);
    let right = sample((x + 1).min(width - 1), y);
    let up = sample(x, y.saturating_sub(1));
    let down = sample(x, (y + 1).min(height - 1));

    let strongest = (0..3)
        .map(|c| ((right[c] - left[c]).abs() + (down[c] - up[c]).abs()) / 2)
        .max()
        .unwrap_or(0);
    strongest.clamp(0, MAX_STRENGTH as i32) as u8
}
