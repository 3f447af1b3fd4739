//! Image-backed tile rendering: decode, exact-resize, quadrant-crop.

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::config::schema::SheetGeometry;
use crate::layout::{Quad, TileSource};
use crate::manifest::Entry;

/// Renders manifest entries to cell-sized RGBA tiles.
///
/// Small entries resize to a single cell; large entries resize to a 2x2
/// cell block and split into quadrants. The resize is exact, aspect ratio
/// is not preserved.
#[derive(Debug, Clone)]
pub struct ImageTileSource {
    geo: SheetGeometry,
}

impl ImageTileSource {
    pub fn new(geo: SheetGeometry) -> Self {
        Self { geo }
    }

    fn decode(&self, entry: &Entry) -> Result<DynamicImage> {
        image::open(&entry.image).with_context(|| {
            format!("failed to open image for '{}': {}", entry.title, entry.image.display())
        })
    }
}

impl TileSource for ImageTileSource {
    type Artifact = RgbaImage;

    fn small(&mut self, entry: &Entry) -> Result<RgbaImage> {
        debug!("render small '{}'", entry.title);
        let img = self.decode(entry)?;
        Ok(img
            .resize_exact(self.geo.cell_width, self.geo.cell_height, FilterType::Lanczos3)
            .to_rgba8())
    }

    fn large(&mut self, entry: &Entry) -> Result<Quad<RgbaImage>> {
        debug!("render large '{}'", entry.title);
        let img = self.decode(entry)?;
        let block = img
            .resize_exact(self.geo.cell_width * 2, self.geo.cell_height * 2, FilterType::Lanczos3)
            .to_rgba8();
        Ok(quadrants(&block))
    }
}

/// Split an even-dimensioned image into four equal quadrants.
pub fn quadrants(img: &RgbaImage) -> Quad<RgbaImage> {
    let (w, h) = (img.width() / 2, img.height() / 2);
    let crop = |x, y| image::imageops::crop_imm(img, x, y, w, h).to_image();
    Quad {
        tl: crop(0, 0),
        tr: crop(w, 0),
        bl: crop(0, h),
        br: crop(w, h),
    }
}
