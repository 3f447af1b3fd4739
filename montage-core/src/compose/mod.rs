//! Sheet compositing: blit the flushed cell sequence onto one RGBA canvas,
//! plus the JSON metadata sidecar.

use image::RgbaImage;
use log::debug;

use crate::config::schema::SheetGeometry;
use crate::error::MontageError;
use crate::layout::Tile;

/// Sidecar metadata for a composited sheet.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SheetMeta {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub cells: usize,
    pub blank_cells: usize,
}

impl SheetMeta {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Describe a flushed cell sequence without touching any pixels.
pub fn meta<A>(tiles: &[Tile<A>], geo: &SheetGeometry) -> SheetMeta {
    let cols = geo.tile_width;
    SheetMeta {
        columns: cols,
        rows: (tiles.len() + cols - 1) / cols,
        cell_width: geo.cell_width,
        cell_height: geo.cell_height,
        cells: tiles.len(),
        blank_cells: tiles.iter().filter(|t| matches!(t, Tile::Blank)).count(),
    }
}

/// Composite the row-major cell sequence into one sheet. Blank cells stay
/// transparent; the final row may be partial.
pub fn compose(tiles: &[Tile<RgbaImage>], geo: &SheetGeometry) -> Result<RgbaImage, MontageError> {
    if tiles.is_empty() {
        return Err(MontageError::EmptySheet);
    }
    let cols = geo.tile_width;
    if cols < 2 {
        return Err(MontageError::TileWidthTooSmall { width: cols });
    }
    let rows = (tiles.len() + cols - 1) / cols;
    let mut sheet = RgbaImage::new(cols as u32 * geo.cell_width, rows as u32 * geo.cell_height);
    debug!("compositing {} cells into {} rows of {}", tiles.len(), rows, cols);
    for (i, tile) in tiles.iter().enumerate() {
        if let Tile::Art(img) = tile {
            if img.width() != geo.cell_width || img.height() != geo.cell_height {
                return Err(MontageError::TileGeometry {
                    cell_w: geo.cell_width,
                    cell_h: geo.cell_height,
                    actual_w: img.width(),
                    actual_h: img.height(),
                });
            }
            let x = (i % cols) as u32 * geo.cell_width;
            let y = (i / cols) as u32 * geo.cell_height;
            image::imageops::overlay(&mut sheet, img, i64::from(x), i64::from(y));
        }
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn geo() -> SheetGeometry {
        SheetGeometry { tile_width: 2, cell_width: 2, cell_height: 2 }
    }

    fn solid(c: [u8; 4]) -> Tile<RgbaImage> {
        Tile::Art(RgbaImage::from_pixel(2, 2, Rgba(c)))
    }

    #[test]
    fn test_blit_positions_row_major() {
        let tiles = vec![
            solid([255, 0, 0, 255]),
            solid([0, 255, 0, 255]),
            solid([0, 0, 255, 255]),
        ];
        let sheet = compose(&tiles, &geo()).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (4, 4));
        assert_eq!(*sheet.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*sheet.get_pixel(2, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*sheet.get_pixel(0, 2), Rgba([0, 0, 255, 255]));
        // the fourth cell was never placed and stays transparent
        assert_eq!(*sheet.get_pixel(2, 2), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_blank_cells_stay_transparent() {
        let tiles = vec![solid([255, 0, 0, 255]), Tile::Blank, solid([0, 255, 0, 255])];
        let sheet = compose(&tiles, &geo()).unwrap();
        assert_eq!(*sheet.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*sheet.get_pixel(3, 1), Rgba([0, 0, 0, 0]));
        assert_eq!(*sheet.get_pixel(0, 2), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_empty_sheet_rejected() {
        let err = compose(&[], &geo()).unwrap_err();
        assert!(matches!(err, MontageError::EmptySheet));
    }

    #[test]
    fn test_tile_geometry_mismatch_rejected() {
        let tiles = vec![Tile::Art(RgbaImage::new(3, 2))];
        let err = compose(&tiles, &geo()).unwrap_err();
        assert!(matches!(err, MontageError::TileGeometry { actual_w: 3, .. }));
    }

    #[test]
    fn test_meta_counts_blanks() {
        let tiles: Vec<Tile<RgbaImage>> =
            vec![solid([1, 2, 3, 255]), Tile::Blank, Tile::Blank];
        let m = meta(&tiles, &geo());
        assert_eq!(m.columns, 2);
        assert_eq!(m.rows, 2);
        assert_eq!(m.cells, 3);
        assert_eq!(m.blank_cells, 2);
        assert!(m.to_json().unwrap().contains("\"blank_cells\": 2"));
    }
}
