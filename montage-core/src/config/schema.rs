use serde::{Deserialize, Serialize};

/// Sheet geometry: grid columns plus per-cell pixel dimensions.
///
/// A small entry renders to one `cell_width x cell_height` tile; a large
/// entry renders at twice those dimensions and is split into four quadrant
/// tiles. Defaults match the classic montage layout: 6 columns of 64x98
/// cells (large tiles rendered at 128x196).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetGeometry {
    pub tile_width: usize,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        Self { tile_width: 6, cell_width: 64, cell_height: 98 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let geo = SheetGeometry::default();
        assert_eq!(geo.tile_width, 6);
        assert_eq!(geo.cell_width, 64);
        assert_eq!(geo.cell_height, 98);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let geo: SheetGeometry = serde_yaml::from_str("tile_width: 4\n").unwrap();
        assert_eq!(geo.tile_width, 4);
        assert_eq!(geo.cell_width, 64);
        assert_eq!(geo.cell_height, 98);
    }
}
