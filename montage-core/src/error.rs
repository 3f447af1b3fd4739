use thiserror::Error;

/// Errors raised by montage-core's own logic.
///
/// Collaborator failures (image decode, file I/O) travel as `anyhow::Error`
/// through the loader and render seams instead.
#[derive(Error, Debug)]
pub enum MontageError {
    /// A large tile spans two columns; a narrower grid can never place one.
    #[error("tile width {width} is too small: a large tile needs 2 columns")]
    TileWidthTooSmall { width: usize },

    /// A manifest line did not split into `title,image_path,flag`.
    #[error("malformed record on line {line}: {detail}")]
    MalformedRecord { line: usize, detail: String },

    /// Compositing was asked to produce a sheet from zero cells.
    #[error("no tiles to composite")]
    EmptySheet,

    /// A rendered tile disagrees with the configured cell geometry.
    #[error("tile is {actual_w}x{actual_h}, cell geometry is {cell_w}x{cell_h}")]
    TileGeometry {
        cell_w: u32,
        cell_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}
