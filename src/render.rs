//! Raster snapshot of the square grid.

use crate::{
    foundation::{
        core::Rgb8,
        error::{BlockPartyError, BlockPartyResult},
    },
    layout::spiral::{GridExtent, compute_positions},
    model::Square,
};

/// Largest accepted snapshot width or height in pixels.
pub const MAX_SNAPSHOT_SIDE: u32 = 16_384;

/// Square size, spacing and background for [`render_snapshot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// Square edge length in pixels.
    pub square_size: u32,
    /// Pixels between neighbouring squares.
    pub gap: u32,
    /// Straight RGBA8 fill behind and between the squares.
    pub background: [u8; 4],
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            square_size: 60,
            gap: 5,
            background: [0, 0, 0, 0],
        }
    }
}

/// Draw every square at its spiral position. An empty list yields a 1x1 background image.
///
/// Canvases wider or taller than [`MAX_SNAPSHOT_SIDE`] are rejected.
#[tracing::instrument(skip(squares), fields(squares = squares.len()))]
pub fn render_snapshot(
    squares: &[Square],
    opts: RenderOpts,
) -> BlockPartyResult<image::RgbaImage> {
    if opts.square_size == 0 {
        return Err(BlockPartyError::validation("square_size must be > 0"));
    }

    let fills = squares
        .iter()
        .map(|sq| Rgb8::parse_hex(&sq.color))
        .collect::<BlockPartyResult<Vec<_>>>()?;
    let positions = compute_positions(squares.len());
    let extent = GridExtent::of(&positions);

    let to_px = |cells: u64| -> BlockPartyResult<u32> {
        let px = GridExtent::span_px(cells, opts.square_size, opts.gap).max(1);
        u32::try_from(px)
            .ok()
            .filter(|&px| px <= MAX_SNAPSHOT_SIDE)
            .ok_or_else(|| {
                BlockPartyError::validation(format!(
                    "snapshot side of {px}px exceeds {MAX_SNAPSHOT_SIDE}px"
                ))
            })
    };
    let width = to_px(extent.cols)?;
    let height = to_px(extent.rows)?;

    let mut img = image::RgbaImage::from_pixel(width, height, image::Rgba(opts.background));
    let step = u64::from(opts.square_size) + u64::from(opts.gap);
    for (pos, fill) in positions.iter().zip(&fills) {
        let x0 = pos.x as u64 * step;
        let y0 = pos.y as u64 * step;
        let px = image::Rgba([fill.r, fill.g, fill.b, 255]);
        for y in y0..y0 + u64::from(opts.square_size) {
            for x in x0..x0 + u64::from(opts.square_size) {
                img.put_pixel(x as u32, y as u32, px);
            }
        }
    }
    Ok(img)
}

#[cfg(test)]
#[path = "../tests/unit/render/render.rs"]
mod tests;
