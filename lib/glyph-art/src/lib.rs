//! Deterministic conversion of a rendered glyph into the ten 1-bit pattern assets shown by the
//! nice!view glyph widget.
//!
//! Every stage is a plain function over typed intermediates:
//! [`CoverageMask`][cm] → [`Canvas`][c] → [`RasterImage`][ri] → [`PackedAsset`][pa]. Font
//! access sits behind the [`GlyphSource`][gs] trait so that the stages can be exercised without
//! a real font.
//!
//! [cm]: mask::CoverageMask
//! [c]: canvas::Canvas
//! [ri]: orientation::RasterImage
//! [pa]: packing::PackedAsset
//! [gs]: compose::GlyphSource

pub mod canvas;
pub mod compose;
pub mod mask;
pub mod orientation;
pub mod packing;
pub mod pattern;

/// Width, in pixels, of the on-device raster.
pub const RASTER_WIDTH: usize = 140;
/// Height, in pixels, of the on-device raster.
pub const RASTER_HEIGHT: usize = 68;
/// Number of bytes in a single packed row.
pub const STRIDE: usize = RASTER_WIDTH.div_ceil(8);
/// Number of bytes in a packed raster.
pub const PACKED_LEN: usize = STRIDE * RASTER_HEIGHT;
/// Bits per pixel of a packed raster.
pub const BIT_DEPTH: u8 = 1;
