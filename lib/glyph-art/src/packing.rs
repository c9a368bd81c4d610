//! Quantization of a [`RasterImage`] to 1-bit depth and packing into a stride-aligned bitstream.

use crate::{BIT_DEPTH, PACKED_LEN, RASTER_HEIGHT, RASTER_WIDTH, STRIDE, orientation::RasterImage};

/// Coverage at or above which a pixel is foreground.
pub const THRESHOLD: u8 = 128;

/// A color stored as `[blue, green, red, alpha]`, the byte order of an LVGL palette entry.
pub type Color = [u8; 4];

/// Opaque white.
pub const WHITE: Color = [0xff, 0xff, 0xff, 0xff];
/// Opaque black.
pub const BLACK: Color = [0x00, 0x00, 0x00, 0xff];

/// The two-entry palette of a 1-bit indexed image.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Palette {
    /// The color of bit value `0`.
    pub background: Color,
    /// The color of bit value `1`.
    pub foreground: Color,
}

impl Palette {
    /// Returns the [`Palette`] for the given inversion state.
    ///
    /// Inversion swaps the entries; the bits they index are left alone.
    pub const fn new(inverted: bool) -> Self {
        if inverted {
            Self {
                background: BLACK,
                foreground: WHITE,
            }
        } else {
            Self {
                background: WHITE,
                foreground: BLACK,
            }
        }
    }

    /// Returns the entries in index order.
    pub const fn entries(&self) -> [Color; 2] {
        [self.background, self.foreground]
    }
}

/// A packed 1-bit raster plus the descriptor fields consumed by the firmware widget.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PackedAsset {
    /// The name of the asset.
    name: String,
    /// Whether the palette entries are swapped.
    palette_inverted: bool,
    /// The packed rows, `PACKED_LEN` bytes.
    bytes: Vec<u8>,
}

impl PackedAsset {
    /// Returns the name of the asset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the width of the asset in pixels.
    pub const fn width(&self) -> usize {
        RASTER_WIDTH
    }

    /// Returns the height of the asset in pixels.
    pub const fn height(&self) -> usize {
        RASTER_HEIGHT
    }

    /// Returns the number of bytes per packed row.
    pub const fn stride(&self) -> usize {
        STRIDE
    }

    /// Returns the number of bits per pixel.
    pub const fn bit_depth(&self) -> u8 {
        BIT_DEPTH
    }

    /// Returns `true` if the palette entries are swapped.
    pub const fn palette_inverted(&self) -> bool {
        self.palette_inverted
    }

    /// Returns the [`Palette`] to render this asset with.
    pub const fn palette(&self) -> Palette {
        Palette::new(self.palette_inverted)
    }

    /// Returns the packed bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns an [`Iterator`] over the packed rows.
    pub fn rows(&self) -> PackedRowsIter<'_> {
        PackedRowsIter {
            buffer: &self.bytes,
            index: 0,
        }
    }
}

/// Quantizes `image` at [`THRESHOLD`] and packs it most-significant-bit first, row-major, each
/// row padded with zero bits to [`STRIDE`] bytes.
///
/// `palette_inverted` is recorded as metadata only and never changes the packed bytes.
pub fn pack(name: impl Into<String>, image: &RasterImage, palette_inverted: bool) -> PackedAsset {
    let mut bytes = vec![0; PACKED_LEN];

    for (row, pixels) in bytes
        .chunks_exact_mut(STRIDE)
        .zip(image.as_slice().chunks_exact(RASTER_WIDTH))
    {
        for (x, &coverage) in pixels.iter().enumerate() {
            if coverage >= THRESHOLD {
                row[x / 8] |= 0x80_u8 >> (x % 8);
            }
        }
    }

    PackedAsset {
        name: name.into(),
        palette_inverted,
        bytes,
    }
}

/// An [`Iterator`] over the rows of a [`PackedAsset`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PackedRowsIter<'buffer> {
    /// The packed bytes.
    buffer: &'buffer [u8],
    /// The index of the row that will be returned next.
    index: usize,
}

impl<'buffer> Iterator for PackedRowsIter<'buffer> {
    type Item = PackedRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= RASTER_HEIGHT {
            return None;
        }

        let start = self.index * STRIDE;
        self.index += 1;
        Some(PackedRow {
            buffer: &self.buffer[start..start + STRIDE],
        })
    }
}

/// A row of a [`PackedAsset`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PackedRow<'buffer> {
    /// The [`STRIDE`] bytes of the row.
    buffer: &'buffer [u8],
}

impl<'buffer> PackedRow<'buffer> {
    /// Returns the bytes of the row, padding included.
    pub const fn bytes(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for PackedRow<'buffer> {
    type Item = bool;
    type IntoIter = PackedRowIter<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        PackedRowIter {
            buffer: self.buffer,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels of a [`PackedRow`], excluding padding.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PackedRowIter<'buffer> {
    /// The bytes of the row.
    buffer: &'buffer [u8],
    /// The index of the pixel to be returned next.
    index: usize,
}

impl Iterator for PackedRowIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= RASTER_WIDTH {
            return None;
        }

        let bit = (self.buffer[self.index / 8] >> (7 - self.index % 8)) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}
