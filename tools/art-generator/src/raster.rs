//! Glyph rasterization with `fontdue`.

use core::{error, fmt};

use fontdue::{Font, FontSettings};
use glyph_art::{compose::GlyphSource, mask::CoverageMask};

/// The run's codepoint bound to a parsed font.
pub struct FontGlyph {
    /// The parsed font.
    font: Font,
    /// The codepoint to render.
    codepoint: char,
}

impl FontGlyph {
    /// Parses `bytes` as a TrueType or OpenType font and binds it to `codepoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FontParseError`] if `bytes` is not a font `fontdue` can read.
    pub fn from_bytes(bytes: Vec<u8>, codepoint: char) -> Result<Self, FontParseError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(FontParseError)?;
        Ok(Self { font, codepoint })
    }

    /// Returns the codepoint this [`FontGlyph`] renders.
    pub const fn codepoint(&self) -> char {
        self.codepoint
    }
}

impl GlyphSource for FontGlyph {
    fn rasterize(&self, px: u32) -> CoverageMask {
        let index = self.font.lookup_glyph_index(self.codepoint);
        if index == 0 {
            // The font has no glyph for the codepoint: render nothing.
            let side = usize::try_from(px).unwrap_or(0);
            return CoverageMask::blank(side, side);
        }

        let px = f32::from(u16::try_from(px).unwrap_or(u16::MAX));
        let (metrics, bitmap) = self.font.rasterize_indexed(index, px);
        CoverageMask::from_raw(metrics.width, metrics.height, bitmap).unwrap_or_default()
    }
}

impl fmt::Debug for FontGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontGlyph")
            .field("font", &self.font.name())
            .field("codepoint", &self.codepoint)
            .finish()
    }
}

/// `fontdue` rejected the font data.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontParseError(pub &'static str);

impl fmt::Display for FontParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse font: {}", self.0)
    }
}

impl error::Error for FontParseError {}
