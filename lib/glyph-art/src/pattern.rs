//! The fixed table of glyph arrangements.
//!
//! Placements are authored in landscape device coordinates (`140 × 68`). Authoring a pattern
//! in [`Orientation::Portrait`] maps each placement onto the portrait canvas so that, once the
//! canvas is rotated onto the device raster, every glyph center returns to its authored spot.

use crate::{RASTER_WIDTH, orientation::Orientation};

/// The rightmost landscape column, which becomes the top portrait row.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "RASTER_WIDTH is 140"
)]
const LAST_COLUMN: i32 = RASTER_WIDTH as i32 - 1;

/// A single copy of the glyph within a [`PatternSpec`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Placement {
    /// The horizontal center of the glyph.
    pub center_x: i32,
    /// The vertical center of the glyph.
    pub center_y: i32,
    /// The nominal size of the glyph. See [`font_px`].
    pub size: u32,
}

impl Placement {
    /// Creates a new [`Placement`].
    pub const fn new(center_x: i32, center_y: i32, size: u32) -> Self {
        Self {
            center_x,
            center_y,
            size,
        }
    }

    /// Returns this [`Placement`] expressed in the logical coordinates of `orientation`.
    pub const fn for_orientation(&self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Landscape => *self,
            Orientation::Portrait => Self {
                center_x: self.center_y,
                center_y: LAST_COLUMN - self.center_x,
                size: self.size,
            },
        }
    }

    /// Returns the pixel size at which the glyph for this [`Placement`] is rasterized.
    pub const fn font_px(&self) -> u32 {
        font_px(self.size)
    }
}

/// Smallest pixel size at which a glyph is ever rasterized.
pub const MIN_FONT_PX: u32 = 8;

/// Returns the rasterization pixel size for a nominal placement `size`: `max(8, ⌊1.2 · size⌋)`.
pub const fn font_px(size: u32) -> u32 {
    let px = size.saturating_mul(6) / 5;
    if px < MIN_FONT_PX { MIN_FONT_PX } else { px }
}

/// A named, immutable list of [`Placement`]s.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PatternSpec {
    /// The name of the pattern, which doubles as the name of the emitted asset.
    pub name: &'static str,
    /// The placements, in landscape coordinates.
    pub placements: &'static [Placement],
}

impl PatternSpec {
    /// Returns the one-based index of this [`PatternSpec`] within [`PATTERNS`], if present.
    pub fn index(&self) -> Option<usize> {
        PATTERNS
            .iter()
            .position(|pattern| pattern == self)
            .map(|position| position + 1)
    }

    /// Returns an [`Iterator`] over the placements in the logical coordinates of
    /// `orientation`.
    pub fn placements_for(&self, orientation: Orientation) -> impl Iterator<Item = Placement> {
        self.placements
            .iter()
            .map(move |placement| placement.for_orientation(orientation))
    }

    /// Returns the largest nominal size used by this [`PatternSpec`].
    pub fn max_size(&self) -> u32 {
        self.placements
            .iter()
            .map(|placement| placement.size)
            .max()
            .unwrap_or(0)
    }
}

/// Returns the [`PatternSpec`] with the one-based `index`.
pub fn pattern(index: usize) -> Option<&'static PatternSpec> {
    PATTERNS.get(index.checked_sub(1)?)
}

/// Returns the largest nominal size used across all [`PATTERNS`].
pub fn max_size() -> u32 {
    PATTERNS.iter().map(PatternSpec::max_size).max().unwrap_or(0)
}

/// Shorthand for [`Placement::new`] inside the table below.
const fn at(center_x: i32, center_y: i32, size: u32) -> Placement {
    Placement::new(center_x, center_y, size)
}

/// The ten built-in patterns, in index order. The firmware widget selects an asset by name, so
/// names and order must stay stable.
pub static PATTERNS: [PatternSpec; 10] = [
    PatternSpec {
        name: "pattern1",
        placements: &[at(70, 34, 60)],
    },
    PatternSpec {
        name: "pattern2",
        placements: &[at(70, 34, 48), at(30, 15, 28), at(110, 50, 20)],
    },
    PatternSpec {
        name: "pattern3",
        placements: &[at(55, 30, 42), at(35, 18, 28), at(78, 42, 32), at(48, 50, 20)],
    },
    PatternSpec {
        name: "pattern4",
        placements: &[
            at(50, 28, 50),
            at(28, 16, 32),
            at(88, 44, 40),
            at(42, 54, 26),
            at(70, 18, 28),
            at(108, 34, 30),
        ],
    },
    PatternSpec {
        name: "pattern5",
        placements: &[at(30, 34, 18), at(60, 34, 26), at(90, 34, 34), at(120, 34, 42)],
    },
    PatternSpec {
        name: "pattern6",
        placements: &[
            at(15, 50, 20),
            at(25, 18, 24),
            at(60, 12, 30),
            at(85, 48, 26),
            at(105, 20, 24),
            at(125, 40, 18),
        ],
    },
    PatternSpec {
        name: "pattern7",
        placements: &[
            // Center.
            at(70, 34, 28),
            // Ring.
            at(70, 12, 16),
            at(95, 20, 16),
            at(105, 44, 16),
            at(70, 56, 16),
            at(45, 48, 16),
            at(35, 24, 16),
        ],
    },
    PatternSpec {
        name: "pattern8",
        placements: &[
            // Center.
            at(70, 34, 22),
            // Corners.
            at(20, 10, 16),
            at(120, 10, 16),
            at(20, 58, 16),
            at(120, 58, 16),
            // Inner diagonals.
            at(35, 25, 14),
            at(105, 25, 14),
            at(35, 43, 14),
            at(105, 43, 14),
        ],
    },
    PatternSpec {
        name: "pattern9",
        placements: &[
            at(10, 34, 16),
            at(25, 22, 18),
            at(40, 14, 20),
            at(55, 22, 22),
            at(70, 34, 24),
            at(85, 46, 22),
            at(100, 54, 20),
            at(115, 46, 18),
            at(130, 34, 16),
        ],
    },
    PatternSpec {
        name: "pattern10",
        placements: &[
            at(20, 20, 18),
            at(50, 15, 22),
            at(80, 12, 16),
            at(110, 18, 20),
            at(30, 40, 14),
            at(60, 38, 26),
            at(90, 42, 18),
            at(120, 36, 22),
            at(40, 57, 16),
            at(75, 54, 20),
            at(105, 52, 16),
        ],
    },
];
