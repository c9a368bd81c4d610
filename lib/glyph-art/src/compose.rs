//! Composition of glyph copies onto a [`Canvas`] according to a [`PatternSpec`].

use std::collections::BTreeMap;

use crate::{
    canvas::Canvas,
    mask::CoverageMask,
    orientation::Orientation,
    pattern::{MIN_FONT_PX, PatternSpec},
};

/// Something that can render the run's glyph at a requested pixel size.
pub trait GlyphSource {
    /// Renders the glyph at `px` pixels.
    ///
    /// A source that cannot render the glyph returns a blank mask instead of failing.
    fn rasterize(&self, px: u32) -> CoverageMask;
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn rasterize(&self, px: u32) -> CoverageMask {
        (**self).rasterize(px)
    }
}

/// Memoizes the cropped masks produced by a [`GlyphSource`], so that every distinct pixel size is
/// rasterized at most once per run.
#[derive(Debug)]
pub struct GlyphCache<S> {
    /// The source of uncached masks.
    source: S,
    /// Cropped masks, keyed by pixel size.
    masks: BTreeMap<u32, CoverageMask>,
}

impl<S: GlyphSource> GlyphCache<S> {
    /// Creates an empty [`GlyphCache`] over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            masks: BTreeMap::new(),
        }
    }

    /// Returns the mask for `px`, cropped to its inked bounding box.
    pub fn mask(&mut self, px: u32) -> &CoverageMask {
        let source = &self.source;
        self.masks
            .entry(px)
            .or_insert_with(|| source.rasterize(px).crop_to_content())
    }

    /// Returns the mask for `px`, re-rasterized at a smaller size if it does not fit within a
    /// `width × height` canvas.
    pub fn fitted_mask(&mut self, px: u32, width: usize, height: usize) -> &CoverageMask {
        let mask = self.mask(px);
        let (mask_width, mask_height) = (mask.width(), mask.height());
        if mask_width <= width && mask_height <= height {
            return self.mask(px);
        }

        let fitted_px = fit_px(px, width, mask_width).min(fit_px(px, height, mask_height));
        self.mask(fitted_px.max(MIN_FONT_PX))
    }

    /// Returns the number of distinct pixel sizes rasterized so far.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Returns `true` if nothing has been rasterized yet.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

/// Returns `⌊px · (available / actual) · 0.95⌋`, or `px` when the glyph already fits.
fn fit_px(px: u32, available: usize, actual: usize) -> u32 {
    if actual <= available {
        return px;
    }

    let (Ok(available), Ok(actual)) = (u64::try_from(available), u64::try_from(actual)) else {
        return MIN_FONT_PX;
    };
    let scaled = u64::from(px) * available * 19 / (actual * 20);
    u32::try_from(scaled).unwrap_or(MIN_FONT_PX)
}

/// Builds the [`Canvas`] for `pattern` authored in `orientation`.
///
/// Placements are applied in list order. Since overlapping coverage is combined by taking the
/// maximum, the result does not depend on that order.
pub fn compose<S: GlyphSource>(
    pattern: &PatternSpec,
    orientation: Orientation,
    cache: &mut GlyphCache<S>,
) -> Canvas {
    let mut canvas = Canvas::new(orientation);
    let (width, height) = orientation.logical_dimensions();

    for placement in pattern.placements_for(orientation) {
        let mask = cache.fitted_mask(placement.font_px(), width, height);
        canvas.composite_max(mask, placement.center_x, placement.center_y);
    }

    canvas
}

#[cfg(test)]
pub(crate) mod test {
    use std::cell::RefCell;

    use super::{GlyphCache, GlyphSource, compose};
    use crate::{
        mask::CoverageMask,
        orientation::{Orientation, to_raster},
        pattern::{PATTERNS, PatternSpec, Placement, pattern},
    };

    /// A glyph that renders as a solid square with an odd side, padded by a blank border.
    ///
    /// Records every requested pixel size.
    #[derive(Default)]
    pub(crate) struct SquareGlyph {
        /// Every pixel size passed to [`GlyphSource::rasterize`].
        pub(crate) requests: RefCell<Vec<u32>>,
    }

    impl GlyphSource for SquareGlyph {
        fn rasterize(&self, px: u32) -> CoverageMask {
            self.requests.borrow_mut().push(px);

            let side = usize::try_from(px | 1).unwrap();
            let padded = side + 2;
            let mut data = vec![0; padded * padded];
            for y in 1..=side {
                data[y * padded + 1..=y * padded + side].fill(255);
            }
            CoverageMask::from_raw(padded, padded, data).unwrap()
        }
    }

    /// A lopsided `L` with even sides, either upright or turned a quarter clockwise.
    ///
    /// The turned variant is what an upright glyph on a portrait canvas looks like on the device,
    /// so it is the landscape counterpart of the upright one.
    struct LShape {
        /// Whether the shape is turned clockwise.
        turned: bool,
    }

    impl LShape {
        /// Returns the upright shape at `px`: `px & !1` wide, half as tall, inked along the left
        /// two columns and the bottom row.
        fn upright(px: u32) -> CoverageMask {
            let width = usize::try_from(px & !1).unwrap();
            let height = (width / 2) & !1;
            let mut data = vec![0; width * height];
            for y in 0..height {
                for x in 0..width {
                    if x < 2 || y + 1 == height {
                        data[y * width + x] = 255;
                    }
                }
            }
            CoverageMask::from_raw(width, height, data).unwrap()
        }
    }

    impl GlyphSource for LShape {
        fn rasterize(&self, px: u32) -> CoverageMask {
            let upright = Self::upright(px);
            if !self.turned {
                return upright;
            }

            let (width, height) = (upright.height(), upright.width());
            let mut data = vec![0; width * height];
            for y in 0..height {
                for x in 0..width {
                    data[y * width + x] = upright.get(y, width - 1 - x).unwrap();
                }
            }
            CoverageMask::from_raw(width, height, data).unwrap()
        }
    }

    /// A glyph missing from its font.
    struct MissingGlyph;

    impl GlyphSource for MissingGlyph {
        fn rasterize(&self, px: u32) -> CoverageMask {
            let px = usize::try_from(px).unwrap();
            CoverageMask::blank(px, px)
        }
    }

    #[test]
    fn each_size_is_rasterized_once() {
        let source = SquareGlyph::default();
        let mut cache = GlyphCache::new(&source);

        for spec in &PATTERNS {
            let _ = compose(spec, Orientation::Landscape, &mut cache);
            let _ = compose(spec, Orientation::Portrait, &mut cache);
        }

        let mut requests = source.requests.borrow().clone();
        let total = requests.len();
        requests.sort_unstable();
        requests.dedup();
        assert_eq!(requests.len(), total);
        assert_eq!(cache.len(), total);
    }

    #[test]
    fn cached_masks_are_cropped() {
        let mut cache = GlyphCache::new(SquareGlyph::default());
        let mask = cache.mask(10);
        assert_eq!((mask.width(), mask.height()), (11, 11));
        assert!(mask.as_slice().iter().all(|&value| value == 255));
    }

    #[test]
    fn oversized_glyph_is_refitted() {
        let mut cache = GlyphCache::new(SquareGlyph::default());
        // A 101 pixel square does not fit on a 140x68 canvas.
        let mask = cache.fitted_mask(100, 140, 68);
        // ⌊100 · 68/101 · 0.95⌋ = 63, rendered as a 63 pixel square.
        assert_eq!((mask.width(), mask.height()), (63, 63));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn missing_glyph_composes_blank() {
        let mut cache = GlyphCache::new(MissingGlyph);
        for spec in &PATTERNS {
            let canvas = compose(spec, Orientation::Portrait, &mut cache);
            assert!(canvas.as_slice().iter().all(|&value| value == 0));
        }
    }

    #[test]
    fn placement_order_does_not_matter() {
        let spec = pattern(8).unwrap();
        let reversed: Vec<Placement> = spec.placements.iter().rev().copied().collect();
        let reversed = PatternSpec {
            name: spec.name,
            placements: reversed.leak(),
        };

        let mut cache = GlyphCache::new(SquareGlyph::default());
        let forward = compose(spec, Orientation::Landscape, &mut cache);
        let backward = compose(&reversed, Orientation::Landscape, &mut cache);
        assert_eq!(forward, backward);
    }

    #[test]
    fn portrait_layout_lands_where_landscape_does() {
        let mut cache = GlyphCache::new(SquareGlyph::default());
        for spec in &PATTERNS {
            let portrait = compose(spec, Orientation::Portrait, &mut cache);
            let landscape = compose(spec, Orientation::Landscape, &mut cache);
            assert_eq!(to_raster(&portrait), to_raster(&landscape), "{}", spec.name);
        }
    }

    #[test]
    fn even_sized_glyphs_land_where_landscape_does() {
        let mut upright = GlyphCache::new(LShape { turned: false });
        let mut turned = GlyphCache::new(LShape { turned: true });

        for spec in &PATTERNS {
            let portrait = compose(spec, Orientation::Portrait, &mut upright);
            let landscape = compose(spec, Orientation::Landscape, &mut turned);
            assert!(portrait.as_slice().iter().any(|&value| value != 0));
            assert_eq!(to_raster(&portrait), to_raster(&landscape), "{}", spec.name);
        }
    }
}
