//! The logical composition surface onto which glyph masks are placed.

use crate::{mask::CoverageMask, orientation::Orientation};

/// A zero-initialized coverage raster sized by its [`Orientation`]'s logical dimensions.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Canvas {
    /// The authoring orientation that determines the dimensions.
    orientation: Orientation,
    /// The row-major coverage values.
    data: Vec<u8>,
}

impl Canvas {
    /// Creates an empty [`Canvas`] for `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        let (width, height) = orientation.logical_dimensions();
        Self {
            orientation,
            data: vec![0; width * height],
        }
    }

    /// Creates a [`Canvas`] from row-major coverage values.
    ///
    /// Returns `None` if `data` does not match the logical dimensions of `orientation`.
    pub fn from_raw(orientation: Orientation, data: Vec<u8>) -> Option<Self> {
        let (width, height) = orientation.logical_dimensions();
        if data.len() != width * height {
            return None;
        }

        Some(Self { orientation, data })
    }

    /// Returns the [`Orientation`] this [`Canvas`] was authored in.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the width of the [`Canvas`] in pixels.
    pub const fn width(&self) -> usize {
        self.orientation.logical_dimensions().0
    }

    /// Returns the height of the [`Canvas`] in pixels.
    pub const fn height(&self) -> usize {
        self.orientation.logical_dimensions().1
    }

    /// Returns the coverage at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        Some(self.data[y * self.width() + x])
    }

    /// Returns the row-major coverage values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Places `mask` so that its center lands on `(center_x, center_y)`, keeping the brighter of
    /// the existing and incoming coverage for every pixel.
    ///
    /// The mask's top-left corner is `(center_x - width / 2, center_y - height / 2)` on a
    /// landscape [`Canvas`]. On a portrait [`Canvas`] the vertical anchor is
    /// `center_y - (height - 1) / 2`, so that an even-sized mask lands on the same device pixels as
    /// its landscape counterpart once the canvas is rotated clockwise. Pixels that fall outside the
    /// [`Canvas`] are dropped.
    pub fn composite_max(&mut self, mask: &CoverageMask, center_x: i32, center_y: i32) {
        let (width, height) = (self.width(), self.height());
        let above_center = match self.orientation {
            Orientation::Landscape => mask.height() / 2,
            Orientation::Portrait => mask.height().saturating_sub(1) / 2,
        };
        let (Ok(half_width), Ok(half_height)) =
            (i64::try_from(mask.width() / 2), i64::try_from(above_center))
        else {
            return;
        };
        let origin_x = i64::from(center_x) - half_width;
        let origin_y = i64::from(center_y) - half_height;

        for mask_y in 0..mask.height() {
            let Some(y) = offset(origin_y, mask_y, height) else {
                continue;
            };

            for mask_x in 0..mask.width() {
                let Some(x) = offset(origin_x, mask_x, width) else {
                    continue;
                };

                let value = mask.get(mask_x, mask_y).unwrap_or(0);
                let pixel = &mut self.data[y * width + x];
                *pixel = (*pixel).max(value);
            }
        }
    }
}

/// Returns `origin + delta` if it lands inside `0..limit`.
fn offset(origin: i64, delta: usize, limit: usize) -> Option<usize> {
    let position = origin.checked_add(i64::try_from(delta).ok()?)?;
    usize::try_from(position).ok().filter(|&position| position < limit)
}
