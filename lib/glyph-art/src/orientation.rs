//! Mapping of a logical [`Canvas`] onto the fixed on-device raster geometry.

use crate::{RASTER_HEIGHT, RASTER_WIDTH, canvas::Canvas};

/// The axis along which patterns are authored before being mapped onto the device raster.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Orientation {
    /// A `68 × 140` canvas, rotated 90° clockwise onto the device raster.
    #[default]
    Portrait,
    /// A `140 × 68` canvas, passed to the device raster unchanged.
    Landscape,
}

impl Orientation {
    /// Returns the textual representation of the [`Orientation`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Returns the `(width, height)` of a [`Canvas`] authored in this [`Orientation`].
    pub const fn logical_dimensions(&self) -> (usize, usize) {
        match self {
            Self::Portrait => (RASTER_HEIGHT, RASTER_WIDTH),
            Self::Landscape => (RASTER_WIDTH, RASTER_HEIGHT),
        }
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for Orientation {
    fn value_variants<'a>() -> &'a [Self] {
        static ORIENTATIONS: &[Orientation] = &[Orientation::Portrait, Orientation::Landscape];

        ORIENTATIONS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// A coverage raster with the fixed `140 × 68` device geometry.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RasterImage {
    /// The row-major coverage values, `RASTER_WIDTH * RASTER_HEIGHT` long.
    data: Vec<u8>,
}

impl RasterImage {
    /// Creates a [`RasterImage`] from row-major coverage values.
    ///
    /// Returns `None` if `data` is not exactly `RASTER_WIDTH * RASTER_HEIGHT` long.
    pub fn from_raw(data: Vec<u8>) -> Option<Self> {
        (data.len() == RASTER_WIDTH * RASTER_HEIGHT).then_some(Self { data })
    }

    /// Returns the width of the [`RasterImage`] in pixels.
    pub const fn width(&self) -> usize {
        RASTER_WIDTH
    }

    /// Returns the height of the [`RasterImage`] in pixels.
    pub const fn height(&self) -> usize {
        RASTER_HEIGHT
    }

    /// Returns the coverage at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= RASTER_WIDTH || y >= RASTER_HEIGHT {
            return None;
        }

        Some(self.data[y * RASTER_WIDTH + x])
    }

    /// Returns the row-major coverage values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Maps `canvas` onto the device raster.
///
/// A landscape [`Canvas`] is copied as is. A portrait [`Canvas`] is rotated 90° clockwise: the
/// device pixel `(x, y)` takes the canvas pixel `(y, RASTER_WIDTH - 1 - x)`. Every source pixel
/// lands on exactly one device pixel.
pub fn to_raster(canvas: &Canvas) -> RasterImage {
    match canvas.orientation() {
        Orientation::Landscape => RasterImage {
            data: canvas.as_slice().to_vec(),
        },
        Orientation::Portrait => {
            let source = canvas.as_slice();
            let source_width = canvas.width();

            let mut data = Vec::with_capacity(RASTER_WIDTH * RASTER_HEIGHT);
            for y in 0..RASTER_HEIGHT {
                for x in 0..RASTER_WIDTH {
                    let source_x = y;
                    let source_y = RASTER_WIDTH - 1 - x;
                    data.push(source[source_y * source_width + source_x]);
                }
            }

            RasterImage { data }
        }
    }
}
