//! Single-channel coverage masks produced by rasterizing a glyph.

/// A `width × height` grid of coverage values, row-major, where `0` is no ink and `255` is full
/// ink.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct CoverageMask {
    /// The width of the mask in pixels.
    width: usize,
    /// The height of the mask in pixels.
    height: usize,
    /// The coverage values, `width * height` long.
    data: Vec<u8>,
}

impl CoverageMask {
    /// Creates an all-zero [`CoverageMask`].
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Creates a [`CoverageMask`] from row-major coverage values.
    ///
    /// Returns `None` if `data` does not hold exactly `width * height` values.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if width.checked_mul(height)? != data.len() {
            return None;
        }

        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the width of the mask in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the mask in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the coverage at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.data[y * self.width + x])
    }

    /// Returns the row-major coverage values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if no pixel carries any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&value| value == 0)
    }

    /// Returns the smallest sub-mask holding every non-zero pixel.
    ///
    /// A blank mask is returned unchanged.
    pub fn crop_to_content(&self) -> Self {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0;
        let mut max_y = 0;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.data[y * self.width + x] != 0 {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if min_x == usize::MAX {
            return self.clone();
        }

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut data = Vec::with_capacity(width * height);
        for y in min_y..=max_y {
            let row_start = y * self.width;
            data.extend_from_slice(&self.data[row_start + min_x..=row_start + max_x]);
        }

        Self {
            width,
            height,
            data,
        }
    }
}

#[cfg(test)]
mod test {
    use super::CoverageMask;

    #[test]
    fn from_raw_rejects_mismatched_length() {
        assert!(CoverageMask::from_raw(3, 2, vec![0; 5]).is_none());
        assert!(CoverageMask::from_raw(3, 2, vec![0; 6]).is_some());
    }

    #[test]
    fn crop_keeps_only_inked_bounding_box() {
        #[rustfmt::skip]
        let mask = CoverageMask::from_raw(4, 4, vec![
            0, 0,   0, 0,
            0, 9,   0, 0,
            0, 0, 200, 0,
            0, 0,   0, 0,
        ])
        .unwrap();

        let cropped = mask.crop_to_content();
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.as_slice(), &[9, 0, 0, 200]);
    }

    #[test]
    fn crop_of_blank_mask_is_identity() {
        let mask = CoverageMask::blank(5, 3);
        assert_eq!(mask.crop_to_content(), mask);
        assert!(mask.is_blank());
    }
}
