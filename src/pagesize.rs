//! Paper sizes that label sheets are printed on.
//!
//! Sizes are stored portrait, as (width, height) in points.
//!
//! ```
//! use avery_labels::{pagesize::LETTER, Mm};
//!
//! let height: Mm = LETTER.1.into();
//! assert!((height.0 - 279.4).abs() < 1e-3);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// US Letter, 8.5 x 11 inches. Avery 5160 sheets are this size.
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
/// ISO A4, 210 x 297 mm
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_height_in_mm() {
        let height: Mm = LETTER.1.into();
        assert!((height.0 - 279.4).abs() < 1e-3);
    }

    #[test]
    fn a4_width_in_mm() {
        let width: Mm = A4.0.into();
        assert!((width.0 - 210.0).abs() < 1e-3);
        assert!(A4.0 < LETTER.0);
    }
}
