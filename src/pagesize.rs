//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation where width ≤ height. Use the
//! [`PageOrientation`](crate::pagesize::PageOrientation) trait to flip them.
//!
//! # Example
//!
//! ```
//! use pdf_textflow::pagesize::{A4, LETTER, PageOrientation};
//! use pdf_textflow::{PageGeometry, Pt};
//!
//! let portrait = PageGeometry::new(A4.width, A4.height, Pt(50.0)).expect("A4 fits a 50pt margin");
//! let landscape = LETTER.landscape();
//! assert!(landscape.width > landscape.height);
//! # let _ = portrait;
//! ```

use crate::units::*;

/// Page dimensions in points
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageSize {
    pub width: Pt,
    pub height: Pt,
}

impl PageSize {
    pub const fn new(width: Pt, height: Pt) -> PageSize {
        PageSize { width, height }
    }
}

impl From<(Pt, Pt)> for PageSize {
    fn from((width, height): (Pt, Pt)) -> Self {
        PageSize { width, height }
    }
}

pub const LETTER: PageSize = PageSize::new(Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = PageSize::new(Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series, rounded to the hundredth of a point the way most PDF producers do
pub const A3: PageSize = PageSize::new(Pt(841.89), Pt(1190.55));
pub const A4: PageSize = PageSize::new(Pt(595.28), Pt(841.89));
pub const A5: PageSize = PageSize::new(Pt(419.53), Pt(595.28));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.width <= self.height {
            self
        } else {
            PageSize::new(self.height, self.width)
        }
    }

    fn landscape(self) -> Self {
        if self.width >= self.height {
            self
        } else {
            PageSize::new(self.height, self.width)
        }
    }
}
