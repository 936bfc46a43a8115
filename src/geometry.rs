use crate::pagesize::{PageSize, A4};
use crate::units::Pt;
use crate::PDFError;

/// Vertical advance between successive baselines, as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.5;

/// The size of a page and the uniform margin kept clear on every edge of it.
///
/// Coordinates follow the PDF convention: the origin is the bottom-left corner of the page
/// and y increases upwards. A geometry can only be built through [PageGeometry::new], which
/// guarantees that the margins leave some printable area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    width: Pt,
    height: Pt,
    margin: Pt,
}

impl PageGeometry {
    /// Validates and creates a page geometry. Width and height must be positive and the
    /// margin must be non-negative and less than half of the smaller page dimension.
    pub fn new(width: Pt, height: Pt, margin: Pt) -> Result<PageGeometry, PDFError> {
        if !(width.is_finite() && width > Pt(0.0)) || !(height.is_finite() && height > Pt(0.0)) {
            return Err(PDFError::InvalidGeometry(format!(
                "page size must be positive, got {width} x {height}"
            )));
        }
        if !(margin.is_finite() && margin >= Pt(0.0)) {
            return Err(PDFError::InvalidGeometry(format!(
                "margin must be non-negative, got {margin}"
            )));
        }
        if margin * 2.0 >= width.min(height) {
            return Err(PDFError::InvalidGeometry(format!(
                "margin {margin} leaves no printable area on a {width} x {height} page"
            )));
        }

        Ok(PageGeometry {
            width,
            height,
            margin,
        })
    }

    /// Creates a geometry from one of the [pagesize](crate::pagesize) constants
    pub fn from_size(size: PageSize, margin: Pt) -> Result<PageGeometry, PDFError> {
        PageGeometry::new(size.width, size.height, margin)
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn margin(&self) -> Pt {
        self.margin
    }

    /// Width available to a line of text between the left and right margins
    pub fn printable_width(&self) -> Pt {
        self.width - self.margin * 2.0
    }

    /// Height available for lines between the top and bottom margins
    pub fn printable_height(&self) -> Pt {
        self.height - self.margin * 2.0
    }

    /// The baseline of the first line on a page
    pub fn top(&self) -> Pt {
        self.height - self.margin
    }

    /// Distance between two successive baselines at the given font size
    pub fn line_height(font_size: Pt) -> Pt {
        font_size * LINE_HEIGHT_FACTOR
    }

    /// How many lines of the given font size fit on one page
    pub fn max_lines(&self, font_size: Pt) -> usize {
        let lines = self.printable_height() / PageGeometry::line_height(font_size);
        if lines.is_finite() && lines > 0.0 {
            lines.floor() as usize
        } else {
            0
        }
    }

    pub(crate) fn media_box(&self) -> pdf_writer::Rect {
        pdf_writer::Rect::new(0.0, 0.0, self.width.0, self.height.0)
    }

    pub(crate) fn content_box(&self) -> pdf_writer::Rect {
        pdf_writer::Rect::new(
            self.margin.0,
            self.margin.0,
            (self.width - self.margin).0,
            (self.height - self.margin).0,
        )
    }
}

impl Default for PageGeometry {
    /// A4 with a 50pt margin on every side
    fn default() -> Self {
        PageGeometry {
            width: A4.width,
            height: A4.height,
            margin: Pt(50.0),
        }
    }
}
